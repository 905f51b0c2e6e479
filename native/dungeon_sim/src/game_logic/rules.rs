//! Path: native/dungeon_sim/src/game_logic/rules.rs
//! Summary: 戦闘ルール（会心・バーサーカー・回避・吸血）の差し替え可能なインターフェース
//!
//! プレイヤーはワールドへの参照を持たない。ダメージ計算に必要な横断的な判定は
//! 生成時にワールドへ注入された `CombatRules` に問い合わせる。

use crate::world::PlayerState;
use dungeon_core::physics::rng::SimpleRng;

/// 会心時の倍率
pub const CRIT_MULTIPLIER: f32 = 2.0;
/// バーサーカーが有効になる HP 割合
pub const BERSERKER_HP_RATIO: f32 = 0.5;

pub trait CombatRules: Send + Sync {
    /// プレイヤーの与ダメージ。`base` は武器ボーナス込みの値。
    fn outgoing_damage(&self, player: &PlayerState, base: f32, rng: &mut SimpleRng) -> f32;

    /// 被弾を回避したか
    fn dodges(&self, player: &PlayerState, rng: &mut SimpleRng) -> bool;

    /// 撃破時の回復量
    fn heal_on_kill(&self, player: &PlayerState) -> f32;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRules;

impl CombatRules for StandardRules {
    fn outgoing_damage(&self, player: &PlayerState, base: f32, rng: &mut SimpleRng) -> f32 {
        let mut damage = base;
        let p = &player.passives;
        if p.berserker_bonus > 0.0 && player.hp_ratio() < BERSERKER_HP_RATIO {
            damage *= 1.0 + p.berserker_bonus;
        }
        if p.crit_chance > 0.0 && rng.next_f32() < p.crit_chance {
            damage *= CRIT_MULTIPLIER;
        }
        damage
    }

    fn dodges(&self, player: &PlayerState, rng: &mut SimpleRng) -> bool {
        let chance = player.passives.dodge_chance;
        chance > 0.0 && rng.next_f32() < chance
    }

    fn heal_on_kill(&self, player: &PlayerState) -> f32 {
        player.passives.vampire_heal
    }
}
