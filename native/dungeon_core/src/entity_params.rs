//! Path: native/dungeon_core/src/entity_params.rs
//! Summary: 敵・ボス・弾のパラメータテーブル（種類 enum から参照）
//!
//! 種類ごとの数値は enum の判別値でテーブルを引く。
//! 行動ロジックは dungeon_sim 側に置き、ここは純粋なデータのみ。

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOSS_SIZE, ENEMY_ATTACK_COOLDOWN, ENEMY_MELEE_DAMAGE, ENEMY_SIZE, ENEMY_SPEED,
};

// ─── Enemy ────────────────────────────────────────────────────

/// 敵の行動タイプ
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EnemyKind {
    /// 近接追跡型
    #[default]
    Chaser = 0,
    /// 定点射撃型（ホーミング弾）
    Ranged = 1,
    /// 巡回型（検知で追跡型に切り替わる）
    Patrol = 2,
}

#[derive(Clone, Copy, Debug)]
pub struct EnemyParams {
    pub max_hp:          f32,
    pub size:            f32,
    pub speed:           f32,
    pub melee_damage:    f32,
    pub attack_cooldown: f64,
    pub render_kind:     u8,
}

static ENEMY_TABLE: [EnemyParams; 3] = [
    EnemyParams { max_hp: 40.0, size: ENEMY_SIZE, speed: ENEMY_SPEED, melee_damage: ENEMY_MELEE_DAMAGE, attack_cooldown: ENEMY_ATTACK_COOLDOWN, render_kind: 1 }, // Chaser
    EnemyParams { max_hp: 60.0, size: ENEMY_SIZE, speed: ENEMY_SPEED, melee_damage: ENEMY_MELEE_DAMAGE, attack_cooldown: ENEMY_ATTACK_COOLDOWN, render_kind: 2 }, // Ranged
    EnemyParams { max_hp: 55.0, size: ENEMY_SIZE, speed: ENEMY_SPEED, melee_damage: ENEMY_MELEE_DAMAGE, attack_cooldown: ENEMY_ATTACK_COOLDOWN, render_kind: 3 }, // Patrol
];

impl EnemyKind {
    pub fn params(self) -> &'static EnemyParams {
        &ENEMY_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Chaser => "chaser",
            Self::Ranged => "ranged",
            Self::Patrol => "patrol",
        }
    }
}

// ─── Boss ─────────────────────────────────────────────────────

/// ボスの種類
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BossKind {
    /// 近接タンク（扇状弾 + 衝撃波リング）
    Tank   = 0,
    /// テレポート術師（回転スパイラル + 弾の壁）
    Caster = 1,
}

/// ボスのフェーズ。normal → enraged の一方向のみ。
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BossPhase {
    #[default]
    Normal,
    Enraged,
}

#[derive(Clone, Copy, Debug)]
pub struct BossParams {
    pub max_hp:            f32,
    pub size:              f32,
    pub speed:             f32,
    /// [normal, enraged]
    pub attack_cooldown:   [f64; 2],
    pub special_cooldown:  [f64; 2],
    pub teleport_cooldown: Option<[f64; 2]>,
    pub render_kind:       u8,
    /// HUD 表示用のボス名
    pub name:              &'static str,
}

static BOSS_TABLE: [BossParams; 2] = [
    BossParams { max_hp: 150.0, size: BOSS_SIZE, speed: 90.0,  attack_cooldown: [3.0, 2.0], special_cooldown: [8.0, 5.0], teleport_cooldown: None,             render_kind: 11, name: "Warden of the Depths" },
    BossParams { max_hp: 120.0, size: BOSS_SIZE, speed: 120.0, attack_cooldown: [3.0, 2.0], special_cooldown: [8.0, 5.0], teleport_cooldown: Some([8.0, 5.0]), render_kind: 12, name: "Lord of Shadows" },
];

impl BossKind {
    pub fn params(self) -> &'static BossParams {
        &BOSS_TABLE[self as usize]
    }
}

impl BossPhase {
    fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Enraged => 1,
        }
    }
}

impl BossParams {
    pub fn attack_cooldown(&self, phase: BossPhase) -> f64 {
        self.attack_cooldown[phase.index()]
    }

    pub fn special_cooldown(&self, phase: BossPhase) -> f64 {
        self.special_cooldown[phase.index()]
    }

    pub fn teleport_cooldown(&self, phase: BossPhase) -> Option<f64> {
        self.teleport_cooldown.map(|cd| cd[phase.index()])
    }

    /// 通常攻撃の弾数（タンク: 扇 5/8、術師: スパイラル 8/12）
    pub fn volley_count(&self, kind: BossKind, phase: BossPhase) -> usize {
        match (kind, phase) {
            (BossKind::Tank, BossPhase::Normal) => 5,
            (BossKind::Tank, BossPhase::Enraged) => 8,
            (BossKind::Caster, BossPhase::Normal) => 8,
            (BossKind::Caster, BossPhase::Enraged) => 12,
        }
    }
}

// ─── Projectile ───────────────────────────────────────────────

/// 弾を撃った陣営。衝突対象は反対陣営のみ。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Faction {
    Hostile,
    Boss,
    Player,
}

/// 弾の種類
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ProjectileKind {
    /// 遠距離敵のホーミング弾
    Homing    = 0,
    /// タンクの扇状弾
    Orb       = 1,
    /// タンクの衝撃波リング弾
    Shockwave = 2,
    /// 術師のスパイラル / 壁弾
    Shard     = 3,
    /// プレイヤーの矢
    Arrow     = 4,
}

#[derive(Clone, Copy, Debug)]
pub struct ProjectileParams {
    pub size:        f32,
    pub damage:      f32,
    pub lifetime:    f64,
    pub faction:     Faction,
    pub homing:      bool,
    pub render_kind: u8,
}

static PROJECTILE_TABLE: [ProjectileParams; 5] = [
    ProjectileParams { size: 8.0,  damage: 10.0, lifetime: 4.0, faction: Faction::Hostile, homing: true,  render_kind: 20 }, // Homing
    ProjectileParams { size: 12.0, damage: 20.0, lifetime: 6.0, faction: Faction::Boss,    homing: false, render_kind: 21 }, // Orb
    ProjectileParams { size: 16.0, damage: 25.0, lifetime: 6.0, faction: Faction::Boss,    homing: false, render_kind: 22 }, // Shockwave
    ProjectileParams { size: 8.0,  damage: 15.0, lifetime: 6.0, faction: Faction::Boss,    homing: false, render_kind: 23 }, // Shard
    ProjectileParams { size: 8.0,  damage: 0.0,  lifetime: 2.0, faction: Faction::Player,  homing: false, render_kind: 24 }, // Arrow（ダメージは発射時に決定）
];

/// ホーミング弾の速さ（px/s）
pub const HOMING_SPEED: f32 = 100.0;

impl ProjectileKind {
    pub fn params(self) -> &'static ProjectileParams {
        &PROJECTILE_TABLE[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_max_hp() {
        assert!((EnemyKind::Chaser.params().max_hp - 40.0).abs() < 0.001);
        assert!((EnemyKind::Ranged.params().max_hp - 60.0).abs() < 0.001);
        assert!((EnemyKind::Patrol.params().max_hp - 55.0).abs() < 0.001);
    }

    #[test]
    fn boss_cooldowns_shorten_when_enraged() {
        for kind in [BossKind::Tank, BossKind::Caster] {
            let bp = kind.params();
            assert!(bp.attack_cooldown(BossPhase::Enraged) < bp.attack_cooldown(BossPhase::Normal));
            assert!(bp.special_cooldown(BossPhase::Enraged) < bp.special_cooldown(BossPhase::Normal));
        }
        assert!(BossKind::Tank.params().teleport_cooldown(BossPhase::Normal).is_none());
        assert_eq!(BossKind::Caster.params().teleport_cooldown(BossPhase::Enraged), Some(5.0));
    }

    #[test]
    fn boss_volley_counts() {
        let tank = BossKind::Tank.params();
        assert_eq!(tank.volley_count(BossKind::Tank, BossPhase::Normal), 5);
        assert_eq!(tank.volley_count(BossKind::Tank, BossPhase::Enraged), 8);
        let caster = BossKind::Caster.params();
        assert_eq!(caster.volley_count(BossKind::Caster, BossPhase::Normal), 8);
        assert_eq!(caster.volley_count(BossKind::Caster, BossPhase::Enraged), 12);
    }

    #[test]
    fn projectile_factions() {
        assert_eq!(ProjectileKind::Homing.params().faction, Faction::Hostile);
        assert!(ProjectileKind::Homing.params().homing);
        assert_eq!(ProjectileKind::Shockwave.params().faction, Faction::Boss);
        assert_eq!(ProjectileKind::Arrow.params().faction, Faction::Player);
        assert!((ProjectileKind::Orb.params().damage - 20.0).abs() < 0.001);
    }
}
