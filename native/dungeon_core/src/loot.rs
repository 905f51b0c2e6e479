//! Path: native/dungeon_core/src/loot.rs
//! Summary: 宝箱の中身（スキル・武器・ポーション）のテーブルと抽選
//!
//! 戦闘側が必要とするのは効果タグと数値だけ。抽選には呼び出し側が
//! 持つ専用の `SimpleRng` を渡す。

use crate::physics::rng::SimpleRng;

/// スキルの効果タグ
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SkillKind {
    /// 移動速度 +magnitude（割合）
    Speed,
    /// スロットで発動するダッシュ
    Dash,
    /// 被ダメージ回避率
    Dodge,
    /// HP 50% 未満で与ダメージ +magnitude（割合）
    Berserker,
    /// 最大スタミナ +magnitude
    Stamina,
    /// クリティカル率（ダメージ ×2）
    Crit,
    /// 撃破ごとの回復量
    Vampire,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Skill {
    pub name:      &'static str,
    pub kind:      SkillKind,
    pub magnitude: f32,
}

impl Skill {
    /// 装備した時点で効果が出るか（ダッシュ以外はすべてパッシブ）
    pub fn is_passive(&self) -> bool {
        self.kind != SkillKind::Dash
    }
}

pub static SKILL_TABLE: [Skill; 7] = [
    Skill { name: "Swiftness",  kind: SkillKind::Speed,     magnitude: 0.2 },
    Skill { name: "Dash",       kind: SkillKind::Dash,      magnitude: 1.0 },
    Skill { name: "Evasion",    kind: SkillKind::Dodge,     magnitude: 0.15 },
    Skill { name: "Berserker",  kind: SkillKind::Berserker, magnitude: 0.5 },
    Skill { name: "Endurance",  kind: SkillKind::Stamina,   magnitude: 50.0 },
    Skill { name: "Critical",   kind: SkillKind::Crit,      magnitude: 0.25 },
    Skill { name: "Vampirism",  kind: SkillKind::Vampire,   magnitude: 10.0 },
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WeaponKind {
    Bow,
    Sword,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Weapon {
    pub name:         &'static str,
    pub kind:         WeaponKind,
    pub damage_bonus: f32,
    pub range_bonus:  f32,
}

pub static WEAPON_TABLE: [Weapon; 4] = [
    Weapon { name: "Elven Bow",     kind: WeaponKind::Bow,   damage_bonus: 10.0, range_bonus: 100.0 },
    Weapon { name: "Runic Sword",   kind: WeaponKind::Sword, damage_bonus: 15.0, range_bonus: 30.0 },
    Weapon { name: "Precision Bow", kind: WeaponKind::Bow,   damage_bonus: 5.0,  range_bonus: 150.0 },
    Weapon { name: "Cursed Blade",  kind: WeaponKind::Sword, damage_bonus: 20.0, range_bonus: 30.0 },
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Potion {
    /// 固定量回復
    Health,
    /// 最大まで回復
    Full,
}

static POTION_TABLE: [Potion; 2] = [Potion::Health, Potion::Full];

/// 宝箱 1 個分の中身
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Loot {
    Skill(Skill),
    Weapon(Weapon),
    Potion(Potion),
}

impl Loot {
    /// カテゴリを 1/3 ずつで選び、カテゴリ内から一様に選ぶ
    pub fn roll(rng: &mut SimpleRng) -> Loot {
        let loot = match rng.next_u32() % 3 {
            0 => rng.pick(&SKILL_TABLE).copied().map(Loot::Skill),
            1 => rng.pick(&WEAPON_TABLE).copied().map(Loot::Weapon),
            _ => rng.pick(&POTION_TABLE).copied().map(Loot::Potion),
        };
        loot.unwrap_or(Loot::Potion(Potion::Health))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Loot::Skill(s) => s.name,
            Loot::Weapon(w) => w.name,
            Loot::Potion(Potion::Health) => "Health Potion",
            Loot::Potion(Potion::Full) => "Full Potion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_is_deterministic_per_seed() {
        let mut a = SimpleRng::new(77);
        let mut b = SimpleRng::new(77);
        for _ in 0..20 {
            assert_eq!(Loot::roll(&mut a), Loot::roll(&mut b));
        }
    }

    #[test]
    fn roll_covers_every_category() {
        let mut rng = SimpleRng::new(3);
        let (mut skills, mut weapons, mut potions) = (0, 0, 0);
        for _ in 0..300 {
            match Loot::roll(&mut rng) {
                Loot::Skill(_) => skills += 1,
                Loot::Weapon(_) => weapons += 1,
                Loot::Potion(_) => potions += 1,
            }
        }
        assert!(skills > 0 && weapons > 0 && potions > 0);
    }

    #[test]
    fn only_dash_is_active() {
        let active: Vec<&str> = SKILL_TABLE.iter().filter(|s| !s.is_passive()).map(|s| s.name).collect();
        assert_eq!(active, vec!["Dash"]);
    }
}
