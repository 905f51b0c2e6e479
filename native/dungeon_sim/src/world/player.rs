//! Path: native/dungeon_sim/src/world/player.rs
//! Summary: プレイヤー状態（ボックス・HP・スタミナ・武器・スキルスロット・ダッシュ能力）

use dungeon_core::constants::{
    DASH_COOLDOWN, DASH_COST, DASH_DISTANCE, PLAYER_ATTACK_COOLDOWN, PLAYER_ATTACK_DAMAGE,
    PLAYER_ATTACK_RANGE, PLAYER_INVINCIBLE_SECS, PLAYER_MAX_HP, PLAYER_MAX_STAMINA, PLAYER_SIZE,
    TIME_EPSILON,
};
use dungeon_core::loot::{Skill, SkillKind, Weapon};
use dungeon_core::physics::body::Body;

pub const SKILL_SLOTS: usize = 4;

/// ダッシュ能力。スキルスロットにダッシュがあるときだけ `Dash`。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DashCapability {
    NoDash,
    Dash {
        distance:  f32,
        cost:      f32,
        cooldown:  f64,
        last_used: Option<f64>,
    },
}

impl DashCapability {
    pub fn standard() -> Self {
        Self::Dash {
            distance:  DASH_DISTANCE,
            cost:      DASH_COST,
            cooldown:  DASH_COOLDOWN,
            last_used: None,
        }
    }
}

/// 装備中のパッシブスキルの合計値
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Passives {
    pub speed_bonus:     f32,
    pub dodge_chance:    f32,
    pub berserker_bonus: f32,
    pub stamina_bonus:   f32,
    pub crit_chance:     f32,
    pub vampire_heal:    f32,
}

pub struct PlayerState {
    pub body:        Body,
    pub hp:          f32,
    pub max_hp:      f32,
    pub stamina:     f32,
    pub max_stamina: f32,
    pub alive:       bool,
    /// 最後に動いた方向（単位ベクトル）。弓とダッシュの向き。
    pub facing:      (f32, f32),
    pub sprinting:   bool,
    pub weapon:      Option<Weapon>,
    pub skills:      [Option<Skill>; SKILL_SLOTS],
    pub passives:    Passives,
    pub dash:        DashCapability,
    pub last_attack: Option<f64>,
    pub last_damage: Option<f64>,
}

impl PlayerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body:        Body::square(x, y, PLAYER_SIZE),
            hp:          PLAYER_MAX_HP,
            max_hp:      PLAYER_MAX_HP,
            stamina:     PLAYER_MAX_STAMINA,
            max_stamina: PLAYER_MAX_STAMINA,
            alive:       true,
            facing:      (1.0, 0.0),
            sprinting:   false,
            weapon:      None,
            skills:      [None; SKILL_SLOTS],
            passives:    Passives::default(),
            dash:        DashCapability::NoDash,
            last_attack: None,
            last_damage: None,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        self.body.center()
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp > 0.0 { self.hp / self.max_hp } else { 0.0 }
    }

    /// 近接攻撃の射程（武器の射程ボーナス込み）
    pub fn attack_range(&self) -> f32 {
        PLAYER_ATTACK_RANGE + self.weapon.map(|w| w.range_bonus).unwrap_or(0.0)
    }

    /// 補正前の攻撃力（武器のダメージボーナス込み）
    pub fn base_damage(&self) -> f32 {
        PLAYER_ATTACK_DAMAGE + self.weapon.map(|w| w.damage_bonus).unwrap_or(0.0)
    }

    pub fn attack_ready(&self, now: f64) -> bool {
        self.last_attack
            .map_or(true, |t| now - t >= PLAYER_ATTACK_COOLDOWN - TIME_EPSILON)
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        self.last_damage
            .map_or(false, |t| now - t < PLAYER_INVINCIBLE_SECS - TIME_EPSILON)
    }

    /// ダメージを受ける。無敵時間中・死亡後は何もせず false。
    pub fn take_damage(&mut self, amount: f32, now: f64) -> bool {
        if !self.alive || self.is_invulnerable(now) {
            return false;
        }
        self.last_damage = Some(now);
        self.hp -= amount;
        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.alive = false;
        }
        true
    }

    pub fn heal(&mut self, amount: f32) {
        if self.alive {
            self.hp = (self.hp + amount).min(self.max_hp);
        }
    }

    pub fn equip_weapon(&mut self, weapon: Weapon) {
        self.weapon = Some(weapon);
    }

    /// スロットにスキルを装備する（既存のスキルは置き換え）。範囲外のスロットは無視。
    pub fn equip_skill(&mut self, slot: usize, skill: Skill) -> bool {
        let Some(entry) = self.skills.get_mut(slot) else {
            return false;
        };
        *entry = Some(skill);
        self.recompute_skills();
        true
    }

    pub fn skill_in(&self, slot: usize) -> Option<Skill> {
        self.skills.get(slot).copied().flatten()
    }

    /// スロットの内容からパッシブ合計とダッシュ能力を作り直す
    fn recompute_skills(&mut self) {
        let mut passives = Passives::default();
        let mut has_dash = false;
        for skill in self.skills.iter().flatten() {
            match skill.kind {
                SkillKind::Speed => passives.speed_bonus += skill.magnitude,
                SkillKind::Dash => has_dash = true,
                SkillKind::Dodge => passives.dodge_chance += skill.magnitude,
                SkillKind::Berserker => passives.berserker_bonus += skill.magnitude,
                SkillKind::Stamina => passives.stamina_bonus += skill.magnitude,
                SkillKind::Crit => passives.crit_chance += skill.magnitude,
                SkillKind::Vampire => passives.vampire_heal += skill.magnitude,
            }
        }
        self.passives = passives;
        self.max_stamina = PLAYER_MAX_STAMINA + passives.stamina_bonus;
        self.stamina = self.stamina.min(self.max_stamina);
        self.dash = match (has_dash, self.dash) {
            (true, DashCapability::NoDash) => DashCapability::standard(),
            (true, keep) => keep,
            (false, _) => DashCapability::NoDash,
        };
    }
}
