//! Path: native/dungeon_sim/src/world/enemy.rs
//! Summary: 敵の状態（Enemy）と敵コレクション（EnemyWorld）

use dungeon_core::constants::{PATROL_MAX_DISTANCE, PATROL_MIN_DISTANCE};
use dungeon_core::entity_params::EnemyKind;
use dungeon_core::layout::EnemySpawn;
use dungeon_core::physics::body::{Body, Bounds};
use dungeon_core::physics::rng::SimpleRng;
use dungeon_core::room::{DungeonMap, RoomId};

/// 巡回方向（上下左右）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinal {
    Left,
    Right,
    Up,
    Down,
}

impl Cardinal {
    const ALL: [Cardinal; 4] = [Cardinal::Right, Cardinal::Left, Cardinal::Down, Cardinal::Up];

    pub fn random(rng: &mut SimpleRng) -> Self {
        Self::ALL[rng.next_u32() as usize % Self::ALL.len()]
    }

    pub fn vector(self) -> (f32, f32) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// 行動タイプごとの状態
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    Chaser,
    Ranged {
        last_shot: Option<f64>,
    },
    Patrol {
        direction:    Cardinal,
        travelled:    f32,
        max_distance: f32,
        /// 一度 true になったら `reset` まで戻らない
        aggressive:   bool,
    },
}

impl Behavior {
    fn initial(kind: EnemyKind, rng: &mut SimpleRng) -> Self {
        match kind {
            EnemyKind::Chaser => Self::Chaser,
            EnemyKind::Ranged => Self::Ranged { last_shot: None },
            EnemyKind::Patrol => Self::Patrol {
                direction:    Cardinal::random(rng),
                travelled:    0.0,
                max_distance: rng.range_u32(PATROL_MIN_DISTANCE, PATROL_MAX_DISTANCE) as f32,
                aggressive:   false,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind:        EnemyKind,
    /// スポーン地点（左上）。ホーム部屋はここから一度だけ決まる。
    pub spawn:       (f32, f32),
    pub body:        Body,
    pub hp:          f32,
    pub max_hp:      f32,
    pub alive:       bool,
    pub home:        Option<RoomId>,
    /// ホーム部屋のピクセル範囲。ボックス全体がこの中に収まる移動だけを許す。
    pub bounds:      Option<Bounds>,
    pub last_attack: Option<f64>,
    pub last_hit:    Option<f64>,
    pub behavior:    Behavior,
}

impl Enemy {
    pub fn new(spawn: &EnemySpawn, map: &DungeonMap, rng: &mut SimpleRng) -> Self {
        let params = spawn.kind.params();
        let home = map.room_containing(spawn.x, spawn.y);
        let bounds = home
            .and_then(|id| map.room_bounds_px(id))
            .map(|(x0, y0, x1, y1)| Bounds::new(x0, y0, x1, y1));
        Self {
            kind:        spawn.kind,
            spawn:       (spawn.x, spawn.y),
            body:        Body::square(spawn.x, spawn.y, params.size),
            hp:          params.max_hp,
            max_hp:      params.max_hp,
            alive:       true,
            home,
            bounds,
            last_attack: None,
            last_hit:    None,
            behavior:    Behavior::initial(spawn.kind, rng),
        }
    }

    /// 巡回型が検知済みか、追跡型か
    pub fn is_aggressive(&self) -> bool {
        match self.behavior {
            Behavior::Chaser => true,
            Behavior::Ranged { .. } => false,
            Behavior::Patrol { aggressive, .. } => aggressive,
        }
    }

    /// ダメージを受ける。撃破したら true。
    pub fn take_damage(&mut self, amount: f32, now: f64) -> bool {
        if !self.alive {
            return false;
        }
        self.hp -= amount;
        self.last_hit = Some(now);
        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.alive = false;
            return true;
        }
        false
    }

    /// スポーン地点に戻し、HP・生存・巡回状態を初期化する（ゲーム再開時のみ）
    pub fn reset(&mut self, rng: &mut SimpleRng) {
        self.body.x = self.spawn.0;
        self.body.y = self.spawn.1;
        self.hp = self.max_hp;
        self.alive = true;
        self.last_attack = None;
        self.last_hit = None;
        self.behavior = match self.behavior {
            Behavior::Patrol { max_distance, .. } => Behavior::Patrol {
                direction: Cardinal::random(rng),
                travelled: 0.0,
                max_distance,
                aggressive: false,
            },
            _ => Behavior::initial(self.kind, rng),
        };
    }
}

/// 敵コレクション。部屋ごとの割り当ては添字で持つ。
#[derive(Clone, Debug, Default)]
pub struct EnemyWorld {
    pub enemies: Vec<Enemy>,
    /// 生存数
    pub count:   usize,
}

impl EnemyWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// スポーン表の敵を追加し、追加した添字を返す
    pub fn spawn(&mut self, spawns: &[EnemySpawn], map: &DungeonMap, rng: &mut SimpleRng) -> Vec<usize> {
        let first = self.enemies.len();
        self.enemies.extend(spawns.iter().map(|s| Enemy::new(s, map, rng)));
        self.count += spawns.len();
        (first..self.enemies.len()).collect()
    }

    /// 添字 i の敵にダメージを与える。撃破したら true。
    pub fn damage(&mut self, i: usize, amount: f32, now: f64) -> bool {
        let killed = self.enemies.get_mut(i).map_or(false, |e| e.take_damage(amount, now));
        if killed {
            self.count = self.count.saturating_sub(1);
        }
        killed
    }

    pub fn reset_all(&mut self, rng: &mut SimpleRng) {
        for e in &mut self.enemies {
            e.reset(rng);
        }
        self.count = self.enemies.len();
    }
}
