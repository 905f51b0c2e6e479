//! Path: native/dungeon_sim/src/world/projectile.rs
//! Summary: 弾 SoA（ProjectileWorld）と共通の積分処理（寿命 → ホーミング → 移動 → 壁 → 射程）
//!
//! 敵・ボス・プレイヤーの 3 陣営の弾を 1 つの SoA にまとめる。
//! 陣営ごとの当たり判定は `game_logic::systems::projectiles` 側で行う。

use dungeon_core::constants::{HOMING_RETAIN, TIME_EPSILON};
use dungeon_core::entity_params::{Faction, ProjectileKind};

/// `integrate` の結果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    Flying,
    Expired,
    HitWall,
    OutOfRange,
}

/// 弾 SoA（Structure of Arrays）。座標は左上。
pub struct ProjectileWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    pub velocities_x: Vec<f32>,
    pub velocities_y: Vec<f32>,
    pub size:         Vec<f32>,
    pub damage:       Vec<f32>,
    pub spawn_time:   Vec<f64>,
    pub lifetime:     Vec<f64>,
    pub origin_x:     Vec<f32>,
    pub origin_y:     Vec<f32>,
    /// 射程制限（プレイヤーの矢だけ Some）
    pub max_range:    Vec<Option<f32>>,
    pub kind:         Vec<ProjectileKind>,
    pub faction:      Vec<Faction>,
    pub alive:        Vec<bool>,
    pub count:        usize,
    /// 空きスロットのインデックススタック
    free_list:        Vec<usize>,
}

/// 発射パラメータ。中心座標で指定する。
#[derive(Clone, Copy, Debug)]
pub struct Launch {
    pub kind:      ProjectileKind,
    pub cx:        f32,
    pub cy:        f32,
    pub vx:        f32,
    pub vy:        f32,
    pub damage:    f32,
    pub max_range: Option<f32>,
}

impl Launch {
    /// 種類の既定ダメージで、中心 (cx, cy) から角度 `angle` に速さ `speed` で撃つ
    pub fn toward_angle(kind: ProjectileKind, cx: f32, cy: f32, angle: f32, speed: f32) -> Self {
        Self {
            kind,
            cx,
            cy,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            damage: kind.params().damage,
            max_range: None,
        }
    }
}

impl Default for ProjectileWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectileWorld {
    pub fn new() -> Self {
        Self {
            positions_x:  Vec::new(),
            positions_y:  Vec::new(),
            velocities_x: Vec::new(),
            velocities_y: Vec::new(),
            size:         Vec::new(),
            damage:       Vec::new(),
            spawn_time:   Vec::new(),
            lifetime:     Vec::new(),
            origin_x:     Vec::new(),
            origin_y:     Vec::new(),
            max_range:    Vec::new(),
            kind:         Vec::new(),
            faction:      Vec::new(),
            alive:        Vec::new(),
            count:        0,
            free_list:    Vec::new(),
        }
    }

    /// 弾を生成してスロット番号を返す
    pub fn spawn(&mut self, launch: Launch, now: f64) -> usize {
        let params = launch.kind.params();
        let x = launch.cx - params.size / 2.0;
        let y = launch.cy - params.size / 2.0;
        let i = if let Some(i) = self.free_list.pop() {
            self.positions_x[i]  = x;
            self.positions_y[i]  = y;
            self.velocities_x[i] = launch.vx;
            self.velocities_y[i] = launch.vy;
            self.size[i]         = params.size;
            self.damage[i]       = launch.damage;
            self.spawn_time[i]   = now;
            self.lifetime[i]     = params.lifetime;
            self.origin_x[i]     = x;
            self.origin_y[i]     = y;
            self.max_range[i]    = launch.max_range;
            self.kind[i]         = launch.kind;
            self.faction[i]      = params.faction;
            self.alive[i]        = true;
            i
        } else {
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.velocities_x.push(launch.vx);
            self.velocities_y.push(launch.vy);
            self.size.push(params.size);
            self.damage.push(launch.damage);
            self.spawn_time.push(now);
            self.lifetime.push(params.lifetime);
            self.origin_x.push(x);
            self.origin_y.push(y);
            self.max_range.push(launch.max_range);
            self.kind.push(launch.kind);
            self.faction.push(params.faction);
            self.alive.push(true);
            self.positions_x.len() - 1
        };
        self.count += 1;
        i
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn center(&self, i: usize) -> (f32, f32) {
        let half = self.size[i] / 2.0;
        (self.positions_x[i] + half, self.positions_y[i] + half)
    }

    /// 1 ティック分進める。
    ///
    /// 寿命切れを最初に判定し、ホーミング弾は速度を 80% 維持 / 20% 再照準で混ぜる。
    /// 新しい位置の四隅が `blocked` なら移動せずに壁ヒット。
    /// 射程付きの弾は発射点からの距離が射程を超えたら消える。
    /// `Flying` 以外を返した弾は呼び出し側が `kill` する。
    pub fn integrate<F>(&mut self, i: usize, now: f64, dt: f32, target: (f32, f32), blocked: F) -> Flight
    where
        F: Fn(f32, f32, f32) -> bool,
    {
        if now - self.spawn_time[i] >= self.lifetime[i] - TIME_EPSILON {
            return Flight::Expired;
        }

        if self.kind[i].params().homing {
            let (vx, vy) = homing_blend(
                (self.velocities_x[i], self.velocities_y[i]),
                self.center(i),
                target,
            );
            self.velocities_x[i] = vx;
            self.velocities_y[i] = vy;
        }

        let nx = self.positions_x[i] + self.velocities_x[i] * dt;
        let ny = self.positions_y[i] + self.velocities_y[i] * dt;
        if blocked(nx, ny, self.size[i]) {
            return Flight::HitWall;
        }
        self.positions_x[i] = nx;
        self.positions_y[i] = ny;

        if let Some(range) = self.max_range[i] {
            let dx = nx - self.origin_x[i];
            let dy = ny - self.origin_y[i];
            if (dx * dx + dy * dy).sqrt() > range {
                return Flight::OutOfRange;
            }
        }
        Flight::Flying
    }
}

/// 現在速度 80% + 目標方向の速度 20%。目標方向の速さは現在の速さに合わせる。
pub fn homing_blend(velocity: (f32, f32), from: (f32, f32), target: (f32, f32)) -> (f32, f32) {
    let speed = (velocity.0 * velocity.0 + velocity.1 * velocity.1).sqrt();
    let dx = target.0 - from.0;
    let dy = target.1 - from.1;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < 0.001 {
        return velocity;
    }
    let fresh = (dx / dist * speed, dy / dist * speed);
    (
        velocity.0 * HOMING_RETAIN + fresh.0 * (1.0 - HOMING_RETAIN),
        velocity.1 * HOMING_RETAIN + fresh.1 * (1.0 - HOMING_RETAIN),
    )
}
