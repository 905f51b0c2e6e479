//! Path: native/dungeon_sim/src/game_logic/systems/enemy_ai.rs
//! Summary: 敵 AI（追跡・固定砲台・巡回→追跡）。ホーム部屋の外への移動は壁と同じく拒否する。
//!
//! 各敵の更新は共通の形 `update_enemy(enemy, ctx, peers, out)` で、
//! プレイヤーへの攻撃や弾の発射は `EnemyAction` として集めてから適用する。

use super::combat::damage_player;
use crate::world::{Behavior, Enemy, GameWorld, Launch};
use dungeon_core::constants::{
    ENEMY_CHASE_RADIUS, ENEMY_DETECTION_RADIUS, ENEMY_MELEE_RANGE, ENEMY_PATROL_FACTOR,
    ENEMY_SHOOT_COOLDOWN, ENEMY_SHOOT_RANGE, TIME_EPSILON,
};
use dungeon_core::entity_params::{ProjectileKind, HOMING_SPEED};
use dungeon_core::grid::TileGrid;
use dungeon_core::physics::body::Body;

/// 敵 1 体の更新結果として後から適用する副作用
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum EnemyAction {
    Melee { damage: f32 },
    /// 中心 (x, y) からプレイヤー中心へホーミング弾
    Shoot { x: f32, y: f32, target_x: f32, target_y: f32 },
}

/// 1 ティック分の読み取り専用の入力
pub(crate) struct EnemyContext<'a> {
    pub grid:   &'a TileGrid,
    pub player: Body,
    pub now:    f64,
    pub dt:     f32,
}

/// 自分以外の敵（split_at_mut で得た前後のスライス）
pub(crate) struct Peers<'a> {
    pub before: &'a [Enemy],
    pub after:  &'a [Enemy],
}

impl Peers<'_> {
    fn overlaps(&self, candidate: &Body) -> bool {
        self.before
            .iter()
            .chain(self.after.iter())
            .any(|p| p.alive && p.body.intersects(candidate))
    }
}

fn cooldown_ready(last: Option<f64>, cooldown: f64, now: f64) -> bool {
    last.map_or(true, |t| now - t >= cooldown - TIME_EPSILON)
}

/// 壁・ホーム部屋の外・他の敵のいずれかに当たるか（プレイヤーは別に判定する）
fn blocked_by_world(enemy_bounds_ok: bool, candidate: &Body, ctx: &EnemyContext, peers: &Peers) -> bool {
    !enemy_bounds_ok
        || ctx.grid.box_blocked(candidate.x, candidate.y, candidate.w, candidate.h)
        || peers.overlaps(candidate)
}

fn try_melee(enemy: &mut Enemy, dist: f32, now: f64, out: &mut Vec<EnemyAction>) {
    let params = enemy.kind.params();
    if dist <= ENEMY_MELEE_RANGE && cooldown_ready(enemy.last_attack, params.attack_cooldown, now) {
        enemy.last_attack = Some(now);
        out.push(EnemyAction::Melee { damage: params.melee_damage });
    }
}

/// プレイヤーへ向かって軸ごとに移動する（追跡型と検知後の巡回型）
fn chase(enemy: &mut Enemy, dist: f32, ctx: &EnemyContext, peers: &Peers, out: &mut Vec<EnemyAction>) {
    if dist <= 0.0 || dist >= ENEMY_CHASE_RADIUS {
        return;
    }
    try_melee(enemy, dist, ctx.now, out);

    let (ex, ey) = enemy.body.center();
    let (px, py) = ctx.player.center();
    let step = enemy.kind.params().speed * ctx.dt;
    let dx = (px - ex) / dist * step;
    let dy = (py - ey) / dist * step;
    let bounds = enemy.bounds;
    let player = ctx.player;
    enemy.body.move_by(dx, dy, |c| {
        let inside = bounds.map_or(false, |b| b.contains_body(c));
        blocked_by_world(inside, c, ctx, peers) || c.intersects(&player)
    });
}

/// 敵 1 体を 1 ティック進める
pub(crate) fn update_enemy(enemy: &mut Enemy, ctx: &EnemyContext, peers: &Peers, out: &mut Vec<EnemyAction>) {
    let dist = enemy.body.distance_to(&ctx.player);
    match enemy.behavior {
        Behavior::Chaser => chase(enemy, dist, ctx, peers, out),

        Behavior::Ranged { last_shot } => {
            if dist <= ENEMY_MELEE_RANGE {
                try_melee(enemy, dist, ctx.now, out);
            } else if dist <= ENEMY_SHOOT_RANGE && cooldown_ready(last_shot, ENEMY_SHOOT_COOLDOWN, ctx.now) {
                enemy.behavior = Behavior::Ranged { last_shot: Some(ctx.now) };
                let (x, y) = enemy.body.center();
                let (target_x, target_y) = ctx.player.center();
                out.push(EnemyAction::Shoot { x, y, target_x, target_y });
            }
        }

        Behavior::Patrol { aggressive: true, .. } => chase(enemy, dist, ctx, peers, out),

        Behavior::Patrol { direction, travelled, max_distance, aggressive: false } => {
            if dist <= ENEMY_DETECTION_RADIUS {
                log::debug!("patrol enemy at ({:.0}, {:.0}) detected the player", enemy.body.x, enemy.body.y);
                enemy.behavior = Behavior::Patrol { direction, travelled, max_distance, aggressive: true };
                chase(enemy, dist, ctx, peers, out);
                return;
            }
            try_melee(enemy, dist, ctx.now, out);

            let step = enemy.kind.params().speed * ENEMY_PATROL_FACTOR * ctx.dt;
            let (vx, vy) = direction.vector();
            let candidate = enemy.body.at(enemy.body.x + vx * step, enemy.body.y + vy * step);
            if candidate.intersects(&ctx.player) {
                return;
            }
            let inside = enemy.bounds.map_or(false, |b| b.contains_body(&candidate));
            let (direction, travelled) = if blocked_by_world(inside, &candidate, ctx, peers) {
                (direction.reversed(), 0.0)
            } else {
                enemy.body = candidate;
                let travelled = travelled + step;
                if travelled >= max_distance {
                    (direction.reversed(), 0.0)
                } else {
                    (direction, travelled)
                }
            };
            enemy.behavior = Behavior::Patrol { direction, travelled, max_distance, aggressive: false };
        }
    }
}

/// 全敵の AI を進め、集めた攻撃と弾をワールドに適用する
pub(crate) fn update_enemies(w: &mut GameWorld) {
    if !w.player.alive {
        return;
    }
    let ctx = EnemyContext {
        grid:   w.map.grid(),
        player: w.player.body,
        now:    w.now,
        dt:     w.tick_dt,
    };
    let mut actions = Vec::new();
    let enemies = &mut w.enemies.enemies;
    for i in 0..enemies.len() {
        let (before, rest) = enemies.split_at_mut(i);
        let Some((enemy, after)) = rest.split_first_mut() else {
            break;
        };
        if !enemy.alive {
            continue;
        }
        update_enemy(enemy, &ctx, &Peers { before, after }, &mut actions);
    }

    for action in actions {
        match action {
            EnemyAction::Melee { damage } => {
                damage_player(w, damage);
            }
            EnemyAction::Shoot { x, y, target_x, target_y } => {
                let angle = (target_y - y).atan2(target_x - x);
                w.projectiles.spawn(
                    Launch::toward_angle(ProjectileKind::Homing, x, y, angle, HOMING_SPEED),
                    w.now,
                );
            }
        }
    }
}
