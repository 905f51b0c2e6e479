//! Path: native/dungeon_sim/src/game_logic/systems/projectiles.rs
//! Summary: 弾の移動（共通の積分）と陣営ごとの当たり判定
//!
//! 敵弾・ボス弾はプレイヤーに、プレイヤーの矢は可視な敵とボスに当たり、最初のヒットで消える。

use super::combat::{damage_boss, damage_enemy, damage_player};
use crate::game_logic::gate;
use crate::world::{Flight, GameWorld};
use dungeon_core::constants::ENEMY_SIZE;
use dungeon_core::entity_params::Faction;
use dungeon_core::physics::body::Body;

/// 矢が当たった相手
enum ArrowHit {
    Enemy(usize),
    Boss(usize),
}

fn projectile_body(w: &GameWorld, i: usize) -> Body {
    let p = &w.projectiles;
    Body::square(p.positions_x[i], p.positions_y[i], p.size[i])
}

/// 矢の当たり判定（Spatial Hash で敵を絞り込み、次にボス）
fn find_arrow_hit(w: &mut GameWorld, body: &Body) -> Option<ArrowHit> {
    let (cx, cy) = body.center();
    let mut buf = std::mem::take(&mut w.query_buf);
    w.collision.query_nearby_into(cx, cy, body.w + ENEMY_SIZE, &mut buf);
    let enemy = buf.iter().copied().find(|&ei| {
        let e = &w.enemies.enemies[ei];
        e.alive && e.body.intersects(body) && gate::is_body_visible(&w.map, &e.body)
    });
    w.query_buf = buf;
    if let Some(ei) = enemy {
        return Some(ArrowHit::Enemy(ei));
    }
    w.bosses
        .iter()
        .position(|b| b.alive && b.body.intersects(body) && gate::is_body_visible(&w.map, &b.body))
        .map(ArrowHit::Boss)
}

/// 全弾を 1 ティック進めて当たり判定を行う
pub(crate) fn update_projectiles(w: &mut GameWorld) {
    let now = w.now;
    let dt = w.tick_dt;
    let target = w.player.center();

    for i in 0..w.projectiles.len() {
        if !w.projectiles.alive[i] {
            continue;
        }
        let grid = w.map.grid();
        let flight = w
            .projectiles
            .integrate(i, now, dt, target, |x, y, size| grid.box_blocked(x, y, size, size));
        if flight != Flight::Flying {
            w.projectiles.kill(i);
            continue;
        }

        let body = projectile_body(w, i);
        match w.projectiles.faction[i] {
            Faction::Hostile | Faction::Boss => {
                if w.player.alive && body.intersects(&w.player.body) {
                    let damage = w.projectiles.damage[i];
                    w.projectiles.kill(i);
                    damage_player(w, damage);
                }
            }
            Faction::Player => {
                if let Some(hit) = find_arrow_hit(w, &body) {
                    let damage = w.projectiles.damage[i];
                    w.projectiles.kill(i);
                    match hit {
                        ArrowHit::Enemy(ei) => {
                            damage_enemy(w, ei, damage);
                        }
                        ArrowHit::Boss(bi) => {
                            damage_boss(w, bi, damage);
                        }
                    }
                }
            }
        }
    }
}
