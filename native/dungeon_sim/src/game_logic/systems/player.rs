//! Path: native/dungeon_sim/src/game_logic/systems/player.rs
//! Summary: プレイヤーの移動（スプリント・スタミナ・向き）とダッシュ

use crate::game_logic::gate;
use crate::input::InputSnapshot;
use crate::world::{DashCapability, GameWorld};
use dungeon_core::constants::{
    DASH_STEP, PLAYER_SPEED, PLAYER_SPRINT_FACTOR, STAMINA_DRAIN_PER_SEC, STAMINA_REGEN_PER_SEC,
    TIME_EPSILON,
};

/// 入力に従ってプレイヤーを動かす。各軸は壁と通路の通行可否で個別に判定する。
pub(crate) fn update_player(w: &mut GameWorld, input: &InputSnapshot) {
    if !w.player.alive {
        return;
    }
    let dt = w.tick_dt;
    let (mx, my) = (input.move_x, input.move_y);
    let len = (mx * mx + my * my).sqrt();
    let moving = len > 0.001;

    let p = &mut w.player;
    p.sprinting = moving && input.sprint && p.stamina > 0.0;
    if p.sprinting {
        p.stamina = (p.stamina - STAMINA_DRAIN_PER_SEC * dt).max(0.0);
    } else {
        p.stamina = (p.stamina + STAMINA_REGEN_PER_SEC * dt).min(p.max_stamina);
    }
    if !moving {
        return;
    }

    let (ux, uy) = (mx / len, my / len);
    p.facing = (ux, uy);
    let mut speed = PLAYER_SPEED * (1.0 + p.passives.speed_bonus);
    if p.sprinting {
        speed *= PLAYER_SPRINT_FACTOR;
    }

    let current = gate::player_room(&w.map, &w.player);
    let map = &w.map;
    w.player
        .body
        .move_by(ux * speed * dt, uy * speed * dt, |c| gate::player_blocked(map, current, c));
}

/// 向いている方向へ 4 px 刻みで最大距離まで進む。壁・通れない通路の手前で止まる。
pub(crate) fn dash(w: &mut GameWorld) -> bool {
    let DashCapability::Dash { distance, cost, cooldown, last_used } = w.player.dash else {
        return false;
    };
    if !w.player.alive || w.player.stamina < cost {
        return false;
    }
    if last_used.map_or(false, |t| w.now - t < cooldown - TIME_EPSILON) {
        return false;
    }

    let current = gate::player_room(&w.map, &w.player);
    let (fx, fy) = w.player.facing;
    let mut travelled = 0.0;
    while travelled + DASH_STEP <= distance {
        let body = w.player.body;
        let candidate = body.at(body.x + fx * DASH_STEP, body.y + fy * DASH_STEP);
        if gate::player_blocked(&w.map, current, &candidate) {
            break;
        }
        w.player.body = candidate;
        travelled += DASH_STEP;
    }

    w.player.stamina -= cost;
    w.player.dash = DashCapability::Dash { distance, cost, cooldown, last_used: Some(w.now) };
    log::debug!("dash: {travelled:.0}px");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn world() -> GameWorld {
        GameWorld::new(SimConfig::with_seed(2)).unwrap()
    }

    #[test]
    fn moves_and_faces_input_direction() {
        let mut w = world();
        update_player(&mut w, &InputSnapshot::moving(1.0, 0.0));
        assert!((w.player.body.x - 323.0).abs() < 1e-3);
        assert_eq!(w.player.facing, (1.0, 0.0));
        update_player(&mut w, &InputSnapshot::moving(0.0, -1.0));
        assert_eq!(w.player.facing, (0.0, -1.0));
    }

    #[test]
    fn sprint_drains_and_idle_regenerates() {
        let mut w = world();
        let input = InputSnapshot { sprint: true, ..InputSnapshot::moving(0.0, 1.0) };
        for _ in 0..60 {
            update_player(&mut w, &input);
        }
        assert!((w.player.stamina - 60.0).abs() < 0.1);
        for _ in 0..60 {
            update_player(&mut w, &InputSnapshot::idle());
        }
        assert!((w.player.stamina - 80.0).abs() < 0.1);
    }

    #[test]
    fn walls_stop_the_player() {
        let mut w = world();
        for _ in 0..200 {
            update_player(&mut w, &InputSnapshot::moving(-1.0, 0.0));
        }
        // spawn 部屋の左端（タイル 5 = 160px）より左には出ない
        assert!(w.player.body.x >= 160.0);
    }

    #[test]
    fn locked_corridor_blocks_until_both_rooms_unlocked() {
        let mut w = world();
        // 開始通路（y タイル 11..14）の入り口の前に立つ
        w.player.body.x = 18.0 * 32.0;
        w.player.body.y = 12.0 * 32.0;
        for _ in 0..60 {
            update_player(&mut w, &InputSnapshot::moving(1.0, 0.0));
        }
        assert!(w.player.body.x + w.player.body.w < 20.0 * 32.0);

        let room1 = w.map.room_id("room1").unwrap();
        w.map.unlock(room1);
        for _ in 0..60 {
            update_player(&mut w, &InputSnapshot::moving(1.0, 0.0));
        }
        assert!(w.player.body.x > 20.0 * 32.0);
    }

    #[test]
    fn dash_requires_capability_and_stamina() {
        let mut w = world();
        assert!(!dash(&mut w));
        w.player.dash = DashCapability::standard();
        let x0 = w.player.body.x;
        assert!(dash(&mut w));
        assert!((w.player.body.x - (x0 + 100.0)).abs() < 1e-3);
        assert!((w.player.stamina - 70.0).abs() < 1e-4);
        // クールダウン中
        assert!(!dash(&mut w));
        w.now = 1.0;
        assert!(dash(&mut w));
    }
}
