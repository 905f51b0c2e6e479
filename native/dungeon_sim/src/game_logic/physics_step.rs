//! Path: native/dungeon_sim/src/game_logic/physics_step.rs
//! Summary: 1 ティック分のシミュレーション（固定タイムステップ）

use super::systems::boss::update_bosses;
use super::systems::combat::player_attack;
use super::systems::enemy_ai::update_enemies;
use super::systems::interaction::handle_interaction;
use super::systems::player::update_player;
use super::systems::progression::update_progression;
use super::systems::projectiles::update_projectiles;
use crate::input::InputSnapshot;
use crate::world::GameWorld;
use dungeon_core::constants::FRAME_BUDGET_MS;

/// ワールドを `tick_dt` だけ進める。
///
/// 順序: プレイヤー移動 → インタラクション → 敵 AI → プレイヤー攻撃 → ボス → 弾 → 進行判定
pub fn physics_step(w: &mut GameWorld, input: &InputSnapshot) {
    // trace にしておき、RUST_LOG=trace のときだけ毎フレーム出力
    log::trace!("physics_step: t={:.3} frame_id={}", w.now, w.frame_id);
    let t_start = std::time::Instant::now();

    w.frame_id += 1;
    w.now += w.tick_dt as f64;

    update_player(w, input);
    for interaction in input.interactions() {
        handle_interaction(w, interaction);
    }

    update_enemies(w);
    // 攻撃・矢の当たり判定は移動後の位置で引く
    w.rebuild_collision();
    player_attack(w, input.attack);

    update_bosses(w);
    update_projectiles(w);
    update_progression(w);

    let elapsed_ms = t_start.elapsed().as_secs_f64() * 1000.0;
    w.last_frame_time_ms = elapsed_ms;
    if elapsed_ms > FRAME_BUDGET_MS {
        log::warn!(
            "frame budget exceeded: {:.2}ms (enemies: {}, projectiles: {})",
            elapsed_ms,
            w.enemies.count,
            w.projectiles.count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::world::FrameEvent;

    fn world() -> GameWorld {
        GameWorld::new(SimConfig::with_seed(11)).unwrap()
    }

    #[test]
    fn clock_advances_by_tick_dt() {
        let mut w = world();
        for _ in 0..60 {
            physics_step(&mut w, &InputSnapshot::idle());
        }
        assert_eq!(w.frame_id, 60);
        assert!((w.now - 1.0).abs() < 1e-4);
    }

    #[test]
    fn idle_player_in_start_room_is_left_alone() {
        let mut w = world();
        for _ in 0..120 {
            physics_step(&mut w, &InputSnapshot::idle());
        }
        assert!(w.player.alive);
        assert!((w.player.hp - w.player.max_hp).abs() < 1e-6);
        assert!(!w.frame_events.iter().any(|e| matches!(e, FrameEvent::PlayerDamaged { .. })));
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = world();
        let mut b = world();
        let input = InputSnapshot::moving(1.0, 0.0);
        for _ in 0..90 {
            physics_step(&mut a, &input);
            physics_step(&mut b, &input);
        }
        assert_eq!(a.player.body, b.player.body);
        for (x, y) in a.enemies.enemies.iter().zip(&b.enemies.enemies) {
            assert_eq!(x.body, y.body);
        }
    }
}
