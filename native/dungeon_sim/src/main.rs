//! Path: native/dungeon_sim/src/main.rs
//! Summary: ヘッドレス実行バイナリ（描画なしでシミュレーションを回してイベントをログ出力）
//!
//! 使い方: `dungeon_sim [seed] [ticks]`。ログレベルは RUST_LOG で指定する。

use dungeon_sim::{build_render_frame, FrameEvent, GameWorld, InputSnapshot, SimConfig, SpriteKind};

const DEFAULT_TICKS: u32 = 60 * 120;

/// 見えている最寄りの敵（またはボス）に向かって攻撃し続け、
/// 開けられる扉・宝箱があれば開け、拾ったスキルは空きスロットに入れる。
fn autopilot(w: &GameWorld) -> InputSnapshot {
    let frame = build_render_frame(w);
    let (px, py) = w.player.center();
    let mut input = InputSnapshot { attack: true, interact_chest: true, ..InputSnapshot::default() };

    if w.pending_skill.is_some() {
        let slot = w.player.skills.iter().position(Option::is_none).unwrap_or(0);
        input.skill_slots[slot] = true;
    } else if let Some(slot) = w.player.skills.iter().position(|s| s.map_or(false, |s| !s.is_passive())) {
        input.skill_slots[slot] = w.frame_id % 90 == 0;
    }

    let target = frame
        .sprites
        .iter()
        .filter(|s| matches!(s.kind, SpriteKind::Enemy(_) | SpriteKind::Boss(_)))
        .map(|s| (s.x + s.w / 2.0, s.y + s.h / 2.0))
        .min_by(|a, b| {
            let da = (a.0 - px).powi(2) + (a.1 - py).powi(2);
            let db = (b.0 - px).powi(2) + (b.1 - py).powi(2);
            da.total_cmp(&db)
        });

    let goal = match (target, w.near_door) {
        (_, Some(prompt)) if prompt.can_open => {
            input.interact_door = true;
            None
        }
        (Some(t), _) => Some(t),
        (None, _) => w
            .map
            .doors()
            .iter()
            .filter(|d| !(w.map.is_unlocked(d.a) && w.map.is_unlocked(d.b)))
            .map(|d| w.map.corridor_center_px(d))
            .min_by(|a, b| {
                let da = (a.0 - px).powi(2) + (a.1 - py).powi(2);
                let db = (b.0 - px).powi(2) + (b.1 - py).powi(2);
                da.total_cmp(&db)
            }),
    };

    if let Some((gx, gy)) = goal {
        let (dx, dy) = (gx - px, gy - py);
        if dx.abs() > 4.0 {
            input.move_x = dx.signum();
        }
        if dy.abs() > 4.0 {
            input.move_y = dy.signum();
        }
    }
    input
}

fn log_event(now: f64, w: &GameWorld, event: &FrameEvent) {
    match event {
        FrameEvent::PlayerDamaged { .. } => log::debug!("[{now:7.2}] {event:?}"),
        FrameEvent::RoomCleared { room } | FrameEvent::RoomUnlocked { room } => {
            let name = w.map.room(*room).map_or("?", |r| r.name.as_str());
            log::info!("[{now:7.2}] {event:?} ({name})");
        }
        _ => log::info!("[{now:7.2}] {event:?}"),
    }
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let ticks = args.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(DEFAULT_TICKS);

    let config = seed.map(SimConfig::with_seed).unwrap_or_default();
    let mut world = match GameWorld::new(config) {
        Ok(w) => w,
        Err(e) => {
            log::error!("failed to build dungeon: {e}");
            std::process::exit(1);
        }
    };

    let mut worst_ms = 0.0_f64;
    for _ in 0..ticks {
        let input = autopilot(&world);
        world.step(&input);
        worst_ms = worst_ms.max(world.last_frame_time_ms);
        for event in world.drain_frame_events() {
            log_event(world.now, &world, &event);
        }
        if !world.player.alive || world.victory {
            break;
        }
    }

    let unlocked = world.map.rooms().iter().filter(|r| r.unlocked).count();
    log::info!(
        "summary: t={:.2}s frames={} kills={} rooms unlocked={}/{} hp={:.0}/{:.0} victory={} worst frame={:.3}ms",
        world.now,
        world.frame_id,
        world.kill_count,
        unlocked,
        world.map.rooms().len(),
        world.player.hp,
        world.player.max_hp,
        world.victory,
        worst_ms
    );
}
