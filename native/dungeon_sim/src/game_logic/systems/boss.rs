//! Path: native/dungeon_sim/src/game_logic/systems/boss.rs
//! Summary: ボス AI（タンク: 間合い調整 + 扇 / 衝撃波リング、術師: テレポート + スパイラル / 壁）
//!
//! プレイヤーがホーム部屋にいないティックは移動・通常攻撃・特殊攻撃のどれも行わない。
//! ゲートは 3 つの段階の直前でそれぞれ判定する。

use crate::game_logic::gate::boss_can_act;
use crate::world::{BossState, FrameEvent, GameWorld, Launch, PlayerState};
use dungeon_core::constants::{
    BOSS_ARRIVE_DISTANCE, BOSS_DRIFT_MIN_DISTANCE, BOSS_RETARGET_INTERVAL, TELEPORT_ATTEMPTS,
    TELEPORT_MAX_DISTANCE, TELEPORT_MIN_DISTANCE, TIME_EPSILON,
};
use dungeon_core::entity_params::{BossKind, ProjectileKind};
use dungeon_core::grid::TileGrid;
use dungeon_core::physics::body::Body;
use dungeon_core::physics::rng::SimpleRng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

// タンクの間合い
const TANK_FAR:        f32 = 120.0;
const TANK_NEAR:       f32 = 80.0;
const TANK_APPROACH:   f32 = 100.0;
const TANK_RETREAT:    f32 = 60.0;
const TANK_ORBIT:      f32 = 100.0;

// 弾幕パラメータ
const FAN_SPEED:       f32 = 120.0;
const FAN_SPREAD:      f32 = FRAC_PI_3;
const RING_COUNTS:     [usize; 3] = [12, 16, 20];
const RING_SPEEDS:     [f32; 3] = [80.0, 110.0, 140.0];
const SPIRAL_SPEED:    f32 = 100.0;
/// スパイラルの回転速度（rad / 経過秒）
const SPIRAL_SPIN:     f32 = 2.0;
const WALL_COUNT:      usize = 15;
const WALL_SPACING:    f32 = 20.0;
const WALL_SPEED:      f32 = 90.0;

fn cooldown_ready(last: Option<f64>, cooldown: f64, now: f64) -> bool {
    last.map_or(true, |t| now - t >= cooldown - TIME_EPSILON)
}

/// 1 ティック分の読み取り専用の入力
struct BossContext<'a> {
    grid:   &'a TileGrid,
    player: &'a PlayerState,
    now:    f64,
    dt:     f32,
}

/// 左上 (dx, dy) だけ軸ごとに動かす。壁と行動範囲の外は拒否。
fn move_within_arena(boss: &mut BossState, dx: f32, dy: f32, grid: &TileGrid) {
    let arena = boss.arena;
    boss.body.move_by(dx, dy, |c: &Body| {
        grid.box_blocked(c.x, c.y, c.w, c.h)
            || !arena.map_or(true, |a| a.anchor.contains_point(c.x, c.y))
    });
}

/// 4 秒ごとに目標点を選び直し、そこへ向かう
fn tank_movement(boss: &mut BossState, ctx: &BossContext, rng: &mut SimpleRng) {
    let (bx, by) = boss.center();
    let (px, py) = ctx.player.center();
    let half = boss.body.w / 2.0;

    if cooldown_ready(boss.last_retarget, BOSS_RETARGET_INTERVAL, ctx.now) {
        boss.last_retarget = Some(ctx.now);
        let dx = px - bx;
        let dy = py - by;
        let dist = (dx * dx + dy * dy).sqrt().max(0.001);
        let (ux, uy) = (dx / dist, dy / dist);
        let (tx, ty) = if dist > TANK_FAR {
            (px - ux * TANK_APPROACH, py - uy * TANK_APPROACH)
        } else if dist < TANK_NEAR {
            (bx - ux * TANK_RETREAT, by - uy * TANK_RETREAT)
        } else {
            let angle = rng.next_angle();
            (px + angle.cos() * TANK_ORBIT, py + angle.sin() * TANK_ORBIT)
        };
        boss.target = boss.clamp_to_arena(tx - half, ty - half);
        log::debug!("{} retargets to ({:.0}, {:.0})", boss.name(), boss.target.0, boss.target.1);
    }

    let dx = boss.target.0 - boss.body.x;
    let dy = boss.target.1 - boss.body.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > BOSS_ARRIVE_DISTANCE {
        let step = (boss.params().speed * ctx.dt).min(dist);
        move_within_arena(boss, dx / dist * step, dy / dist * step, ctx.grid);
    }
}

/// プレイヤーから [80, 120] px の点を最大 20 回探し、見つかれば瞬間移動する
fn try_teleport(boss: &mut BossState, ctx: &BossContext, rng: &mut SimpleRng) -> Option<(f32, f32)> {
    let (px, py) = ctx.player.center();
    let half = boss.body.w / 2.0;
    for _ in 0..TELEPORT_ATTEMPTS {
        let angle = rng.next_angle();
        let dist = rng.range_u32(TELEPORT_MIN_DISTANCE, TELEPORT_MAX_DISTANCE) as f32;
        let x = px + angle.cos() * dist - half;
        let y = py + angle.sin() * dist - half;
        if !ctx.grid.box_blocked(x, y, boss.body.w, boss.body.h) && boss.in_arena(x, y) {
            boss.body.x = x;
            boss.body.y = y;
            boss.start_fade();
            return Some((x, y));
        }
    }
    None
}

/// テレポート（クールダウンごと）とフェード中以外の追従移動
fn caster_movement(
    boss: &mut BossState,
    ctx: &BossContext,
    rng: &mut SimpleRng,
    events: &mut Vec<FrameEvent>,
) {
    if let Some(cooldown) = boss.teleport_cooldown() {
        if cooldown_ready(boss.last_teleport, cooldown, ctx.now) {
            // 失敗してもタイマーは進める
            boss.last_teleport = Some(ctx.now);
            match try_teleport(boss, ctx, rng) {
                Some((x, y)) => {
                    log::debug!("{} teleported to ({x:.0}, {y:.0})", boss.name());
                    events.push(FrameEvent::BossTeleported { boss_kind: boss.kind, x, y });
                }
                None => log::warn!(
                    "{} found no teleport spot in {} attempts",
                    boss.name(),
                    TELEPORT_ATTEMPTS
                ),
            }
        }
    }

    if boss.is_fading() {
        return;
    }
    let (bx, by) = boss.center();
    let (px, py) = ctx.player.center();
    let dx = px - bx;
    let dy = py - by;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > BOSS_DRIFT_MIN_DISTANCE {
        let step = boss.params().speed * 0.5 * ctx.dt;
        move_within_arena(boss, dx / dist * step, dy / dist * step, ctx.grid);
    }
}

/// タンク: 60° の扇。術師: 経過時間で回転するスパイラル。
fn normal_attack(boss: &BossState, ctx: &BossContext, out: &mut Vec<Launch>) {
    let (cx, cy) = boss.center();
    let n = boss.params().volley_count(boss.kind, boss.phase);
    match boss.kind {
        BossKind::Tank => {
            let (px, py) = ctx.player.center();
            let base = (py - cy).atan2(px - cx);
            let step = if n > 1 { FAN_SPREAD / (n - 1) as f32 } else { 0.0 };
            out.extend((0..n).map(|i| {
                let angle = base - FAN_SPREAD / 2.0 + step * i as f32;
                Launch::toward_angle(ProjectileKind::Orb, cx, cy, angle, FAN_SPEED)
            }));
        }
        BossKind::Caster => {
            let offset = (ctx.now as f32) * SPIRAL_SPIN;
            out.extend((0..n).map(|i| {
                let angle = TAU * i as f32 / n as f32 + offset;
                Launch::toward_angle(ProjectileKind::Shard, cx, cy, angle, SPIRAL_SPEED)
            }));
        }
    }
}

/// タンク: 3 重の衝撃波リング。術師: プレイヤー方向と直交に並べた 15 発の壁。
fn special_attack(boss: &BossState, ctx: &BossContext, out: &mut Vec<Launch>) {
    let (cx, cy) = boss.center();
    match boss.kind {
        BossKind::Tank => {
            for (&count, &speed) in RING_COUNTS.iter().zip(RING_SPEEDS.iter()) {
                out.extend((0..count).map(|i| {
                    let angle = TAU * i as f32 / count as f32;
                    Launch::toward_angle(ProjectileKind::Shockwave, cx, cy, angle, speed)
                }));
            }
            log::debug!("{} releases a shockwave", boss.name());
        }
        BossKind::Caster => {
            let (px, py) = ctx.player.center();
            let toward = (py - cy).atan2(px - cx);
            let across = toward + FRAC_PI_2;
            let mid = (WALL_COUNT / 2) as f32;
            out.extend((0..WALL_COUNT).map(|i| {
                let offset = (i as f32 - mid) * WALL_SPACING;
                let sx = cx + across.cos() * offset;
                let sy = cy + across.sin() * offset;
                Launch::toward_angle(ProjectileKind::Shard, sx, sy, toward, WALL_SPEED)
            }));
            log::debug!("{} raises a projectile wall", boss.name());
        }
    }
}

/// ボス 1 体を 1 ティック進める。撃った弾は `out` に積む。
fn update_boss(
    boss: &mut BossState,
    ctx: &BossContext,
    rng: &mut SimpleRng,
    out: &mut Vec<Launch>,
    events: &mut Vec<FrameEvent>,
) {
    if !boss.alive {
        return;
    }
    if boss.update_phase() {
        events.push(FrameEvent::BossEnraged { boss_kind: boss.kind });
    }

    if boss_can_act(boss, ctx.player) {
        boss.advance_fade();
        match boss.kind {
            BossKind::Tank => tank_movement(boss, ctx, rng),
            BossKind::Caster => caster_movement(boss, ctx, rng, events),
        }
    }

    if boss_can_act(boss, ctx.player) && cooldown_ready(boss.last_attack, boss.attack_cooldown(), ctx.now) {
        boss.last_attack = Some(ctx.now);
        normal_attack(boss, ctx, out);
    }

    if boss_can_act(boss, ctx.player) && cooldown_ready(boss.last_special, boss.special_cooldown(), ctx.now) {
        boss.last_special = Some(ctx.now);
        special_attack(boss, ctx, out);
    }
}

/// 全ボスを更新し、弾とイベントをワールドに反映する（ボス AI の乱数は teleport ストリーム）
pub(crate) fn update_bosses(w: &mut GameWorld) {
    let ctx = BossContext {
        grid:   w.map.grid(),
        player: &w.player,
        now:    w.now,
        dt:     w.tick_dt,
    };
    let mut launches = Vec::new();
    for boss in w.bosses.iter_mut() {
        update_boss(boss, &ctx, &mut w.rngs.teleport, &mut launches, &mut w.frame_events);
    }
    for launch in launches {
        w.projectiles.spawn(launch, w.now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::constants::{BOSS_SIZE, PLAYER_SIZE};
    use dungeon_core::entity_params::BossPhase;
    use dungeon_core::grid::TileRect;
    use dungeon_core::layout::{DungeonLayout, RoomSpec};
    use dungeon_core::room::DungeonMap;

    const DT: f32 = 1.0 / 60.0;

    fn map() -> DungeonMap {
        DungeonMap::from_layout(&DungeonLayout::default()).unwrap()
    }

    fn boss_at_center(map: &DungeonMap, room: &str, kind: BossKind) -> BossState {
        let id = map.room_id(room).unwrap();
        let (cx, cy) = map.room_center_px(id).unwrap();
        BossState::new(kind, cx - BOSS_SIZE / 2.0, cy - BOSS_SIZE / 2.0, map)
    }

    fn player_near(boss: &BossState, dx: f32) -> PlayerState {
        let (cx, cy) = boss.center();
        PlayerState::new(cx + dx, cy)
    }

    #[test]
    fn tank_fires_fan_and_rings_when_player_present() {
        let m = map();
        let mut boss = boss_at_center(&m, "boss", BossKind::Tank);
        let player = player_near(&boss, 150.0);
        let ctx = BossContext { grid: m.grid(), player: &player, now: 1.0, dt: DT };
        let mut out = Vec::new();
        let mut events = Vec::new();
        update_boss(&mut boss, &ctx, &mut SimpleRng::new(1), &mut out, &mut events);
        assert_eq!(out.len(), 5 + 12 + 16 + 20);
        assert!(out[..5].iter().all(|l| l.kind == ProjectileKind::Orb));
        assert!(out[5..].iter().all(|l| l.kind == ProjectileKind::Shockwave));
    }

    #[test]
    fn fan_spans_sixty_degrees_around_player() {
        let m = map();
        let boss = boss_at_center(&m, "boss", BossKind::Tank);
        let player = player_near(&boss, 150.0);
        let ctx = BossContext { grid: m.grid(), player: &player, now: 1.0, dt: DT };
        let mut out = Vec::new();
        normal_attack(&boss, &ctx, &mut out);
        let first = out[0].vy.atan2(out[0].vx);
        let last = out[4].vy.atan2(out[4].vx);
        assert!(((last - first) - FRAC_PI_3).abs() < 1e-3);
        // 中央の弾はプレイヤー方向
        let (bx, by) = boss.center();
        let (px, py) = player.center();
        let toward = (py - by).atan2(px - bx);
        assert!((out[2].vy.atan2(out[2].vx) - toward).abs() < 1e-3);
    }

    #[test]
    fn enraged_caster_spiral_has_twelve() {
        let m = map();
        let mut boss = boss_at_center(&m, "secret", BossKind::Caster);
        boss.phase = BossPhase::Enraged;
        let player = player_near(&boss, 150.0);
        let ctx = BossContext { grid: m.grid(), player: &player, now: 1.0, dt: DT };
        let mut out = Vec::new();
        normal_attack(&boss, &ctx, &mut out);
        assert_eq!(out.len(), 12);
        let mut wall = Vec::new();
        special_attack(&boss, &ctx, &mut wall);
        assert_eq!(wall.len(), 15);
        assert!(wall.iter().all(|l| l.vx > 0.0));
    }

    #[test]
    fn tank_moves_toward_distant_player() {
        let m = map();
        let mut boss = boss_at_center(&m, "boss", BossKind::Tank);
        let x0 = boss.body.x;
        let player = player_near(&boss, 300.0);
        let mut rng = SimpleRng::new(1);
        let (mut out, mut events) = (Vec::new(), Vec::new());
        for tick in 1..=30 {
            let ctx = BossContext { grid: m.grid(), player: &player, now: tick as f64 * DT as f64, dt: DT };
            update_boss(&mut boss, &ctx, &mut rng, &mut out, &mut events);
        }
        assert!(boss.body.x > x0);
        let arena = boss.arena.unwrap();
        assert!(arena.anchor.contains_point(boss.body.x, boss.body.y));
    }

    #[test]
    fn caster_teleports_near_player_and_fades() {
        let m = map();
        let mut boss = boss_at_center(&m, "secret", BossKind::Caster);
        // 行動範囲の中央に立たせると、どの角度・距離の候補も範囲内かつ床の上になる
        let arena = boss.arena.unwrap();
        let (ax, ay) = ((arena.area.min_x + arena.area.max_x) / 2.0, (arena.area.min_y + arena.area.max_y) / 2.0);
        let player = PlayerState::new(ax - PLAYER_SIZE / 2.0, ay - PLAYER_SIZE / 2.0);
        let ctx = BossContext { grid: m.grid(), player: &player, now: 1.0, dt: DT };
        let (mut out, mut events) = (Vec::new(), Vec::new());
        update_boss(&mut boss, &ctx, &mut SimpleRng::new(4), &mut out, &mut events);

        assert_eq!(boss.last_teleport, Some(1.0));
        let spot = events.iter().find_map(|e| match e {
            FrameEvent::BossTeleported { x, y, .. } => Some((*x, *y)),
            _ => None,
        });
        assert_eq!(spot, Some((boss.body.x, boss.body.y)));
        assert!(boss.is_fading());
        assert!(boss.in_arena(boss.body.x, boss.body.y));
        let d = boss.body.distance_to(&player.body);
        assert!((TELEPORT_MIN_DISTANCE as f32 - 1.0..=TELEPORT_MAX_DISTANCE as f32 + 1.0).contains(&d));
    }

    #[test]
    fn cramped_arena_exhausts_teleport_attempts() {
        // 5x5 タイルの部屋: 行動範囲が 64px 四方で、ボスの置き場所は 1 点しかない
        let layout = DungeonLayout {
            width:        20,
            height:       8,
            tile_size:    32.0,
            start_room:   "a".into(),
            player_start: (64.0, 64.0),
            rooms:        vec![
                RoomSpec { name: "a".into(), rect: TileRect::new(1, 1, 5, 5) },
                RoomSpec { name: "b".into(), rect: TileRect::new(10, 1, 5, 5) },
            ],
            doors:        vec![],
            pillars:      vec![],
            enemy_spawns: vec![],
            bosses:       vec![],
        };
        let m = DungeonMap::from_layout(&layout).unwrap();
        let mut boss = BossState::new(BossKind::Caster, 11.0 * 32.0, 2.0 * 32.0, &m);
        assert!(boss.arena.is_some());
        let before = boss.body;
        let (cx, cy) = boss.center();
        let player = PlayerState::new(cx - PLAYER_SIZE / 2.0, cy - PLAYER_SIZE / 2.0);
        let ctx = BossContext { grid: m.grid(), player: &player, now: 1.0, dt: DT };
        let (mut out, mut events) = (Vec::new(), Vec::new());
        update_boss(&mut boss, &ctx, &mut SimpleRng::new(4), &mut out, &mut events);

        assert_eq!(boss.last_teleport, Some(1.0));
        assert!(!events.iter().any(|e| matches!(e, FrameEvent::BossTeleported { .. })));
        assert_eq!(boss.fade_alpha, None);
        assert_eq!((boss.body.x, boss.body.y), (before.x, before.y));
    }

    #[test]
    fn inactive_boss_is_frozen() {
        let m = map();
        let mut boss = boss_at_center(&m, "boss", BossKind::Tank);
        let before = (boss.body, boss.last_attack, boss.last_special, boss.last_retarget);
        let player = PlayerState::new(320.0, 320.0);
        let (mut out, mut events) = (Vec::new(), Vec::new());
        let mut rng = SimpleRng::new(1);
        for tick in 1..=60 {
            let ctx = BossContext { grid: m.grid(), player: &player, now: tick as f64 * DT as f64, dt: DT };
            update_boss(&mut boss, &ctx, &mut rng, &mut out, &mut events);
        }
        assert_eq!(before, (boss.body, boss.last_attack, boss.last_special, boss.last_retarget));
        assert!(out.is_empty());
    }
}
