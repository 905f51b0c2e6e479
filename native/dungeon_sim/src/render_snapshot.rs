//! Path: native/dungeon_sim/src/render_snapshot.rs
//! Summary: GameWorld から描画用スナップショットを構築
//!
//! 描画側は色・形・アニメーションを自分で決める。ここでは位置・箱・種類と
//! 離散的な見た目の状態タグだけを渡す。非表示のアクターは含めない。

use crate::game_logic::gate::is_body_visible;
use crate::world::{BossState, DoorPrompt, Enemy, GameWorld, PlayerState};
use dungeon_core::constants::{ATTACK_FLASH_SECS, ENEMY_HEALTH_BAR_SECS, HURT_FLASH_SECS};
use dungeon_core::entity_params::{BossKind, EnemyKind, ProjectileKind};
use dungeon_core::physics::body::Body;
use dungeon_core::room::DoorState;

/// 見た目の状態タグ（優先度の高いものを 1 つだけ）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualState {
    Normal,
    HurtFlash,
    Attacking,
    Aggressive,
    Enraged,
    Fading { alpha: u8 },
    /// 無敵時間中の点滅
    Invulnerable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy(EnemyKind),
    Boss(BossKind),
    Projectile(ProjectileKind),
    Chest { opened: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x:           f32,
    pub y:           f32,
    pub w:           f32,
    pub h:           f32,
    pub kind:        SpriteKind,
    /// パラメータテーブルの描画種別（player = 0, chest = 30）
    pub render_kind: u8,
    pub state:       VisualState,
    /// HP バーを出すときの残り HP 割合
    pub health:      Option<f32>,
}

/// 未解放の部屋を覆う矩形（ピクセル）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomOverlay {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorVisual {
    pub x:     f32,
    pub y:     f32,
    pub w:     f32,
    pub h:     f32,
    pub state: DoorState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BossHudInfo {
    pub name:    &'static str,
    pub hp:      f32,
    pub max_hp:  f32,
    pub enraged: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudData {
    pub hp:            f32,
    pub max_hp:        f32,
    pub stamina:       f32,
    pub max_stamina:   f32,
    pub skills:        [Option<&'static str>; 4],
    pub weapon:        Option<&'static str>,
    /// 宝箱から出て装備先を選んでいるスキル
    pub pending_skill: Option<&'static str>,
    pub boss_info:     Option<BossHudInfo>,
    pub kill_count:    u32,
    pub elapsed:       f64,
    pub frame_time_ms: f64,
    pub game_over:     bool,
    pub victory:       bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub sprites:  Vec<Sprite>,
    pub overlays: Vec<RoomOverlay>,
    pub doors:    Vec<DoorVisual>,
    pub prompt:   Option<DoorPrompt>,
    pub hud:      HudData,
}

const PLAYER_RENDER_KIND: u8 = 0;
const CHEST_RENDER_KIND:  u8 = 30;

fn within(last: Option<f64>, now: f64, secs: f64) -> bool {
    last.map_or(false, |t| now - t < secs)
}

fn player_state(p: &PlayerState, now: f64) -> VisualState {
    if within(p.last_damage, now, HURT_FLASH_SECS) {
        VisualState::HurtFlash
    } else if p.is_invulnerable(now) {
        VisualState::Invulnerable
    } else if within(p.last_attack, now, ATTACK_FLASH_SECS) {
        VisualState::Attacking
    } else {
        VisualState::Normal
    }
}

fn enemy_state(e: &Enemy, now: f64) -> VisualState {
    if within(e.last_hit, now, HURT_FLASH_SECS) {
        VisualState::HurtFlash
    } else if within(e.last_attack, now, ATTACK_FLASH_SECS) {
        VisualState::Attacking
    } else if e.is_aggressive() {
        VisualState::Aggressive
    } else {
        VisualState::Normal
    }
}

fn boss_state(b: &BossState, now: f64) -> VisualState {
    if let Some(alpha) = b.fade_alpha {
        VisualState::Fading { alpha }
    } else if within(b.last_damage, now, HURT_FLASH_SECS) {
        VisualState::HurtFlash
    } else if b.is_enraged() {
        VisualState::Enraged
    } else {
        VisualState::Normal
    }
}

fn sprite(body: &Body, kind: SpriteKind, render_kind: u8, state: VisualState) -> Sprite {
    Sprite { x: body.x, y: body.y, w: body.w, h: body.h, kind, render_kind, state, health: None }
}

/// GameWorld から RenderFrame を構築する
pub fn build_render_frame(w: &GameWorld) -> RenderFrame {
    let now = w.now;
    let mut sprites = Vec::with_capacity(
        1 + w.enemies.count + w.bosses.len() + w.projectiles.count + w.chests.len(),
    );

    // 1. 宝箱（解放済みの部屋のみ）
    for c in w.chests.iter().filter(|c| w.map.is_unlocked(c.room)) {
        sprites.push(sprite(
            &c.body,
            SpriteKind::Chest { opened: c.opened },
            CHEST_RENDER_KIND,
            VisualState::Normal,
        ));
    }

    // 2. 敵（被弾から一定時間は HP バー付き）
    for e in w.enemies.enemies.iter().filter(|e| e.alive && is_body_visible(&w.map, &e.body)) {
        let mut s = sprite(&e.body, SpriteKind::Enemy(e.kind), e.kind.params().render_kind, enemy_state(e, now));
        if within(e.last_hit, now, ENEMY_HEALTH_BAR_SECS) && e.max_hp > 0.0 {
            s.health = Some(e.hp / e.max_hp);
        }
        sprites.push(s);
    }

    // 3. ボス
    for b in w.bosses.iter().filter(|b| b.alive && is_body_visible(&w.map, &b.body)) {
        let mut s = sprite(&b.body, SpriteKind::Boss(b.kind), b.params().render_kind, boss_state(b, now));
        s.health = Some(if b.max_hp > 0.0 { b.hp / b.max_hp } else { 0.0 });
        sprites.push(s);
    }

    // 4. 弾（すべて）
    let p = &w.projectiles;
    for i in (0..p.len()).filter(|&i| p.alive[i]) {
        let body = Body::square(p.positions_x[i], p.positions_y[i], p.size[i]);
        let kind = p.kind[i];
        sprites.push(sprite(&body, SpriteKind::Projectile(kind), kind.params().render_kind, VisualState::Normal));
    }

    // 5. プレイヤーは最前面
    if w.player.alive {
        sprites.push(sprite(&w.player.body, SpriteKind::Player, PLAYER_RENDER_KIND, player_state(&w.player, now)));
    }

    let ts = w.map.tile_size();
    let overlays = w
        .map
        .rooms()
        .iter()
        .filter(|r| !r.unlocked)
        .map(|r| RoomOverlay {
            x: r.rect.x as f32 * ts,
            y: r.rect.y as f32 * ts,
            w: r.rect.w as f32 * ts,
            h: r.rect.h as f32 * ts,
        })
        .collect();

    let doors = w
        .map
        .doors()
        .iter()
        .map(|d| DoorVisual {
            x:     d.corridor.x as f32 * ts,
            y:     d.corridor.y as f32 * ts,
            w:     d.corridor.w as f32 * ts,
            h:     d.corridor.h as f32 * ts,
            state: if d.always_open { DoorState::Open } else { w.map.door_state(d) },
        })
        .collect();

    let boss_info = w.active_boss().map(|b| BossHudInfo {
        name:    b.name(),
        hp:      b.hp,
        max_hp:  b.max_hp,
        enraged: b.is_enraged(),
    });

    let pl = &w.player;
    let hud = HudData {
        hp:            pl.hp,
        max_hp:        pl.max_hp,
        stamina:       pl.stamina,
        max_stamina:   pl.max_stamina,
        skills:        pl.skills.map(|s| s.map(|s| s.name)),
        weapon:        pl.weapon.map(|wp| wp.name),
        pending_skill: w.pending_skill.map(|s| s.name),
        boss_info,
        kill_count:    w.kill_count,
        elapsed:       now,
        frame_time_ms: w.last_frame_time_ms,
        game_over:     !pl.alive,
        victory:       w.victory,
    };

    RenderFrame { sprites, overlays, doors, prompt: w.near_door, hud }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn world() -> GameWorld {
        GameWorld::new(SimConfig::with_seed(4)).unwrap()
    }

    fn count(frame: &RenderFrame, f: impl Fn(&SpriteKind) -> bool) -> usize {
        frame.sprites.iter().filter(|s| f(&s.kind)).count()
    }

    #[test]
    fn locked_rooms_hide_enemies_and_get_overlays() {
        let mut w = world();
        let frame = build_render_frame(&w);
        assert_eq!(count(&frame, |k| matches!(k, SpriteKind::Enemy(_))), 0);
        assert_eq!(frame.overlays.len(), 8);
        assert_eq!(frame.sprites.last().map(|s| s.kind), Some(SpriteKind::Player));

        let room1 = w.map.room_id("room1").unwrap();
        w.map.unlock(room1);
        let frame = build_render_frame(&w);
        assert_eq!(count(&frame, |k| matches!(k, SpriteKind::Enemy(_))), 12);
        assert_eq!(frame.overlays.len(), 7);
    }

    #[test]
    fn enemy_in_corridor_shows_once_one_side_is_unlocked() {
        let mut w = world();
        let room1 = w.map.room_id("room1").unwrap();
        let room2 = w.map.room_id("room2").unwrap();
        let door = w.map.doors().iter().find(|d| d.connects(room1) && d.connects(room2)).unwrap().clone();
        let (cx, cy) = w.map.corridor_center_px(&door);
        let ei = w.room_enemies[room2.0][0];
        let e = &mut w.enemies.enemies[ei];
        e.body.x = cx - e.body.w / 2.0;
        e.body.y = cy - e.body.h / 2.0;

        let enemies = |w: &GameWorld| count(&build_render_frame(w), |k| matches!(k, SpriteKind::Enemy(_)));
        assert_eq!(enemies(&w), 0);
        w.map.unlock(room1);
        assert!(is_body_visible(&w.map, &w.enemies.enemies[ei].body));
        // room1 の 12 体と通路上の 1 体
        assert_eq!(enemies(&w), 13);
    }

    #[test]
    fn door_visuals_follow_unlock_flags() {
        let mut w = world();
        let room1 = w.map.room_id("room1").unwrap();
        let room2 = w.map.room_id("room2").unwrap();
        let idx = w.map.doors().iter().position(|d| d.connects(room1) && d.connects(room2)).unwrap();
        assert_eq!(build_render_frame(&w).doors[idx].state, DoorState::Locked);
        w.map.unlock(room1);
        assert_eq!(build_render_frame(&w).doors[idx].state, DoorState::Openable);
        w.map.unlock(room2);
        assert_eq!(build_render_frame(&w).doors[idx].state, DoorState::Open);
    }

    #[test]
    fn hurt_enemy_flashes_and_shows_health() {
        let mut w = world();
        let room1 = w.map.room_id("room1").unwrap();
        w.map.unlock(room1);
        let ei = w.room_enemies[room1.0][0];
        w.now = 1.0;
        w.enemies.damage(ei, 10.0, 1.0);
        let frame = build_render_frame(&w);
        let hurt: Vec<&Sprite> = frame.sprites.iter().filter(|s| s.state == VisualState::HurtFlash).collect();
        assert_eq!(hurt.len(), 1);
        let ratio = hurt[0].health.unwrap();
        assert!(ratio > 0.0 && ratio < 1.0);

        w.now = 1.0 + HURT_FLASH_SECS + 0.1;
        let frame = build_render_frame(&w);
        assert!(frame.sprites.iter().all(|s| s.state != VisualState::HurtFlash));
        assert_eq!(frame.sprites.iter().filter(|s| s.health.is_some()).count(), 1);
    }

    #[test]
    fn player_blinks_after_hit() {
        let mut w = world();
        w.player.take_damage(10.0, 0.0);
        w.now = 0.1;
        assert_eq!(player_state(&w.player, w.now), VisualState::HurtFlash);
        w.now = 0.5;
        assert_eq!(player_state(&w.player, w.now), VisualState::Invulnerable);
        w.now = 1.5;
        assert_eq!(player_state(&w.player, w.now), VisualState::Normal);
        assert!((build_render_frame(&w).hud.hp - 390.0).abs() < 1e-4);
    }
}
