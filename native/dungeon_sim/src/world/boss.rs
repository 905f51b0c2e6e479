//! Path: native/dungeon_sim/src/world/boss.rs
//! Summary: ボス状態（BossState）: フェーズ・ホーム部屋の境界・被ダメージ無敵時間・フェードイン

use dungeon_core::constants::{
    BOSS_DAMAGE_IMMUNITY, BOSS_ENRAGE_RATIO, TELEPORT_FADE_START, TELEPORT_FADE_STEP, TIME_EPSILON,
};
use dungeon_core::entity_params::{BossKind, BossParams, BossPhase};
use dungeon_core::physics::body::{Body, Bounds};
use dungeon_core::room::{DungeonMap, RoomId};

/// ボスの行動範囲。部屋矩形から 1 タイル内側。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossArena {
    pub room:   RoomId,
    /// プレイヤーの在室判定に使う範囲（中心座標）
    pub area:   Bounds,
    /// ボスの左上座標が取れる範囲
    pub anchor: Bounds,
}

impl BossArena {
    pub fn for_room(map: &DungeonMap, room: RoomId, size: f32) -> Option<Self> {
        let r = map.room(room)?;
        let ts = map.tile_size();
        let area = Bounds::new(
            (r.rect.x + 1) as f32 * ts,
            (r.rect.y + 1) as f32 * ts,
            (r.rect.x + r.rect.w - 2) as f32 * ts,
            (r.rect.y + r.rect.h - 2) as f32 * ts,
        );
        let anchor = Bounds::new(area.min_x, area.min_y, area.max_x - size, area.max_y - size);
        // 箱が行動範囲に収まらない部屋ではアリーナを作らない（clamp の範囲が逆転する）
        if anchor.max_x < anchor.min_x || anchor.max_y < anchor.min_y {
            log::warn!("room `{}` is too small for a {size}px boss", r.name);
            return None;
        }
        Some(Self { room, area, anchor })
    }
}

pub struct BossState {
    pub kind:          BossKind,
    pub body:          Body,
    pub hp:            f32,
    pub max_hp:        f32,
    pub alive:         bool,
    pub phase:         BossPhase,
    /// None ならどこにも属さず、常に非アクティブ
    pub arena:         Option<BossArena>,
    pub last_attack:   Option<f64>,
    pub last_special:  Option<f64>,
    pub last_teleport: Option<f64>,
    pub last_retarget: Option<f64>,
    pub last_damage:   Option<f64>,
    /// タンクの移動目標（左上座標）
    pub target:        (f32, f32),
    /// テレポート直後のフェードイン中だけ Some
    pub fade_alpha:    Option<u8>,
}

impl BossState {
    /// 左上 (x, y) に出現させる。ホーム部屋はこの点から一度だけ決まる。
    pub fn new(kind: BossKind, x: f32, y: f32, map: &DungeonMap) -> Self {
        let params = kind.params();
        let arena = map
            .room_containing(x, y)
            .and_then(|room| BossArena::for_room(map, room, params.size));
        if arena.is_none() {
            log::warn!("boss {:?} spawned at ({x}, {y}) without an arena; it will stay inactive", kind);
        }
        Self {
            kind,
            body: Body::square(x, y, params.size),
            hp: params.max_hp,
            max_hp: params.max_hp,
            alive: true,
            phase: BossPhase::Normal,
            arena,
            last_attack: None,
            last_special: None,
            last_teleport: None,
            last_retarget: None,
            last_damage: None,
            target: (x, y),
            fade_alpha: None,
        }
    }

    pub fn params(&self) -> &'static BossParams {
        self.kind.params()
    }

    pub fn name(&self) -> &'static str {
        self.params().name
    }

    pub fn center(&self) -> (f32, f32) {
        self.body.center()
    }

    pub fn is_enraged(&self) -> bool {
        self.phase == BossPhase::Enraged
    }

    pub fn is_fading(&self) -> bool {
        self.fade_alpha.is_some()
    }

    /// プレイヤー（中心）がホーム部屋にいるか。ホーム部屋が無ければ常に false。
    pub fn is_player_in_same_room(&self, player: &Body) -> bool {
        let Some(arena) = &self.arena else {
            return false;
        };
        let (px, py) = player.center();
        arena.area.contains_point(px, py)
    }

    /// 左上座標が行動範囲内か（ホーム部屋が無ければ制約なし）
    pub fn in_arena(&self, x: f32, y: f32) -> bool {
        self.arena.map_or(true, |a| a.anchor.contains_point(x, y))
    }

    /// 左上座標を行動範囲に押し込む
    pub fn clamp_to_arena(&self, x: f32, y: f32) -> (f32, f32) {
        match &self.arena {
            Some(a) => a.anchor.clamp_point(x, y),
            None => (x, y),
        }
    }

    /// HP が半分を下回っていれば enraged へ移行する。移行したときだけ true。
    pub fn update_phase(&mut self) -> bool {
        if self.phase == BossPhase::Normal && self.hp < self.max_hp * BOSS_ENRAGE_RATIO {
            self.phase = BossPhase::Enraged;
            log::info!("{} becomes enraged", self.name());
            return true;
        }
        false
    }

    /// ダメージを受ける。無敵時間中なら false（何もしない）、受けたら true。
    pub fn take_damage(&mut self, amount: f32, now: f64) -> bool {
        if !self.alive {
            return false;
        }
        if let Some(t) = self.last_damage {
            if now - t < BOSS_DAMAGE_IMMUNITY - TIME_EPSILON {
                return false;
            }
        }
        self.last_damage = Some(now);
        self.hp -= amount;
        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.alive = false;
            log::info!("{} defeated", self.name());
            return true;
        }
        self.update_phase();
        true
    }

    pub fn attack_cooldown(&self) -> f64 {
        self.params().attack_cooldown(self.phase)
    }

    pub fn special_cooldown(&self) -> f64 {
        self.params().special_cooldown(self.phase)
    }

    pub fn teleport_cooldown(&self) -> Option<f64> {
        self.params().teleport_cooldown(self.phase)
    }

    pub fn start_fade(&mut self) {
        self.fade_alpha = Some(TELEPORT_FADE_START);
    }

    /// フェードを 1 ティック進める。255 に達したら終了。
    pub fn advance_fade(&mut self) {
        if let Some(alpha) = self.fade_alpha {
            let next = alpha.saturating_add(TELEPORT_FADE_STEP);
            self.fade_alpha = if next == u8::MAX { None } else { Some(next) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::constants::BOSS_SIZE;
    use dungeon_core::layout::DungeonLayout;

    fn map() -> DungeonMap {
        DungeonMap::from_layout(&DungeonLayout::default()).unwrap()
    }

    fn boss_in(map: &DungeonMap, room: &str, kind: BossKind) -> BossState {
        let id = map.room_id(room).unwrap();
        let (cx, cy) = map.room_center_px(id).unwrap();
        BossState::new(kind, cx - BOSS_SIZE / 2.0, cy - BOSS_SIZE / 2.0, map)
    }

    #[test]
    fn arena_is_inset_by_one_tile() {
        let m = map();
        let b = boss_in(&m, "boss", BossKind::Tank);
        let arena = b.arena.unwrap();
        assert_eq!(arena.room, m.room_id("boss").unwrap());
        assert!((arena.area.min_x - 41.0 * 32.0).abs() < 1e-4);
        assert!((arena.area.max_x - 68.0 * 32.0).abs() < 1e-4);
        assert!((arena.anchor.max_x - (68.0 * 32.0 - 64.0)).abs() < 1e-4);
    }

    #[test]
    fn oversized_boss_gets_no_arena() {
        let m = map();
        let room = m.room_id("boss").unwrap();
        // 行動範囲は 27x17 タイル。高さ方向で先に収まらなくなる。
        let fits = BossArena::for_room(&m, room, 17.0 * 32.0).unwrap();
        assert!((fits.anchor.max_y - fits.anchor.min_y).abs() < 1e-4);
        assert!(BossArena::for_room(&m, room, 17.0 * 32.0 + 1.0).is_none());
    }

    #[test]
    fn immunity_window_applies_damage_once() {
        let m = map();
        let mut b = boss_in(&m, "boss", BossKind::Tank);
        assert!(b.take_damage(10.0, 0.0));
        assert!(!b.take_damage(10.0, 0.1));
        assert!((b.hp - 140.0).abs() < 1e-4);
        assert!(b.take_damage(10.0, 0.3));
        assert!((b.hp - 130.0).abs() < 1e-4);
    }

    #[test]
    fn enrage_happens_once_below_half() {
        let m = map();
        let mut b = boss_in(&m, "boss", BossKind::Tank);
        b.hp = 81.0;
        assert!(b.take_damage(5.0, 0.0));
        assert_eq!(b.phase, BossPhase::Normal);
        assert!(b.take_damage(1.0, 1.0));
        assert_eq!(b.phase, BossPhase::Normal); // 75 はちょうど半分
        assert!(b.take_damage(1.0, 2.0));
        assert_eq!(b.phase, BossPhase::Enraged);
        assert!((b.attack_cooldown() - 2.0).abs() < 1e-9);
        b.hp = 140.0;
        assert!(!b.update_phase());
        assert_eq!(b.phase, BossPhase::Enraged);
    }

    #[test]
    fn death_is_terminal() {
        let m = map();
        let mut b = boss_in(&m, "secret", BossKind::Caster);
        assert!(b.take_damage(500.0, 0.0));
        assert!(!b.alive);
        assert_eq!(b.hp, 0.0);
        assert!(!b.take_damage(1.0, 5.0));
    }

    #[test]
    fn outside_every_room_is_inactive() {
        let m = map();
        let b = BossState::new(BossKind::Tank, 0.0, 0.0, &m);
        assert!(b.arena.is_none());
        assert!(!b.is_player_in_same_room(&Body::square(10.0, 10.0, 27.0)));
    }

    #[test]
    fn fade_in_reaches_full_alpha() {
        let m = map();
        let mut b = boss_in(&m, "secret", BossKind::Caster);
        b.start_fade();
        let mut ticks = 0;
        while b.is_fading() {
            b.advance_fade();
            ticks += 1;
        }
        assert_eq!(ticks, 31);
    }

    #[test]
    fn caster_teleport_cooldown_shortens() {
        let m = map();
        let mut b = boss_in(&m, "secret", BossKind::Caster);
        assert_eq!(b.teleport_cooldown(), Some(8.0));
        b.phase = BossPhase::Enraged;
        assert_eq!(b.teleport_cooldown(), Some(5.0));
    }
}
