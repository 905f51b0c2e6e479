//! Path: native/dungeon_sim/src/world/game_world.rs
//! Summary: ゲームワールド（GameWorld）: マップ・アクター・弾・進行状態・乱数ストリーム
//!
//! シミュレーションティックだけが書き換える単一スレッドの状態。ロックは持たない。

use super::{BossState, Chest, EnemyWorld, FrameEvent, PlayerState, ProjectileWorld};
use crate::config::SimConfig;
use crate::game_logic::{
    self,
    rules::{CombatRules, StandardRules},
};
use crate::input::{InputSnapshot, Interaction};
use dungeon_core::entity_params::BossKind;
use dungeon_core::error::MapError;
use dungeon_core::layout::DungeonLayout;
use dungeon_core::loot::Skill;
use dungeon_core::physics::rng::SimpleRng;
use dungeon_core::physics::spatial_hash::SpatialHash;
use dungeon_core::room::{DungeonMap, RoomId};

/// 敵の近傍クエリ用セルサイズ
const COLLISION_CELL: f32 = 64.0;

// 乱数ストリーム番号（SimpleRng::derive の stream）
const STREAM_PATROL:   u64 = 1;
const STREAM_TELEPORT: u64 = 2;
const STREAM_LOOT:     u64 = 3;
const STREAM_COMBAT:   u64 = 4;

/// 確率的なサブシステムごとの専用乱数。ワールド生成時に一度だけシードする。
pub struct Rngs {
    pub patrol:   SimpleRng,
    pub teleport: SimpleRng,
    pub loot:     SimpleRng,
    pub combat:   SimpleRng,
}

impl Rngs {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            patrol:   SimpleRng::derive(seed, STREAM_PATROL),
            teleport: SimpleRng::derive(seed, STREAM_TELEPORT),
            loot:     SimpleRng::derive(seed, STREAM_LOOT),
            combat:   SimpleRng::derive(seed, STREAM_COMBAT),
        }
    }
}

/// ボスの出現予定（部屋ごとに一度だけ）
#[derive(Clone, Copy, Debug)]
pub struct BossPlan {
    pub room:    RoomId,
    pub kind:    BossKind,
    pub spawned: bool,
}

/// 扉を開けるプロンプト
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorPrompt {
    /// `DungeonMap::doors` の添字
    pub door:      usize,
    /// 開けると解放される部屋
    pub target:    RoomId,
    pub can_open:  bool,
    /// 現在の部屋に残っている敵の数
    pub remaining: usize,
}

pub struct GameWorld {
    pub frame_id:           u32,
    /// シミュレーション時刻（秒）。タイマーはすべてこの値との比較。
    pub now:                f64,
    pub tick_dt:            f32,
    pub layout:             DungeonLayout,
    pub map:                DungeonMap,
    pub player:             PlayerState,
    pub enemies:            EnemyWorld,
    /// 部屋ごとに割り当てられた敵の添字（`RoomId` で引く）
    pub room_enemies:       Vec<Vec<usize>>,
    /// クリア済みとして処理した部屋（イベント・宝箱は最初の遷移で一度だけ）
    pub cleared_rooms:      Vec<bool>,
    pub boss_plan:          Vec<BossPlan>,
    pub bosses:             Vec<BossState>,
    pub projectiles:        ProjectileWorld,
    pub chests:             Vec<Chest>,
    pub near_door:          Option<DoorPrompt>,
    /// 宝箱から出たスキル。スキルスロットを押すとそこに装備される。
    pub pending_skill:      Option<Skill>,
    pub victory:            bool,
    pub rules:              Box<dyn CombatRules>,
    pub rngs:               Rngs,
    /// 生存中の敵の Spatial Hash（毎ティック再構築）
    pub collision:          SpatialHash,
    pub query_buf:          Vec<usize>,
    /// このティックで発生したイベント（ホストが drain する）
    pub frame_events:       Vec<FrameEvent>,
    /// 直近ティックの処理時間（ミリ秒）
    pub last_frame_time_ms: f64,
    pub kill_count:         u32,
}

impl GameWorld {
    pub fn new(config: SimConfig) -> Result<Self, MapError> {
        Self::with_rules(config, Box::new(StandardRules))
    }

    /// 戦闘ルールを差し替えて生成する
    pub fn with_rules(config: SimConfig, rules: Box<dyn CombatRules>) -> Result<Self, MapError> {
        let SimConfig { seed, tick_dt, layout } = config;
        let map = DungeonMap::from_layout(&layout)?;
        let mut rngs = Rngs::from_seed(seed);

        let mut enemies = EnemyWorld::new();
        let mut room_enemies = vec![Vec::new(); map.rooms().len()];
        for group in &layout.enemy_spawns {
            let room = map
                .room_id(&group.room)
                .ok_or_else(|| MapError::UnknownRoom(group.room.clone()))?;
            let ids = enemies.spawn(&group.enemies, &map, &mut rngs.patrol);
            room_enemies[room.0].extend(ids);
        }

        let boss_plan = layout
            .bosses
            .iter()
            .map(|b| {
                map.room_id(&b.room)
                    .map(|room| BossPlan { room, kind: b.kind, spawned: false })
                    .ok_or_else(|| MapError::UnknownRoom(b.room.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // 敵のいない部屋は最初からクリア扱い（イベントは出さない）
        let cleared_rooms = room_enemies.iter().map(|ids| ids.is_empty()).collect();
        let (sx, sy) = layout.player_start;

        log::info!(
            "world created: seed={seed:#x} rooms={} enemies={} bosses={}",
            map.rooms().len(),
            enemies.len(),
            boss_plan.len()
        );

        Ok(Self {
            frame_id: 0,
            now: 0.0,
            tick_dt,
            layout,
            map,
            player: PlayerState::new(sx, sy),
            enemies,
            room_enemies,
            cleared_rooms,
            boss_plan,
            bosses: Vec::new(),
            projectiles: ProjectileWorld::new(),
            chests: Vec::new(),
            near_door: None,
            pending_skill: None,
            victory: false,
            rules,
            rngs,
            collision: SpatialHash::new(COLLISION_CELL),
            query_buf: Vec::new(),
            frame_events: Vec::new(),
            last_frame_time_ms: 0.0,
            kill_count: 0,
        })
    }

    /// 部屋に割り当てられた敵が全滅しているか（割り当てがなければ true）
    pub fn room_cleared(&self, room: RoomId) -> bool {
        self.room_enemies
            .get(room.0)
            .map_or(true, |ids| ids.iter().all(|&i| !self.enemies.enemies[i].alive))
    }

    /// 部屋に残っている敵の数
    pub fn remaining_in_room(&self, room: RoomId) -> usize {
        self.room_enemies
            .get(room.0)
            .map_or(0, |ids| ids.iter().filter(|&&i| self.enemies.enemies[i].alive).count())
    }

    /// 予定されたボスがすべて出現し、すべて倒されたか
    pub fn all_bosses_defeated(&self) -> bool {
        !self.boss_plan.is_empty()
            && self.boss_plan.iter().all(|p| p.spawned)
            && self.bosses.iter().all(|b| !b.alive)
    }

    /// 生存中でホーム部屋にプレイヤーがいるボス（HUD のボスバー用）
    pub fn active_boss(&self) -> Option<&BossState> {
        self.bosses
            .iter()
            .find(|b| b.alive && b.is_player_in_same_room(&self.player.body))
    }

    /// 生存中の敵の Spatial Hash を再構築する（中心座標で登録）
    pub(crate) fn rebuild_collision(&mut self) {
        self.collision.clear();
        for (i, e) in self.enemies.enemies.iter().enumerate().filter(|(_, e)| e.alive) {
            let (cx, cy) = e.body.center();
            self.collision.insert(i, cx, cy);
        }
    }

    /// 1 ティック進める
    pub fn step(&mut self, input: &InputSnapshot) {
        game_logic::physics_step(self, input);
    }

    /// 入力 / UI 層からのインタラクション。何か起きたら true。
    pub fn handle_interaction(&mut self, interaction: Interaction) -> bool {
        game_logic::handle_interaction(self, interaction)
    }

    pub fn drain_frame_events(&mut self) -> Vec<FrameEvent> {
        game_logic::drain_frame_events(self)
    }

    /// 現在の扉プロンプト（最後のティックの結果ではなく、いまの状態から計算する）
    pub fn door_prompt(&self) -> Option<DoorPrompt> {
        game_logic::find_door_prompt(self)
    }

    /// ゲームを最初からやり直す。
    ///
    /// 開始部屋以外をまとめて施錠し、扉の再計算は一度だけ行う。
    pub fn restart(&mut self) {
        let (sx, sy) = self.layout.player_start;
        self.player = PlayerState::new(sx, sy);
        self.enemies.reset_all(&mut self.rngs.patrol);
        self.bosses.clear();
        for plan in &mut self.boss_plan {
            plan.spawned = false;
        }
        self.projectiles.clear();
        self.chests.clear();
        self.cleared_rooms = self.room_enemies.iter().map(|ids| ids.is_empty()).collect();
        self.near_door = None;
        self.pending_skill = None;
        self.victory = false;
        self.frame_events.clear();
        self.map.relock_all_except_start();
        log::info!("world restarted at t={:.2}", self.now);
    }
}
