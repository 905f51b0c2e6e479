//! Path: native/dungeon_sim/src/world/frame_event.rs
//! Summary: フレーム内で発生したゲームイベント（ホストが毎フレーム drain する）

use dungeon_core::entity_params::{BossKind, EnemyKind};
use dungeon_core::loot::Loot;
use dungeon_core::room::RoomId;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    EnemyKilled    { enemy_kind: EnemyKind, room: Option<RoomId> },
    PlayerDamaged  { damage: f32 },
    PlayerDied,
    RoomCleared    { room: RoomId },
    RoomUnlocked   { room: RoomId },
    ChestSpawned   { room: RoomId },
    ChestOpened    { loot: Loot },
    BossSpawned    { boss_kind: BossKind },
    BossEnraged    { boss_kind: BossKind },
    BossTeleported { boss_kind: BossKind, x: f32, y: f32 },
    BossDefeated   { boss_kind: BossKind },
    Victory,
}
