//! Path: native/dungeon_sim/src/lib.rs
//! Summary: モジュール宣言と pub use のみ
//!
//! 固定タイムステップのダンジョンシミュレーション。ホストは毎ティック
//! `GameWorld::step` に入力スナップショットを渡し、`drain_frame_events` と
//! `build_render_frame` で結果を受け取る。

pub mod config;
pub mod game_logic;
pub mod input;
pub mod render_snapshot;
pub mod world;

pub use config::SimConfig;
pub use dungeon_core::entity_params::{BossKind, EnemyKind};
pub use dungeon_core::{DungeonLayout, DungeonMap, MapError, RoomId};
pub use game_logic::rules::{CombatRules, StandardRules};
pub use game_logic::{drain_frame_events, physics_step};
pub use input::{InputSnapshot, Interaction};
pub use render_snapshot::{build_render_frame, RenderFrame, Sprite, SpriteKind, VisualState};
pub use world::{BossState, DashCapability, Enemy, EnemyWorld, FrameEvent, GameWorld, PlayerState, ProjectileWorld};
