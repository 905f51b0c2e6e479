//! Path: native/dungeon_sim/src/world/mod.rs
//! Summary: ワールド型（PlayerState, EnemyWorld, BossState, ProjectileWorld, Chest, GameWorld）

mod boss;
mod chest;
mod enemy;
mod frame_event;
mod game_world;
mod player;
mod projectile;

pub use boss::{BossArena, BossState};
pub use chest::Chest;
pub use enemy::{Behavior, Cardinal, Enemy, EnemyWorld};
pub use frame_event::FrameEvent;
pub use game_world::{BossPlan, DoorPrompt, GameWorld, Rngs};
pub use player::{DashCapability, Passives, PlayerState, SKILL_SLOTS};
pub use projectile::{homing_blend, Flight, Launch, ProjectileWorld};
