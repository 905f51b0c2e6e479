//! Path: native/dungeon_sim/src/game_logic/mod.rs
//! Summary: 物理ステップ・部屋ゲート・戦闘ルール・イベント drain

mod events;
mod physics_step;
pub(crate) mod systems;

pub mod gate;
pub mod rules;

pub use events::drain_frame_events;
pub use physics_step::physics_step;
pub(crate) use systems::interaction::handle_interaction;
pub(crate) use systems::progression::find_door_prompt;
