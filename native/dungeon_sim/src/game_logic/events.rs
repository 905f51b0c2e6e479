//! Path: native/dungeon_sim/src/game_logic/events.rs
//! Summary: フレームイベントの drain（ホストのイベント処理用）

use crate::world::{FrameEvent, GameWorld};

/// 溜まったフレームイベントを発生順に取り出す
pub fn drain_frame_events(w: &mut GameWorld) -> Vec<FrameEvent> {
    w.frame_events.drain(..).collect()
}
