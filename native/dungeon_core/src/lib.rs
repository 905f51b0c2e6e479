//! Path: native/dungeon_core/src/lib.rs
//! Summary: ダンジョンコア共通ロジック（定数・グリッド・部屋グラフ・レイアウト・パラメータ・物理プリミティブ）

pub mod constants;
pub mod entity_params;
pub mod error;
pub mod grid;
pub mod layout;
pub mod loot;
pub mod physics;
pub mod room;

pub use error::MapError;
pub use layout::DungeonLayout;
pub use room::{DungeonMap, RoomId};
