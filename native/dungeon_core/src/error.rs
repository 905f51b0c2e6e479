//! Path: native/dungeon_core/src/error.rs
//! Summary: ダンジョン構成の検証エラー（マップ構築時のみ発生）

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    #[error("unknown room `{0}`")]
    UnknownRoom(String),

    #[error("room `{0}` is declared more than once")]
    DuplicateRoom(String),

    #[error("rooms `{a}` and `{b}` overlap")]
    OverlappingRooms { a: String, b: String },

    #[error("room `{0}` lies outside the {1}x{2} grid")]
    RoomOutOfBounds(String, usize, usize),

    #[error("corridor between `{a}` and `{b}` lies outside the grid")]
    CorridorOutOfBounds { a: String, b: String },

    #[error("spawn point ({x}, {y}) is not inside room `{room}`")]
    SpawnOutsideRoom { room: String, x: f32, y: f32 },

    #[error("room `{room}` is too small for its boss")]
    BossRoomTooSmall { room: String },

    #[error("start room `{0}` is not declared")]
    MissingStartRoom(String),

    #[error("grid must be non-empty with a positive tile size")]
    EmptyGrid,
}
