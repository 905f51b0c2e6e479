//! Path: native/dungeon_sim/src/world/chest.rs
//! Summary: 部屋クリア時に出現する宝箱

use dungeon_core::constants::CHEST_SIZE;
use dungeon_core::loot::Loot;
use dungeon_core::physics::body::Body;
use dungeon_core::room::RoomId;

#[derive(Clone, Debug)]
pub struct Chest {
    pub body:     Body,
    pub room:     RoomId,
    pub opened:   bool,
    /// 開けたときに決まった中身
    pub contents: Option<Loot>,
}

impl Chest {
    /// 中心 (cx, cy) に置く
    pub fn at_center(room: RoomId, cx: f32, cy: f32) -> Self {
        Self {
            body:     Body::square(cx - CHEST_SIZE / 2.0, cy - CHEST_SIZE / 2.0, CHEST_SIZE),
            room,
            opened:   false,
            contents: None,
        }
    }
}
