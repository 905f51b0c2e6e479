//! Path: native/dungeon_core/src/room.rs
//! Summary: 部屋グラフ（部屋・扉・通路タイルの導出）とアクティベーション判定
//!
//! 通路タイルの open / wall は部屋の解放フラグから導出する値であり、
//! 解放フラグが変化したときにだけ `recompute_doors` で全扉を一括更新する。
//! 同一ティック内の読み手は常に同じ値を観測する。

use crate::error::MapError;
use crate::grid::{to_tile, Tile, TileGrid, TileRect};
use crate::layout::DungeonLayout;

/// 部屋のインデックス（`DungeonMap::rooms` の添字）
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct RoomId(pub usize);

#[derive(Clone, Debug)]
pub struct Room {
    pub name:     String,
    pub rect:     TileRect,
    pub unlocked: bool,
}

/// 2 部屋を結ぶ無向の扉
#[derive(Clone, Debug)]
pub struct Door {
    pub a:           RoomId,
    pub b:           RoomId,
    pub corridor:    TileRect,
    /// 開始通路。常に open で再計算の対象外。
    pub always_open: bool,
}

impl Door {
    /// `room` から見た反対側の部屋（端点でなければ None）
    pub fn other(&self, room: RoomId) -> Option<RoomId> {
        if room == self.a {
            Some(self.b)
        } else if room == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn connects(&self, room: RoomId) -> bool {
        self.a == room || self.b == room
    }
}

/// 描画用の扉の状態
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DoorState {
    /// 両端とも解放済み
    Open,
    /// 片側だけ解放済み
    Openable,
    Locked,
}

/// タイルグリッド + 部屋グラフ
#[derive(Clone, Debug)]
pub struct DungeonMap {
    grid:  TileGrid,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    start: RoomId,
}

fn rect_in_grid(rect: &TileRect, width: usize, height: usize) -> bool {
    rect.w > 0
        && rect.h > 0
        && rect.x >= 0
        && rect.y >= 0
        && (rect.x + rect.w) as usize <= width
        && (rect.y + rect.h) as usize <= height
}

impl DungeonMap {
    /// レイアウトを検証してグリッドを彫る。
    /// 開始部屋だけが解放済みの状態で返す。
    pub fn from_layout(layout: &DungeonLayout) -> Result<Self, MapError> {
        if layout.width == 0 || layout.height == 0 || layout.tile_size <= 0.0 {
            return Err(MapError::EmptyGrid);
        }

        let mut rooms: Vec<Room> = Vec::with_capacity(layout.rooms.len());
        for spec in &layout.rooms {
            if rooms.iter().any(|r| r.name == spec.name) {
                return Err(MapError::DuplicateRoom(spec.name.clone()));
            }
            if !rect_in_grid(&spec.rect, layout.width, layout.height) {
                return Err(MapError::RoomOutOfBounds(spec.name.clone(), layout.width, layout.height));
            }
            if let Some(other) = rooms.iter().find(|r| r.rect.overlaps(&spec.rect)) {
                return Err(MapError::OverlappingRooms { a: other.name.clone(), b: spec.name.clone() });
            }
            rooms.push(Room { name: spec.name.clone(), rect: spec.rect, unlocked: false });
        }

        let lookup = |name: &str| -> Result<RoomId, MapError> {
            rooms
                .iter()
                .position(|r| r.name == name)
                .map(RoomId)
                .ok_or_else(|| MapError::UnknownRoom(name.to_string()))
        };

        let start = rooms
            .iter()
            .position(|r| r.name == layout.start_room)
            .map(RoomId)
            .ok_or_else(|| MapError::MissingStartRoom(layout.start_room.clone()))?;

        let mut doors = Vec::with_capacity(layout.doors.len());
        for spec in &layout.doors {
            let a = lookup(&spec.a)?;
            let b = lookup(&spec.b)?;
            if !rect_in_grid(&spec.corridor, layout.width, layout.height) {
                return Err(MapError::CorridorOutOfBounds { a: spec.a.clone(), b: spec.b.clone() });
            }
            doors.push(Door { a, b, corridor: spec.corridor, always_open: spec.always_open });
        }

        for group in &layout.enemy_spawns {
            let id = lookup(&group.room)?;
            let rect = rooms[id.0].rect;
            for spawn in &group.enemies {
                let inside = rect.contains_tile(
                    to_tile(spawn.x, layout.tile_size),
                    to_tile(spawn.y, layout.tile_size),
                );
                if !inside {
                    return Err(MapError::SpawnOutsideRoom { room: group.room.clone(), x: spawn.x, y: spawn.y });
                }
            }
        }
        // ボスの行動範囲は部屋を 1 タイル内側に縮めた矩形。ボスの箱が収まらなければ拒否する。
        for boss in &layout.bosses {
            let rect = rooms[lookup(&boss.room)?.0].rect;
            let size = boss.kind.params().size;
            let area_w = (rect.w - 3) as f32 * layout.tile_size;
            let area_h = (rect.h - 3) as f32 * layout.tile_size;
            if area_w < size || area_h < size {
                return Err(MapError::BossRoomTooSmall { room: boss.room.clone() });
            }
        }

        let mut grid = TileGrid::new(layout.width, layout.height, layout.tile_size);
        for room in &rooms {
            grid.fill_rect(&room.rect, Tile::Open);
        }
        for door in doors.iter().filter(|d| d.always_open) {
            grid.fill_rect(&door.corridor, Tile::Open);
        }
        for &(tx, ty) in &layout.pillars {
            grid.set_tile(tx, ty, Tile::Wall);
        }

        rooms[start.0].unlocked = true;

        let mut map = Self { grid, rooms, doors, start };
        map.recompute_doors();
        log::debug!(
            "dungeon map built: {} rooms, {} doors, start={}",
            map.rooms.len(),
            map.doors.len(),
            map.rooms[start.0].name
        );
        Ok(map)
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn start_room(&self) -> RoomId {
        self.start
    }

    pub fn tile_size(&self) -> f32 {
        self.grid.tile_size()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.rooms.iter().position(|r| r.name == name).map(RoomId)
    }

    pub fn is_unlocked(&self, id: RoomId) -> bool {
        self.rooms.get(id.0).map(|r| r.unlocked).unwrap_or(false)
    }

    /// 点を含む部屋（タイル座標で比較、最初の一致）
    pub fn room_containing(&self, px: f32, py: f32) -> Option<RoomId> {
        let tx = to_tile(px, self.tile_size());
        let ty = to_tile(py, self.tile_size());
        self.rooms.iter().position(|r| r.rect.contains_tile(tx, ty)).map(RoomId)
    }

    /// 点を含む扉の通路（最初の一致）
    pub fn corridor_at(&self, px: f32, py: f32) -> Option<&Door> {
        let tx = to_tile(px, self.tile_size());
        let ty = to_tile(py, self.tile_size());
        self.doors.iter().find(|d| d.corridor.contains_tile(tx, ty))
    }

    /// 部屋を解放する。変化があったときだけ扉を再計算する。
    /// 戻り値は新たに解放されたかどうか。
    pub fn unlock(&mut self, id: RoomId) -> bool {
        let Some(room) = self.rooms.get_mut(id.0) else {
            return false;
        };
        if room.unlocked {
            return false;
        }
        room.unlocked = true;
        log::info!("room unlocked: {}", room.name);
        self.recompute_doors();
        true
    }

    /// 開始部屋以外をまとめて施錠し、扉を一度だけ再計算する
    pub fn relock_all_except_start(&mut self) {
        let start = self.start;
        for (i, room) in self.rooms.iter_mut().enumerate() {
            room.unlocked = i == start.0;
        }
        self.recompute_doors();
    }

    /// 全扉の通路タイルを解放フラグから導出し直す（開始通路は除く）
    pub fn recompute_doors(&mut self) {
        for door in self.doors.iter().filter(|d| !d.always_open) {
            let open = self.rooms[door.a.0].unlocked || self.rooms[door.b.0].unlocked;
            let tile = if open { Tile::Open } else { Tile::Wall };
            self.grid.fill_rect(&door.corridor, tile);
        }
    }

    pub fn door_state(&self, door: &Door) -> DoorState {
        match (self.is_unlocked(door.a), self.is_unlocked(door.b)) {
            (true, true) => DoorState::Open,
            (false, false) => DoorState::Locked,
            _ => DoorState::Openable,
        }
    }

    /// 通路中心のピクセル座標（整数除算で中心タイルを求める）
    pub fn corridor_center_px(&self, door: &Door) -> (f32, f32) {
        let (tx, ty) = door.corridor.center_tile();
        let ts = self.tile_size();
        (tx as f32 * ts, ty as f32 * ts)
    }

    /// 通路内の点 (px, py) を `current` の部屋にいるアクターが通れるか。
    ///
    /// 両端が解放済みなら自由通行。そうでなければ、現在の部屋が端点で
    /// かつ現在の部屋と行き先の部屋の両方が解放済みのときだけ通れる。
    /// 現在の部屋が不明なら通れない。点が通路外なら false。
    pub fn is_door_traversable(&self, current: Option<RoomId>, px: f32, py: f32) -> bool {
        let Some(door) = self.corridor_at(px, py) else {
            return false;
        };
        if self.is_unlocked(door.a) && self.is_unlocked(door.b) {
            return true;
        }
        let Some(here) = current else {
            return false;
        };
        match door.other(here) {
            Some(target) => self.is_unlocked(here) && self.is_unlocked(target),
            None => false,
        }
    }

    /// 移動先の点が通行不可か（壁・範囲外・通れない通路）
    pub fn blocks_point(&self, current: Option<RoomId>, px: f32, py: f32) -> bool {
        if self.grid.is_blocked(px, py) {
            return true;
        }
        self.corridor_at(px, py).is_some() && !self.is_door_traversable(current, px, py)
    }

    /// 箱の四隅のいずれかが通行不可なら true
    pub fn blocks_box(&self, current: Option<RoomId>, x: f32, y: f32, w: f32, h: f32) -> bool {
        [(x, y), (x + w, y), (x, y + h), (x + w, y + h)]
            .iter()
            .any(|&(cx, cy)| self.blocks_point(current, cx, cy))
    }

    /// 描画対象か: 解放済みの部屋の中、または片側以上が解放済みの通路上
    pub fn is_visible(&self, px: f32, py: f32) -> bool {
        if let Some(id) = self.room_containing(px, py) {
            if self.is_unlocked(id) {
                return true;
            }
        }
        match self.corridor_at(px, py) {
            Some(door) => self.is_unlocked(door.a) || self.is_unlocked(door.b),
            None => false,
        }
    }

    /// 部屋の中心（ピクセル）
    pub fn room_center_px(&self, id: RoomId) -> Option<(f32, f32)> {
        let ts = self.tile_size();
        self.room(id).map(|r| {
            (
                (r.rect.x as f32 + r.rect.w as f32 / 2.0) * ts,
                (r.rect.y as f32 + r.rect.h as f32 / 2.0) * ts,
            )
        })
    }

    /// 部屋矩形のピクセル範囲 (min_x, min_y, max_x, max_y)
    pub fn room_bounds_px(&self, id: RoomId) -> Option<(f32, f32, f32, f32)> {
        let ts = self.tile_size();
        self.room(id).map(|r| {
            (
                r.rect.x as f32 * ts,
                r.rect.y as f32 * ts,
                (r.rect.x + r.rect.w) as f32 * ts,
                (r.rect.y + r.rect.h) as f32 * ts,
            )
        })
    }
}
