//! Path: native/dungeon_core/src/grid.rs
//! Summary: 衝突判定の基盤となるタイルグリッド（open / wall）とタイル矩形

use serde::{Deserialize, Serialize};

/// タイルの種類
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum Tile {
    Open = 0,
    #[default]
    Wall = 1,
}

/// タイル座標系の矩形（原点 + 大きさ、単位はタイル）
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TileRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains_tile(&self, tx: i32, ty: i32) -> bool {
        self.x <= tx && tx < self.x + self.w && self.y <= ty && ty < self.y + self.h
    }

    pub fn overlaps(&self, other: &TileRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// 中心タイル（整数除算、元データの扉位置計算と同じ丸め）
    pub fn center_tile(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// ピクセル座標 → タイル座標（床除算）
#[inline]
pub fn to_tile(px: f32, tile_size: f32) -> i32 {
    (px / tile_size).floor() as i32
}

/// 固定サイズのタイルグリッド。範囲外は常に壁扱い。
#[derive(Clone, Debug)]
pub struct TileGrid {
    width:     usize,
    height:    usize,
    tile_size: f32,
    cells:     Vec<Tile>,
}

impl TileGrid {
    /// 全タイルを壁で初期化する
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            cells: vec![Tile::Wall; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn index(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
            return None;
        }
        Some(ty as usize * self.width + tx as usize)
    }

    pub fn tile(&self, tx: i32, ty: i32) -> Tile {
        self.index(tx, ty).map(|i| self.cells[i]).unwrap_or(Tile::Wall)
    }

    pub fn set_tile(&mut self, tx: i32, ty: i32, tile: Tile) {
        if let Some(i) = self.index(tx, ty) {
            self.cells[i] = tile;
        }
    }

    /// 矩形をまとめて塗る（範囲外のタイルは無視）
    pub fn fill_rect(&mut self, rect: &TileRect, tile: Tile) {
        for ty in rect.y..rect.y + rect.h {
            for tx in rect.x..rect.x + rect.w {
                self.set_tile(tx, ty, tile);
            }
        }
    }

    pub fn rect_is(&self, rect: &TileRect, tile: Tile) -> bool {
        (rect.y..rect.y + rect.h).all(|ty| (rect.x..rect.x + rect.w).all(|tx| self.tile(tx, ty) == tile))
    }

    pub fn is_blocked_tile(&self, tx: i32, ty: i32) -> bool {
        self.tile(tx, ty) == Tile::Wall
    }

    /// ピクセル座標のタイルが通行不可か（範囲外は true）
    pub fn is_blocked(&self, px: f32, py: f32) -> bool {
        self.is_blocked_tile(to_tile(px, self.tile_size), to_tile(py, self.tile_size))
    }

    /// 左上 (x, y)・大きさ (w, h) の箱の四隅のいずれかが壁なら true
    pub fn box_blocked(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.is_blocked(x, y)
            || self.is_blocked(x + w, y)
            || self.is_blocked(x, y + h)
            || self.is_blocked(x + w, y + h)
    }
}
