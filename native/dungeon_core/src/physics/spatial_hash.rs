//! Path: native/dungeon_core/src/physics/spatial_hash.rs
//! Summary: 空間ハッシュによる近傍クエリ（プレイヤーの攻撃・弾 vs 敵）

use rustc_hash::FxHashMap;

pub struct SpatialHash {
    pub cell_size: f32,
    cells: FxHashMap<(i32, i32), Vec<usize>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, id: usize, x: f32, y: f32) {
        let key = self.cell_key(x, y);
        self.cells.entry(key).or_default().push(id);
    }

    fn cell_key(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// 指定円を覆うセルに登録された ID を `buf` に書き込む（アロケーションなし）。
    /// 円の外の ID も含まれるので、呼び出し側で正確な判定をすること。
    pub fn query_nearby_into(&self, x: f32, y: f32, radius: f32, buf: &mut Vec<usize>) {
        buf.clear();
        let r = (radius / self.cell_size).ceil() as i32;
        let (cx, cy) = self.cell_key(x, y);
        for ix in (cx - r)..=(cx + r) {
            for iy in (cy - r)..=(cy + r) {
                if let Some(ids) = self.cells.get(&(ix, iy)) {
                    buf.extend_from_slice(ids);
                }
            }
        }
    }
}
