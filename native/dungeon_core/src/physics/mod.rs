//! Path: native/dungeon_core/src/physics/mod.rs
//! Summary: 物理モジュールの再エクスポート（AABB 運動体・RNG・空間ハッシュ）

pub mod body;
pub mod rng;
pub mod spatial_hash;
