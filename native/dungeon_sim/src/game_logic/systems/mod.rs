//! Path: native/dungeon_sim/src/game_logic/systems/mod.rs
//! Summary: ティック内の各システム（プレイヤー・敵 AI・ボス・弾・戦闘・進行・インタラクション）

pub(crate) mod boss;
pub(crate) mod combat;
pub(crate) mod enemy_ai;
pub(crate) mod interaction;
pub(crate) mod player;
pub(crate) mod progression;
pub(crate) mod projectiles;
