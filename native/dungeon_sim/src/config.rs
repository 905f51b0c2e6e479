//! Path: native/dungeon_sim/src/config.rs
//! Summary: シミュレーション設定（シード・ティック長・ダンジョン構成）

use dungeon_core::constants::TICK_DT;
use dungeon_core::layout::DungeonLayout;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// 巡回・テレポート・ルート・戦闘の各乱数ストリームの親シード
    pub seed:    u64,
    /// 1 ティックの長さ（秒）
    pub tick_dt: f32,
    pub layout:  DungeonLayout,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:    0x5EED_D00D,
            tick_dt: TICK_DT,
            layout:  DungeonLayout::default(),
        }
    }
}

impl SimConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }
}
