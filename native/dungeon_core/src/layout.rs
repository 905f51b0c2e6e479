//! Path: native/dungeon_core/src/layout.rs
//! Summary: ダンジョン構成データ（部屋・扉・柱・敵/ボスのスポーン表）とデフォルトのダンジョン
//!
//! ビルドごとに固定の定数データ。serde で外部から差し替えられるが、
//! 実行時フォーマット（アセットパイプライン）は持たない。

use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_START_X, PLAYER_START_Y, TILE_SIZE, WORLD_TILES_H, WORLD_TILES_W};
use crate::entity_params::{BossKind, EnemyKind};
use crate::grid::TileRect;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    pub rect: TileRect,
}

/// 扉は 2 つの部屋を結ぶ無向ペア。`always_open` は開始通路（常に open タイル）。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoorSpec {
    pub a:        String,
    pub b:        String,
    pub corridor: TileRect,
    #[serde(default)]
    pub always_open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub x:    f32,
    pub y:    f32,
}

/// 部屋ごとの敵リスト（この部屋の掃討判定に使う割り当て）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSpawns {
    pub room:    String,
    pub enemies: Vec<EnemySpawn>,
}

/// ボスは部屋の中央に、部屋へ初めて入ったときに一度だけ出現する
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossSpawn {
    pub room: String,
    pub kind: BossKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub width:        usize,
    pub height:       usize,
    pub tile_size:    f32,
    pub start_room:   String,
    pub player_start: (f32, f32),
    pub rooms:        Vec<RoomSpec>,
    pub doors:        Vec<DoorSpec>,
    /// 柱（壁タイル）のタイル座標
    #[serde(default)]
    pub pillars:      Vec<(i32, i32)>,
    #[serde(default)]
    pub enemy_spawns: Vec<RoomSpawns>,
    #[serde(default)]
    pub bosses:       Vec<BossSpawn>,
}

fn room(name: &str, x: i32, y: i32, w: i32, h: i32) -> RoomSpec {
    RoomSpec { name: name.to_string(), rect: TileRect::new(x, y, w, h) }
}

fn door(a: &str, b: &str, corridor: TileRect, always_open: bool) -> DoorSpec {
    DoorSpec { a: a.to_string(), b: b.to_string(), corridor, always_open }
}

/// 部屋ごとのスポーン表（遠距離・巡回・追跡の順）
fn group(room: &str, ranged: &[(f32, f32)], patrol: &[(f32, f32)], chaser: &[(f32, f32)]) -> RoomSpawns {
    let tagged = [
        (EnemyKind::Ranged, ranged),
        (EnemyKind::Patrol, patrol),
        (EnemyKind::Chaser, chaser),
    ];
    let enemies = tagged
        .iter()
        .flat_map(|&(kind, points)| points.iter().map(move |&(x, y)| EnemySpawn { kind, x, y }))
        .collect();
    RoomSpawns { room: room.to_string(), enemies }
}

impl Default for DungeonLayout {
    /// 100×80 タイルの標準ダンジョン（9 部屋・8 扉・128 体・ボス 2 体）
    fn default() -> Self {
        let rooms = vec![
            room("spawn",   5,  5,  15, 12),
            room("room1",   25, 8,  20, 18),
            room("room2",   50, 5,  18, 15),
            room("central", 15, 30, 25, 20),
            room("right",   45, 25, 20, 15),
            room("big",     70, 20, 25, 25),
            room("bottom",  10, 55, 20, 15),
            room("boss",    40, 50, 30, 20),
            room("secret",  75, 50, 20, 20),
        ];

        let doors = vec![
            door("spawn",   "room1",   TileRect::new(20, 11, 5, 3), true),
            door("room1",   "room2",   TileRect::new(45, 14, 5, 2), false),
            door("room1",   "central", TileRect::new(32, 26, 2, 4), false),
            door("central", "right",   TileRect::new(40, 37, 5, 2), false),
            door("right",   "big",     TileRect::new(65, 32, 5, 2), false),
            door("central", "bottom",  TileRect::new(27, 50, 2, 5), false),
            door("right",   "boss",    TileRect::new(57, 45, 2, 5), false),
            door("boss",    "secret",  TileRect::new(70, 60, 5, 2), false),
        ];

        let enemy_spawns = vec![
            group(
                "room1",
                &[(1120.0, 540.0), (1200.0, 480.0)],
                &[(850.0, 300.0), (1380.0, 300.0), (850.0, 780.0), (1380.0, 780.0)],
                &[(950.0, 350.0), (1100.0, 350.0), (1250.0, 350.0),
                  (950.0, 700.0), (1100.0, 700.0), (1250.0, 700.0)],
            ),
            group(
                "room2",
                &[(1888.0, 400.0)],
                &[(1650.0, 200.0), (2100.0, 200.0), (1650.0, 580.0), (2100.0, 580.0)],
                &[(1750.0, 280.0), (1850.0, 280.0), (1950.0, 280.0),
                  (1750.0, 520.0), (1850.0, 520.0), (1950.0, 520.0)],
            ),
            group(
                "central",
                &[(720.0, 1200.0), (880.0, 1200.0), (1040.0, 1200.0), (880.0, 1080.0), (880.0, 1320.0)],
                &[(520.0, 1000.0), (520.0, 1400.0), (1220.0, 1000.0), (1220.0, 1400.0),
                  (700.0, 980.0), (1000.0, 980.0)],
                &[(600.0, 1100.0), (760.0, 1100.0), (1000.0, 1100.0), (1160.0, 1100.0),
                  (600.0, 1300.0), (760.0, 1300.0), (1000.0, 1300.0), (1160.0, 1300.0)],
            ),
            group(
                "right",
                &[(1760.0, 1040.0)],
                &[(1480.0, 840.0), (2020.0, 840.0), (1480.0, 1240.0), (2020.0, 1240.0)],
                &[(1600.0, 920.0), (1720.0, 920.0), (1840.0, 920.0),
                  (1600.0, 1160.0), (1720.0, 1160.0), (1840.0, 1160.0)],
            ),
            group(
                "big",
                &[(2480.0, 900.0), (2640.0, 900.0), (2800.0, 900.0), (2560.0, 780.0),
                  (2560.0, 1020.0), (2720.0, 780.0), (2720.0, 1020.0)],
                &[(2280.0, 680.0), (2980.0, 680.0), (2280.0, 1380.0), (2980.0, 1380.0),
                  (2280.0, 900.0), (2980.0, 900.0)],
                &[(2360.0, 800.0), (2440.0, 800.0), (2600.0, 800.0), (2760.0, 800.0), (2840.0, 800.0),
                  (2360.0, 1000.0), (2440.0, 1000.0), (2600.0, 1000.0), (2760.0, 1000.0), (2840.0, 1000.0)],
            ),
            group(
                "bottom",
                &[(640.0, 2000.0)],
                &[(360.0, 1800.0), (920.0, 1800.0), (360.0, 2200.0), (920.0, 2200.0)],
                &[(480.0, 1880.0), (600.0, 1880.0), (720.0, 1880.0),
                  (480.0, 2120.0), (600.0, 2120.0), (720.0, 2120.0)],
            ),
            group(
                "boss",
                &[(1520.0, 1840.0), (1680.0, 1840.0), (1840.0, 1840.0), (2000.0, 1840.0),
                  (1600.0, 1720.0), (1760.0, 1720.0), (1920.0, 1720.0),
                  (1600.0, 1960.0), (1760.0, 1960.0), (1920.0, 1960.0)],
                &[(1320.0, 1640.0), (2180.0, 1640.0), (1320.0, 2200.0), (2180.0, 2200.0),
                  (1320.0, 1920.0), (2180.0, 1920.0)],
                &[(1400.0, 1720.0), (1480.0, 1720.0), (1560.0, 1720.0), (1640.0, 1720.0),
                  (1720.0, 1720.0), (1800.0, 1720.0), (1880.0, 1720.0), (1960.0, 1720.0),
                  (2040.0, 1720.0), (1400.0, 1960.0), (1480.0, 1960.0), (1560.0, 1960.0),
                  (1640.0, 1960.0), (1720.0, 1960.0), (1800.0, 1960.0), (1880.0, 1960.0),
                  (1960.0, 1960.0), (2040.0, 1960.0)],
            ),
            group(
                "secret",
                &[(2640.0, 1840.0)],
                &[(2720.0, 1760.0), (2720.0, 1920.0)],
                &[(2480.0, 1840.0), (2560.0, 1840.0), (2800.0, 1840.0), (2880.0, 1840.0)],
            ),
        ];

        Self {
            width:        WORLD_TILES_W,
            height:       WORLD_TILES_H,
            tile_size:    TILE_SIZE,
            start_room:   "spawn".to_string(),
            player_start: (PLAYER_START_X, PLAYER_START_Y),
            rooms,
            doors,
            pillars:      vec![(77, 25), (85, 25), (77, 35), (85, 35)],
            enemy_spawns,
            bosses: vec![
                BossSpawn { room: "boss".to_string(),   kind: BossKind::Tank },
                BossSpawn { room: "secret".to_string(), kind: BossKind::Caster },
            ],
        }
    }
}

impl DungeonLayout {
    pub fn enemy_total(&self) -> usize {
        self.enemy_spawns.iter().map(|g| g.enemies.len()).sum()
    }
}
