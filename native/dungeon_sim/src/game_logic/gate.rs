//! Path: native/dungeon_sim/src/game_logic/gate.rs
//! Summary: 部屋ゲート（行動可否・可視性・通行可否）の判定をまとめた関数群
//!
//! 3 つの述語はすべて部屋グラフとアクターの位置だけから導出する。
//! 位置が部屋に解決できない場合は非アクティブ / 通行不可に倒す。

use crate::world::{BossState, PlayerState};
use dungeon_core::physics::body::Body;
use dungeon_core::room::{DungeonMap, RoomId};

/// プレイヤーが今いる部屋（中心で判定）。通路上なら None。
pub fn player_room(map: &DungeonMap, player: &PlayerState) -> Option<RoomId> {
    let (cx, cy) = player.center();
    map.room_containing(cx, cy)
}

/// ボスがこのティックに行動してよいか。移動・通常攻撃・特殊攻撃の直前にそれぞれ呼ぶ。
pub fn boss_can_act(boss: &BossState, player: &PlayerState) -> bool {
    boss.alive && player.alive && boss.is_player_in_same_room(&player.body)
}

/// 描画対象か（中心が解放済みの部屋、または片側以上が解放済みの通路にある）。
/// プレイヤーの攻撃が当たるのもこの述語が true のアクターだけ。
pub fn is_body_visible(map: &DungeonMap, body: &Body) -> bool {
    let (cx, cy) = body.center();
    map.is_visible(cx, cy)
}

/// プレイヤーの箱を (x, y) に置いたとき通行不可か
pub fn player_blocked(map: &DungeonMap, current: Option<RoomId>, candidate: &Body) -> bool {
    map.blocks_box(current, candidate.x, candidate.y, candidate.w, candidate.h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::layout::DungeonLayout;

    #[test]
    fn player_in_corridor_has_no_room() {
        let map = DungeonMap::from_layout(&DungeonLayout::default()).unwrap();
        let mut p = PlayerState::new(320.0, 320.0);
        assert_eq!(player_room(&map, &p), Some(map.start_room()));
        p.body.x = 21.0 * 32.0;
        p.body.y = 11.5 * 32.0;
        assert_eq!(player_room(&map, &p), None);
    }

    #[test]
    fn enemies_in_locked_rooms_are_hidden() {
        let mut map = DungeonMap::from_layout(&DungeonLayout::default()).unwrap();
        let e = Body::square(950.0, 350.0, 24.0);
        assert!(!is_body_visible(&map, &e));
        let room1 = map.room_id("room1").unwrap();
        map.unlock(room1);
        assert!(is_body_visible(&map, &e));
    }
}
