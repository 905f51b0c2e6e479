//! Path: native/dungeon_sim/src/game_logic/systems/progression.rs
//! Summary: 進行（部屋クリアの毎ティック判定・宝箱出現・ボス出現・扉プロンプト・勝利判定）

use crate::game_logic::gate;
use crate::world::{BossState, Chest, DoorPrompt, FrameEvent, GameWorld};
use dungeon_core::constants::DOOR_INTERACT_DISTANCE;
use dungeon_core::room::RoomId;

/// 最後の敵が倒れたティックに一度だけクリアを確定し、宝箱を部屋の中心に置く
fn poll_cleared_rooms(w: &mut GameWorld) {
    for r in 0..w.cleared_rooms.len() {
        let room = RoomId(r);
        if w.cleared_rooms[r] || !w.room_cleared(room) {
            continue;
        }
        w.cleared_rooms[r] = true;
        if let Some(name) = w.map.room(room).map(|rm| rm.name.as_str()) {
            log::info!("room cleared: {name}");
        }
        w.frame_events.push(FrameEvent::RoomCleared { room });
        if let Some((cx, cy)) = w.map.room_center_px(room) {
            w.chests.push(Chest::at_center(room, cx, cy));
            w.frame_events.push(FrameEvent::ChestSpawned { room });
        }
    }
}

/// 解放済みのボス部屋にプレイヤーが初めて入ったティックにボスを出す（部屋ごとに一度）
fn spawn_bosses_on_entry(w: &mut GameWorld) {
    let Some(room) = gate::player_room(&w.map, &w.player) else {
        return;
    };
    if !w.map.is_unlocked(room) {
        return;
    }
    let Some((cx, cy)) = w.map.room_center_px(room) else {
        return;
    };
    for plan in w.boss_plan.iter_mut().filter(|p| p.room == room && !p.spawned) {
        plan.spawned = true;
        let half = plan.kind.params().size / 2.0;
        let boss = BossState::new(plan.kind, cx - half, cy - half, &w.map);
        log::info!("boss spawned: {}", boss.name());
        w.frame_events.push(FrameEvent::BossSpawned { boss_kind: plan.kind });
        w.bosses.push(boss);
    }
}

/// 現在の部屋を端点とし、反対側が未解放の扉のうち、通路中心がいちばん近いもの
pub(crate) fn find_door_prompt(w: &GameWorld) -> Option<DoorPrompt> {
    if !w.player.alive {
        return None;
    }
    let current = gate::player_room(&w.map, &w.player)?;
    let (px, py) = w.player.center();
    w.map
        .doors()
        .iter()
        .enumerate()
        .filter_map(|(i, door)| {
            let target = door.other(current)?;
            if w.map.is_unlocked(target) {
                return None;
            }
            let (dx, dy) = w.map.corridor_center_px(door);
            let dist = ((dx - px).powi(2) + (dy - py).powi(2)).sqrt();
            (dist <= DOOR_INTERACT_DISTANCE).then_some((i, target, dist))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(door, target, _)| {
            let remaining = w.remaining_in_room(current);
            DoorPrompt { door, target, can_open: remaining == 0, remaining }
        })
}

/// 進行状態を 1 ティック分更新する
pub(crate) fn update_progression(w: &mut GameWorld) {
    poll_cleared_rooms(w);
    spawn_bosses_on_entry(w);
    w.near_door = find_door_prompt(w);

    if !w.victory && w.all_bosses_defeated() {
        w.victory = true;
        log::info!("victory at t={:.2} ({} kills)", w.now, w.kill_count);
        w.frame_events.push(FrameEvent::Victory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn world() -> GameWorld {
        GameWorld::new(SimConfig::with_seed(8)).unwrap()
    }

    #[test]
    fn clearing_a_room_spawns_one_chest() {
        let mut w = world();
        let room1 = w.map.room_id("room1").unwrap();
        for &i in &w.room_enemies[room1.0].clone() {
            w.enemies.damage(i, 1000.0, 0.0);
        }
        update_progression(&mut w);
        update_progression(&mut w);
        assert_eq!(w.chests.len(), 1);
        assert_eq!(w.chests[0].room, room1);
        let cleared = w.frame_events.iter().filter(|e| **e == FrameEvent::RoomCleared { room: room1 }).count();
        assert_eq!(cleared, 1);
    }

    #[test]
    fn door_prompt_reports_remaining_enemies() {
        let mut w = world();
        let room1 = w.map.room_id("room1").unwrap();
        let room2 = w.map.room_id("room2").unwrap();
        w.map.unlock(room1);
        // room1 → room2 の通路（中心タイル 47, 15）の手前、room1 の東端
        w.player.body.x = 1412.0;
        w.player.body.y = 466.0;
        let prompt = find_door_prompt(&w).unwrap();
        assert_eq!(prompt.target, room2);
        assert!(!prompt.can_open);
        assert_eq!(prompt.remaining, 12);

        for &i in &w.room_enemies[room1.0].clone() {
            w.enemies.damage(i, 1000.0, 0.0);
        }
        assert!(find_door_prompt(&w).unwrap().can_open);
    }

    #[test]
    fn boss_spawns_once_on_entry_to_unlocked_room() {
        let mut w = world();
        let boss_room = w.map.room_id("boss").unwrap();
        let (cx, cy) = w.map.room_center_px(boss_room).unwrap();
        w.player.body.x = cx - 200.0;
        w.player.body.y = cy;
        update_progression(&mut w);
        assert!(w.bosses.is_empty());

        w.map.unlock(boss_room);
        update_progression(&mut w);
        update_progression(&mut w);
        assert_eq!(w.bosses.len(), 1);
        assert!(w.boss_plan.iter().any(|p| p.room == boss_room && p.spawned));
    }

    #[test]
    fn victory_after_every_boss_falls() {
        let mut w = world();
        for name in ["boss", "secret"] {
            let room = w.map.room_id(name).unwrap();
            w.map.unlock(room);
            let (cx, cy) = w.map.room_center_px(room).unwrap();
            w.player.body.x = cx - 150.0;
            w.player.body.y = cy;
            update_progression(&mut w);
        }
        assert_eq!(w.bosses.len(), 2);
        assert!(!w.victory);
        for b in &mut w.bosses {
            b.take_damage(1000.0, 0.0);
        }
        update_progression(&mut w);
        update_progression(&mut w);
        assert!(w.victory);
        assert_eq!(w.frame_events.iter().filter(|e| **e == FrameEvent::Victory).count(), 1);
    }
}
