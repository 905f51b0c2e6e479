//! Path: native/dungeon_sim/src/game_logic/systems/interaction.rs
//! Summary: 扉を開ける・宝箱を開ける・スキルスロットの使用（装備 / ダッシュ）

use super::player::dash;
use super::progression::find_door_prompt;
use crate::input::Interaction;
use crate::world::{FrameEvent, GameWorld};
use dungeon_core::constants::{CHEST_INTERACT_DISTANCE, HEALTH_POTION_HEAL};
use dungeon_core::loot::{Loot, Potion, SkillKind};

fn open_door(w: &mut GameWorld) -> bool {
    let Some(prompt) = find_door_prompt(w) else {
        return false;
    };
    if !prompt.can_open {
        log::debug!("door stays shut: {} enemies remain", prompt.remaining);
        return false;
    }
    if w.map.unlock(prompt.target) {
        w.frame_events.push(FrameEvent::RoomUnlocked { room: prompt.target });
    }
    w.near_door = None;
    true
}

fn apply_loot(w: &mut GameWorld, loot: Loot) {
    match loot {
        Loot::Weapon(weapon) => w.player.equip_weapon(weapon),
        Loot::Potion(Potion::Health) => w.player.heal(HEALTH_POTION_HEAL),
        Loot::Potion(Potion::Full) => w.player.heal(w.player.max_hp),
        Loot::Skill(skill) => w.pending_skill = Some(skill),
    }
}

fn open_chest(w: &mut GameWorld) -> bool {
    let body = w.player.body;
    let nearest = w
        .chests
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.opened)
        .map(|(i, c)| (i, body.distance_to(&c.body)))
        .filter(|&(_, d)| d <= CHEST_INTERACT_DISTANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i);
    let Some(i) = nearest else {
        return false;
    };

    let loot = Loot::roll(&mut w.rngs.loot);
    let chest = &mut w.chests[i];
    chest.opened = true;
    chest.contents = Some(loot);
    log::info!("chest opened: {}", loot.name());
    apply_loot(w, loot);
    w.frame_events.push(FrameEvent::ChestOpened { loot });
    true
}

/// 保留中のスキルがあればスロットに装備し、なければスロットのダッシュを発動する
fn use_skill(w: &mut GameWorld, slot: usize) -> bool {
    if let Some(skill) = w.pending_skill.take() {
        if w.player.equip_skill(slot, skill) {
            log::info!("skill equipped in slot {}: {}", slot + 1, skill.name);
            return true;
        }
        w.pending_skill = Some(skill);
        return false;
    }
    match w.player.skill_in(slot) {
        Some(skill) if skill.kind == SkillKind::Dash => dash(w),
        _ => false,
    }
}

/// 外部（入力 / UI 層）から呼ばれるインタラクション。何か起きたら true。
pub(crate) fn handle_interaction(w: &mut GameWorld, interaction: Interaction) -> bool {
    if !w.player.alive {
        return false;
    }
    match interaction {
        Interaction::OpenDoor => open_door(w),
        Interaction::OpenChest => open_chest(w),
        Interaction::UseSkill(slot) => use_skill(w, slot),
        Interaction::DiscardLoot => w.pending_skill.take().is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::world::{Chest, DashCapability};
    use dungeon_core::loot::SKILL_TABLE;

    fn world() -> GameWorld {
        GameWorld::new(SimConfig::with_seed(21)).unwrap()
    }

    #[test]
    fn door_opens_only_when_room_is_cleared() {
        let mut w = world();
        let room1 = w.map.room_id("room1").unwrap();
        let room2 = w.map.room_id("room2").unwrap();
        w.map.unlock(room1);
        w.player.body.x = 1412.0;
        w.player.body.y = 466.0;
        assert!(!handle_interaction(&mut w, Interaction::OpenDoor));
        assert!(!w.map.is_unlocked(room2));

        for &i in &w.room_enemies[room1.0].clone() {
            w.enemies.damage(i, 1000.0, 0.0);
        }
        assert!(handle_interaction(&mut w, Interaction::OpenDoor));
        assert!(w.map.is_unlocked(room2));
        assert!(w.frame_events.contains(&FrameEvent::RoomUnlocked { room: room2 }));
    }

    #[test]
    fn chest_opens_once() {
        let mut w = world();
        let (cx, cy) = w.player.center();
        let room = w.map.start_room();
        w.chests.push(Chest::at_center(room, cx + 20.0, cy));
        assert!(handle_interaction(&mut w, Interaction::OpenChest));
        assert!(w.chests[0].opened);
        assert!(w.chests[0].contents.is_some());
        assert!(!handle_interaction(&mut w, Interaction::OpenChest));
    }

    #[test]
    fn far_chest_is_out_of_reach() {
        let mut w = world();
        let (cx, cy) = w.player.center();
        w.chests.push(Chest::at_center(w.map.start_room(), cx + 100.0, cy));
        assert!(!handle_interaction(&mut w, Interaction::OpenChest));
    }

    #[test]
    fn pending_skill_goes_to_pressed_slot() {
        let mut w = world();
        let dash_skill = SKILL_TABLE[1];
        w.pending_skill = Some(dash_skill);
        assert!(handle_interaction(&mut w, Interaction::UseSkill(2)));
        assert!(w.pending_skill.is_none());
        assert_eq!(w.player.skill_in(2), Some(dash_skill));
        assert!(matches!(w.player.dash, DashCapability::Dash { .. }));

        let x0 = w.player.body.x;
        assert!(handle_interaction(&mut w, Interaction::UseSkill(2)));
        assert!(w.player.body.x > x0);
    }

    #[test]
    fn discard_drops_pending_skill() {
        let mut w = world();
        w.pending_skill = Some(SKILL_TABLE[0]);
        assert!(handle_interaction(&mut w, Interaction::DiscardLoot));
        assert!(w.pending_skill.is_none());
        assert!(!handle_interaction(&mut w, Interaction::DiscardLoot));
    }
}
