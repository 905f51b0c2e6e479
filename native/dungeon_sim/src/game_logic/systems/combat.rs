//! Path: native/dungeon_sim/src/game_logic/systems/combat.rs
//! Summary: ダメージ解決（プレイヤー被弾・敵撃破・ボス被弾）とプレイヤー攻撃（近接 / 弓）

use crate::game_logic::gate;
use crate::world::{FrameEvent, GameWorld, Launch};
use dungeon_core::constants::{ARROW_BASE_RANGE, ARROW_SPEED, ENEMY_SIZE};
use dungeon_core::entity_params::ProjectileKind;
use dungeon_core::loot::WeaponKind;

/// プレイヤーにダメージを与える。死亡・無敵時間・回避なら false。
pub(crate) fn damage_player(w: &mut GameWorld, amount: f32) -> bool {
    if !w.player.alive || w.player.is_invulnerable(w.now) {
        return false;
    }
    if w.rules.dodges(&w.player, &mut w.rngs.combat) {
        log::debug!("player dodged {amount:.1} damage");
        return false;
    }
    if !w.player.take_damage(amount, w.now) {
        return false;
    }
    w.frame_events.push(FrameEvent::PlayerDamaged { damage: amount });
    if !w.player.alive {
        log::info!("player died at t={:.2}", w.now);
        w.frame_events.push(FrameEvent::PlayerDied);
    }
    true
}

/// 添字 `i` の敵にダメージを与える。撃破したら報酬（吸血回復・イベント）を処理して true。
pub(crate) fn damage_enemy(w: &mut GameWorld, i: usize, amount: f32) -> bool {
    if !w.enemies.damage(i, amount, w.now) {
        return false;
    }
    let enemy = &w.enemies.enemies[i];
    let (enemy_kind, room) = (enemy.kind, enemy.home);
    w.kill_count += 1;
    w.frame_events.push(FrameEvent::EnemyKilled { enemy_kind, room });
    let heal = w.rules.heal_on_kill(&w.player);
    if heal > 0.0 {
        w.player.heal(heal);
    }
    true
}

/// 添字 `bi` のボスにダメージを与える。無敵時間中なら false。
/// フェーズ移行と撃破はここでイベントにする。
pub(crate) fn damage_boss(w: &mut GameWorld, bi: usize, amount: f32) -> bool {
    let Some(boss) = w.bosses.get_mut(bi) else {
        return false;
    };
    let phase_before = boss.phase;
    if !boss.take_damage(amount, w.now) {
        return false;
    }
    let boss_kind = boss.kind;
    if boss.phase != phase_before {
        w.frame_events.push(FrameEvent::BossEnraged { boss_kind });
    }
    if !boss.alive {
        w.frame_events.push(FrameEvent::BossDefeated { boss_kind });
        let heal = w.rules.heal_on_kill(&w.player);
        if heal > 0.0 {
            w.player.heal(heal);
        }
    }
    true
}

/// 攻撃入力の処理。近接は射程内の可視な敵とボスすべてに当たり、弓は矢を 1 本撃つ。
pub(crate) fn player_attack(w: &mut GameWorld, pressed: bool) {
    if !pressed || !w.player.alive || !w.player.attack_ready(w.now) {
        return;
    }
    w.player.last_attack = Some(w.now);
    let damage = w
        .rules
        .outgoing_damage(&w.player, w.player.base_damage(), &mut w.rngs.combat);

    if let Some(weapon) = w.player.weapon.filter(|wp| wp.kind == WeaponKind::Bow) {
        let (cx, cy) = w.player.center();
        let (fx, fy) = w.player.facing;
        let launch = Launch {
            vx: fx * ARROW_SPEED,
            vy: fy * ARROW_SPEED,
            damage,
            max_range: Some(ARROW_BASE_RANGE + weapon.range_bonus),
            ..Launch::toward_angle(ProjectileKind::Arrow, cx, cy, 0.0, 0.0)
        };
        w.projectiles.spawn(launch, w.now);
        log::trace!("arrow fired: damage={damage:.1}");
        return;
    }

    let range = w.player.attack_range();
    let (px, py) = w.player.center();
    let mut buf = std::mem::take(&mut w.query_buf);
    w.collision.query_nearby_into(px, py, range + ENEMY_SIZE, &mut buf);
    let targets: Vec<usize> = buf
        .iter()
        .copied()
        .filter(|&i| {
            let e = &w.enemies.enemies[i];
            e.alive
                && gate::is_body_visible(&w.map, &e.body)
                && w.player.body.distance_to(&e.body) <= range
        })
        .collect();
    w.query_buf = buf;
    for i in targets {
        damage_enemy(w, i, damage);
    }

    let boss_targets: Vec<usize> = w
        .bosses
        .iter()
        .enumerate()
        .filter(|(_, b)| {
            b.alive
                && gate::is_body_visible(&w.map, &b.body)
                && w.player.body.distance_to(&b.body) <= range
        })
        .map(|(bi, _)| bi)
        .collect();
    for bi in boss_targets {
        damage_boss(w, bi, damage);
    }
}
