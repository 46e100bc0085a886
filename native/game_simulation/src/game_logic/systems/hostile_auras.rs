//! Path: native/game_simulation/src/game_logic/systems/hostile_auras.rs
//! Summary: 敵オーラ（プレイヤーへのデバフ・自己回復 / DR）と離散トリガー（ガード・激昂・突風）

use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{FrameEvent, GameWorld, HostileTotals, StatusLabel, TimerKind};
use game_core::aura::{HostileAuraEffect, HostileTrigger};
use game_core::constants::MIN_SLOW_FACTOR;
use game_core::util::{dist_sq, normalize, tick_down};

pub(crate) fn update_hostile_auras(w: &mut GameWorld, dt: f32) {
    let GameWorld { enemies, player, content, debuffs, frame_events, outbox, .. } = &mut *w;
    let caps = content.hostile_caps;
    let (px, py) = (player.actor.x(), player.actor.y());
    let player_alive = !player.actor.is_defeated();

    if !player.actor.timers.is_active(TimerKind::GustSlow) {
        player.gust_slow = 1.0;
    }

    let mut totals = HostileTotals::default();
    for enemy in enemies.iter_mut() {
        if enemy.actor.is_defeated() {
            continue;
        }
        let timers = &enemy.actor.timers;
        if !timers.is_active(TimerKind::Guard) {
            enemy.guard_dr = 0.0;
        }
        if !timers.is_active(TimerKind::Enrage) {
            enemy.enrage_dr = 0.0;
            enemy.enrage_speed_mult = 1.0;
        }
        enemy.aura_dr = 0.0;

        let Some(def) = content.hostile_aura(&enemy.identity) else {
            continue;
        };
        let (ex, ey) = (enemy.actor.x(), enemy.actor.y());
        let d2 = dist_sq(ex, ey, px, py);

        let mut regen = 0.0;
        for effect in &def.effects {
            match *effect {
                HostileAuraEffect::PlayerSlow { value, radius } => {
                    if player_alive && d2 <= radius * radius {
                        totals.player_slow += value;
                    }
                }
                HostileAuraEffect::ReachPenalty { value, radius } => {
                    if player_alive && d2 <= radius * radius {
                        totals.reach_penalty += value;
                    }
                }
                HostileAuraEffect::SelfRegen { value } => regen += value,
                HostileAuraEffect::SelfDr { value } => enemy.aura_dr += value,
            }
        }
        enemy.aura_dr = enemy.aura_dr.clamp(0.0, caps.self_dr);
        let regen = regen.clamp(0.0, caps.self_regen);
        if regen > 0.0 {
            enemy.actor.hp = (enemy.actor.hp + regen * dt).min(enemy.actor.max_hp);
        }

        if enemy.trigger_cooldowns.len() != def.triggers.len() {
            enemy.trigger_cooldowns.resize(def.triggers.len(), 0.0);
        }
        for (trigger, cd) in def.triggers.iter().zip(enemy.trigger_cooldowns.iter_mut()) {
            tick_down(cd, dt);
            if *cd > 0.0 {
                continue;
            }
            match *trigger {
                HostileTrigger::Guard { radius, cooldown, duration, dr } => {
                    if !player_alive || d2 > radius * radius {
                        continue;
                    }
                    *cd = cooldown;
                    enemy.actor.timers.set(TimerKind::Guard, duration);
                    enemy.guard_dr = dr;
                    frame_events.push(FrameEvent::StatusText { x: ex, y: ey, status: StatusLabel::Guard });
                    outbox.push(SideEffect::Cue(AudioCue::Guard));
                }
                HostileTrigger::Enrage { hp_ratio, cooldown, duration, speed_mult, dr } => {
                    let ratio = enemy.actor.hp / enemy.actor.max_hp.max(1e-6);
                    if ratio > hp_ratio {
                        continue;
                    }
                    *cd = cooldown;
                    enemy.actor.timers.set(TimerKind::Enrage, duration);
                    enemy.enrage_speed_mult = speed_mult.max(0.0);
                    enemy.enrage_dr = dr;
                    frame_events.push(FrameEvent::StatusText { x: ex, y: ey, status: StatusLabel::Enrage });
                    outbox.push(SideEffect::Cue(AudioCue::Enrage));
                    log::debug!("enemy {} enraged at {:.0}% hp", enemy.actor.id, ratio * 100.0);
                }
                HostileTrigger::Gust { radius, cooldown, push, slow, slow_duration } => {
                    if !player_alive || d2 > radius * radius {
                        continue;
                    }
                    *cd = cooldown;
                    let (dx, dy) = normalize(px - ex, py - ey);
                    player.actor.add_knockback(dx * push, dy * push);
                    player.gust_slow = (1.0 - slow).clamp(MIN_SLOW_FACTOR, 1.0);
                    player.actor.timers.set(TimerKind::GustSlow, slow_duration);
                    frame_events.push(FrameEvent::StatusText { x: px, y: py, status: StatusLabel::Slow });
                    outbox.push(SideEffect::Cue(AudioCue::Gust));
                }
            }
        }
    }
    totals.clamp_to(&caps);
    *debuffs = totals;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use game_core::aura::HostileAuraDef;
    use game_core::enemy::EnemyClass;

    fn world_with(identity: &str, def: HostileAuraDef) -> GameWorld {
        let mut content = ContentPack::default();
        content.hostile_auras.insert(identity.to_string(), def);
        let mut w = GameWorld::new(content);
        w.place_player(200.0, 200.0);
        w
    }

    #[test]
    fn player_slow_stacks_up_to_cap() {
        let def = HostileAuraDef {
            effects: vec![HostileAuraEffect::PlayerSlow { value: 0.3, radius: 100.0 }],
            triggers: Vec::new(),
        };
        let mut w = world_with("chill", def);
        w.spawn_enemy(EnemyClass::Mook, "chill", 220.0, 200.0);
        w.spawn_enemy(EnemyClass::Mook, "chill", 180.0, 200.0);
        update_hostile_auras(&mut w, 0.016);
        assert_eq!(w.debuffs.player_slow, w.content.hostile_caps.player_slow);
    }

    #[test]
    fn enrage_fires_below_threshold_once_per_cooldown() {
        let def = HostileAuraDef {
            effects: Vec::new(),
            triggers: vec![HostileTrigger::Enrage {
                hp_ratio: 0.5,
                cooldown: 10.0,
                duration: 3.0,
                speed_mult: 1.4,
                dr: 1.0,
            }],
        };
        let mut w = world_with("brute", def);
        let id = w.spawn_enemy(EnemyClass::Featured, "brute", 600.0, 600.0);
        update_hostile_auras(&mut w, 0.016);
        assert!(!w.enemies[0].actor.timers.is_active(TimerKind::Enrage));

        if let Some(e) = w.enemy_mut(id) {
            e.actor.hp = 5.0;
        }
        update_hostile_auras(&mut w, 0.016);
        let e = &w.enemies[0];
        assert!(e.actor.timers.is_active(TimerKind::Enrage));
        assert_eq!(e.enrage_speed_mult, 1.4);
        assert_eq!(e.temp_dr(), 1.0);
        assert!(e.trigger_cooldowns[0] > 9.0);
    }

    #[test]
    fn guard_dr_lapses_while_enrage_continues() {
        let def = HostileAuraDef {
            effects: Vec::new(),
            triggers: vec![
                HostileTrigger::Guard { radius: 100.0, cooldown: 30.0, duration: 1.0, dr: 5.0 },
                HostileTrigger::Enrage { hp_ratio: 0.5, cooldown: 30.0, duration: 10.0, speed_mult: 1.2, dr: 1.0 },
            ],
        };
        let mut w = world_with("bulwark", def);
        w.spawn_enemy(EnemyClass::Featured, "bulwark", 220.0, 200.0);
        w.enemies[0].actor.hp = 1.0;
        update_hostile_auras(&mut w, 0.016);
        assert_eq!(w.enemies[0].temp_dr(), 5.0);

        w.enemies[0].actor.timers.set(TimerKind::Guard, 0.0);
        update_hostile_auras(&mut w, 0.016);
        let e = &w.enemies[0];
        assert!(e.actor.timers.is_active(TimerKind::Enrage));
        assert_eq!(e.guard_dr, 0.0);
        assert_eq!(e.temp_dr(), 1.0);
    }

    #[test]
    fn gust_pushes_and_slows_player() {
        let def = HostileAuraDef {
            effects: Vec::new(),
            triggers: vec![HostileTrigger::Gust {
                radius: 80.0,
                cooldown: 4.0,
                push: 300.0,
                slow: 0.4,
                slow_duration: 1.0,
            }],
        };
        let mut w = world_with("wind", def);
        w.spawn_enemy(EnemyClass::Featured, "wind", 150.0, 200.0);
        update_hostile_auras(&mut w, 0.016);
        assert!(w.player.actor.knockback_x > 0.0);
        assert!((w.player.gust_slow - 0.6).abs() < 1e-6);
        assert!(w.player.actor.timers.is_active(TimerKind::GustSlow));
        assert!(w.outbox.contains(&SideEffect::Cue(AudioCue::Gust)));
    }

    #[test]
    fn self_regen_is_capped() {
        let def = HostileAuraDef {
            effects: vec![HostileAuraEffect::SelfRegen { value: 50.0 }, HostileAuraEffect::SelfDr { value: 9.0 }],
            triggers: Vec::new(),
        };
        let mut w = world_with("troll", def);
        w.spawn_enemy(EnemyClass::Featured, "troll", 600.0, 600.0);
        w.enemies[0].actor.hp = 1.0;
        update_hostile_auras(&mut w, 1.0);
        let caps = w.content.hostile_caps;
        assert!((w.enemies[0].actor.hp - (1.0 + caps.self_regen)).abs() < 1e-5);
        assert_eq!(w.enemies[0].aura_dr, caps.self_dr);
    }
}
