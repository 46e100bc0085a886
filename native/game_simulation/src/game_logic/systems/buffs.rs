//! Path: native/game_simulation/src/game_logic/systems/buffs.rs
//! Summary: 仲間オーラの毎フレーム集計（上限付き）と、仲間トリガーによる時限ボーナス

use crate::collaborators::{AudioCue, SideEffect};
use crate::content::ContentPack;
use crate::world::{BuffTotals, Companion, Enemy, FrameEvent, GameWorld, StatusLabel, TempBonuses};
use game_core::aura::{affinity_multiplier, AllyTriggerKind, AuraAnchor, AuraEffect, TriggerCondition};
use game_core::util::{dist_sq, tick_down};
use rustc_hash::FxHashMap;

/// 1 フレーム分の集計結果
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BuffAggregate {
    pub totals:     BuffTotals,
    /// 敵 ID → 減速率（上限適用済み）
    pub enemy_slow: FxHashMap<u32, f32>,
}

/// 仲間のオーラをゼロから集計し直す。状態を書き換えないので同じ入力なら同じ結果になる
pub fn compute_buff_totals(
    companions: &[Companion],
    enemies: &[Enemy],
    content: &ContentPack,
    temp: &TempBonuses,
    player: (f32, f32),
) -> BuffAggregate {
    let mut totals = BuffTotals::default();
    let mut enemy_slow: FxHashMap<u32, f32> = FxHashMap::default();

    for c in companions {
        let Some(def) = content.ally_aura(&c.identity) else {
            continue;
        };
        let m = affinity_multiplier(c.affinity, c.level);
        for effect in &def.effects {
            match *effect {
                AuraEffect::Atk { value } => totals.atk += value * m,
                AuraEffect::Dr { value } => totals.dr += value * m,
                AuraEffect::Regen { value } => totals.regen += value * m,
                AuraEffect::Range { value } => totals.range += value * m,
                AuraEffect::TouchDr { value } => totals.touch_dr += value * m,
                AuraEffect::RangedDr { value } => totals.ranged_dr += value * m,
                AuraEffect::Deflect { value } => totals.deflect += value * m,
                AuraEffect::Aspd { value } => totals.aspd += value * m,
                AuraEffect::Crit { value } => totals.crit += value * m,
                AuraEffect::DashCdr { value } => totals.dash_cdr += value * m,
                AuraEffect::WaterWalk => totals.water_walk = true,
                AuraEffect::Slow { value, radius, anchor } => {
                    let (ax, ay) = match anchor {
                        AuraAnchor::Player => player,
                        AuraAnchor::Ally => (c.actor.x(), c.actor.y()),
                    };
                    let r2 = radius * radius;
                    for e in enemies.iter().filter(|e| !e.actor.is_defeated()) {
                        if dist_sq(ax, ay, e.actor.x(), e.actor.y()) <= r2 {
                            *enemy_slow.entry(e.actor.id).or_default() += value * m;
                        }
                    }
                }
            }
        }
    }

    totals.atk += temp.atk.current();
    totals.range += temp.range.current();
    totals.aspd += temp.aspd.current();
    totals.touch_dr += temp.touch_dr.current();
    totals.clamp_to(&content.caps);
    for v in enemy_slow.values_mut() {
        *v = v.clamp(0.0, content.caps.slow);
    }
    BuffAggregate { totals, enemy_slow }
}

/// 集計 → 回復 → 時限ボーナス減衰 → 仲間トリガー
pub(crate) fn update_buffs(w: &mut GameWorld, dt: f32) {
    let player_pos = (w.player.actor.x(), w.player.actor.y());
    let agg = compute_buff_totals(&w.companions, &w.enemies, &w.content, &w.temp_bonuses, player_pos);
    w.buffs = agg.totals;
    w.enemy_slow = agg.enemy_slow;

    let player = &mut w.player;
    if !player.actor.is_defeated() && w.buffs.regen > 0.0 {
        player.actor.hp = (player.actor.hp + w.buffs.regen * dt).min(player.actor.max_hp);
    }
    w.temp_bonuses.decay(dt);
    fire_ally_triggers(w, dt);
}

fn fire_ally_triggers(w: &mut GameWorld, dt: f32) {
    let GameWorld { companions, player, content, temp_bonuses, frame_events, outbox, .. } = &mut *w;
    // 直前フレームの被弾を 1 回だけ評価する
    let hurt = std::mem::take(&mut player.hurt_this_frame);
    let alive = !player.actor.is_defeated();
    let hp_ratio = if player.actor.max_hp > 0.0 { player.actor.hp / player.actor.max_hp } else { 0.0 };
    let (px, py) = (player.actor.x(), player.actor.y());

    for c in companions.iter_mut() {
        let Some(def) = content.ally_aura(&c.identity) else {
            continue;
        };
        if c.trigger_cooldowns.len() != def.triggers.len() {
            c.trigger_cooldowns.resize(def.triggers.len(), 0.0);
        }
        let m = affinity_multiplier(c.affinity, c.level);
        for (trigger, cd) in def.triggers.iter().zip(c.trigger_cooldowns.iter_mut()) {
            tick_down(cd, dt);
            if *cd > 0.0 || !alive {
                continue;
            }
            let ready = match trigger.condition {
                TriggerCondition::Periodic => true,
                TriggerCondition::PlayerHurt => hurt,
                TriggerCondition::PlayerHealthBelow { ratio } => hp_ratio <= ratio,
            };
            if !ready {
                continue;
            }
            *cd = trigger.cooldown;
            let value = trigger.value * m;
            let status = match trigger.kind {
                AllyTriggerKind::Rally => {
                    temp_bonuses.atk.grant(value, trigger.duration);
                    StatusLabel::Rally
                }
                AllyTriggerKind::Focus => {
                    temp_bonuses.range.grant(value, trigger.duration);
                    StatusLabel::Focus
                }
                AllyTriggerKind::Haste => {
                    temp_bonuses.aspd.grant(value, trigger.duration);
                    StatusLabel::Haste
                }
                AllyTriggerKind::Bulwark => {
                    temp_bonuses.touch_dr.grant(value, trigger.duration);
                    StatusLabel::Bulwark
                }
                AllyTriggerKind::Ward => {
                    player.shield_ready = true;
                    outbox.push(SideEffect::Cue(AudioCue::Shield));
                    StatusLabel::Shield
                }
            };
            frame_events.push(FrameEvent::StatusText { x: px, y: py, status });
            log::debug!("ally {} trigger {:?} fired", c.identity, trigger.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::aura::{AllyAuraDef, AllyTrigger};
    use game_core::enemy::EnemyClass;

    fn pack(identity: &str, def: AllyAuraDef) -> ContentPack {
        let mut content = ContentPack::default();
        content.ally_auras.insert(identity.to_string(), def);
        content
    }

    #[test]
    fn dr_scaled_by_affinity_and_level() {
        let content = pack("mira", AllyAuraDef {
            effects: vec![AuraEffect::Dr { value: 1.0 }],
            triggers: Vec::new(),
        });
        let c = Companion::new(2, "mira", 10.0, 3, 0.0, 0.0);
        let agg = compute_buff_totals(&[c], &[], &content, &TempBonuses::default(), (0.0, 0.0));
        assert!((agg.totals.dr - 1.8).abs() < 1e-5);
    }

    #[test]
    fn stacking_sources_never_exceed_caps() {
        let content = pack("mira", AllyAuraDef {
            effects: vec![
                AuraEffect::Atk { value: 5.0 },
                AuraEffect::Crit { value: 0.3 },
                AuraEffect::Slow { value: 0.4, radius: 500.0, anchor: AuraAnchor::Player },
            ],
            triggers: Vec::new(),
        });
        let companions: Vec<Companion> =
            (0..6).map(|i| Companion::new(10 + i, "mira", 10.0, 5, 0.0, 0.0)).collect();
        let enemies = vec![Enemy::new(50, EnemyClass::Mook, "grunt", 30.0, 0.0)];
        let agg = compute_buff_totals(&companions, &enemies, &content, &TempBonuses::default(), (0.0, 0.0));
        assert_eq!(agg.totals.atk, content.caps.atk);
        assert_eq!(agg.totals.crit, content.caps.crit);
        assert_eq!(agg.enemy_slow.get(&50).copied(), Some(content.caps.slow));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let content = pack("mira", AllyAuraDef {
            effects: vec![AuraEffect::Regen { value: 0.5 }, AuraEffect::Range { value: 6.0 }],
            triggers: Vec::new(),
        });
        let companions = vec![Companion::new(2, "mira", 4.0, 2, 0.0, 0.0)];
        let mut temp = TempBonuses::default();
        temp.atk.grant(1.0, 2.0);
        let a = compute_buff_totals(&companions, &[], &content, &temp, (0.0, 0.0));
        let b = compute_buff_totals(&companions, &[], &content, &temp, (0.0, 0.0));
        assert_eq!(a, b);
        assert_eq!(a.totals.atk, 1.0);
    }

    #[test]
    fn ally_slow_respects_anchor_radius() {
        let content = pack("fen", AllyAuraDef {
            effects: vec![AuraEffect::Slow { value: 0.2, radius: 50.0, anchor: AuraAnchor::Ally }],
            triggers: Vec::new(),
        });
        let companions = vec![Companion::new(2, "fen", 1.0, 1, 200.0, 200.0)];
        let enemies = vec![
            Enemy::new(7, EnemyClass::Mook, "near", 220.0, 200.0),
            Enemy::new(8, EnemyClass::Mook, "far", 10.0, 10.0),
        ];
        let agg = compute_buff_totals(&companions, &enemies, &content, &TempBonuses::default(), (0.0, 0.0));
        assert!((agg.enemy_slow[&7] - 0.2).abs() < 1e-6);
        assert!(!agg.enemy_slow.contains_key(&8));
    }

    #[test]
    fn hurt_trigger_grants_timed_bonus() {
        let content = pack("bo", AllyAuraDef {
            effects: Vec::new(),
            triggers: vec![AllyTrigger {
                kind: AllyTriggerKind::Bulwark,
                cooldown: 5.0,
                duration: 1.0,
                value: 1.0,
                condition: TriggerCondition::PlayerHurt,
            }],
        });
        let mut w = GameWorld::new(content);
        w.spawn_companion("bo", 1.0, 1, 100.0, 100.0);
        update_buffs(&mut w, 0.016);
        assert_eq!(w.temp_bonuses.touch_dr.current(), 0.0);

        w.player.hurt_this_frame = true;
        update_buffs(&mut w, 0.016);
        assert_eq!(w.temp_bonuses.touch_dr.current(), 1.0);
        assert!(!w.player.hurt_this_frame);
        // 次のフレームの集計に入る
        update_buffs(&mut w, 0.016);
        assert_eq!(w.buffs.touch_dr, 1.0);
        assert!(w.companions[0].trigger_cooldowns[0] > 4.0);
    }
}
