//! Path: native/game_simulation/src/game_logic/systems/boss.rs
//! Summary: ボスのフェーズ移行（HP 全快・強化・演出予約）と、フレーム末尾の撃破処理

use super::items::spawn_pickup;
use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{Cinematic, Enemy, FrameEvent, GameWorld, SimMode};
use game_core::constants::{CAMERA_PAN_DURATION, PHASE_PAUSE_DURATION};

/// フェーズ移行を 1 段進める。最終フェーズなら何もせず false
pub fn advance_phase(enemy: &mut Enemy) -> bool {
    let Some(boss) = enemy.boss.as_mut() else {
        return false;
    };
    if boss.is_final_phase() {
        return false;
    }
    let Some(next) = boss.phase.next() else {
        return false;
    };
    boss.phase = next;
    let p = &boss.profile;
    enemy.actor.hp = enemy.actor.max_hp;
    enemy.touch_damage += p.touch_damage_step;
    enemy.true_damage += p.true_damage_step;
    enemy.hit_cooldown = (enemy.hit_cooldown * p.hit_cooldown_factor).max(0.05);
    enemy.actor.speed *= p.speed_factor;
    enemy.actor.knockback_x = 0.0;
    enemy.actor.knockback_y = 0.0;
    true
}

/// HP が尽きたボスのうち、フェーズが残っているものを次のフェーズへ移す
pub(crate) fn update_boss_phases(w: &mut GameWorld) {
    let mut shifted: Vec<((f32, f32), Option<String>)> = Vec::new();
    for enemy in w.enemies.iter_mut() {
        if !enemy.actor.is_defeated() {
            continue;
        }
        let Some(from) = enemy.boss.as_ref().map(|b| b.phase) else {
            continue;
        };
        if !advance_phase(enemy) {
            continue;
        }
        let phase = enemy.boss.as_ref().map(|b| b.phase).unwrap_or(from);
        let prompt = enemy
            .boss
            .as_ref()
            .and_then(|b| b.profile.prompt_for(from))
            .map(str::to_owned);
        log::info!(
            "boss {} ({}) entered phase {}",
            enemy.actor.id,
            enemy.identity,
            phase.number()
        );
        w.frame_events.push(FrameEvent::BossPhaseShift { id: enemy.actor.id, phase });
        w.frame_events.push(FrameEvent::ScreenShake { intensity: 8.0, duration: 0.6 });
        w.outbox.push(SideEffect::Cue(AudioCue::PhaseQuake));
        shifted.push(((enemy.actor.x(), enemy.actor.y()), prompt));
    }

    for (target, prompt) in shifted {
        if w.mode.is_running() {
            w.mode = SimMode::Cinematic(Cinematic {
                pause_left: PHASE_PAUSE_DURATION,
                pan_left: CAMERA_PAN_DURATION,
                pan_from: (w.camera.x, w.camera.y),
                pan_target: target,
                prompt,
            });
        } else if let Some(prompt) = prompt {
            // 別の演出中はプロンプトだけ積む
            w.pending_prompts.push_back(prompt);
        }
    }
}

/// 撃破済みの敵を取り除き、報酬と進行の副作用を積む
pub(crate) fn reap_defeated(w: &mut GameWorld) {
    if !w.enemies.iter().any(|e| e.actor.is_defeated()) {
        return;
    }
    let (defeated, alive): (Vec<Enemy>, Vec<Enemy>) =
        std::mem::take(&mut w.enemies).into_iter().partition(|e| e.actor.is_defeated());
    w.enemies = alive;

    for e in defeated {
        let (x, y) = (e.actor.x(), e.actor.y());
        let id = e.actor.id;
        w.kill_count += 1;
        w.frame_events.push(FrameEvent::EnemyDefeated { id, class: e.class, x, y });
        w.frame_events.push(FrameEvent::Sparkle { x, y, count: 10 });
        let xp = e.class.xp_reward();
        w.player.xp += xp;
        w.outbox.push(SideEffect::GrantXp(xp));
        w.cue(AudioCue::Defeat);
        if let Some(quest_id) = e.quest {
            w.outbox.push(SideEffect::QuestProgress { quest_id, delta: 1 });
        }
        if let Some((kind, value)) = w.content.loot.roll_for_class(e.class, &mut w.rng) {
            spawn_pickup(w, x, y, kind, value);
        }

        if let Some(boss) = e.boss {
            log::info!("boss {} ({}) defeated", id, e.identity);
            w.frame_events.push(FrameEvent::BossDefeated { id });
            w.frame_events.push(FrameEvent::ScreenShake { intensity: 10.0, duration: 0.8 });
            let profile = boss.profile;
            if let Some(flag) = profile.story_flag {
                w.outbox.push(SideEffect::WorldFlag { flag, value: true });
            }
            if let Some(quest_id) = profile.quest_id {
                w.outbox.push(SideEffect::QuestProgress { quest_id, delta: 1 });
            }
            if profile.level_transition {
                w.level_transition_pending = true;
            }
        }
    }
}

/// 予約済みのレベル遷移は、プロンプトが全部閉じられて通常モードに戻ってから通知する
pub(crate) fn update_level_transition(w: &mut GameWorld) {
    if w.level_transition_pending && w.pending_prompts.is_empty() && w.mode.is_running() {
        w.level_transition_pending = false;
        w.frame_events.push(FrameEvent::LevelTransitionReady);
        log::info!("level transition ready at frame {}", w.frame_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use game_core::boss::{BossPhase, BossProfile};
    use game_core::enemy::EnemyClass;

    #[test]
    fn first_depletion_refills_and_escalates() {
        let mut w = GameWorld::new(ContentPack::default());
        let id = w.spawn_enemy(EnemyClass::Boss, "warden", 600.0, 400.0);
        let touch = w.enemies[0].touch_damage;
        w.enemies[0].actor.hp = 0.0;
        update_boss_phases(&mut w);
        reap_defeated(&mut w);
        let e = w.enemy(id).map(|e| (e.actor.hp, e.touch_damage, e.boss.clone()));
        let Some((hp, new_touch, Some(boss))) = e else {
            panic!("boss should remain active");
        };
        assert_eq!(hp, 50.0);
        assert!(new_touch >= touch + 2.0);
        assert!(boss.is_second_phase());
        assert!(matches!(w.mode, SimMode::Cinematic(_)));
    }

    #[test]
    fn final_phase_death_removes_boss() {
        let mut w = GameWorld::new(ContentPack::default());
        let id = w.spawn_enemy(EnemyClass::Boss, "warden", 600.0, 400.0);
        for _ in 0..2 {
            if let Some(e) = w.enemy_mut(id) {
                e.actor.hp = 0.0;
            }
            update_boss_phases(&mut w);
            reap_defeated(&mut w);
        }
        assert!(w.enemy(id).is_none());
        assert!(w.frame_events.contains(&FrameEvent::BossDefeated { id }));
        assert_eq!(w.kill_count, 1);
    }

    #[test]
    fn second_shift_during_cinematic_queues_prompt() {
        let mut content = ContentPack::default();
        content.boss_profiles.insert(
            "seer".into(),
            BossProfile {
                prompts: vec!["first".into(), "second".into()],
                ..BossProfile::three_phase()
            },
        );
        let mut w = GameWorld::new(content);
        let id = w.spawn_enemy(EnemyClass::Boss, "seer", 600.0, 400.0);
        for _ in 0..2 {
            if let Some(e) = w.enemy_mut(id) {
                e.actor.hp = 0.0;
            }
            update_boss_phases(&mut w);
        }
        assert_eq!(w.enemy(id).and_then(|e| e.boss.as_ref()).map(|b| b.phase), Some(BossPhase::Third));
        match &w.mode {
            SimMode::Cinematic(c) => assert_eq!(c.prompt.as_deref(), Some("first")),
            other => panic!("unexpected mode {:?}", other),
        }
        assert_eq!(w.pending_prompts.front().map(String::as_str), Some("second"));
    }

    #[test]
    fn story_boss_schedules_transition_after_prompts() {
        let mut content = ContentPack::default();
        content.boss_profiles.insert(
            "seer".into(),
            BossProfile { phases: 1, story_flag: Some("seer_down".into()), ..BossProfile::three_phase() },
        );
        let mut w = GameWorld::new(content);
        let id = w.spawn_enemy(EnemyClass::Boss, "seer", 600.0, 400.0);
        w.pending_prompts.push_back("epilogue".into());
        if let Some(e) = w.enemy_mut(id) {
            e.actor.hp = 0.0;
        }
        update_boss_phases(&mut w);
        reap_defeated(&mut w);
        assert!(w.outbox.contains(&SideEffect::WorldFlag { flag: "seer_down".into(), value: true }));
        update_level_transition(&mut w);
        assert!(w.level_transition_pending);
        w.dismiss_prompt();
        update_level_transition(&mut w);
        assert!(!w.level_transition_pending);
        assert!(w.frame_events.contains(&FrameEvent::LevelTransitionReady));
    }
}
