//! Path: native/game_simulation/src/game_logic/physics_step.rs
//! Summary: 1 フレーム分のステップ（モードで一度だけ分岐し、各システムを決まった順に呼ぶ）

use super::behavior::update_enemies;
use super::context::SimContext;
use super::events::flush_outbox;
use super::systems::boss::{reap_defeated, update_boss_phases, update_level_transition};
use super::systems::buffs::update_buffs;
use super::systems::collision::{integrate_knockback_all, separate_crowd};
use super::systems::combat::resolve_contacts;
use super::systems::companions::update_companions;
use super::systems::hazards::update_hazards;
use super::systems::hostile_auras::update_hostile_auras;
use super::systems::items::update_pickups;
use super::systems::player::{update_player, update_player_death};
use super::systems::projectiles::update_projectiles;
use crate::collaborators::Collaborators;
use crate::world::{Camera, FrameEvent, FrameInput, GameWorld, SimMode};
use game_core::constants::{CAMERA_PAN_DURATION, FRAME_BUDGET_MS, MAX_DT};
use game_core::util::tick_down;

/// 1 ステップの結果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// クランプ後の dt
    pub dt: f32,
    /// 協調者に拒否された副作用の件数
    pub failed_side_effects: usize,
}

/// 経過秒数を [0, MAX_DT] に収める（NaN は 0）
pub fn clamp_dt(delta_seconds: f32) -> f32 {
    if delta_seconds.is_finite() {
        delta_seconds.clamp(0.0, MAX_DT)
    } else {
        0.0
    }
}

impl GameWorld {
    /// 1 フレーム進める。協調者への副作用は末尾でまとめて送る
    pub fn step(
        &mut self,
        delta_seconds: f32,
        input: &FrameInput,
        collab: &mut dyn Collaborators,
    ) -> StepOutcome {
        physics_step_inner(self, delta_seconds, input, collab)
    }
}

pub(crate) fn physics_step_inner(
    w: &mut GameWorld,
    delta_seconds: f32,
    input: &FrameInput,
    collab: &mut dyn Collaborators,
) -> StepOutcome {
    let dt = clamp_dt(delta_seconds);
    // trace にしておき、RUST_LOG=trace のときだけ毎フレーム出力する
    log::trace!("physics_step: dt={:.4}s frame_id={}", dt, w.frame_id);
    let t_start = std::time::Instant::now();

    w.frame_id = w.frame_id.wrapping_add(1);
    sync_pause(w, input);

    match w.mode {
        SimMode::Running => step_running(w, input, dt),
        SimMode::Paused => step_paused(w, dt),
        SimMode::Cinematic(_) => step_cinematic(w, dt),
    }

    let failed_side_effects = flush_outbox(w, collab);
    w.cap_frame_events();

    let elapsed_ms = t_start.elapsed().as_secs_f64() * 1000.0;
    w.last_frame_time_ms = elapsed_ms;
    if elapsed_ms > FRAME_BUDGET_MS {
        log::warn!(
            "frame budget exceeded: {:.2}ms (enemies: {}, projectiles: {})",
            elapsed_ms,
            w.enemies.len(),
            w.projectiles.len()
        );
    }
    StepOutcome { dt, failed_side_effects }
}

/// 入力層のポーズフラグを反映する。演出中は上書きしない
fn sync_pause(w: &mut GameWorld, input: &FrameInput) {
    match (&w.mode, input.paused) {
        (SimMode::Running, true) => w.mode = SimMode::Paused,
        (SimMode::Paused, false) => w.mode = SimMode::Running,
        _ => {}
    }
}

fn step_running(w: &mut GameWorld, input: &FrameInput, dt: f32) {
    w.elapsed_seconds += dt;
    tick_timers(w, dt);

    // ── バフ集計（仲間 → 敵オーラ）と地形 ──────────────────────
    update_buffs(w, dt);
    update_hostile_auras(w, dt);
    update_hazards(w, dt);

    // ── プレイヤー ───────────────────────────────────────────────
    update_player(w, input, dt);

    let ctx = SimContext::capture(w, dt);
    if w.flow.refresh(&w.field, ctx.player_x, ctx.player_y) {
        log::trace!("flow field rebuilt at frame {}", ctx.frame_id);
    }

    // ── 仲間・敵の移動 ───────────────────────────────────────────
    update_companions(w, dt);
    update_enemies(w, &ctx);
    integrate_knockback_all(w, dt);
    separate_crowd(w, dt);

    // ── 接触・弾 ─────────────────────────────────────────────────
    resolve_contacts(w, &ctx);
    w.rebuild_enemy_hash();
    update_projectiles(w, &ctx);

    // ── フェーズ移行・撃破（除去はここでまとめて行う）─────────────
    update_boss_phases(w);
    reap_defeated(w);
    update_player_death(w);
    update_pickups(w);
    update_level_transition(w);

    if w.mode.is_running() {
        w.camera.follow(w.player.actor.x(), w.player.actor.y(), dt);
    }
    advance_animation(w, dt);
}

/// ポーズ中は死亡演出のタイマーだけ進める
fn step_paused(w: &mut GameWorld, dt: f32) {
    w.player.actor.timers.tick_paused(dt);
    update_player_death(w);
}

/// 静止 → カメラパン → プロンプト表示準備の順に進め、終わったら通常モードへ戻す
fn step_cinematic(w: &mut GameWorld, dt: f32) {
    w.player.actor.timers.tick_paused(dt);
    update_player_death(w);

    let SimMode::Cinematic(c) = &mut w.mode else {
        return;
    };
    if c.pause_left > 0.0 {
        tick_down(&mut c.pause_left, dt);
    } else {
        tick_down(&mut c.pan_left, dt);
        w.camera = Camera::lerp(c.pan_from, c.pan_target, c.pan_progress(CAMERA_PAN_DURATION));
    }
    if !c.is_finished() {
        return;
    }
    let prompt = c.prompt.take();
    w.mode = SimMode::Running;
    log::debug!("cinematic finished at frame {}", w.frame_id);
    if let Some(prompt) = prompt {
        w.pending_prompts.push_back(prompt.clone());
        w.frame_events.push(FrameEvent::PromptReady { prompt });
    }
}

fn tick_timers(w: &mut GameWorld, dt: f32) {
    w.player.actor.timers.tick_all(dt);
    for e in w.enemies.iter_mut() {
        e.actor.timers.tick_all(dt);
    }
    for c in w.companions.iter_mut() {
        c.actor.timers.tick_all(dt);
    }
}

fn advance_animation(w: &mut GameWorld, dt: f32) {
    w.player.actor.anim_time += dt;
    for e in w.enemies.iter_mut() {
        e.actor.anim_time += dt;
    }
    for c in w.companions.iter_mut() {
        c.actor.anim_time += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::NullCollaborators;
    use crate::content::ContentPack;
    use crate::world::Cinematic;
    use game_core::constants::MAX_PENDING_FRAME_EVENTS;
    use game_core::enemy::EnemyClass;

    #[test]
    fn dt_is_clamped() {
        assert_eq!(clamp_dt(1.0), MAX_DT);
        assert_eq!(clamp_dt(-0.5), 0.0);
        assert_eq!(clamp_dt(f32::NAN), 0.0);
        assert_eq!(clamp_dt(0.01), 0.01);
    }

    #[test]
    fn paused_world_does_not_move() {
        let mut w = GameWorld::new(ContentPack::default());
        w.spawn_enemy(EnemyClass::Mook, "grunt", 700.0, 480.0);
        let before = (w.enemies[0].actor.x(), w.player.actor.x());
        let input = FrameInput { paused: true, move_x: 1.0, ..FrameInput::default() };
        for _ in 0..30 {
            w.step(1.0 / 60.0, &input, &mut NullCollaborators);
        }
        assert_eq!((w.enemies[0].actor.x(), w.player.actor.x()), before);
        assert_eq!(w.mode, SimMode::Paused);
        assert_eq!(w.elapsed_seconds, 0.0);

        let input = FrameInput { move_x: 1.0, ..FrameInput::default() };
        w.step(1.0 / 60.0, &input, &mut NullCollaborators);
        assert!(w.mode.is_running());
        assert!(w.player.actor.x() > before.1);
    }

    #[test]
    fn cinematic_ends_with_prompt() {
        let mut w = GameWorld::new(ContentPack::default());
        w.mode = SimMode::Cinematic(Cinematic {
            pause_left: 0.1,
            pan_left: 0.1,
            pan_from: (0.0, 0.0),
            pan_target: (100.0, 0.0),
            prompt: Some("awaken".into()),
        });
        // ポーズフラグでは演出を抜けない
        let input = FrameInput { paused: false, ..FrameInput::default() };
        for _ in 0..20 {
            w.step(1.0 / 60.0, &input, &mut NullCollaborators);
        }
        assert!(w.mode.is_running());
        assert_eq!(w.pending_prompts.front().map(String::as_str), Some("awaken"));
        assert!(w
            .drain_frame_events()
            .contains(&FrameEvent::PromptReady { prompt: "awaken".into() }));
    }

    #[test]
    fn undrained_frame_events_are_capped() {
        let mut w = GameWorld::new(ContentPack::default());
        for i in 0..(MAX_PENDING_FRAME_EVENTS + 40) {
            w.frame_events.push(FrameEvent::PromptReady { prompt: i.to_string() });
        }
        let input = FrameInput { paused: true, ..FrameInput::default() };
        w.step(1.0 / 60.0, &input, &mut NullCollaborators);
        assert_eq!(w.frame_events.len(), MAX_PENDING_FRAME_EVENTS);
        assert_eq!(w.frame_events[0], FrameEvent::PromptReady { prompt: "40".into() });
    }
}
