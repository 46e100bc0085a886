//! Path: native/game_simulation/src/game_logic/behavior/dash.rs
//! Summary: 予告付き突進（予告 → 方向固定の突進 → 揺らぎ付きクールダウン）

use super::{Intent, Sense};
use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{Enemy, Maneuver, TimerKind};
use game_core::physics::rng::SimpleRng;
use game_core::tuning::DashTuning;

/// 突進後のクールダウン。揺らぎの符号にかかわらず下限を下回らない
pub fn roll_cooldown(t: &DashTuning, rng: &mut SimpleRng) -> f32 {
    (t.cooldown_base + rng.signed() * t.cooldown_jitter).max(t.cooldown_floor)
}

/// 新しく突進を始められるか
fn can_start(enemy: &Enemy, t: &DashTuning, sense: &Sense) -> bool {
    let timers = &enemy.actor.timers;
    sense.aggro
        && sense.los
        && !timers.is_active(TimerKind::Brace)
        && !timers.is_active(TimerKind::Advance)
        && !timers.is_active(TimerKind::Juke)
        && !timers.is_active(TimerKind::Cover)
        && !timers.is_active(TimerKind::DashCooldown)
        && sense.dist >= t.min_dist
        && sense.dist <= t.max_dist
}

/// 突進シーケンスを 1 フレーム進める。突進関連の行動中なら Some
pub fn update(
    enemy: &mut Enemy,
    tuning: Option<&DashTuning>,
    sense: &Sense,
    dt: f32,
    rng: &mut SimpleRng,
    outbox: &mut Vec<SideEffect>,
) -> Option<Intent> {
    let Some(t) = tuning else {
        enemy.actor.timers.clear(TimerKind::DashTelegraph);
        enemy.actor.timers.clear(TimerKind::DashActive);
        return None;
    };

    if enemy.actor.timers.is_active(TimerKind::DashTelegraph) {
        if enemy.actor.timers.tick_edge(TimerKind::DashTelegraph, dt) {
            // 予告終了の瞬間の方向で固定する
            enemy.ai.dash_x = sense.dir.0;
            enemy.ai.dash_y = sense.dir.1;
            enemy.actor.timers.set(TimerKind::DashActive, t.duration);
            outbox.push(SideEffect::Cue(AudioCue::Dash));
            log::debug!("enemy {} dash released", enemy.actor.id);
            return Some(Intent::locked((enemy.ai.dash_x, enemy.ai.dash_y), t.speed_mult, Maneuver::Dash));
        }
        return Some(Intent::locked(sense.dir, t.telegraph_speed_mult, Maneuver::DashTelegraph));
    }

    if enemy.actor.timers.is_active(TimerKind::DashActive) {
        let heading = (enemy.ai.dash_x, enemy.ai.dash_y);
        if enemy.actor.timers.tick_edge(TimerKind::DashActive, dt) {
            let cooldown = roll_cooldown(t, rng);
            enemy.actor.timers.set(TimerKind::DashCooldown, cooldown);
        }
        return Some(Intent::locked(heading, t.speed_mult, Maneuver::Dash));
    }

    if can_start(enemy, t, sense) {
        enemy.actor.timers.set(TimerKind::DashTelegraph, t.telegraph);
        log::debug!("enemy {} dash telegraph at dist {:.1}", enemy.actor.id, sense.dist);
        return Some(Intent::locked(sense.dir, t.telegraph_speed_mult, Maneuver::DashTelegraph));
    }
    None
}

/// 突進中に受けるノックバック倍率
pub fn knockback_mult(enemy: &Enemy, tuning: Option<&DashTuning>) -> f32 {
    match tuning {
        Some(t) if enemy.actor.timers.is_active(TimerKind::DashActive) => t.knockback_mult,
        _ => 1.0,
    }
}
