//! Path: native/game_simulation/src/game_logic/behavior/wander.rs
//! Summary: 索敵範囲外の徘徊（ランダム方向の再抽選と短い立ち止まり）

use super::Intent;
use crate::world::{Enemy, Maneuver, TimerKind};
use game_core::physics::rng::SimpleRng;
use game_core::tuning::GlobalTuning;

pub fn update(enemy: &mut Enemy, g: &GlobalTuning, rng: &mut SimpleRng) -> Intent {
    if !enemy.actor.timers.is_active(TimerKind::Wander) {
        let angle = rng.range(0.0, std::f32::consts::TAU);
        enemy.ai.wander_x = angle.cos();
        enemy.ai.wander_y = angle.sin();
        enemy.actor.timers.set(TimerKind::Wander, rng.range(g.wander_min, g.wander_max));
        if rng.chance(g.wander_idle_chance) {
            enemy.actor.timers.set(TimerKind::Idle, g.wander_idle_duration);
        }
    }
    if enemy.actor.timers.is_active(TimerKind::Idle) {
        return Intent::locked((0.0, 0.0), 0.0, Maneuver::Idle);
    }
    Intent::steered((enemy.ai.wander_x, enemy.ai.wander_y), g.wander_speed_mult, Maneuver::Wander)
}
