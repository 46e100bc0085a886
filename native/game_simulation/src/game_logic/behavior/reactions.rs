//! Path: native/game_simulation/src/game_logic/behavior/reactions.rs
//! Summary: 被弾時の反応（踏ん張り・連続被弾での前進）と、それらを合成した倍率

use super::dash;
use crate::world::{Enemy, TimerKind};
use game_core::tuning::{ClassTuning, GlobalTuning};

/// 被弾したときに呼ぶ。精鋭クラスのみ踏ん張り・前進に入る
pub fn on_hit(enemy: &mut Enemy, t: &ClassTuning, g: &GlobalTuning) {
    let timers = &mut enemy.actor.timers;
    timers.set(TimerKind::RecentlyHit, g.recent_hit_window);
    if !enemy.class.is_elite() {
        return;
    }

    if let Some(b) = t.brace {
        timers.set(TimerKind::Brace, b.duration);
    }

    if let Some(a) = t.advance {
        if !timers.is_active(TimerKind::HitWindow) {
            enemy.actor.hit_streak = 0;
        }
        enemy.actor.hit_streak += 1;
        timers.set(TimerKind::HitWindow, a.window);
        if enemy.actor.hit_streak >= a.hits_required.max(1) {
            enemy.actor.hit_streak = 0;
            timers.set(TimerKind::Advance, a.duration);
            // 前進の後すぐ突進へつなげられるようにする
            let cd = timers.get(TimerKind::DashCooldown);
            timers.set(TimerKind::DashCooldown, cd.min(a.dash_cooldown_clamp));
            log::debug!("enemy {} advances under fire", enemy.actor.id);
        }
    }
}

/// 踏ん張り・前進・激昂の速度倍率（同時に有効なら掛け合わせる）
pub fn speed_mult(enemy: &Enemy, t: &ClassTuning) -> f32 {
    let timers = &enemy.actor.timers;
    let mut m = 1.0;
    if let Some(b) = t.brace {
        if timers.is_active(TimerKind::Brace) {
            m *= b.speed_mult;
        }
    }
    if let Some(a) = t.advance {
        if timers.is_active(TimerKind::Advance) {
            m *= a.speed_mult;
        }
    }
    if timers.is_active(TimerKind::Enrage) {
        m *= enemy.enrage_speed_mult;
    }
    m
}

/// 受けるノックバックの倍率
pub fn knockback_mult(enemy: &Enemy, t: &ClassTuning) -> f32 {
    let timers = &enemy.actor.timers;
    let mut m = t.knockback_taken;
    if let Some(b) = t.brace {
        if timers.is_active(TimerKind::Brace) {
            m *= b.knockback_mult;
        }
    }
    if let Some(a) = t.advance {
        if timers.is_active(TimerKind::Advance) {
            m *= a.knockback_mult;
        }
    }
    m * dash::knockback_mult(enemy, t.dash.as_ref())
}

/// 基本 DR + ガード / 激昂 + 踏ん張り + オーラ
pub fn effective_dr(enemy: &Enemy, t: &ClassTuning) -> f32 {
    let timers = &enemy.actor.timers;
    let mut dr = enemy.actor.dr + enemy.aura_dr;
    if timers.is_active(TimerKind::Guard) || timers.is_active(TimerKind::Enrage) {
        dr += enemy.temp_dr();
    }
    if let Some(b) = t.brace {
        if timers.is_active(TimerKind::Brace) {
            dr += b.dr_bonus;
        }
    }
    dr.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::enemy::EnemyClass;
    use game_core::tuning::TuningTable;

    #[test]
    fn mook_gets_no_reactions() {
        let table = TuningTable::default();
        let mut e = Enemy::new(1, EnemyClass::Mook, "m", 0.0, 0.0);
        for _ in 0..5 {
            on_hit(&mut e, &table.mook, &table.global);
        }
        assert!(!e.actor.timers.is_active(TimerKind::Brace));
        assert!(!e.actor.timers.is_active(TimerKind::Advance));
        assert_eq!(knockback_mult(&e, &table.mook), 1.0);
        assert_eq!(effective_dr(&e, &table.mook), 0.0);
    }

    #[test]
    fn streak_triggers_advance_and_clamps_dash_cooldown() {
        let table = TuningTable::default();
        let t = &table.featured;
        let mut e = Enemy::new(1, EnemyClass::Featured, "f", 0.0, 0.0);
        e.actor.timers.set(TimerKind::DashCooldown, 3.0);
        on_hit(&mut e, t, &table.global);
        assert!(e.actor.timers.is_active(TimerKind::Brace));
        assert!(!e.actor.timers.is_active(TimerKind::Advance));
        on_hit(&mut e, t, &table.global);
        assert!(e.actor.timers.is_active(TimerKind::Advance));
        let clamp = t.advance.expect("featured advance").dash_cooldown_clamp;
        assert!(e.actor.timers.get(TimerKind::DashCooldown) <= clamp);
    }

    #[test]
    fn brace_and_advance_combine_multiplicatively() {
        let table = TuningTable::default();
        let t = &table.featured;
        let mut e = Enemy::new(1, EnemyClass::Featured, "f", 0.0, 0.0);
        e.actor.timers.set(TimerKind::Brace, 1.0);
        e.actor.timers.set(TimerKind::Advance, 1.0);
        let b = t.brace.expect("brace");
        let a = t.advance.expect("advance");
        assert!((speed_mult(&e, t) - b.speed_mult * a.speed_mult).abs() < 1e-6);
        let kb = t.knockback_taken * b.knockback_mult * a.knockback_mult;
        assert!((knockback_mult(&e, t) - kb).abs() < 1e-6);
        assert!((effective_dr(&e, t) - b.dr_bonus).abs() < 1e-6);
    }

    #[test]
    fn streak_resets_after_window() {
        let table = TuningTable::default();
        let t = &table.featured;
        let mut e = Enemy::new(1, EnemyClass::Featured, "f", 0.0, 0.0);
        on_hit(&mut e, t, &table.global);
        e.actor.timers.clear(TimerKind::HitWindow);
        on_hit(&mut e, t, &table.global);
        assert!(!e.actor.timers.is_active(TimerKind::Advance));
        assert_eq!(e.actor.hit_streak, 1);
    }
}
