//! Path: native/game_simulation/src/world/status.rs
//! Summary: アクターごとの固定レイアウトのカウントダウンタイマー群（enum で添字付け）

use game_core::util::tick_down;
use serde::{Deserialize, Serialize};

/// タイマーの種類。全アクターが全種類を持ち、0 が非アクティブ
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum TimerKind {
    Invuln = 0,
    Burn,
    HazardSlow,
    GustSlow,
    Brace,
    Advance,
    HitWindow,
    RecentlyHit,
    DashTelegraph,
    DashActive,
    DashCooldown,
    Juke,
    JukeCooldown,
    Cover,
    CoverCooldown,
    ZigzagCommit,
    WallFollow,
    Wander,
    Idle,
    AttackCooldown,
    RangedCooldown,
    RecentlyFired,
    ContactCooldown,
    Guard,
    Enrage,
    DeathSequence,
}

pub const TIMER_COUNT: usize = TimerKind::DeathSequence as usize + 1;

impl TimerKind {
    /// 突進の予告→実行のように、0 になった瞬間を行動側で検出するタイマー。
    /// 一括減衰（`tick_all`）の対象外。
    pub fn is_sequenced(&self) -> bool {
        SEQUENCED.contains(self)
    }
}

const SEQUENCED: [TimerKind; 2] = [TimerKind::DashTelegraph, TimerKind::DashActive];

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusTimers {
    values: [f32; TIMER_COUNT],
}

impl StatusTimers {
    #[inline]
    pub fn get(&self, kind: TimerKind) -> f32 {
        self.values[kind as usize]
    }

    #[inline]
    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.values[kind as usize] > 0.0
    }

    #[inline]
    pub fn set(&mut self, kind: TimerKind, seconds: f32) {
        self.values[kind as usize] = seconds.max(0.0);
    }

    /// 現在値より長い場合だけ延長する
    pub fn extend(&mut self, kind: TimerKind, seconds: f32) {
        let v = &mut self.values[kind as usize];
        *v = v.max(seconds);
    }

    pub fn clear(&mut self, kind: TimerKind) {
        self.values[kind as usize] = 0.0;
    }

    /// 個別に減衰させ、このフレームで 0 に到達したら true
    pub fn tick_edge(&mut self, kind: TimerKind, dt: f32) -> bool {
        let v = &mut self.values[kind as usize];
        if *v <= 0.0 {
            return false;
        }
        tick_down(v, dt);
        *v <= 0.0
    }

    /// 順序付きタイマー以外をまとめて減衰させる
    pub fn tick_all(&mut self, dt: f32) {
        for (i, v) in self.values.iter_mut().enumerate() {
            if !SEQUENCED.iter().any(|k| *k as usize == i) {
                tick_down(v, dt);
            }
        }
    }

    /// 一時停止中に進めてよいタイマーだけ減衰させる
    pub fn tick_paused(&mut self, dt: f32) {
        tick_down(&mut self.values[TimerKind::DeathSequence as usize], dt);
    }
}
