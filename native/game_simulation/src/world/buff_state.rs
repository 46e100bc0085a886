//! Path: native/game_simulation/src/world/buff_state.rs
//! Summary: バフ / デバフの集計結果と、トリガーによる時間制限ボーナス

use game_core::aura::{BuffCaps, HostileCaps};
use game_core::util::tick_down;
use serde::{Deserialize, Serialize};

/// 仲間オーラの合計値（毎フレーム作り直す）
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct BuffTotals {
    pub atk:        f32,
    pub dr:         f32,
    pub regen:      f32,
    pub range:      f32,
    pub touch_dr:   f32,
    pub ranged_dr:  f32,
    pub aspd:       f32,
    pub crit:       f32,
    pub deflect:    f32,
    pub dash_cdr:   f32,
    pub water_walk: bool,
}

impl BuffTotals {
    pub fn clamp_to(&mut self, caps: &BuffCaps) {
        self.atk = self.atk.clamp(0.0, caps.atk);
        self.dr = self.dr.clamp(0.0, caps.dr);
        self.regen = self.regen.clamp(0.0, caps.regen);
        self.range = self.range.clamp(0.0, caps.range);
        self.touch_dr = self.touch_dr.clamp(0.0, caps.touch_dr);
        self.ranged_dr = self.ranged_dr.clamp(0.0, caps.ranged_dr);
        self.aspd = self.aspd.clamp(0.0, caps.aspd);
        self.crit = self.crit.clamp(0.0, caps.crit);
        self.deflect = self.deflect.clamp(0.0, caps.deflect);
        self.dash_cdr = self.dash_cdr.clamp(0.0, caps.dash_cdr);
    }
}

/// 値と残り時間のペア。残り時間が 0 になったら値も 0
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct TimedBonus {
    pub value:     f32,
    pub remaining: f32,
}

impl TimedBonus {
    pub fn grant(&mut self, value: f32, duration: f32) {
        self.value = self.value.max(value);
        self.remaining = self.remaining.max(duration);
    }

    pub fn current(&self) -> f32 {
        if self.remaining > 0.0 { self.value } else { 0.0 }
    }

    pub fn decay(&mut self, dt: f32) {
        tick_down(&mut self.remaining, dt);
        if self.remaining <= 0.0 {
            self.value = 0.0;
        }
    }
}

/// 仲間トリガーで得た一時ボーナス
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct TempBonuses {
    pub atk:      TimedBonus,
    pub range:    TimedBonus,
    pub aspd:     TimedBonus,
    pub touch_dr: TimedBonus,
}

impl TempBonuses {
    pub fn decay(&mut self, dt: f32) {
        self.atk.decay(dt);
        self.range.decay(dt);
        self.aspd.decay(dt);
        self.touch_dr.decay(dt);
    }
}

/// 敵オーラによるプレイヤーへのデバフ合計
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct HostileTotals {
    /// 移動速度の低下率（0..=cap）
    pub player_slow:   f32,
    /// 近接リーチの減少量
    pub reach_penalty: f32,
}

impl HostileTotals {
    pub fn clamp_to(&mut self, caps: &HostileCaps) {
        self.player_slow = self.player_slow.clamp(0.0, caps.player_slow);
        self.reach_penalty = self.reach_penalty.clamp(0.0, caps.reach_penalty);
    }
}
