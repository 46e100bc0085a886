//! Path: native/game_simulation/src/world/boss.rs
//! Summary: ボスのフェーズ状態（BossState）

use game_core::boss::{BossPhase, BossProfile};
use serde::{Deserialize, Serialize};

/// ボス状態。プロファイルはスポーン時に複製し、スナップショット単体で再開できるようにする
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    pub phase:   BossPhase,
    pub profile: BossProfile,
}

impl BossState {
    pub fn new(profile: BossProfile) -> Self {
        Self { phase: BossPhase::First, profile }
    }

    pub fn is_final_phase(&self) -> bool {
        self.phase >= self.profile.final_phase()
    }

    pub fn is_second_phase(&self) -> bool {
        self.phase >= BossPhase::Second
    }
}
