//! Path: native/game_simulation/src/world/mode.rs
//! Summary: シミュレーションモード（通常 / ポーズ / ボス演出）とカメラ

use serde::{Deserialize, Serialize};

/// ボスのフェーズ移行演出。静止 → カメラパン → プロンプト表示の順に進む
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cinematic {
    pub pause_left: f32,
    pub pan_left:   f32,
    pub pan_from:   (f32, f32),
    pub pan_target: (f32, f32),
    pub prompt:     Option<String>,
}

impl Cinematic {
    /// 現在のパン補間係数（0 = 開始位置, 1 = 目標）
    pub fn pan_progress(&self, pan_duration: f32) -> f32 {
        if pan_duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.pan_left / pan_duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.pause_left <= 0.0 && self.pan_left <= 0.0
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub enum SimMode {
    #[default]
    Running,
    /// 入力層のポーズ / チャット
    Paused,
    Cinematic(Cinematic),
}

impl SimMode {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    /// 目標へ指数的に追従する
    pub fn follow(&mut self, tx: f32, ty: f32, dt: f32) {
        let k = 1.0 - (-8.0 * dt).exp();
        self.x += (tx - self.x) * k;
        self.y += (ty - self.y) * k;
    }

    pub fn lerp(from: (f32, f32), to: (f32, f32), t: f32) -> Self {
        Self {
            x: from.0 + (to.0 - from.0) * t,
            y: from.1 + (to.1 - from.1) * t,
        }
    }
}
