//! Path: native/game_simulation/src/world/player.rs
//! Summary: プレイヤー状態と、入力層から受け取る 1 フレーム分の入力

use super::actor::{Actor, ActorKind};
use game_core::constants::{PLAYER_HALF_EXTENT, PLAYER_MAX_HP, PLAYER_SPEED};
use serde::{Deserialize, Serialize};

/// 入力層から 1 フレーム遅れで届く入力
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// 正規化済みの移動意図
    pub move_x:         f32,
    pub move_y:         f32,
    pub attack:         bool,
    pub ranged_attack:  bool,
    pub interact:       bool,
    /// 回避ダッシュ
    pub dash:           bool,
    /// ポーズ / チャット中
    pub paused:         bool,
    /// 遠隔武器を構えているか
    pub ranged_equipped: bool,
}

/// プレイヤー状態
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub actor:           Actor,
    pub keys:            u32,
    /// 一度だけ被ダメージを無効化するシールド
    pub shield_ready:    bool,
    pub xp:              u32,
    pub ranged_equipped: bool,
    /// 燃焼ハザードに連続して触れている時間
    pub hazard_exposure: f32,
    pub burn_dps:        f32,
    pub hazard_slow:     f32,
    pub gust_slow:       f32,
    /// 直前フレームに被弾したか（仲間トリガー用）
    pub hurt_this_frame: bool,
    /// HP が尽きて死亡演出に入ったか
    pub death_started:   bool,
    /// 死亡演出の完了を通知済みか
    pub defeat_reported: bool,
}

impl PlayerState {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            actor: Actor::new(id, ActorKind::Player, x, y, PLAYER_HALF_EXTENT, PLAYER_SPEED, PLAYER_MAX_HP),
            keys: 0,
            shield_ready: false,
            xp: 0,
            ranged_equipped: false,
            hazard_exposure: 0.0,
            burn_dps: 0.0,
            hazard_slow: 1.0,
            gust_slow: 1.0,
            hurt_this_frame: false,
            death_started: false,
            defeat_reported: false,
        }
    }
}
