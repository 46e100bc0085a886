//! Path: native/game_core/src/boss.rs
//! Summary: ボスのフェーズ定義とフェーズ移行時の強化プロファイル

use serde::{Deserialize, Serialize};

/// ボスのフェーズ（セーブデータ互換のため #[repr(u8)] と明示値で固定）
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BossPhase {
    #[default]
    First  = 0,
    Second = 1,
    Third  = 2,
}

impl BossPhase {
    /// セーブデータからのデシリアライズ用。未知の ID は None。
    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            2 => Some(Self::Third),
            _ => None,
        }
    }

    /// 1 始まりのフェーズ番号
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_u8(*self as u8 + 1)
    }
}

/// フェーズ移行時の強化量と、撃破時の物語フック
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossProfile {
    /// 総フェーズ数（1〜3）
    pub phases:              u8,
    pub touch_damage_step:   f32,
    pub true_damage_step:    f32,
    /// 攻撃間隔に掛ける係数（< 1 で速くなる）
    pub hit_cooldown_factor: f32,
    pub speed_factor:        f32,
    /// フェーズ移行ごとに表示するプロンプト ID（[0] が 1→2 の移行）
    pub prompts:             Vec<String>,
    /// 最終撃破時に立てるワールドフラグ
    pub story_flag:          Option<String>,
    /// 最終撃破時に進めるクエスト ID
    pub quest_id:            Option<String>,
    /// 最終撃破後にレベル遷移を予約するか
    pub level_transition:    bool,
}

impl Default for BossProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl BossProfile {
    /// 通常ボス: 2 フェーズ
    pub fn standard() -> Self {
        Self {
            phases: 2,
            touch_damage_step: 2.0,
            true_damage_step: 0.5,
            hit_cooldown_factor: 0.8,
            speed_factor: 1.1,
            prompts: Vec::new(),
            story_flag: None,
            quest_id: None,
            level_transition: false,
        }
    }

    /// 特別なストーリーボス: 3 フェーズ
    pub fn three_phase() -> Self {
        Self { phases: 3, level_transition: true, ..Self::standard() }
    }

    pub fn final_phase(&self) -> BossPhase {
        BossPhase::from_u8(self.phases.clamp(1, 3) - 1).unwrap_or(BossPhase::Second)
    }

    /// `from` から次のフェーズに移るときのプロンプト
    pub fn prompt_for(&self, from: BossPhase) -> Option<&str> {
        self.prompts.get(from as usize).map(String::as_str)
    }
}
