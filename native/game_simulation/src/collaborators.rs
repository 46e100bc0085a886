//! Path: native/game_simulation/src/collaborators.rs
//! Summary: 外部協調者（オーディオ・クエスト台帳・進行）へのインターフェースと副作用キュー

use crate::error::CollaboratorError;
use serde::{Deserialize, Serialize};

/// 単発の効果音キュー（応答は不要）
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AudioCue {
    Hit,
    Crit,
    Block,
    Dash,
    Juke,
    Gust,
    Guard,
    Enrage,
    PhaseQuake,
    Break,
    Pickup,
    Swing,
    Shoot,
    Unlock,
    Defeat,
    Shield,
    Deflect,
}

/// ステップ中に積み、ステップ末尾でまとめて送る副作用
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SideEffect {
    Cue(AudioCue),
    QuestProgress { quest_id: String, delta: i32 },
    WorldFlag { flag: String, value: bool },
    GrantXp(u32),
}

/// シミュレーション外の書き込み先。どれも失敗しうるが、ステップは止めない
pub trait Collaborators {
    fn play_cue(&mut self, cue: AudioCue) -> Result<(), CollaboratorError>;
    fn add_quest_progress(&mut self, quest_id: &str, delta: i32) -> Result<(), CollaboratorError>;
    fn set_world_flag(&mut self, flag: &str, value: bool) -> Result<(), CollaboratorError>;
    fn grant_xp(&mut self, amount: u32) -> Result<(), CollaboratorError>;
}

/// 何もしない協調者（ヘッドレス実行・ベンチ用）
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCollaborators;

impl Collaborators for NullCollaborators {
    fn play_cue(&mut self, _cue: AudioCue) -> Result<(), CollaboratorError> {
        Ok(())
    }

    fn add_quest_progress(&mut self, _quest_id: &str, _delta: i32) -> Result<(), CollaboratorError> {
        Ok(())
    }

    fn set_world_flag(&mut self, _flag: &str, _value: bool) -> Result<(), CollaboratorError> {
        Ok(())
    }

    fn grant_xp(&mut self, _amount: u32) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// 受け取った副作用を記録する協調者。既知のクエスト ID 以外は拒否できる
#[derive(Debug, Default, Clone)]
pub struct RecordingCollaborators {
    pub received:     Vec<SideEffect>,
    /// 空なら全クエスト ID を受け付ける
    pub known_quests: Vec<String>,
    /// true のとき効果音はすべて失敗扱い
    pub audio_offline: bool,
}

impl RecordingCollaborators {
    pub fn xp_total(&self) -> u32 {
        self.received
            .iter()
            .map(|e| match e {
                SideEffect::GrantXp(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.received.iter().rev().find_map(|e| match e {
            SideEffect::WorldFlag { flag, value } if flag == name => Some(*value),
            _ => None,
        })
    }
}

impl Collaborators for RecordingCollaborators {
    fn play_cue(&mut self, cue: AudioCue) -> Result<(), CollaboratorError> {
        if self.audio_offline {
            return Err(CollaboratorError::Audio(cue, "device offline".to_string()));
        }
        self.received.push(SideEffect::Cue(cue));
        Ok(())
    }

    fn add_quest_progress(&mut self, quest_id: &str, delta: i32) -> Result<(), CollaboratorError> {
        if !self.known_quests.is_empty() && !self.known_quests.iter().any(|q| q == quest_id) {
            return Err(CollaboratorError::UnknownQuest(quest_id.to_string()));
        }
        self.received.push(SideEffect::QuestProgress { quest_id: quest_id.to_string(), delta });
        Ok(())
    }

    fn set_world_flag(&mut self, flag: &str, value: bool) -> Result<(), CollaboratorError> {
        self.received.push(SideEffect::WorldFlag { flag: flag.to_string(), value });
        Ok(())
    }

    fn grant_xp(&mut self, amount: u32) -> Result<(), CollaboratorError> {
        self.received.push(SideEffect::GrantXp(amount));
        Ok(())
    }
}
