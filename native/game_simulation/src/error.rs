//! Path: native/game_simulation/src/error.rs
//! Summary: 外部協調者・コンテンツ読み込み・スナップショットのエラー型

use crate::collaborators::AudioCue;
use thiserror::Error;

/// 外部協調者（オーディオ・クエスト・進行）が返す失敗。シミュレーションは記録して続行する
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("audio cue {0:?} could not be played: {1}")]
    Audio(AudioCue, String),
    #[error("unknown quest id: {0}")]
    UnknownQuest(String),
    #[error("world flag rejected: {0}")]
    FlagRejected(String),
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content pack: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid content: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("snapshot version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
