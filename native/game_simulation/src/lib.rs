//! Path: native/game_simulation/src/lib.rs
//! Summary: モジュール宣言と pub use のみ

pub mod collaborators;
pub mod content;
pub mod error;
mod game_logic;
pub mod render_frame;
pub mod snapshot;
mod world;

pub use collaborators::{AudioCue, Collaborators, NullCollaborators, RecordingCollaborators, SideEffect};
pub use content::ContentPack;
pub use error::{CollaboratorError, ContentError, SnapshotError};
pub use game_logic::{
    clamp_dt, compute_buff_totals, decide, enemy_hit_damage, follow_slot, integrate_knockback,
    move_body, move_with_fallback, player_hit_damage, score_candidate, steer_heading,
    BuffAggregate, FlowField, HitOutcome, IncomingHit, Intent, Sense, SimContext, SteeringRequest,
    StepOutcome,
};
pub use render_frame::{build_render_frame, ActorSprite, ObstacleSprite, ProjectileSprite, RenderFrame};
pub use snapshot::{SimSnapshot, SNAPSHOT_VERSION};
pub use world::{
    Actor, ActorKind, AiState, BossState, BuffTotals, Camera, Cinematic, Companion, Enemy,
    FrameEvent, FrameInput, GameWorld, HitLabel, HostileTotals, Maneuver, Pickup, PlayerState,
    Projectile, SimMode, StatusLabel, StatusTimers, TempBonuses, TimedBonus, Team, TimerKind,
};
