//! Path: native/game_simulation/src/world/mod.rs
//! Summary: ワールド型（アクター・ステータスタイマー・弾・ピックアップ・バフ状態・モード・GameWorld）

mod actor;
mod boss;
mod buff_state;
mod frame_event;
mod game_world;
mod mode;
mod pickup;
mod player;
mod projectile;
mod status;

pub use actor::{Actor, ActorKind, AiState, Companion, Enemy, Maneuver};
pub use boss::BossState;
pub use buff_state::{BuffTotals, HostileTotals, TempBonuses, TimedBonus};
pub use frame_event::{FrameEvent, HitLabel, StatusLabel};
pub use game_world::GameWorld;
pub use mode::{Camera, Cinematic, SimMode};
pub use pickup::{Pickup, PICKUP_HALF_EXTENT};
pub use player::{FrameInput, PlayerState};
pub use projectile::{Projectile, Team};
pub use status::{StatusTimers, TimerKind, TIMER_COUNT};
