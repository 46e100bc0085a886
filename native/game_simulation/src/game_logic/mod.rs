//! Path: native/game_simulation/src/game_logic/mod.rs
//! Summary: フレームステップ・敵の行動・各システム・副作用の送出

mod behavior;
mod context;
mod events;
mod flow_field;
mod movement;
mod physics_step;
mod steering;
mod systems;

pub use behavior::{decide, Intent, Sense};
pub use context::SimContext;
pub use flow_field::FlowField;
pub use movement::{integrate_knockback, move_body, move_with_fallback};
pub use physics_step::{clamp_dt, StepOutcome};
pub use steering::{score_candidate, steer_heading, SteeringRequest};
pub use systems::buffs::{compute_buff_totals, BuffAggregate};
pub use systems::combat::{enemy_hit_damage, player_hit_damage, HitOutcome, IncomingHit};
pub use systems::companions::follow_slot;
