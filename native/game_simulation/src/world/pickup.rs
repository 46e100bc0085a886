//! Path: native/game_simulation/src/world/pickup.rs
//! Summary: 地面に落ちているピックアップ

use game_core::loot::PickupKind;
use serde::{Deserialize, Serialize};

pub const PICKUP_HALF_EXTENT: f32 = 6.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id:    u32,
    pub x:     f32,
    pub y:     f32,
    pub kind:  PickupKind,
    pub value: f32,
}
