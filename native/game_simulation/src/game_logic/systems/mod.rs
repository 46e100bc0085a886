//! Path: native/game_simulation/src/game_logic/systems/mod.rs
//! Summary: フレーム内の各システム（バフ・ハザード・戦闘・弾・ボス・アイテム）

pub(crate) mod boss;
pub(crate) mod buffs;
pub(crate) mod collision;
pub(crate) mod combat;
pub(crate) mod companions;
pub(crate) mod hazards;
pub(crate) mod hostile_auras;
pub(crate) mod items;
pub(crate) mod player;
pub(crate) mod projectiles;
