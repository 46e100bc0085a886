//! Path: native/game_core/src/lib.rs
//! Summary: シミュレーションコア共通ロジック（定数・幾何・障害物・敵クラス・チューニング・オーラ・ボス・ルート）

pub mod aura;
pub mod boss;
pub mod constants;
pub mod enemy;
pub mod loot;
pub mod obstacle;
pub mod physics;
pub mod tuning;
pub mod util;
