//! Path: native/game_core/src/physics/mod.rs
//! Summary: 物理モジュールの再エクスポート（幾何・移動解決・分離・RNG・空間ハッシュ）

pub mod geometry;
pub mod obstacle_resolve;
pub mod rng;
pub mod separation;
pub mod spatial_hash;
