//! Path: native/game_simulation/src/game_logic/context.rs
//! Summary: 1 フレーム分の読み取り専用コンテキスト（各システムへ明示的に渡す）

use crate::world::{BuffTotals, GameWorld, HostileTotals, TimerKind};

/// フレーム中に各システムが参照する値のコピー。
/// 共有の可変状態を経由せず、必要な値だけを引数で受け渡す。
#[derive(Clone, Copy, Debug)]
pub struct SimContext {
    pub dt:           f32,
    pub frame_id:     u32,
    pub player_x:     f32,
    pub player_y:     f32,
    pub player_alive: bool,
    /// 遠隔武器を構えている、または直近に射撃した
    pub ranged_aware: bool,
    pub buffs:        BuffTotals,
    pub debuffs:      HostileTotals,
}

impl SimContext {
    pub fn capture(w: &GameWorld, dt: f32) -> Self {
        let p = &w.player;
        Self {
            dt,
            frame_id: w.frame_id,
            player_x: p.actor.x(),
            player_y: p.actor.y(),
            player_alive: !p.actor.is_defeated(),
            ranged_aware: p.ranged_equipped || p.actor.timers.is_active(TimerKind::RecentlyFired),
            buffs: w.buffs,
            debuffs: w.debuffs,
        }
    }
}
