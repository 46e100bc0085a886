//! Path: native/game_simulation/src/game_logic/systems/companions.rs
//! Summary: 仲間の追従移動（プレイヤーの後方に扇状に並ぶ）

use super::super::movement::move_body;
use crate::world::GameWorld;
use game_core::constants::COMPANION_FOLLOW_DIST;
use game_core::physics::obstacle_resolve::CollisionEnv;
use game_core::util::{dist, normalize, rotate};

/// 目標地点にこれ以上近ければ止まる
const ARRIVE_DIST: f32 = 6.0;
/// 仲間同士の並びの角度間隔
const SLOT_SPREAD: f32 = 0.7;

/// `index` 番目の仲間の待機位置（プレイヤーの向きの反対側）
pub fn follow_slot(px: f32, py: f32, facing: (f32, f32), index: usize, count: usize) -> (f32, f32) {
    let (bx, by) = normalize(-facing.0, -facing.1);
    let (bx, by) = if bx == 0.0 && by == 0.0 { (0.0, 1.0) } else { (bx, by) };
    let centered = index as f32 - (count.saturating_sub(1)) as f32 * 0.5;
    let (ox, oy) = rotate(bx, by, centered * SLOT_SPREAD);
    (px + ox * COMPANION_FOLLOW_DIST, py + oy * COMPANION_FOLLOW_DIST)
}

pub(crate) fn update_companions(w: &mut GameWorld, dt: f32) {
    let GameWorld { companions, player, field, query_buf, world_w, world_h, .. } = &mut *w;
    let (px, py) = (player.actor.x(), player.actor.y());
    let facing = (player.actor.facing_x, player.actor.facing_y);
    let count = companions.len();
    let env = CollisionEnv {
        field: &*field,
        solids: &[],
        water_walk: false,
        world_w: *world_w,
        world_h: *world_h,
    };

    for (i, c) in companions.iter_mut().enumerate() {
        let (tx, ty) = follow_slot(px, py, facing, i, count);
        let (cx, cy) = (c.actor.x(), c.actor.y());
        let d = dist(cx, cy, tx, ty);
        if d <= ARRIVE_DIST {
            continue;
        }
        let (dx, dy) = normalize(tx - cx, ty - cy);
        let step = (c.actor.speed * dt).min(d);
        move_body(&mut c.actor.body, dx * step, dy * step, &env, query_buf);
        c.actor.face(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;

    #[test]
    fn single_companion_trails_behind() {
        let (x, y) = follow_slot(100.0, 100.0, (1.0, 0.0), 0, 1);
        assert!((x - (100.0 - COMPANION_FOLLOW_DIST)).abs() < 1e-4);
        assert!((y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn companion_closes_distance() {
        let mut w = GameWorld::new(ContentPack::default());
        w.place_player(400.0, 400.0);
        w.spawn_companion("mira", 5.0, 1, 100.0, 400.0);
        let before = dist(100.0, 400.0, 400.0, 400.0);
        for _ in 0..30 {
            update_companions(&mut w, 1.0 / 60.0);
        }
        let c = &w.companions[0].actor;
        assert!(dist(c.x(), c.y(), 400.0, 400.0) < before);
    }
}
