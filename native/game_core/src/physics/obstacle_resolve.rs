//! Path: native/game_core/src/physics/obstacle_resolve.rs
//! Summary: 軸ごとの移動解決（静的障害物・動的ソリッドに沿ってスライド）とワールド境界クランプ

use super::geometry::{Body, Rect};
use super::spatial_hash::ObstacleField;

/// 押し戻し後に残す隙間。接触面でちょうど重ならないようにする
const SKIN: f32 = 0.01;

/// 移動解決に必要な周辺情報
pub struct CollisionEnv<'a> {
    pub field:      &'a ObstacleField,
    /// 動的ソリッド（自分自身は呼び出し側で除外しておく）
    pub solids:     &'a [Rect],
    pub water_walk: bool,
    pub world_w:    f32,
    pub world_h:    f32,
}

#[derive(Clone, Copy, PartialEq)]
enum Axis {
    X,
    Y,
}

/// `dx` → `dy` の順に軸ごとに移動を解決し、最後にワールド境界へクランプする。
/// 片軸がブロックされても、もう片軸の移動はそのまま通る（壁沿いスライド）。
pub fn move_with_collision(
    body: &mut Body,
    dx: f32,
    dy: f32,
    env: &CollisionEnv,
    buf: &mut Vec<usize>,
) {
    if dx != 0.0 {
        body.x = resolve_axis(body, dx, Axis::X, env, buf);
    }
    if dy != 0.0 {
        body.y = resolve_axis(body, dy, Axis::Y, env, buf);
    }
    clamp_to_world(body, env.world_w, env.world_h);
}

pub fn clamp_to_world(body: &mut Body, world_w: f32, world_h: f32) {
    body.x = body.x.max(body.hw).min(world_w - body.hw);
    body.y = body.y.max(body.hh).min(world_h - body.hh);
}

fn resolve_axis(body: &Body, delta: f32, axis: Axis, env: &CollisionEnv, buf: &mut Vec<usize>) -> f32 {
    let from = body.rect();
    let (current, target) = match axis {
        Axis::X => (body.x, body.x + delta),
        Axis::Y => (body.y, body.y + delta),
    };
    let to = match axis {
        Axis::X => body.rect_at(target, body.y),
        Axis::Y => body.rect_at(body.x, target),
    };
    let sweep = from.union(&to);
    let mut limit = target;

    let mut clamp_against = |r: &Rect| {
        // 開始時点で既に重なっているものは無視する（抜け出せるように）
        if !r.intersects(&sweep) || r.intersects(&from) {
            return;
        }
        match (axis, delta > 0.0) {
            (Axis::X, true) if r.x >= from.right() - 1e-3 => {
                limit = limit.min(r.x - body.hw - SKIN).max(current);
            }
            (Axis::X, false) if r.right() <= from.x + 1e-3 => {
                limit = limit.max(r.right() + body.hw + SKIN).min(current);
            }
            (Axis::Y, true) if r.y >= from.bottom() - 1e-3 => {
                limit = limit.min(r.y - body.hh - SKIN).max(current);
            }
            (Axis::Y, false) if r.bottom() <= from.y + 1e-3 => {
                limit = limit.max(r.bottom() + body.hh + SKIN).min(current);
            }
            _ => {}
        }
    };

    env.field.query_rect_into(&sweep, buf);
    for &idx in buf.iter() {
        if let Some(o) = env.field.obstacles.get(idx) {
            if o.blocks_movement(env.water_walk) {
                clamp_against(&o.rect);
            }
        }
    }
    for solid in env.solids {
        clamp_against(solid);
    }
    limit
}
