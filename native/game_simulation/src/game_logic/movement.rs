//! Path: native/game_simulation/src/game_logic/movement.rs
//! Summary: 移動解決のラッパー（詰まり時の軸別・横逃げフォールバック、ノックバック積分）

use crate::world::AiState;
use game_core::constants::KNOCKBACK_DECAY;
use game_core::physics::geometry::Body;
use game_core::physics::obstacle_resolve::{move_with_collision, CollisionEnv};

/// 要求量に対してこの割合未満しか動けなければ「詰まり」とみなす
const STUCK_RATIO: f32 = 0.2;

/// 移動して実際の移動量を返す
pub fn move_body(body: &mut Body, dx: f32, dy: f32, env: &CollisionEnv, buf: &mut Vec<usize>) -> f32 {
    let (x0, y0) = (body.x, body.y);
    move_with_collision(body, dx, dy, env, buf);
    ((body.x - x0).powi(2) + (body.y - y0).powi(2)).sqrt()
}

/// 詰まったら X のみ → Y のみ → 横逃げの順に試す。
/// 横逃げの向きは `stuck_flip_time` 以上詰まり続けると反転する。
#[allow(clippy::too_many_arguments)]
pub fn move_with_fallback(
    body: &mut Body,
    ai: &mut AiState,
    dx: f32,
    dy: f32,
    env: &CollisionEnv,
    buf: &mut Vec<usize>,
    dt: f32,
    stuck_flip_time: f32,
) -> f32 {
    let wanted = (dx * dx + dy * dy).sqrt();
    if wanted < 1e-4 {
        return 0.0;
    }
    let threshold = wanted * STUCK_RATIO;
    let moved = move_body(body, dx, dy, env, buf);
    if moved >= threshold {
        ai.stuck_time = 0.0;
        return moved;
    }

    let attempts = [
        (axis_sign(dx) * wanted, 0.0),
        (0.0, axis_sign(dy) * wanted),
        (-dy * ai.avoid_sign, dx * ai.avoid_sign),
    ];
    for (ax, ay) in attempts {
        if ax == 0.0 && ay == 0.0 {
            continue;
        }
        let m = move_body(body, ax, ay, env, buf);
        if m >= threshold {
            ai.stuck_time = 0.0;
            return moved + m;
        }
    }

    ai.stuck_time += dt;
    if ai.stuck_time >= stuck_flip_time {
        ai.avoid_sign = -ai.avoid_sign;
        ai.stuck_time = 0.0;
    }
    moved
}

fn axis_sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// ノックバック速度で移動し、指数減衰させる
pub fn integrate_knockback(
    body: &mut Body,
    kx: &mut f32,
    ky: &mut f32,
    env: &CollisionEnv,
    buf: &mut Vec<usize>,
    dt: f32,
) {
    if kx.abs() < 0.5 && ky.abs() < 0.5 {
        *kx = 0.0;
        *ky = 0.0;
        return;
    }
    move_with_collision(body, *kx * dt, *ky * dt, env, buf);
    let decay = (-KNOCKBACK_DECAY * dt).exp();
    *kx *= decay;
    *ky *= decay;
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::obstacle::{Obstacle, ObstacleKind};
    use game_core::physics::geometry::Rect;
    use game_core::physics::spatial_hash::ObstacleField;

    fn field(obstacles: Vec<Obstacle>) -> ObstacleField {
        let mut f = ObstacleField::new(64.0);
        f.rebuild(obstacles);
        f
    }

    #[test]
    fn head_on_wall_sidesteps_and_flips_when_stuck() {
        // 幅広の壁に正面から押し付けられている
        let f = field(vec![
            Obstacle::new(Rect::new(100.0, 0.0, 20.0, 400.0), ObstacleKind::Wall),
            Obstacle::new(Rect::new(0.0, 0.0, 100.0, 80.0), ObstacleKind::Wall),
        ]);
        let env = CollisionEnv { field: &f, solids: &[], water_walk: false, world_w: 400.0, world_h: 400.0 };
        let mut body = Body::new(89.9, 200.0, 10.0, 10.0);
        let mut ai = AiState::default();
        let mut buf = Vec::new();

        // 右向き入力だけでも横逃げで y が変わる
        let moved = move_with_fallback(&mut body, &mut ai, 2.0, 0.0, &env, &mut buf, 0.016, 0.6);
        assert!(moved > 0.0);
        assert!((body.y - 200.0).abs() > 1.0);
        assert!(body.x + body.hw <= 100.0);
    }

    #[test]
    fn avoid_sign_flips_after_stuck_threshold() {
        // 四方を壁で囲まれ、どこにも動けない
        let f = field(vec![
            Obstacle::new(Rect::new(0.0, 0.0, 200.0, 90.0), ObstacleKind::Wall),
            Obstacle::new(Rect::new(0.0, 110.0, 200.0, 90.0), ObstacleKind::Wall),
            Obstacle::new(Rect::new(0.0, 90.0, 90.0, 20.0), ObstacleKind::Wall),
            Obstacle::new(Rect::new(110.0, 90.0, 90.0, 20.0), ObstacleKind::Wall),
        ]);
        let env = CollisionEnv { field: &f, solids: &[], water_walk: false, world_w: 400.0, world_h: 400.0 };
        let mut body = Body::new(100.0, 100.0, 9.99, 9.99);
        let mut ai = AiState::default();
        let mut buf = Vec::new();
        let start_sign = ai.avoid_sign;
        for _ in 0..40 {
            move_with_fallback(&mut body, &mut ai, 2.0, 1.0, &env, &mut buf, 0.016, 0.6);
        }
        assert_ne!(ai.avoid_sign, start_sign);
    }

    #[test]
    fn knockback_decays_to_zero() {
        let f = field(Vec::new());
        let env = CollisionEnv { field: &f, solids: &[], water_walk: false, world_w: 1000.0, world_h: 1000.0 };
        let mut body = Body::new(500.0, 500.0, 10.0, 10.0);
        let (mut kx, mut ky) = (200.0, 0.0);
        let mut buf = Vec::new();
        for _ in 0..120 {
            integrate_knockback(&mut body, &mut kx, &mut ky, &env, &mut buf, 1.0 / 60.0);
        }
        assert!(body.x > 510.0);
        assert_eq!((kx, ky), (0.0, 0.0));
    }
}
