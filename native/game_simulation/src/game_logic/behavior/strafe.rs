//! Path: native/game_simulation/src/game_logic/behavior/strafe.rs
//! Summary: 遠隔警戒中のジグザグ接近と、経路が見つからないときの壁沿い探索

use super::{Intent, Sense};
use crate::world::{Enemy, Maneuver, TimerKind};
use game_core::physics::rng::SimpleRng;
use game_core::tuning::{WallFollowTuning, ZigzagTuning};
use game_core::util::normalize;

/// 直進方向と接線方向を重み付きで混ぜる
pub fn blend_heading(dir: (f32, f32), side: f32, weight: f32) -> (f32, f32) {
    let w = weight.clamp(0.0, 1.0);
    let (tx, ty) = (-dir.1 * side, dir.0 * side);
    normalize(dir.0 * (1.0 - w) + tx * w, dir.1 * (1.0 - w) + ty * w)
}

pub fn update_zigzag(
    enemy: &mut Enemy,
    tuning: Option<&ZigzagTuning>,
    sense: &Sense,
    ranged_aware: bool,
    rng: &mut SimpleRng,
) -> Option<Intent> {
    let t = tuning?;
    if !ranged_aware || sense.dist < t.min_dist || sense.dist > t.max_dist {
        return None;
    }
    if !enemy.actor.timers.is_active(TimerKind::ZigzagCommit) {
        enemy.ai.strafe_side = rng.sign();
        enemy.actor.timers.set(TimerKind::ZigzagCommit, rng.range(t.commit_min, t.commit_max));
    }
    let heading = blend_heading(sense.dir, enemy.ai.strafe_side, t.weight);
    Some(Intent::steered(heading, 1.0, Maneuver::Zigzag))
}

/// フローフィールドが方向を返さず視線も通らないとき、遮る面に沿って一定時間進む
pub fn update_wall_follow(
    enemy: &mut Enemy,
    tuning: Option<&WallFollowTuning>,
    sense: &Sense,
    flow_dir: Option<(f32, f32)>,
) -> Option<Intent> {
    let t = tuning?;
    if enemy.actor.timers.is_active(TimerKind::WallFollow) {
        return Some(Intent::steered((enemy.ai.wall_x, enemy.ai.wall_y), 1.0, Maneuver::WallFollow));
    }
    if flow_dir.is_some() || sense.los {
        return None;
    }
    let side = enemy.ai.avoid_sign;
    let (wx, wy) = (-sense.dir.1 * side, sense.dir.0 * side);
    enemy.ai.wall_x = wx;
    enemy.ai.wall_y = wy;
    enemy.actor.timers.set(TimerKind::WallFollow, t.duration);
    log::debug!("enemy {} wall-follow search", enemy.actor.id);
    Some(Intent::steered((wx, wy), 1.0, Maneuver::WallFollow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::enemy::EnemyClass;

    fn sense(dist: f32, los: bool) -> Sense {
        Sense { ex: 0.0, ey: 0.0, px: dist, py: 0.0, dist, dir: (1.0, 0.0), los, aggro: true }
    }

    #[test]
    fn blend_keeps_forward_component() {
        let (x, y) = blend_heading((1.0, 0.0), 1.0, 0.55);
        assert!(x > 0.0 && y > 0.0);
        assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-5);
        let (_, y2) = blend_heading((1.0, 0.0), -1.0, 0.55);
        assert!(y2 < 0.0);
    }

    #[test]
    fn zigzag_only_when_player_is_ranged_aware() {
        let mut e = Enemy::new(1, EnemyClass::Featured, "f", 0.0, 0.0);
        let mut rng = SimpleRng::new(8);
        let t = ZigzagTuning::default();
        assert!(update_zigzag(&mut e, Some(&t), &sense(120.0, true), false, &mut rng).is_none());
        let i = update_zigzag(&mut e, Some(&t), &sense(120.0, true), true, &mut rng).expect("zigzag");
        assert_eq!(i.maneuver, Maneuver::Zigzag);
        assert!(e.actor.timers.is_active(TimerKind::ZigzagCommit));
    }

    #[test]
    fn wall_follow_needs_missing_flow_and_blocked_los() {
        let mut e = Enemy::new(1, EnemyClass::Featured, "f", 0.0, 0.0);
        let t = WallFollowTuning::default();
        assert!(update_wall_follow(&mut e, Some(&t), &sense(120.0, false), Some((1.0, 0.0))).is_none());
        assert!(update_wall_follow(&mut e, Some(&t), &sense(120.0, true), None).is_none());
        let i = update_wall_follow(&mut e, Some(&t), &sense(120.0, false), None).expect("search");
        assert_eq!(i.maneuver, Maneuver::WallFollow);
        assert!(i.dir.0.abs() < 1e-6);
    }
}
