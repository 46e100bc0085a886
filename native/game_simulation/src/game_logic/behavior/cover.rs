//! Path: native/game_simulation/src/game_logic/behavior/cover.rs
//! Summary: 被弾後に障害物の角へ回り込み、プレイヤーの視線を切る

use super::{Intent, Sense};
use crate::world::{Enemy, Maneuver, TimerKind};
use game_core::physics::geometry::Rect;
use game_core::physics::rng::SimpleRng;
use game_core::physics::spatial_hash::ObstacleField;
use game_core::tuning::CoverTuning;
use game_core::util::{angle_between, dist};

/// 角からどれだけ外側に立つか（体の半径に足す）
const CORNER_MARGIN: f32 = 4.0;
const RETREAT_PENALTY: f32 = 1.5;
const HEADING_PENALTY: f32 = 20.0;
const JITTER: f32 = 4.0;

/// 遮蔽候補の中から最良の地点を選ぶ
pub fn find_cover(
    field: &ObstacleField,
    sense: &Sense,
    facing: (f32, f32),
    half_extent: f32,
    t: &CoverTuning,
    rng: &mut SimpleRng,
    buf: &mut Vec<usize>,
) -> Option<(f32, f32)> {
    let area = Rect::from_center(sense.ex, sense.ey, t.search_radius, t.search_radius);
    field.query_rect_into(&area, buf);

    let offset = half_extent + CORNER_MARGIN;
    let mut best: Option<((f32, f32), f32)> = None;
    for &idx in buf.iter() {
        let Some(o) = field.obstacles.get(idx) else { continue };
        if !o.blocks_attacks() || !o.blocks_movement(false) {
            continue;
        }
        let (ocx, ocy) = o.rect.center();
        for (cx, cy) in o.rect.corners() {
            // 角から障害物の外側へずらす
            let sx = cx + if cx < ocx { -offset } else { offset };
            let sy = cy + if cy < ocy { -offset } else { offset };
            if dist(sx, sy, sense.ex, sense.ey) > t.search_radius {
                continue;
            }
            if field.line_of_sight(sx, sy, sense.px, sense.py) {
                continue;
            }
            let to_player = dist(sx, sy, sense.px, sense.py);
            let retreat = to_player - sense.dist;
            if retreat > t.max_retreat {
                continue;
            }
            if field.point_blocked(sx, sy, false) {
                continue;
            }
            let travel = dist(sense.ex, sense.ey, sx, sy);
            let misalign = angle_between(facing.0, facing.1, sx - sense.ex, sy - sense.ey);
            let score = travel
                + retreat.max(0.0) * RETREAT_PENALTY
                + misalign * HEADING_PENALTY
                + rng.next_f32() * JITTER;
            if best.map_or(true, |(_, s)| score < s) {
                best = Some(((sx, sy), score));
            }
        }
    }
    best.map(|(p, _)| p)
}

pub fn update(
    enemy: &mut Enemy,
    tuning: Option<&CoverTuning>,
    sense: &Sense,
    field: &ObstacleField,
    rng: &mut SimpleRng,
    buf: &mut Vec<usize>,
) -> Option<Intent> {
    let t = tuning?;
    if enemy.actor.timers.is_active(TimerKind::Cover) {
        if let Some((tx, ty)) = enemy.ai.cover_target {
            let d = dist(sense.ex, sense.ey, tx, ty);
            if d > t.reach_radius {
                let dir = ((tx - sense.ex) / d, (ty - sense.ey) / d);
                return Some(Intent::steered(dir, 1.0, Maneuver::Cover));
            }
        }
        // 到着したら早めに解除
        enemy.actor.timers.clear(TimerKind::Cover);
        enemy.ai.cover_target = None;
        return None;
    }

    let timers = &enemy.actor.timers;
    if timers.is_active(TimerKind::CoverCooldown)
        || !timers.is_active(TimerKind::RecentlyHit)
        || !sense.los
        || sense.dist < t.min_dist
        || sense.dist > t.max_dist
    {
        return None;
    }

    let facing = (enemy.actor.facing_x, enemy.actor.facing_y);
    let target = find_cover(field, sense, facing, enemy.actor.body.hw, t, rng, buf)?;
    enemy.ai.cover_target = Some(target);
    enemy.actor.timers.set(TimerKind::Cover, t.duration);
    enemy.actor.timers.set(TimerKind::CoverCooldown, t.cooldown);
    log::debug!("enemy {} seeks cover at ({:.0}, {:.0})", enemy.actor.id, target.0, target.1);
    let (dx, dy) = (target.0 - sense.ex, target.1 - sense.ey);
    let len = (dx * dx + dy * dy).sqrt().max(1e-4);
    Some(Intent::steered((dx / len, dy / len), 1.0, Maneuver::Cover))
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::enemy::EnemyClass;
    use game_core::obstacle::{Obstacle, ObstacleKind};

    fn arena() -> ObstacleField {
        let mut f = ObstacleField::new(64.0);
        // 敵とプレイヤーの間を横切る壁
        f.rebuild(vec![Obstacle::new(Rect::new(120.0, 160.0, 160.0, 40.0), ObstacleKind::Wall)]);
        f
    }

    fn sense() -> Sense {
        let (ex, ey, px, py) = (200.0, 260.0, 200.0, 60.0);
        Sense { ex, ey, px, py, dist: 200.0, dir: (0.0, -1.0), los: false, aggro: true }
    }

    #[test]
    fn chosen_point_hides_from_player() {
        let f = arena();
        let s = Sense { ex: 260.0, los: true, dist: dist(260.0, 260.0, 200.0, 60.0), ..sense() };
        let mut rng = SimpleRng::new(11);
        let mut buf = Vec::new();
        let p = find_cover(&f, &s, (0.0, -1.0), 10.0, &CoverTuning::default(), &mut rng, &mut buf)
            .expect("a corner behind the wall");
        assert!(!f.line_of_sight(p.0, p.1, s.px, s.py));
        assert!(dist(p.0, p.1, s.px, s.py) <= s.dist + CoverTuning::default().max_retreat);
    }

    #[test]
    fn requires_recent_hit() {
        let f = arena();
        let s = Sense { ex: 260.0, los: true, ..sense() };
        let mut e = Enemy::new(4, EnemyClass::Featured, "f", 260.0, 260.0);
        let mut rng = SimpleRng::new(11);
        let mut buf = Vec::new();
        let t = CoverTuning::default();
        assert!(update(&mut e, Some(&t), &s, &f, &mut rng, &mut buf).is_none());
        e.actor.timers.set(TimerKind::RecentlyHit, 2.0);
        let i = update(&mut e, Some(&t), &s, &f, &mut rng, &mut buf).expect("cover");
        assert_eq!(i.maneuver, Maneuver::Cover);
        assert!(e.actor.timers.is_active(TimerKind::CoverCooldown));
    }

    #[test]
    fn releases_early_on_arrival() {
        let f = arena();
        let mut e = Enemy::new(4, EnemyClass::Featured, "f", 200.0, 214.0);
        e.actor.timers.set(TimerKind::Cover, 1.0);
        e.ai.cover_target = Some((200.0, 216.0));
        let s = Sense { ex: 200.0, ey: 214.0, ..sense() };
        let mut rng = SimpleRng::new(11);
        let mut buf = Vec::new();
        assert!(update(&mut e, Some(&CoverTuning::default()), &s, &f, &mut rng, &mut buf).is_none());
        assert!(!e.actor.timers.is_active(TimerKind::Cover));
        assert!(e.ai.cover_target.is_none());
    }
}
