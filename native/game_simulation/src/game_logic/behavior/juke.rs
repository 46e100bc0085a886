//! Path: native/game_simulation/src/game_logic/behavior/juke.rs
//! Summary: 飛来するプレイヤー弾への横っ飛び回避

use super::{Intent, Sense};
use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{Enemy, Maneuver, Projectile, Team, TimerKind};
use game_core::constants::PROJECTILE_SCAN_LIMIT;
use game_core::physics::rng::SimpleRng;
use game_core::tuning::JukeTuning;
use game_core::util::{cross, dist_sq, dot, normalize};

/// 近い順に最大 `PROJECTILE_SCAN_LIMIT` 発のプレイヤー弾インデックス
pub fn nearest_player_projectiles(projectiles: &[Projectile], x: f32, y: f32, out: &mut Vec<usize>) {
    out.clear();
    out.extend(
        projectiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive && p.team == Team::Player)
            .map(|(i, _)| i),
    );
    out.sort_by(|&a, &b| {
        let da = dist_sq(projectiles[a].body.x, projectiles[a].body.y, x, y);
        let db = dist_sq(projectiles[b].body.x, projectiles[b].body.y, x, y);
        da.total_cmp(&db)
    });
    out.truncate(PROJECTILE_SCAN_LIMIT);
}

/// 弾の予測経路が横方向の許容幅と前方窓に入っていれば、その弾の進行方向を返す
pub fn incoming_threat(
    p: &Projectile,
    ex: f32,
    ey: f32,
    half_extent: f32,
    t: &JukeTuning,
) -> Option<(f32, f32)> {
    let (nx, ny) = normalize(p.vx, p.vy);
    if nx == 0.0 && ny == 0.0 {
        return None;
    }
    let rx = ex - p.body.x;
    let ry = ey - p.body.y;
    let forward = dot(rx, ry, nx, ny);
    if forward < 0.0 || forward > t.forward_window {
        return None;
    }
    let lateral = cross(nx, ny, rx, ry).abs();
    (lateral <= t.lateral_tolerance + half_extent).then_some((nx, ny))
}

pub fn update(
    enemy: &mut Enemy,
    tuning: Option<&JukeTuning>,
    sense: &Sense,
    projectiles: &[Projectile],
    scan: &[usize],
    rng: &mut SimpleRng,
    outbox: &mut Vec<SideEffect>,
) -> Option<Intent> {
    let t = tuning?;
    if enemy.actor.timers.is_active(TimerKind::Juke) {
        return Some(Intent::locked((enemy.ai.juke_x, enemy.ai.juke_y), t.speed_mult, Maneuver::Juke));
    }
    if enemy.actor.timers.is_active(TimerKind::JukeCooldown) {
        return None;
    }

    let half = enemy.actor.body.hw;
    let threat = scan
        .iter()
        .filter_map(|&i| projectiles.get(i))
        .find_map(|p| incoming_threat(p, sense.ex, sense.ey, half, t).map(|dir| (p, dir)));
    let (p, (nx, ny)) = threat?;

    let mut chance = t.chance;
    if enemy.actor.timers.is_active(TimerKind::Advance) {
        chance *= t.advance_chance_mult;
    }
    if !rng.chance(chance.min(1.0)) {
        // 外れても短い反応時間を置く（毎フレーム再抽選しない）
        enemy.actor.timers.set(TimerKind::JukeCooldown, t.cooldown * 0.5);
        return None;
    }

    // 弾の進路から離れる側の法線へ
    let (mut sx, mut sy) = (-ny, nx);
    let side = dot(sx, sy, sense.ex - p.body.x, sense.ey - p.body.y);
    if side < 0.0 || (side == 0.0 && rng.sign() < 0.0) {
        sx = -sx;
        sy = -sy;
    }
    enemy.ai.juke_x = sx;
    enemy.ai.juke_y = sy;
    enemy.actor.timers.set(TimerKind::Juke, t.duration);
    enemy.actor.timers.set(TimerKind::JukeCooldown, t.cooldown);
    outbox.push(SideEffect::Cue(AudioCue::Juke));
    log::debug!("enemy {} juke from projectile {}", enemy.actor.id, p.id);
    Some(Intent::locked((sx, sy), t.speed_mult, Maneuver::Juke))
}
