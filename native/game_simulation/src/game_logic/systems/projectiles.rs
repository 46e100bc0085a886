//! Path: native/game_simulation/src/game_logic/systems/projectiles.rs
//! Summary: 弾の移動・遮蔽 / 破壊可能物・敵 / プレイヤーへのヒット、風による一度きりの逸らし

use super::super::context::SimContext;
use super::combat::{damage_player, enemy_hit_damage, incoming_from, strike_enemy, Strike};
use super::items::on_obstacle_broken;
use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{FrameEvent, GameWorld, Projectile, StatusLabel, Team, TimerKind};
use game_core::constants::{
    DEFLECT_DAMAGE_FACTOR, DEFLECT_MAX_ANGLE, DEFLECT_RADIUS, PROJECTILE_SCAN_LIMIT,
};
use game_core::physics::rng::SimpleRng;
use game_core::util::{dist_sq, normalize, rotate};

/// 画面外に出てから消すまでの余白
const BOUNDS_MARGIN: f32 = 100.0;

/// 逸らし判定の対象になる敵弾（プレイヤーに近い順、最大 `PROJECTILE_SCAN_LIMIT` 個）
pub fn deflect_candidates(projectiles: &[Projectile], px: f32, py: f32, dt: f32, out: &mut Vec<usize>) {
    out.clear();
    let r2 = DEFLECT_RADIUS * DEFLECT_RADIUS;
    out.extend(projectiles.iter().enumerate().filter_map(|(i, p)| {
        if !p.alive || p.team != Team::Enemy || p.deflect_attempted {
            return None;
        }
        let nx = p.body.x + p.vx * dt;
        let ny = p.body.y + p.vy * dt;
        (dist_sq(nx, ny, px, py) <= r2).then_some(i)
    }));
    out.sort_by(|&a, &b| {
        let da = dist_sq(projectiles[a].body.x, projectiles[a].body.y, px, py);
        let db = dist_sq(projectiles[b].body.x, projectiles[b].body.y, px, py);
        da.total_cmp(&db)
    });
    out.truncate(PROJECTILE_SCAN_LIMIT);
}

/// 一度だけ逸らしを試みる。成功したらプレイヤーから外向きに、ランダムな角度で飛ばす
pub fn try_deflect(p: &mut Projectile, chance: f32, px: f32, py: f32, rng: &mut SimpleRng) -> bool {
    if p.deflect_attempted {
        return false;
    }
    p.deflect_attempted = true;
    if !rng.chance(chance) {
        return false;
    }
    let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
    let (ox, oy) = normalize(p.body.x - px, p.body.y - py);
    let (ox, oy) = if ox == 0.0 && oy == 0.0 { normalize(-p.vx, -p.vy) } else { (ox, oy) };
    let (dx, dy) = rotate(ox, oy, rng.signed() * DEFLECT_MAX_ANGLE);
    p.vx = dx * speed;
    p.vy = dy * speed;
    p.damage *= DEFLECT_DAMAGE_FACTOR;
    true
}

pub(crate) fn update_projectiles(w: &mut GameWorld, ctx: &SimContext) {
    let dt = ctx.dt;
    let (px, py) = (ctx.player_x, ctx.player_y);
    let mut broken: Vec<usize> = Vec::new();

    {
        let GameWorld {
            projectiles, enemies, player, field, rng, content, frame_events, outbox, enemy_hash,
            query_buf, world_w, world_h, ..
        } = &mut *w;

        if ctx.player_alive && ctx.buffs.deflect > 0.0 {
            deflect_candidates(projectiles, px, py, dt, query_buf);
            for &i in query_buf.iter() {
                if try_deflect(&mut projectiles[i], ctx.buffs.deflect, px, py, rng) {
                    frame_events.push(FrameEvent::StatusText { x: px, y: py, status: StatusLabel::Deflect });
                    outbox.push(SideEffect::Cue(AudioCue::Deflect));
                }
            }
        }

        let mut nearby = Vec::new();
        for p in projectiles.iter_mut() {
            if !p.alive {
                continue;
            }
            p.lifetime -= dt;
            if p.lifetime <= 0.0 {
                p.kill();
                continue;
            }

            let (x0, y0) = (p.body.x, p.body.y);
            let (x1, y1) = (x0 + p.vx * dt, y0 + p.vy * dt);
            let mut stopped = false;
            while let Some(idx) = field.first_attack_blocker_skipping(x0, y0, x1, y1, &p.passed_obstacles) {
                let Some(o) = field.obstacles.get_mut(idx) else {
                    stopped = true;
                    break;
                };
                if p.team != Team::Player || !o.kind.is_breakable() {
                    stopped = true;
                    break;
                }
                if o.apply_damage(p.damage) {
                    broken.push(idx);
                }
                // 壊れなくても貫通を 1 つ使えば抜ける。抜けた物には二度当たらない
                if p.pierce == 0 {
                    stopped = true;
                    break;
                }
                p.pierce -= 1;
                p.passed_obstacles.push(idx);
            }
            if stopped {
                p.kill();
                continue;
            }
            p.body.x = x1;
            p.body.y = y1;
            if x1 < -BOUNDS_MARGIN
                || y1 < -BOUNDS_MARGIN
                || x1 > *world_w + BOUNDS_MARGIN
                || y1 > *world_h + BOUNDS_MARGIN
            {
                p.kill();
                continue;
            }

            let rect = p.body.rect();
            match p.team {
                Team::Player => {
                    enemy_hash.query_rect_into(&rect, &mut nearby);
                    for &ei in &nearby {
                        let Some(enemy) = enemies.get_mut(ei) else {
                            continue;
                        };
                        if enemy.actor.is_defeated()
                            || p.hit_ids.contains(&enemy.actor.id)
                            || !enemy.actor.rect().intersects(&rect)
                        {
                            continue;
                        }
                        let strike = Strike::roll(p.damage, ctx.buffs.crit, (x0, y0), rng);
                        strike_enemy(enemy, &strike, &content.tuning, frame_events, outbox);
                        if p.register_hit(enemy.actor.id) {
                            break;
                        }
                    }
                }
                Team::Enemy => {
                    if player.actor.is_defeated() || !player.actor.rect().intersects(&rect) {
                        continue;
                    }
                    p.kill();
                    // 無敵中は弾だけ消える
                    if player.actor.timers.is_active(TimerKind::Invuln) {
                        continue;
                    }
                    let (class, extra_true) = p
                        .source
                        .and_then(|id| enemies.iter().find(|e| e.actor.id == id))
                        .map(|e| (e.class, e.true_damage))
                        .unwrap_or((p.source_class, 0.0));
                    let player_dr = ctx.buffs.dr + ctx.buffs.ranged_dr;
                    let hit = incoming_from(class, extra_true, p.damage, player_dr, &content.tuning, rng);
                    damage_player(player, enemy_hit_damage(&hit), frame_events, outbox);
                }
            }
        }
        projectiles.retain(|p| p.alive);
    }

    for idx in broken {
        on_obstacle_broken(w, idx);
    }
}
