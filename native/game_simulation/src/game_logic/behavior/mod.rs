//! Path: native/game_simulation/src/game_logic/behavior/mod.rs
//! Summary: 敵の行動ステートマシン（突進 > 回避 > 遮蔽 > ジグザグ > 壁沿い > 追跡 / 徘徊）と移動

pub mod cover;
pub mod dash;
pub mod juke;
pub mod reactions;
pub mod strafe;
pub mod wander;

use super::context::SimContext;
use super::flow_field::FlowField;
use super::movement::move_with_fallback;
use super::steering::{steer_heading, SteeringRequest};
use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{Enemy, GameWorld, Maneuver, Projectile, Team, TimerKind};
use game_core::constants::{ENEMY_FIRE_INTERVAL, ENEMY_FIRE_RANGE, ENEMY_PROJECTILE_SPEED, PROJECTILE_LIFETIME};
use game_core::physics::geometry::Rect;
use game_core::physics::obstacle_resolve::CollisionEnv;
use game_core::physics::rng::SimpleRng;
use game_core::physics::spatial_hash::ObstacleField;
use game_core::tuning::TuningTable;
use game_core::util::{dist_sq, normalize};

/// 敵から見たプレイヤーの状況
#[derive(Clone, Copy, Debug)]
pub struct Sense {
    pub ex:    f32,
    pub ey:    f32,
    pub px:    f32,
    pub py:    f32,
    pub dist:  f32,
    /// プレイヤー方向の単位ベクトル
    pub dir:   (f32, f32),
    pub los:   bool,
    /// 索敵範囲内か
    pub aggro: bool,
}

/// 行動の出力。`steer` が false の方向はステアリングで曲げない（突進・回避）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intent {
    pub dir:        (f32, f32),
    pub speed_mult: f32,
    pub maneuver:   Maneuver,
    pub steer:      bool,
}

impl Intent {
    pub fn locked(dir: (f32, f32), speed_mult: f32, maneuver: Maneuver) -> Self {
        Self { dir, speed_mult, maneuver, steer: false }
    }

    pub fn steered(dir: (f32, f32), speed_mult: f32, maneuver: Maneuver) -> Self {
        Self { dir, speed_mult, maneuver, steer: true }
    }
}

fn sense(enemy: &Enemy, ctx: &SimContext, aggro_radius: f32, field: &ObstacleField) -> Sense {
    let (ex, ey) = (enemy.actor.x(), enemy.actor.y());
    let (px, py) = (ctx.player_x, ctx.player_y);
    let d2 = dist_sq(ex, ey, px, py);
    Sense {
        ex,
        ey,
        px,
        py,
        dist: d2.sqrt(),
        dir: normalize(px - ex, py - ey),
        los: field.line_of_sight(ex, ey, px, py),
        aggro: ctx.player_alive && d2 <= aggro_radius * aggro_radius,
    }
}

/// 1 体分の行動を決める。優先順位: 突進 > 回避 > 遮蔽 > ジグザグ > 壁沿い > 追跡 / 徘徊
#[allow(clippy::too_many_arguments)]
pub fn decide(
    enemy: &mut Enemy,
    ctx: &SimContext,
    tuning: &TuningTable,
    field: &ObstacleField,
    flow: &FlowField,
    projectiles: &[Projectile],
    rng: &mut SimpleRng,
    outbox: &mut Vec<SideEffect>,
    buf: &mut Vec<usize>,
) -> Intent {
    let t = tuning.for_class(enemy.class);
    let s = sense(enemy, ctx, t.aggro_radius, field);

    if enemy.class.is_elite() {
        if let Some(i) = dash::update(enemy, t.dash.as_ref(), &s, ctx.dt, rng, outbox) {
            return i;
        }
        juke::nearest_player_projectiles(projectiles, s.ex, s.ey, buf);
        let scan = std::mem::take(buf);
        let juked = juke::update(enemy, t.juke.as_ref(), &s, projectiles, &scan, rng, outbox);
        *buf = scan;
        if let Some(i) = juked {
            return i;
        }
        if s.aggro {
            if let Some(i) = cover::update(enemy, t.cover.as_ref(), &s, field, rng, buf) {
                return i;
            }
            if let Some(i) = strafe::update_zigzag(enemy, t.zigzag.as_ref(), &s, ctx.ranged_aware, rng) {
                return i;
            }
            let flow_dir = flow.direction_at(s.ex, s.ey);
            if let Some(i) = strafe::update_wall_follow(enemy, t.wall_follow.as_ref(), &s, flow_dir) {
                return i;
            }
        }
    }

    if s.aggro {
        let dir = if s.los {
            s.dir
        } else {
            flow.direction_at(s.ex, s.ey)
                .filter(|d| d.0 != 0.0 || d.1 != 0.0)
                .unwrap_or(s.dir)
        };
        return Intent::steered(dir, 1.0, Maneuver::Pursue);
    }
    wander::update(enemy, &tuning.global, rng)
}

/// 射撃できる敵がプレイヤーを狙う。発射した弾を返す（ID は呼び出し側で採番）
fn try_fire(enemy: &mut Enemy, ctx: &SimContext, field: &ObstacleField, maneuver: Maneuver) -> Option<Projectile> {
    if !enemy.ranged || !ctx.player_alive || matches!(maneuver, Maneuver::Dash | Maneuver::DashTelegraph) {
        return None;
    }
    if enemy.actor.timers.is_active(TimerKind::RangedCooldown) {
        return None;
    }
    let (ex, ey) = (enemy.actor.x(), enemy.actor.y());
    if dist_sq(ex, ey, ctx.player_x, ctx.player_y) > ENEMY_FIRE_RANGE * ENEMY_FIRE_RANGE
        || !field.line_of_sight(ex, ey, ctx.player_x, ctx.player_y)
    {
        return None;
    }
    let (dx, dy) = normalize(ctx.player_x - ex, ctx.player_y - ey);
    enemy.actor.timers.set(TimerKind::RangedCooldown, ENEMY_FIRE_INTERVAL);
    let p = Projectile::new(
        0,
        ex,
        ey,
        dx * ENEMY_PROJECTILE_SPEED,
        dy * ENEMY_PROJECTILE_SPEED,
        PROJECTILE_LIFETIME,
        Team::Enemy,
        enemy.class.projectile_damage(),
    )
    .with_source(enemy.actor.id, enemy.class);
    Some(p)
}

/// 全敵の行動決定・移動・射撃
pub(crate) fn update_enemies(w: &mut GameWorld, ctx: &SimContext) {
    let solids: Vec<(u32, Rect)> = w
        .enemies
        .iter()
        .filter(|e| e.class.is_solid() && !e.actor.is_defeated())
        .map(|e| (e.actor.id, e.actor.rect()))
        .collect();
    let mut fired = Vec::new();
    let mut others: Vec<Rect> = Vec::with_capacity(solids.len());
    let mut scan_buf = Vec::new();

    {
        let GameWorld {
            enemies, projectiles, field, flow, rng, content, outbox, query_buf, enemy_slow, world_w, world_h, ..
        } = &mut *w;
        let tuning = &content.tuning;
        let field: &ObstacleField = field;
        let flow: &FlowField = flow;
        let projectiles: &[Projectile] = projectiles;

        for enemy in enemies.iter_mut() {
            if enemy.actor.is_defeated() {
                continue;
            }
            let intent = decide(enemy, ctx, tuning, field, flow, projectiles, rng, outbox, &mut scan_buf);
            enemy.ai.maneuver = intent.maneuver;

            let t = tuning.for_class(enemy.class);
            let (ex, ey) = (enemy.actor.x(), enemy.actor.y());
            let mut dir = intent.dir;
            if intent.steer && (dir.0 != 0.0 || dir.1 != 0.0) {
                let req = SteeringRequest {
                    x: ex,
                    y: ey,
                    desired: dir,
                    target: (ctx.player_x, ctx.player_y),
                    clear_los: field.line_of_sight(ex, ey, ctx.player_x, ctx.player_y),
                };
                dir = steer_heading(field, &tuning.global, &req);
            }
            if intent.maneuver == Maneuver::DashTelegraph {
                enemy.actor.face(ctx.player_x - ex, ctx.player_y - ey);
            } else {
                enemy.actor.face(dir.0, dir.1);
            }

            let ally_slow = enemy_slow.get(&enemy.actor.id).copied().unwrap_or(0.0);
            let speed = enemy.actor.speed
                * intent.speed_mult
                * reactions::speed_mult(enemy, t)
                * (1.0 - ally_slow).max(0.0);
            let step = speed * ctx.dt;
            if step > 0.0 && (dir.0 != 0.0 || dir.1 != 0.0) {
                others.clear();
                others.extend(solids.iter().filter(|(id, _)| *id != enemy.actor.id).map(|(_, r)| *r));
                let env = CollisionEnv {
                    field,
                    solids: &others,
                    water_walk: false,
                    world_w: *world_w,
                    world_h: *world_h,
                };
                move_with_fallback(
                    &mut enemy.actor.body,
                    &mut enemy.ai,
                    dir.0 * step,
                    dir.1 * step,
                    &env,
                    query_buf,
                    ctx.dt,
                    tuning.global.stuck_flip_time,
                );
            }

            if let Some(p) = try_fire(enemy, ctx, field, intent.maneuver) {
                fired.push(p);
            }
        }
    }

    for mut p in fired {
        p.id = w.alloc_id();
        w.projectiles.push(p);
        w.cue(AudioCue::Shoot);
    }
}
