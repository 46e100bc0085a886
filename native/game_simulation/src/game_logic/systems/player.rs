//! Path: native/game_simulation/src/game_logic/systems/player.rs
//! Summary: プレイヤーの移動・回避ダッシュ・近接 / 遠隔攻撃・インタラクト・死亡演出

use super::combat::{strike_enemy, Strike};
use super::items::on_obstacle_broken;
use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{FrameEvent, FrameInput, GameWorld, Team, TimerKind};
use game_core::constants::{
    MELEE_COOLDOWN, MELEE_DAMAGE, MELEE_REACH, MIN_SLOW_FACTOR, PLAYER_DASH_COOLDOWN,
    PLAYER_DASH_DURATION, PLAYER_DASH_SPEED_MULT, PLAYER_DEATH_SEQUENCE, PROJECTILE_LIFETIME,
    PROJECTILE_SPEED, RANGED_COOLDOWN, RANGED_DAMAGE, RECENTLY_FIRED_WINDOW,
};
use game_core::obstacle::ObstacleKind;
use game_core::physics::geometry::Rect;
use game_core::physics::obstacle_resolve::{move_with_collision, CollisionEnv};
use game_core::util::{dist, dot, normalize};

/// インタラクトが届く距離（プレイヤーの矩形からの余白）
const INTERACT_MARGIN: f32 = 16.0;
/// 近接攻撃の最小リーチ（デバフで 0 にならないように）
const MIN_REACH: f32 = 4.0;

/// 減速要因（地形・突風・敵オーラ）を合成した移動速度係数
pub fn slow_factor(hazard_slow: f32, gust_slow: f32, aura_slow: f32) -> f32 {
    (hazard_slow * gust_slow * (1.0 - aura_slow)).clamp(MIN_SLOW_FACTOR, 1.0)
}

pub(crate) fn update_player(w: &mut GameWorld, input: &FrameInput, dt: f32) {
    if w.player.actor.is_defeated() {
        return;
    }
    w.player.ranged_equipped = input.ranged_equipped;
    move_player(w, input, dt);
    if input.attack {
        melee_attack(w);
    }
    if input.ranged_attack {
        ranged_attack(w);
    }
    if input.interact {
        interact(w);
    }
}

fn move_player(w: &mut GameWorld, input: &FrameInput, dt: f32) {
    let solids: Vec<Rect> = w
        .enemies
        .iter()
        .filter(|e| e.class.is_solid() && !e.actor.is_defeated())
        .map(|e| e.actor.rect())
        .collect();
    let GameWorld { player, field, buffs, debuffs, outbox, query_buf, world_w, world_h, .. } = &mut *w;

    let (mut mx, mut my) = normalize(input.move_x, input.move_y);
    let timers = &mut player.actor.timers;

    // 回避ダッシュは順序付きタイマーなので自前で進める
    let dashing = timers.is_active(TimerKind::DashActive);
    if dashing {
        timers.tick_edge(TimerKind::DashActive, dt);
    } else if input.dash && !timers.is_active(TimerKind::DashCooldown) && (mx != 0.0 || my != 0.0) {
        timers.set(TimerKind::DashActive, PLAYER_DASH_DURATION);
        timers.set(TimerKind::DashCooldown, PLAYER_DASH_COOLDOWN * (1.0 - buffs.dash_cdr));
        outbox.push(SideEffect::Cue(AudioCue::Dash));
    }
    let dashing = dashing || timers.is_active(TimerKind::DashActive);
    if dashing && mx == 0.0 && my == 0.0 {
        mx = player.actor.facing_x;
        my = player.actor.facing_y;
    }
    if mx == 0.0 && my == 0.0 {
        return;
    }

    let slow = slow_factor(player.hazard_slow, player.gust_slow, debuffs.player_slow);
    let dash_mult = if dashing { PLAYER_DASH_SPEED_MULT } else { 1.0 };
    let step = player.actor.speed * slow * dash_mult * dt;
    let env = CollisionEnv {
        field: &*field,
        solids: &solids,
        water_walk: buffs.water_walk,
        world_w: *world_w,
        world_h: *world_h,
    };
    move_with_collision(&mut player.actor.body, mx * step, my * step, &env, query_buf);
    player.actor.face(mx, my);
}

fn melee_attack(w: &mut GameWorld) {
    if w.player.actor.timers.is_active(TimerKind::AttackCooldown) {
        return;
    }
    let cooldown = MELEE_COOLDOWN * (1.0 - w.buffs.aspd);
    w.player.actor.timers.set(TimerKind::AttackCooldown, cooldown);
    w.cue(AudioCue::Swing);

    let reach = (MELEE_REACH + w.buffs.range - w.debuffs.reach_penalty).max(MIN_REACH);
    let damage = MELEE_DAMAGE + w.buffs.atk;
    let crit_bonus = w.buffs.crit;
    let (px, py) = (w.player.actor.x(), w.player.actor.y());
    let (fx, fy) = (w.player.actor.facing_x, w.player.actor.facing_y);
    let player_half = w.player.actor.body.hw;

    let GameWorld { enemies, field, rng, content, frame_events, outbox, .. } = &mut *w;
    for enemy in enemies.iter_mut() {
        if enemy.actor.is_defeated() {
            continue;
        }
        let (ex, ey) = (enemy.actor.x(), enemy.actor.y());
        let gap = dist(px, py, ex, ey) - enemy.actor.body.hw - player_half;
        if gap > reach || dot(fx, fy, ex - px, ey - py) < 0.0 {
            continue;
        }
        if !field.line_of_sight(px, py, ex, ey) {
            continue;
        }
        let strike = Strike::roll(damage, crit_bonus, (px, py), rng);
        strike_enemy(enemy, &strike, &content.tuning, frame_events, outbox);
    }

    // 手前の樽・木箱も壊せる
    let swing = Rect::from_center(px + fx * reach, py + fy * reach, reach * 0.5 + 4.0, reach * 0.5 + 4.0);
    let mut broken = Vec::new();
    field.query_rect_into(&swing, &mut broken);
    broken.retain(|&idx| {
        field
            .obstacles
            .get_mut(idx)
            .is_some_and(|o| o.kind.is_breakable() && o.apply_damage(damage))
    });
    for idx in broken {
        on_obstacle_broken(w, idx);
    }
}

fn ranged_attack(w: &mut GameWorld) {
    let timers = &mut w.player.actor.timers;
    if timers.is_active(TimerKind::RangedCooldown) {
        return;
    }
    timers.set(TimerKind::RangedCooldown, RANGED_COOLDOWN * (1.0 - w.buffs.aspd));
    timers.set(TimerKind::RecentlyFired, RECENTLY_FIRED_WINDOW);
    let (fx, fy) = (w.player.actor.facing_x, w.player.actor.facing_y);
    let (px, py) = (w.player.actor.x(), w.player.actor.y());
    let damage = RANGED_DAMAGE + w.buffs.atk;
    w.spawn_projectile(
        Team::Player,
        px,
        py,
        fx * PROJECTILE_SPEED,
        fy * PROJECTILE_SPEED,
        damage,
        PROJECTILE_LIFETIME,
        0,
        None,
    );
    w.cue(AudioCue::Shoot);
}

/// 近くの宝箱を開け、鍵があれば施錠ゲートを開ける
fn interact(w: &mut GameWorld) {
    let reach = w.player.actor.rect().expand(INTERACT_MARGIN, INTERACT_MARGIN);
    let mut near = Vec::new();
    w.field.query_rect_into(&reach, &mut near);

    for idx in near {
        let Some(o) = w.field.obstacles.get_mut(idx) else {
            continue;
        };
        match o.kind {
            ObstacleKind::Chest if !o.destroyed => {
                o.destroyed = true;
                log::debug!("chest {} opened", idx);
                on_obstacle_broken(w, idx);
                w.cue(AudioCue::Unlock);
                return;
            }
            ObstacleKind::Gate if o.locked && w.player.keys > 0 => {
                o.locked = false;
                w.player.keys -= 1;
                w.field.mark_changed();
                w.cue(AudioCue::Unlock);
                log::debug!("gate {} unlocked", idx);
                return;
            }
            _ => {}
        }
    }
}

/// HP が尽きたら死亡演出を始め、終わったら一度だけ通知する（ポーズ中も進む）
pub(crate) fn update_player_death(w: &mut GameWorld) {
    let p = &mut w.player;
    if p.actor.is_defeated() && !p.death_started {
        p.death_started = true;
        p.actor.timers.set(TimerKind::DeathSequence, PLAYER_DEATH_SEQUENCE);
        p.actor.knockback_x = 0.0;
        p.actor.knockback_y = 0.0;
        log::info!("player defeated at frame {}", w.frame_id);
        w.cue(AudioCue::Defeat);
        return;
    }
    if p.death_started && !p.defeat_reported && !p.actor.timers.is_active(TimerKind::DeathSequence) {
        p.defeat_reported = true;
        w.frame_events.push(FrameEvent::PlayerDefeated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use game_core::enemy::EnemyClass;
    use game_core::obstacle::Obstacle;

    fn world() -> GameWorld {
        let mut w = GameWorld::new(ContentPack::default());
        w.place_player(200.0, 200.0);
        w
    }

    #[test]
    fn slow_factor_is_floored() {
        assert_eq!(slow_factor(1.0, 1.0, 0.0), 1.0);
        assert_eq!(slow_factor(0.1, 0.5, 0.5), MIN_SLOW_FACTOR);
    }

    #[test]
    fn moves_at_speed_along_input() {
        let mut w = world();
        let input = FrameInput { move_x: 1.0, ..FrameInput::default() };
        update_player(&mut w, &input, 0.1);
        assert!((w.player.actor.x() - 215.0).abs() < 1e-3);
        assert_eq!(w.player.actor.facing_x, 1.0);
    }

    #[test]
    fn melee_hits_enemy_in_front_only() {
        let mut w = world();
        let front = w.spawn_enemy(EnemyClass::Mook, "a", 230.0, 200.0);
        let behind = w.spawn_enemy(EnemyClass::Mook, "b", 170.0, 200.0);
        w.player.actor.face(1.0, 0.0);
        let input = FrameInput { attack: true, ..FrameInput::default() };
        update_player(&mut w, &input, 0.016);
        let hp_front = w.enemy(front).map(|e| e.actor.hp).unwrap_or_default();
        let hp_behind = w.enemy(behind).map(|e| e.actor.hp).unwrap_or_default();
        assert!(hp_front < EnemyClass::Mook.max_hp());
        assert_eq!(hp_behind, EnemyClass::Mook.max_hp());
        assert!(w.player.actor.timers.is_active(TimerKind::AttackCooldown));
    }

    #[test]
    fn ranged_attack_marks_recently_fired() {
        let mut w = world();
        w.player.actor.face(0.0, 1.0);
        let input = FrameInput { ranged_attack: true, ..FrameInput::default() };
        update_player(&mut w, &input, 0.016);
        assert_eq!(w.projectiles.len(), 1);
        assert!(w.projectiles[0].vy > 0.0);
        assert!(w.player.actor.timers.is_active(TimerKind::RecentlyFired));
        // クールダウン中は撃てない
        update_player(&mut w, &input, 0.016);
        assert_eq!(w.projectiles.len(), 1);
    }

    #[test]
    fn key_unlocks_adjacent_gate() {
        let mut w = world();
        w.load_obstacles(vec![Obstacle::gate(Rect::new(214.0, 150.0, 10.0, 100.0), true)]);
        let input = FrameInput { interact: true, ..FrameInput::default() };
        update_player(&mut w, &input, 0.016);
        assert!(w.field.obstacles[0].locked);
        w.player.keys = 1;
        update_player(&mut w, &input, 0.016);
        assert!(!w.field.obstacles[0].locked);
        assert_eq!(w.player.keys, 0);
    }

    #[test]
    fn death_sequence_reports_once() {
        let mut w = world();
        w.player.actor.hp = 0.0;
        update_player_death(&mut w);
        assert!(w.player.death_started);
        w.player.actor.timers.tick_paused(PLAYER_DEATH_SEQUENCE + 0.1);
        update_player_death(&mut w);
        update_player_death(&mut w);
        let reports = w.frame_events.iter().filter(|e| **e == FrameEvent::PlayerDefeated).count();
        assert_eq!(reports, 1);
    }
}
