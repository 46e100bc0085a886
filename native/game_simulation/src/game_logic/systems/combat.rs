//! Path: native/game_simulation/src/game_logic/systems/combat.rs
//! Summary: ダメージ解決（プレイヤー → 敵、敵 → プレイヤー）と接触ダメージ

use super::super::behavior::reactions;
use super::super::context::SimContext;
use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{Enemy, FrameEvent, GameWorld, HitLabel, PlayerState, StatusLabel, TimerKind};
use game_core::constants::{
    BASE_CRIT_CHANCE, CONTACT_SEPARATION_BIAS, CRIT_MULTIPLIER, KNOCKBACK_SPEED, PLAYER_INVULN,
};
use game_core::enemy::EnemyClass;
use game_core::physics::geometry::Rect;
use game_core::physics::obstacle_resolve::{move_with_collision, CollisionEnv};
use game_core::physics::separation::separate_entities;
use game_core::physics::rng::SimpleRng;
use game_core::tuning::{StrikeTuning, TuningTable};
use game_core::util::normalize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitOutcome {
    pub damage: f32,
    pub label:  HitLabel,
}

/// プレイヤーの攻撃。会心はダメージ ×1.5 で相手の DR を半減し、DR 分を差し引く
pub fn player_hit_damage(base: f32, crit: bool, target_dr: f32) -> HitOutcome {
    let (raw, dr) = if crit {
        (base * CRIT_MULTIPLIER, target_dr.max(0.0) * 0.5)
    } else {
        (base, target_dr.max(0.0))
    };
    let damage = (raw - dr).max(0.0);
    let label = if damage <= 0.0 {
        HitLabel::Blocked
    } else if crit {
        HitLabel::Crit
    } else {
        HitLabel::Normal
    };
    HitOutcome { damage, label }
}

/// 敵からプレイヤーへの 1 ヒット分の入力
#[derive(Clone, Copy, Debug)]
pub struct IncomingHit {
    pub base:       f32,
    pub player_dr:  f32,
    pub strike:     StrikeTuning,
    /// 敵個体が持つ防御無視ダメージ（ボスのフェーズ強化など）
    pub extra_true: f32,
    pub crit:       bool,
    /// ボス以外は最低保証ダメージを持つ
    pub chip:       bool,
}

pub fn enemy_hit_damage(hit: &IncomingHit) -> HitOutcome {
    let s = &hit.strike;
    let raw = hit.base + if hit.crit { s.crit_bonus } else { 0.0 };
    let mut dr = (hit.player_dr - s.armor_pen).max(0.0);
    if hit.crit {
        dr *= 1.0 - s.crit_dr_ignore.clamp(0.0, 1.0);
    }
    let absorbed = dr.min(raw);
    let mut damage = raw - absorbed + s.true_damage + hit.extra_true;
    if hit.chip && damage < s.chip_floor {
        damage = s.chip_floor;
    }
    let damage = damage.max(0.0);

    let label = if damage <= 0.0 {
        HitLabel::Blocked
    } else if hit.crit {
        HitLabel::Crit
    } else if s.armor_pen > 0.0 && hit.player_dr > 0.0 {
        HitLabel::Pierce
    } else if absorbed > 0.0 && absorbed * 2.0 >= raw {
        HitLabel::Graze
    } else {
        HitLabel::Normal
    };
    HitOutcome { damage, label }
}

/// プレイヤーの攻撃 1 発分
#[derive(Clone, Copy, Debug)]
pub struct Strike {
    pub damage: f32,
    pub crit:   bool,
    /// ノックバックの起点
    pub from:   (f32, f32),
}

impl Strike {
    pub fn roll(damage: f32, crit_bonus: f32, from: (f32, f32), rng: &mut SimpleRng) -> Self {
        Self { damage, crit: rng.chance(BASE_CRIT_CHANCE + crit_bonus), from }
    }
}

/// 敵にプレイヤーの攻撃を当てる。HP は 0 で止め、除去はフレーム末尾に任せる
pub(crate) fn strike_enemy(
    enemy: &mut Enemy,
    strike: &Strike,
    tuning: &TuningTable,
    events: &mut Vec<FrameEvent>,
    outbox: &mut Vec<SideEffect>,
) -> f32 {
    let t = tuning.for_class(enemy.class);
    let dr = reactions::effective_dr(enemy, t);
    let outcome = player_hit_damage(strike.damage, strike.crit, dr);
    enemy.actor.hp = (enemy.actor.hp - outcome.damage).max(0.0);

    // 被弾前の構えで吹き飛びを決める（今回のヒットで入る構えは次から効く）
    let (kx, ky) = normalize(enemy.actor.x() - strike.from.0, enemy.actor.y() - strike.from.1);
    let kb = KNOCKBACK_SPEED * reactions::knockback_mult(enemy, t);
    enemy.actor.add_knockback(kx * kb, ky * kb);
    reactions::on_hit(enemy, t, &tuning.global);

    events.push(FrameEvent::FloatingText {
        x: enemy.actor.x(),
        y: enemy.actor.y() - enemy.actor.body.hh,
        amount: outcome.damage,
        label: outcome.label,
    });
    let cue = match outcome.label {
        HitLabel::Crit => AudioCue::Crit,
        HitLabel::Blocked => AudioCue::Block,
        _ => AudioCue::Hit,
    };
    outbox.push(SideEffect::Cue(cue));
    outcome.damage
}

/// プレイヤーへの被ダメージを確定する。シールドがあれば 1 回分を丸ごと無効化
pub(crate) fn damage_player(
    player: &mut PlayerState,
    outcome: HitOutcome,
    events: &mut Vec<FrameEvent>,
    outbox: &mut Vec<SideEffect>,
) {
    let (x, y) = (player.actor.x(), player.actor.y());
    player.actor.timers.set(TimerKind::Invuln, PLAYER_INVULN);
    if player.shield_ready && outcome.damage > 0.0 {
        player.shield_ready = false;
        events.push(FrameEvent::FloatingText { x, y, amount: 0.0, label: HitLabel::Blocked });
        events.push(FrameEvent::StatusText { x, y, status: StatusLabel::Shield });
        outbox.push(SideEffect::Cue(AudioCue::Shield));
        return;
    }
    events.push(FrameEvent::FloatingText { x, y, amount: outcome.damage, label: outcome.label });
    if outcome.damage <= 0.0 {
        outbox.push(SideEffect::Cue(AudioCue::Block));
        return;
    }
    player.actor.hp = (player.actor.hp - outcome.damage).max(0.0);
    player.hurt_this_frame = true;
    events.push(FrameEvent::PlayerDamaged { damage: outcome.damage });
    events.push(FrameEvent::ScreenShake { intensity: 2.0 + outcome.damage, duration: 0.15 });
    outbox.push(SideEffect::Cue(if outcome.label == HitLabel::Crit { AudioCue::Crit } else { AudioCue::Hit }));
}

/// 発射元（いなければクラス既定）から敵弾・接触攻撃の会心 / 貫通パラメータを引く
pub(crate) fn incoming_from(
    class: EnemyClass,
    extra_true: f32,
    base: f32,
    player_dr: f32,
    tuning: &TuningTable,
    rng: &mut SimpleRng,
) -> IncomingHit {
    let strike = tuning.for_class(class).strike;
    IncomingHit {
        base,
        player_dr,
        strike,
        extra_true,
        crit: rng.chance(strike.crit_chance),
        chip: class != EnemyClass::Boss,
    }
}

/// 敵とプレイヤーの接触。ダメージを与えてから、重なりを押し分ける
pub(crate) fn resolve_contacts(w: &mut GameWorld, ctx: &SimContext) {
    let GameWorld {
        player, enemies, field, rng, content, frame_events, outbox, query_buf, world_w, world_h, ..
    } = &mut *w;
    let player_dr = ctx.buffs.dr + ctx.buffs.touch_dr;

    for enemy in enemies.iter_mut() {
        if enemy.actor.is_defeated() || !enemy.actor.rect().intersects(&player.actor.rect()) {
            continue;
        }
        if !player.actor.is_defeated()
            && !enemy.actor.timers.is_active(TimerKind::ContactCooldown)
            && !player.actor.timers.is_active(TimerKind::Invuln)
        {
            let hit = incoming_from(
                enemy.class,
                enemy.true_damage,
                enemy.touch_damage,
                player_dr,
                &content.tuning,
                rng,
            );
            let outcome = enemy_hit_damage(&hit);
            enemy.actor.timers.set(TimerKind::ContactCooldown, enemy.hit_cooldown);
            damage_player(player, outcome, frame_events, outbox);
        }

        // 押し分けは写しで計算し、障害物を考慮して適用する
        let mut a = player.actor.body;
        let mut b = enemy.actor.body;
        if separate_entities(&mut a, &mut b, CONTACT_SEPARATION_BIAS) {
            let no_solids: [Rect; 0] = [];
            let env = CollisionEnv {
                field: &*field,
                solids: &no_solids,
                water_walk: ctx.buffs.water_walk,
                world_w: *world_w,
                world_h: *world_h,
            };
            let (pdx, pdy) = (a.x - player.actor.body.x, a.y - player.actor.body.y);
            move_with_collision(&mut player.actor.body, pdx, pdy, &env, query_buf);
            let env = CollisionEnv { water_walk: false, ..env };
            let (edx, edy) = (b.x - enemy.actor.body.x, b.y - enemy.actor.body.y);
            move_with_collision(&mut enemy.actor.body, edx, edy, &env, query_buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(base: f32, dr: f32, strike: StrikeTuning, crit: bool, chip: bool) -> IncomingHit {
        IncomingHit { base, player_dr: dr, strike, extra_true: 0.0, crit, chip }
    }

    #[test]
    fn plain_player_hit_subtracts_dr() {
        let o = player_hit_damage(3.0, false, 0.0);
        assert_eq!(o.damage, 3.0);
        assert_eq!(o.label, HitLabel::Normal);
        let o = player_hit_damage(3.0, false, 5.0);
        assert_eq!(o.damage, 0.0);
        assert_eq!(o.label, HitLabel::Blocked);
    }

    #[test]
    fn crit_multiplies_and_halves_dr() {
        // 4 × 1.5 − 2 / 2 = 5
        let o = player_hit_damage(4.0, true, 2.0);
        assert!((o.damage - 5.0).abs() < 1e-5);
        assert_eq!(o.label, HitLabel::Crit);
    }

    #[test]
    fn chip_floor_applies_to_non_boss_only() {
        let s = StrikeTuning { chip_floor: 0.25, ..StrikeTuning::default() };
        let o = enemy_hit_damage(&hit(1.0, 10.0, s, false, true));
        assert!((o.damage - 0.25).abs() < 1e-6);
        let o = enemy_hit_damage(&hit(1.0, 10.0, s, false, false));
        assert_eq!(o.damage, 0.0);
        assert_eq!(o.label, HitLabel::Blocked);
    }

    #[test]
    fn armor_pen_and_true_damage() {
        let s = StrikeTuning {
            armor_pen: 1.0,
            true_damage: 0.5,
            chip_floor: 0.0,
            ..StrikeTuning::default()
        };
        // DR 2 − 貫通 1 = 1 → 3 − 1 + 0.5
        let o = enemy_hit_damage(&hit(3.0, 2.0, s, false, false));
        assert!((o.damage - 2.5).abs() < 1e-6);
        assert_eq!(o.label, HitLabel::Pierce);
    }

    #[test]
    fn crit_ignores_part_of_dr() {
        let s = StrikeTuning {
            crit_bonus: 1.0,
            crit_dr_ignore: 0.5,
            armor_pen: 0.0,
            true_damage: 0.0,
            chip_floor: 0.0,
            ..StrikeTuning::default()
        };
        // (2 + 1) − 2 × 0.5
        let o = enemy_hit_damage(&hit(2.0, 2.0, s, true, false));
        assert!((o.damage - 2.0).abs() < 1e-6);
        assert_eq!(o.label, HitLabel::Crit);
    }

    #[test]
    fn mostly_absorbed_hit_is_graze() {
        let s = StrikeTuning { chip_floor: 0.0, ..StrikeTuning::default() };
        let o = enemy_hit_damage(&hit(2.0, 1.5, s, false, false));
        assert_eq!(o.label, HitLabel::Graze);
    }

    #[test]
    fn shield_negates_one_hit() {
        let mut p = PlayerState::new(1, 0.0, 0.0);
        p.shield_ready = true;
        let mut events = Vec::new();
        let mut outbox = Vec::new();
        let hp = p.actor.hp;
        damage_player(&mut p, HitOutcome { damage: 4.0, label: HitLabel::Normal }, &mut events, &mut outbox);
        assert_eq!(p.actor.hp, hp);
        assert!(!p.shield_ready);
        assert!(p.actor.timers.is_active(TimerKind::Invuln));
        damage_player(&mut p, HitOutcome { damage: 4.0, label: HitLabel::Normal }, &mut events, &mut outbox);
        assert_eq!(p.actor.hp, hp - 4.0);
        assert!(p.hurt_this_frame);
    }

    #[test]
    fn mook_strike_leaves_two_hp_without_resistance() {
        let tuning = TuningTable::default();
        let mut e = Enemy::new(5, EnemyClass::Mook, "grunt", 100.0, 100.0);
        let mut events = Vec::new();
        let mut outbox = Vec::new();
        let s = Strike { damage: 3.0, crit: false, from: (80.0, 100.0) };
        strike_enemy(&mut e, &s, &tuning, &mut events, &mut outbox);
        assert_eq!(e.actor.hp, 2.0);
        assert!(!e.actor.is_defeated());
        assert!((e.actor.knockback_x - KNOCKBACK_SPEED).abs() < 1e-3);
        assert!(e.actor.timers.is_active(TimerKind::RecentlyHit));
    }
}
