//! Path: native/game_simulation/src/world/actor.rs
//! Summary: アクター共通データ（位置・箱・向き・HP・ノックバック・タイマー）と敵 / 仲間

use super::boss::BossState;
use super::status::{StatusTimers, TimerKind};
use game_core::constants::COMPANION_SPEED;
use game_core::enemy::EnemyClass;
use game_core::physics::geometry::{Body, Rect};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy(EnemyClass),
    Companion,
}

/// 全アクター共通の物理・戦闘状態
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id:          u32,
    pub kind:        ActorKind,
    pub body:        Body,
    pub facing_x:    f32,
    pub facing_y:    f32,
    pub speed:       f32,
    pub hp:          f32,
    pub max_hp:      f32,
    /// 基本ダメージ軽減
    pub dr:          f32,
    pub knockback_x: f32,
    pub knockback_y: f32,
    pub timers:      StatusTimers,
    /// 時間窓内の連続被弾数
    pub hit_streak:  u32,
    /// アニメーション用の経過時間
    pub anim_time:   f32,
}

impl Actor {
    pub fn new(id: u32, kind: ActorKind, x: f32, y: f32, half_extent: f32, speed: f32, max_hp: f32) -> Self {
        Self {
            id,
            kind,
            body: Body::new(x, y, half_extent, half_extent),
            facing_x: 1.0,
            facing_y: 0.0,
            speed,
            hp: max_hp,
            max_hp,
            dr: 0.0,
            knockback_x: 0.0,
            knockback_y: 0.0,
            timers: StatusTimers::default(),
            hit_streak: 0,
            anim_time: 0.0,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.body.y
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// HP 0 以下は「撃破済み」。除去はフレーム末尾で行う
    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0.0
    }

    /// HP を 0..=max_hp に収める
    pub fn clamp_hp(&mut self) {
        self.hp = self.hp.clamp(0.0, self.max_hp);
    }

    pub fn face(&mut self, dx: f32, dy: f32) {
        let len = (dx * dx + dy * dy).sqrt();
        if len > 1e-4 {
            self.facing_x = dx / len;
            self.facing_y = dy / len;
        }
    }

    /// 描画用アニメーションフレーム（4 コマ）
    pub fn anim_frame(&self) -> u8 {
        ((self.anim_time * 8.0) as u32 % 4) as u8
    }

    pub fn add_knockback(&mut self, vx: f32, vy: f32) {
        self.knockback_x += vx;
        self.knockback_y += vy;
    }

    pub fn is_timer_active(&self, kind: TimerKind) -> bool {
        self.timers.is_active(kind)
    }
}

/// そのフレームに選ばれた行動（描画・デバッグ用）
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Maneuver {
    #[default]
    Idle,
    Wander,
    Pursue,
    DashTelegraph,
    Dash,
    Juke,
    Cover,
    Zigzag,
    WallFollow,
}

impl Maneuver {
    /// 精鋭クラスだけが使う重ね掛け行動か
    pub fn is_layered(&self) -> bool {
        !matches!(self, Self::Idle | Self::Wander | Self::Pursue)
    }
}

/// 敵 AI の方向・目標などの持続データ（タイマーは Actor 側）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiState {
    pub wander_x:       f32,
    pub wander_y:       f32,
    pub dash_x:         f32,
    pub dash_y:         f32,
    pub juke_x:         f32,
    pub juke_y:         f32,
    pub cover_target:   Option<(f32, f32)>,
    /// ジグザグの横方向（±1）
    pub strafe_side:    f32,
    pub wall_x:         f32,
    pub wall_y:         f32,
    /// 詰まったときの横逃げ方向（±1）
    pub avoid_sign:     f32,
    pub stuck_time:     f32,
    pub maneuver:       Maneuver,
}

impl Default for AiState {
    fn default() -> Self {
        Self {
            wander_x: 0.0,
            wander_y: 0.0,
            dash_x: 0.0,
            dash_y: 0.0,
            juke_x: 0.0,
            juke_y: 0.0,
            cover_target: None,
            strafe_side: 1.0,
            wall_x: 0.0,
            wall_y: 0.0,
            avoid_sign: 1.0,
            stuck_time: 0.0,
            maneuver: Maneuver::Idle,
        }
    }
}

/// 敵
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub actor:        Actor,
    pub class:        EnemyClass,
    /// オーラ・ボスプロファイルを引くためのコンテンツ上の名前
    pub identity:     String,
    pub touch_damage: f32,
    /// 防御無視で必ず通るダメージ
    pub true_damage:  f32,
    /// 接触攻撃の間隔
    pub hit_cooldown: f32,
    /// 撃破時に進めるクエスト
    pub quest:        Option<String>,
    pub ai:           AiState,
    pub boss:         Option<BossState>,
    /// 敵オーラのトリガーごとのクールダウン
    pub trigger_cooldowns: Vec<f32>,
    /// ガード中の一時 DR
    pub guard_dr:     f32,
    /// 激昂中の一時 DR
    pub enrage_dr:    f32,
    pub enrage_speed_mult: f32,
    /// 敵オーラ由来の自己 DR（毎フレーム再計算）
    pub aura_dr:      f32,
    /// 射撃能力を持つか
    pub ranged:       bool,
}

impl Enemy {
    /// 効いているタイマーの一時 DR のうち大きい方
    pub fn temp_dr(&self) -> f32 {
        let timers = &self.actor.timers;
        let guard = if timers.is_active(TimerKind::Guard) { self.guard_dr } else { 0.0 };
        let enrage = if timers.is_active(TimerKind::Enrage) { self.enrage_dr } else { 0.0 };
        guard.max(enrage)
    }

    pub fn new(id: u32, class: EnemyClass, identity: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            actor: Actor::new(
                id,
                ActorKind::Enemy(class),
                x,
                y,
                class.half_extent(),
                class.speed(),
                class.max_hp(),
            ),
            class,
            identity: identity.into(),
            touch_damage: class.touch_damage(),
            true_damage: 0.0,
            hit_cooldown: class.hit_cooldown(),
            quest: None,
            ai: AiState::default(),
            boss: None,
            trigger_cooldowns: Vec::new(),
            guard_dr: 0.0,
            enrage_dr: 0.0,
            enrage_speed_mult: 1.0,
            aura_dr: 0.0,
            ranged: false,
        }
    }
}

/// 仲間（オーラの供給源）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub actor:    Actor,
    pub identity: String,
    /// 親密度 1〜10
    pub affinity: f32,
    pub level:    u32,
    /// 仲間トリガーごとのクールダウン
    pub trigger_cooldowns: Vec<f32>,
}

impl Companion {
    pub fn new(id: u32, identity: impl Into<String>, affinity: f32, level: u32, x: f32, y: f32) -> Self {
        Self {
            actor: Actor::new(id, ActorKind::Companion, x, y, 10.0, COMPANION_SPEED, 10.0),
            identity: identity.into(),
            affinity,
            level: level.max(1),
            trigger_cooldowns: Vec::new(),
        }
    }
}
