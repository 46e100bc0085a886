//! Path: native/game_core/src/enemy.rs
//! Summary: 敵クラス（mook / featured / boss）と、クラスごとの既定ステータス

use serde::{Deserialize, Serialize};

/// 敵クラス。チューニング既定値の選択キー
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EnemyClass {
    #[default]
    Mook     = 0,
    Featured = 1,
    Boss     = 2,
}

impl EnemyClass {
    /// featured / boss だけが多層マニューバを持つ
    pub fn is_elite(&self) -> bool {
        !matches!(self, Self::Mook)
    }

    pub fn max_hp(&self) -> f32 {
        match self {
            Self::Mook => 5.0,
            Self::Featured => 18.0,
            Self::Boss => 50.0,
        }
    }

    pub fn speed(&self) -> f32 {
        match self {
            Self::Mook => 70.0,
            Self::Featured => 85.0,
            Self::Boss => 75.0,
        }
    }

    pub fn half_extent(&self) -> f32 {
        match self {
            Self::Mook => 10.0,
            Self::Featured => 12.0,
            Self::Boss => 18.0,
        }
    }

    pub fn touch_damage(&self) -> f32 {
        match self {
            Self::Mook => 1.0,
            Self::Featured => 2.0,
            Self::Boss => 3.0,
        }
    }

    /// 接触攻撃の間隔（秒）
    pub fn hit_cooldown(&self) -> f32 {
        match self {
            Self::Mook => 1.0,
            Self::Featured => 0.9,
            Self::Boss => 1.2,
        }
    }

    pub fn xp_reward(&self) -> u32 {
        match self {
            Self::Mook => 3,
            Self::Featured => 12,
            Self::Boss => 60,
        }
    }

    /// 射撃する場合の弾ダメージ
    pub fn projectile_damage(&self) -> f32 {
        match self {
            Self::Mook => 1.0,
            Self::Featured => 2.0,
            Self::Boss => 3.0,
        }
    }

    /// ボスは他の体を押しのける動的ソリッドとして扱う
    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Boss)
    }
}
