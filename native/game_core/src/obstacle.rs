//! Path: native/game_core/src/obstacle.rs
//! Summary: 障害物の種類（移動ブロック・攻撃ブロック・ハザード・破壊可能）と状態

use crate::constants::{BREAKABLE_HP, FIRE_BURN_DPS, LAVA_BURN_DPS, MUD_SLOW_FACTOR};
use crate::physics::geometry::Rect;
use serde::{Deserialize, Serialize};

/// 障害物の種類（セーブデータ互換のため明示値で固定）
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ObstacleKind {
    Wall   = 0,
    Water  = 1,
    Gate   = 2,
    Chest  = 3,
    Mud    = 4,
    Fire   = 5,
    Lava   = 6,
    Barrel = 7,
    Crate  = 8,
    Rock   = 9,
    Tree   = 10,
}

/// 重なったときに与える地形効果
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Hazard {
    /// 移動速度係数
    Slow(f32),
    /// 燃焼 DPS
    Burn(f32),
}

impl ObstacleKind {
    /// 種類としての移動ブロック（ゲートの施錠状態は Obstacle 側で判定）
    pub fn blocks_movement(&self) -> bool {
        !matches!(self, Self::Mud | Self::Fire | Self::Lava)
    }

    /// 攻撃・視線を遮るか。水と宝箱は低いので遮らない
    pub fn blocks_attacks(&self) -> bool {
        !matches!(self, Self::Water | Self::Chest | Self::Mud | Self::Fire | Self::Lava)
    }

    pub fn hazard(&self) -> Option<Hazard> {
        match self {
            Self::Mud  => Some(Hazard::Slow(MUD_SLOW_FACTOR)),
            Self::Fire => Some(Hazard::Burn(FIRE_BURN_DPS)),
            Self::Lava => Some(Hazard::Burn(LAVA_BURN_DPS)),
            _ => None,
        }
    }

    /// ステアリングの危険度重み（遅い地形は軽め、溶岩が最大）
    pub fn hazard_weight(&self) -> f32 {
        match self {
            Self::Mud  => 1.0,
            Self::Fire => 3.0,
            Self::Lava => 6.0,
            _ => 0.0,
        }
    }

    pub fn is_breakable(&self) -> bool {
        matches!(self, Self::Barrel | Self::Crate)
    }
}

/// 静的障害物。破壊可能オブジェクトとゲートだけがその場で状態を変える
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect:   Rect,
    pub kind:   ObstacleKind,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub hp:     f32,
    #[serde(default)]
    pub destroyed: bool,
}

impl Obstacle {
    pub fn new(rect: Rect, kind: ObstacleKind) -> Self {
        let hp = if kind.is_breakable() { BREAKABLE_HP } else { 0.0 };
        Self { rect, kind, locked: kind == ObstacleKind::Gate, hp, destroyed: false }
    }

    pub fn gate(rect: Rect, locked: bool) -> Self {
        Self { locked, ..Self::new(rect, ObstacleKind::Gate) }
    }

    /// 解錠済みゲートと破壊済みオブジェクトは素通りできる
    pub fn is_open(&self) -> bool {
        self.destroyed || (self.kind == ObstacleKind::Gate && !self.locked)
    }

    pub fn blocks_movement(&self, water_walk: bool) -> bool {
        if self.is_open() {
            return false;
        }
        if water_walk && self.kind == ObstacleKind::Water {
            return false;
        }
        self.kind.blocks_movement()
    }

    pub fn blocks_attacks(&self) -> bool {
        !self.is_open() && self.kind.blocks_attacks()
    }

    /// 破壊可能オブジェクトにダメージ。このヒットで壊れたら true
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if !self.kind.is_breakable() || self.destroyed {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        if self.hp <= 0.0 {
            self.destroyed = true;
            return true;
        }
        false
    }
}
