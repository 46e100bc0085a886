//! Path: native/game_core/src/loot.rs
//! Summary: ドロップアイテム種類と重み付きルートテーブル

use crate::enemy::EnemyClass;
use crate::obstacle::ObstacleKind;
use crate::physics::rng::SimpleRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// ピックアップの種類
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PickupKind {
    #[default]
    Heal   = 0, // HP 回復
    Xp     = 1, // 経験値
    Key    = 2, // ゲート解錠
    Shield = 3, // 一度だけ被ダメージ無効
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub kind:   PickupKind,
    pub value:  f32,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LootTable {
    #[serde(default)]
    pub entries: Vec<LootEntry>,
    /// 何も落とさない重み
    #[serde(default)]
    pub nothing_weight: u32,
}

impl LootTable {
    /// 重みに従って 1 つ抽選する。外れ or 空テーブルは None
    pub fn roll(&self, rng: &mut SimpleRng) -> Option<(PickupKind, f32)> {
        let total: u32 = self.entries.iter().map(|e| e.weight).sum::<u32>() + self.nothing_weight;
        if total == 0 {
            return None;
        }
        let mut pick = rng.next_u32() % total;
        for e in &self.entries {
            if pick < e.weight {
                return Some((e.kind, e.value));
            }
            pick -= e.weight;
        }
        None
    }
}

/// 敵クラス / 障害物種類ごとのルートテーブル
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootTables {
    pub by_class:    FxHashMap<EnemyClass, LootTable>,
    pub by_obstacle: FxHashMap<ObstacleKind, LootTable>,
}

impl Default for LootTables {
    fn default() -> Self {
        let mut by_class = FxHashMap::default();
        by_class.insert(EnemyClass::Mook, LootTable {
            entries: vec![
                LootEntry { kind: PickupKind::Heal, value: 2.0, weight: 10 },
                LootEntry { kind: PickupKind::Xp, value: 2.0, weight: 30 },
            ],
            nothing_weight: 60,
        });
        by_class.insert(EnemyClass::Featured, LootTable {
            entries: vec![
                LootEntry { kind: PickupKind::Heal, value: 4.0, weight: 30 },
                LootEntry { kind: PickupKind::Xp, value: 8.0, weight: 50 },
                LootEntry { kind: PickupKind::Key, value: 1.0, weight: 20 },
            ],
            nothing_weight: 0,
        });
        by_class.insert(EnemyClass::Boss, LootTable {
            entries: vec![LootEntry { kind: PickupKind::Heal, value: 10.0, weight: 1 }],
            nothing_weight: 0,
        });
        let mut by_obstacle = FxHashMap::default();
        let breakable = LootTable {
            entries: vec![
                LootEntry { kind: PickupKind::Heal, value: 1.0, weight: 25 },
                LootEntry { kind: PickupKind::Xp, value: 1.0, weight: 25 },
            ],
            nothing_weight: 50,
        };
        by_obstacle.insert(ObstacleKind::Barrel, breakable.clone());
        by_obstacle.insert(ObstacleKind::Crate, breakable);
        by_obstacle.insert(ObstacleKind::Chest, LootTable {
            entries: vec![
                LootEntry { kind: PickupKind::Shield, value: 1.0, weight: 40 },
                LootEntry { kind: PickupKind::Key, value: 1.0, weight: 30 },
                LootEntry { kind: PickupKind::Heal, value: 5.0, weight: 30 },
            ],
            nothing_weight: 0,
        });
        Self { by_class, by_obstacle }
    }
}

impl LootTables {
    pub fn roll_for_class(&self, class: EnemyClass, rng: &mut SimpleRng) -> Option<(PickupKind, f32)> {
        self.by_class.get(&class).and_then(|t| t.roll(rng))
    }

    pub fn roll_for_obstacle(&self, kind: ObstacleKind, rng: &mut SimpleRng) -> Option<(PickupKind, f32)> {
        self.by_obstacle.get(&kind).and_then(|t| t.roll(rng))
    }
}
