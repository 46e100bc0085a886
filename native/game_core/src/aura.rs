//! Path: native/game_core/src/aura.rs
//! Summary: 味方オーラ / 敵オーラとトリガーの宣言的定義、上限テーブル、親密度倍率

use serde::{Deserialize, Serialize};

/// スロー系オーラの基準点
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuraAnchor {
    #[default]
    Player,
    /// オーラを持つ味方自身
    Ally,
}

/// 味方が常時与えるオーラ効果
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuraEffect {
    Atk { value: f32 },
    Dr { value: f32 },
    Regen { value: f32 },
    Range { value: f32 },
    /// 基準点から radius 以内の敵を value 割合だけ減速させる
    Slow {
        value:  f32,
        radius: f32,
        #[serde(default)]
        anchor: AuraAnchor,
    },
    #[serde(rename = "touchDR")]
    TouchDr { value: f32 },
    #[serde(rename = "rangedDR")]
    RangedDr { value: f32 },
    Deflect { value: f32 },
    Aspd { value: f32 },
    Crit { value: f32 },
    DashCdr { value: f32 },
    WaterWalk,
}

/// 味方トリガーの発動条件
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "when", rename_all = "snake_case")]
pub enum TriggerCondition {
    /// クールダウンが明けるたび
    #[default]
    Periodic,
    /// このフレームにプレイヤーが被弾した
    PlayerHurt,
    /// プレイヤー HP 割合がしきい値以下
    PlayerHealthBelow { ratio: f32 },
}

/// 味方トリガーが与える時限ボーナスの種類
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllyTriggerKind {
    /// 一時攻撃力
    Rally,
    /// 一時リーチ
    Focus,
    /// 一時攻撃速度
    Haste,
    /// 一時接触 DR
    Bulwark,
    /// 一度だけ被ダメージを無効化するシールド
    Ward,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct AllyTrigger {
    pub kind:     AllyTriggerKind,
    pub cooldown: f32,
    #[serde(default)]
    pub duration: f32,
    #[serde(default)]
    pub value:    f32,
    #[serde(default)]
    pub condition: TriggerCondition,
}

/// 味方 1 体分のオーラ定義（読み取り専用コンテンツ）
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct AllyAuraDef {
    #[serde(default)]
    pub effects:  Vec<AuraEffect>,
    #[serde(default)]
    pub triggers: Vec<AllyTrigger>,
}

/// 敵オーラの常時効果
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostileAuraEffect {
    /// radius 以内のプレイヤーを value 割合だけ減速
    PlayerSlow { value: f32, radius: f32 },
    /// radius 以内のプレイヤーのリーチを value px 縮める
    ReachPenalty { value: f32, radius: f32 },
    /// 自身の HP 回復（毎秒）
    SelfRegen { value: f32 },
    SelfDr { value: f32 },
}

/// 敵オーラの離散トリガー
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostileTrigger {
    /// プレイヤーが接近したら一時 DR
    Guard { radius: f32, cooldown: f32, duration: f32, dr: f32 },
    /// HP 割合がしきい値以下で一時的に加速 + DR
    Enrage { hp_ratio: f32, cooldown: f32, duration: f32, speed_mult: f32, dr: f32 },
    /// 突風: プレイヤーを押し返し、時限スローを掛ける
    Gust { radius: f32, cooldown: f32, push: f32, slow: f32, slow_duration: f32 },
}

impl HostileTrigger {
    pub fn cooldown(&self) -> f32 {
        match self {
            Self::Guard { cooldown, .. }
            | Self::Enrage { cooldown, .. }
            | Self::Gust { cooldown, .. } => *cooldown,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct HostileAuraDef {
    #[serde(default)]
    pub effects:  Vec<HostileAuraEffect>,
    #[serde(default)]
    pub triggers: Vec<HostileTrigger>,
}

/// 味方バフ合計の上限
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuffCaps {
    pub atk:       f32,
    pub dr:        f32,
    pub regen:     f32,
    pub range:     f32,
    pub touch_dr:  f32,
    pub ranged_dr: f32,
    /// 敵 1 体あたりのスロー割合
    pub slow:      f32,
    pub aspd:      f32,
    pub crit:      f32,
    pub deflect:   f32,
    pub dash_cdr:  f32,
}

impl Default for BuffCaps {
    fn default() -> Self {
        Self {
            atk: 6.0,
            dr: 4.0,
            regen: 2.0,
            range: 40.0,
            touch_dr: 3.0,
            ranged_dr: 3.0,
            slow: 0.5,
            aspd: 0.5,
            crit: 0.35,
            deflect: 0.6,
            dash_cdr: 0.5,
        }
    }
}

/// 敵オーラ合計の上限
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileCaps {
    pub player_slow:   f32,
    pub reach_penalty: f32,
    pub self_regen:    f32,
    pub self_dr:       f32,
}

impl Default for HostileCaps {
    fn default() -> Self {
        Self { player_slow: 0.5, reach_penalty: 20.0, self_regen: 1.5, self_dr: 2.0 }
    }
}

/// 親密度（1〜10 → ×1.0〜×1.5）とレベル（1 を超える 1 レベルごとに +10%）の倍率
pub fn affinity_multiplier(affinity: f32, level: u32) -> f32 {
    let affinity = affinity.clamp(1.0, 10.0);
    let affinity_scale = 1.0 + 0.5 * (affinity - 1.0) / 9.0;
    let level_scale = 1.0 + 0.1 * level.saturating_sub(1) as f32;
    affinity_scale * level_scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affinity_ten_level_three_is_1_8() {
        assert!((affinity_multiplier(10.0, 3) - 1.8).abs() < 1e-5);
    }

    #[test]
    fn affinity_clamped_to_range() {
        assert!((affinity_multiplier(0.0, 1) - 1.0).abs() < 1e-6);
        assert!((affinity_multiplier(25.0, 1) - 1.5).abs() < 1e-6);
        assert!((affinity_multiplier(1.0, 0) - 1.0).abs() < 1e-6);
    }
}
