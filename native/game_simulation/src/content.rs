//! Path: native/game_simulation/src/content.rs
//! Summary: コンテンツパック（チューニング・オーラ定義・ボスプロファイル・ルートテーブル）の JSON 読み込みと検証

use crate::error::ContentError;
use game_core::aura::{AllyAuraDef, AllyTrigger, BuffCaps, HostileAuraDef, HostileCaps, HostileTrigger};
use game_core::boss::BossProfile;
use game_core::loot::LootTables;
use game_core::tuning::TuningTable;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// 読み取り専用のコンテンツ。シミュレーションは参照するだけで書き換えない
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPack {
    pub tuning:        TuningTable,
    pub caps:          BuffCaps,
    pub hostile_caps:  HostileCaps,
    /// 仲間の識別子 → オーラ定義
    pub ally_auras:    FxHashMap<String, AllyAuraDef>,
    /// 敵の識別子 → オーラ定義
    pub hostile_auras: FxHashMap<String, HostileAuraDef>,
    /// ボスの識別子 → フェーズプロファイル
    pub boss_profiles: FxHashMap<String, BossProfile>,
    pub loot:          LootTables,
}

impl ContentPack {
    /// JSON をパースして検証する。欠けた項目は既定値で埋まる
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let pack: ContentPack = serde_json::from_str(json)?;
        let problems = pack.validate();
        if !problems.is_empty() {
            return Err(ContentError::Invalid(problems));
        }
        Ok(pack)
    }

    pub fn to_json_string(&self) -> Result<String, ContentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 意味的な不整合を列挙する（空なら妥当）
    pub fn validate(&self) -> Vec<String> {
        let mut problems = self.tuning.validate();

        for (name, def) in sorted(&self.ally_auras) {
            for t in &def.triggers {
                check_ally_trigger(name, t, &mut problems);
            }
        }
        for (name, def) in sorted(&self.hostile_auras) {
            for t in &def.triggers {
                if t.cooldown() < 0.0 {
                    problems.push(format!("hostile aura {name}: negative trigger cooldown"));
                }
                if let HostileTrigger::Enrage { hp_ratio, .. } = t {
                    if !(0.0..=1.0).contains(hp_ratio) {
                        problems.push(format!("hostile aura {name}: enrage hp_ratio outside 0..=1"));
                    }
                }
            }
        }
        for (name, profile) in sorted(&self.boss_profiles) {
            if !(1..=3).contains(&profile.phases) {
                problems.push(format!("boss {name}: phases must be 1..=3"));
            }
            if profile.hit_cooldown_factor <= 0.0 {
                problems.push(format!("boss {name}: hit_cooldown_factor must be positive"));
            }
        }
        problems
    }

    pub fn ally_aura(&self, identity: &str) -> Option<&AllyAuraDef> {
        self.ally_auras.get(identity)
    }

    pub fn hostile_aura(&self, identity: &str) -> Option<&HostileAuraDef> {
        self.hostile_auras.get(identity)
    }
}

fn check_ally_trigger(name: &str, t: &AllyTrigger, problems: &mut Vec<String>) {
    if t.cooldown < 0.0 || t.duration < 0.0 {
        problems.push(format!("ally aura {name}: negative trigger timing ({:?})", t.kind));
    }
}

/// エラーメッセージの順序を安定させる
fn sorted<V>(map: &FxHashMap<String, V>) -> Vec<(&String, &V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::aura::{AllyTriggerKind, AuraAnchor, AuraEffect, HostileAuraEffect, TriggerCondition};

    const PACK: &str = r#"{
        "ally_auras": {
            "mira": {
                "effects": [
                    { "type": "dr", "value": 1.0 },
                    { "type": "touchDR", "value": 0.5 },
                    { "type": "slow", "value": 0.2, "radius": 90.0, "anchor": "ally" },
                    { "type": "waterWalk" }
                ],
                "triggers": [
                    { "kind": "rally", "cooldown": 8.0, "duration": 3.0, "value": 2.0,
                      "condition": { "when": "player_health_below", "ratio": 0.5 } }
                ]
            }
        },
        "hostile_auras": {
            "warden": {
                "effects": [ { "type": "player_slow", "value": 0.2, "radius": 120.0 } ],
                "triggers": [ { "type": "gust", "radius": 90.0, "cooldown": 5.0, "push": 180.0,
                                "slow": 0.3, "slow_duration": 1.0 } ]
            }
        },
        "boss_profiles": { "ember_king": { "phases": 3, "prompts": ["ember_rage", "ember_last"] } }
    }"#;

    #[test]
    fn parses_tagged_effects_and_fills_defaults() {
        let pack = ContentPack::from_json_str(PACK).expect("valid pack");
        let mira = pack.ally_aura("mira").expect("mira");
        assert_eq!(mira.effects[0], AuraEffect::Dr { value: 1.0 });
        assert_eq!(mira.effects[1], AuraEffect::TouchDr { value: 0.5 });
        assert_eq!(mira.effects[2], AuraEffect::Slow { value: 0.2, radius: 90.0, anchor: AuraAnchor::Ally });
        assert_eq!(mira.effects[3], AuraEffect::WaterWalk);
        assert_eq!(mira.triggers[0].kind, AllyTriggerKind::Rally);
        assert_eq!(mira.triggers[0].condition, TriggerCondition::PlayerHealthBelow { ratio: 0.5 });

        let warden = pack.hostile_aura("warden").expect("warden");
        assert_eq!(warden.effects[0], HostileAuraEffect::PlayerSlow { value: 0.2, radius: 120.0 });

        let boss = &pack.boss_profiles["ember_king"];
        assert_eq!(boss.phases, 3);
        assert_eq!(boss.touch_damage_step, 2.0);
        assert_eq!(pack.tuning, TuningTable::default());
    }

    #[test]
    fn unknown_effect_type_is_rejected() {
        let json = r#"{ "ally_auras": { "x": { "effects": [ { "type": "teleport", "value": 1 } ] } } }"#;
        assert!(matches!(ContentPack::from_json_str(json), Err(ContentError::Json(_))));
    }

    #[test]
    fn semantic_problems_are_reported() {
        let json = r#"{
            "boss_profiles": { "bad": { "phases": 5 } },
            "tuning": { "global": { "wander_min": 3.0, "wander_max": 1.0 } }
        }"#;
        match ContentPack::from_json_str(json) {
            Err(ContentError::Invalid(problems)) => {
                assert_eq!(problems.len(), 2);
                assert!(problems.iter().any(|p| p.contains("wander band")));
                assert!(problems.iter().any(|p| p.contains("phases")));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn json_round_trip_preserves_pack() {
        let pack = ContentPack::from_json_str(PACK).expect("valid pack");
        let json = pack.to_json_string().expect("serialize");
        let again = ContentPack::from_json_str(&json).expect("reparse");
        assert_eq!(pack, again);
    }
}
