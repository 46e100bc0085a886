//! Path: native/game_core/src/tuning.rs
//! Summary: 敵クラスごとのマニューバ・チューニングテーブル（コンテンツから差し替え可能）
//!
//! 敵の行動パラメータ（距離帯・持続時間・速度/ノックバック倍率・クールダウン・確率）を
//! クラス単位でまとめる。シミュレーション側は読み取り専用で参照し、書き換えない。
//! マニューバが `None` のクラスはその行動を一切取らない。

use crate::enemy::EnemyClass;
use serde::{Deserialize, Serialize};

/// 予告付きの突進
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    pub min_dist:        f32,
    pub max_dist:        f32,
    /// 予告（減速して溜める）時間
    pub telegraph:       f32,
    pub telegraph_speed_mult: f32,
    pub duration:        f32,
    pub speed_mult:      f32,
    pub knockback_mult:  f32,
    pub cooldown_base:   f32,
    /// クールダウンに ± で加わる揺らぎ幅
    pub cooldown_jitter: f32,
    /// 揺らぎの符号にかかわらず守る最小クールダウン
    pub cooldown_floor:  f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            min_dist: 70.0,
            max_dist: 160.0,
            telegraph: 0.35,
            telegraph_speed_mult: 0.25,
            duration: 0.3,
            speed_mult: 2.4,
            knockback_mult: 0.4,
            cooldown_base: 3.0,
            cooldown_jitter: 0.8,
            cooldown_floor: 2.0,
        }
    }
}

/// 飛来弾への横っ飛び回避
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JukeTuning {
    pub chance:           f32,
    /// 前進ウィンドウ中の確率倍率
    pub advance_chance_mult: f32,
    /// 弾道からの横ずれ許容（自身の半径に加算）
    pub lateral_tolerance: f32,
    /// 弾の前方何 px 以内を脅威とみなすか
    pub forward_window:   f32,
    pub duration:         f32,
    pub speed_mult:       f32,
    pub cooldown:         f32,
}

impl Default for JukeTuning {
    fn default() -> Self {
        Self {
            chance: 0.45,
            advance_chance_mult: 1.5,
            lateral_tolerance: 14.0,
            forward_window: 140.0,
            duration: 0.22,
            speed_mult: 2.0,
            cooldown: 1.4,
        }
    }
}

/// 被弾後の遮蔽物探し
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverTuning {
    pub min_dist:      f32,
    pub max_dist:      f32,
    pub search_radius: f32,
    /// プレイヤーから離れてよい最大量
    pub max_retreat:   f32,
    pub duration:      f32,
    pub cooldown:      f32,
    /// 到達とみなす距離
    pub reach_radius:  f32,
}

impl Default for CoverTuning {
    fn default() -> Self {
        Self {
            min_dist: 60.0,
            max_dist: 260.0,
            search_radius: 180.0,
            max_retreat: 60.0,
            duration: 1.6,
            cooldown: 4.0,
            reach_radius: 8.0,
        }
    }
}

/// 遠隔警戒中のジグザグ接近
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigzagTuning {
    pub min_dist:   f32,
    pub max_dist:   f32,
    /// 接線方向のブレンド重み（0 = 直進, 1 = 真横）
    pub weight:     f32,
    pub commit_min: f32,
    pub commit_max: f32,
}

impl Default for ZigzagTuning {
    fn default() -> Self {
        Self { min_dist: 50.0, max_dist: 240.0, weight: 0.55, commit_min: 0.35, commit_max: 0.7 }
    }
}

/// 被弾時の踏ん張り
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BraceTuning {
    pub duration:       f32,
    pub knockback_mult: f32,
    pub dr_bonus:       f32,
    pub speed_mult:     f32,
}

impl Default for BraceTuning {
    fn default() -> Self {
        Self { duration: 0.45, knockback_mult: 0.5, dr_bonus: 1.0, speed_mult: 0.85 }
    }
}

/// 連続被弾で前に出る
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvanceTuning {
    pub hits_required:  u32,
    /// 連続被弾を数える時間窓
    pub window:         f32,
    pub duration:       f32,
    pub speed_mult:     f32,
    pub knockback_mult: f32,
    /// 前進開始時に突進クールダウンをこの値以下に詰める
    pub dash_cooldown_clamp: f32,
}

impl Default for AdvanceTuning {
    fn default() -> Self {
        Self {
            hits_required: 2,
            window: 1.2,
            duration: 1.6,
            speed_mult: 1.25,
            knockback_mult: 0.6,
            dash_cooldown_clamp: 0.4,
        }
    }
}

/// フローフィールドが使えないときの壁沿い探索
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallFollowTuning {
    pub duration: f32,
}

impl Default for WallFollowTuning {
    fn default() -> Self {
        Self { duration: 0.9 }
    }
}

/// 敵からプレイヤーへの攻撃の会心・貫通パラメータ
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrikeTuning {
    pub crit_chance:    f32,
    /// 会心時に無視するプレイヤー DR の割合
    pub crit_dr_ignore: f32,
    pub crit_bonus:     f32,
    pub armor_pen:      f32,
    pub true_damage:    f32,
    /// ボス以外が保証する最低ダメージ
    pub chip_floor:     f32,
}

impl Default for StrikeTuning {
    fn default() -> Self {
        Self {
            crit_chance: 0.05,
            crit_dr_ignore: 0.5,
            crit_bonus: 1.0,
            armor_pen: 0.0,
            true_damage: 0.0,
            chip_floor: 0.25,
        }
    }
}

/// クラス単位のチューニング
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassTuning {
    pub aggro_radius:    f32,
    /// 被ノックバック倍率
    pub knockback_taken: f32,
    pub strike:          StrikeTuning,
    pub dash:            Option<DashTuning>,
    pub juke:            Option<JukeTuning>,
    pub cover:           Option<CoverTuning>,
    pub zigzag:          Option<ZigzagTuning>,
    pub brace:           Option<BraceTuning>,
    pub advance:         Option<AdvanceTuning>,
    pub wall_follow:     Option<WallFollowTuning>,
}

impl Default for ClassTuning {
    fn default() -> Self {
        Self::mook()
    }
}

impl ClassTuning {
    /// 追跡と徘徊のみ
    pub fn mook() -> Self {
        Self {
            aggro_radius: 180.0,
            knockback_taken: 1.0,
            strike: StrikeTuning::default(),
            dash: None,
            juke: None,
            cover: None,
            zigzag: None,
            brace: None,
            advance: None,
            wall_follow: None,
        }
    }

    pub fn featured() -> Self {
        Self {
            aggro_radius: 220.0,
            knockback_taken: 0.7,
            strike: StrikeTuning {
                crit_chance: 0.1,
                armor_pen: 0.5,
                ..StrikeTuning::default()
            },
            dash: Some(DashTuning::default()),
            juke: Some(JukeTuning::default()),
            cover: Some(CoverTuning::default()),
            zigzag: Some(ZigzagTuning::default()),
            brace: Some(BraceTuning::default()),
            advance: Some(AdvanceTuning::default()),
            wall_follow: Some(WallFollowTuning::default()),
        }
    }

    pub fn boss() -> Self {
        Self {
            aggro_radius: 280.0,
            knockback_taken: 0.45,
            strike: StrikeTuning {
                crit_chance: 0.15,
                crit_dr_ignore: 0.6,
                crit_bonus: 1.5,
                armor_pen: 1.0,
                true_damage: 0.5,
                chip_floor: 0.0,
            },
            dash: Some(DashTuning {
                min_dist: 90.0,
                max_dist: 180.0,
                speed_mult: 2.8,
                knockback_mult: 0.3,
                cooldown_base: 3.5,
                ..DashTuning::default()
            }),
            juke: Some(JukeTuning { chance: 0.3, ..JukeTuning::default() }),
            cover: Some(CoverTuning { duration: 1.2, cooldown: 6.0, ..CoverTuning::default() }),
            zigzag: Some(ZigzagTuning { weight: 0.45, ..ZigzagTuning::default() }),
            brace: Some(BraceTuning { knockback_mult: 0.4, dr_bonus: 1.5, ..BraceTuning::default() }),
            advance: Some(AdvanceTuning { hits_required: 3, ..AdvanceTuning::default() }),
            wall_follow: Some(WallFollowTuning::default()),
        }
    }
}

/// クラス共通のパラメータ
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalTuning {
    pub wander_min:       f32,
    pub wander_max:       f32,
    pub wander_idle_chance: f32,
    pub wander_idle_duration: f32,
    pub wander_speed_mult: f32,
    /// この距離以内かつ視線が通っていれば、ステアリングは後退しない
    pub engage_dist:      f32,
    /// 後退判定に使う内積しきい値
    pub engage_dot:       f32,
    pub probe_len:        f32,
    /// 移動できない状態がこの秒数続いたら回避方向を反転する
    pub stuck_flip_time:  f32,
    /// 被弾を「最近」とみなす時間（遮蔽物探しの条件）
    pub recent_hit_window: f32,
    /// ステアリング: ハザード重みに掛ける係数
    pub steer_hazard_scale: f32,
    /// ステアリング: 視線が遮られているときのプローブ衝突ペナルティ
    pub steer_obstacle_penalty: f32,
    /// ステアリング: 角度ずれ 1 rad あたりのペナルティ（視線あり / なし）
    pub steer_align_clear:   f32,
    pub steer_align_blocked: f32,
}

impl Default for GlobalTuning {
    fn default() -> Self {
        Self {
            wander_min: 0.9,
            wander_max: 2.5,
            wander_idle_chance: 0.22,
            wander_idle_duration: 0.6,
            wander_speed_mult: 0.5,
            engage_dist: 64.0,
            engage_dot: 0.2,
            probe_len: 36.0,
            stuck_flip_time: 0.6,
            recent_hit_window: 2.0,
            steer_hazard_scale: 1.0,
            steer_obstacle_penalty: 8.0,
            steer_align_clear: 3.0,
            steer_align_blocked: 1.0,
        }
    }
}

/// 全クラス分のチューニングテーブル
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningTable {
    pub mook:     ClassTuning,
    pub featured: ClassTuning,
    pub boss:     ClassTuning,
    pub global:   GlobalTuning,
}

impl Default for TuningTable {
    fn default() -> Self {
        Self {
            mook: ClassTuning::mook(),
            featured: ClassTuning::featured(),
            boss: ClassTuning::boss(),
            global: GlobalTuning::default(),
        }
    }
}

impl TuningTable {
    pub fn for_class(&self, class: EnemyClass) -> &ClassTuning {
        match class {
            EnemyClass::Mook => &self.mook,
            EnemyClass::Featured => &self.featured,
            EnemyClass::Boss => &self.boss,
        }
    }

    /// 不正値（負の時間・逆転した距離帯）を列挙する
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (name, t) in [("mook", &self.mook), ("featured", &self.featured), ("boss", &self.boss)] {
            if t.aggro_radius < 0.0 {
                problems.push(format!("{name}: negative aggro_radius"));
            }
            if let Some(d) = t.dash {
                if d.min_dist > d.max_dist {
                    problems.push(format!("{name}: dash band inverted"));
                }
                if d.cooldown_floor < 0.0 || d.duration < 0.0 || d.telegraph < 0.0 {
                    problems.push(format!("{name}: negative dash timing"));
                }
            }
            if let Some(c) = t.cover {
                if c.min_dist > c.max_dist {
                    problems.push(format!("{name}: cover band inverted"));
                }
            }
            if let Some(z) = t.zigzag {
                if z.min_dist > z.max_dist || z.commit_min > z.commit_max {
                    problems.push(format!("{name}: zigzag band inverted"));
                }
            }
        }
        if self.global.wander_min > self.global.wander_max {
            problems.push("global: wander band inverted".to_string());
        }
        problems
    }
}
