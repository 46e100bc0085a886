//! Path: native/game_simulation/src/game_logic/steering.rs
//! Summary: ハザード / 障害物を避ける進行方向の選択（5 候補 × 3 プローブ）

use game_core::physics::spatial_hash::ObstacleField;
use game_core::tuning::GlobalTuning;
use game_core::util::{dist_sq, dot, normalize, rotate};

/// 直進と ±0.5 rad, ±0.9 rad の回転
pub const CANDIDATE_OFFSETS: [f32; 5] = [0.0, 0.5, -0.5, 0.9, -0.9];
const PROBE_SAMPLES: usize = 3;

/// ステアリング 1 回分の入力
#[derive(Clone, Copy, Debug)]
pub struct SteeringRequest {
    pub x:         f32,
    pub y:         f32,
    /// 望む進行方向（単位ベクトル）
    pub desired:   (f32, f32),
    /// 本来の目標地点（プレイヤー等）
    pub target:    (f32, f32),
    /// 目標への視線が通っているか
    pub clear_los: bool,
}

/// 候補方向のスコア（小さいほど良い）
pub fn score_candidate(
    field: &ObstacleField,
    global: &GlobalTuning,
    req: &SteeringRequest,
    offset: f32,
    heading: (f32, f32),
) -> f32 {
    let mut hazard = 0.0;
    let mut obstacle = 0.0;
    for k in 1..=PROBE_SAMPLES {
        let reach = global.probe_len * k as f32 / PROBE_SAMPLES as f32;
        let sx = req.x + heading.0 * reach;
        let sy = req.y + heading.1 * reach;
        hazard += field.hazard_weight_at(sx, sy);
        // 直線経路が有効なら障害物で曲がらない
        if !req.clear_los && field.point_blocked(sx, sy, false) {
            obstacle += global.steer_obstacle_penalty / k as f32;
        }
    }
    let align_weight = if req.clear_los { global.steer_align_clear } else { global.steer_align_blocked };
    hazard * global.steer_hazard_scale + obstacle + offset.abs() * align_weight
}

/// 最小スコアの候補方向を返す。交戦距離で視線が通っているときは後退しない
pub fn steer_heading(field: &ObstacleField, global: &GlobalTuning, req: &SteeringRequest) -> (f32, f32) {
    let (dx, dy) = normalize(req.desired.0, req.desired.1);
    if dx == 0.0 && dy == 0.0 {
        return (0.0, 0.0);
    }

    let mut best = (dx, dy);
    let mut best_score = f32::INFINITY;
    for offset in CANDIDATE_OFFSETS {
        let heading = rotate(dx, dy, offset);
        let score = score_candidate(field, global, req, offset, heading);
        if score < best_score {
            best_score = score;
            best = heading;
        }
    }

    if req.clear_los && dist_sq(req.x, req.y, req.target.0, req.target.1) <= global.engage_dist * global.engage_dist {
        let (tx, ty) = normalize(req.target.0 - req.x, req.target.1 - req.y);
        if dot(best.0, best.1, tx, ty) < global.engage_dot {
            return (tx, ty);
        }
    }
    best
}
