//! Path: native/game_core/src/physics/spatial_hash.rs
//! Summary: 空間ハッシュと静的障害物フィールド（近傍クエリ・視線判定）

use super::geometry::{segment_entry_t, Rect};
use crate::obstacle::Obstacle;
use rustc_hash::FxHashMap;

pub struct SpatialHash {
    pub cell_size: f32,
    cells: FxHashMap<(i32, i32), Vec<usize>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// 矩形が掛かる全セルに登録する
    pub fn insert_rect(&mut self, id: usize, r: &Rect) {
        let (x0, y0) = self.cell_key(r.x, r.y);
        let (x1, y1) = self.cell_key(r.right(), r.bottom());
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.cells.entry((ix, iy)).or_default().push(id);
            }
        }
    }

    fn cell_key(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// 矩形が掛かるセルの ID を重複なしで `buf` に書き込む
    pub fn query_rect_into(&self, r: &Rect, buf: &mut Vec<usize>) {
        buf.clear();
        let (x0, y0) = self.cell_key(r.x, r.y);
        let (x1, y1) = self.cell_key(r.right(), r.bottom());
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                if let Some(ids) = self.cells.get(&(ix, iy)) {
                    buf.extend_from_slice(ids);
                }
            }
        }
        buf.sort_unstable();
        buf.dedup();
    }
}

/// 静的障害物と、その空間ハッシュ
pub struct ObstacleField {
    pub obstacles:   Vec<Obstacle>,
    pub static_hash: SpatialHash,
    /// 障害物の状態が変わった回数（フローフィールドの再構築判定用）
    pub revision:    u32,
}

impl ObstacleField {
    pub fn new(cell_size: f32) -> Self {
        Self {
            obstacles:   Vec::new(),
            static_hash: SpatialHash::new(cell_size),
            revision:    0,
        }
    }

    pub fn rebuild(&mut self, obstacles: Vec<Obstacle>) {
        self.static_hash.clear();
        for (idx, o) in obstacles.iter().enumerate() {
            self.static_hash.insert_rect(idx, &o.rect);
        }
        self.obstacles = obstacles;
        self.revision = self.revision.wrapping_add(1);
    }

    /// ゲート開閉・破壊など、その場の状態変更を通知する
    pub fn mark_changed(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// 矩形と交差しうる障害物インデックス（ブロック判定は呼び出し側）
    pub fn query_rect_into(&self, r: &Rect, buf: &mut Vec<usize>) {
        self.static_hash.query_rect_into(r, buf);
        let obstacles = &self.obstacles;
        buf.retain(|&idx| obstacles.get(idx).is_some_and(|o| o.rect.intersects(r)));
    }

    /// 線分が攻撃ブロック障害物に遮られていなければ true（障害物なしは遮蔽なし）
    pub fn line_of_sight(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
        self.first_attack_blocker(x0, y0, x1, y1).is_none()
    }

    /// 線分上で最初に当たる攻撃ブロック障害物
    pub fn first_attack_blocker(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Option<usize> {
        self.first_attack_blocker_skipping(x0, y0, x1, y1, &[])
    }

    /// `skip` に含まれる障害物を無視する版（貫通済みの破壊可能物など）
    pub fn first_attack_blocker_skipping(
        &self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        skip: &[usize],
    ) -> Option<usize> {
        let span = Rect::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs());
        let mut buf = Vec::new();
        self.static_hash.query_rect_into(&span, &mut buf);
        buf.into_iter()
            .filter_map(|idx| {
                let o = self.obstacles.get(idx)?;
                if !o.blocks_attacks() || skip.contains(&idx) {
                    return None;
                }
                segment_entry_t(x0, y0, x1, y1, &o.rect).map(|t| (idx, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }

    /// 点を含む障害物のうち、移動をブロックするものがあるか
    pub fn point_blocked(&self, x: f32, y: f32, water_walk: bool) -> bool {
        let probe = Rect::new(x, y, 0.0, 0.0);
        let mut buf = Vec::new();
        self.static_hash.query_rect_into(&probe, &mut buf);
        buf.iter().any(|&idx| {
            self.obstacles
                .get(idx)
                .is_some_and(|o| o.blocks_movement(water_walk) && o.rect.contains_point(x, y))
        })
    }

    /// 点を含むハザード障害物の危険度重みの合計
    pub fn hazard_weight_at(&self, x: f32, y: f32) -> f32 {
        let probe = Rect::new(x, y, 0.0, 0.0);
        let mut buf = Vec::new();
        self.static_hash.query_rect_into(&probe, &mut buf);
        buf.iter()
            .filter_map(|&idx| self.obstacles.get(idx))
            .filter(|o| o.rect.contains_point(x, y))
            .map(|o| o.kind.hazard_weight())
            .sum()
    }
}
