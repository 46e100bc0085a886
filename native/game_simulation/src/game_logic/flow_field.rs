//! Path: native/game_simulation/src/game_logic/flow_field.rs
//! Summary: プレイヤーのタイルからの BFS 距離場（視線が通らないときの追跡ヒント）

use game_core::constants::FLOW_TILE_SIZE;
use game_core::physics::spatial_hash::ObstacleField;
use std::collections::VecDeque;

const UNREACHABLE: u32 = u32::MAX;
const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// タイルごとのプレイヤーまでの歩数。プレイヤーのタイルか障害物が変わったら作り直す
#[derive(Clone, Debug)]
pub struct FlowField {
    cols:     i32,
    rows:     i32,
    dist:     Vec<u32>,
    origin:   Option<(i32, i32)>,
    revision: Option<u32>,
}

impl FlowField {
    pub fn new(world_w: f32, world_h: f32) -> Self {
        let cols = (world_w / FLOW_TILE_SIZE).ceil().max(1.0) as i32;
        let rows = (world_h / FLOW_TILE_SIZE).ceil().max(1.0) as i32;
        Self {
            cols,
            rows,
            dist: vec![UNREACHABLE; (cols * rows) as usize],
            origin: None,
            revision: None,
        }
    }

    fn tile_of(&self, x: f32, y: f32) -> (i32, i32) {
        let tx = ((x / FLOW_TILE_SIZE).floor() as i32).clamp(0, self.cols - 1);
        let ty = ((y / FLOW_TILE_SIZE).floor() as i32).clamp(0, self.rows - 1);
        (tx, ty)
    }

    #[inline]
    fn index(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 || tx >= self.cols || ty >= self.rows {
            return None;
        }
        Some((ty * self.cols + tx) as usize)
    }

    fn tile_center(tx: i32, ty: i32) -> (f32, f32) {
        ((tx as f32 + 0.5) * FLOW_TILE_SIZE, (ty as f32 + 0.5) * FLOW_TILE_SIZE)
    }

    /// 必要なら再構築する。再構築したら true
    pub fn refresh(&mut self, field: &ObstacleField, px: f32, py: f32) -> bool {
        let origin = self.tile_of(px, py);
        if self.origin == Some(origin) && self.revision == Some(field.revision) {
            return false;
        }
        self.rebuild(field, origin);
        true
    }

    fn rebuild(&mut self, field: &ObstacleField, origin: (i32, i32)) {
        self.dist.fill(UNREACHABLE);
        self.origin = Some(origin);
        self.revision = Some(field.revision);

        let Some(start) = self.index(origin.0, origin.1) else { return };
        self.dist[start] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(origin);

        while let Some((tx, ty)) = queue.pop_front() {
            let Some(here) = self.index(tx, ty) else { continue };
            let next_dist = self.dist[here] + 1;
            for (ox, oy) in NEIGHBORS {
                let (nx, ny) = (tx + ox, ty + oy);
                let Some(idx) = self.index(nx, ny) else { continue };
                if self.dist[idx] != UNREACHABLE {
                    continue;
                }
                let (cx, cy) = Self::tile_center(nx, ny);
                if field.point_blocked(cx, cy, false) {
                    continue;
                }
                self.dist[idx] = next_dist;
                queue.push_back((nx, ny));
            }
        }
    }

    /// 下り方向の単位ベクトル。プレイヤーへ到達できない領域なら None
    pub fn direction_at(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (tx, ty) = self.tile_of(x, y);
        let here = self.dist[self.index(tx, ty)?];
        if here == UNREACHABLE {
            return None;
        }
        let target = if here == 0 {
            (tx, ty)
        } else {
            NEIGHBORS
                .iter()
                .map(|(ox, oy)| (tx + ox, ty + oy))
                .filter_map(|(nx, ny)| self.index(nx, ny).map(|i| ((nx, ny), self.dist[i])))
                .filter(|&(_, d)| d < here)
                .min_by_key(|&(_, d)| d)
                .map(|(t, _)| t)?
        };
        let (cx, cy) = Self::tile_center(target.0, target.1);
        let (dx, dy) = (cx - x, cy - y);
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-3 {
            return Some((0.0, 0.0));
        }
        Some((dx / len, dy / len))
    }

    /// プレイヤーまでの歩数（到達不能なら None）
    pub fn steps_at(&self, x: f32, y: f32) -> Option<u32> {
        let (tx, ty) = self.tile_of(x, y);
        let d = self.dist[self.index(tx, ty)?];
        (d != UNREACHABLE).then_some(d)
    }
}
