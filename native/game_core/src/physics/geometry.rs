//! Path: native/game_core/src/physics/geometry.rs
//! Summary: 軸平行矩形（AABB）と線分 vs 矩形の交差判定

use serde::{Deserialize, Serialize};

/// 左上原点の軸平行矩形
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(cx: f32, cy: f32, hw: f32, hh: f32) -> Self {
        Self { x: cx - hw, y: cy - hh, w: hw * 2.0, h: hh * 2.0 }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// 辺が接しているだけの場合は交差とみなさない
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    #[inline]
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn expand(&self, mx: f32, my: f32) -> Rect {
        Rect { x: self.x - mx, y: self.y - my, w: self.w + mx * 2.0, h: self.h + my * 2.0 }
    }

    /// 2 矩形を包む最小矩形
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            w: self.right().max(other.right()) - x,
            h: self.bottom().max(other.bottom()) - y,
        }
    }

    /// 4 隅（左上・右上・左下・右下）
    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.x, self.y),
            (self.right(), self.y),
            (self.x, self.bottom()),
            (self.right(), self.bottom()),
        ]
    }
}

/// 中心座標 + 半径（ハーフエクステント）で表す移動体
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub x:  f32,
    pub y:  f32,
    pub hw: f32,
    pub hh: f32,
}

impl Body {
    pub const fn new(x: f32, y: f32, hw: f32, hh: f32) -> Self {
        Self { x, y, hw, hh }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.hw, self.hh)
    }

    #[inline]
    pub fn rect_at(&self, x: f32, y: f32) -> Rect {
        Rect::from_center(x, y, self.hw, self.hh)
    }
}

/// 線分 (x0,y0)-(x1,y1) が矩形と交差するか（Liang–Barsky）
pub fn segment_intersects_rect(x0: f32, y0: f32, x1: f32, y1: f32, r: &Rect) -> bool {
    segment_entry_t(x0, y0, x1, y1, r).is_some()
}

/// 線分が矩形に入るパラメータ t（0..=1）。交差しなければ None
pub fn segment_entry_t(x0: f32, y0: f32, x1: f32, y1: f32, r: &Rect) -> Option<f32> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    let checks = [
        (-dx, x0 - r.x),
        (dx, r.right() - x0),
        (-dy, y0 - r.y),
        (dy, r.bottom() - y0),
    ];
    for (p, q) in checks {
        if p.abs() < 1e-9 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }
    Some(t0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.5, 2.0, 4.0, 4.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn segment_through_rect() {
        let r = Rect::new(10.0, -5.0, 5.0, 10.0);
        assert!(segment_intersects_rect(0.0, 0.0, 30.0, 0.0, &r));
        assert!(!segment_intersects_rect(0.0, 20.0, 30.0, 20.0, &r));
        // 手前で止まる線分
        assert!(!segment_intersects_rect(0.0, 0.0, 8.0, 0.0, &r));
    }

    #[test]
    fn segment_entry_parameter() {
        let r = Rect::new(10.0, -5.0, 5.0, 10.0);
        let t = segment_entry_t(0.0, 0.0, 20.0, 0.0, &r).unwrap_or(-1.0);
        assert!((t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(5.0, 1.0, 2.0, 4.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, 0.0, 7.0, 5.0));
    }
}
