//! Path: native/game_core/src/physics/separation.rs
//! Summary: 2 体の重なり補正（浅い軸で押し分け）と群れの分離量（x 掃引）

use super::geometry::Body;

/// 2 体が重なっていれば、重なりの浅い軸に沿って押し分ける。
/// 補正量は `bias_a` : `1 - bias_a` で a と b に配分する。重なっていたら true。
pub fn separate_entities(a: &mut Body, b: &mut Body, bias_a: f32) -> bool {
    let ra = a.rect();
    let rb = b.rect();
    let overlap_x = ra.right().min(rb.right()) - ra.x.max(rb.x);
    let overlap_y = ra.bottom().min(rb.bottom()) - ra.y.max(rb.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return false;
    }
    let bias_a = bias_a.clamp(0.0, 1.0);
    if overlap_x < overlap_y {
        let sign = if a.x < b.x { -1.0 } else { 1.0 };
        a.x += sign * overlap_x * bias_a;
        b.x -= sign * overlap_x * (1.0 - bias_a);
    } else {
        let sign = if a.y < b.y { -1.0 } else { 1.0 };
        a.y += sign * overlap_y * bias_a;
        b.y -= sign * overlap_y * (1.0 - bias_a);
    }
    true
}

/// 群れ分離の入力 1 体分
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrowdMember {
    pub x:      f32,
    pub y:      f32,
    pub active: bool,
}

/// x 座標で掃引して `radius` 未満に近づいた組を見つけ、各体の押し出し量を `out` に書く。
/// 押し出しは近さに比例し、1 組につき両者へ逆向きに同じ量。
/// 完全に重なった組は添字の小さい方を -x、大きい方を +x へ送る。
pub fn separation_deltas(
    members: &[CrowdMember],
    radius: f32,
    force: f32,
    dt: f32,
    out: &mut Vec<(f32, f32)>,
) {
    out.clear();
    out.resize(members.len(), (0.0, 0.0));

    let mut order: Vec<usize> = (0..members.len()).filter(|&i| members[i].active).collect();
    order.sort_by(|&a, &b| members[a].x.total_cmp(&members[b].x).then(a.cmp(&b)));

    let r2 = radius * radius;
    for (k, &i) in order.iter().enumerate() {
        let a = members[i];
        for &j in &order[k + 1..] {
            let b = members[j];
            if b.x - a.x >= radius {
                break;
            }
            let (dx, dy) = (a.x - b.x, a.y - b.y);
            let d2 = dx * dx + dy * dy;
            if d2 >= r2 {
                continue;
            }
            let dist = d2.sqrt();
            let push = (radius - dist) * force * dt;
            let (nx, ny) = if dist > 1e-6 {
                (dx / dist, dy / dist)
            } else if i < j {
                (-1.0, 0.0)
            } else {
                (1.0, 0.0)
            };
            out[i].0 += nx * push;
            out[i].1 += ny * push;
            out[j].0 -= nx * push;
            out[j].1 -= ny * push;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_along_shallow_axis() {
        let mut a = Body::new(0.0, 0.0, 10.0, 10.0);
        let mut b = Body::new(16.0, 2.0, 10.0, 10.0);
        assert!(separate_entities(&mut a, &mut b, 0.5));
        // x の重なり 4 を半分ずつ
        assert!((a.x + 2.0).abs() < 1e-5);
        assert!((b.x - 18.0).abs() < 1e-5);
        assert!((a.y - 0.0).abs() < 1e-5);
        assert!(!a.rect().intersects(&b.rect()));
    }

    #[test]
    fn bias_one_moves_only_a() {
        let mut a = Body::new(0.0, 0.0, 10.0, 10.0);
        let mut b = Body::new(2.0, 15.0, 10.0, 10.0);
        assert!(separate_entities(&mut a, &mut b, 1.0));
        assert!((b.y - 15.0).abs() < 1e-5);
        assert!((a.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn apart_bodies_untouched() {
        let mut a = Body::new(0.0, 0.0, 5.0, 5.0);
        let mut b = Body::new(20.0, 0.0, 5.0, 5.0);
        assert!(!separate_entities(&mut a, &mut b, 0.5));
        assert_eq!(a.x, 0.0);
        assert_eq!(b.x, 20.0);
    }

    fn member(x: f32, y: f32) -> CrowdMember {
        CrowdMember { x, y, active: true }
    }

    #[test]
    fn close_pair_is_pushed_apart_symmetrically() {
        let members = [member(100.0, 100.0), member(110.0, 100.0), member(300.0, 100.0)];
        let mut out = Vec::new();
        separation_deltas(&members, 24.0, 6.0, 0.5, &mut out);
        // (24 - 10) * 6 * 0.5
        assert!((out[0].0 + 42.0).abs() < 1e-4);
        assert!((out[1].0 - 42.0).abs() < 1e-4);
        assert_eq!(out[2], (0.0, 0.0));
    }

    #[test]
    fn sweep_still_checks_vertical_neighbours() {
        let members = [member(50.0, 0.0), member(50.0, 12.0), member(51.0, 200.0)];
        let mut out = Vec::new();
        separation_deltas(&members, 24.0, 1.0, 1.0, &mut out);
        assert!(out[0].1 < 0.0 && out[1].1 > 0.0);
        assert!(out[0].0.abs() < 1e-6);
        assert_eq!(out[2], (0.0, 0.0));
    }

    #[test]
    fn coincident_members_split_along_x() {
        let members = [member(10.0, 10.0), member(10.0, 10.0)];
        let mut out = Vec::new();
        separation_deltas(&members, 20.0, 1.0, 1.0, &mut out);
        assert!(out[0].0 < 0.0);
        assert!(out[1].0 > 0.0);
    }

    #[test]
    fn inactive_members_neither_push_nor_move() {
        let members = [member(0.0, 0.0), CrowdMember { x: 5.0, y: 0.0, active: false }];
        let mut out = vec![(9.0, 9.0)];
        separation_deltas(&members, 24.0, 6.0, 1.0, &mut out);
        assert_eq!(out, vec![(0.0, 0.0), (0.0, 0.0)]);
    }
}
