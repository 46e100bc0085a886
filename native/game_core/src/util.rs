//! Path: native/game_core/src/util.rs
//! Summary: 2D ベクトル演算の小物ユーティリティ

/// 二乗距離（sqrt を避けて高速化）
#[inline]
pub fn dist_sq(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

#[inline]
pub fn dist(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    dist_sq(x1, y1, x2, y2).sqrt()
}

/// 正規化。長さがほぼ 0 なら (0, 0)
#[inline]
pub fn normalize(x: f32, y: f32) -> (f32, f32) {
    let len = (x * x + y * y).sqrt();
    if len > 1e-6 {
        (x / len, y / len)
    } else {
        (0.0, 0.0)
    }
}

#[inline]
pub fn rotate(x: f32, y: f32, angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    (x * c - y * s, x * s + y * c)
}

#[inline]
pub fn dot(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ax * bx + ay * by
}

/// z 成分のみの外積
#[inline]
pub fn cross(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ax * by - ay * bx
}

/// 2 方向の成す角（ラジアン, 0..=π）
pub fn angle_between(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let (ax, ay) = normalize(ax, ay);
    let (bx, by) = normalize(bx, by);
    dot(ax, ay, bx, by).clamp(-1.0, 1.0).acos()
}

/// カウントダウンタイマーを dt 減らして 0 で止める
#[inline]
pub fn tick_down(timer: &mut f32, dt: f32) {
    if *timer > 0.0 {
        *timer = (*timer - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize(0.0, 0.0), (0.0, 0.0));
        let (x, y) = normalize(3.0, 4.0);
        assert!((x - 0.6).abs() < 1e-5 && (y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn rotate_quarter_turn() {
        let (x, y) = rotate(1.0, 0.0, std::f32::consts::FRAC_PI_2);
        assert!(x.abs() < 1e-5);
        assert!((y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn tick_down_clamps_at_zero() {
        let mut t = 0.1;
        tick_down(&mut t, 0.5);
        assert_eq!(t, 0.0);
        tick_down(&mut t, 0.5);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn angle_between_opposite_is_pi() {
        let a = angle_between(1.0, 0.0, -2.0, 0.0);
        assert!((a - std::f32::consts::PI).abs() < 1e-4);
    }
}
