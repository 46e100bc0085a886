//! Path: native/game_core/src/physics/rng.rs
//! Summary: 決定論的 LCG 乱数ジェネレータ（スナップショットで状態ごと保存できる）

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 32) as u32
    }

    /// 0.0..=1.0
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// lo..=hi の一様乱数
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// -1.0..=1.0（ジッター用）
    pub fn signed(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }

    /// 確率 p で true
    pub fn chance(&mut self, p: f32) -> bool {
        p > 0.0 && self.next_f32() < p
    }

    /// ±1 をランダムに返す
    pub fn sign(&mut self) -> f32 {
        if self.next_u32() & 1 == 0 { 1.0 } else { -1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_reproducibility() {
        let mut rng = SimpleRng::new(12345);
        let a: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();
        let mut rng2 = SimpleRng::new(12345);
        let b: Vec<u32> = (0..10).map(|_| rng2.next_u32()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn next_f32_in_range() {
        let mut rng = SimpleRng::new(999);
        for _ in 0..100 {
            let f = rng.next_f32();
            assert!(f >= 0.0 && f <= 1.0);
        }
    }

    #[test]
    fn range_and_signed_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..200 {
            let r = rng.range(0.9, 2.5);
            assert!(r >= 0.9 && r <= 2.5);
            let s = rng.signed();
            assert!(s >= -1.0 && s <= 1.0);
        }
    }

    #[test]
    fn next_f32_covers_upper_half() {
        let mut rng = SimpleRng::new(42);
        let mean = (0..1000).map(|_| rng.next_f32()).sum::<f32>() / 1000.0;
        assert!((mean - 0.5).abs() < 0.05);
    }

    #[test]
    fn chance_zero_never_fires() {
        let mut rng = SimpleRng::new(3);
        assert!((0..100).all(|_| !rng.chance(0.0)));
    }
}
