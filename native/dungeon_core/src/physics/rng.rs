//! Path: native/dungeon_core/src/physics/rng.rs
//! Summary: 決定論的 LCG 乱数ジェネレータ（サブシステムごとに 1 インスタンス）

/// 巡回方向・テレポート探索・ルート・戦闘判定はそれぞれ専用の `SimpleRng` を持つ。
/// ワールド生成時に一度だけシードし、セッション中に再シードしない。
#[derive(Clone, Debug)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// 親シードから派生シードを作る（サブシステムごとにストリームを分ける）
    pub fn derive(seed: u64, stream: u64) -> Self {
        let mut rng = Self(seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        rng.next_u32();
        rng
    }

    /// 上位 31 ビット
    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// [0.0, 1.0)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 7) as f32 / (1u32 << 24) as f32
    }

    /// [lo, hi] の整数（両端含む）
    pub fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_u32() % (hi - lo + 1)
    }

    /// [0, TAU) のランダム角
    pub fn next_angle(&mut self) -> f32 {
        self.next_f32() * std::f32::consts::TAU
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_u32() as usize % items.len())
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
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn next_f32_covers_upper_half() {
        let mut rng = SimpleRng::new(3);
        assert!((0..200).any(|_| rng.next_f32() > 0.75));
    }

    #[test]
    fn range_u32_inclusive_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..500 {
            let v = rng.range_u32(60, 120);
            assert!((60..=120).contains(&v));
        }
        assert_eq!(rng.range_u32(5, 5), 5);
    }

    #[test]
    fn derived_streams_differ() {
        let mut a = SimpleRng::derive(42, 1);
        let mut b = SimpleRng::derive(42, 2);
        let va: Vec<u32> = (0..4).map(|_| a.next_u32()).collect();
        let vb: Vec<u32> = (0..4).map(|_| b.next_u32()).collect();
        assert_ne!(va, vb);
    }

    #[test]
    fn pick_empty_is_none() {
        let mut rng = SimpleRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
        assert_eq!(rng.pick(&[9]), Some(&9));
    }
}
