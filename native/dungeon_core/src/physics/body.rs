//! Path: native/dungeon_core/src/physics/body.rs
//! Summary: AABB の運動体と軸ごとの衝突判定付き移動、部屋境界矩形

/// 左上原点の軸平行ボックス（ピクセル単位）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// 1 回の移動で各軸が実際に動いたか
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AxisMove {
    pub x: bool,
    pub y: bool,
}

impl Body {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// 正方形のボックス
    pub const fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn at(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }

    pub fn intersects(&self, other: &Body) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// 中心間距離
    pub fn distance_to(&self, other: &Body) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    /// X を先に、次に Y を動かす。各軸は `blocked(候補ボックス)` が false のときだけ確定する。
    /// 壁に沿った滑り移動になる。
    pub fn move_by<F>(&mut self, dx: f32, dy: f32, mut blocked: F) -> AxisMove
    where
        F: FnMut(&Body) -> bool,
    {
        let mut moved = AxisMove::default();
        if dx != 0.0 {
            let candidate = self.at(self.x + dx, self.y);
            if !blocked(&candidate) {
                self.x = candidate.x;
                moved.x = true;
            }
        }
        if dy != 0.0 {
            let candidate = self.at(self.x, self.y + dy);
            if !blocked(&candidate) {
                self.y = candidate.y;
                moved.y = true;
            }
        }
        moved
    }
}

/// ピクセル座標の矩形範囲。アクターの行動範囲（ホーム部屋）に使う。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// ボックス全体が範囲内にあるか
    pub fn contains_body(&self, body: &Body) -> bool {
        body.x >= self.min_x
            && body.y >= self.min_y
            && body.x + body.w <= self.max_x
            && body.y + body.h <= self.max_y
    }

    /// 左上座標が範囲内にあるか（ボスのマージン付き境界はこちら）
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn clamp_point(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slides_along_wall() {
        // x >= 100 は壁
        let mut b = Body::square(80.0, 50.0, 10.0);
        let moved = b.move_by(20.0, 5.0, |c| c.x + c.w >= 100.0);
        assert_eq!(moved, AxisMove { x: false, y: true });
        assert!((b.x - 80.0).abs() < 1e-6);
        assert!((b.y - 55.0).abs() < 1e-6);
    }

    #[test]
    fn y_uses_committed_x() {
        let mut b = Body::square(0.0, 0.0, 10.0);
        let mut seen = Vec::new();
        b.move_by(3.0, 4.0, |c| {
            seen.push((c.x, c.y));
            false
        });
        assert_eq!(seen, vec![(3.0, 0.0), (3.0, 4.0)]);
    }

    #[test]
    fn zero_delta_skips_test() {
        let mut b = Body::square(0.0, 0.0, 10.0);
        let moved = b.move_by(0.0, 0.0, |_| panic!("should not be called"));
        assert_eq!(moved, AxisMove::default());
    }

    #[test]
    fn intersects_and_distance() {
        let a = Body::square(0.0, 0.0, 10.0);
        let b = Body::square(9.0, 9.0, 10.0);
        let c = Body::square(10.0, 0.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!((a.distance_to(&c) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn bounds_contains_whole_body() {
        let r = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert!(r.contains_body(&Body::square(76.0, 0.0, 24.0)));
        assert!(!r.contains_body(&Body::square(77.0, 0.0, 24.0)));
        assert_eq!(r.clamp_point(-5.0, 150.0), (0.0, 100.0));
    }
}
