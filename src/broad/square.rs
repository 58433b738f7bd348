use crate::{narrow::Body, Fp, Vec2};

/// An axis-aligned square, stored as a center and half side length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub center: Vec2,
    /// Half the side length. Always positive.
    pub half: Fp,
}

impl Square {
    #[inline]
    pub fn new(center: Vec2, half: Fp) -> Square {
        assert!(half > 0.0, "square half length must be positive, got {}", half);
        Square { center, half }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.half)
    }
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.half)
    }
    #[inline]
    pub fn side(&self) -> Fp {
        self.half * 2.0
    }

    #[inline]
    pub fn circle_test(&self, body: &Body) -> bool {
        //! Performs an inclusive test between `self` and the body's bounding box.
        //! Bodies straddling an edge pass for both squares sharing it.
        body.pos.x + body.rad >= self.center.x - self.half
            && body.pos.x - body.rad <= self.center.x + self.half
            && body.pos.y + body.rad >= self.center.y - self.half
            && body.pos.y - body.rad <= self.center.y + self.half
    }

    #[inline]
    pub fn square_test(&self, other: &Square) -> bool {
        //! Exclusive overlap test. Squares sharing only an edge don't overlap.
        let reach = self.half + other.half;
        (self.center.x - other.center.x).abs() < reach && (self.center.y - other.center.y).abs() < reach
    }

    pub fn quadrants(&self) -> Option<[Square; 4]> {
        //! Splits into NW, NE, SW, SE (y grows downward), or `None` once the quarter length underflows.
        let q = self.half / 2.0;
        if !(q > 0.0) {
            return None;
        }
        let (x, y) = (self.center.x, self.center.y);
        Some([
            Square { center: Vec2::new(x - q, y - q), half: q },
            Square { center: Vec2::new(x + q, y - q), half: q },
            Square { center: Vec2::new(x - q, y + q), half: q },
            Square { center: Vec2::new(x + q, y + q), half: q },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(x: Fp, y: Fp, rad: Fp) -> Body {
        Body::new(Vec2::new(x, y), rad, Vec2::ZERO).unwrap()
    }

    #[test]
    fn circle_bounding_test() {
        let sq = Square::new(Vec2::new(0.0, 0.0), 10.0);

        assert!(sq.circle_test(&circle(0.0, 0.0, 1.0)));
        assert!(sq.circle_test(&circle(14.0, 0.0, 5.0))); // straddles
        assert!(sq.circle_test(&circle(15.0, 15.0, 5.0))); // corners touch, inclusive
        assert!(!sq.circle_test(&circle(15.1, 0.0, 5.0)));
        assert!(!sq.circle_test(&circle(0.0, -15.5, 5.0)));

        // a box straddling a shared edge belongs to both sides
        let left = Square::new(Vec2::new(-5.0, 0.0), 5.0);
        let right = Square::new(Vec2::new(5.0, 0.0), 5.0);
        let c = circle(0.5, 0.0, 2.0);
        assert!(left.circle_test(&c) && right.circle_test(&c));
    }

    #[test]
    fn square_square_test() {
        let a = Square::new(Vec2::new(0.0, 0.0), 5.0);

        assert!(a.square_test(&Square::new(Vec2::new(9.0, 9.0), 5.0)));
        assert!(!a.square_test(&Square::new(Vec2::new(10.0, 0.0), 5.0))); // edge contact is exclusive
        assert!(!a.square_test(&Square::new(Vec2::new(0.0, 20.0), 5.0)));
        assert!(a.square_test(&Square::new(Vec2::new(0.0, 0.0), 1.0))); // contained
    }

    #[test]
    fn quadrant_layout() {
        let sq = Square::new(Vec2::new(300.0, 300.0), 300.0);
        let [nw, ne, sw, se] = sq.quadrants().unwrap();

        assert_eq!(nw, Square::new(Vec2::new(150.0, 150.0), 150.0));
        assert_eq!(ne, Square::new(Vec2::new(450.0, 150.0), 150.0));
        assert_eq!(sw, Square::new(Vec2::new(150.0, 450.0), 150.0));
        assert_eq!(se, Square::new(Vec2::new(450.0, 450.0), 150.0));

        // quadrants tile the parent
        assert_eq!(nw.min(), sq.min());
        assert_eq!(se.max(), sq.max());
        assert_eq!(nw.max(), se.min());
    }

    #[test]
    fn quadrants_stop_at_underflow() {
        let tiny = Square { center: Vec2::ZERO, half: Fp::from_bits(1) };
        assert!(tiny.quadrants().is_none());
    }

    #[test]
    #[should_panic]
    fn zero_half_panics() {
        Square::new(Vec2::ZERO, 0.0);
    }

    proptest! {
        #[test]
        fn square_test_is_symmetric(
            ax in -1000.0..1000.0 as Fp, ay in -1000.0..1000.0 as Fp, ah in 0.01..500.0 as Fp,
            bx in -1000.0..1000.0 as Fp, by in -1000.0..1000.0 as Fp, bh in 0.01..500.0 as Fp,
        ) {
            let a = Square::new(Vec2::new(ax, ay), ah);
            let b = Square::new(Vec2::new(bx, by), bh);
            prop_assert_eq!(a.square_test(&b), b.square_test(&a));
        }
    }
}
