//! Narrowphase data and logic module.

use crate::{error::BodyError, Fp, Vec2};

/// Handle to a `Body` in the simulation's body list. Stable for the life of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub usize);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A moving circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Center
    pub pos: Vec2,
    pub rad: Fp,
    /// Velocity in units per second. The y component is applied inverted, see `integrate`.
    pub vel: Vec2,
    /// Whether the body touched another during the last collision pass.
    pub collided: bool,
}

impl Body {
    pub fn new(pos: Vec2, rad: Fp, vel: Vec2) -> Result<Body, BodyError> {
        //! Rejects non-finite values and non-positive radii, which would otherwise leak into the quadtree.
        if !rad.is_finite() || rad <= 0.0 {
            return Err(BodyError::Radius(rad));
        }
        if !pos.is_finite() {
            return Err(BodyError::Position(pos.x, pos.y));
        }
        if !vel.is_finite() {
            return Err(BodyError::Velocity(vel.x, vel.y));
        }
        Ok(Body { pos, rad, vel, collided: false })
    }

    #[inline]
    pub fn intersects(&self, other: &Body) -> bool {
        //! Exact circle-circle test. Touching circles intersect.
        self.pos.distance(other.pos) <= self.rad + other.rad
    }
}

// ---------- Collision pass ---------- //

/// Counters from a single collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Candidate pairs examined. Each ordered pair is counted from both sides.
    pub detections: usize,
}

pub fn first_contact(bodies: &[Body], id: BodyId, candidates: &[BodyId], stats: &mut PassStats) -> Option<BodyId> {
    //! Returns the first candidate the body `id` touches. Scanning stops there, multiplicity isn't tracked.
    let body = &bodies[id.index()];
    for &other in candidates {
        if other == id {
            continue;
        }
        stats.detections += 1;

        if body.intersects(&bodies[other.index()]) {
            return Some(other);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: Fp, y: Fp, rad: Fp) -> Body {
        Body::new(Vec2::new(x, y), rad, Vec2::ZERO).unwrap()
    }

    #[test]
    fn body_validation() {
        assert!(Body::new(Vec2::new(1.0, 1.0), 5.0, Vec2::new(-3.0, 2.0)).is_ok());

        assert_eq!(Body::new(Vec2::ZERO, 0.0, Vec2::ZERO), Err(BodyError::Radius(0.0)));
        assert_eq!(Body::new(Vec2::ZERO, -1.0, Vec2::ZERO), Err(BodyError::Radius(-1.0)));
        assert!(matches!(Body::new(Vec2::ZERO, Fp::NAN, Vec2::ZERO), Err(BodyError::Radius(_))));
        assert!(matches!(Body::new(Vec2::ZERO, Fp::INFINITY, Vec2::ZERO), Err(BodyError::Radius(_))));
        assert!(matches!(Body::new(Vec2::new(Fp::NAN, 0.0), 1.0, Vec2::ZERO), Err(BodyError::Position(..))));
        assert!(matches!(
            Body::new(Vec2::ZERO, 1.0, Vec2::new(0.0, Fp::NEG_INFINITY)),
            Err(BodyError::Velocity(..))
        ));
    }

    #[test]
    fn circle_circle_test() {
        assert!(circle(10.0, 10.0, 5.0).intersects(&circle(18.0, 10.0, 5.0)));
        assert!(!circle(0.0, 0.0, 5.0).intersects(&circle(20.0, 20.0, 5.0)));

        // touching counts
        assert!(circle(0.0, 0.0, 5.0).intersects(&circle(10.0, 0.0, 5.0)));
        assert!(!circle(0.0, 0.0, 5.0).intersects(&circle(10.5, 0.0, 5.0)));
    }

    #[test]
    fn first_contact_test() {
        let bodies = vec![circle(10.0, 10.0, 5.0), circle(18.0, 10.0, 5.0), circle(0.0, 0.0, 5.0)];
        let mut stats = PassStats::default();

        assert_eq!(first_contact(&bodies, BodyId(0), &[BodyId(0), BodyId(1)], &mut stats), Some(BodyId(1)));
        assert_eq!(stats.detections, 1);
        assert_eq!(first_contact(&bodies, BodyId(2), &[BodyId(0), BodyId(2)], &mut stats), None);
        assert_eq!(stats.detections, 2);
    }

    #[test]
    fn first_contact_stops_at_first_hit() {
        let bodies = vec![circle(10.0, 10.0, 5.0), circle(30.0, 30.0, 5.0), circle(12.0, 10.0, 5.0), circle(8.0, 10.0, 5.0)];
        let mut stats = PassStats::default();

        let hit = first_contact(&bodies, BodyId(0), &[BodyId(1), BodyId(2), BodyId(3)], &mut stats);
        assert_eq!(hit, Some(BodyId(2)));
        assert_eq!(stats.detections, 2);
    }

    #[test]
    fn first_contact_skips_self() {
        let bodies = vec![circle(10.0, 10.0, 5.0)];
        let mut stats = PassStats::default();

        assert_eq!(first_contact(&bodies, BodyId(0), &[BodyId(0)], &mut stats), None);
        assert_eq!(stats.detections, 0);
    }
}
