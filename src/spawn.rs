use crate::{error::BodyError, narrow::Body, Fp, Vec2};
use rand::Rng;

/// A request to add one body to the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Spawn {
    #[inline]
    pub fn new(pos: Vec2, vel: Vec2) -> Spawn {
        Spawn { pos, vel }
    }

    pub fn random<R: Rng + ?Sized>(pos: Vec2, (lo, hi): (Fp, Fp), rng: &mut R) -> Spawn {
        //! Draws each velocity component independently and uniformly from `lo..hi`.
        let span = hi - lo;
        let vx = rng.gen::<Fp>() * span + lo;
        let vy = rng.gen::<Fp>() * span + lo;
        Spawn { pos, vel: Vec2::new(vx, vy) }
    }

    pub fn into_body(self, rad: Fp, extent: Vec2) -> Result<Body, BodyError> {
        //! Builds the body, first shifting it so the whole circle lies within `0..extent`.
        let pos = Vec2::new(clamp_axis(self.pos.x, rad, extent.x), clamp_axis(self.pos.y, rad, extent.y));
        Body::new(pos, rad, self.vel)
    }
}

#[inline]
fn clamp_axis(v: Fp, rad: Fp, max: Fp) -> Fp {
    if v + rad > max {
        v - (v + rad - max)
    } else if v - rad < 0.0 {
        v + (v - rad).abs()
    } else {
        v
    }
}
