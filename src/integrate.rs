//! Motion integration with reflection off the playfield edges.
//!
//! Velocity y is applied inverted: a positive `vel.y` moves a body toward
//! smaller y. Renderers draw with y growing downward, so positive `vel.y`
//! reads as "up" on screen.

use crate::{narrow::Body, Fp, Vec2};

pub fn step(body: &mut Body, dt: Fp, extent: Vec2) {
    //! Advances `body` by `dt` seconds within a playfield spanning `0..extent`.
    //!
    //! Each axis is handled independently. If the proposed position would put the
    //! body's edge on or past a wall, that velocity component is flipped and the
    //! step is retaken with the flipped velocity from the old position. Position
    //! is never clamped.
    let next_x = body.pos.x + body.vel.x * dt;
    let next_y = body.pos.y - body.vel.y * dt;

    if next_x - body.rad <= 0.0 || next_x + body.rad >= extent.x {
        body.vel.x = -body.vel.x;
        body.pos.x += body.vel.x * dt;
    } else {
        body.pos.x = next_x;
    }

    if next_y - body.rad <= 0.0 || next_y + body.rad >= extent.y {
        body.vel.y = -body.vel.y;
        body.pos.y -= body.vel.y * dt;
    } else {
        body.pos.y = next_y;
    }
}

#[inline]
pub fn integrate(bodies: &mut [Body], dt: Fp, extent: Vec2) {
    for body in bodies.iter_mut() {
        step(body, dt, extent);
    }
}
