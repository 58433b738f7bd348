use crate::{broad::{square::Square, CAPACITY, MAX_DEPTH}, error::ConfigError, Fp, Vec2};

/// Simulation parameters. `Default` matches the reference demo: a 600x600
/// playfield, radius 10 spawns, and a 3 body node capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: Fp,
    pub height: Fp,
    /// Direct holdings per quadtree node before it subdivides.
    pub capacity: usize,
    /// Quadtree depth past which nodes stop subdividing.
    pub max_depth: u32,
    pub spawn_radius: Fp,
    /// Added to a body's radius to size its candidate probe.
    pub probe_margin: Fp,
    /// Half-open range each spawn velocity component is drawn from.
    pub velocity_range: (Fp, Fp),
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: 600.0,
            height: 600.0,
            capacity: CAPACITY,
            max_depth: MAX_DEPTH,
            spawn_radius: 10.0,
            probe_margin: 1.0,
            velocity_range: (-50.0, 100.0),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: Fp| v.is_finite() && v > 0.0;

        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::Playfield { width: self.width, height: self.height });
        }
        if self.capacity == 0 {
            return Err(ConfigError::Capacity);
        }
        if !positive(self.spawn_radius) {
            return Err(ConfigError::SpawnRadius(self.spawn_radius));
        }
        if self.spawn_radius * 2.0 > self.width.min(self.height) {
            return Err(ConfigError::SpawnTooLarge { radius: self.spawn_radius, width: self.width, height: self.height });
        }
        if !self.probe_margin.is_finite() || self.probe_margin < 0.0 {
            return Err(ConfigError::ProbeMargin(self.probe_margin));
        }
        let (lo, hi) = self.velocity_range;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(ConfigError::VelocityRange(lo, hi));
        }
        Ok(())
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn world(&self) -> Square {
        //! The quadtree root: centered on the playfield, wide enough to cover its longer side.
        Square::new(self.extent() * 0.5, self.width.max(self.height) * 0.5)
    }
}
