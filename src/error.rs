use crate::{narrow::BodyId, Fp};
use thiserror::Error;

/// Rejections raised while constructing a `Body`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    #[error("radius must be finite and positive, got {0}")]
    Radius(Fp),
    #[error("position must be finite, got ({0}, {1})")]
    Position(Fp, Fp),
    #[error("velocity must be finite, got ({0}, {1})")]
    Velocity(Fp, Fp),
}

/// Defect signals raised by the quadtree.
///
/// These are never part of normal operation: a body either belongs to a
/// subtree or it doesn't. Reaching one of these means the quadrant geometry
/// failed to cover its parent.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IndexError {
    /// The node accepted the body but none of its quadrants did.
    /// The body is retained in the node's own holdings.
    #[error("body {body:?} overlaps a depth {depth} node but no quadrant accepted it")]
    Unplaced { body: BodyId, depth: u32 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("playfield must be finite and positive, got {width}x{height}")]
    Playfield { width: Fp, height: Fp },
    #[error("node capacity must be at least 1")]
    Capacity,
    #[error("spawn radius must be finite and positive, got {0}")]
    SpawnRadius(Fp),
    #[error("spawn radius {radius} does not fit a {width}x{height} playfield")]
    SpawnTooLarge { radius: Fp, width: Fp, height: Fp },
    #[error("probe margin must be finite and non-negative, got {0}")]
    ProbeMargin(Fp),
    #[error("velocity range must be finite and ordered, got [{0}, {1})")]
    VelocityRange(Fp, Fp),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("timestep must be finite and non-negative, got {0}")]
    Timestep(Fp),
    #[error("spawn {index} rejected: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: BodyError,
    },
}
