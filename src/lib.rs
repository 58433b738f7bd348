//! Broadphase collision detection for a growing population of moving circles.
//!
//! Every frame a region quadtree is rebuilt over the live bodies, each body
//! queries it for nearby candidates, candidates are resolved with an exact
//! circle test, and motion is integrated with reflection off the playfield edges.
//!
//! ```
//! use quadphase::{SimConfig, Simulation, Spawn, Vec2};
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! let spawns = [
//!     Spawn::new(Vec2::new(100.0, 100.0), Vec2::new(20.0, 0.0)),
//!     Spawn::new(Vec2::new(108.0, 100.0), Vec2::new(-20.0, 0.0)),
//! ];
//! let report = sim.advance_frame(0.015, &spawns, false).unwrap();
//! assert_eq!(report.bodies, 2);
//! assert_eq!(report.collisions, 2);
//! ```

pub mod broad;
pub mod config;
pub mod error;
pub mod integrate;
pub mod narrow;
pub mod sim;
pub mod spawn;

pub use broad::{square::Square, QuadTree, QueryStats};
pub use config::SimConfig;
pub use error::{BodyError, ConfigError, FrameError, IndexError};
pub use narrow::{Body, BodyId};
pub use sim::{FpsCounter, FrameReport, Simulation};
pub use spawn::Spawn;

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;
