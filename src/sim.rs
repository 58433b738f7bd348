//! The per-frame pipeline: spawn, reset, build the quadtree, detect, integrate, report.

use crate::{
    broad::{square::Square, QuadTree, QueryStats},
    config::SimConfig,
    error::{ConfigError, FrameError},
    integrate,
    narrow::{self, Body, BodyId, PassStats},
    spawn::Spawn,
    Fp,
};
use tracing::{debug, error};

/// Counts frames over roughly one second windows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FpsCounter {
    frames: u32,
    elapsed: Fp,
    fps: Option<u32>,
}

impl FpsCounter {
    pub fn tick(&mut self, dt: Fp) -> Option<u32> {
        //! Records one frame of length `dt`. Once more than a second has accumulated the
        //! frame count is published and the window restarts. Returns the latest published value.
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed > 1.0 {
            debug!(fps = self.frames, window = %self.elapsed, "fps window closed");
            self.fps = Some(self.frames);
            self.frames = 0;
            self.elapsed = 0.0;
        }
        self.fps
    }

    #[inline]
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }
}

/// Statistics handed back after every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Live body count, after this frame's spawns.
    pub bodies: usize,
    pub spawned: usize,
    /// Candidate pairs examined by the narrow phase, counted from both sides.
    pub detections: usize,
    /// Bodies flagged as collided.
    pub collisions: usize,
    /// `bodies` squared: the pair count a brute force check would examine.
    pub brute_force_pairs: u64,
    /// Latest published frames per second, if a window has closed yet.
    pub fps: Option<u32>,
    /// Bodies the quadtree could not place below a node that accepted them.
    pub misplaced: usize,
    /// Deepest quadtree node.
    pub depth: u32,
    pub nodes: usize,
    /// Leaf squares, when requested.
    pub grid: Option<Vec<Square>>,
}

/// Everything that lives across frames.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    bodies: Vec<Body>,
    fps: FpsCounter,
    frame: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Simulation, ConfigError> {
        config.validate()?;
        Ok(Simulation { config, bodies: Vec::new(), fps: FpsCounter::default(), frame: 0 })
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
    /// Bodies in creation order, with positions and flags as of the last frame.
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn advance_frame(&mut self, dt: Fp, spawns: &[Spawn], grid: bool) -> Result<FrameReport, FrameError> {
        //! Runs one full frame. Bodies are only ever added, never removed.
        //!
        //! Collision flags describe positions at the start of the frame, before integration.
        //! Input is validated up front: on `Err` the simulation is left untouched.
        if !dt.is_finite() || dt < 0.0 {
            return Err(FrameError::Timestep(dt));
        }
        let spawned = spawns
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.into_body(self.config.spawn_radius, self.config.extent())
                    .map_err(|source| FrameError::Spawn { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let spawn_count = spawned.len();
        self.bodies.extend(spawned);

        let pass = detect(&mut self.bodies, &self.config, grid);
        integrate::integrate(&mut self.bodies, dt, self.config.extent());
        let fps = self.fps.tick(dt);
        self.frame += 1;

        let count = self.bodies.len();
        let report = FrameReport {
            bodies: count,
            spawned: spawn_count,
            detections: pass.stats.detections,
            collisions: self.bodies.iter().filter(|b| b.collided).count(),
            brute_force_pairs: (count as u64) * (count as u64),
            fps,
            misplaced: pass.misplaced,
            depth: pass.depth,
            nodes: pass.nodes,
            grid: pass.grid,
        };
        debug!(
            frame = self.frame,
            bodies = report.bodies,
            detections = report.detections,
            collisions = report.collisions,
            depth = report.depth,
            "frame advanced"
        );
        Ok(report)
    }
}

struct Pass {
    stats: PassStats,
    misplaced: usize,
    depth: u32,
    nodes: usize,
    grid: Option<Vec<Square>>,
}

fn detect(bodies: &mut [Body], config: &SimConfig, grid: bool) -> Pass {
    //! Resets flags, builds a fresh quadtree, and flags every body touching another.
    for b in bodies.iter_mut() {
        b.collided = false;
    }

    // the tree borrows the bodies, so contacts are gathered first and flagged after it's dropped
    let mut stats = PassStats::default();
    let mut contacts = Vec::new();
    let mut misplaced = 0;
    let (depth, nodes, grid) = {
        let mut tree = QuadTree::with_limits(config.world(), bodies, config.capacity, config.max_depth);
        for id in (0..bodies.len()).map(BodyId) {
            match tree.insert(id) {
                Ok(true) => {}
                Ok(false) => debug!(body = id.index(), "body outside the world square"),
                Err(e) => {
                    error!(error = %e, "quadtree defect");
                    misplaced += 1;
                }
            }
        }

        let mut candidates = Vec::new();
        for (i, body) in bodies.iter().enumerate() {
            let id = BodyId(i);
            let probe = Square::new(body.pos, body.rad + config.probe_margin);
            candidates.clear();
            tree.query_with_stats(&probe, &mut candidates, &mut QueryStats::default());
            if let Some(other) = narrow::first_contact(bodies, id, &candidates, &mut stats) {
                contacts.push((id, other));
            }
        }

        (tree.depth(), tree.node_count(), if grid { Some(tree.leaves()) } else { None })
    };

    for (a, b) in contacts {
        bodies[a.index()].collided = true;
        bodies[b.index()].collided = true;
    }

    Pass { stats, misplaced, depth, nodes, grid }
}
