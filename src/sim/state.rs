//! Session state and flock control
//!
//! `SessionState` owns everything the sim mutates: the flock, the surface
//! memory, the ammo machine, live hit effects, score, and the seeded RNG.
//! One session = one state value; dropping it ends the session and
//! discards all of it.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ammo::AmmoState;
use super::effect::HitEffect;
use super::fly::Fly;
use super::surface::{SurfaceMemory, SurfacePoint};
use crate::consts::*;

/// One-shot notifications for HUD/audio sinks, drained each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FlyHit { position: Vec3 },
    ShotMissed,
    ReloadStarted,
    ReloadFinished,
    /// The last fly is gone. Emitted once; what the session layer does
    /// with it is up to the session layer.
    FlockCleared,
}

/// HUD-facing view of the session, valid after every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u32,
    pub loaded: u8,
    pub reserve: u32,
    pub reloading: bool,
    pub flies_left: usize,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Elapsed simulation time
    pub time: f32,
    pub score: u32,
    /// Live flies; population only ever shrinks
    pub flies: Vec<Fly>,
    pub surfaces: SurfaceMemory,
    pub ammo: AmmoState,
    /// Live hit markers, exposed to the render sink with derived
    /// scale/opacity
    pub effects: Vec<HitEffect>,
    /// Most recent frame's tracked surface point, if any
    pub reticle: Option<SurfacePoint>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) cleared_announced: bool,
}

impl SessionState {
    /// Start a session: seeds the RNG and spawns the full flock clustered
    /// around the spawn origin. The flock is never replenished.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let flies = (0..FLOCK_SIZE).map(|_| Fly::spawn(&mut rng)).collect();
        log::info!("session start: seed={seed}, {FLOCK_SIZE} flies");
        Self {
            seed,
            time: 0.0,
            score: 0,
            flies,
            surfaces: SurfaceMemory::new(),
            ammo: AmmoState::new(STARTING_RESERVE),
            effects: Vec::new(),
            reticle: None,
            rng,
            events: Vec::new(),
            cleared_announced: false,
        }
    }

    /// Centroid of live fly positions; zero when the flock is empty
    /// (callers treat that as "no cohesion target", not an error)
    pub fn centroid(&self) -> Vec3 {
        if self.flies.is_empty() {
            return Vec3::ZERO;
        }
        self.flies.iter().map(|f| f.position).sum::<Vec3>() / self.flies.len() as f32
    }

    pub fn flock_empty(&self) -> bool {
        self.flies.is_empty()
    }

    /// Record a tracked surface observation
    pub fn record_surface(&mut self, point: SurfacePoint) {
        self.surfaces.record(point, &mut self.rng);
    }

    /// Advance every fly's state machine against this frame's centroid
    /// and viewpoint
    pub fn advance_flies(&mut self, dt: f32, viewpoint: Vec3) {
        let centroid = self.centroid();
        let Self {
            flies,
            surfaces,
            rng,
            ..
        } = self;
        for fly in flies.iter_mut() {
            fly.update(dt, centroid, viewpoint, surfaces, rng);
        }
    }

    /// Drain the events accumulated since the previous call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            loaded: self.ammo.loaded,
            reserve: self.ammo.reserve,
            reloading: self.ammo.reloading,
            flies_left: self.flies.len(),
        }
    }
}
