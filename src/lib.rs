//! Swat AR - simulation core for an AR fly-swatting mini-game
//!
//! The player points a camera device at real surfaces, the sim remembers
//! the surfaces it has seen, a small swarm of flies explores the room and
//! lands on them, and center-of-view shots knock the flies down.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flocking, landing, shooting, ammo,
//!   hit effects)
//!
//! Rendering, surface tracking, audio and the HUD live outside this crate;
//! they feed the sim plain per-frame inputs and read plain snapshots back.

pub mod sim;

pub use sim::{FrameClock, FrameInput, SessionState, Viewpoint};

use glam::{Quat, Vec3};

/// Gameplay tunables
pub mod consts {
    use glam::Vec3;

    /// Fallback dt for the first frame-clock sample
    pub const DT_FALLBACK: f32 = 0.016;
    /// Per-frame delta ceiling (protects the sim after a stall)
    pub const DT_MAX: f32 = 0.05;

    /// Surface memory capacity
    pub const SURFACE_CAP: usize = 50;
    /// Chance a new observation replaces a stored slot once full
    pub const SURFACE_REPLACE_CHANCE: f64 = 0.1;

    /// Flies spawned at session start (never replenished)
    pub const FLOCK_SIZE: usize = 10;
    /// Spawn cluster center, in front of the starting viewpoint (meters)
    pub const SPAWN_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, -1.5);
    /// Max per-axis spawn offset from the cluster center
    pub const SPAWN_SPREAD: f32 = 0.4;

    /// Hard cap on fly speed (m/s)
    pub const FLY_MAX_SPEED: f32 = 0.6;
    /// Steering gain toward the flock centroid
    pub const COHESION_GAIN: f32 = 0.5;
    /// Cap on the cohesion steering magnitude
    pub const COHESION_CLAMP: f32 = 0.3;
    /// Per-axis amplitude of the random steering jitter (m/s²)
    pub const STEER_JITTER: f32 = 0.5;
    /// Fixed-magnitude push away from the camera (m/s²)
    pub const CAMERA_REPULSION: f32 = 0.25;

    /// Per-tick chance a flying fly picks a landing target
    pub const LAND_CHANCE: f64 = 0.01;
    /// Per-tick chance a landed fly takes off again
    pub const TAKEOFF_CHANCE: f64 = 0.003;
    /// Pursuit gain while descending to the landing target
    pub const LANDING_GAIN: f32 = 2.0;
    /// Arrival distance that completes a landing (meters)
    pub const LANDING_EPSILON: f32 = 0.02;
    /// Landing target offset along the surface normal (meters)
    pub const LANDING_OFFSET: f32 = 0.01;
    /// Orientation settle rate once landed (1/s)
    pub const SETTLE_RATE: f32 = 8.0;
    /// Lateral drift range of a takeoff velocity (m/s)
    pub const TAKEOFF_DRIFT: f32 = 0.2;
    /// Upward bias of a takeoff velocity (m/s)
    pub const TAKEOFF_LIFT_MIN: f32 = 0.1;
    pub const TAKEOFF_LIFT_MAX: f32 = 0.3;
    /// Wing-flap phase rate (radians/s, cosmetic)
    pub const WING_FLAP_RATE: f32 = 40.0;

    /// Bounding-sphere radius used for shot resolution (meters)
    pub const FLY_HIT_RADIUS: f32 = 0.08;

    /// Magazine capacity
    pub const MAG_SIZE: u8 = 6;
    /// Reserve rounds at session start
    pub const STARTING_RESERVE: u32 = 24;
    /// Reload duration (seconds)
    pub const RELOAD_SECS: f32 = 0.9;

    /// Hit-marker lifetime (seconds)
    pub const EFFECT_LIFETIME: f32 = 0.5;
    /// Extra scale a hit marker gains over its lifetime
    pub const EFFECT_GROWTH: f32 = 2.0;
}

/// Orientation facing along `dir` (unit length; forward = -Z)
#[inline]
pub fn facing(dir: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::NEG_Z, dir)
}

/// Orientation resting on a surface with unit normal `normal` (up = +Y)
#[inline]
pub fn surface_rest(normal: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::Y, normal)
}
