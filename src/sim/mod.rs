//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only by the per-frame dt handed in by the caller
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ammo;
pub mod effect;
pub mod fly;
pub mod ray;
pub mod state;
pub mod surface;
pub mod tick;

pub use ammo::AmmoState;
pub use effect::HitEffect;
pub use fly::{Fly, FlyState};
pub use ray::ray_sphere;
pub use state::{GameEvent, HudSnapshot, SessionState};
pub use surface::{SurfaceMemory, SurfacePoint};
pub use tick::{FrameClock, FrameInput, Viewpoint, tick};
