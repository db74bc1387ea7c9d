//! Per-frame simulation entry point
//!
//! The platform layer calls [`tick`] exactly once per display refresh with
//! whatever it gathered for that frame. In-frame order is fixed: surface
//! memory, flock, shot resolution, reload timing, effect aging. Shot
//! resolution therefore always sees fly positions as advanced by the same
//! frame, never stale ones.

use glam::Vec3;

use super::effect::HitEffect;
use super::ray::ray_sphere;
use super::state::{GameEvent, SessionState};
use super::surface::SurfacePoint;
use crate::consts::*;

/// Viewer pose for the current frame
#[derive(Debug, Clone, Copy)]
pub struct Viewpoint {
    pub position: Vec3,
    /// Forward view direction, unit length
    pub forward: Vec3,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }
}

/// Inputs gathered by the platform layer for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Surface pose from the tracking provider; `None` is a normal frame,
    /// not an error
    pub surface: Option<SurfacePoint>,
    /// User pulled the trigger this frame
    pub fire: bool,
}

/// Derives clamped per-frame deltas from a monotonic elapsed-time clock
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous sample, clamped to `DT_MAX` so a stalled
    /// frame cannot blow up the integration; the first sample yields
    /// `DT_FALLBACK`.
    pub fn delta(&mut self, elapsed: f32) -> f32 {
        let dt = match self.last {
            Some(prev) => (elapsed - prev).clamp(0.0, DT_MAX),
            None => DT_FALLBACK,
        };
        self.last = Some(elapsed);
        dt
    }
}

/// Advance the session by one frame
pub fn tick(state: &mut SessionState, input: &FrameInput, view: &Viewpoint, dt: f32) {
    state.time += dt;

    state.reticle = input.surface;
    if let Some(point) = input.surface {
        state.record_surface(point);
    }

    state.advance_flies(dt, view.position);

    if input.fire {
        resolve_shot(state, view);
    }

    if state.ammo.tick(dt) {
        state.events.push(GameEvent::ReloadFinished);
    }

    for effect in &mut state.effects {
        effect.age += dt;
    }
    state.effects.retain(|e| !e.expired());
}

/// Resolve a trigger pull: gate on the ammo machine, cast the
/// center-of-view ray, and apply the consequences of the nearest hit.
/// Ammo decrement and fly removal are applied back to back on the single
/// frame thread, so no other trigger can interleave between them.
fn resolve_shot(state: &mut SessionState, view: &Viewpoint) {
    let was_reloading = state.ammo.reloading;
    let fired = state.ammo.consume();
    if !fired {
        // Dry trigger: auto-request a reload if one is eligible, drop the
        // pull otherwise
        state.ammo.request_reload();
    }
    if state.ammo.reloading && !was_reloading {
        state.events.push(GameEvent::ReloadStarted);
    }
    if !fired {
        return;
    }

    // Nearest intersection along the ray wins
    let mut best: Option<(usize, f32)> = None;
    for (i, fly) in state.flies.iter().enumerate() {
        if let Some(t) = ray_sphere(view.position, view.forward, fly.position, FLY_HIT_RADIUS) {
            if best.is_none_or(|(_, best_t)| t < best_t) {
                best = Some((i, t));
            }
        }
    }

    let Some((idx, t)) = best else {
        state.events.push(GameEvent::ShotMissed);
        return;
    };

    let position = view.position + view.forward * t;
    state.flies.remove(idx);
    state.score += 1;
    state.effects.push(HitEffect::new(position));
    state.events.push(GameEvent::FlyHit { position });
    log::debug!("fly down at t={t:.2}, {} left", state.flies.len());

    if state.flies.is_empty() && !state.cleared_announced {
        state.cleared_announced = true;
        state.events.push(GameEvent::FlockCleared);
        log::info!("flock cleared, final score {}", state.score);
    }
}
