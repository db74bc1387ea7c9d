//! The fly agent and its Flying / Landing / Landed state machine
//!
//! Transitions are probabilistic per tick rather than timer-driven, which
//! keeps the swarm desynchronized without per-fly countdown state.
//! Removal on hit happens in shot resolution and can interrupt any state.

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::surface::SurfaceMemory;
use crate::consts::*;
use crate::{facing, surface_rest};

/// Behavioral state of a live fly
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FlyState {
    /// Free flight, steered by flocking influences
    Flying,
    /// Descending toward a chosen surface point
    Landing { target: Vec3, normal: Vec3 },
    /// Sitting on a surface, orientation settling onto the normal
    Landed { normal: Vec3 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fly {
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Quat,
    pub state: FlyState,
    /// Wing-flap phase, cosmetic only
    pub phase: f32,
}

impl Fly {
    /// A stationary fly in free flight at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            state: FlyState::Flying,
            phase: 0.0,
        }
    }

    /// Spawn a fly clustered around the session spawn origin
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let offset = Vec3::new(
            rng.random_range(-SPAWN_SPREAD..SPAWN_SPREAD),
            rng.random_range(-SPAWN_SPREAD..SPAWN_SPREAD),
            rng.random_range(-SPAWN_SPREAD..SPAWN_SPREAD),
        );
        let mut fly = Self::new(SPAWN_ORIGIN + offset);
        fly.phase = rng.random_range(0.0..TAU);
        fly
    }

    /// Advance one tick. `centroid` is the live-flock centroid (zero when
    /// the flock is empty) and `viewpoint` the current camera position.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        centroid: Vec3,
        viewpoint: Vec3,
        surfaces: &SurfaceMemory,
        rng: &mut R,
    ) {
        self.phase = (self.phase + WING_FLAP_RATE * dt) % TAU;
        match self.state {
            FlyState::Flying => self.update_flying(dt, centroid, viewpoint, surfaces, rng),
            FlyState::Landing { target, normal } => self.update_landing(dt, target, normal),
            FlyState::Landed { normal } => self.update_landed(dt, normal, rng),
        }
    }

    fn update_flying<R: Rng>(
        &mut self,
        dt: f32,
        centroid: Vec3,
        viewpoint: Vec3,
        surfaces: &SurfaceMemory,
        rng: &mut R,
    ) {
        // Cohesion toward the flock centroid, clamped so stragglers do
        // not slingshot back
        let cohesion = ((centroid - self.position) * COHESION_GAIN).clamp_length_max(COHESION_CLAMP);
        self.velocity += cohesion * dt;

        // Bounded per-axis jitter keeps the swarm from settling
        let jitter = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        ) * STEER_JITTER;
        self.velocity += jitter * dt;

        // Fixed-magnitude push away from the camera
        let away = (self.position - viewpoint).normalize_or_zero();
        self.velocity += away * CAMERA_REPULSION * dt;

        self.velocity = self.velocity.clamp_length_max(FLY_MAX_SPEED);
        self.position += self.velocity * dt;
        if let Some(dir) = self.velocity.try_normalize() {
            self.orientation = facing(dir);
        }

        if rng.random_bool(LAND_CHANCE) {
            if let Some(point) = surfaces.sample_random(rng) {
                self.state = FlyState::Landing {
                    target: point.position + point.normal * LANDING_OFFSET,
                    normal: point.normal,
                };
            }
        }
    }

    fn update_landing(&mut self, dt: f32, target: Vec3, normal: Vec3) {
        let to_target = target - self.position;
        if to_target.length() < LANDING_EPSILON {
            self.velocity = Vec3::ZERO;
            self.state = FlyState::Landed { normal };
            return;
        }
        // Pure pursuit: converges on the target without overshoot
        self.velocity = (to_target * LANDING_GAIN).clamp_length_max(FLY_MAX_SPEED);
        self.position += self.velocity * dt;
        if let Some(dir) = self.velocity.try_normalize() {
            self.orientation = facing(dir);
        }
    }

    fn update_landed<R: Rng>(&mut self, dt: f32, normal: Vec3, rng: &mut R) {
        // Settle onto the surface normal instead of snapping
        let rest = surface_rest(normal);
        self.orientation = self.orientation.slerp(rest, (SETTLE_RATE * dt).min(1.0));

        if rng.random_bool(TAKEOFF_CHANCE) {
            self.velocity = Vec3::new(
                rng.random_range(-TAKEOFF_DRIFT..TAKEOFF_DRIFT),
                rng.random_range(TAKEOFF_LIFT_MIN..TAKEOFF_LIFT_MAX),
                rng.random_range(-TAKEOFF_DRIFT..TAKEOFF_DRIFT),
            );
            self.state = FlyState::Flying;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::surface::SurfacePoint;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_no_landing_without_surfaces() {
        let mut rng = Pcg32::seed_from_u64(9);
        let surfaces = SurfaceMemory::new();
        let mut fly = Fly::new(Vec3::ZERO);
        for _ in 0..2000 {
            fly.update(DT, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), &surfaces, &mut rng);
            assert!(matches!(fly.state, FlyState::Flying));
        }
    }

    #[test]
    fn test_speed_stays_clamped() {
        let mut rng = Pcg32::seed_from_u64(11);
        let surfaces = SurfaceMemory::new();
        let mut fly = Fly::new(Vec3::ZERO);
        fly.velocity = Vec3::new(50.0, 0.0, 0.0);
        for _ in 0..100 {
            fly.update(DT, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), &surfaces, &mut rng);
            assert!(fly.velocity.length() <= FLY_MAX_SPEED + 1e-4);
        }
    }

    #[test]
    fn test_flying_eventually_lands() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut surfaces = SurfaceMemory::new();
        surfaces.record(
            SurfacePoint {
                position: Vec3::new(0.0, -1.0, 0.0),
                normal: Vec3::Y,
            },
            &mut rng,
        );
        let mut fly = Fly::new(Vec3::ZERO);
        // 1% per tick: overwhelmingly likely within this many ticks
        for _ in 0..20_000 {
            fly.update(DT, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), &surfaces, &mut rng);
            if let FlyState::Landing { target, .. } = fly.state {
                // Target sits just off the surface along its normal
                let expected = Vec3::new(0.0, -1.0 + LANDING_OFFSET, 0.0);
                assert!((target - expected).length() < 1e-5);
                return;
            }
        }
        panic!("fly never chose a landing target");
    }

    #[test]
    fn test_landing_reaches_landed() {
        let surfaces = SurfaceMemory::new();
        let mut rng = Pcg32::seed_from_u64(2);
        let target = Vec3::new(0.0, -1.0, 0.0);
        let mut fly = Fly::new(Vec3::new(0.0, -0.5, 0.0));
        fly.state = FlyState::Landing {
            target,
            normal: Vec3::Y,
        };
        for _ in 0..2000 {
            fly.update(DT, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), &surfaces, &mut rng);
            if matches!(fly.state, FlyState::Landed { .. }) {
                assert_eq!(fly.velocity, Vec3::ZERO);
                assert!((fly.position - target).length() < LANDING_EPSILON);
                return;
            }
        }
        panic!("fly never finished landing");
    }

    #[test]
    fn test_takeoff_is_upward_biased() {
        let surfaces = SurfaceMemory::new();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut fly = Fly::new(Vec3::new(0.0, -1.0, 0.0));
        fly.state = FlyState::Landed { normal: Vec3::Y };
        // 0.3% per tick: give it plenty of room
        for _ in 0..200_000 {
            fly.update(DT, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), &surfaces, &mut rng);
            if matches!(fly.state, FlyState::Flying) {
                assert!(fly.velocity.y >= TAKEOFF_LIFT_MIN);
                return;
            }
        }
        panic!("fly never took off");
    }

    #[test]
    fn test_landed_orientation_settles_toward_normal() {
        let surfaces = SurfaceMemory::new();
        let mut rng = Pcg32::seed_from_u64(2);
        let normal = Vec3::X;
        let mut fly = Fly::new(Vec3::ZERO);
        fly.state = FlyState::Landed { normal };
        let rest = surface_rest(normal);
        let before = fly.orientation.angle_between(rest);
        fly.update(DT, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), &surfaces, &mut rng);
        // Takeoff within one tick is possible but vanishingly unlikely for
        // this seed; the orientation must have moved toward rest
        if matches!(fly.state, FlyState::Landed { .. }) {
            let after = fly.orientation.angle_between(rest);
            assert!(after < before);
        }
    }
}
