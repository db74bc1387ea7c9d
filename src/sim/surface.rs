//! Bounded memory of observed surface points
//!
//! The tracking provider reports at most one surface pose per frame. This
//! keeps a capped, recency-biased sample of everything seen so far, which
//! the flies draw landing targets from.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{SURFACE_CAP, SURFACE_REPLACE_CHANCE};

/// A single observed surface sample. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Capped collection of surface points with reservoir-style churn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceMemory {
    points: Vec<SurfacePoint>,
}

impl SurfaceMemory {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(SURFACE_CAP),
        }
    }

    /// Record an observation. Appends while under capacity; once full,
    /// overwrites a uniformly-random slot with probability
    /// `SURFACE_REPLACE_CHANCE` and otherwise discards the point.
    pub fn record<R: Rng>(&mut self, point: SurfacePoint, rng: &mut R) {
        if self.points.len() < SURFACE_CAP {
            self.points.push(point);
        } else if rng.random_bool(SURFACE_REPLACE_CHANCE) {
            let slot = rng.random_range(0..self.points.len());
            self.points[slot] = point;
        }
        debug_assert!(self.points.len() <= SURFACE_CAP);
    }

    /// Uniformly-random stored point, or `None` while empty
    pub fn sample_random<R: Rng>(&self, rng: &mut R) -> Option<SurfacePoint> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points[rng.random_range(0..self.points.len())])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
