//! Hit-marker visual lifecycle
//!
//! Spawned at a confirmed hit point, expands and fades, then disappears.
//! Aging is driven by the same per-frame dt as the rest of the sim; there
//! is no second animation loop.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{EFFECT_GROWTH, EFFECT_LIFETIME};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitEffect {
    pub position: Vec3,
    pub age: f32,
}

impl HitEffect {
    pub fn new(position: Vec3) -> Self {
        Self { position, age: 0.0 }
    }

    /// Render scale, grows monotonically with age
    pub fn scale(&self) -> f32 {
        1.0 + EFFECT_GROWTH * (self.age / EFFECT_LIFETIME)
    }

    /// Render opacity, decays monotonically with age
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age / EFFECT_LIFETIME).max(0.0)
    }

    /// True once the age has exceeded the fixed lifetime, never before
    pub fn expired(&self) -> bool {
        self.age > EFFECT_LIFETIME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_effect() {
        let effect = HitEffect::new(Vec3::ZERO);
        assert_eq!(effect.scale(), 1.0);
        assert_eq!(effect.opacity(), 1.0);
        assert!(!effect.expired());
    }

    #[test]
    fn test_expires_only_past_lifetime() {
        let mut effect = HitEffect::new(Vec3::ZERO);
        effect.age = EFFECT_LIFETIME;
        assert!(!effect.expired());
        effect.age = EFFECT_LIFETIME + 0.001;
        assert!(effect.expired());
    }

    #[test]
    fn test_scale_grows_and_opacity_decays() {
        let mut young = HitEffect::new(Vec3::ZERO);
        let mut old = HitEffect::new(Vec3::ZERO);
        young.age = 0.1;
        old.age = 0.4;
        assert!(old.scale() > young.scale());
        assert!(old.opacity() < young.opacity());
    }
}
