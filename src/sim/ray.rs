//! Ray queries against fly bounding spheres
//!
//! Shots are resolved with a single analytic ray/sphere test per fly;
//! the nearest positive intersection along the ray wins.

use glam::Vec3;

/// Distance along the ray to the nearest intersection with a sphere, or
/// `None` on a miss. `dir` must be unit length. Intersections entirely
/// behind the origin count as misses; a ray starting inside the sphere
/// reports the exit distance.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let proj = to_center.dot(dir);
    let closest_sq = to_center.length_squared() - proj * proj;
    let r_sq = radius * radius;
    if closest_sq > r_sq {
        return None;
    }
    let half_chord = (r_sq - closest_sq).sqrt();
    let near = proj - half_chord;
    let far = proj + half_chord;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_on_hit() {
        let t = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -5.0), 0.5);
        assert!((t.unwrap() - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_grazing_offset_miss() {
        let t = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(1.0, 0.0, -5.0), 0.5);
        assert!(t.is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let t = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 5.0), 0.5);
        assert!(t.is_none());
    }

    #[test]
    fn test_origin_inside_sphere() {
        let t = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -0.1), 0.5);
        // Exit distance, not a miss
        assert!((t.unwrap() - 0.4).abs() < 1e-4);
    }
}
