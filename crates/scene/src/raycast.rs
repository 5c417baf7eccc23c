use archscape_common::{ObjectId, Tag};
use glam::Vec3;

/// A ray with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. A zero direction yields `None`.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn down(origin: Vec3) -> Self {
        Self {
            origin,
            direction: Vec3::NEG_Y,
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest intersection found by a scene raycast.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    pub object: ObjectId,
    pub tag: Tag,
    /// World-space hit point.
    pub point: Vec3,
    /// Distance along the ray.
    pub distance: f32,
}

/// Möller-Trumbore ray/triangle test. Returns the ray parameter `t` of the hit.
///
/// Both faces count as hits; colliders are not culled by winding.
pub fn intersect_triangle(origin: Vec3, dir: Vec3, [v0, v1, v2]: [Vec3; 3]) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t >= 0.0).then_some(t)
}

/// Slab test against an axis-aligned box. Returns the entry parameter
/// (0 when the origin is inside), or `None` on a miss.
pub fn intersect_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut near = f32::NEG_INFINITY;
    let mut far = f32::INFINITY;
    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d == 0.0 {
            // Parallel to this slab: inside or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t0 = (min[axis] - o) / d;
        let t1 = (max[axis] - o) / d;
        near = near.max(t0.min(t1));
        far = far.min(t0.max(t1));
    }
    if near > far || far < 0.0 {
        return None;
    }
    Some(near.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRI: [Vec3; 3] = [
        Vec3::new(-1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, -1.0),
        Vec3::new(0.0, 0.0, 1.0),
    ];

    #[test]
    fn triangle_hit_from_above() {
        let t = intersect_triangle(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, TRI).unwrap();
        assert!((t - 5.0).abs() < 1e-6);
    }

    #[test]
    fn triangle_hit_from_below_counts() {
        let t = intersect_triangle(Vec3::new(0.0, -2.0, 0.0), Vec3::Y, TRI).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn triangle_miss_outside_and_behind() {
        assert!(intersect_triangle(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Y, TRI).is_none());
        assert!(intersect_triangle(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, TRI).is_none());
        assert!(intersect_triangle(Vec3::new(0.0, 5.0, 0.0), Vec3::X, TRI).is_none());
    }

    #[test]
    fn aabb_hit_and_miss() {
        let (min, max) = (Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        let t = intersect_aabb(Vec3::ZERO, Vec3::X, min, max).unwrap();
        assert!((t - 5.0).abs() < 1e-6);
        assert!(intersect_aabb(Vec3::ZERO, Vec3::NEG_X, min, max).is_none());
        assert!(intersect_aabb(Vec3::new(0.0, 3.0, 0.0), Vec3::X, min, max).is_none());
        assert_eq!(intersect_aabb(Vec3::new(6.0, 0.0, 0.0), Vec3::X, min, max), Some(0.0));
    }

    #[test]
    fn ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0)).unwrap();
        assert_eq!(ray.direction, Vec3::Z);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, 2.0));
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }
}
