//=========================================================================
// Axis-Aligned Bounding Box
//=========================================================================
//
// Collider volume used by the collision system.
//
// Boxes are built from a center and a half-extent, so `min <= max` holds
// for any non-negative extent without further checks.
//
// Intersection rule:
// ```text
//   x:  a.min.x <= b.max.x  &&  a.max.x >= b.min.x
//   y:  a.min.y <= b.max.y  &&  a.max.y >= b.min.y
//   z:  a.max.z <= b.max.z  &&  a.max.z >= b.min.z   (a's max face only)
// ```
// The z axis only checks whether `a`'s far face lies inside `b`, which
// makes the test order-sensitive. Game content is tuned against it, so
// callers must keep the (object, camera) argument order.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{vec3, Vector3};

//=== Aabb ================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    /// Creates a box centered on `center` extending `half` along each axis.
    pub fn from_center(center: Vector3, half: Vector3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the box center.
    pub fn center(&self) -> Vector3 {
        vec3(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Tests `self` (as `a`) against `other` (as `b`).
    ///
    /// Not symmetric on the z axis; see the module header.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.max.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_center(vec3(x, y, z), vec3(0.5, 0.5, 0.5))
    }

    #[test]
    fn identical_boxes_intersect() {
        let a = unit_at(3.0, -1.0, 7.5);
        assert!(a.intersects(&a));
    }

    #[test]
    fn disjoint_boxes_never_intersect() {
        let a = unit_at(0.0, 0.0, 0.0);
        for other in [
            unit_at(2.0, 0.0, 0.0),
            unit_at(-2.0, 0.0, 0.0),
            unit_at(0.0, 2.0, 0.0),
            unit_at(0.0, -2.0, 0.0),
            unit_at(0.0, 0.0, 2.0),
            unit_at(0.0, 0.0, -2.0),
        ] {
            assert!(!a.intersects(&other), "{:?} vs {:?}", a, other);
            assert!(!other.intersects(&a), "{:?} vs {:?}", other, a);
        }
    }

    #[test]
    fn touching_faces_count_as_contact() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(1.0, 0.0, 0.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn z_axis_only_considers_first_box_max_face() {
        // Thin NPC box fully inside the camera box in z.
        let npc = Aabb::from_center(vec3(0.2, 0.3, -2.0), vec3(0.015, 0.30, 0.05));
        let camera = Aabb::from_center(vec3(0.0, 0.45, -2.1), vec3(0.25, 0.25, 0.25));
        assert!(npc.intersects(&camera));

        // Camera's far face lies beyond the NPC box, so the reverse order misses.
        assert!(!camera.intersects(&npc));
    }

    #[test]
    fn center_is_midpoint() {
        let b = Aabb::from_center(vec3(1.0, 2.0, 3.0), vec3(0.1, 0.2, 0.3));
        let c = b.center();
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 2.0).abs() < 1e-6);
        assert!((c.z - 3.0).abs() < 1e-6);
    }
}
