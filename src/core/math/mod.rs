//=========================================================================
// Math Primitives
//=========================================================================
//
// Vector, transform and bounding-box types shared by every subsystem.
//
// Vectors and matrices are `cgmath` types in single precision; rotations
// are stored as degrees per axis, matching how the transform stack
// consumes them.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod aabb;
pub mod transform_stack;

//=== Public API ==========================================================

pub use aabb::Aabb;
pub use transform_stack::{MatrixMode, TransformStack};

/// Three-component single-precision vector.
pub type Vector3 = cgmath::Vector3<f32>;

/// 4×4 single-precision matrix (column-vector convention).
pub type Matrix4 = cgmath::Matrix4<f32>;

/// Shorthand constructor for [`Vector3`].
#[inline]
pub const fn vec3(x: f32, y: f32, z: f32) -> Vector3 {
    Vector3::new(x, y, z)
}

//=== Transform ===========================================================

/// Position plus per-axis rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Vector3,
}

impl Transform {
    /// Creates a transform at `position` with no rotation.
    pub const fn at(position: Vector3) -> Self {
        Self {
            position,
            rotation: vec3(0.0, 0.0, 0.0),
        }
    }

    /// Overwrites the given position axes, leaving `None` axes untouched.
    pub fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        assign_axes(&mut self.position, x, y, z);
    }

    /// Overwrites the given rotation axes, leaving `None` axes untouched.
    pub fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        assign_axes(&mut self.rotation, x, y, z);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(vec3(0.0, 0.0, 0.0))
    }
}

fn assign_axes(target: &mut Vector3, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
    if let Some(x) = x {
        target.x = x;
    }
    if let Some(y) = y {
        target.y = y;
    }
    if let Some(z) = z {
        target.z = z;
    }
}

//=== Unit Tests ==========================================================
