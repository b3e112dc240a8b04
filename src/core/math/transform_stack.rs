//=========================================================================
// Transform Stack
//=========================================================================
//
// Fixed-function style matrix stack with two independent modes.
//
// Architecture:
// ```text
//   set_mode(Projection) ──> [projection matrix] + [projection stack]
//   set_mode(ModelView)  ──> [modelview matrix]  + [modelview stack]
//
//   translate / scale / rotate / multiply / perspective
//        └─ right-multiply onto the active mode's matrix
//
//   push ──> copy active matrix onto active stack
//   pop  ──> restore most recent copy (no-op when empty)
// ```
//
// The renderer consumes `model_view_projection()` once per draw call.
//
//=========================================================================

//=== External Dependencies ===============================================

use cgmath::{Deg, InnerSpace, SquareMatrix};

//=== Internal Dependencies ===============================================

use super::{vec3, Matrix4};

//=== MatrixMode ==========================================================

/// Selects which matrix subsequent operations target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixMode {
    Projection,
    ModelView,
}

//=== TransformStack ======================================================

/// Projection and model-view matrices, each with its own save stack.
///
/// # Examples
///
/// ```
/// use chapel_engine::core::math::{MatrixMode, TransformStack};
///
/// let mut stack = TransformStack::new();
/// stack.set_mode(MatrixMode::ModelView);
/// stack.push();
/// stack.translate(1.0, 2.0, 3.0);
/// stack.pop();
/// assert_eq!(stack.depth(MatrixMode::ModelView), 0);
/// ```
#[derive(Debug, Clone)]
pub struct TransformStack {
    mode: MatrixMode,
    projection: Matrix4,
    model_view: Matrix4,
    projection_stack: Vec<Matrix4>,
    model_view_stack: Vec<Matrix4>,
}

impl TransformStack {
    /// Creates a stack with both matrices at identity, in model-view mode.
    pub fn new() -> Self {
        Self {
            mode: MatrixMode::ModelView,
            projection: Matrix4::identity(),
            model_view: Matrix4::identity(),
            projection_stack: Vec::new(),
            model_view_stack: Vec::new(),
        }
    }

    //--- Mode -------------------------------------------------------------

    pub fn set_mode(&mut self, mode: MatrixMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> MatrixMode {
        self.mode
    }

    //--- Loading ----------------------------------------------------------

    /// Resets the active matrix to identity.
    pub fn load_identity(&mut self) {
        *self.active_mut() = Matrix4::identity();
    }

    /// Replaces the active matrix.
    pub fn load(&mut self, m: Matrix4) {
        *self.active_mut() = m;
    }

    //--- Composition ------------------------------------------------------

    /// Right-multiplies `m` onto the active matrix.
    pub fn multiply(&mut self, m: Matrix4) {
        let current = self.active_mut();
        *current = *current * m;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.multiply(Matrix4::from_translation(vec3(x, y, z)));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.multiply(Matrix4::from_nonuniform_scale(x, y, z));
    }

    /// Rotates by `angle` degrees around the axis `(x, y, z)`.
    ///
    /// The axis is normalized first. A zero angle or zero-length axis
    /// composes the identity and leaves the matrix unchanged.
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        let axis = vec3(x, y, z);
        if angle == 0.0 || axis.magnitude2() == 0.0 {
            return;
        }
        self.multiply(Matrix4::from_axis_angle(axis.normalize(), Deg(angle)));
    }

    /// Composes a symmetric perspective frustum.
    ///
    /// `fov` is the full vertical field of view in degrees. Requires
    /// `0 < near < far`.
    pub fn perspective(&mut self, fov: f32, aspect: f32, near: f32, far: f32) {
        debug_assert!(near > 0.0 && near < far, "invalid depth range {}..{}", near, far);
        let y = (fov.to_radians() * 0.5).tan() * near;
        let x = y * aspect;
        self.frustum(-x, x, -y, y, near, far);
    }

    /// Composes an arbitrary frustum.
    pub fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.multiply(cgmath::frustum(left, right, bottom, top, near, far));
    }

    //--- Save / Restore ---------------------------------------------------

    /// Saves a copy of the active matrix.
    pub fn push(&mut self) {
        let current = *self.active();
        self.active_stack_mut().push(current);
    }

    /// Restores the most recently pushed matrix of the active mode.
    ///
    /// Does nothing if the stack is empty.
    pub fn pop(&mut self) {
        if let Some(m) = self.active_stack_mut().pop() {
            *self.active_mut() = m;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the active matrix.
    pub fn current(&self) -> Matrix4 {
        *self.active()
    }

    pub fn matrix(&self, mode: MatrixMode) -> Matrix4 {
        match mode {
            MatrixMode::Projection => self.projection,
            MatrixMode::ModelView => self.model_view,
        }
    }

    /// Returns `projection * model_view`.
    pub fn model_view_projection(&self) -> Matrix4 {
        self.projection * self.model_view
    }

    /// Number of saved matrices for `mode`.
    pub fn depth(&self, mode: MatrixMode) -> usize {
        match mode {
            MatrixMode::Projection => self.projection_stack.len(),
            MatrixMode::ModelView => self.model_view_stack.len(),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn active(&self) -> &Matrix4 {
        match self.mode {
            MatrixMode::Projection => &self.projection,
            MatrixMode::ModelView => &self.model_view,
        }
    }

    fn active_mut(&mut self) -> &mut Matrix4 {
        match self.mode {
            MatrixMode::Projection => &mut self.projection,
            MatrixMode::ModelView => &mut self.model_view,
        }
    }

    fn active_stack_mut(&mut self) -> &mut Vec<Matrix4> {
        match self.mode {
            MatrixMode::Projection => &mut self.projection_stack,
            MatrixMode::ModelView => &mut self.model_view_stack,
        }
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn approx(a: Matrix4, b: Matrix4) -> bool {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn push_mutate_pop_restores_exact_matrix() {
        let mut stack = TransformStack::new();
        stack.translate(0.5, -1.0, 2.0);
        stack.rotate(33.0, 0.0, 1.0, 0.0);
        let before = stack.current();

        stack.push();
        stack.translate(9.0, 9.0, 9.0);
        stack.scale(2.0, 3.0, 4.0);
        stack.rotate(71.0, 1.0, 1.0, 0.0);
        assert_ne!(stack.current(), before);
        stack.pop();

        assert_eq!(stack.current(), before);
        assert_eq!(stack.depth(MatrixMode::ModelView), 0);
    }

    #[test]
    fn pop_on_empty_stack_is_noop() {
        let mut stack = TransformStack::new();
        stack.translate(1.0, 0.0, 0.0);
        let before = stack.current();
        stack.pop();
        assert_eq!(stack.current(), before);
    }

    #[test]
    fn modes_keep_separate_matrices_and_stacks() {
        let mut stack = TransformStack::new();
        stack.set_mode(MatrixMode::Projection);
        stack.push();
        stack.scale(2.0, 2.0, 2.0);

        stack.set_mode(MatrixMode::ModelView);
        assert_eq!(stack.current(), Matrix4::identity());
        assert_eq!(stack.depth(MatrixMode::ModelView), 0);
        assert_eq!(stack.depth(MatrixMode::Projection), 1);

        // Popping model-view must not touch the projection stack.
        stack.pop();
        assert_eq!(stack.depth(MatrixMode::Projection), 1);
    }

    #[test]
    fn zero_angle_or_axis_rotation_is_identity() {
        let mut stack = TransformStack::new();
        stack.rotate(0.0, 0.0, 1.0, 0.0);
        stack.rotate(45.0, 0.0, 0.0, 0.0);
        assert_eq!(stack.current(), Matrix4::identity());
    }

    #[test]
    fn rotation_axis_is_normalized() {
        let mut a = TransformStack::new();
        a.rotate(30.0, 0.0, 5.0, 0.0);
        let mut b = TransformStack::new();
        b.rotate(30.0, 0.0, 1.0, 0.0);
        assert!(approx(a.current(), b.current()));
    }

    #[test]
    fn rotate_about_y_maps_x_axis_to_minus_z() {
        let mut stack = TransformStack::new();
        stack.rotate(90.0, 0.0, 1.0, 0.0);
        let v = stack.current() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn translate_then_scale_composes_right_to_left() {
        let mut stack = TransformStack::new();
        stack.translate(1.0, 0.0, 0.0);
        stack.scale(2.0, 2.0, 2.0);
        let v = stack.current() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((v.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn perspective_matches_symmetric_frustum() {
        let mut stack = TransformStack::new();
        stack.set_mode(MatrixMode::Projection);
        stack.perspective(90.0, 2.0, 0.01, 1000.0);
        let m = stack.current();

        // tan(45°) == 1, so the vertical scale is exactly 1 and x is 1/aspect.
        assert!((m.y.y - 1.0).abs() < 1e-4);
        assert!((m.x.x - 0.5).abs() < 1e-4);
        assert!((m.z.w + 1.0).abs() < 1e-6);
        assert!(m.w.w.abs() < 1e-6);
    }

    #[test]
    fn mvp_is_projection_times_model_view() {
        let mut stack = TransformStack::new();
        stack.set_mode(MatrixMode::Projection);
        stack.perspective(60.0, 1.5, 0.1, 100.0);
        stack.set_mode(MatrixMode::ModelView);
        stack.translate(0.0, 0.0, -5.0);

        let expected = stack.matrix(MatrixMode::Projection) * stack.matrix(MatrixMode::ModelView);
        assert_eq!(stack.model_view_projection(), expected);
    }
}
