//=========================================================================
// Frame
//=========================================================================
//
// What an object's `draw` sees: the transform stack plus a renderer.
//
// Object placement:
// ```text
//   push → translate(position) → scale(s) → rotate x → rotate y → rotate z
//        → draw_indexed(mesh, projection * model_view) → pop
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::{MatrixMode, Transform, TransformStack};
use crate::core::platform_bridge::{MeshHandle, Renderer, Uniforms};

//=== DrawParams ==========================================================

/// Per-object shading parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub scale: f32,
    pub over: f32,
    pub factor: f32,
}

impl DrawParams {
    pub fn scaled(scale: f32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            over: 1.0,
            factor: 0.0,
        }
    }
}

//=== Frame ===============================================================

pub struct Frame<'a> {
    transforms: &'a mut TransformStack,
    renderer: &'a mut dyn Renderer,
    sky: [f32; 2],
    texture_unit: i32,
}

impl<'a> Frame<'a> {
    pub fn new(
        transforms: &'a mut TransformStack,
        renderer: &'a mut dyn Renderer,
        sky: [f32; 2],
    ) -> Self {
        Self {
            transforms,
            renderer,
            sky,
            texture_unit: 0,
        }
    }

    /// Direct access for objects that compose their own transforms
    /// (the camera). Pushes and pops must balance.
    pub fn transforms(&mut self) -> &mut TransformStack {
        self.transforms
    }

    /// Places `mesh` at `transform` and draws it.
    pub fn draw_mesh(&mut self, mesh: MeshHandle, transform: &Transform, params: DrawParams) {
        let stack = &mut *self.transforms;
        stack.set_mode(MatrixMode::ModelView);
        stack.push();

        let (p, r) = (transform.position, transform.rotation);
        stack.translate(p.x, p.y, p.z);
        stack.scale(params.scale, params.scale, params.scale);
        stack.rotate(r.x, 1.0, 0.0, 0.0);
        stack.rotate(r.y, 0.0, 1.0, 0.0);
        stack.rotate(r.z, 0.0, 0.0, 1.0);

        self.draw_current(mesh, params);
        self.transforms.pop();
    }

    /// Draws `mesh` with the current model-view matrix as is.
    pub fn draw_current(&mut self, mesh: MeshHandle, params: DrawParams) {
        let uniforms = Uniforms {
            model_view_projection: self.transforms.model_view_projection(),
            texture_unit: self.texture_unit,
            factor: params.factor,
            over: params.over,
            sky: self.sky,
        };
        self.renderer.draw_indexed(mesh, &uniforms);
    }
}

//=== Unit Tests ==========================================================
