//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the engine core and its host.
//
// The core never touches a GPU, a speaker, a disk or a text view
// directly. Each of those lives behind one of the traits below, and the
// host hands implementations to the engine at build time.
//
// ```text
//   Engine ──> Renderer       compile, upload, draw_indexed
//          ──> AudioTrigger   play(sample)
//          ──> KeyValueStore  get / set strings
//          ──> DialogOutput   show(text) / clear()
//   Host   ──> PlatformEvent  (over a crossbeam channel)
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::{RenderError, StoreError};
use crate::core::input::InputEvent;
use crate::core::math::Matrix4;
use crate::core::render::MeshData;

//=== PlatformEvent =======================================================

/// Events a host pushes into the engine's event channel.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// A single input event.
    Input(InputEvent),

    /// Host window gained (`true`) or lost (`false`) focus.
    FocusChanged(bool),

    /// Host requested shutdown.
    WindowClosed,
}

//=== Rendering ===========================================================

/// Opaque handle to an uploaded mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Per-draw shader inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    /// `projection * model_view` at the time of the draw.
    pub model_view_projection: Matrix4,

    /// Texture unit the atlas is bound to.
    pub texture_unit: i32,

    /// Blend between the base and alternate atlas rows (0..=1).
    pub factor: f32,

    /// Light intensity; values above 1 add a warm glow near the camera.
    pub over: f32,

    /// Fog colour red and blue channels.
    pub sky: [f32; 2],
}

/// GPU adapter.
pub trait Renderer {
    /// Compiles and links the single shader program.
    fn compile_program(&mut self, vertex: &str, fragment: &str) -> Result<(), RenderError>;

    /// Uploads vertex, texture-coordinate and index buffers.
    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<MeshHandle, RenderError>;

    /// Resizes the drawable viewport.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clears colour and depth before a frame.
    fn begin_frame(&mut self);

    /// Draws `mesh` as indexed triangles.
    fn draw_indexed(&mut self, mesh: MeshHandle, uniforms: &Uniforms);
}

//=== Audio ===============================================================

/// Fire-and-forget sample playback.
pub trait AudioTrigger {
    fn play(&mut self, sample: &str);
}

//=== Storage =============================================================

/// Durable string store (browser local storage, a directory, memory).
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

//=== Dialog Output =======================================================

/// The single overlay text line shown over the 3D view.
pub trait DialogOutput {
    fn show(&mut self, text: &str);

    fn clear(&mut self);
}
