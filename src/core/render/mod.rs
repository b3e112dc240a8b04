//=========================================================================
// Render Support
//=========================================================================
//
// Geometry builders, shader sources and the per-frame draw helper. No GPU
// calls happen here; everything goes through the `Renderer` port.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod frame;
pub mod mesh;
pub mod shader;

//=== Public API ==========================================================

pub use frame::{DrawParams, Frame};
pub use mesh::{boxed, plane, BoxFace, BoxFaces, MeshData};
pub use shader::{FRAGMENT_SHADER, VERTEX_SHADER};
