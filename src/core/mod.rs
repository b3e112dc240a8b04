//=========================================================================
// Core Systems
//
// Everything the engine runs between two host frames.
//
// Responsibilities:
// - Schedule fixed steps from host timestamps (frame_loop)
// - Route host input into held keys and immediate hooks (input)
// - Own scenes, the camera, collisions and deferred commands (scene)
// - Compose matrices and collide boxes (math)
// - Build meshes and issue draws through the renderer port (render)
// - Play chaptered and branching dialogs (dialog)
// - Persist dialog progress and trigger sounds (persistence, audio)
//
// Notes:
// The core never talks to a GPU, a speaker or a disk directly. Every
// host service sits behind a trait in `platform_bridge`.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod audio;
pub mod dialog;
pub mod error;
pub mod frame_loop;
pub mod globals;
pub mod input;
pub mod math;
pub mod persistence;
pub mod platform_bridge;
pub mod render;
pub mod scene;

//=== Public API ==========================================================

pub use error::{ContentError, EngineError, PersistenceError, RenderError, StoreError};
pub use frame_loop::FrameLoop;
pub use globals::{GameState, GlobalContext, GlobalSystems};
pub use scene::{GameObject, SceneKey, SceneManager};
