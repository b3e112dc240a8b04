//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use chapel_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, Projection, Services, Setup};

// Errors
pub use crate::core::error::{ContentError, EngineError, RenderError};

// Global systems and context
pub use crate::core::frame_loop::FrameLoop;
pub use crate::core::globals::{GameState, GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{InputEvent, KeyCode, KeyState, Modifiers, MouseButton};

// Scene system
pub use crate::core::scene::{
    CollisionListener, Context, GameObject, KeyListener, MouseListener, Movable, Scene,
    SceneKey, SceneListener, SceneManager, CAMERA_ID,
};

// Host ports
pub use crate::core::platform_bridge::{AudioTrigger, DialogOutput, KeyValueStore, Renderer};
pub use crate::{ChannelAudio, ChannelOverlay, OverlayEvent};

// Game
pub use crate::game::{build_world, Chapel};
