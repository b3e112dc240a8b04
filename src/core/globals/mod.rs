//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (logic components) from context (shared data).
//
// Architecture:
//   GlobalSystems: InputRouter + FrameLoop + SceneManager (owned by Engine)
//   GlobalContext: GameState + CommandQueue + services (lent to objects)
//
//=========================================================================

//=== Module Declarations =================================================

mod game_state;
mod global_context;
mod global_systems;

//=== Public API ==========================================================

pub use game_state::GameState;
pub use global_context::{Clock, GlobalContext};
pub use global_systems::GlobalSystems;
