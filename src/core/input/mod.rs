//=========================================================================
// Input System
//
// Host input types, the held-key map and the router that feeds both the
// fixed-step update (polled keys) and the immediate hooks (mouse and
// key presses).
//
// Responsibilities:
// - Represent keyboard and mouse input in a host-independent way
// - Keep a persistent map of held keys between steps
// - Filter command chords (Alt / Ctrl / Meta) out of the game
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
pub mod router;
pub mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use router::{InputRouter, RoutedInput};
pub use state_tracker::KeyState;
