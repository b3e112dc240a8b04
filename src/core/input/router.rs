//=========================================================================
// Input Router
//=========================================================================
//
// First stop for every host input event.
//
// Architecture:
// ```text
//   InputEvent ──route()──┬── KeyDown ──> KeyState::press ──> KeyPressed
//                         ├── KeyUp   ──> KeyState::release
//                         ├── Mouse*  ──> MouseMoved / MouseDown / MouseUp
//                         └── Resized ──> Resized
// ```
//
// Key events carrying Alt, Ctrl or Meta never reach the key map or the
// key-press hooks. The returned `RoutedInput` is what the engine must
// dispatch immediately, outside the fixed-step schedule.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};
use super::state_tracker::KeyState;

//=== RoutedInput =========================================================

/// Input that must be delivered to objects right away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutedInput {
    KeyPressed(KeyCode),
    MouseMoved { dx: f32, dy: f32 },
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    Resized { width: u32, height: u32 },
}

//=== InputRouter =========================================================

/// Maintains the held-key map and filters host events.
#[derive(Debug, Default)]
pub struct InputRouter {
    keys: KeyState,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `event` to the key map and returns what must be dispatched.
    pub fn route(&mut self, event: InputEvent) -> Option<RoutedInput> {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                if modifiers.is_command_chord() {
                    trace!("Ignoring {} with command modifiers", key);
                    return None;
                }
                self.keys.press(key);
                Some(RoutedInput::KeyPressed(key))
            }

            InputEvent::KeyUp { key, modifiers } => {
                if modifiers.is_command_chord() {
                    trace!("Ignoring release of {} with command modifiers", key);
                    return None;
                }
                self.keys.release(key);
                None
            }

            InputEvent::MouseMoved { dx, dy } => Some(RoutedInput::MouseMoved { dx, dy }),
            InputEvent::MouseButtonDown { button } => Some(RoutedInput::MouseDown(button)),
            InputEvent::MouseButtonUp { button } => Some(RoutedInput::MouseUp(button)),
            InputEvent::Resized { width, height } => Some(RoutedInput::Resized { width, height }),
        }
    }

    /// Held keys, as seen by `update`.
    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    /// Drops all held keys, e.g. when the host window loses focus.
    pub fn release_all(&mut self) {
        self.keys.release_all();
    }
}

//=== Unit Tests ==========================================================
