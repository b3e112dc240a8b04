//=========================================================================
// Input Processor
//=========================================================================
//
// Turns winit window and device events into engine `InputEvent`s.
//
// ```text
//   WindowEvent::KeyboardInput  ─┐
//   WindowEvent::MouseInput     ─┤
//   WindowEvent::Resized        ─┼─> InputProcessor ──> InputEvent ──> Engine
//   DeviceEvent::MouseMotion    ─┘         ^
//   WindowEvent::ModifiersChanged ─────────┘ (cached, stamped on keys)
// ```
//
// winit names physical keys after the W3C `code` values, which are the
// same strings `KeyCode` parses, so keys translate by name. Auto-repeat
// and keys the engine does not name never leave this module.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
        }
    }

    /// Caches the modifier state for the key events that follow.
    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //--- Translation ------------------------------------------------------

    pub(crate) fn process_key_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        if event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };

        let key = KeyCode::from(code);
        if key == KeyCode::Unidentified {
            return None;
        }
        Some(self.key(key, event.state))
    }

    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);
        if state.is_pressed() {
            InputEvent::MouseButtonDown { button }
        } else {
            InputEvent::MouseButtonUp { button }
        }
    }

    /// Raw device deltas; unaffected by cursor grab or window edges.
    pub(crate) fn process_motion(&self, dx: f64, dy: f64) -> InputEvent {
        InputEvent::MouseMoved {
            dx: dx as f32,
            dy: dy as f32,
        }
    }

    pub(crate) fn process_resize(&self, size: PhysicalSize<u32>) -> InputEvent {
        InputEvent::Resized {
            width: size.width,
            height: size.height,
        }
    }

    fn key(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        if state.is_pressed() {
            InputEvent::KeyDown { key, modifiers }
        } else {
            InputEvent::KeyUp { key, modifiers }
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// Translates by W3C code name. winit's `Super*` keys are the `Meta*`
/// keys of the host code set.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::SuperLeft => KeyCode::MetaLeft,
            WinitKeyCode::SuperRight => KeyCode::MetaRight,
            other => format!("{other:?}").parse().unwrap_or(KeyCode::Unidentified),
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
