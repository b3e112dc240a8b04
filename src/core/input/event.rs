//=========================================================================
// Input Event Types
//
// Defines the engine's representation of host input.
//
// The host (a winit window, a browser page, a test harness) translates
// its native events into these types before handing them to the engine.
//
// Responsibilities:
// - Name physical keys by their layout-independent code ("KeyW", "Space")
// - Carry modifier state so command chords can be filtered out
// - Carry relative mouse motion for mouse-look
//
// Event Flow:
// ```text
// Host (winit / page / tests)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputRouter ──> KeyState (held keys, polled in update)
//         └────────> immediate mouse / key-press hooks
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::str::FromStr;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons).
    Other,
}

//=== KeyCode =============================================================

macro_rules! key_codes {
    ($($variant:ident),* $(,)?) => {
        /// Physical keyboard key identifier.
        ///
        /// Represents the physical key location, not the character produced.
        /// The string form matches the host's layout-independent code, so
        /// `"KeyW".parse::<KeyCode>()` yields [`KeyCode::KeyW`] on every
        /// keyboard layout. Unknown codes parse to [`KeyCode::Unidentified`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum KeyCode {
            $($variant,)*

            /// Fallback for keys the engine does not name.
            Unidentified,
        }

        impl KeyCode {
            /// Every named key, in declaration order.
            pub const ALL: &'static [KeyCode] = &[$(KeyCode::$variant,)*];

            /// Returns the host code string for this key.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(KeyCode::$variant => stringify!($variant),)*
                    KeyCode::Unidentified => "Unidentified",
                }
            }
        }
    };
}

key_codes! {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown, ArrowLeft, ArrowRight, ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space, Enter, Escape, Tab, Backspace, Delete,
    ShiftLeft, ShiftRight, ControlLeft, ControlRight,
    AltLeft, AltRight, MetaLeft, MetaRight,
}

//--- Trait Implementations -----------------------------------------------

impl FromStr for KeyCode {
    type Err = std::convert::Infallible;

    /// Parses a host key code. Never fails; unknown codes become `Unidentified`.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Ok(KeyCode::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == code)
            .unwrap_or(KeyCode::Unidentified))
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=== Modifiers ===========================================================

/// Modifier key state.
///
/// Any of Alt, Ctrl or Meta marks an event as a command chord, which the
/// game ignores entirely. Shift alone does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift key held (either side).
    pub shift: bool,

    /// Ctrl key held (either side).
    pub ctrl: bool,

    /// Alt key held (either side, Option on macOS).
    pub alt: bool,

    /// Meta key held (Command on macOS, Windows key elsewhere).
    pub meta: bool,
}

//--- Modifier Constants --------------------------------------------------

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Returns `true` if Alt, Ctrl or Meta is held.
    pub fn is_command_chord(&self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

//=== InputEvent ==========================================================

/// Input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: KeyCode, modifiers: Modifiers },

    /// Relative pointer motion since the previous event, in host units.
    MouseMoved { dx: f32, dy: f32 },

    /// Mouse button pressed.
    MouseButtonDown { button: MouseButton },

    /// Mouse button released.
    MouseButtonUp { button: MouseButton },

    /// Drawable surface changed size (pixels).
    Resized { width: u32, height: u32 },
}

//=========================================================================
// Unit Tests
//=========================================================================
