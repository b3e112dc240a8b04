//=========================================================================
// Key State
//=========================================================================
//
// Persistent held-key map polled by objects during `update`.
//
// Architecture:
//   KeyDown/KeyUp → press()/release() → HashSet (keys held) → query
//
// There are no per-frame deltas: a key stays down from its KeyDown until
// its KeyUp, no matter how many steps run in between.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== KeyState ============================================================

/// Set of keys currently held.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    keys_down: HashSet<KeyCode>,
}

impl KeyState {
    /// Creates an empty key map.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Mutation ---------------------------------------------------------

    /// Marks `key` as held. Returns `true` if it was not held before.
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.keys_down.insert(key)
    }

    /// Marks `key` as released. Returns `true` if it was held before.
    pub fn release(&mut self, key: KeyCode) -> bool {
        self.keys_down.remove(&key)
    }

    /// Releases every key (focus loss).
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while `key` is held.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if any of `keys` is held.
    ///
    /// Used for bindings with alternatives, such as W or ArrowUp.
    pub fn any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.keys_down.contains(key))
    }

    /// Number of keys currently held.
    pub fn held_count(&self) -> usize {
        self.keys_down.len()
    }
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_stays_down_until_released() {
        let mut keys = KeyState::new();
        assert!(keys.press(KeyCode::KeyW));
        assert!(keys.is_down(KeyCode::KeyW));
        assert!(keys.is_down(KeyCode::KeyW));

        assert!(keys.release(KeyCode::KeyW));
        assert!(!keys.is_down(KeyCode::KeyW));
    }

    #[test]
    fn repeated_press_reports_no_transition() {
        let mut keys = KeyState::new();
        assert!(keys.press(KeyCode::Space));
        assert!(!keys.press(KeyCode::Space));
        assert_eq!(keys.held_count(), 1);
    }

    #[test]
    fn release_of_unheld_key_is_harmless() {
        let mut keys = KeyState::new();
        assert!(!keys.release(KeyCode::KeyA));
    }

    #[test]
    fn any_down_matches_alternatives() {
        let mut keys = KeyState::new();
        keys.press(KeyCode::ArrowUp);
        assert!(keys.any_down(&[KeyCode::KeyW, KeyCode::ArrowUp]));
        assert!(!keys.any_down(&[KeyCode::KeyS, KeyCode::ArrowDown]));
    }

    #[test]
    fn release_all_clears_everything() {
        let mut keys = KeyState::new();
        keys.press(KeyCode::KeyA);
        keys.press(KeyCode::KeyD);
        keys.release_all();
        assert_eq!(keys.held_count(), 0);
    }
}
