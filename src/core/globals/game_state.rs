//=========================================================================
// Game State
//=========================================================================
//
// Mutable values shared between objects across scenes: score, combat
// mode, enemy count, fog colour and aim heading. Every cross-object
// signal the game needs has a typed field here.
//
//=========================================================================

//=== GameState ===========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Enemies shot down since combat began.
    pub kills: u32,

    /// `true` while enemies are hunting the player.
    pub enemy_mode: bool,

    /// Enemies spawned this round; the next one is `enemy{enemies + 1}`.
    pub enemies: u32,

    /// Heading of the last shot, in radians.
    pub aim_heading: f32,

    /// Fog colour (red, blue) fed to every draw.
    pub sky: [f32; 2],
}

impl GameState {
    pub const DEFAULT_SKY: [f32; 2] = [0.5, 0.5];

    pub fn new() -> Self {
        Self {
            kills: 0,
            enemy_mode: false,
            enemies: 0,
            aim_heading: 0.0,
            sky: Self::DEFAULT_SKY,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_peaceful() {
        let state = GameState::new();
        assert_eq!(state.kills, 0);
        assert!(!state.enemy_mode);
        assert_eq!(state.sky, GameState::DEFAULT_SKY);
    }

    #[test]
    fn new_round_has_no_enemies_or_aim() {
        let state = GameState::default();
        assert_eq!(state.enemies, 0);
        assert_eq!(state.aim_heading, 0.0);
        assert_eq!(state, GameState::new());
    }
}
