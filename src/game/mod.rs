//=========================================================================
// Chapel Game
//=========================================================================
//
// The game built on the core: a church lobby, a moonlit forest full of
// pilgrims who turn hostile, a game-over chapel and an ending.
//
// Scene flow:
// ```text
//   Lobby ──priest conversation──> World ──enemy touches camera──> GameOver
//                                    │                                │
//                                    └──WIN_KILLS kills──> Win        │
//                                    ^────────retry conversation──────┘
// ```
//
// Objects never reach into each other; cross-object effects (spawning,
// hiding the weapon, moving the bullet, switching scenes) go through the
// command queue of their `Context`.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod dialogs;
pub mod enemy;
pub mod npc;
pub mod player;
pub mod priest;
pub mod scenery;
pub mod weapon;
pub mod win;
pub mod world;

//=== Public API ==========================================================

pub use dialogs::Outcome;
pub use enemy::Enemy;
pub use npc::Npc;
pub use player::Player;
pub use priest::{GameOverNpc, Priest};
pub use scenery::{Scenery, Skybox};
pub use weapon::{Bullet, Shotgun};
pub use win::WinNpc;
pub use world::{build_world, Meshes};

//=== Internal Dependencies ===============================================

use crate::core::math::Vector3;
use crate::core::scene::{CameraView, SceneKey};

//=== Chapel ==============================================================

/// Scenes of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chapel {
    /// Inside the church, talking to the priest.
    Lobby,

    /// The forest.
    World,

    /// Back in the church after being caught.
    GameOver,

    /// The ending.
    Win,
}

impl SceneKey for Chapel {}

//=== Tuning ==============================================================

/// Kills that end the hunt with a win.
pub const WIN_KILLS: u32 = 30;

/// Upper bound on enemies spawned per round.
pub const MAX_ENEMIES: u32 = 50;

/// Sample names handed to the audio adapter.
pub mod sound {
    pub const STEPS: &str = "steps";
    pub const SHOTGUN: &str = "shotgun";
    pub const DRUM: &str = "drum";
    pub const HIT: &str = "hit";
    pub const ATTACK_MODE: &str = "enterAttackMode";
    pub const CHALLENGE_ACCEPTED: &str = "challengeAccepted";
}

//=== Helpers =============================================================

/// Yaw in degrees that turns a billboard at `position` towards the camera.
///
/// The camera stores its translation negated, so its world position is
/// `-camera.position`.
pub fn yaw_towards(position: Vector3, camera: &CameraView) -> f32 {
    let dx = -camera.position.x - position.x;
    let dz = -camera.position.z - position.z;
    dx.atan2(dz).to_degrees()
}

/// World-space position of the camera.
pub fn camera_world(camera: &CameraView) -> Vector3 {
    -camera.position
}

//=========================================================================
// Unit Tests
//=========================================================================
