//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for game objects.
//
// Contains state that objects read and write through their `Context`:
// - state: kills, combat mode, fog colour, aim heading
// - commands: deferred scene mutations
// - sound / overlay / progress: host services
// - clock: timing of the current step
// - rng: the single random source for spawns and placement
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use super::GameState;
use crate::core::audio::SoundBoard;
use crate::core::dialog::DialogIo;
use crate::core::persistence::ProgressStore;
use crate::core::platform_bridge::DialogOutput;
use crate::core::scene::{CommandQueue, SceneKey};

//=== Clock ===============================================================

/// Timing of the step in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    /// Host timestamp of the current frame, in milliseconds.
    pub now_ms: f64,

    /// Seconds of simulated time since the loop started.
    pub total_time: f64,

    /// Duration of the last step in seconds.
    pub last_delta: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            total_time: 0.0,
            last_delta: 0.016,
        }
    }
}

//=== GlobalContext =======================================================

/// Shared context data reachable from every object hook.
///
/// Objects never see this directly; the scene manager wraps it in a
/// per-call [`Context`](crate::core::scene::Context).
pub struct GlobalContext<S: SceneKey> {
    pub state: GameState,

    /// Queue for scene mutations, applied at the step boundary.
    pub commands: CommandQueue<S>,

    pub sound: SoundBoard,

    pub progress: ProgressStore,

    pub clock: Clock,

    pub rng: StdRng,

    overlay: Box<dyn DialogOutput>,
}

impl<S: SceneKey> GlobalContext<S> {
    pub fn new<O>(sound: SoundBoard, overlay: O, progress: ProgressStore) -> Self
    where
        O: DialogOutput + 'static,
    {
        Self::from_parts(sound, Box::new(overlay), progress)
    }

    pub(crate) fn from_parts(
        sound: SoundBoard,
        overlay: Box<dyn DialogOutput>,
        progress: ProgressStore,
    ) -> Self {
        Self {
            state: GameState::new(),
            commands: CommandQueue::new(),
            sound,
            progress,
            clock: Clock::default(),
            rng: StdRng::from_entropy(),
            overlay,
        }
    }

    /// Replaces the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Overlay and progress bundled for a dialog call.
    pub fn dialog_io(&mut self) -> DialogIo<'_> {
        DialogIo::new(&mut *self.overlay, &mut self.progress)
    }

    /// Plays `sample` at most once per `min_interval_ms` of engine time.
    pub fn play_at(&mut self, sample: &str, min_interval_ms: f64) -> bool {
        self.sound.play_at(sample, min_interval_ms, self.clock.now_ms)
    }
}
