//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains the systems that route input, schedule steps and run scenes.
// Systems operate on GlobalContext data.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::frame_loop::FrameLoop;
use crate::core::input::{InputEvent, InputRouter, RoutedInput};
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: held-key map and chord filtering
/// - `frames`: fixed-interval step scheduler
/// - `scene_manager`: scenes, camera, collisions and commands
pub struct GlobalSystems<S: SceneKey> {
    pub input: InputRouter,

    pub frames: FrameLoop,

    pub scene_manager: SceneManager<S>,
}

impl<S: SceneKey> GlobalSystems<S> {
    /// Creates a systems container stepping at `fps`.
    pub(crate) fn new(fps: u32) -> Self {
        Self {
            input: InputRouter::new(),
            frames: FrameLoop::new(fps),
            scene_manager: SceneManager::new(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs a step if one is due at `now_ms`. Returns `true` if it did.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Scheduling**: the frame loop decides whether a step is due
    /// 2. **Clock**: the context clock is refreshed for the step
    /// 3. **Scene Step**: updates, collisions, then queued commands
    pub(crate) fn tick(&mut self, now_ms: f64, context: &mut GlobalContext<S>) -> bool {
        context.clock.now_ms = now_ms;
        let Some(delta) = self.frames.advance(now_ms) else {
            return false;
        };

        context.clock.last_delta = delta as f32;
        context.clock.total_time = self.frames.total_time();
        self.scene_manager
            .step(delta as f32, self.input.keys(), context);
        true
    }

    /// Routes one host event and dispatches what must run immediately.
    ///
    /// Resizes are handed back to the caller, which owns the projection.
    pub(crate) fn handle_input(
        &mut self,
        event: InputEvent,
        context: &mut GlobalContext<S>,
    ) -> Option<(u32, u32)> {
        let routed = self.input.route(event)?;
        trace!("Dispatching {:?}", routed);
        match routed {
            RoutedInput::Resized { width, height } => Some((width, height)),
            other => {
                self.scene_manager.dispatch_input(other, context);
                None
            }
        }
    }
}
