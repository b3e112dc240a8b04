//=========================================================================
// Object Context
//=========================================================================
//
// What an object sees while one of its hooks runs.
//
// ```text
//   Context<'a, S>
//     ├─ scene    active scene key
//     ├─ camera   CameraView snapshot (position, rotation, collider)
//     ├─ others   SceneView: read-only lookup of the rest of the scene
//     └─ globals  &mut GlobalContext<S> (state, commands, services)
// ```
//
// The object being called is never part of `others`, so a hook can hold
// `&mut self` and read its neighbours at the same time.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use super::{CommandQueue, GameObject, SceneKey};
use crate::core::dialog::DialogIo;
use crate::core::globals::{Clock, GameState, GlobalContext};
use crate::core::math::{Aabb, Vector3};
use crate::core::persistence::ProgressStore;

//=== CameraView ==========================================================

/// Read-only snapshot of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vector3,
    pub rotation: Vector3,
    pub collider: Option<Aabb>,
}

impl CameraView {
    pub fn of<S: SceneKey>(camera: &dyn GameObject<S>) -> Self {
        Self {
            position: camera.position(),
            rotation: camera.rotation(),
            collider: camera.collider(),
        }
    }
}

impl Default for CameraView {
    fn default() -> Self {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        Self {
            position: zero,
            rotation: zero,
            collider: None,
        }
    }
}

//=== SceneView ===========================================================

type Slot<S> = Box<dyn GameObject<S>>;

/// The objects of the active scene other than the caller.
#[derive(Clone, Copy)]
pub struct SceneView<'a, S: SceneKey> {
    before: &'a [Slot<S>],
    after: &'a [Slot<S>],
}

impl<'a, S: SceneKey> SceneView<'a, S> {
    pub(crate) fn split(before: &'a [Slot<S>], after: &'a [Slot<S>]) -> Self {
        Self { before, after }
    }

    pub(crate) fn whole(objects: &'a [Slot<S>]) -> Self {
        Self {
            before: objects,
            after: &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&'a dyn GameObject<S>> {
        self.iter().find(|object| object.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a dyn GameObject<S>> + 'a {
        self.before
            .iter()
            .chain(self.after.iter())
            .map(|object| object.as_ref())
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//=== Context =============================================================

pub struct Context<'a, S: SceneKey> {
    /// The active scene.
    pub scene: S,

    pub camera: CameraView,

    pub others: SceneView<'a, S>,

    globals: &'a mut GlobalContext<S>,
}

impl<'a, S: SceneKey> Context<'a, S> {
    pub(crate) fn new(
        scene: S,
        camera: CameraView,
        others: SceneView<'a, S>,
        globals: &'a mut GlobalContext<S>,
    ) -> Self {
        Self {
            scene,
            camera,
            others,
            globals,
        }
    }

    //--- Shared State -----------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.globals.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.globals.state
    }

    pub fn commands(&mut self) -> &mut CommandQueue<S> {
        &mut self.globals.commands
    }

    pub fn clock(&self) -> Clock {
        self.globals.clock
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.globals.rng
    }

    //--- Services ---------------------------------------------------------

    pub fn play(&mut self, sample: &str) {
        self.globals.sound.play(sample);
    }

    /// Plays `sample` at most once per `min_interval_ms`.
    pub fn play_at(&mut self, sample: &str, min_interval_ms: f64) -> bool {
        self.globals.play_at(sample, min_interval_ms)
    }

    pub fn dialog_io(&mut self) -> DialogIo<'_> {
        self.globals.dialog_io()
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.globals.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.globals.progress
    }
}
