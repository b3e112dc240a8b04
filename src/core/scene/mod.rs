//=========================================================================
// Scene System
//=========================================================================
//
// Named object lists, one active at a time, plus the camera that lives
// above them.
//
// Architecture:
// ```text
//   SceneManager<S>
//     ├─ scenes: HashMap<S, Scene<S>>   objects in registration order
//     ├─ camera: Box<dyn GameObject<S>> shared by every scene
//     ├─ collisions: CollisionSystem<S>
//     └─ active: Option<S>
// ```
//
// Flow (one fixed step):
//   camera.update → visible objects update → collision pass
//     → CommandQueue applied (scene switches, spawns, removals)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

use log::warn;

//=== Module Declarations =================================================

mod collision;
mod command_queue;
mod context;
mod object;
mod scene_manager;

//=== Public API ==========================================================

pub use collision::{CollisionSystem, Contact};
pub use command_queue::{CommandQueue, SceneCommand};
pub use context::{CameraView, Context, SceneView};
pub use object::{
    CollisionListener, GameObject, KeyListener, MouseListener, Movable, SceneListener,
};
pub use scene_manager::SceneManager;

/// Id the camera answers to in collision hooks and commands.
pub const CAMERA_ID: &str = "camera";

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by a game-specific enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== Scene ===============================================================

/// An ordered list of objects. Order is registration order and decides
/// update, draw and hook order.
pub struct Scene<S: SceneKey> {
    key: S,
    objects: Vec<Box<dyn GameObject<S>>>,
}

impl<S: SceneKey> Scene<S> {
    pub fn new(key: S) -> Self {
        Self {
            key,
            objects: Vec::new(),
        }
    }

    pub fn key(&self) -> S {
        self.key
    }

    /// Appends `object`. An object with the same id is replaced in place.
    pub fn add(&mut self, object: Box<dyn GameObject<S>>) {
        if let Some(slot) = self.objects.iter_mut().find(|o| o.id() == object.id()) {
            warn!(
                "Object `{}` already exists in {:?} and has been replaced",
                object.id(),
                self.key
            );
            *slot = object;
        } else {
            self.objects.push(object);
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Box<dyn GameObject<S>>> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&dyn GameObject<S>> {
        self.objects
            .iter()
            .find(|o| o.id() == id)
            .map(|o| o.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn GameObject<S> + 'static)> {
        self.objects
            .iter_mut()
            .find(|o| o.id() == id)
            .map(|o| o.as_mut())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.id() == id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &dyn GameObject<S>> {
        self.objects.iter().map(|o| o.as_ref())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
