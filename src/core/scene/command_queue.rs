//=========================================================================
// Command Queue
//=========================================================================
//
// Deferred scene mutations.
//
// Objects queue commands here during `update` and from their hooks. The
// scene manager applies the queue in FIFO order at the step boundary,
// after every object has been visited, so no object list is ever
// modified while it is being iterated.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::fmt;

//=== Internal Dependencies ===============================================

use super::{GameObject, SceneKey};

//=== SceneCommand ========================================================

/// A deferred scene mutation.
///
/// `scene: None` targets the active scene. The id `"camera"` (see
/// [`CAMERA_ID`](super::CAMERA_ID)) targets the camera in any scene.
pub enum SceneCommand<S: SceneKey> {
    /// Switches the active scene (leave hooks, switch, enter hooks).
    SetScene(S),

    /// Appends an object to a scene.
    Spawn {
        scene: S,
        object: Box<dyn GameObject<S>>,
    },

    /// Destroys an object and forgets its collision state.
    Remove { scene: S, id: String },

    SetVisible {
        scene: Option<S>,
        id: String,
        visible: bool,
    },

    SetPosition {
        scene: Option<S>,
        id: String,
        position: [Option<f32>; 3],
    },

    SetRotation {
        scene: Option<S>,
        id: String,
        rotation: [Option<f32>; 3],
    },

    /// Forgets the contact state between two objects of the active scene,
    /// so a still-overlapping pair fires enter again.
    ResetCollision { a: String, b: String },

    /// Enables or disables object-versus-object collision checks.
    SetInterObjectCollisions(bool),
}

impl<S: SceneKey> fmt::Debug for SceneCommand<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetScene(scene) => f.debug_tuple("SetScene").field(scene).finish(),
            Self::Spawn { scene, object } => f
                .debug_struct("Spawn")
                .field("scene", scene)
                .field("object", &object.id())
                .finish(),
            Self::Remove { scene, id } => f
                .debug_struct("Remove")
                .field("scene", scene)
                .field("id", id)
                .finish(),
            Self::SetVisible { scene, id, visible } => f
                .debug_struct("SetVisible")
                .field("scene", scene)
                .field("id", id)
                .field("visible", visible)
                .finish(),
            Self::SetPosition { scene, id, position } => f
                .debug_struct("SetPosition")
                .field("scene", scene)
                .field("id", id)
                .field("position", position)
                .finish(),
            Self::SetRotation { scene, id, rotation } => f
                .debug_struct("SetRotation")
                .field("scene", scene)
                .field("id", id)
                .field("rotation", rotation)
                .finish(),
            Self::ResetCollision { a, b } => f
                .debug_struct("ResetCollision")
                .field("a", a)
                .field("b", b)
                .finish(),
            Self::SetInterObjectCollisions(on) => {
                f.debug_tuple("SetInterObjectCollisions").field(on).finish()
            }
        }
    }
}

//=== CommandQueue ========================================================

/// FIFO of [`SceneCommand`]s with convenience constructors.
pub struct CommandQueue<S: SceneKey> {
    queue: VecDeque<SceneCommand<S>>,
}

impl<S: SceneKey> CommandQueue<S> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, command: SceneCommand<S>) {
        self.queue.push_back(command);
    }

    //--- Shorthands -------------------------------------------------------

    pub fn set_scene(&mut self, scene: S) {
        self.push(SceneCommand::SetScene(scene));
    }

    pub fn spawn<O>(&mut self, scene: S, object: O)
    where
        O: GameObject<S> + 'static,
    {
        self.push(SceneCommand::Spawn {
            scene,
            object: Box::new(object),
        });
    }

    pub fn remove(&mut self, scene: S, id: impl Into<String>) {
        self.push(SceneCommand::Remove {
            scene,
            id: id.into(),
        });
    }

    /// Shows or hides an object of the active scene (or the camera).
    pub fn set_visible(&mut self, id: impl Into<String>, visible: bool) {
        self.push(SceneCommand::SetVisible {
            scene: None,
            id: id.into(),
            visible,
        });
    }

    /// Shows or hides an object of a specific scene.
    pub fn set_visible_in(&mut self, scene: S, id: impl Into<String>, visible: bool) {
        self.push(SceneCommand::SetVisible {
            scene: Some(scene),
            id: id.into(),
            visible,
        });
    }

    pub fn set_position(
        &mut self,
        id: impl Into<String>,
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
    ) {
        self.push(SceneCommand::SetPosition {
            scene: None,
            id: id.into(),
            position: [x, y, z],
        });
    }

    pub fn set_rotation(
        &mut self,
        id: impl Into<String>,
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
    ) {
        self.push(SceneCommand::SetRotation {
            scene: None,
            id: id.into(),
            rotation: [x, y, z],
        });
    }

    pub fn reset_collision(&mut self, a: impl Into<String>, b: impl Into<String>) {
        self.push(SceneCommand::ResetCollision {
            a: a.into(),
            b: b.into(),
        });
    }

    pub fn set_inter_object_collisions(&mut self, enabled: bool) {
        self.push(SceneCommand::SetInterObjectCollisions(enabled));
    }

    //--- Draining ---------------------------------------------------------

    pub fn pop(&mut self) -> Option<SceneCommand<S>> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<S: SceneKey> Default for CommandQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Unit Tests ==========================================================
