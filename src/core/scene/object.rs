//=========================================================================
// Game Object
//=========================================================================
//
// The contract every scene member implements.
//
// Architecture:
// ```text
//   GameObject (required)
//     id, transform, visibility, update, draw
//
//   Capabilities (optional, queried per dispatch site)
//     as_movable            -> Movable            set_position / set_rotation
//     collider              -> Aabb               joins collision checks
//     as_collision_listener -> CollisionListener  enter / leave
//     as_scene_listener     -> SceneListener      enter / leave
//     as_mouse_listener     -> MouseListener      move / down / up
//     as_key_listener       -> KeyListener        key press
// ```
//
// A capability accessor returning `None` means the object does not take
// part in that dispatch.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Context, SceneKey};
use crate::core::input::{KeyCode, KeyState, MouseButton};
use crate::core::math::{Aabb, Transform, Vector3};
use crate::core::render::Frame;

//=== GameObject ==========================================================

/// A renderable scene member.
///
/// `draw` may push and pop the transform stack but must leave it at the
/// depth it found it.
pub trait GameObject<S: SceneKey> {
    /// Identifier, unique within the owning scene.
    fn id(&self) -> &str;

    fn transform(&self) -> &Transform;

    fn position(&self) -> Vector3 {
        self.transform().position
    }

    /// Rotation in degrees per axis.
    fn rotation(&self) -> Vector3 {
        self.transform().rotation
    }

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    /// Advances the object by `dt` seconds.
    fn update(&mut self, dt: f32, keys: &KeyState, ctx: &mut Context<'_, S>);

    fn draw(&self, frame: &mut Frame<'_>);

    //--- Capabilities -----------------------------------------------------

    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        None
    }

    /// World-space bounds. `None` keeps the object out of collision checks.
    fn collider(&self) -> Option<Aabb> {
        None
    }

    fn as_collision_listener(&mut self) -> Option<&mut dyn CollisionListener<S>> {
        None
    }

    fn as_scene_listener(&mut self) -> Option<&mut dyn SceneListener<S>> {
        None
    }

    fn as_mouse_listener(&mut self) -> Option<&mut dyn MouseListener<S>> {
        None
    }

    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener<S>> {
        None
    }
}

//=== Capability Traits ===================================================

/// Externally repositionable. `None` axes are left unchanged.
pub trait Movable {
    fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>);

    fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>);
}

/// Edge-triggered contact notifications.
pub trait CollisionListener<S: SceneKey> {
    fn on_collide_enter(&mut self, _other: &str, _scene: S, _ctx: &mut Context<'_, S>) {}

    fn on_collide_leave(&mut self, _other: &str, _scene: S, _ctx: &mut Context<'_, S>) {}
}

/// Active-scene changes.
pub trait SceneListener<S: SceneKey> {
    fn on_scene_enter(&mut self, _scene: S, _ctx: &mut Context<'_, S>) {}

    fn on_scene_leave(&mut self, _scene: S, _ctx: &mut Context<'_, S>) {}
}

/// Immediate mouse input. `last_delta` is the duration of the last step
/// in seconds, for frame-rate independent mouse-look.
pub trait MouseListener<S: SceneKey> {
    fn on_mouse_move(&mut self, _dx: f32, _dy: f32, _last_delta: f32, _ctx: &mut Context<'_, S>) {}

    fn on_mouse_down(&mut self, _button: MouseButton, _last_delta: f32, _ctx: &mut Context<'_, S>) {}

    fn on_mouse_up(&mut self, _button: MouseButton, _last_delta: f32, _ctx: &mut Context<'_, S>) {}
}

/// Immediate key presses (command chords already filtered out).
pub trait KeyListener<S: SceneKey> {
    fn on_key_press(&mut self, key: KeyCode, ctx: &mut Context<'_, S>);
}
