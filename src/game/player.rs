//=========================================================================
// Player
//=========================================================================
//
// The camera. It owns the view transform: `draw` rotates the world by
// pitch and yaw and then translates it by the stored position, so the
// player's world position is the negated translation.
//
// Controls:
// ```text
//   W / ArrowUp      forward        A / ArrowLeft    strafe left
//   S / ArrowDown    backward       D / ArrowRight   strafe right
//   mouse            look (pitch clamped to ±90°)
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{sound, Chapel};
use crate::core::input::{KeyCode, KeyState};
use crate::core::math::{vec3, Aabb, Transform, Vector3};
use crate::core::render::Frame;
use crate::core::scene::{
    Context, GameObject, MouseListener, Movable, SceneListener, CAMERA_ID,
};

/// Degrees of turn per unit of mouse motion per second of frame time.
const LOOK_SPEED: f32 = 4.0;

/// Milliseconds between footstep sounds.
const STEP_INTERVAL_MS: f64 = 350.0;

//=== Player ==============================================================

pub struct Player {
    transform: Transform,
    spawn: Vector3,
    half: Vector3,
    visible: bool,
}

impl Player {
    /// Creates the camera at translation `spawn`.
    pub fn new(spawn: Vector3) -> Self {
        Self {
            transform: Transform::at(spawn),
            spawn,
            half: vec3(0.25, 0.25, 0.25),
            visible: true,
        }
    }

    fn respawn(&mut self) {
        self.transform = Transform::at(self.spawn);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(vec3(0.0, -0.45, -1.0))
    }
}

impl GameObject<Chapel> for Player {
    fn id(&self) -> &str {
        CAMERA_ID
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn update(&mut self, dt: f32, keys: &KeyState, ctx: &mut Context<'_, Chapel>) {
        let mut speed = 0.0_f32;
        let mut side = 0.0_f32;
        let mut strafe = 0.0_f32;

        if keys.any_down(&[KeyCode::KeyW, KeyCode::ArrowUp]) {
            speed = -dt;
        }
        if keys.any_down(&[KeyCode::KeyS, KeyCode::ArrowDown]) {
            speed = dt;
        }
        if keys.any_down(&[KeyCode::KeyD, KeyCode::ArrowRight]) {
            side = 90.0;
            strafe = -dt;
        }
        if keys.any_down(&[KeyCode::KeyA, KeyCode::ArrowLeft]) {
            side = -90.0;
            strafe = -dt;
        }

        let yaw = self.transform.rotation.y;
        let strafe_angle = (yaw + side).to_radians();
        let step_angle = yaw.to_radians();

        let position = &mut self.transform.position;
        position.x += strafe_angle.sin() * strafe;
        position.z -= strafe_angle.cos() * strafe;
        position.x += step_angle.sin() * speed;
        position.z -= step_angle.cos() * speed;

        if speed != 0.0 || strafe != 0.0 {
            ctx.play_at(sound::STEPS, STEP_INTERVAL_MS);
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let (p, r) = (self.transform.position, self.transform.rotation);
        let stack = frame.transforms();
        stack.rotate(r.x, 1.0, 0.0, 0.0);
        stack.rotate(r.y, 0.0, 1.0, 0.0);
        stack.translate(p.x, p.y, p.z);
    }

    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        Some(self)
    }

    /// Centered on the negated translation, which is where the player is.
    fn collider(&self) -> Option<Aabb> {
        Some(Aabb::from_center(-self.transform.position, self.half))
    }

    fn as_scene_listener(&mut self) -> Option<&mut dyn SceneListener<Chapel>> {
        Some(self)
    }

    fn as_mouse_listener(&mut self) -> Option<&mut dyn MouseListener<Chapel>> {
        Some(self)
    }
}

impl Movable for Player {
    fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_position(x, y, z);
    }

    fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_rotation(x, y, z);
    }
}

impl SceneListener<Chapel> for Player {
    /// Every scene starts at the church door, facing inwards.
    fn on_scene_enter(&mut self, _scene: Chapel, _ctx: &mut Context<'_, Chapel>) {
        self.respawn();
    }
}

impl MouseListener<Chapel> for Player {
    fn on_mouse_move(&mut self, dx: f32, dy: f32, last_delta: f32, _ctx: &mut Context<'_, Chapel>) {
        let rotation = &mut self.transform.rotation;
        rotation.x = (rotation.x + dy * last_delta * LOOK_SPEED).clamp(-90.0, 90.0);
        rotation.y += dx * last_delta * LOOK_SPEED;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::CameraView;
    use crate::game::testing::{globals, with_ctx};

    fn step(player: &mut Player, keys: &[KeyCode], dt: f32) {
        let mut state = KeyState::new();
        for key in keys {
            state.press(*key);
        }
        let (mut globals, _) = globals();
        with_ctx(&mut globals, Chapel::World, CameraView::default(), |ctx| {
            player.update(dt, &state, ctx);
        });
    }

    #[test]
    fn forward_moves_towards_negative_world_z() {
        let mut player = Player::new(vec3(0.0, -0.45, -1.0));
        step(&mut player, &[KeyCode::KeyW], 0.5);

        // Translation grows, so the world position (its negation) shrinks.
        assert!((player.position().z - (-0.5)).abs() < 1e-5);
        assert!(player.position().x.abs() < 1e-5);
    }

    #[test]
    fn arrows_mirror_wasd() {
        let mut wasd = Player::default();
        let mut arrows = Player::default();
        step(&mut wasd, &[KeyCode::KeyS, KeyCode::KeyA], 0.1);
        step(&mut arrows, &[KeyCode::ArrowDown, KeyCode::ArrowLeft], 0.1);
        assert_eq!(wasd.position(), arrows.position());
    }

    #[test]
    fn strafe_moves_sideways() {
        let mut player = Player::new(vec3(0.0, 0.0, 0.0));
        step(&mut player, &[KeyCode::KeyD], 1.0);

        // Negative translation: the player moved to world +x.
        assert!(player.position().x < -0.99);
        assert!(player.position().z.abs() < 0.01);
    }

    #[test]
    fn pitch_is_clamped() {
        let (mut globals, _) = globals();
        let mut player = Player::default();
        with_ctx(&mut globals, Chapel::World, CameraView::default(), |ctx| {
            player.on_mouse_move(10.0, 5000.0, 0.016, ctx);
        });
        assert_eq!(player.rotation().x, 90.0);
        assert!((player.rotation().y - 0.64).abs() < 1e-5);
    }

    #[test]
    fn collider_sits_at_world_position() {
        let player = Player::new(vec3(0.0, -0.45, -2.1));
        let collider = player.collider().unwrap();
        assert!((collider.center().z - 2.1).abs() < 1e-5);
        assert!((collider.max.z - collider.min.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn scene_enter_respawns() {
        let (mut globals, _) = globals();
        let mut player = Player::default();
        player.set_position(Some(4.0), None, Some(4.0));
        with_ctx(&mut globals, Chapel::Lobby, CameraView::default(), |ctx| {
            player.on_scene_enter(Chapel::Lobby, ctx);
        });
        assert_eq!(player.position(), vec3(0.0, -0.45, -1.0));
    }
}
