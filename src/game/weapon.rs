//=========================================================================
// Weapon
//=========================================================================
//
// The shotgun carried in front of the player and the single bullet it
// fires. Both start hidden; the first pilgrim to turn reveals the gun.
//
// Firing (left mouse button released while the gun is visible):
// ```text
//   aim_heading ← camera yaw
//   bullet.position ← player position, bullet shown
//   bullet flies 10 units/s along aim_heading until it hits or is reset
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::enemy::BULLET_ID;
use super::{camera_world, sound, yaw_towards, Chapel};
use crate::core::input::{KeyState, MouseButton};
use crate::core::math::{vec3, Aabb, Transform, Vector3};
use crate::core::platform_bridge::MeshHandle;
use crate::core::render::{DrawParams, Frame};
use crate::core::scene::{Context, GameObject, MouseListener, Movable};

/// Bullet flight speed in units per second.
const BULLET_SPEED: f32 = 10.0;

/// Height the bullet flies at.
const BULLET_HEIGHT: f32 = 0.3;

//=== Bullet ==============================================================

pub struct Bullet {
    transform: Transform,
    half: Vector3,
    mesh: MeshHandle,
    visible: bool,
}

impl Bullet {
    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            transform: Transform::at(vec3(100_000.0, BULLET_HEIGHT, 100_000.0)),
            half: vec3(0.25, 0.25, 0.25),
            mesh,
            visible: false,
        }
    }
}

impl GameObject<Chapel> for Bullet {
    fn id(&self) -> &str {
        BULLET_ID
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

    fn update(&mut self, dt: f32, _keys: &KeyState, ctx: &mut Context<'_, Chapel>) {
        let heading = ctx.state().aim_heading;
        let position = &mut self.transform.position;
        position.x += heading.sin() * dt * BULLET_SPEED;
        position.z -= heading.cos() * dt * BULLET_SPEED;

        self.transform.rotation.y = yaw_towards(self.transform.position, &ctx.camera);
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.draw_mesh(self.mesh, &self.transform, DrawParams::default());
    }

    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        Some(self)
    }

    fn collider(&self) -> Option<Aabb> {
        Some(Aabb::from_center(self.transform.position, self.half))
    }
}

impl Movable for Bullet {
    fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_position(x, y, z);
    }

    fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_rotation(x, y, z);
    }
}

//=== Shotgun =============================================================

pub struct Shotgun {
    transform: Transform,
    mesh: MeshHandle,
    visible: bool,
}

impl Shotgun {
    pub const ID: &'static str = "shotgun";

    const SCALE: f32 = 0.3;
    const HEIGHT: f32 = 0.35;
    const REACH: f32 = 0.5;

    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            transform: Transform::at(vec3(0.0, Self::HEIGHT, 0.0)),
            mesh,
            visible: false,
        }
    }

    fn fire(&self, ctx: &mut Context<'_, Chapel>) {
        let heading = ctx.camera.rotation.y.to_radians();
        let origin = camera_world(&ctx.camera);

        ctx.play(sound::SHOTGUN);
        ctx.state_mut().aim_heading = heading;

        let commands = ctx.commands();
        commands.set_position(BULLET_ID, Some(origin.x), Some(BULLET_HEIGHT), Some(origin.z));
        commands.set_visible(BULLET_ID, true);
    }
}

impl GameObject<Chapel> for Shotgun {
    fn id(&self) -> &str {
        Self::ID
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

    /// Stays half a unit in front of the player, turned with them.
    fn update(&mut self, _dt: f32, _keys: &KeyState, ctx: &mut Context<'_, Chapel>) {
        let yaw = ctx.camera.rotation.y;
        let origin = camera_world(&ctx.camera);
        let heading = yaw.to_radians();

        self.transform.position.x = origin.x + heading.sin() * Self::REACH;
        self.transform.position.z = origin.z - heading.cos() * Self::REACH;
        self.transform.rotation.y = -yaw;
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.draw_mesh(self.mesh, &self.transform, DrawParams::scaled(Self::SCALE));
    }

    fn as_mouse_listener(&mut self) -> Option<&mut dyn MouseListener<Chapel>> {
        Some(self)
    }
}

impl MouseListener<Chapel> for Shotgun {
    fn on_mouse_up(&mut self, button: MouseButton, _last_delta: f32, ctx: &mut Context<'_, Chapel>) {
        if button == MouseButton::Left {
            self.fire(ctx);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
