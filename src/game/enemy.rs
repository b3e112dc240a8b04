//=========================================================================
// Enemy
//=========================================================================
//
// A pilgrim turned hunter. It walks towards the player, sidestepping only
// once it is within one unit along z.
//
// Contacts:
// ```text
//   bullet   kill: count it, move the bullet away, respawn elsewhere,
//            30% chance of a new enemy; WIN_KILLS kills end the hunt
//   camera   game over
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::{sound, yaw_towards, Chapel, MAX_ENEMIES, WIN_KILLS};
use crate::core::input::KeyState;
use crate::core::math::{vec3, Aabb, Transform, Vector3};
use crate::core::platform_bridge::MeshHandle;
use crate::core::render::{DrawParams, Frame};
use crate::core::scene::{CollisionListener, Context, GameObject, Movable, CAMERA_ID};

/// Id of the projectile an enemy can be shot by.
pub const BULLET_ID: &str = "bullet";

/// Minimum milliseconds between drum beats while hunting.
const DRUM_INTERVAL_MS: f64 = 115.0;

const MIN_SPEED: f32 = 0.3;
const MAX_SPEED: f32 = 0.5;

//=== Enemy ===============================================================

pub struct Enemy {
    id: String,
    transform: Transform,
    half: Vector3,
    speed: f32,
    mesh: MeshHandle,
    visible: bool,
}

impl Enemy {
    pub fn new(id: impl Into<String>, mesh: MeshHandle, position: Vector3) -> Self {
        Self {
            id: id.into(),
            transform: Transform::at(position),
            half: vec3(0.015, 0.30, 0.05),
            speed: MAX_SPEED,
            mesh,
            visible: true,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Queues a new enemy near the player's depth in the forest.
    ///
    /// Returns `false` once [`MAX_ENEMIES`] have been spawned this round.
    pub fn spawn(ctx: &mut Context<'_, Chapel>, mesh: MeshHandle) -> bool {
        let number = ctx.state().enemies + 1;
        if number > MAX_ENEMIES {
            debug!("Enemy cap reached, not spawning");
            return false;
        }
        ctx.state_mut().enemies = number;

        let camera_z = ctx.camera.position.z;
        let rng = ctx.rng();
        let position = vec3(
            rng.gen_range(0.0..0.5),
            0.3,
            -camera_z + rng.gen_range(-5.0..5.0),
        );

        let id = format!("enemy{number}");
        debug!("Spawning {} at {:?}", id, position);
        ctx.commands().spawn(Chapel::World, Enemy::new(id, mesh, position));
        true
    }

    //--- Contacts ---------------------------------------------------------

    fn shot(&mut self, ctx: &mut Context<'_, Chapel>) {
        let commands = ctx.commands();
        commands.set_position(BULLET_ID, Some(10_000.0), None, Some(10_000.0));
        commands.set_visible(BULLET_ID, false);
        commands.reset_collision(self.id.as_str(), BULLET_ID);

        let kills = {
            let state = ctx.state_mut();
            state.kills += 1;
            state.kills
        };
        debug!("{} down, {} kills", self.id, kills);

        if kills >= WIN_KILLS {
            self.end_hunt(ctx, Chapel::Win);
            return;
        }

        let rng = ctx.rng();
        self.transform.position.x = rng.gen_range(-1.0..1.0);
        self.transform.position.z = rng.gen_range(-5.0..5.0);
        self.speed = (self.speed + rng.gen_range(-0.3..0.3)).clamp(MIN_SPEED, MAX_SPEED);

        let roll: u32 = ctx.rng().gen_range(1..=100);
        if roll > 70 {
            Enemy::spawn(ctx, self.mesh);
        }
    }

    fn caught(&mut self, ctx: &mut Context<'_, Chapel>) {
        ctx.play(sound::HIT);
        self.end_hunt(ctx, Chapel::GameOver);
    }

    /// Leaves combat for `scene`. Only the first enemy to get here acts.
    fn end_hunt(&mut self, ctx: &mut Context<'_, Chapel>, scene: Chapel) {
        if !ctx.state().enemy_mode {
            return;
        }
        info!("Hunt over, moving to {:?}", scene);
        ctx.state_mut().enemy_mode = false;
        let commands = ctx.commands();
        commands.set_inter_object_collisions(false);
        commands.set_scene(scene);
    }
}

impl GameObject<Chapel> for Enemy {
    fn id(&self) -> &str {
        &self.id
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
        let camera = ctx.camera.position;
        let position = &mut self.transform.position;
        let step = dt * self.speed;

        if (camera.z + position.z).abs() < 1.0 {
            if -camera.x > position.x {
                position.x += step;
            } else {
                position.x -= step;
            }
        }

        if -camera.z > position.z {
            position.z += step;
        } else {
            position.z -= step;
        }

        self.transform.rotation.y = yaw_towards(self.transform.position, &ctx.camera);

        if ctx.state().enemy_mode {
            ctx.play_at(sound::DRUM, DRUM_INTERVAL_MS);
        }
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

    fn as_collision_listener(&mut self) -> Option<&mut dyn CollisionListener<Chapel>> {
        Some(self)
    }
}

impl Movable for Enemy {
    fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_position(x, y, z);
    }

    fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_rotation(x, y, z);
    }
}

impl CollisionListener<Chapel> for Enemy {
    fn on_collide_enter(&mut self, other: &str, _scene: Chapel, ctx: &mut Context<'_, Chapel>) {
        match other {
            BULLET_ID => self.shot(ctx),
            CAMERA_ID => self.caught(ctx),
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
