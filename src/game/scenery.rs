//=========================================================================
// Scenery
//=========================================================================
//
// Things that are looked at and never touched: the church, the ground,
// the moon, the castle, trees and bushes, and the sky box.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{yaw_towards, Chapel};
use crate::core::input::KeyState;
use crate::core::math::{vec3, Transform};
use crate::core::platform_bridge::MeshHandle;
use crate::core::render::{DrawParams, Frame};
use crate::core::scene::{Context, GameObject, Movable};

//=== Scenery =============================================================

/// A static mesh, optionally a billboard that keeps facing the camera.
pub struct Scenery {
    id: String,
    transform: Transform,
    mesh: MeshHandle,
    scale: f32,
    billboard: bool,
    visible: bool,
}

impl Scenery {
    pub fn new(id: impl Into<String>, mesh: MeshHandle) -> Self {
        Self {
            id: id.into(),
            transform: Transform::default(),
            mesh,
            scale: 1.0,
            billboard: false,
            visible: true,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = vec3(x, y, z);
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Turns the mesh towards the camera on every step.
    pub fn billboard(mut self) -> Self {
        self.billboard = true;
        self
    }
}

impl GameObject<Chapel> for Scenery {
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

    fn update(&mut self, _dt: f32, _keys: &KeyState, ctx: &mut Context<'_, Chapel>) {
        if self.billboard {
            self.transform.rotation.y = yaw_towards(self.transform.position, &ctx.camera);
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.draw_mesh(self.mesh, &self.transform, DrawParams::scaled(self.scale));
    }

    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        Some(self)
    }
}

impl Movable for Scenery {
    fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_position(x, y, z);
    }

    fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_rotation(x, y, z);
    }
}

//=== Skybox ==============================================================

/// Sky cube centered under the player wherever they walk.
pub struct Skybox {
    transform: Transform,
    mesh: MeshHandle,
    visible: bool,
}

impl Skybox {
    const SCALE: f32 = 5.0;

    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            transform: Transform::at(vec3(0.0, -3.4, 0.0)),
            mesh,
            visible: true,
        }
    }
}

impl GameObject<Chapel> for Skybox {
    fn id(&self) -> &str {
        "skybox"
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

    fn update(&mut self, _dt: f32, _keys: &KeyState, ctx: &mut Context<'_, Chapel>) {
        self.transform.position.x = -ctx.camera.position.x;
        self.transform.position.z = -ctx.camera.position.z;
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.draw_mesh(self.mesh, &self.transform, DrawParams::scaled(Self::SCALE));
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

    fn camera_at(x: f32, z: f32) -> CameraView {
        CameraView {
            position: vec3(x, -0.45, z),
            ..CameraView::default()
        }
    }

    #[test]
    fn billboards_turn_and_statics_do_not() {
        let (mut globals, _) = globals();
        let mut tree = Scenery::new("tree", MeshHandle(1)).at(0.0, 0.6, 0.0).billboard();
        let mut church = Scenery::new("church", MeshHandle(2));

        with_ctx(&mut globals, Chapel::World, camera_at(-2.0, 0.0), |ctx| {
            tree.update(0.1, &KeyState::new(), ctx);
            church.update(0.1, &KeyState::new(), ctx);
        });

        assert!((tree.rotation().y - 90.0).abs() < 1e-4);
        assert_eq!(church.rotation().y, 0.0);
    }

    #[test]
    fn scenery_never_collides() {
        let rock = Scenery::new("rock", MeshHandle(0)).scaled(3.0);
        assert!(rock.collider().is_none());
    }

    #[test]
    fn skybox_follows_player() {
        let (mut globals, _) = globals();
        let mut sky = Skybox::new(MeshHandle(0));

        with_ctx(&mut globals, Chapel::World, camera_at(1.5, -7.0), |ctx| {
            sky.update(0.1, &KeyState::new(), ctx);
        });

        assert_eq!(sky.position(), vec3(-1.5, -3.4, 7.0));
    }
}
