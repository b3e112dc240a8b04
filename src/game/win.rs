//=========================================================================
// Win NPC
//=========================================================================
//
// Stands in the chapel once the hunt is won. Entering the scene records
// that the game was finished and starts the closing lines; while the
// player listens, the fog slowly cycles through a narrow colour band.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::{dialogs, yaw_towards, Chapel};
use crate::core::dialog::LinearDialog;
use crate::core::error::ContentError;
use crate::core::input::{KeyCode, KeyState};
use crate::core::math::{vec3, Aabb, Transform, Vector3};
use crate::core::platform_bridge::MeshHandle;
use crate::core::render::{DrawParams, Frame};
use crate::core::scene::{Context, GameObject, KeyListener, SceneListener};

/// Fog colour band the ending cycles through.
const SKY_MIN: f32 = 0.5;
const SKY_MAX: f32 = 0.6;
const SKY_STEP: f32 = 0.01;

//=== WinNpc ==============================================================

pub struct WinNpc {
    transform: Transform,
    half: Vector3,
    mesh: MeshHandle,
    visible: bool,
    dialog: LinearDialog,
}

impl WinNpc {
    pub const ID: &'static str = "winNpc";

    pub fn new(mesh: MeshHandle) -> Result<Self, ContentError> {
        Ok(Self {
            transform: Transform::at(vec3(0.0, 0.3, 0.0)),
            half: vec3(0.015, 0.30, 0.05),
            mesh,
            visible: true,
            dialog: LinearDialog::new(dialogs::ending())?,
        })
    }

    pub fn dialog(&self) -> &LinearDialog {
        &self.dialog
    }
}

/// One animation step of a fog component, wrapping back into the band.
fn cycle_sky(component: f32) -> f32 {
    let next = component + SKY_STEP;
    let next = if next > SKY_MAX { SKY_MIN } else { next };
    next.clamp(SKY_MIN, SKY_MAX)
}

impl GameObject<Chapel> for WinNpc {
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

    fn update(&mut self, _dt: f32, _keys: &KeyState, ctx: &mut Context<'_, Chapel>) {
        let sky = &mut ctx.state_mut().sky;
        for component in sky.iter_mut() {
            *component = cycle_sky(*component);
        }

        self.transform.rotation.y = yaw_towards(self.transform.position, &ctx.camera);
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.draw_mesh(self.mesh, &self.transform, DrawParams::default());
    }

    fn collider(&self) -> Option<Aabb> {
        Some(Aabb::from_center(self.transform.position, self.half))
    }

    fn as_scene_listener(&mut self) -> Option<&mut dyn SceneListener<Chapel>> {
        Some(self)
    }

    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener<Chapel>> {
        Some(self)
    }
}

impl SceneListener<Chapel> for WinNpc {
    fn on_scene_enter(&mut self, scene: Chapel, ctx: &mut Context<'_, Chapel>) {
        if scene != Chapel::Win {
            return;
        }
        info!("Game finished");
        ctx.progress_mut().mark_finished();
        self.dialog.reset(0);
        self.dialog.show(&mut ctx.dialog_io());
    }
}

impl KeyListener<Chapel> for WinNpc {
    fn on_key_press(&mut self, key: KeyCode, ctx: &mut Context<'_, Chapel>) {
        if key == KeyCode::Space {
            self.dialog.next(&mut ctx.dialog_io());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
