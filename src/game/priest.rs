//=========================================================================
// Priest
//=========================================================================
//
// The two speaking characters inside the church.
//
// `Priest` greets the player in the lobby. His conversation remembers how
// far it got across sessions and, once finished, opens the way to the
// forest. `GameOverNpc` stands in the same spot after the player was
// caught: it reports the tally, offers another try, and clears the forest
// of enemies when the player leaves.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::dialogs::{self, Outcome, PRIEST_PROGRESS_KEY};
use super::weapon::Shotgun;
use super::{yaw_towards, Chapel};
use crate::core::dialog::ConversationDialog;
use crate::core::error::ContentError;
use crate::core::input::{KeyCode, KeyState};
use crate::core::math::{vec3, Aabb, Transform, Vector3};
use crate::core::persistence::ProgressStore;
use crate::core::platform_bridge::MeshHandle;
use crate::core::render::{DrawParams, Frame};
use crate::core::scene::{
    CollisionListener, Context, GameObject, KeyListener, Movable, SceneListener, CAMERA_ID,
};

//=== Priest ==============================================================

pub struct Priest {
    id: &'static str,
    transform: Transform,
    half: Vector3,
    mesh: MeshHandle,
    visible: bool,
    dialog: ConversationDialog<Outcome>,
}

impl Priest {
    pub const ID: &'static str = "priest";

    /// The lobby priest, resuming at the chapter stored in `progress`.
    pub fn new(mesh: MeshHandle, progress: &ProgressStore) -> Result<Self, ContentError> {
        let mut dialog =
            ConversationDialog::new(&dialogs::priest()?, Some(PRIEST_PROGRESS_KEY), progress)?;
        dialog.on_end(Outcome::EnterWorld);
        Ok(Self::speaking(Self::ID, mesh, dialog))
    }

    fn speaking(id: &'static str, mesh: MeshHandle, dialog: ConversationDialog<Outcome>) -> Self {
        Self {
            id,
            transform: Transform::at(vec3(0.0, 0.3, 0.0)),
            half: vec3(0.015, 0.30, 0.05),
            mesh,
            visible: true,
            dialog,
        }
    }

    pub fn dialog(&self) -> &ConversationDialog<Outcome> {
        &self.dialog
    }
}

impl GameObject<Chapel> for Priest {
    fn id(&self) -> &str {
        self.id
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

    fn as_collision_listener(&mut self) -> Option<&mut dyn CollisionListener<Chapel>> {
        Some(self)
    }

    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener<Chapel>> {
        Some(self)
    }
}

impl Movable for Priest {
    fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_position(x, y, z);
    }

    fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_rotation(x, y, z);
    }
}

impl CollisionListener<Chapel> for Priest {
    fn on_collide_enter(&mut self, other: &str, _scene: Chapel, ctx: &mut Context<'_, Chapel>) {
        if other == CAMERA_ID && !self.dialog.has_started() {
            self.dialog.start(&mut ctx.dialog_io());
        }
    }
}

impl KeyListener<Chapel> for Priest {
    fn on_key_press(&mut self, key: KeyCode, ctx: &mut Context<'_, Chapel>) {
        let outcome = self.dialog.handle_key(key, &mut ctx.dialog_io());
        if let Some(outcome) = outcome {
            outcome.apply(ctx);
        }
    }
}

//=== GameOverNpc =========================================================

/// The priest's stand-in for the game-over chapel.
pub struct GameOverNpc {
    inner: Priest,
}

impl GameOverNpc {
    pub const ID: &'static str = "gameoverNpc";

    pub fn new(mesh: MeshHandle, progress: &ProgressStore) -> Result<Self, ContentError> {
        Ok(Self {
            inner: Priest::speaking(Self::ID, mesh, Self::conversation(0, progress)?),
        })
    }

    pub fn dialog(&self) -> &ConversationDialog<Outcome> {
        self.inner.dialog()
    }

    fn conversation(
        kills: u32,
        progress: &ProgressStore,
    ) -> Result<ConversationDialog<Outcome>, ContentError> {
        let mut dialog = ConversationDialog::new(&dialogs::game_over(kills)?, None, progress)?;
        dialog.on_end(Outcome::EnterWorld);
        Ok(dialog)
    }

    /// Removes every enemy of the finished round and hides the weapon.
    fn clear_forest(ctx: &mut Context<'_, Chapel>) {
        let spawned = std::mem::take(&mut ctx.state_mut().enemies);
        debug!("Clearing {} enemies from the forest", spawned);

        let commands = ctx.commands();
        for n in 1..=spawned {
            commands.remove(Chapel::World, format!("enemy{n}"));
        }
        commands.set_visible_in(Chapel::World, Shotgun::ID, false);
    }
}

impl GameObject<Chapel> for GameOverNpc {
    fn id(&self) -> &str {
        Self::ID
    }

    fn transform(&self) -> &Transform {
        self.inner.transform()
    }

    fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.inner.set_visible(visible);
    }

    fn update(&mut self, dt: f32, keys: &KeyState, ctx: &mut Context<'_, Chapel>) {
        self.inner.update(dt, keys, ctx);
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        self.inner.draw(frame);
    }

    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        Some(&mut self.inner)
    }

    fn collider(&self) -> Option<Aabb> {
        self.inner.collider()
    }

    fn as_scene_listener(&mut self) -> Option<&mut dyn SceneListener<Chapel>> {
        Some(self)
    }

    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener<Chapel>> {
        Some(&mut self.inner)
    }
}

impl SceneListener<Chapel> for GameOverNpc {
    fn on_scene_enter(&mut self, scene: Chapel, ctx: &mut Context<'_, Chapel>) {
        if scene != Chapel::GameOver {
            return;
        }
        match Self::conversation(ctx.state().kills, ctx.progress()) {
            Ok(dialog) => self.inner.dialog = dialog,
            Err(e) => warn!("Keeping previous game-over dialog: {}", e),
        }
        self.inner.dialog.start(&mut ctx.dialog_io());
    }

    fn on_scene_leave(&mut self, scene: Chapel, ctx: &mut Context<'_, Chapel>) {
        if scene != Chapel::GameOver {
            return;
        }
        self.inner.dialog.end(&mut ctx.dialog_io(), false);
        Self::clear_forest(ctx);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
