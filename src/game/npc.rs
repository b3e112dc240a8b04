//=========================================================================
// Pilgrim NPC
//=========================================================================
//
// Forest pilgrims. Walking into one starts its conversation, walking away
// ends it. Finishing any conversation starts the hunt: every pilgrim
// backs away for two seconds, then becomes an enemy and reveals the gun.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::dialogs::{self, Outcome};
use super::enemy::Enemy;
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

/// Seconds a pilgrim retreats before it turns.
const TURN_DELAY: f32 = 2.0;

/// Retreat speed in units per second.
const RETREAT_SPEED: f32 = 0.25;

//=== Npc =================================================================

pub struct Npc {
    id: String,
    transform: Transform,
    half: Vector3,
    mesh: MeshHandle,
    enemy_mesh: MeshHandle,
    visible: bool,
    dialog: ConversationDialog<Outcome>,
    retreat: f32,
}

impl Npc {
    /// Creates pilgrim `index` (its look and its question).
    pub fn new(
        index: usize,
        mesh: MeshHandle,
        enemy_mesh: MeshHandle,
        progress: &ProgressStore,
    ) -> Result<Self, ContentError> {
        let mut dialog = ConversationDialog::new(&dialogs::pilgrim(index)?, None, progress)?;
        dialog.on_end(Outcome::BeginHunt);

        Ok(Self {
            id: format!("npc{index}"),
            transform: Transform::at(vec3(0.0, 0.3, 0.0)),
            half: vec3(0.015, 0.30, 0.05),
            mesh,
            enemy_mesh,
            visible: true,
            dialog,
            retreat: 0.0,
        })
    }

    pub fn dialog(&self) -> &ConversationDialog<Outcome> {
        &self.dialog
    }

    fn place(&mut self, ctx: &mut Context<'_, Chapel>) {
        let rng = ctx.rng();
        let x = rng.gen_range(0.0..1.0);
        let z = -rng.gen_range(1.0..4.0) - rng.gen_range(0.0..0.3);
        self.transform = Transform::at(vec3(x, 0.3, z));
    }
}

impl GameObject<Chapel> for Npc {
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
        if ctx.state().enemy_mode {
            self.retreat += dt;
            self.transform.position.z -= dt * RETREAT_SPEED;

            if self.retreat > TURN_DELAY {
                debug!("{} turns", self.id);
                Enemy::spawn(ctx, self.enemy_mesh);
                ctx.commands().set_visible(Shotgun::ID, true);
                self.visible = false;
            }
        }

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

    fn as_scene_listener(&mut self) -> Option<&mut dyn SceneListener<Chapel>> {
        Some(self)
    }

    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener<Chapel>> {
        Some(self)
    }
}

impl Movable for Npc {
    fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_position(x, y, z);
    }

    fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.transform.set_rotation(x, y, z);
    }
}

impl CollisionListener<Chapel> for Npc {
    fn on_collide_enter(&mut self, other: &str, _scene: Chapel, ctx: &mut Context<'_, Chapel>) {
        if other == CAMERA_ID && !ctx.state().enemy_mode {
            self.dialog.start(&mut ctx.dialog_io());
        }
    }

    fn on_collide_leave(&mut self, other: &str, _scene: Chapel, ctx: &mut Context<'_, Chapel>) {
        if other == CAMERA_ID {
            self.dialog.end(&mut ctx.dialog_io(), false);
        }
    }
}

impl SceneListener<Chapel> for Npc {
    /// Every visit to the forest puts the pilgrims somewhere new.
    fn on_scene_enter(&mut self, scene: Chapel, ctx: &mut Context<'_, Chapel>) {
        if scene != Chapel::World {
            return;
        }
        self.place(ctx);
        self.retreat = 0.0;
        self.visible = true;
    }
}

impl KeyListener<Chapel> for Npc {
    fn on_key_press(&mut self, key: KeyCode, ctx: &mut Context<'_, Chapel>) {
        let outcome = self.dialog.handle_key(key, &mut ctx.dialog_io());
        if let Some(outcome) = outcome {
            outcome.apply(ctx);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dialog::ConversationPhase;
    use crate::core::globals::GlobalContext;
    use crate::core::scene::{CameraView, SceneCommand};
    use crate::game::testing::{globals, with_ctx};

    fn pilgrim(globals: &GlobalContext<Chapel>) -> Npc {
        Npc::new(2, MeshHandle(4), MeshHandle(9), &globals.progress).unwrap()
    }

    fn press(npc: &mut Npc, globals: &mut GlobalContext<Chapel>, key: KeyCode) {
        with_ctx(globals, Chapel::World, CameraView::default(), |ctx| {
            npc.on_key_press(key, ctx);
        });
    }

    #[test]
    fn ids_follow_index() {
        let (globals, _) = globals();
        assert_eq!(pilgrim(&globals).id(), "npc2");
    }

    #[test]
    fn contact_starts_and_separation_ends_conversation() {
        let (mut globals, overlay) = globals();
        let mut npc = pilgrim(&globals);

        with_ctx(&mut globals, Chapel::World, CameraView::default(), |ctx| {
            npc.on_collide_enter(CAMERA_ID, Chapel::World, ctx);
        });
        assert_eq!(npc.dialog().phase(), ConversationPhase::AwaitingBranch);
        assert!(overlay.visible().unwrap().contains("procession"));

        with_ctx(&mut globals, Chapel::World, CameraView::default(), |ctx| {
            npc.on_collide_leave(CAMERA_ID, Chapel::World, ctx);
        });
        assert_eq!(npc.dialog().phase(), ConversationPhase::Idle);
        assert_eq!(overlay.visible(), None);
    }

    #[test]
    fn finishing_the_conversation_starts_the_hunt() {
        let (mut globals, _) = globals();
        let mut npc = pilgrim(&globals);

        with_ctx(&mut globals, Chapel::World, CameraView::default(), |ctx| {
            npc.on_collide_enter(CAMERA_ID, Chapel::World, ctx);
        });
        press(&mut npc, &mut globals, KeyCode::KeyY);
        assert!(!globals.state.enemy_mode);
        press(&mut npc, &mut globals, KeyCode::Space);

        assert!(globals.state.enemy_mode);
        assert_eq!(npc.dialog().phase(), ConversationPhase::Ended);
    }

    #[test]
    fn enemies_cannot_start_conversations() {
        let (mut globals, _) = globals();
        let mut npc = pilgrim(&globals);

        with_ctx(&mut globals, Chapel::World, CameraView::default(), |ctx| {
            npc.on_collide_enter("enemy1", Chapel::World, ctx);
        });
        assert!(!npc.dialog().has_started());
    }

    #[test]
    fn turns_into_enemy_after_retreat() {
        let (mut globals, _) = globals();
        globals.state.enemy_mode = true;
        let mut npc = pilgrim(&globals);
        let start_z = npc.position().z;

        for _ in 0..3 {
            with_ctx(&mut globals, Chapel::World, CameraView::default(), |ctx| {
                npc.update(1.0, &KeyState::new(), ctx);
            });
        }

        assert!(!npc.is_visible());
        assert!(npc.position().z < start_z);
        assert!(matches!(
            globals.commands.pop(),
            Some(SceneCommand::Spawn { scene: Chapel::World, .. })
        ));
        assert!(matches!(
            globals.commands.pop(),
            Some(SceneCommand::SetVisible { visible: true, ref id, .. }) if id == Shotgun::ID
        ));
    }

    #[test]
    fn entering_the_forest_resets_placement() {
        let (mut globals, _) = globals();
        let mut npc = pilgrim(&globals);
        npc.set_visible(false);

        with_ctx(&mut globals, Chapel::World, CameraView::default(), |ctx| {
            npc.on_scene_enter(Chapel::World, ctx);
        });

        let p = npc.position();
        assert!(npc.is_visible());
        assert!((0.0..1.0).contains(&p.x));
        assert!(p.z <= -1.0 && p.z > -4.3);
    }
}
