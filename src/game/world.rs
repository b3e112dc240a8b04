//=========================================================================
// World Construction
//=========================================================================
//
// Uploads every mesh once and populates the four scenes.
//
// Scenes:
// ```text
//   Lobby     church, priest
//   World     skybox, ground, moon, castle, tree and bush rows,
//             pilgrims, shotgun, bullet
//   GameOver  church, game-over NPC
//   Win       church, win NPC
// ```
//
// All billboards are cut from one 1024 × 1024 texture atlas; the box
// meshes take their faces from the 16-pixel strips along its bottom edge.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::dialogs::PILGRIM_COUNT;
use super::{
    Bullet, Chapel, GameOverNpc, Npc, Player, Priest, Scenery, Shotgun, Skybox, WinNpc,
};
use crate::core::error::EngineError;
use crate::core::platform_bridge::MeshHandle;
use crate::core::render::{boxed, plane, BoxFaces, MeshData};
use crate::core::scene::SceneManager;
use crate::engine::Setup;

/// Rows of trees and bushes lining the forest path.
const ROWS: usize = 30;

/// Depth between rows.
const ROW_SPACING: f32 = 0.3;

/// Pilgrim looks, as atlas rectangles `(s, t, u, v)`.
const PILGRIM_SPRITES: [(f32, f32, f32, f32); PILGRIM_COUNT] = [
    (0.0, 0.0, 120.0, 248.0),
    (256.0, 0.0, 376.0, 248.0),
    (384.0, 0.0, 504.0, 248.0),
    (640.0, 0.0, 760.0, 248.0),
    (768.0, 0.0, 888.0, 248.0),
    (896.0, 0.0, 1024.0, 248.0),
];

//=== Meshes ==============================================================

/// Renderer handles for every mesh the game draws.
#[derive(Debug, Clone, Copy)]
pub struct Meshes {
    pub church: MeshHandle,
    pub ground: MeshHandle,
    pub skybox: MeshHandle,
    pub moon: MeshHandle,
    pub castle: MeshHandle,
    pub tree: MeshHandle,
    pub bush: MeshHandle,
    pub priest: MeshHandle,
    pub win: MeshHandle,
    pub enemy: MeshHandle,
    pub bullet: MeshHandle,
    pub shotgun: MeshHandle,
    pub npcs: [MeshHandle; PILGRIM_COUNT],
}

impl Meshes {
    /// Builds and uploads all geometry.
    ///
    /// # Errors
    ///
    /// Fails if a face list is malformed or the renderer rejects a mesh.
    pub fn upload(setup: &mut Setup<'_, Chapel>) -> Result<Self, EngineError> {
        let mut boxed_mesh = |row: u32, faces: &str| -> Result<MeshHandle, EngineError> {
            let data = boxed(row, &BoxFaces::parse(faces)?);
            Ok(setup.upload(&data)?)
        };
        let church = boxed_mesh(0, "LRGCFB")?;
        let ground = boxed_mesh(1, "G")?;
        let skybox = boxed_mesh(1, "C")?;
        let shotgun = boxed_mesh(2, "LC")?;

        let mut sprite = |data: MeshData| setup.upload(&data);
        let moon = sprite(plane(256.0, 768.0, 512.0, 896.0, 1.0, 0.5))?;
        let castle = sprite(plane(256.0, 640.0, 504.0, 768.0, 1.0, 0.5))?;
        let tree = sprite(plane(768.0, 512.0, 896.0, 760.0, 0.35, 0.70))?;
        let bush = sprite(plane(640.0, 504.0, 760.0, 632.0, 0.2, 0.2))?;
        let priest = sprite(plane(512.0, 0.0, 640.0, 254.0, 0.13, 0.30))?;
        let win = sprite(plane(128.0, 0.0, 248.0, 248.0, 0.13, 0.3))?;
        let enemy = sprite(plane(0.0, 248.0, 120.0, 527.0, 0.13, 0.30))?;
        let bullet = sprite(plane(0.0, 640.0, 120.0, 760.0, 0.22, 0.22))?;

        let mut npcs = [MeshHandle(0); PILGRIM_COUNT];
        for (slot, (s, t, u, v)) in npcs.iter_mut().zip(PILGRIM_SPRITES) {
            *slot = sprite(plane(s, t, u, v, 0.13, 0.30))?;
        }

        Ok(Self {
            church,
            ground,
            skybox,
            moon,
            castle,
            tree,
            bush,
            priest,
            win,
            enemy,
            bullet,
            shotgun,
            npcs,
        })
    }
}

//=== build_world =========================================================

/// Populates every scene. Pass to [`Engine::init`](crate::Engine::init).
///
/// # Errors
///
/// Propagates mesh upload failures and malformed dialog content.
pub fn build_world(
    scenes: &mut SceneManager<Chapel>,
    setup: &mut Setup<'_, Chapel>,
) -> Result<(), EngineError> {
    let meshes = Meshes::upload(setup)?;

    scenes.set_camera(Player::default());

    //--- Lobby ------------------------------------------------------------

    scenes.register_scene(Chapel::Lobby);
    scenes.add_object(Chapel::Lobby, Scenery::new("church", meshes.church));
    scenes.add_object(Chapel::Lobby, Priest::new(meshes.priest, setup.progress())?);

    //--- World ------------------------------------------------------------

    scenes.register_scene(Chapel::World);
    scenes.add_object(Chapel::World, Skybox::new(meshes.skybox));
    scenes.add_object(Chapel::World, Scenery::new("ground", meshes.ground).scaled(100.0));
    scenes.add_object(
        Chapel::World,
        Scenery::new("moon", meshes.moon).at(0.0, 2.0, -50.0),
    );
    scenes.add_object(
        Chapel::World,
        Scenery::new("castle", meshes.castle).at(0.0, 0.75, -40.0).scaled(1.5),
    );
    plant_forest(scenes, setup, &meshes);

    for (index, mesh) in meshes.npcs.iter().enumerate() {
        let npc = Npc::new(index, *mesh, meshes.enemy, setup.progress())?;
        scenes.add_object(Chapel::World, npc);
    }
    scenes.add_object(Chapel::World, Shotgun::new(meshes.shotgun));
    scenes.add_object(Chapel::World, Bullet::new(meshes.bullet));

    //--- Endings ----------------------------------------------------------

    scenes.register_scene(Chapel::GameOver);
    scenes.add_object(Chapel::GameOver, Scenery::new("church", meshes.church));
    scenes.add_object(Chapel::GameOver, GameOverNpc::new(meshes.priest, setup.progress())?);

    scenes.register_scene(Chapel::Win);
    scenes.add_object(Chapel::Win, Scenery::new("church", meshes.church));
    scenes.add_object(Chapel::Win, WinNpc::new(meshes.win)?);

    info!("World built");
    Ok(())
}

/// Scatters trees and bushes on both sides of the path.
fn plant_forest(scenes: &mut SceneManager<Chapel>, setup: &mut Setup<'_, Chapel>, meshes: &Meshes) {
    for i in 0..ROWS {
        let depth = i as f32 * ROW_SPACING;
        let rng = setup.rng();
        let (tree_left, tree_right) = (rng.gen_range(-3.0..-0.5), rng.gen_range(0.5..3.0));
        let (bush_left, bush_right) = (rng.gen_range(-3.0..-0.25), rng.gen_range(0.25..3.0));

        for (side, x) in [("left", tree_left), ("right", tree_right)] {
            let tree = Scenery::new(format!("tree-{i}-{side}"), meshes.tree)
                .at(x, 0.6, -depth)
                .billboard();
            scenes.add_object(Chapel::World, tree);
        }
        for (side, x) in [("left", bush_left), ("right", bush_right)] {
            let bush = Scenery::new(format!("bush-{i}-{side}"), meshes.bush)
                .at(x, 0.1, 2.0 - depth)
                .billboard();
            scenes.add_object(Chapel::World, bush);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RenderError;
    use crate::core::platform_bridge::{Renderer, Uniforms};
    use crate::core::scene::{GameObject, CAMERA_ID};
    use crate::engine::{Engine, EngineBuilder, Services};

    #[derive(Default)]
    struct Counter {
        uploads: u32,
    }

    impl Renderer for Counter {
        fn compile_program(&mut self, _: &str, _: &str) -> Result<(), RenderError> {
            Ok(())
        }
        fn upload_mesh(&mut self, _: &MeshData) -> Result<MeshHandle, RenderError> {
            self.uploads += 1;
            Ok(MeshHandle(self.uploads))
        }
        fn set_viewport(&mut self, _: u32, _: u32) {}
        fn begin_frame(&mut self) {}
        fn draw_indexed(&mut self, _: MeshHandle, _: &Uniforms) {}
    }

    struct Failing;

    impl Renderer for Failing {
        fn compile_program(&mut self, _: &str, _: &str) -> Result<(), RenderError> {
            Ok(())
        }
        fn upload_mesh(&mut self, _: &MeshData) -> Result<MeshHandle, RenderError> {
            Err(RenderError::MeshUpload("out of memory".to_string()))
        }
        fn set_viewport(&mut self, _: u32, _: u32) {}
        fn begin_frame(&mut self) {}
        fn draw_indexed(&mut self, _: MeshHandle, _: &Uniforms) {}
    }

    fn built() -> Engine<Chapel> {
        EngineBuilder::new()
            .build(Counter::default(), Services::headless())
            .and_then(|engine| engine.init(build_world))
            .unwrap()
    }

    #[test]
    fn every_scene_is_populated() {
        let engine = built();
        let scenes = engine.scene_manager();

        assert_eq!(scenes.camera().map(|c| c.id()), Some(CAMERA_ID));
        assert!(scenes.scene(Chapel::Lobby).unwrap().contains(Priest::ID));
        assert!(scenes.scene(Chapel::GameOver).unwrap().contains(GameOverNpc::ID));
        assert!(scenes.scene(Chapel::Win).unwrap().contains(WinNpc::ID));

        let world = scenes.scene(Chapel::World).unwrap();
        // skybox, ground, moon, castle, 4 per row, pilgrims, shotgun, bullet
        assert_eq!(world.len(), 4 + ROWS * 4 + PILGRIM_COUNT + 2);
        assert!(world.contains("npc5"));
        assert!(world.contains("tree-29-right"));
        assert!(world.contains(Shotgun::ID));
    }

    #[test]
    fn trees_keep_clear_of_the_path() {
        let engine = built();
        let world = engine.scene_manager().scene(Chapel::World).unwrap();

        for tree in world.objects().filter(|o| o.id().starts_with("tree-")) {
            let x = tree.position().x;
            assert!(x.abs() >= 0.5 && x.abs() < 3.0, "{} at x = {}", tree.id(), x);
        }
    }

    #[test]
    fn weapon_and_bullet_start_hidden() {
        let engine = built();
        let scenes = engine.scene_manager();
        let hidden = |id| scenes.object(Some(Chapel::World), id).map(|o| o.is_visible());

        assert_eq!(hidden(Shotgun::ID), Some(false));
        assert_eq!(hidden("bullet"), Some(false));
    }

    #[test]
    fn starting_in_the_lobby_places_the_player() {
        let mut engine = built();
        engine.start(Chapel::Lobby);

        let camera = engine.scene_manager().camera().unwrap();
        assert_eq!(camera.position().z, -1.0);
        assert_eq!(engine.scene_manager().active_scene(), Some(Chapel::Lobby));
    }

    #[test]
    fn upload_failure_aborts_construction() {
        let result = EngineBuilder::<Chapel>::new()
            .build(Failing, Services::headless())
            .and_then(|engine| engine.init(build_world));
        assert!(matches!(result, Err(EngineError::Construction(RenderError::MeshUpload(_)))));
    }
}
