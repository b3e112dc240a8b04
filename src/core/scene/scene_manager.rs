//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, the active scene, the camera and the
// per-step object pipeline.
//
// Scenes are stored in a HashMap by key. Exactly one is active; its
// objects are updated, collided and drawn. Structural changes requested
// by objects arrive through the `CommandQueue` and are applied once the
// current pass is over.
//
// Step pipeline:
// ```text
//   1. camera.update
//   2. visible objects update (registration order)
//   3. collision pass
//        object vs camera   → hooks on camera, then object
//        object vs object   → hook on the first of each ordered pair
//   4. apply queued commands (FIFO, including scene switches)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{
    CameraView, CollisionListener, CollisionSystem, Contact, Context, GameObject, Scene,
    SceneCommand, SceneKey, SceneView, CAMERA_ID,
};
use crate::core::globals::GlobalContext;
use crate::core::input::{KeyState, RoutedInput};
use crate::core::render::Frame;

/// Commands applied per boundary before the queue is considered runaway.
const MAX_COMMANDS_PER_BOUNDARY: usize = 4096;

//=== Scene Manager =======================================================

pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Scene<S>>,
    camera: Option<Box<dyn GameObject<S>>>,
    collisions: CollisionSystem<S>,
    active: Option<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with no scenes and no camera.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            camera: None,
            collisions: CollisionSystem::new(),
            active: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers an empty scene and returns it for population.
    ///
    /// Registering a key twice keeps the existing scene.
    pub fn register_scene(&mut self, key: S) -> &mut Scene<S> {
        if self.scenes.contains_key(&key) {
            warn!("Scene {:?} was already registered", key);
        }
        self.scenes.entry(key).or_insert_with(|| Scene::new(key))
    }

    /// Appends `object` to `scene`. Unknown scenes drop the object.
    pub fn add_object<O>(&mut self, scene: S, object: O)
    where
        O: GameObject<S> + 'static,
    {
        self.add_boxed(scene, Box::new(object));
    }

    pub fn add_boxed(&mut self, scene: S, object: Box<dyn GameObject<S>>) {
        match self.scenes.get_mut(&scene) {
            Some(target) => target.add(object),
            None => warn!(
                "Attempted to add `{}` to unregistered scene {:?}",
                object.id(),
                scene
            ),
        }
    }

    /// Destroys an object and forgets every collision pair it was part of.
    pub fn remove_object(&mut self, scene: S, id: &str) -> Option<Box<dyn GameObject<S>>> {
        let removed = self.scenes.get_mut(&scene)?.remove(id);
        if removed.is_some() {
            self.collisions.purge(scene, id);
            debug!("Removed `{}` from {:?}", id, scene);
        }
        removed
    }

    pub fn set_camera<O>(&mut self, camera: O)
    where
        O: GameObject<S> + 'static,
    {
        if camera.id() != CAMERA_ID {
            warn!(
                "Camera id `{}` differs from `{}`; hooks will still name it `{}`",
                camera.id(),
                CAMERA_ID,
                CAMERA_ID
            );
        }
        self.camera = Some(Box::new(camera));
    }

    pub fn set_inter_object_collisions(&mut self, enabled: bool) {
        self.collisions.set_inter_object(enabled);
    }

    //--- Queries ----------------------------------------------------------

    pub fn active_scene(&self) -> Option<S> {
        self.active
    }

    pub fn scene(&self, key: S) -> Option<&Scene<S>> {
        self.scenes.get(&key)
    }

    pub fn camera(&self) -> Option<&dyn GameObject<S>> {
        self.camera.as_deref()
    }

    /// Looks up an object. `None` targets the active scene; the camera id
    /// resolves to the camera.
    pub fn object(&self, scene: Option<S>, id: &str) -> Option<&dyn GameObject<S>> {
        if id == CAMERA_ID {
            return self.camera.as_deref();
        }
        let key = scene.or(self.active)?;
        self.scenes.get(&key)?.get(id)
    }

    pub fn object_mut(
        &mut self,
        scene: Option<S>,
        id: &str,
    ) -> Option<&mut (dyn GameObject<S> + 'static)> {
        if id == CAMERA_ID {
            return self.camera.as_deref_mut();
        }
        let key = scene.or(self.active)?;
        self.scenes.get_mut(&key)?.get_mut(id)
    }

    pub fn inter_object_collisions(&self) -> bool {
        self.collisions.inter_object()
    }

    pub fn collisions(&self) -> &CollisionSystem<S> {
        &self.collisions
    }

    //--- Scene Switching --------------------------------------------------

    /// Switches the active scene right away.
    ///
    /// Leave hooks of the camera and every object of the current scene
    /// run first, then the switch, then enter hooks in the same order.
    /// Inside a step, queue [`SceneCommand::SetScene`] instead.
    pub fn set_scene(&mut self, target: S, globals: &mut GlobalContext<S>) {
        if !self.scenes.contains_key(&target) {
            warn!("Attempted to switch to unregistered scene {:?}", target);
            return;
        }

        if let Some(current) = self.active {
            debug!("Leaving scene {:?}", current);
            self.visit(globals, false, |object, ctx| {
                if let Some(listener) = object.as_scene_listener() {
                    listener.on_scene_leave(current, ctx);
                }
            });
        }

        debug!("Entering scene {:?}", target);
        self.active = Some(target);
        self.visit(globals, false, |object, ctx| {
            if let Some(listener) = object.as_scene_listener() {
                listener.on_scene_enter(target, ctx);
            }
        });
    }

    //--- Step -------------------------------------------------------------

    /// Runs one fixed step of `dt` seconds.
    pub fn step(&mut self, dt: f32, keys: &KeyState, globals: &mut GlobalContext<S>) {
        if self.active.is_some() {
            self.visit(globals, true, |object, ctx| object.update(dt, keys, ctx));
            self.detect_collisions(globals);
        }
        self.apply_commands(globals);
    }

    /// Delivers routed input to the camera, then to visible objects.
    pub fn dispatch_input(&mut self, input: RoutedInput, globals: &mut GlobalContext<S>) {
        let last_delta = globals.clock.last_delta;
        match input {
            RoutedInput::KeyPressed(key) => self.visit(globals, true, |object, ctx| {
                if let Some(listener) = object.as_key_listener() {
                    listener.on_key_press(key, ctx);
                }
            }),
            RoutedInput::MouseMoved { dx, dy } => self.visit(globals, true, |object, ctx| {
                if let Some(listener) = object.as_mouse_listener() {
                    listener.on_mouse_move(dx, dy, last_delta, ctx);
                }
            }),
            RoutedInput::MouseDown(button) => self.visit(globals, true, |object, ctx| {
                if let Some(listener) = object.as_mouse_listener() {
                    listener.on_mouse_down(button, last_delta, ctx);
                }
            }),
            RoutedInput::MouseUp(button) => self.visit(globals, true, |object, ctx| {
                if let Some(listener) = object.as_mouse_listener() {
                    listener.on_mouse_up(button, last_delta, ctx);
                }
            }),
            RoutedInput::Resized { .. } => return,
        }
        self.apply_commands(globals);
    }

    //--- Drawing ----------------------------------------------------------

    /// Draws the camera (which sets up the view), then every visible
    /// object of the active scene in registration order.
    pub fn draw(&self, frame: &mut Frame<'_>) {
        if let Some(camera) = &self.camera {
            camera.draw(frame);
        }
        let Some(scene) = self.active.and_then(|key| self.scenes.get(&key)) else {
            return;
        };
        for object in scene.objects.iter().filter(|o| o.is_visible()) {
            object.draw(frame);
        }
    }

    //--- Command Processing -----------------------------------------------

    /// Applies every queued command in FIFO order, including commands
    /// queued by hooks that run while applying.
    pub fn apply_commands(&mut self, globals: &mut GlobalContext<S>) {
        let mut applied = 0;
        while let Some(command) = globals.commands.pop() {
            applied += 1;
            if applied > MAX_COMMANDS_PER_BOUNDARY {
                warn!(
                    "More than {} commands in one boundary, dropping {} queued",
                    MAX_COMMANDS_PER_BOUNDARY,
                    globals.commands.len() + 1
                );
                globals.commands.clear();
                break;
            }
            self.apply(command, globals);
        }
    }

    fn apply(&mut self, command: SceneCommand<S>, globals: &mut GlobalContext<S>) {
        match command {
            SceneCommand::SetScene(target) => self.set_scene(target, globals),
            SceneCommand::Spawn { scene, object } => self.add_boxed(scene, object),
            SceneCommand::Remove { scene, id } => {
                if self.remove_object(scene, &id).is_none() {
                    debug!("Nothing to remove for `{}` in {:?}", id, scene);
                }
            }
            SceneCommand::SetVisible { scene, id, visible } => {
                match self.object_mut(scene, &id) {
                    Some(object) => object.set_visible(visible),
                    None => warn!("Cannot change visibility of unknown object `{}`", id),
                }
            }
            SceneCommand::SetPosition { scene, id, position: [x, y, z] } => {
                match self.object_mut(scene, &id).and_then(|o| o.as_movable()) {
                    Some(object) => object.set_position(x, y, z),
                    None => warn!("Object `{}` is missing or not movable", id),
                }
            }
            SceneCommand::SetRotation { scene, id, rotation: [x, y, z] } => {
                match self.object_mut(scene, &id).and_then(|o| o.as_movable()) {
                    Some(object) => object.set_rotation(x, y, z),
                    None => warn!("Object `{}` is missing or not movable", id),
                }
            }
            SceneCommand::ResetCollision { a, b } => {
                if let Some(active) = self.active {
                    self.collisions.reset(active, &a, &b);
                }
            }
            SceneCommand::SetInterObjectCollisions(enabled) => {
                debug!("Inter-object collisions {}", if enabled { "on" } else { "off" });
                self.collisions.set_inter_object(enabled);
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Calls `f` on the camera, then on each object of the active scene.
    fn visit<F>(&mut self, globals: &mut GlobalContext<S>, visible_only: bool, mut f: F)
    where
        F: FnMut(&mut dyn GameObject<S>, &mut Context<'_, S>),
    {
        let Some(active) = self.active else {
            return;
        };
        let Self { scenes, camera, .. } = self;
        let Some(scene) = scenes.get_mut(&active) else {
            return;
        };

        if let Some(camera) = camera.as_mut() {
            let view = CameraView::of(&**camera);
            let mut ctx = Context::new(active, view, SceneView::whole(&scene.objects), globals);
            f(&mut **camera, &mut ctx);
        }

        let view = camera.as_deref().map(CameraView::of).unwrap_or_default();
        for index in 0..scene.objects.len() {
            let (before, rest) = scene.objects.split_at_mut(index);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            if visible_only && !current.is_visible() {
                continue;
            }
            let mut ctx = Context::new(active, view, SceneView::split(before, after), globals);
            f(&mut **current, &mut ctx);
        }
    }

    fn detect_collisions(&mut self, globals: &mut GlobalContext<S>) {
        let Some(active) = self.active else {
            return;
        };
        let Self {
            scenes,
            camera,
            collisions,
            ..
        } = self;
        let Some(scene) = scenes.get_mut(&active) else {
            return;
        };

        //--- Object vs Camera ---------------------------------------------

        if let Some(camera) = camera.as_mut() {
            for index in 0..scene.objects.len() {
                let object = &scene.objects[index];
                if !object.is_visible() {
                    continue;
                }
                let (Some(own), Some(cam)) = (object.collider(), camera.collider()) else {
                    continue;
                };
                let object_id = object.id().to_string();
                let touching = own.intersects(&cam);
                let Some(contact) = collisions.transition(active, &object_id, CAMERA_ID, touching)
                else {
                    continue;
                };

                let view = CameraView::of(&**camera);
                if let Some(listener) = camera.as_collision_listener() {
                    let mut ctx =
                        Context::new(active, view, SceneView::whole(&scene.objects), globals);
                    notify(listener, contact, &object_id, active, &mut ctx);
                }

                let (before, rest) = scene.objects.split_at_mut(index);
                if let Some((current, after)) = rest.split_first_mut() {
                    if let Some(listener) = current.as_collision_listener() {
                        let mut ctx =
                            Context::new(active, view, SceneView::split(before, after), globals);
                        notify(listener, contact, CAMERA_ID, active, &mut ctx);
                    }
                }
            }
        }

        //--- Object vs Object ---------------------------------------------

        if !collisions.inter_object() {
            return;
        }
        let view = camera.as_deref().map(CameraView::of).unwrap_or_default();
        let count = scene.objects.len();
        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }
                let (a, b) = (&scene.objects[i], &scene.objects[j]);
                if !a.is_visible() || !b.is_visible() {
                    continue;
                }
                let (Some(box_a), Some(box_b)) = (a.collider(), b.collider()) else {
                    continue;
                };
                let (id_a, id_b) = (a.id().to_string(), b.id().to_string());
                let touching = box_a.intersects(&box_b);
                let Some(contact) = collisions.transition(active, &id_a, &id_b, touching) else {
                    continue;
                };

                let (before, rest) = scene.objects.split_at_mut(i);
                if let Some((current, after)) = rest.split_first_mut() {
                    if let Some(listener) = current.as_collision_listener() {
                        let mut ctx =
                            Context::new(active, view, SceneView::split(before, after), globals);
                        notify(listener, contact, &id_b, active, &mut ctx);
                    }
                }
            }
        }
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn notify<S: SceneKey>(
    listener: &mut dyn CollisionListener<S>,
    contact: Contact,
    other: &str,
    scene: S,
    ctx: &mut Context<'_, S>,
) {
    match contact {
        Contact::Enter => listener.on_collide_enter(other, scene, ctx),
        Contact::Leave => listener.on_collide_leave(other, scene, ctx),
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::SoundBoard;
    use crate::core::dialog::testing::Transcript;
    use crate::core::input::{KeyCode, MouseButton};
    use crate::core::math::{vec3, Aabb, Transform, Vector3};
    use crate::core::persistence::ProgressStore;
    use crate::core::scene::{KeyListener, MouseListener, Movable, SceneListener};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Lobby,
        World,
    }

    impl SceneKey for TestScene {}

    type Log = Rc<RefCell<Vec<String>>>;

    struct Actor {
        id: String,
        transform: Transform,
        half: Option<Vector3>,
        visible: bool,
        log: Log,
        on_update: Option<fn(&mut Context<'_, TestScene>)>,
        walk_to: Option<Vector3>,
    }

    impl Actor {
        fn new(id: &str, log: &Log) -> Self {
            Self {
                id: id.to_string(),
                transform: Transform::default(),
                half: None,
                visible: true,
                log: Rc::clone(log),
                on_update: None,
                walk_to: None,
            }
        }

        fn at(mut self, x: f32, y: f32, z: f32) -> Self {
            self.transform.position = vec3(x, y, z);
            self
        }

        fn solid(mut self, hx: f32, hy: f32, hz: f32) -> Self {
            self.half = Some(vec3(hx, hy, hz));
            self
        }

        fn hidden(mut self) -> Self {
            self.visible = false;
            self
        }

        /// Jumps to the given point on the next update.
        fn walks_to(mut self, x: f32, y: f32, z: f32) -> Self {
            self.walk_to = Some(vec3(x, y, z));
            self
        }

        fn on_update(mut self, f: fn(&mut Context<'_, TestScene>)) -> Self {
            self.on_update = Some(f);
            self
        }

        fn record(&self, entry: String) {
            self.log.borrow_mut().push(entry);
        }
    }

    impl GameObject<TestScene> for Actor {
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
        fn update(&mut self, _dt: f32, _keys: &KeyState, ctx: &mut Context<'_, TestScene>) {
            self.record(format!("update:{}", self.id));
            if let Some(target) = self.walk_to.take() {
                self.transform.position = target;
            }
            if let Some(f) = self.on_update {
                f(ctx);
            }
        }
        fn draw(&self, _frame: &mut Frame<'_>) {}
        fn as_movable(&mut self) -> Option<&mut dyn Movable> {
            Some(self)
        }
        fn collider(&self) -> Option<Aabb> {
            self.half
                .map(|half| Aabb::from_center(self.transform.position, half))
        }
        fn as_collision_listener(&mut self) -> Option<&mut dyn CollisionListener<TestScene>> {
            Some(self)
        }
        fn as_scene_listener(&mut self) -> Option<&mut dyn SceneListener<TestScene>> {
            Some(self)
        }
        fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener<TestScene>> {
            Some(self)
        }
        fn as_mouse_listener(&mut self) -> Option<&mut dyn MouseListener<TestScene>> {
            Some(self)
        }
    }

    impl Movable for Actor {
        fn set_position(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
            self.transform.set_position(x, y, z);
        }
        fn set_rotation(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
            self.transform.set_rotation(x, y, z);
        }
    }

    impl CollisionListener<TestScene> for Actor {
        fn on_collide_enter(&mut self, other: &str, _: TestScene, _: &mut Context<'_, TestScene>) {
            self.record(format!("enter:{}:{}", self.id, other));
        }
        fn on_collide_leave(&mut self, other: &str, _: TestScene, _: &mut Context<'_, TestScene>) {
            self.record(format!("leave:{}:{}", self.id, other));
        }
    }

    impl SceneListener<TestScene> for Actor {
        fn on_scene_enter(&mut self, scene: TestScene, _: &mut Context<'_, TestScene>) {
            self.record(format!("scene-enter:{}:{:?}", self.id, scene));
        }
        fn on_scene_leave(&mut self, scene: TestScene, _: &mut Context<'_, TestScene>) {
            self.record(format!("scene-leave:{}:{:?}", self.id, scene));
        }
    }

    impl MouseListener<TestScene> for Actor {
        fn on_mouse_down(&mut self, button: MouseButton, last_delta: f32, _: &mut Context<'_, TestScene>) {
            self.record(format!("mouse-down:{}:{:?}:{}", self.id, button, last_delta));
        }
        fn on_mouse_up(&mut self, button: MouseButton, last_delta: f32, _: &mut Context<'_, TestScene>) {
            self.record(format!("mouse-up:{}:{:?}:{}", self.id, button, last_delta));
        }
    }

    impl KeyListener<TestScene> for Actor {
        fn on_key_press(&mut self, key: KeyCode, _: &mut Context<'_, TestScene>) {
            self.record(format!("key:{}:{}", self.id, key));
        }
    }

    fn globals() -> GlobalContext<TestScene> {
        GlobalContext::new(
            SoundBoard::silent(),
            Transcript::default(),
            ProgressStore::in_memory(),
        )
        .with_seed(7)
    }

    fn world(log: &Log) -> (SceneManager<TestScene>, GlobalContext<TestScene>) {
        let mut manager = SceneManager::new();
        let mut globals = globals();
        manager.register_scene(TestScene::Lobby);
        manager.register_scene(TestScene::World);
        manager.set_camera(Actor::new(CAMERA_ID, log).solid(0.25, 0.25, 0.25));
        manager.set_scene(TestScene::World, &mut globals);
        log.borrow_mut().clear();
        (manager, globals)
    }

    fn move_x(manager: &mut SceneManager<TestScene>, id: &str, x: f32) {
        if let Some(movable) = manager.object_mut(None, id).and_then(|o| o.as_movable()) {
            movable.set_position(Some(x), None, None);
        }
    }

    fn entries(log: &Log, prefix: &str) -> Vec<String> {
        log.borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .cloned()
            .collect()
    }

    //--- Update -----------------------------------------------------------

    #[test]
    fn step_updates_camera_then_visible_objects_in_order() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(TestScene::World, Actor::new("a", &log));
        manager.add_object(TestScene::World, Actor::new("b", &log).hidden());
        manager.add_object(TestScene::World, Actor::new("c", &log));

        manager.step(0.033, &KeyState::new(), &mut globals);

        assert_eq!(
            entries(&log, "update"),
            vec!["update:camera", "update:a", "update:c"]
        );
    }

    #[test]
    fn commands_apply_after_every_object_was_visited() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(
            TestScene::World,
            Actor::new("a", &log).on_update(|ctx| ctx.commands().remove(TestScene::World, "b")),
        );
        manager.add_object(TestScene::World, Actor::new("b", &log));

        manager.step(0.033, &KeyState::new(), &mut globals);

        assert!(entries(&log, "update").contains(&"update:b".to_string()));
        assert!(manager.object(None, "b").is_none());
        assert!(globals.commands.is_empty());
    }

    //--- Collisions -------------------------------------------------------

    #[test]
    fn approach_and_retreat_fire_enter_and_leave_once() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(
            TestScene::World,
            Actor::new("npc0", &log).at(5.0, 0.0, 0.0).solid(0.1, 0.1, 0.1),
        );

        for x in [5.0, 0.0, 0.0, 0.0, 5.0, 5.0] {
            move_x(&mut manager, "npc0", x);
            manager.step(0.033, &KeyState::new(), &mut globals);
        }

        assert_eq!(
            entries(&log, "enter"),
            vec!["enter:camera:npc0", "enter:npc0:camera"]
        );
        assert_eq!(
            entries(&log, "leave"),
            vec!["leave:camera:npc0", "leave:npc0:camera"]
        );
    }

    #[test]
    fn npc_against_camera_fires_both_hooks_in_same_step() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        let mut globals = globals();
        manager.register_scene(TestScene::World);
        manager.set_camera(
            Actor::new(CAMERA_ID, &log)
                .solid(0.25, 0.25, 0.25)
                .walks_to(0.0, 0.0, -2.1),
        );
        manager.add_object(
            TestScene::World,
            Actor::new("npc0", &log)
                .at(0.2, 0.3, -2.0)
                .solid(0.015, 0.30, 0.05),
        );
        manager.set_scene(TestScene::World, &mut globals);
        assert!(entries(&log, "enter").is_empty());

        manager.step(0.033, &KeyState::new(), &mut globals);

        assert_eq!(manager.camera().map(|c| c.position().z), Some(-2.1));
        assert_eq!(
            entries(&log, "enter"),
            vec!["enter:camera:npc0", "enter:npc0:camera"]
        );
    }

    #[test]
    fn hidden_objects_are_not_collided() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(
            TestScene::World,
            Actor::new("ghost", &log).solid(0.1, 0.1, 0.1).hidden(),
        );

        manager.step(0.033, &KeyState::new(), &mut globals);

        assert!(entries(&log, "enter").is_empty());
    }

    #[test]
    fn removal_forgets_contact_state() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(TestScene::World, Actor::new("enemy1", &log).solid(0.1, 0.1, 0.1));
        manager.step(0.033, &KeyState::new(), &mut globals);
        assert!(manager.collisions().is_touching(TestScene::World, "enemy1", CAMERA_ID));

        manager.remove_object(TestScene::World, "enemy1");
        assert!(!manager.collisions().is_touching(TestScene::World, "enemy1", CAMERA_ID));

        manager.add_object(TestScene::World, Actor::new("enemy1", &log).solid(0.1, 0.1, 0.1));
        manager.step(0.033, &KeyState::new(), &mut globals);
        assert_eq!(entries(&log, "enter:enemy1").len(), 2);
    }

    #[test]
    fn inter_object_pairs_only_when_enabled() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(
            TestScene::World,
            Actor::new("enemy1", &log).at(9.0, 0.0, 0.0).solid(0.2, 0.2, 0.2),
        );
        manager.add_object(
            TestScene::World,
            Actor::new("bullet", &log).at(9.0, 0.0, 0.0).solid(0.2, 0.2, 0.2),
        );

        manager.step(0.033, &KeyState::new(), &mut globals);
        assert!(entries(&log, "enter").is_empty());

        globals.commands.set_inter_object_collisions(true);
        manager.step(0.033, &KeyState::new(), &mut globals);
        assert!(manager.inter_object_collisions());

        manager.step(0.033, &KeyState::new(), &mut globals);
        assert_eq!(
            entries(&log, "enter"),
            vec!["enter:enemy1:bullet", "enter:bullet:enemy1"]
        );
    }

    #[test]
    fn reset_collision_rearms_enter() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.set_inter_object_collisions(true);
        manager.add_object(TestScene::World, Actor::new("enemy1", &log).at(9.0, 0.0, 0.0).solid(0.2, 0.2, 0.2));
        manager.add_object(TestScene::World, Actor::new("bullet", &log).at(9.0, 0.0, 0.0).solid(0.2, 0.2, 0.2));

        manager.step(0.033, &KeyState::new(), &mut globals);
        globals.commands.reset_collision("enemy1", "bullet");
        manager.step(0.033, &KeyState::new(), &mut globals);
        manager.step(0.033, &KeyState::new(), &mut globals);

        assert_eq!(entries(&log, "enter:enemy1:bullet").len(), 2);
    }

    //--- Scene Switching --------------------------------------------------

    #[test]
    fn switch_runs_leave_hooks_then_enter_hooks() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(TestScene::World, Actor::new("npc0", &log));
        manager.add_object(TestScene::Lobby, Actor::new("priest", &log));

        globals.commands.set_scene(TestScene::Lobby);
        manager.step(0.033, &KeyState::new(), &mut globals);

        assert_eq!(manager.active_scene(), Some(TestScene::Lobby));
        assert_eq!(
            entries(&log, "scene"),
            vec![
                "scene-leave:camera:World",
                "scene-leave:npc0:World",
                "scene-enter:camera:Lobby",
                "scene-enter:priest:Lobby",
            ]
        );
    }

    #[test]
    fn switch_to_unknown_scene_is_ignored() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        let mut globals = globals();
        manager.register_scene(TestScene::World);
        manager.set_scene(TestScene::World, &mut globals);

        manager.set_scene(TestScene::Lobby, &mut globals);

        assert_eq!(manager.active_scene(), Some(TestScene::World));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn duplicate_registration_keeps_objects() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::World).add(Box::new(Actor::new("tree0", &log)));
        manager.register_scene(TestScene::World);
        assert_eq!(manager.scene(TestScene::World).map(Scene::len), Some(1));
    }

    //--- Commands ---------------------------------------------------------

    #[test]
    fn visibility_and_position_commands_target_objects() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(TestScene::Lobby, Actor::new("shotgun", &log).hidden());
        manager.add_object(TestScene::World, Actor::new("bullet", &log));

        globals.commands.set_visible_in(TestScene::Lobby, "shotgun", true);
        globals.commands.set_position("bullet", Some(1.0), None, Some(-2.0));
        globals.commands.set_position(CAMERA_ID, None, Some(0.3), None);
        manager.apply_commands(&mut globals);

        let shotgun = manager.object(Some(TestScene::Lobby), "shotgun");
        assert!(shotgun.is_some_and(|o| o.is_visible()));
        let bullet = manager.object(None, "bullet").map(|o| o.position());
        assert_eq!(bullet, Some(vec3(1.0, 0.0, -2.0)));
        let camera = manager.camera().map(|o| o.position().y);
        assert_eq!(camera, Some(0.3));
    }

    #[test]
    fn spawn_into_unknown_scene_is_dropped() {
        let log = Log::default();
        let mut manager = SceneManager::<TestScene>::new();
        let mut globals = globals();
        manager.register_scene(TestScene::World);
        globals.commands.spawn(TestScene::Lobby, Actor::new("enemy1", &log));
        manager.apply_commands(&mut globals);
        assert!(manager.scene(TestScene::Lobby).is_none());
    }

    //--- Input ------------------------------------------------------------

    #[test]
    fn key_press_reaches_camera_then_visible_objects() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(TestScene::World, Actor::new("npc0", &log));
        manager.add_object(TestScene::World, Actor::new("npc1", &log).hidden());

        manager.dispatch_input(RoutedInput::KeyPressed(KeyCode::Space), &mut globals);

        assert_eq!(
            entries(&log, "key"),
            vec!["key:camera:Space", "key:npc0:Space"]
        );
    }

    #[test]
    fn mouse_buttons_carry_button_and_last_delta() {
        let log = Log::default();
        let (mut manager, mut globals) = world(&log);
        manager.add_object(TestScene::World, Actor::new("npc0", &log));
        globals.clock.last_delta = 0.5;

        manager.dispatch_input(RoutedInput::MouseDown(MouseButton::Left), &mut globals);
        manager.dispatch_input(RoutedInput::MouseUp(MouseButton::Right), &mut globals);

        assert_eq!(
            entries(&log, "mouse"),
            vec![
                "mouse-down:camera:Left:0.5",
                "mouse-down:npc0:Left:0.5",
                "mouse-up:camera:Right:0.5",
                "mouse-up:npc0:Right:0.5",
            ]
        );
    }
}
