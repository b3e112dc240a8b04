//=========================================================================
// Chapel Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [winit]
//         │                          │
//         ├─ with_fps()              ├─ on_frame(now)     host frame callback
//         ├─ with_viewport()         ├─ handle_input(ev)  immediate dispatch
//         ├─ with_projection()       ├─ pump(collector)   channel-fed hosts
//         ├─ with_shaders()          └─ resize(w, h)      projection rebuild
//         └─ with_inter_object_collisions()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};
use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use crate::core::audio::SoundBoard;
use crate::core::error::{EngineError, RenderError};
use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::input::InputEvent;
use crate::core::math::{MatrixMode, TransformStack};
use crate::core::persistence::ProgressStore;
use crate::core::platform_bridge::{
    AudioTrigger, DialogOutput, EventCollector, KeyValueStore, MeshHandle, Renderer, TickControl,
};
use crate::core::render::{Frame, MeshData, FRAGMENT_SHADER, VERTEX_SHADER};
use crate::core::scene::{SceneKey, SceneManager};
use crate::platform::Platform;

//=== Projection ==========================================================

/// Perspective parameters applied on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: 90.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

//=== Services ============================================================

/// Host services other than the renderer.
pub struct Services {
    sound: SoundBoard,
    overlay: Box<dyn DialogOutput>,
    progress: ProgressStore,
}

impl Services {
    pub fn new<A, O, K>(audio: A, overlay: O, store: K) -> Self
    where
        A: AudioTrigger + 'static,
        O: DialogOutput + 'static,
        K: KeyValueStore + 'static,
    {
        Self {
            sound: SoundBoard::new(audio),
            overlay: Box::new(overlay),
            progress: ProgressStore::new(store),
        }
    }

    /// Silent audio, a discarding overlay and in-memory progress.
    pub fn headless() -> Self {
        Self {
            sound: SoundBoard::silent(),
            overlay: Box::new(DiscardOverlay),
            progress: ProgressStore::in_memory(),
        }
    }
}

struct DiscardOverlay;

impl DialogOutput for DiscardOverlay {
    fn show(&mut self, _text: &str) {}

    fn clear(&mut self) {}
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **FPS**: 30 steps per second
/// - **Viewport**: 800 x 600
/// - **Projection**: 90° field of view, near 0.01, far 1000
/// - **Inter-object collisions**: off
///
/// # Examples
///
/// ```no_run
/// # use chapel_engine::prelude::*;
/// # use chapel_engine::core::platform_bridge::{MeshHandle, Uniforms};
/// # use chapel_engine::core::render::MeshData;
/// # struct R;
/// # impl Renderer for R {
/// #     fn compile_program(&mut self, _: &str, _: &str) -> Result<(), RenderError> { unimplemented!() }
/// #     fn upload_mesh(&mut self, _: &MeshData) -> Result<MeshHandle, RenderError> { unimplemented!() }
/// #     fn set_viewport(&mut self, _: u32, _: u32) {}
/// #     fn begin_frame(&mut self) {}
/// #     fn draw_indexed(&mut self, _: MeshHandle, _: &Uniforms) {}
/// # }
/// # fn renderer() -> impl Renderer { R }
/// # fn main() -> Result<(), EngineError> {
/// let engine = EngineBuilder::<Chapel>::new()
///     .with_fps(30)
///     .with_viewport(1280, 720)
///     .build(renderer(), Services::headless())?
///     .init(build_world)?;
/// # Ok(())
/// # }
/// ```
pub struct EngineBuilder<S: SceneKey> {
    fps: u32,
    viewport: (u32, u32),
    projection: Projection,
    inter_object_collisions: bool,
    shaders: (String, String),
    _phantom: std::marker::PhantomData<S>,
}

impl<S: SceneKey> EngineBuilder<S> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fps: 30,
            viewport: (800, 600),
            projection: Projection::default(),
            inter_object_collisions: false,
            shaders: (VERTEX_SHADER.to_string(), FRAGMENT_SHADER.to_string()),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target steps per second.
    ///
    /// Default: 30
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert!(fps > 0, "FPS must be positive, got {}", fps);
        self.fps = fps;
        self
    }

    /// Sets the initial drawable size used for the first projection.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Viewport must be non-empty");
        self.viewport = (width, height);
        self
    }

    /// Sets the perspective parameters.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < fov < 180` and `0 < near < far`.
    pub fn with_projection(mut self, fov: f32, near: f32, far: f32) -> Self {
        assert!(fov > 0.0 && fov < 180.0, "Field of view must be in (0, 180), got {}", fov);
        assert!(near > 0.0 && near < far, "Clip planes must satisfy 0 < near < far");
        self.projection = Projection { fov, near, far };
        self
    }

    pub fn with_inter_object_collisions(mut self, enabled: bool) -> Self {
        self.inter_object_collisions = enabled;
        self
    }

    /// Replaces the built-in shader sources.
    pub fn with_shaders(mut self, vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.shaders = (vertex.into(), fragment.into());
        self
    }

    /// Builds the engine.
    ///
    /// Compiles the shader program and applies the initial projection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Construction`] if the renderer rejects the
    /// shader program.
    pub fn build<R>(self, renderer: R, services: Services) -> Result<Engine<S>, EngineError>
    where
        R: Renderer + 'static,
    {
        info!(
            "Building engine (FPS: {}, viewport: {}x{})",
            self.fps, self.viewport.0, self.viewport.1
        );

        let mut renderer: Box<dyn Renderer> = Box::new(renderer);
        renderer.compile_program(&self.shaders.0, &self.shaders.1)?;

        let mut systems = GlobalSystems::new(self.fps);
        systems
            .scene_manager
            .set_inter_object_collisions(self.inter_object_collisions);

        let mut engine = Engine {
            systems,
            context: GlobalContext::from_parts(services.sound, services.overlay, services.progress),
            renderer,
            transforms: TransformStack::new(),
            projection: self.projection,
            viewport: self.viewport,
        };
        engine.resize(self.viewport.0, self.viewport.1);
        Ok(engine)
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Setup ===============================================================

/// What world construction gets besides the scene manager.
pub struct Setup<'a, S: SceneKey> {
    renderer: &'a mut dyn Renderer,
    globals: &'a mut GlobalContext<S>,
}

impl<'a, S: SceneKey> Setup<'a, S> {
    /// Uploads static geometry once.
    pub fn upload(&mut self, mesh: &MeshData) -> Result<MeshHandle, RenderError> {
        self.renderer.upload_mesh(mesh)
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.globals.progress
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.globals.rng
    }

    pub fn globals(&mut self) -> &mut GlobalContext<S> {
        self.globals
    }
}

//=== Engine ==============================================================

/// Chapel engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine
///   ├─► GlobalSystems   InputRouter, FrameLoop, SceneManager
///   ├─► GlobalContext   GameState, CommandQueue, sound, overlay, progress
///   └─► Renderer        + TransformStack (projection / model-view)
/// ```
pub struct Engine<S: SceneKey> {
    systems: GlobalSystems<S>,
    context: GlobalContext<S>,
    renderer: Box<dyn Renderer>,
    transforms: TransformStack,
    projection: Projection,
    viewport: (u32, u32),
}

impl<S: SceneKey> Engine<S> {
    //--- Initialization ---------------------------------------------------

    /// Populates scenes before the first frame.
    ///
    /// # Errors
    ///
    /// Propagates whatever `init_fn` returns (mesh uploads, content).
    pub fn init<F>(mut self, init_fn: F) -> Result<Self, EngineError>
    where
        F: FnOnce(&mut SceneManager<S>, &mut Setup<'_, S>) -> Result<(), EngineError>,
    {
        info!("Initializing world");

        let mut setup = Setup {
            renderer: &mut *self.renderer,
            globals: &mut self.context,
        };
        init_fn(&mut self.systems.scene_manager, &mut setup)?;

        info!("World initialization complete");
        Ok(self)
    }

    /// Activates the first scene, running its enter hooks.
    pub fn start(&mut self, scene: S) {
        info!("Starting in scene {:?}", scene);
        self.systems.scene_manager.set_scene(scene, &mut self.context);
        self.systems.scene_manager.apply_commands(&mut self.context);
    }

    //--- Host Entry Points ------------------------------------------------

    /// Host frame callback. Runs and renders a step if one is due.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        let stepped = self.systems.tick(now_ms, &mut self.context);
        if stepped {
            self.render();
        }
        stepped
    }

    /// Routes one host input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some((width, height)) = self.systems.handle_input(event, &mut self.context) {
            self.resize(width, height);
        }
    }

    /// Drops held keys and mutes audio while the host is unfocused.
    pub fn focus_changed(&mut self, focused: bool) {
        self.context.sound.set_muted(!focused);
        if !focused {
            debug!("Focus lost, releasing held keys");
            self.systems.input.release_all();
        }
    }

    /// Drains a channel-fed host's events for this frame.
    pub fn pump(&mut self, collector: &mut EventCollector) -> TickControl {
        let control = collector.collect_frame();
        if let Some(focused) = collector.focus_change() {
            self.focus_changed(focused);
        }
        for event in collector.take_inputs() {
            self.handle_input(event);
        }
        control
    }

    /// Updates the viewport and rebuilds the projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("Ignoring empty resize {}x{}", width, height);
            return;
        }
        self.viewport = (width, height);
        self.renderer.set_viewport(width, height);

        let p = self.projection;
        self.transforms.set_mode(MatrixMode::Projection);
        self.transforms.load_identity();
        self.transforms
            .perspective(p.fov, width as f32 / height as f32, p.near, p.far);
        self.transforms.set_mode(MatrixMode::ModelView);
    }

    /// Draws the active scene.
    pub fn render(&mut self) {
        self.renderer.begin_frame();
        self.transforms.set_mode(MatrixMode::ModelView);
        self.transforms.load_identity();

        let sky = self.context.state.sky;
        let mut frame = Frame::new(&mut self.transforms, &mut *self.renderer, sky);
        self.systems.scene_manager.draw(&mut frame);

        debug_assert_eq!(
            self.transforms.depth(MatrixMode::ModelView),
            0,
            "object draw left the model-view stack unbalanced"
        );
    }

    /// Opens a window and drives the engine from its event loop until
    /// the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EventLoop`] if the event loop cannot start.
    pub fn run(self, title: &str) -> Result<(), EngineError> {
        info!("Starting engine runtime (FPS: {})", self.systems.frames.fps());
        Platform::new(self, title).run()?;
        info!("Engine shutdown complete");
        Ok(())
    }

    //--- Accessors --------------------------------------------------------

    pub fn scene_manager(&self) -> &SceneManager<S> {
        &self.systems.scene_manager
    }

    pub fn scene_manager_mut(&mut self) -> &mut SceneManager<S> {
        &mut self.systems.scene_manager
    }

    pub fn context(&self) -> &GlobalContext<S> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GlobalContext<S> {
        &mut self.context
    }

    pub fn systems(&self) -> &GlobalSystems<S> {
        &self.systems
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn transforms(&self) -> &TransformStack {
        &self.transforms
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};
    use crate::core::persistence::MemoryStore;
    use crate::core::platform_bridge::{PlatformEvent, Uniforms};
    use crate::core::render::plane;
    use cgmath::SquareMatrix;
    use crate::platform::channels::ChannelAudio;
    use crossbeam_channel::unbounded;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    #[derive(Default)]
    struct Calls {
        compiled: usize,
        uploads: usize,
        viewports: Vec<(u32, u32)>,
        frames: usize,
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Calls>>,
        reject_shaders: bool,
    }

    impl Renderer for Recorder {
        fn compile_program(&mut self, _: &str, _: &str) -> Result<(), RenderError> {
            if self.reject_shaders {
                return Err(RenderError::ShaderCompile("0:1 syntax error".to_string()));
            }
            self.calls.borrow_mut().compiled += 1;
            Ok(())
        }
        fn upload_mesh(&mut self, _: &MeshData) -> Result<MeshHandle, RenderError> {
            let mut calls = self.calls.borrow_mut();
            calls.uploads += 1;
            Ok(MeshHandle(calls.uploads as u32))
        }
        fn set_viewport(&mut self, width: u32, height: u32) {
            self.calls.borrow_mut().viewports.push((width, height));
        }
        fn begin_frame(&mut self) {
            self.calls.borrow_mut().frames += 1;
        }
        fn draw_indexed(&mut self, _: MeshHandle, _: &Uniforms) {}
    }

    fn engine(recorder: &Recorder) -> Engine<TestScene> {
        match EngineBuilder::new().build(recorder.clone(), Services::headless()) {
            Ok(engine) => engine,
            Err(e) => panic!("build failed: {}", e),
        }
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<TestScene>::new();
        assert_eq!(builder.fps, 30);
        assert_eq!(builder.viewport, (800, 600));
        assert_eq!(builder.projection, Projection::default());
        assert!(!builder.inter_object_collisions);
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn builder_with_fps_panics_on_zero() {
        EngineBuilder::<TestScene>::new().with_fps(0);
    }

    #[test]
    #[should_panic(expected = "Clip planes")]
    fn builder_rejects_inverted_clip_planes() {
        EngineBuilder::<TestScene>::new().with_projection(90.0, 10.0, 1.0);
    }

    #[test]
    fn build_compiles_program_and_sets_viewport() {
        let recorder = Recorder::default();
        let engine = engine(&recorder);

        let calls = recorder.calls.borrow();
        assert_eq!(calls.compiled, 1);
        assert_eq!(calls.viewports, vec![(800, 600)]);
        assert_ne!(
            engine.transforms().matrix(MatrixMode::Projection),
            crate::core::math::Matrix4::identity()
        );
    }

    #[test]
    fn build_fails_when_shaders_are_rejected() {
        let recorder = Recorder {
            reject_shaders: true,
            ..Recorder::default()
        };
        let result = EngineBuilder::<TestScene>::new().build(recorder, Services::headless());
        assert!(matches!(
            result,
            Err(EngineError::Construction(RenderError::ShaderCompile(_)))
        ));
    }

    #[test]
    fn builder_flags_reach_scene_manager() {
        let engine = EngineBuilder::<TestScene>::new()
            .with_inter_object_collisions(true)
            .build(Recorder::default(), Services::headless());
        assert!(engine.is_ok_and(|e| e.scene_manager().inter_object_collisions()));
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_uploads_and_registers() {
        let recorder = Recorder::default();
        let result = engine(&recorder).init(|scenes, setup| {
            setup.upload(&plane(0.0, 0.0, 120.0, 248.0, 0.13, 0.30))?;
            scenes.register_scene(TestScene::Main);
            Ok(())
        });

        let mut engine = match result {
            Ok(engine) => engine,
            Err(e) => panic!("init failed: {}", e),
        };
        engine.start(TestScene::Main);

        assert_eq!(recorder.calls.borrow().uploads, 1);
        assert_eq!(engine.scene_manager().active_scene(), Some(TestScene::Main));
    }

    #[test]
    fn init_errors_propagate() {
        let result = engine(&Recorder::default())
            .init(|_, _| Err(EngineError::from(crate::core::error::ContentError::EmptyScript)));
        assert!(matches!(result, Err(EngineError::Content(_))));
    }

    #[test]
    fn on_frame_renders_only_when_stepping() {
        let recorder = Recorder::default();
        let mut engine = engine(&recorder);
        engine.scene_manager_mut().register_scene(TestScene::Main);
        engine.start(TestScene::Main);

        let stepped: Vec<bool> = [0.0, 10.0, 40.0, 41.0]
            .into_iter()
            .map(|now| engine.on_frame(now))
            .collect();

        assert_eq!(stepped, vec![false, false, true, false]);
        assert_eq!(recorder.calls.borrow().frames, 1);
        assert!((engine.context().clock.last_delta - 0.040).abs() < 1e-6);
    }

    #[test]
    fn resize_event_rebuilds_projection() {
        let recorder = Recorder::default();
        let mut engine = engine(&recorder);

        engine.handle_input(InputEvent::Resized {
            width: 1024,
            height: 512,
        });
        engine.handle_input(InputEvent::Resized { width: 0, height: 0 });

        assert_eq!(recorder.calls.borrow().viewports, vec![(800, 600), (1024, 512)]);
        assert_eq!(engine.viewport(), (1024, 512));
        let p = engine.transforms().matrix(MatrixMode::Projection);
        assert!((p.y.y / p.x.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn pump_feeds_inputs_and_reports_close() {
        let mut engine = engine(&Recorder::default());
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        let press = InputEvent::KeyDown {
            key: KeyCode::KeyW,
            modifiers: Modifiers::NONE,
        };
        let _ = tx.send(PlatformEvent::Input(press));
        assert!(matches!(engine.pump(&mut collector), TickControl::Continue));
        assert!(engine.systems().input.keys().is_down(KeyCode::KeyW));

        let _ = tx.send(PlatformEvent::FocusChanged(false));
        let _ = tx.send(PlatformEvent::WindowClosed);
        assert!(matches!(engine.pump(&mut collector), TickControl::Exit));
        assert!(!engine.systems().input.keys().is_down(KeyCode::KeyW));
    }

    #[test]
    fn unfocused_engine_stays_silent() {
        let (tx, rx) = unbounded();
        let services = Services::new(ChannelAudio::new(tx), DiscardOverlay, MemoryStore::new());
        let mut engine = match EngineBuilder::<TestScene>::new().build(Recorder::default(), services) {
            Ok(engine) => engine,
            Err(e) => panic!("build failed: {}", e),
        };

        engine.focus_changed(false);
        engine.context_mut().sound.play("steps");
        assert!(rx.try_recv().is_err());

        engine.focus_changed(true);
        engine.context_mut().sound.play("steps");
        assert_eq!(rx.try_recv().ok().as_deref(), Some("steps"));
    }
}
