//=========================================================================
// Platform Subsystem
//
// Drives an `Engine` from a Winit window on the calling thread.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌────────────────────────────────────────────┐
//  │  Winit Event Loop                          │
//  │   ├─ WindowEvent  ─┐                       │
//  │   └─ DeviceEvent  ─┤                       │
//  │                    ↓                       │
//  │               InputProcessor               │
//  │                    ↓ InputEvent            │
//  │               Engine::handle_input         │
//  │                                            │
//  │   RedrawRequested → Engine::on_frame(ms)   │
//  │                      ↓ (step due?)         │
//  │                    update → collide →      │
//  │                    commands → render       │
//  └────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: the host frame timestamp feeds
//   the fixed-step loop; redraws are requested continuously
// - **Sticky modifiers**: Modifier state persists across events until
//   explicitly changed (matches platform behavior)
// - **Pointer grab on click**: mouse-look reads raw device motion and
//   only while the cursor is grabbed
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
// Channel-fed hosts that own their own loop use `Engine::pump` with an
// `EventCollector` instead; `channels` provides the matching overlay
// and audio adapters.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod channels;
mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::error::EngineError;
use crate::core::scene::SceneKey;
use crate::engine::Engine;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and event pump for a single engine.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(engine, title)`
/// 2. **Execution**: `platform.run()` blocks in the Winit event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: User closes window → loop exits → `run` returns
///
/// # Fields
///
/// - `window`: Created lazily in `resumed()` (mobile compatibility)
/// - `started`: Origin of the millisecond timestamps passed to `on_frame`
/// - `grabbed`: Whether the cursor is currently captured for mouse-look
pub(crate) struct Platform<S: SceneKey> {
    engine: Engine<S>,

    title: String,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    input_processor: InputProcessor,

    started: Instant,

    grabbed: bool,
}

impl<S: SceneKey> Platform<S> {
    //--- Construction -----------------------------------------------------

    /// Wraps `engine`. Does not create the window yet.
    pub(crate) fn new(engine: Engine<S>, title: &str) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            engine,
            title: title.to_owned(),
            window: None,
            input_processor: InputProcessor::new(),
            started: Instant::now(),
            grabbed: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EventLoop`] if the loop cannot be created or
    /// terminates abnormally.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub(crate) fn run(mut self) -> Result<(), EngineError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn grab_cursor(&mut self) {
        let Some(window) = &self.window else { return };

        let grab = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

        match grab {
            Ok(()) => {
                window.set_cursor_visible(false);
                self.grabbed = true;
                debug!(target: "platform::input", "Cursor grabbed");
            }
            Err(e) => warn!(target: "platform::input", "Cursor grab unavailable: {}", e),
        }
    }

    fn release_cursor(&mut self) {
        if !self.grabbed {
            return;
        }
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        self.grabbed = false;
        debug!(target: "platform::input", "Cursor released");
    }
}

//=== Winit Integration ===================================================

impl<S: SceneKey> ApplicationHandler for Platform<S> {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.engine.viewport();
        let attrs = WindowAttributes::default()
            .with_title(self.title.as_str())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => {
                if !focused {
                    self.release_cursor();
                }
                self.engine.focus_changed(focused);
            }

            WindowEvent::Resized(size) => {
                let event = self.input_processor.process_resize(size);
                self.engine.handle_input(event);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(&key_event) {
                    Some(event) => self.engine.handle_input(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if state == ElementState::Pressed && !self.grabbed {
                    self.grab_cursor();
                }
                let event = self.input_processor.process_mouse_button(button, state);
                self.engine.handle_input(event);
            }

            WindowEvent::RedrawRequested => {
                let now = self.now_ms();
                self.engine.on_frame(now);

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    /// Forwards raw pointer motion while the cursor is grabbed.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.grabbed {
                let event = self.input_processor.process_motion(dx, dy);
                self.engine.handle_input(event);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
