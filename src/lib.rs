//=========================================================================
// Chapel Engine Library Root
//
// This crate defines the public API surface of the Chapel engine and the
// game that ships with it.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the reusable core (scenes, collision, dialogs, matrix stack)
// - Ship the chapel game content built on top of the core
// - Keep the winit integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use chapel_engine::prelude::*;
//
// # fn renderer() -> impl Renderer { unimplemented!() }
// fn main() -> Result<(), EngineError> {
//     let mut engine = EngineBuilder::<Chapel>::new()
//         .build(renderer(), Services::headless())?
//         .init(build_world)?;
//     engine.start(Chapel::Lobby);
//     engine.run("Chapel")
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine systems: input routing, the fixed-step loop,
// scenes and collision, the transform stack, dialogs and the ports the
// host implements.
//
// `game` is the chapel game: its scenes, objects and dialog scripts.
//
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window and event loop integration and is
// kept private; only its channel adapters are re-exported.
//
// `engine` defines the builder and the runtime facade.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, Projection, Services, Setup};
pub use platform::channels::{ChannelAudio, ChannelOverlay, OverlayEvent};
