//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the host (window, GPU, audio, storage, text overlay) with the
// engine core.
//
// Components:
// - `interface`: adapter traits and shared value types (the contract)
// - `event_collector`: core-side draining of the host event channel
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{
    AudioTrigger, DialogOutput, KeyValueStore, MeshHandle, PlatformEvent, Renderer, Uniforms,
};
