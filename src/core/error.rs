//=========================================================================
// Error Types
//=========================================================================
//
// Error enums for every fallible boundary of the engine.
//
// Severity:
// ```text
//   EngineError       fatal       build() or run() fails, no frame runs
//   ContentError      prevented   static content rejected at build time
//   PersistenceError  recovered   logged at warn, default value used
//   RenderError       fatal at build, logged during draw
//   StoreError        raw adapter failure, wrapped by PersistenceError
// ```
//
// Nothing in this module escapes a simulation step.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== RenderError =========================================================

/// Failures reported by a [`Renderer`](crate::core::platform_bridge::Renderer).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    #[error("shader program link failed: {0}")]
    ProgramLink(String),

    #[error("mesh upload failed: {0}")]
    MeshUpload(String),
}

//=== StoreError ==========================================================

/// Raw failures reported by a [`KeyValueStore`](crate::core::platform_bridge::KeyValueStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

//=== PersistenceError ====================================================

/// Failures of the typed progress store. Never fatal.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("value `{value}` stored under `{key}` is not a chapter index")]
    Malformed { key: String, value: String },

    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: StoreError,
    },
}

//=== ContentError ========================================================

/// Invalid static content (meshes and dialog scripts).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("unknown box face `{0}` (expected one of G, C, B, L, R, F)")]
    UnknownFace(char),

    #[error("box face `{0}` listed more than once")]
    DuplicateFace(char),

    #[error("dialog script has no chapters")]
    EmptyScript,

    #[error("dialog chapter {0} has no lines")]
    EmptyChapter(usize),

    #[error("conversation chapter {0} is missing its yes/no branch")]
    MissingBranch(usize),

    #[error("dialog has no lines")]
    EmptyDialog,
}

//=== EngineError =========================================================

/// Errors that abort engine construction.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("renderer construction failed: {0}")]
    Construction(#[from] RenderError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("window event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

//=== Unit Tests ==========================================================
