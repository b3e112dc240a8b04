//=========================================================================
// Dialog Engine
//=========================================================================
//
// Text-driven narrative built by composition.
//
// Architecture:
// ```text
//   DialogScript ─ chapters of lines (+ optional yes/no branch)
//
//   LinearDialog        one list of lines, clamped cursor
//     └─ ChapteredDialog   one LinearDialog per chapter + saved progress
//          └─ ConversationDialog<A>   + yes/no branch + completion action
//   RandomDialog        uniform pick on every show
// ```
//
// Every dialog writes through a `DialogIo`, which bundles the overlay
// text sink with the progress store so dialogs never own host state.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod chaptered;
pub mod conversation;
pub mod linear;
pub mod random;
pub mod script;

//=== Public API ==========================================================

pub use chaptered::ChapteredDialog;
pub use conversation::{ConversationDialog, ConversationKeys, ConversationPhase};
pub use linear::LinearDialog;
pub use random::RandomDialog;
pub use script::{Chapter, DialogScript};

//=== Internal Dependencies ===============================================

use crate::core::persistence::ProgressStore;
use crate::core::platform_bridge::DialogOutput;

//=== DialogIo ============================================================

/// Host services a dialog needs while it runs.
pub struct DialogIo<'a> {
    pub output: &'a mut dyn DialogOutput,
    pub progress: &'a mut ProgressStore,
}

impl<'a> DialogIo<'a> {
    pub fn new(output: &'a mut dyn DialogOutput, progress: &'a mut ProgressStore) -> Self {
        Self { output, progress }
    }
}

//=== Test Support ========================================================
