//=========================================================================
// Conversation Dialog
//=========================================================================
//
// Chaptered narrative that ends in a yes/no question.
//
// Phases:
// ```text
//   Idle ──start──> Showing ──next──> ... ──> AwaitingBranch
//                                               │ yes / no
//                                               v
//                                         BranchShown ──next──> Ended
//                                                           (completion action)
//   any active phase ──end(false)──> Idle
// ```
//
// `yes` and `no` do nothing outside `AwaitingBranch`. `next` while
// awaiting an answer re-shows the question. Completion hands the
// registered action back to the caller, who decides how to apply it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{ChapteredDialog, DialogIo, DialogScript};
use crate::core::error::ContentError;
use crate::core::input::KeyCode;
use crate::core::persistence::ProgressStore;

//=== ConversationPhase ===================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    /// Not running.
    Idle,

    /// Narrative lines before the question.
    Showing,

    /// Question on screen, waiting for yes or no.
    AwaitingBranch,

    /// Reply on screen, waiting for the final `next`.
    BranchShown,

    /// Completed; runs again on the next `start`.
    Ended,
}

//=== ConversationKeys ====================================================

/// Keys that drive a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationKeys {
    pub next: KeyCode,
    pub yes: KeyCode,
    pub no: KeyCode,
}

impl Default for ConversationKeys {
    fn default() -> Self {
        Self {
            next: KeyCode::Space,
            yes: KeyCode::KeyY,
            no: KeyCode::KeyN,
        }
    }
}

//=== ConversationDialog ==================================================

#[derive(Debug, Clone)]
pub struct ConversationDialog<A> {
    narrative: ChapteredDialog,
    branches: Vec<[String; 2]>,
    phase: ConversationPhase,
    keys: ConversationKeys,
    on_end: Option<A>,
}

impl<A: Clone> ConversationDialog<A> {
    /// Builds a conversation. Every chapter of `script` needs a branch.
    pub fn new(
        script: &DialogScript,
        storage_key: Option<&str>,
        progress: &ProgressStore,
    ) -> Result<Self, ContentError> {
        script.require_branches()?;
        let branches = script
            .chapters()
            .iter()
            .filter_map(|chapter| chapter.branch().cloned())
            .collect();

        Ok(Self {
            narrative: ChapteredDialog::new(script, 0, storage_key, progress),
            branches,
            phase: ConversationPhase::Idle,
            keys: ConversationKeys::default(),
            on_end: None,
        })
    }

    /// Replaces the default Space / Y / N bindings.
    pub fn with_keys(mut self, keys: ConversationKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Registers the action returned when the conversation completes.
    pub fn on_end(&mut self, action: A) {
        self.on_end = Some(action);
    }

    //--- Flow -------------------------------------------------------------

    pub fn start(&mut self, io: &mut DialogIo<'_>) {
        self.narrative.show(io);
        self.phase = self.narrative_phase();
        debug!("Conversation started in {:?}", self.phase);
    }

    /// Advances the narrative, or completes after the reply was shown.
    pub fn next(&mut self, io: &mut DialogIo<'_>) -> Option<A> {
        match self.phase {
            ConversationPhase::Idle | ConversationPhase::Ended => None,
            ConversationPhase::Showing | ConversationPhase::AwaitingBranch => {
                self.narrative.next(io);
                self.phase = self.narrative_phase();
                None
            }
            ConversationPhase::BranchShown => self.end(io, true),
        }
    }

    pub fn yes(&mut self, io: &mut DialogIo<'_>) {
        self.answer(io, 0);
    }

    pub fn no(&mut self, io: &mut DialogIo<'_>) {
        self.answer(io, 1);
    }

    /// Stops the conversation and clears the overlay.
    ///
    /// With `run_callback`, returns the completion action. Ending an
    /// inactive conversation does nothing.
    pub fn end(&mut self, io: &mut DialogIo<'_>, run_callback: bool) -> Option<A> {
        if !self.has_started() {
            return None;
        }
        self.narrative.hide(io);
        if run_callback {
            self.phase = ConversationPhase::Ended;
            debug!("Conversation completed");
            self.on_end.clone()
        } else {
            self.phase = ConversationPhase::Idle;
            None
        }
    }

    /// Routes a key press while the conversation is active.
    pub fn handle_key(&mut self, key: KeyCode, io: &mut DialogIo<'_>) -> Option<A> {
        if !self.has_started() {
            return None;
        }
        if key == self.keys.next {
            return self.next(io);
        }
        if key == self.keys.yes {
            self.yes(io);
        } else if key == self.keys.no {
            self.no(io);
        }
        None
    }

    //--- Queries ----------------------------------------------------------

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn has_started(&self) -> bool {
        matches!(
            self.phase,
            ConversationPhase::Showing
                | ConversationPhase::AwaitingBranch
                | ConversationPhase::BranchShown
        )
    }

    /// `true` once a reply was given (until the next `start`).
    pub fn has_answered(&self) -> bool {
        matches!(self.phase, ConversationPhase::BranchShown | ConversationPhase::Ended)
    }

    pub fn narrative(&self) -> &ChapteredDialog {
        &self.narrative
    }

    //--- Internal Helpers -------------------------------------------------

    fn narrative_phase(&self) -> ConversationPhase {
        if self.narrative.is_at_last_line() {
            ConversationPhase::AwaitingBranch
        } else {
            ConversationPhase::Showing
        }
    }

    fn answer(&mut self, io: &mut DialogIo<'_>, reply: usize) {
        if self.phase != ConversationPhase::AwaitingBranch {
            return;
        }
        io.output.show(&self.branches[self.narrative.chapter()][reply]);
        self.phase = ConversationPhase::BranchShown;
    }
}

//=== Unit Tests ==========================================================
