//=========================================================================
// Chaptered Dialog
//=========================================================================
//
// A sequence of linear chapters with persisted progress.
//
// The chapter to play is read once at construction: whatever is stored
// under the storage key, or the caller's start index when nothing usable
// is stored, clamped to the last chapter. Reaching the last line of the
// current chapter unlocks the next one for future runs. The chapter being
// played does not change mid-session.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{DialogIo, DialogScript, LinearDialog};
use crate::core::persistence::ProgressStore;

//=== ChapteredDialog =====================================================

#[derive(Debug, Clone)]
pub struct ChapteredDialog {
    chapters: Vec<LinearDialog>,
    chapter: usize,
    storage_key: Option<String>,
    progress_saved: bool,
}

impl ChapteredDialog {
    /// Builds the dialog and resolves the starting chapter.
    ///
    /// Without a storage key, progress is neither read nor written.
    pub fn new(
        script: &DialogScript,
        start_index: usize,
        storage_key: Option<&str>,
        progress: &ProgressStore,
    ) -> Self {
        let chapters: Vec<LinearDialog> = script
            .chapters()
            .iter()
            .filter_map(|chapter| LinearDialog::new(chapter.lines().iter().cloned()).ok())
            .collect();

        let mut dialog = Self {
            chapters,
            chapter: 0,
            storage_key: storage_key.map(str::to_string),
            progress_saved: false,
        };
        dialog.chapter = dialog.resolve_chapter(start_index, progress);
        dialog
    }

    //--- Playback ---------------------------------------------------------

    /// Shows the current line, unlocking the next chapter on the last line.
    pub fn show(&mut self, io: &mut DialogIo<'_>) {
        self.current().show(io);
        if self.current().is_at_last_line() {
            self.save_progress(io.progress);
        }
    }

    /// Advances within the chapter (clamped) and shows.
    pub fn next(&mut self, io: &mut DialogIo<'_>) {
        self.current_mut().advance();
        self.show(io);
    }

    /// Clears the overlay and rewinds the current chapter.
    pub fn hide(&mut self, io: &mut DialogIo<'_>) {
        self.current_mut().hide(io);
        self.progress_saved = false;
    }

    /// Re-reads the stored chapter, e.g. after another dialog wrote it.
    pub fn reload(&mut self, progress: &ProgressStore) {
        self.chapter = self.resolve_chapter(self.chapter, progress);
    }

    //--- Queries ----------------------------------------------------------

    pub fn chapter(&self) -> usize {
        self.chapter
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn current_index(&self) -> usize {
        self.current().current_index()
    }

    pub fn is_at_last_line(&self) -> bool {
        self.current().is_at_last_line()
    }

    pub fn storage_key(&self) -> Option<&str> {
        self.storage_key.as_deref()
    }

    //--- Internal Helpers -------------------------------------------------

    fn current(&self) -> &LinearDialog {
        &self.chapters[self.chapter]
    }

    fn current_mut(&mut self) -> &mut LinearDialog {
        &mut self.chapters[self.chapter]
    }

    fn last_chapter(&self) -> usize {
        self.chapters.len().saturating_sub(1)
    }

    fn resolve_chapter(&self, fallback: usize, progress: &ProgressStore) -> usize {
        let chapter = match &self.storage_key {
            Some(key) => progress.load_chapter(key, fallback),
            None => fallback,
        };
        chapter.min(self.last_chapter())
    }

    fn save_progress(&mut self, progress: &mut ProgressStore) {
        if self.progress_saved {
            return;
        }
        self.progress_saved = true;

        let unlocked = (self.chapter + 1).min(self.last_chapter());
        if let Some(key) = &self.storage_key {
            debug!("Chapter {} of `{}` complete", self.chapter, key);
            progress.save_chapter(key, unlocked);
        }
    }
}

//=== Unit Tests ==========================================================
