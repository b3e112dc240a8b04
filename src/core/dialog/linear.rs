//=========================================================================
// Linear Dialog
//=========================================================================

//=== Internal Dependencies ===============================================

use super::DialogIo;
use crate::core::error::ContentError;

//=== LinearDialog ========================================================

/// Lines shown one after another. The cursor never leaves `[0, len-1]`.
///
/// # Examples
///
/// ```
/// use chapel_engine::core::dialog::LinearDialog;
///
/// let mut dialog = LinearDialog::new(["a", "b"]).unwrap();
/// dialog.reset(7);
/// assert_eq!(dialog.current_index(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LinearDialog {
    lines: Vec<String>,
    cursor: usize,
}

impl LinearDialog {
    /// Fails with [`ContentError::EmptyDialog`] if `lines` is empty.
    pub fn new<I, S>(lines: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return Err(ContentError::EmptyDialog);
        }
        Ok(Self { lines, cursor: 0 })
    }

    /// Writes the current line to the overlay.
    pub fn show(&self, io: &mut DialogIo<'_>) {
        io.output.show(&self.lines[self.cursor]);
    }

    /// Advances (clamped at the last line) and shows.
    pub fn next(&mut self, io: &mut DialogIo<'_>) {
        self.advance();
        self.show(io);
    }

    /// Clears the overlay and rewinds to the first line.
    pub fn hide(&mut self, io: &mut DialogIo<'_>) {
        io.output.clear();
        self.cursor = 0;
    }

    /// Moves the cursor to `index`, clamped to the last line.
    pub fn reset(&mut self, index: usize) {
        self.cursor = index.min(self.last_index());
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor]
    }

    pub fn is_at_last_line(&self) -> bool {
        self.cursor == self.last_index()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`; construction rejects empty dialogs.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(super) fn advance(&mut self) {
        self.cursor = (self.cursor + 1).min(self.last_index());
    }

    fn last_index(&self) -> usize {
        self.lines.len() - 1
    }
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dialog::testing::Transcript;
    use crate::core::persistence::ProgressStore;

    #[test]
    fn empty_dialog_is_rejected() {
        assert!(matches!(
            LinearDialog::new(Vec::<String>::new()),
            Err(ContentError::EmptyDialog)
        ));
    }

    #[test]
    fn cursor_stays_in_bounds_for_any_number_of_next_calls() {
        let mut out = Transcript::default();
        let mut progress = ProgressStore::in_memory();
        let mut io = DialogIo::new(&mut out, &mut progress);

        let mut dialog = LinearDialog::new(["one", "two", "three"]).unwrap();
        for _ in 0..50 {
            dialog.next(&mut io);
            assert!(dialog.current_index() < dialog.len());
        }
        assert_eq!(dialog.current_index(), 2);
        assert_eq!(out.visible(), Some("three"));
    }

    #[test]
    fn hide_clears_and_rewinds() {
        let mut out = Transcript::default();
        let mut progress = ProgressStore::in_memory();
        let mut io = DialogIo::new(&mut out, &mut progress);

        let mut dialog = LinearDialog::new(["one", "two"]).unwrap();
        dialog.next(&mut io);
        dialog.hide(&mut io);
        assert_eq!(dialog.current_index(), 0);
        assert_eq!(out.visible(), None);
    }

    #[test]
    fn show_writes_current_line() {
        let mut out = Transcript::default();
        let mut progress = ProgressStore::in_memory();
        let mut io = DialogIo::new(&mut out, &mut progress);

        let mut dialog = LinearDialog::new(["one", "two"]).unwrap();
        dialog.reset(1);
        dialog.show(&mut io);
        assert_eq!(out.events, vec![Some("two".to_string())]);
    }
}
