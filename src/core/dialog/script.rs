//=========================================================================
// Dialog Script
//=========================================================================
//
// Static dialog content, validated once when it is built.
//
// A script is a list of chapters. Each chapter holds its narrative lines
// and, for conversations, a two-line yes/no branch shown after the last
// narrative line.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::ContentError;

//=== Chapter =============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    lines: Vec<String>,
    branch: Option<[String; 2]>,
}

impl Chapter {
    /// A chapter without a branch.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            branch: None,
        }
    }

    /// Attaches the replies for "yes" and "no".
    pub fn with_branch(mut self, yes: impl Into<String>, no: impl Into<String>) -> Self {
        self.branch = Some([yes.into(), no.into()]);
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn branch(&self) -> Option<&[String; 2]> {
        self.branch.as_ref()
    }
}

//=== DialogScript ========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogScript {
    chapters: Vec<Chapter>,
}

impl DialogScript {
    /// Builds a script, rejecting empty scripts and empty chapters.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self, ContentError> {
        if chapters.is_empty() {
            return Err(ContentError::EmptyScript);
        }
        if let Some(index) = chapters.iter().position(|c| c.lines.is_empty()) {
            return Err(ContentError::EmptyChapter(index));
        }
        Ok(Self { chapters })
    }

    /// Single-chapter script without a branch.
    pub fn single<I, S>(lines: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(vec![Chapter::new(lines)])
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Fails unless every chapter carries a yes/no branch.
    pub fn require_branches(&self) -> Result<(), ContentError> {
        match self.chapters.iter().position(|c| c.branch.is_none()) {
            Some(index) => Err(ContentError::MissingBranch(index)),
            None => Ok(()),
        }
    }
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_script() {
        assert_eq!(DialogScript::new(vec![]), Err(ContentError::EmptyScript));
    }

    #[test]
    fn rejects_empty_chapter() {
        let chapters = vec![Chapter::new(["a"]), Chapter::new(Vec::<String>::new())];
        assert_eq!(DialogScript::new(chapters), Err(ContentError::EmptyChapter(1)));
    }

    #[test]
    fn branch_requirement_names_first_offender() {
        let script = DialogScript::new(vec![
            Chapter::new(["q?"]).with_branch("yes", "no"),
            Chapter::new(["next"]),
        ])
        .unwrap();
        assert_eq!(script.require_branches(), Err(ContentError::MissingBranch(1)));
    }
}
