//! Per-mode pagination progress.
//!
//! Exactly one marker exists at a time: the enum makes the inactive mode's
//! state unrepresentable instead of leaving a second, stale struct around.

use crate::core::filters::Mode;

/// Records requested per page, identical across both modes.
pub const PAGE_SIZE: usize = 4;

/// Offset-mode progress: the next page index plus the server-reported
/// totals from the most recent envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetProgress {
    /// Page index the next fetch will request (zero-based).
    pub next_page: u64,
    /// Page index of the most recently applied envelope.
    pub current_page: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
}

/// Cursor-mode progress. `cursor = None` means no page fetched yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorProgress {
    /// Identifier of the last record seen; the next fetch resumes after it.
    pub cursor: Option<i64>,
    pub last: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Offset(OffsetProgress),
    Cursor(CursorProgress),
}

impl Progress {
    /// Fresh progress for a new session in the given mode.
    pub fn new(mode: Mode) -> Self {
        match mode {
            Mode::Offset => Progress::Offset(OffsetProgress::default()),
            Mode::Cursor => Progress::Cursor(CursorProgress::default()),
        }
    }

    /// True once the session has reached the end of the collection.
    pub fn is_last(&self) -> bool {
        match self {
            Progress::Offset(p) => p.last,
            Progress::Cursor(p) => p.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progress_matches_mode() {
        assert_eq!(
            Progress::new(Mode::Offset),
            Progress::Offset(OffsetProgress::default())
        );
        assert_eq!(
            Progress::new(Mode::Cursor),
            Progress::Cursor(CursorProgress::default())
        );
    }

    #[test]
    fn test_fresh_progress_is_not_last() {
        assert!(!Progress::new(Mode::Offset).is_last());
        assert!(!Progress::new(Mode::Cursor).is_last());
    }
}
