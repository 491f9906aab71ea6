//! What the candidate popup should show. Rendering is left to the caller.

use tsuzuri_core::conversion::ConversionEngine;

use crate::segments::SegmentModel;

/// Candidates listed per popup page.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupModel {
    /// Emulated preedit while composing.
    Composing { text: String, cursor: usize },
    Selecting(SelectingPopup),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectingPopup {
    /// Selected candidate of every segment, present when the preedit is
    /// emulated in the popup.
    pub segments: Option<Vec<String>>,
    pub current_segment: usize,
    pub page: CandidatePage,
}

/// The page of candidates around the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePage {
    /// Candidate index of the first entry.
    pub first: usize,
    pub candidates: Vec<String>,
    /// Candidate index of the selection.
    pub selected: usize,
    /// Candidates in the segment, across all pages.
    pub total: usize,
}

impl CandidatePage {
    pub fn new(engine: &dyn ConversionEngine, segment: usize, selected: usize) -> Self {
        let total = engine.candidate_count(segment);
        let first = selected / PAGE_SIZE * PAGE_SIZE;
        let candidates = (first..total.min(first + PAGE_SIZE))
            .map(|i| engine.candidate_text(segment, i))
            .collect();
        Self {
            first,
            candidates,
            selected,
            total,
        }
    }

    /// Numbered labels ("1. 今日") with whether each one is selected.
    pub fn labels(&self) -> impl Iterator<Item = (String, bool)> + '_ {
        self.candidates.iter().enumerate().map(move |(i, text)| {
            (format!("{}. {}", i + 1, text), self.first + i == self.selected)
        })
    }
}

impl SelectingPopup {
    pub(crate) fn new(
        engine: &dyn ConversionEngine,
        model: &SegmentModel,
        show_segments: bool,
    ) -> Self {
        let current_segment = model.current_index();
        Self {
            segments: show_segments.then(|| model.selected_texts(engine)),
            current_segment,
            page: CandidatePage::new(engine, current_segment, model.current().selected),
        }
    }
}
