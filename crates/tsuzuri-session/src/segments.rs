use std::ops::Range;

use tracing::debug;
use tsuzuri_core::conversion::ConversionEngine;

use crate::types::Direction;

/// One conversion segment: how many candidates the engine offers and which
/// one is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Segment {
    pub candidate_count: usize,
    pub selected: usize,
}

/// Per-segment selection state layered over a [`ConversionEngine`].
///
/// The engine decides segmentation and candidates. This side only tracks
/// the selected candidate per segment and which segment is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentModel {
    segments: Vec<Segment>,
    current: usize,
}

impl SegmentModel {
    /// Feed `text` to a freshly reset engine and select the first candidate
    /// of every segment.
    pub fn begin(engine: &mut dyn ConversionEngine, text: &str) -> Self {
        engine.reset();
        engine.set_source_text(text);
        let count = engine.segment_count();
        assert!(count > 0, "conversion engine produced no segments for {text:?}");
        let segments = (0..count)
            .map(|i| Segment {
                candidate_count: engine.candidate_count(i),
                selected: 0,
            })
            .collect();
        debug!(text, segments = count, "begin selection");
        Self {
            segments,
            current: 0,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Segment {
        &self.segments[self.current]
    }

    /// Move the end of the current segment by `delta` and pick up the new
    /// segmentation. Selections of segments that still exist are kept;
    /// segments the engine added start at their first candidate.
    pub fn resize_current(&mut self, engine: &mut dyn ConversionEngine, delta: i32) {
        engine.resize_segment(self.current, delta);
        let count = engine.segment_count();
        assert!(count > 0, "conversion engine dropped every segment on resize");
        self.segments.resize(count, Segment::default());
        for (i, segment) in self.segments.iter_mut().enumerate() {
            segment.candidate_count = engine.candidate_count(i);
            if segment.selected >= segment.candidate_count {
                segment.selected = segment.candidate_count.saturating_sub(1);
            }
        }
        self.current = self.current.min(count - 1);
    }

    /// Step the current segment's selection, stopping at either end.
    pub fn cycle_candidate(&mut self, engine: &dyn ConversionEngine, direction: Direction) {
        self.assert_in_sync(engine);
        let segment = &mut self.segments[self.current];
        segment.candidate_count = engine.candidate_count(self.current);
        segment.selected = match direction {
            Direction::Backward => segment.selected.saturating_sub(1),
            Direction::Forward if segment.selected + 1 < segment.candidate_count => {
                segment.selected + 1
            }
            Direction::Forward => segment.selected,
        };
    }

    /// Fix the current segment's selection in the engine, then move to the
    /// neighbouring segment, stopping at either end.
    pub fn advance_segment(&mut self, engine: &mut dyn ConversionEngine, direction: Direction) {
        self.assert_in_sync(engine);
        engine.commit_segment(self.current, self.segments[self.current].selected);
        self.current = match direction {
            Direction::Backward => self.current.saturating_sub(1),
            Direction::Forward if self.current + 1 < self.segments.len() => self.current + 1,
            Direction::Forward => self.current,
        };
    }

    /// Selected candidates concatenated, with the byte span of the current
    /// segment.
    pub fn render_text(&self, engine: &dyn ConversionEngine) -> (String, Range<usize>) {
        let mut text = String::new();
        let mut span = 0..0;
        for (i, segment) in self.segments.iter().enumerate() {
            let begin = text.len();
            text.push_str(&engine.candidate_text(i, segment.selected));
            if i == self.current {
                span = begin..text.len();
            }
        }
        (text, span)
    }

    /// Final text for the application. Ends the selection.
    pub fn commit_text(self, engine: &dyn ConversionEngine) -> String {
        self.render_text(engine).0
    }

    /// The selected candidate of every segment.
    pub fn selected_texts(&self, engine: &dyn ConversionEngine) -> Vec<String> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, segment)| engine.candidate_text(i, segment.selected))
            .collect()
    }

    fn assert_in_sync(&self, engine: &dyn ConversionEngine) {
        assert_eq!(
            engine.segment_count(),
            self.segments.len(),
            "segment count out of sync with the conversion engine"
        );
    }
}
