//! Kana-to-kanji conversion.
//!
//! The seat only sees the narrow [`ConversionEngine`] contract. The engine
//! owns segmentation and candidate ranking; the seat owns which candidate is
//! selected in each segment.

mod dictionary;
mod table;

pub use dictionary::{Dictionary, DictionaryError};
pub use table::TableEngine;

/// A stateful conversion engine, one instance per seat.
///
/// All calls are synchronous. Segment and candidate indices passed in are
/// always within the counts the engine last reported.
pub trait ConversionEngine {
    /// Forget the current text and every segment decision.
    fn reset(&mut self);

    /// Segment and convert `text`.
    fn set_source_text(&mut self, text: &str);

    fn segment_count(&self) -> usize;

    fn candidate_count(&self, segment: usize) -> usize;

    fn candidate_text(&self, segment: usize, candidate: usize) -> String;

    /// Move the end of `segment` by `delta` characters and re-segment the
    /// text after it. Segments before `segment` are unaffected.
    fn resize_segment(&mut self, segment: usize, delta: i32);

    /// Record that `candidate` was chosen for `segment`.
    fn commit_segment(&mut self, segment: usize, candidate: usize);
}
