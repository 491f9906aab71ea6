use std::sync::Arc;

use tracing::debug;

use super::{ConversionEngine, Dictionary};
use crate::unicode::to_katakana;

#[derive(Debug, Clone)]
struct Segment {
    /// Start offset into the source, in characters.
    start: usize,
    len: usize,
    candidates: Vec<String>,
    committed: Option<usize>,
}

/// Dictionary-driven engine with greedy longest-match segmentation.
///
/// Each segment offers the dictionary surfaces for its reading, then the
/// reading itself, then its katakana form.
#[derive(Debug, Clone)]
pub struct TableEngine {
    dict: Arc<Dictionary>,
    source: Vec<char>,
    segments: Vec<Segment>,
}

impl TableEngine {
    pub fn new(dict: Arc<Dictionary>) -> Self {
        Self {
            dict,
            source: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Candidate chosen for `segment` by [`ConversionEngine::commit_segment`].
    pub fn committed(&self, segment: usize) -> Option<usize> {
        self.segments.get(segment).and_then(|s| s.committed)
    }

    /// Reading covered by `segment`.
    pub fn reading(&self, segment: usize) -> String {
        let s = &self.segments[segment];
        self.source[s.start..s.start + s.len].iter().collect()
    }

    fn make_segment(&self, start: usize, len: usize) -> Segment {
        let reading: String = self.source[start..start + len].iter().collect();
        let mut candidates: Vec<String> = self
            .dict
            .lookup(&reading)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        let katakana = to_katakana(&reading);
        for form in [reading, katakana] {
            if !candidates.contains(&form) {
                candidates.push(form);
            }
        }
        Segment {
            start,
            len,
            candidates,
            committed: None,
        }
    }

    /// Replace every segment from character offset `start` on.
    fn segment_from(&mut self, mut start: usize) {
        while start < self.source.len() {
            let len = self
                .dict
                .longest_prefix(&self.source[start..])
                .unwrap_or(1);
            let segment = self.make_segment(start, len);
            self.segments.push(segment);
            start += len;
        }
    }
}

impl ConversionEngine for TableEngine {
    fn reset(&mut self) {
        self.source.clear();
        self.segments.clear();
    }

    fn set_source_text(&mut self, text: &str) {
        self.source = text.chars().collect();
        self.segments.clear();
        self.segment_from(0);
        debug!(text, segments = self.segments.len(), "segmented");
    }

    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn candidate_count(&self, segment: usize) -> usize {
        self.segments[segment].candidates.len()
    }

    fn candidate_text(&self, segment: usize, candidate: usize) -> String {
        self.segments[segment].candidates[candidate].clone()
    }

    fn resize_segment(&mut self, segment: usize, delta: i32) {
        let Segment { start, len, .. } = self.segments[segment];
        let available = self.source.len() - start;
        let new_len = (len as i64 + i64::from(delta)).clamp(1, available as i64) as usize;
        if new_len == len {
            return;
        }
        self.segments.truncate(segment);
        let resized = self.make_segment(start, new_len);
        self.segments.push(resized);
        self.segment_from(start + new_len);
        debug!(
            segment,
            delta,
            len = new_len,
            segments = self.segments.len(),
            "resized"
        );
    }

    fn commit_segment(&mut self, segment: usize, candidate: usize) {
        debug!(segment, candidate, "commit segment");
        self.segments[segment].committed = Some(candidate);
    }
}
