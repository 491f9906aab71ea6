use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("empty reading")]
    EmptyReading,
    #[error("reading {0} has no candidates")]
    EmptyCandidates(String),
}

/// Reading → surface forms, in preference order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: BTreeMap<String, Vec<String>>,
    /// Longest reading, in characters.
    max_reading: usize,
}

#[derive(Debug, Deserialize)]
struct RawDictionary {
    #[serde(default)]
    entries: BTreeMap<String, Vec<String>>,
}

impl Dictionary {
    /// Load a dictionary of the form:
    ///
    /// ```toml
    /// [entries]
    /// "きょう" = ["今日", "京"]
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, DictionaryError> {
        let raw: RawDictionary =
            toml::from_str(toml_str).map_err(|e| DictionaryError::Parse(e.to_string()))?;
        Self::from_entries(raw.entries)
    }

    pub fn from_entries<I, S>(entries: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let mut dict = Dictionary::default();
        for (reading, surfaces) in entries {
            let reading = reading.into();
            if reading.is_empty() {
                return Err(DictionaryError::EmptyReading);
            }
            if surfaces.is_empty() {
                return Err(DictionaryError::EmptyCandidates(reading));
            }
            dict.max_reading = dict.max_reading.max(reading.chars().count());
            let slot = dict.entries.entry(reading).or_default();
            for surface in surfaces {
                let surface = surface.into();
                if !slot.contains(&surface) {
                    slot.push(surface);
                }
            }
        }
        Ok(dict)
    }

    pub fn lookup(&self, reading: &str) -> Option<&[String]> {
        self.entries.get(reading).map(Vec::as_slice)
    }

    /// Length in characters of the longest reading that prefixes `text`.
    pub fn longest_prefix(&self, text: &[char]) -> Option<usize> {
        let limit = self.max_reading.min(text.len());
        (1..=limit).rev().find(|&len| {
            let prefix: String = text[..len].iter().collect();
            self.entries.contains_key(&prefix)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
