mod bindings;
mod proptest_fsm;
mod selecting;

use std::sync::{Arc, Mutex};
use std::time::Instant;

use tsuzuri_core::conversion::{ConversionEngine, Dictionary, TableEngine};
use tsuzuri_core::keymap::{Keycode, Keymap, ModifierState, UsKeymap};
use tsuzuri_core::keysym::Keysym;
use tsuzuri_core::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};

use super::{KeyResponse, KeyState, Seat, SeatConfig};

pub(super) fn make_test_dict() -> Arc<Dictionary> {
    let entries = vec![
        ("きょう", vec!["今日", "京"]),
        ("は", vec!["は", "葉"]),
        ("いい", vec!["良い", "いい"]),
        ("てんき", vec!["天気"]),
        ("てん", vec!["天", "点"]),
        ("わたし", vec!["私"]),
        ("です", vec!["です"]),
        ("あ", vec!["亜", "阿", "唖", "吾", "娃"]),
    ];
    Arc::new(Dictionary::from_entries(entries).unwrap())
}

pub(super) fn default_config() -> SeatConfig {
    SeatConfig::from(&parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap())
}

/// Seat with the US keymap that has been activated by the compositor.
pub(super) fn make_seat(config: SeatConfig) -> Seat {
    let engine = TableEngine::new(make_test_dict());
    let mut seat = Seat::new("seat0", Box::new(engine), config);
    seat.on_keymap_changed(Arc::new(UsKeymap::new()));
    seat.on_activate();
    seat.on_done();
    seat
}

/// Active seat that starts out composing.
pub(super) fn composing_seat() -> Seat {
    make_seat(SeatConfig {
        active_at_startup: true,
        ..default_config()
    })
}

pub(super) fn code_for(c: char) -> Keycode {
    UsKeymap.keycode_for_char(c).unwrap().0
}

pub(super) fn code_for_sym(sym: Keysym) -> Keycode {
    UsKeymap.keycode_for_keysym(sym).unwrap()
}

pub(super) fn press(seat: &mut Seat, code: Keycode) -> KeyResponse {
    seat.on_key(code, KeyState::Pressed, 0, Instant::now())
}

pub(super) fn release(seat: &mut Seat, code: Keycode) -> KeyResponse {
    seat.on_key(code, KeyState::Released, 0, Instant::now())
}

/// Press and release; returns the press response.
pub(super) fn tap(seat: &mut Seat, code: Keycode) -> KeyResponse {
    let resp = press(seat, code);
    release(seat, code);
    resp
}

pub(super) fn tap_sym(seat: &mut Seat, sym: Keysym) -> KeyResponse {
    tap(seat, code_for_sym(sym))
}

/// Tap `sym` while holding the named modifiers.
pub(super) fn tap_with(seat: &mut Seat, mods: &[&str], sym: Keysym) -> KeyResponse {
    seat.on_modifiers(ModifierState {
        depressed: UsKeymap.mask(mods),
        ..ModifierState::default()
    });
    let resp = tap_sym(seat, sym);
    seat.on_modifiers(ModifierState::default());
    resp
}

// Helper: simulate typing a string one key at a time
pub(super) fn type_string(seat: &mut Seat, s: &str) -> Vec<KeyResponse> {
    let mut responses = Vec::new();
    for ch in s.chars() {
        let (code, shifted) = UsKeymap.keycode_for_char(ch).unwrap();
        if shifted {
            seat.on_modifiers(ModifierState {
                depressed: UsKeymap.mask(&["Shift"]),
                ..ModifierState::default()
            });
        }
        responses.push(tap(seat, code));
        if shifted {
            seat.on_modifiers(ModifierState::default());
        }
    }
    responses
}

/// Engine that splits its source into two-character segments and offers a
/// fixed number of candidates for each. Commits are recorded in a shared
/// log so tests can inspect them after the seat has taken ownership.
pub(super) struct MockEngine {
    candidates: usize,
    total: usize,
    lens: Vec<usize>,
    pub commits: Arc<Mutex<Vec<(usize, usize)>>>,
}

impl MockEngine {
    pub(super) fn new(candidates: usize) -> Self {
        Self {
            candidates,
            total: 0,
            lens: Vec::new(),
            commits: Arc::default(),
        }
    }

    fn split_from(&mut self, mut start: usize) {
        while start < self.total {
            let len = (self.total - start).min(2);
            self.lens.push(len);
            start += len;
        }
    }
}

impl ConversionEngine for MockEngine {
    fn reset(&mut self) {
        self.total = 0;
        self.lens.clear();
    }

    fn set_source_text(&mut self, text: &str) {
        self.lens.clear();
        self.total = text.chars().count();
        self.split_from(0);
    }

    fn segment_count(&self) -> usize {
        self.lens.len()
    }

    fn candidate_count(&self, _segment: usize) -> usize {
        self.candidates
    }

    fn candidate_text(&self, segment: usize, candidate: usize) -> String {
        format!("[{segment}:{candidate}]")
    }

    fn resize_segment(&mut self, segment: usize, delta: i32) {
        let start: usize = self.lens[..segment].iter().sum();
        let len = (self.lens[segment] as i64 + i64::from(delta)).clamp(1, (self.total - start) as i64);
        self.lens.truncate(segment);
        self.lens.push(len as usize);
        self.split_from(start + len as usize);
    }

    fn commit_segment(&mut self, segment: usize, candidate: usize) {
        self.commits.lock().unwrap().push((segment, candidate));
    }
}

/// Active composing seat over a [`MockEngine`]; returns the commit log.
pub(super) fn mock_seat(candidates: usize) -> (Seat, Arc<Mutex<Vec<(usize, usize)>>>) {
    let engine = MockEngine::new(candidates);
    let commits = Arc::clone(&engine.commits);
    let mut seat = Seat::new(
        "mock",
        Box::new(engine),
        SeatConfig {
            active_at_startup: true,
            ..default_config()
        },
    );
    seat.on_keymap_changed(Arc::new(UsKeymap::new()));
    seat.on_activate();
    seat.on_done();
    (seat, commits)
}

#[test]
fn mock_engine_resize_resegments_the_rest() {
    let mut e = MockEngine::new(3);
    e.set_source_text("abcdef");
    assert_eq!(e.segment_count(), 3);
    e.resize_segment(0, 1);
    // abc | de | f
    assert_eq!(e.lens, [3, 2, 1]);
    e.resize_segment(2, 1);
    assert_eq!(e.lens, [3, 2, 1]);
    e.resize_segment(0, -5);
    assert_eq!(e.lens, [1, 2, 2, 1]);
}

#[test]
fn us_keymap_sanity() {
    let code = code_for('a');
    assert_eq!(UsKeymap.base_keysym(code), Keysym::from_char('a').unwrap());
}
