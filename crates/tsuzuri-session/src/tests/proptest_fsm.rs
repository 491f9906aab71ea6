//! Property-based tests for the seat state machine.
//!
//! Generates random key sequences via proptest and verifies that structural
//! invariants hold after every step.

use std::time::Instant;

use proptest::prelude::*;
use tsuzuri_core::action::Action as SeatAction;
use tsuzuri_core::keysym::Keysym;
use tsuzuri_core::romaji::TextBuffer;

use super::*;
use crate::types::Direction;
use crate::{Mode, SegmentModel};

// ---------------------------------------------------------------------------
// Step enum — models every user-facing operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Step {
    Type(char),
    Key(Keysym),
    ShiftKey(Keysym),
    Do(SeatAction),
    RepeatTick,
    Refocus,
}

// ---------------------------------------------------------------------------
// Strategy: weighted random Step generation
// ---------------------------------------------------------------------------

fn arb_romaji_char() -> impl Strategy<Value = char> {
    // Vowels at higher weight for more realistic romaji
    prop_oneof![
        3 => Just('a'),
        3 => Just('i'),
        3 => Just('u'),
        3 => Just('e'),
        3 => Just('o'),
        2 => Just('n'),
        1 => prop::sample::select(vec![
            'k', 's', 't', 'h', 'm', 'y', 'r', 'w', 'g', 'z', 'd', 'b', 'p', 'c', 'f',
            'j', 'l', 'v', 'x', 'q', '\'', '.', ',', '-',
        ]),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        50 => arb_romaji_char().prop_map(Step::Type),
        8 => prop::sample::select(vec![
            Keysym::SPACE,
            Keysym::RETURN,
            Keysym::ESCAPE,
            Keysym::BACKSPACE,
            Keysym::DELETE,
            Keysym::LEFT,
            Keysym::RIGHT,
            Keysym::UP,
            Keysym::DOWN,
            Keysym::TAB,
        ])
        .prop_map(Step::Key),
        3 => prop::sample::select(vec![Keysym::LEFT, Keysym::RIGHT]).prop_map(Step::ShiftKey),
        3 => prop::sample::select(SeatAction::ALL.to_vec()).prop_map(Step::Do),
        3 => Just(Step::RepeatTick),
        1 => Just(Step::Refocus),
    ]
}

// ---------------------------------------------------------------------------
// Execute a Step against the seat
// ---------------------------------------------------------------------------

fn execute_step(seat: &mut Seat, step: &Step) -> KeyResponse {
    match step {
        Step::Type(ch) => {
            let code = code_for(*ch);
            // Leave the key held so a later RepeatTick has something to replay.
            seat.on_key(code, KeyState::Pressed, 0, Instant::now())
        }
        Step::Key(sym) => tap_sym(seat, *sym),
        Step::ShiftKey(sym) => tap_with(seat, &["Shift"], *sym),
        Step::Do(action) => seat.handle_action(*action),
        Step::RepeatTick => seat.on_repeat_timer(),
        Step::Refocus => {
            seat.on_deactivate();
            seat.on_done();
            seat.on_activate();
            seat.on_done()
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant checks — run after every step
// ---------------------------------------------------------------------------

fn assert_invariants(seat: &Seat, resp: &KeyResponse, step: &Step) {
    let buffer = seat.buffer();

    // 1. Cursor stays on a character boundary inside the text
    assert!(
        buffer.cursor() <= buffer.len() && buffer.as_str().is_char_boundary(buffer.cursor()),
        "cursor {} off boundary in {:?} after {:?}",
        buffer.cursor(),
        buffer.as_str(),
        step,
    );

    // 2. Disabled seats hold no text
    if seat.mode() == Mode::Disabled {
        assert!(buffer.is_empty(), "disabled with {:?} after {:?}", buffer.as_str(), step);
    }

    // 3. Selection is only over non-empty text and stays in sync
    if let Some(model) = seat.segments() {
        assert_eq!(seat.mode(), Mode::Selecting);
        assert!(!buffer.is_empty(), "selecting an empty buffer after {step:?}");
        assert_eq!(model.segments().len(), seat.engine().segment_count());
        assert!(model.current_index() < model.segments().len());
        for (i, segment) in model.segments().iter().enumerate() {
            assert_eq!(segment.candidate_count, seat.engine().candidate_count(i));
            assert!(
                segment.selected < segment.candidate_count,
                "segment {i} selects {} of {} after {:?}",
                segment.selected,
                segment.candidate_count,
                step,
            );
        }
    } else {
        assert_ne!(seat.mode(), Mode::Selecting);
    }

    // 4. Preedit highlight is a valid span of the preedit text
    if let Some(preedit) = &resp.preedit {
        assert!(preedit.cursor_begin <= preedit.cursor_end);
        assert!(preedit.cursor_end <= preedit.text.len());
        assert!(preedit.text.is_char_boundary(preedit.cursor_begin));
        assert!(preedit.text.is_char_boundary(preedit.cursor_end));
    }

    // 5. A key is either consumed or forwarded, never both
    if resp.forward.is_some() {
        assert!(!resp.handled, "handled key forwarded after {step:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn seat_invariants_hold(steps in prop::collection::vec(arb_step(), 1..60)) {
        let mut seat = composing_seat();
        for step in &steps {
            let resp = execute_step(&mut seat, step);
            assert_invariants(&seat, &resp, step);
        }
    }

    #[test]
    fn mock_engine_invariants_hold(steps in prop::collection::vec(arb_step(), 1..60)) {
        let (mut seat, _) = mock_seat(4);
        for step in &steps {
            let resp = execute_step(&mut seat, step);
            assert_invariants(&seat, &resp, step);
        }
    }

    #[test]
    fn transliteration_is_idempotent(input in prop::collection::vec(arb_romaji_char(), 0..24)) {
        let mut buffer = TextBuffer::new();
        for ch in input {
            buffer.insert(ch.encode_utf8(&mut [0; 4]));
            buffer.transliterate();
            let once = buffer.clone();
            buffer.transliterate();
            prop_assert_eq!(&buffer, &once);
        }
    }

    #[test]
    fn buffer_cursor_stays_on_boundaries(
        ops in prop::collection::vec(0u8..5, 0..64),
        text in prop::collection::vec(prop::sample::select(vec!["a", "か", "😀", "ー"]), 64),
    ) {
        let mut buffer = TextBuffer::new();
        for (op, piece) in ops.into_iter().zip(text) {
            match op {
                0 => buffer.insert(piece),
                1 => buffer.delete_backward(1),
                2 => buffer.delete_forward(1),
                3 => buffer.move_left(),
                _ => buffer.move_right(),
            }
            prop_assert!(buffer.as_str().is_char_boundary(buffer.cursor()));
            prop_assert!(buffer.cursor() <= buffer.len());
        }
    }

    #[test]
    fn candidate_cycling_saturates(count in 1usize..12) {
        let mut engine = MockEngine::new(count);
        let mut model = SegmentModel::begin(&mut engine, "あい");
        for _ in 0..count + 5 {
            model.cycle_candidate(&engine, Direction::Forward);
        }
        prop_assert_eq!(model.current().selected, count - 1);
        for _ in 0..count + 5 {
            model.cycle_candidate(&engine, Direction::Backward);
        }
        prop_assert_eq!(model.current().selected, 0);
    }

    #[test]
    fn resize_preserves_other_selections(
        len in 2usize..16,
        picks in prop::collection::vec(0usize..4, 8),
        target in 0usize..8,
        grow in any::<bool>(),
    ) {
        let mut engine = MockEngine::new(4);
        let text: String = "あ".repeat(len);
        let mut model = SegmentModel::begin(&mut engine, &text);
        let segments = model.segments().len();

        // Give every segment its own selection, then come back to `target`.
        for &pick in picks.iter().take(segments) {
            for _ in 0..pick {
                model.cycle_candidate(&engine, Direction::Forward);
            }
            model.advance_segment(&mut engine, Direction::Forward);
        }
        let target = target % segments;
        while model.current_index() > target {
            model.advance_segment(&mut engine, Direction::Backward);
        }
        let before: Vec<usize> = model.segments().iter().map(|s| s.selected).collect();

        model.resize_current(&mut engine, if grow { 1 } else { -1 });
        for (j, segment) in model.segments().iter().enumerate() {
            if j != target && j < before.len() {
                prop_assert_eq!(segment.selected, before[j], "segment {} changed", j);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup order over every mode
// ---------------------------------------------------------------------------

#[test]
fn lookup_order_follows_mode() {
    let settings = tsuzuri_core::settings::parse_settings_toml(
        r#"
active_at_startup = true
[bindings.global]
"F1" = "toggle"
[bindings.composing]
"F1" = "accept"
[bindings.selecting]
"F1" = "prev-candidate"
"#,
    )
    .unwrap();
    let mut seat = make_seat(SeatConfig::from(&settings));
    let f1 = Keysym::F1;

    // Composing, empty buffer: global toggles off and back on.
    tap_sym(&mut seat, f1);
    assert_eq!(seat.mode(), Mode::Disabled);
    tap_sym(&mut seat, f1);
    assert_eq!(seat.mode(), Mode::Composing);

    // Composing with text: composing binding accepts.
    type_string(&mut seat, "ka");
    let resp = tap_sym(&mut seat, f1);
    assert_eq!(resp.commit.as_deref(), Some("か"));

    // Selecting: selecting binding steps candidates and stays selecting.
    type_string(&mut seat, "kyou");
    seat.handle_action(SeatAction::Select);
    let resp = tap_sym(&mut seat, f1);
    assert!(resp.commit.is_none());
    assert_eq!(seat.mode(), Mode::Selecting);
}
