use tsuzuri_core::keysym::Keysym;

use super::*;
use crate::{Mode, PopupAction, PopupModel, SelectingPopup};

fn selecting_seat(romaji: &str) -> Seat {
    let mut seat = composing_seat();
    type_string(&mut seat, romaji);
    tap_sym(&mut seat, Keysym::SPACE);
    assert_eq!(seat.mode(), Mode::Selecting);
    seat
}

fn selected(seat: &Seat) -> Vec<usize> {
    seat.segments()
        .unwrap()
        .segments()
        .iter()
        .map(|s| s.selected)
        .collect()
}

fn shown_candidates(resp: &KeyResponse) -> &SelectingPopup {
    match &resp.popup {
        PopupAction::Show(PopupModel::Selecting(popup)) => popup,
        other => panic!("expected candidate popup, got {other:?}"),
    }
}

// --- Entering selection ---

#[test]
fn test_select_shows_first_candidates() {
    let mut seat = composing_seat();
    type_string(&mut seat, "kyouhaii");
    assert_eq!(seat.buffer().as_str(), "きょうはいい");

    let resp = tap_sym(&mut seat, Keysym::SPACE);
    assert!(resp.handled);
    assert_eq!(seat.mode(), Mode::Selecting);
    assert_eq!(seat.segments().unwrap().segments().len(), 3);

    let preedit = resp.preedit.unwrap();
    assert_eq!(preedit.text, "今日は良い");
    assert_eq!(&preedit.text[preedit.cursor_begin..preedit.cursor_end], "今日");
    // Without popup emulation the candidate list waits for the first cycle.
    assert_eq!(resp.popup, PopupAction::Hide);
}

#[test]
fn test_select_converts_trailing_n() {
    let mut seat = composing_seat();
    type_string(&mut seat, "ten");
    assert_eq!(seat.buffer().as_str(), "てn");

    let resp = tap_sym(&mut seat, Keysym::HENKAN);
    assert_eq!(seat.buffer().as_str(), "てん");
    assert_eq!(resp.preedit.unwrap().text, "天");
}

#[test]
fn test_select_again_is_noop() {
    let mut seat = selecting_seat("kyouhaii");
    tap_sym(&mut seat, Keysym::DOWN);

    // Henkan is only bound to select in the composing table.
    let resp = tap_sym(&mut seat, Keysym::HENKAN);
    assert!(resp.handled);
    assert!(resp.commit.is_none());
    assert_eq!(seat.mode(), Mode::Selecting);
    assert_eq!(selected(&seat), [1, 0, 0]);
}

// --- Candidate cycling ---

#[test]
fn test_next_candidate_saturates() {
    let mut seat = selecting_seat("a");
    assert_eq!(seat.segments().unwrap().current().candidate_count, 7);

    for _ in 0..6 {
        tap_sym(&mut seat, Keysym::DOWN);
    }
    assert_eq!(selected(&seat), [6]);

    let resp = tap_sym(&mut seat, Keysym::DOWN);
    assert!(resp.handled);
    assert_eq!(selected(&seat), [6]);
    assert_eq!(resp.preedit.unwrap().text, "ア");

    for _ in 0..10 {
        tap_sym(&mut seat, Keysym::UP);
    }
    assert_eq!(selected(&seat), [0]);
}

#[test]
fn test_space_cycles_while_selecting() {
    let mut seat = selecting_seat("kyouhaii");
    let resp = tap_sym(&mut seat, Keysym::SPACE);
    assert_eq!(selected(&seat), [1, 0, 0]);
    assert_eq!(resp.preedit.as_ref().unwrap().text, "京は良い");

    let popup = shown_candidates(&resp);
    assert_eq!(popup.segments, None);
    assert_eq!(popup.current_segment, 0);
    let labels: Vec<_> = popup.page.labels().collect();
    assert_eq!(
        labels,
        [
            ("1. 今日".to_string(), false),
            ("2. 京".to_string(), true),
            ("3. きょう".to_string(), false),
            ("4. キョウ".to_string(), false),
        ]
    );
}

#[test]
fn test_emulated_popup_shows_segments_on_select() {
    let mut seat = make_seat(SeatConfig {
        active_at_startup: true,
        emulate_im_popups: true,
        ..default_config()
    });
    type_string(&mut seat, "kyouhaii");
    let resp = tap_sym(&mut seat, Keysym::SPACE);

    let popup = shown_candidates(&resp);
    assert_eq!(
        popup.segments.as_deref(),
        Some(&["今日".to_string(), "は".to_string(), "良い".to_string()][..])
    );
}

// --- Segment navigation ---

#[test]
fn test_move_right_commits_current_segment() {
    let (mut seat, commits) = mock_seat(3);
    type_string(&mut seat, "kakikukeko");
    tap_sym(&mut seat, Keysym::SPACE);
    assert_eq!(seat.segments().unwrap().segments().len(), 3);

    tap_sym(&mut seat, Keysym::RIGHT);
    tap_sym(&mut seat, Keysym::DOWN);
    assert_eq!(seat.segments().unwrap().current_index(), 1);

    let resp = tap_sym(&mut seat, Keysym::RIGHT);
    assert_eq!(seat.segments().unwrap().current_index(), 2);
    assert_eq!(*commits.lock().unwrap(), [(0, 0), (1, 1)]);

    let preedit = resp.preedit.unwrap();
    assert_eq!(preedit.text, "[0:0][1:1][2:0]");
    assert_eq!(&preedit.text[preedit.cursor_begin..], "[2:0]");

    // Stays on the last segment.
    tap_sym(&mut seat, Keysym::RIGHT);
    assert_eq!(seat.segments().unwrap().current_index(), 2);
}

#[test]
fn test_move_left_stops_at_first_segment() {
    let mut seat = selecting_seat("kyouhaii");
    tap_sym(&mut seat, Keysym::LEFT);
    assert_eq!(seat.segments().unwrap().current_index(), 0);
    assert_eq!(seat.mode(), Mode::Selecting);
}

#[test]
fn test_expand_right_merges_into_next_segment() {
    let mut seat = selecting_seat("kyouhaii");
    let resp = tap_with(&mut seat, &["Shift"], Keysym::RIGHT);
    assert!(resp.handled);
    assert_eq!(seat.segments().unwrap().segments().len(), 2);
    assert_eq!(resp.preedit.unwrap().text, "きょうは良い");
}

#[test]
fn test_expand_left_splits_segment() {
    let mut seat = selecting_seat("kyouhaii");
    let resp = tap_with(&mut seat, &["Shift"], Keysym::LEFT);
    assert_eq!(seat.segments().unwrap().segments().len(), 4);
    let preedit = resp.preedit.unwrap();
    assert_eq!(preedit.text, "きょうは良い");
    assert_eq!(&preedit.text[preedit.cursor_begin..preedit.cursor_end], "きょ");
}

#[test]
fn test_expand_keeps_earlier_selection() {
    let mut seat = selecting_seat("kyouhaii");
    tap_sym(&mut seat, Keysym::DOWN);
    tap_sym(&mut seat, Keysym::RIGHT);
    tap_with(&mut seat, &["Shift"], Keysym::RIGHT);
    // きょう | はい | い
    assert_eq!(seat.segments().unwrap().segments().len(), 3);
    assert_eq!(selected(&seat)[0], 1);
}

// --- Leaving selection ---

#[test]
fn test_accept_commits_selection() {
    let mut seat = selecting_seat("kyouhaii");
    tap_sym(&mut seat, Keysym::DOWN);

    let resp = tap_sym(&mut seat, Keysym::RETURN);
    assert!(resp.handled);
    assert_eq!(resp.commit.as_deref(), Some("京は良い"));
    assert_eq!(resp.preedit.unwrap().text, "");
    assert_eq!(seat.mode(), Mode::Composing);
    assert!(seat.buffer().is_empty());
}

#[test]
fn test_compose_returns_without_commit() {
    let mut seat = selecting_seat("kyouhaii");
    tap_sym(&mut seat, Keysym::DOWN);

    let resp = tap_sym(&mut seat, Keysym::ESCAPE);
    assert!(resp.commit.is_none());
    assert_eq!(seat.mode(), Mode::Composing);
    assert_eq!(resp.preedit.unwrap().text, "きょうはいい");
    assert_eq!(resp.popup, PopupAction::Hide);
}

#[test]
fn test_backspace_drops_selection_and_deletes() {
    let mut seat = selecting_seat("kyouhaii");
    let resp = tap_sym(&mut seat, Keysym::BACKSPACE);
    assert!(resp.commit.is_none());
    assert_eq!(seat.mode(), Mode::Composing);
    assert_eq!(seat.buffer().as_str(), "きょうはい");
}

#[test]
fn test_typing_commits_selection_first() {
    let mut seat = selecting_seat("kyou");

    let resp = tap(&mut seat, code_for('k'));
    assert!(resp.handled);
    assert_eq!(resp.commit.as_deref(), Some("今日"));
    assert_eq!(resp.preedit.unwrap().text, "k");
    assert_eq!(seat.mode(), Mode::Composing);
    assert_eq!(seat.buffer().as_str(), "k");
}

#[test]
fn test_unbound_control_key_commits_and_forwards() {
    let mut seat = selecting_seat("kyou");

    let resp = tap_sym(&mut seat, Keysym::TAB);
    assert!(!resp.handled);
    assert_eq!(resp.commit.as_deref(), Some("今日"));
    assert!(resp.forward.is_some());
    assert_eq!(seat.mode(), Mode::Composing);
}

#[test]
fn test_discard_drops_selection() {
    let mut seat = selecting_seat("kyou");
    let resp = seat.handle_action(tsuzuri_core::action::Action::Discard);
    assert_eq!(resp.commit.as_deref(), Some(""));
    assert_eq!(seat.mode(), Mode::Composing);
    assert!(seat.buffer().is_empty());
}
