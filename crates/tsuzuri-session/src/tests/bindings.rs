use tsuzuri_core::keysym::Keysym;
use tsuzuri_core::settings::parse_settings_toml;

use super::*;
use crate::Mode;

const LAYERED: &str = r#"
active_at_startup = true

[bindings.global]
"Tab" = "toggle"

[bindings.composing]
"Tab" = "accept"
"space" = "select"

[bindings.selecting]
"Tab" = "compose"
"#;

fn layered_seat() -> Seat {
    make_seat(SeatConfig::from(&parse_settings_toml(LAYERED).unwrap()))
}

#[test]
fn test_global_binding_with_empty_buffer() {
    let mut seat = layered_seat();
    let resp = tap_sym(&mut seat, Keysym::TAB);
    assert!(resp.handled);
    assert_eq!(seat.mode(), Mode::Disabled);

    tap_sym(&mut seat, Keysym::TAB);
    assert_eq!(seat.mode(), Mode::Composing);
}

#[test]
fn test_composing_binding_wins_with_text() {
    let mut seat = layered_seat();
    type_string(&mut seat, "ka");
    let resp = tap_sym(&mut seat, Keysym::TAB);
    assert_eq!(resp.commit.as_deref(), Some("か"));
    assert_eq!(seat.mode(), Mode::Composing);
}

#[test]
fn test_selecting_binding_wins_while_selecting() {
    let mut seat = layered_seat();
    type_string(&mut seat, "kyou");
    tap_sym(&mut seat, Keysym::SPACE);
    assert_eq!(seat.mode(), Mode::Selecting);

    let resp = tap_sym(&mut seat, Keysym::TAB);
    assert!(resp.commit.is_none());
    assert_eq!(seat.mode(), Mode::Composing);
    assert_eq!(seat.buffer().as_str(), "きょう");
}

#[test]
fn test_rejected_bindings_are_skipped() {
    let settings = parse_settings_toml(
        r#"
active_at_startup = true

[bindings.composing]
"Hyperspace" = "accept"
"Return" = "launch"
"Escape" = "discard"
"#,
    )
    .unwrap();
    assert_eq!(settings.rejected.len(), 2);

    let mut seat = make_seat(SeatConfig::from(&settings));
    assert_eq!(seat.resolved_bindings().composing.len(), 1);

    type_string(&mut seat, "ka");
    // Return has no binding left, so it reaches the application.
    let resp = tap_sym(&mut seat, Keysym::RETURN);
    assert!(!resp.handled);
    assert_eq!(seat.buffer().as_str(), "か");

    let resp = tap_sym(&mut seat, Keysym::ESCAPE);
    assert_eq!(resp.commit.as_deref(), Some(""));
}

/// US layout without the Japanese keys.
struct NoJisKeys;

impl Keymap for NoJisKeys {
    fn keycodes(&self) -> Vec<Keycode> {
        UsKeymap
            .keycodes()
            .into_iter()
            .filter(|&code| {
                !matches!(
                    UsKeymap.base_keysym(code),
                    Keysym::ZENKAKU_HANKAKU | Keysym::HENKAN
                )
            })
            .collect()
    }

    fn keysym(&self, code: Keycode, mods: &ModifierState) -> Keysym {
        UsKeymap.keysym(code, mods)
    }

    fn text(&self, code: Keycode, mods: &ModifierState) -> Option<String> {
        UsKeymap.text(code, mods)
    }

    fn mod_index(&self, name: &str) -> Option<u32> {
        UsKeymap.mod_index(name)
    }

    fn key_repeats(&self, code: Keycode) -> bool {
        UsKeymap.key_repeats(code)
    }
}

#[test]
fn test_keymap_change_rebuilds_tables() {
    let mut seat = make_seat(default_config());
    assert_eq!(seat.resolved_bindings().global.len(), 2);
    assert_eq!(seat.resolved_bindings().composing.len(), 8);

    seat.on_keymap_changed(Arc::new(NoJisKeys));
    assert_eq!(seat.resolved_bindings().global.len(), 1);
    assert_eq!(seat.resolved_bindings().composing.len(), 7);

    let resp = tap_sym(&mut seat, Keysym::ZENKAKU_HANKAKU);
    assert!(!resp.handled);
    assert_eq!(seat.mode(), Mode::Disabled);
}

#[test]
fn test_no_keymap_passes_everything_through() {
    let engine = TableEngine::new(make_test_dict());
    let mut seat = Seat::new(
        "bare",
        Box::new(engine),
        SeatConfig {
            active_at_startup: true,
            ..default_config()
        },
    );
    seat.on_activate();
    seat.on_done();

    let resp = tap(&mut seat, code_for('a'));
    assert!(!resp.handled);
    assert!(resp.forward.is_some());
    assert!(seat.buffer().is_empty());
}
