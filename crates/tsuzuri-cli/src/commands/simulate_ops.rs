//! Drive one seat with scripted key presses and report each response.
//!
//! Key arguments are typed character by character. `<Chord>` presses a
//! bound chord such as `<space>` or `<Ctrl+Shift+BackSpace>`; `<<` types a
//! literal `<`.

use std::fs;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tsuzuri_core::action::Action;
use tsuzuri_core::binding::{parse_chord, BindingError, ModifierSet};
use tsuzuri_core::conversion::{Dictionary, TableEngine};
use tsuzuri_core::keymap::{Keycode, ModifierState, UsKeymap};
use tsuzuri_core::keysym::Keysym;
use tsuzuri_session::{KeyResponse, KeyState, Mode, PopupAction, PopupModel, Seat, SeatConfig};

use super::config_ops;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    Char(char),
    Chord {
        modifiers: ModifierSet,
        keysym: Keysym,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyTokenError {
    #[error("unterminated chord: <{0}")]
    Unterminated(String),
    #[error("invalid chord <{chord}>: {source}")]
    Chord {
        chord: String,
        #[source]
        source: BindingError,
    },
    #[error("no key types {0:?}")]
    Untypable(char),
    #[error("no key produces {0}")]
    NoKey(Keysym),
}

/// Split one key argument into the presses it stands for.
pub fn parse_keys(arg: &str) -> Result<Vec<KeyToken>, KeyTokenError> {
    let mut tokens = Vec::new();
    let mut chars = arg.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '<' {
            tokens.push(KeyToken::Char(c));
            continue;
        }
        if chars.next_if_eq(&'<').is_some() {
            tokens.push(KeyToken::Char('<'));
            continue;
        }
        let mut chord = String::new();
        loop {
            match chars.next() {
                Some('>') => break,
                Some(c) => chord.push(c),
                None => return Err(KeyTokenError::Unterminated(chord)),
            }
        }
        let (modifiers, keysym) =
            parse_chord(&chord).map_err(|source| KeyTokenError::Chord { chord, source })?;
        tokens.push(KeyToken::Chord { modifiers, keysym });
    }
    Ok(tokens)
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Disabled => "disabled",
        Mode::Composing => "composing",
        Mode::Selecting => "selecting",
    }
}

/// Outcome of one simulated key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub key: String,
    pub handled: bool,
    pub forwarded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    pub preedit: String,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<Vec<String>>,
}

/// A seat on the US keymap plus what the compositor would be showing.
pub struct Simulator {
    seat: Seat,
    keymap: UsKeymap,
    time: u32,
    committed: String,
    preedit: String,
    popup: Option<PopupModel>,
}

impl Simulator {
    /// An activated seat, switched on if the settings start it disabled.
    pub fn new(dict: Dictionary, config: SeatConfig) -> Self {
        let engine = TableEngine::new(Arc::new(dict));
        let mut seat = Seat::new("sim", Box::new(engine), config);
        let keymap = UsKeymap::new();
        seat.on_keymap_changed(Arc::new(keymap));
        seat.on_activate();
        let mut sim = Self {
            seat,
            keymap,
            time: 0,
            committed: String::new(),
            preedit: String::new(),
            popup: None,
        };
        let resp = sim.seat.on_done();
        sim.apply(&resp);
        if sim.seat.mode() == Mode::Disabled {
            let resp = sim.seat.handle_action(Action::Enable);
            sim.apply(&resp);
        }
        sim
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn preedit(&self) -> &str {
        &self.preedit
    }

    pub fn popup(&self) -> Option<&PopupModel> {
        self.popup.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.seat.mode()
    }

    fn apply(&mut self, resp: &KeyResponse) {
        if let Some(text) = &resp.commit {
            self.committed.push_str(text);
        }
        if let Some(preedit) = &resp.preedit {
            self.preedit = preedit.text.clone();
        }
        match &resp.popup {
            PopupAction::Keep => {}
            PopupAction::Show(model) => self.popup = Some(model.clone()),
            PopupAction::Hide => self.popup = None,
        }
        // Unhandled keys reach the application as typed text.
        if let Some(forward) = &resp.forward {
            if forward.state == KeyState::Pressed {
                if let Some(text) = self.keymap_text(forward.code) {
                    self.committed.push_str(&text);
                }
            }
        }
    }

    fn keymap_text(&self, code: Keycode) -> Option<String> {
        use tsuzuri_core::keymap::Keymap;
        self.keymap
            .text(code, self.seat.modifiers())
            .filter(|t| !t.chars().any(char::is_control))
    }

    fn key_event(&mut self, code: Keycode, state: KeyState) -> KeyResponse {
        self.time = self.time.wrapping_add(10);
        let resp = self.seat.on_key(code, state, self.time, Instant::now());
        self.apply(&resp);
        resp
    }

    /// Tap `code` with `depressed` modifier bits held.
    fn tap(&mut self, code: Keycode, depressed: u32) -> KeyResponse {
        self.seat.on_modifiers(ModifierState {
            depressed,
            ..ModifierState::default()
        });
        let resp = self.key_event(code, KeyState::Pressed);
        self.key_event(code, KeyState::Released);
        self.seat.on_modifiers(ModifierState::default());
        resp
    }

    pub fn press(&mut self, token: KeyToken) -> Result<Step, KeyTokenError> {
        let (key, code, depressed) = match token {
            KeyToken::Char(c) => {
                let (code, shifted) = self
                    .keymap
                    .keycode_for_char(c)
                    .ok_or(KeyTokenError::Untypable(c))?;
                let depressed = if shifted { self.keymap.mask(&["Shift"]) } else { 0 };
                (c.to_string(), code, depressed)
            }
            KeyToken::Chord { modifiers, keysym } => {
                let code = self
                    .keymap
                    .keycode_for_keysym(keysym)
                    .ok_or(KeyTokenError::NoKey(keysym))?;
                let names: Vec<&str> = modifiers.iter().map(|m| m.keymap_name()).collect();
                let mut label = String::from("<");
                for m in modifiers.iter() {
                    label.push_str(&format!("{m}+"));
                }
                label.push_str(&format!("{keysym}>"));
                (label, code, self.keymap.mask(&names))
            }
        };
        let resp = self.tap(code, depressed);
        Ok(Step {
            key,
            handled: resp.handled,
            forwarded: resp.forward.is_some(),
            commit: resp.commit.clone(),
            preedit: self.preedit.clone(),
            mode: mode_name(self.seat.mode()),
            popup: self.popup.as_ref().map(render::popup_lines),
        })
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    steps: &'a [Step],
    committed: &'a str,
    preedit: &'a str,
}

pub fn simulate_cmd(dict_file: Option<&str>, settings_file: Option<&str>, json: bool, keys: &[String]) {
    let dict = match dict_file {
        Some(path) => {
            let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
            die!(Dictionary::from_toml(&content), "Error: {}")
        }
        None => Dictionary::default(),
    };
    let settings = config_ops::load(settings_file);
    let mut sim = Simulator::new(dict, SeatConfig::from(&settings));

    let mut tokens = Vec::new();
    for arg in keys {
        tokens.extend(die!(parse_keys(arg), "Error: {}"));
    }

    let mut steps = Vec::with_capacity(tokens.len());
    for token in tokens {
        steps.push(die!(sim.press(token), "Error: {}"));
    }

    if json {
        let report = Report {
            steps: &steps,
            committed: sim.committed(),
            preedit: sim.preedit(),
        };
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "Error: {}")
        );
        return;
    }

    for step in &steps {
        let flag = match (step.handled, step.forwarded) {
            (_, true) => "fwd",
            (true, false) => "ok ",
            (false, false) => "-- ",
        };
        print!("{flag} {:<12} {:<9} {}", step.key, step.mode, step.preedit);
        if let Some(commit) = &step.commit {
            print!("  => {commit}");
        }
        println!();
    }
    println!("committed: {}", sim.committed());
    println!("preedit:   {}", sim.preedit());
    if let Some(popup) = sim.popup() {
        print!("{}", render::render_popup(popup));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsuzuri_core::binding::Modifier;
    use tsuzuri_core::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};

    fn dict() -> Dictionary {
        Dictionary::from_entries([
            ("きょう", vec!["今日", "京"]),
            ("は", vec!["は", "葉"]),
        ])
        .unwrap()
    }

    fn sim(emulate: bool) -> Simulator {
        let settings = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        let config = SeatConfig {
            emulate_im_popups: emulate,
            ..SeatConfig::from(&settings)
        };
        Simulator::new(dict(), config)
    }

    fn run(sim: &mut Simulator, keys: &str) -> Vec<Step> {
        parse_keys(keys)
            .unwrap()
            .into_iter()
            .map(|t| sim.press(t).unwrap())
            .collect()
    }

    #[test]
    fn parse_key_arguments() {
        let tokens = parse_keys("a<<<Ctrl+space>").unwrap();
        assert_eq!(tokens[0], KeyToken::Char('a'));
        assert_eq!(tokens[1], KeyToken::Char('<'));
        let KeyToken::Chord { modifiers, keysym } = tokens[2] else {
            panic!("expected chord");
        };
        assert!(modifiers.contains(Modifier::Ctrl));
        assert_eq!(keysym, Keysym::SPACE);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn parse_key_errors() {
        assert_eq!(
            parse_keys("<space"),
            Err(KeyTokenError::Unterminated("space".into()))
        );
        assert!(matches!(
            parse_keys("<Hyper+a>"),
            Err(KeyTokenError::Chord { .. })
        ));
    }

    #[test]
    fn starts_composing() {
        let sim = sim(false);
        assert_eq!(sim.mode(), Mode::Composing);
        assert_eq!(sim.preedit(), "");
    }

    #[test]
    fn convert_and_commit() {
        let mut sim = sim(false);
        let steps = run(&mut sim, "kyouha");
        assert_eq!(steps.last().unwrap().preedit, "きょうは");
        assert!(steps.iter().all(|s| s.handled && !s.forwarded));

        let steps = run(&mut sim, "<space>");
        assert_eq!(steps[0].mode, "selecting");
        assert_eq!(sim.preedit(), "今日は");

        run(&mut sim, "<Return>");
        assert_eq!(sim.committed(), "今日は");
        assert_eq!(sim.preedit(), "");
        assert_eq!(sim.mode(), Mode::Composing);
    }

    #[test]
    fn unhandled_keys_pass_through() {
        let mut sim = sim(false);
        let steps = run(&mut sim, "<Return>");
        assert!(steps[0].forwarded);
        assert_eq!(sim.committed(), "");
    }

    #[test]
    fn emulated_popup_lines() {
        let mut sim = sim(true);
        let steps = run(&mut sim, "ha");
        assert_eq!(steps[1].popup.as_deref(), Some(&["は|".to_string()][..]));
    }
}
