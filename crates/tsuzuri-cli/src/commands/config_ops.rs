use std::path::Path;
use std::process;

use tsuzuri::config::load_settings_file;
use tsuzuri_core::binding::BindingClass;
use tsuzuri_core::keymap::UsKeymap;
use tsuzuri_core::settings::{self, parse_settings_toml, Settings};
use tsuzuri_session::resolver::BindingTable;
use tsuzuri_session::SeatBindings;

const CLASSES: [BindingClass; 3] = [
    BindingClass::Global,
    BindingClass::Composing,
    BindingClass::Selecting,
];

/// Settings from `file`, or the built-in defaults.
pub fn load(file: Option<&str>) -> Settings {
    match file {
        Some(path) => die!(load_settings_file(Path::new(path)), "Error: {}"),
        None => die!(parse_settings_toml(settings::default_toml()), "Error: {}"),
    }
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn check_config(file: &str) {
    let s = die!(load_settings_file(Path::new(file)), "Error: {}");
    for r in &s.rejected {
        eprintln!("  rejected [{}] {:?} = {:?}: {}", r.class, r.chord, r.action, r.error);
    }
    println!(
        "{}: {} bindings, {} rejected, active_at_startup={}, emulate_im_popups={}",
        if s.rejected.is_empty() { "OK" } else { "WARN" },
        s.bindings.len(),
        s.rejected.len(),
        s.active_at_startup,
        s.emulate_im_popups
    );
    if !s.rejected.is_empty() {
        process::exit(1);
    }
}

fn table(resolved: &SeatBindings, class: BindingClass) -> &BindingTable {
    match class {
        BindingClass::Global => &resolved.global,
        BindingClass::Composing => &resolved.composing,
        BindingClass::Selecting => &resolved.selecting,
    }
}

/// List the logical bindings and what they resolve to on a US layout.
pub fn bindings(file: Option<&str>) {
    let s = load(file);
    let resolved = SeatBindings::resolve(&s.bindings, &UsKeymap::new());

    for class in CLASSES {
        let logical = s.bindings.class(class);
        let codes = table(&resolved, class);
        println!("[{class}] {} bindings, {} key codes", logical.len(), codes.len());
        for b in logical {
            println!("  {b}");
        }
        for e in codes.entries() {
            println!("    code {:>3} mask {:#06x} -> {}", e.code.0, e.mask, e.action);
        }
    }

    if !s.rejected.is_empty() {
        println!("[rejected]");
        for r in &s.rejected {
            println!("  [{}] {:?} = {:?}: {}", r.class, r.chord, r.action, r.error);
        }
    }
}
