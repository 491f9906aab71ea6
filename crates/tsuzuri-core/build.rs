const DEFAULT_SETTINGS: &str = "src/default_settings.toml";
const BINDING_CLASSES: [&str; 3] = ["global", "composing", "selecting"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_SETTINGS}");
    check_settings(include_str!("src/default_settings.toml"));
}

/// The embedded defaults are parsed with `expect` at runtime, so reject a
/// broken file here instead.
fn check_settings(content: &str) {
    let value: toml::Table = content
        .parse()
        .unwrap_or_else(|e| panic!("{DEFAULT_SETTINGS} is not valid TOML: {e}"));
    for flag in ["active_at_startup", "emulate_im_popups"] {
        if let Some(v) = value.get(flag) {
            assert!(v.is_bool(), "{DEFAULT_SETTINGS}: {flag} must be a boolean");
        }
    }
    let Some(bindings) = value.get("bindings") else {
        return;
    };
    let bindings = bindings
        .as_table()
        .unwrap_or_else(|| panic!("{DEFAULT_SETTINGS}: [bindings] must be a table"));
    for (class, table) in bindings {
        assert!(
            BINDING_CLASSES.contains(&class.as_str()),
            "{DEFAULT_SETTINGS}: unknown binding class {class}"
        );
        let table = table
            .as_table()
            .unwrap_or_else(|| panic!("{DEFAULT_SETTINGS}: [bindings.{class}] must be a table"));
        for (chord, action) in table {
            assert!(
                action.is_str(),
                "{DEFAULT_SETTINGS}: {chord} in [bindings.{class}] must name an action"
            );
        }
    }
}
