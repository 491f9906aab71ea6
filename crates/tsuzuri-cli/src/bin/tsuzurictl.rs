use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tsuzuri_cli::commands::{config_ops, control_ops, romaji_ops, simulate_ops};

#[derive(Parser)]
#[command(name = "tsuzurictl", about = "tsuzuri input method tool")]
struct Cli {
    /// Log seat and binding decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate romaji the way it is typed into a seat
    Romaji {
        /// Romaji input
        text: String,
        /// Also turn a trailing `n` into ん
        #[arg(long)]
        finish: bool,
    },
    /// Type keys into a simulated seat and show every response
    Simulate {
        /// Dictionary TOML file (optional)
        #[arg(long)]
        dict: Option<String>,
        /// Settings TOML file (default: built-in settings)
        #[arg(long)]
        settings: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Text to type; `<Chord>` presses a key chord, `<<` types `<`
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Show logical bindings and their key codes on a US layout
    Bindings {
        /// Settings TOML file (default: built-in settings)
        #[arg(long)]
        settings: Option<String>,
    },
    /// Validate a settings TOML file
    CheckConfig {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Ask a running input method to perform an action on a seat
    Action {
        /// Seat name
        #[arg(long)]
        seat: String,
        /// Action name, e.g. `toggle`
        action: String,
        /// Control socket (default: $XDG_RUNTIME_DIR/tsuzuri.$WAYLAND_DISPLAY)
        #[arg(long)]
        socket: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    EnvFilter::new("tsuzuri=debug,tsuzuri_core=debug,tsuzuri_session=debug")
                }),
            )
            .init();
    }

    match cli.command {
        Command::Romaji { text, finish } => romaji_ops::romaji_cmd(&text, finish),
        Command::Simulate {
            dict,
            settings,
            json,
            keys,
        } => simulate_ops::simulate_cmd(dict.as_deref(), settings.as_deref(), json, &keys),
        Command::Bindings { settings } => config_ops::bindings(settings.as_deref()),
        Command::CheckConfig { file } => config_ops::check_config(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::Action {
            seat,
            action,
            socket,
        } => control_ops::action_cmd(&seat, &action, socket.as_deref()),
    }
}
