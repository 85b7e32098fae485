use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};

use picker_cli::commands::search_ops::SearchOptions;
use picker_cli::commands::{config_ops, mru_ops, search_ops};
use picker_session::ViewMode;

#[derive(Parser)]
#[command(name = "picktool", about = "Emoji picker diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Mru,
    List,
    Kaomoji,
}

impl From<Mode> for ViewMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Mru => ViewMode::Mru,
            Mode::List => ViewMode::List,
            Mode::Kaomoji => ViewMode::Kaomoji,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Lay out a query against a catalog and print the grid
    Search {
        /// Path to the catalog TOML file
        catalog_file: String,
        /// Search text
        query: String,
        /// View mode to search in
        #[arg(long, value_enum, default_value = "list")]
        mode: Mode,
        /// Alias file (repeatable)
        #[arg(long = "alias")]
        aliases: Vec<String>,
        /// Settings file (optional)
        #[arg(long)]
        settings: Option<String>,
        /// MRU file for MRU mode (optional)
        #[arg(long)]
        mru: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Settings file operations
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// MRU file operations
    Mru {
        #[command(subcommand)]
        action: MruAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the default settings
    Export,
    /// Parse and validate a settings file
    Validate { file: String },
}

#[derive(Subcommand)]
enum MruAction {
    /// List MRU entries, newest first
    Show {
        file: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            catalog_file,
            query,
            mode,
            aliases,
            settings,
            mru,
            json,
        } => search_ops::search(
            &catalog_file,
            &query,
            &SearchOptions {
                mode: mode.into(),
                alias_files: &aliases,
                settings_file: settings.as_deref(),
                mru_file: mru.as_deref(),
                json,
            },
        ),
        Command::Settings { action } => match action {
            SettingsAction::Export => config_ops::settings_export(),
            SettingsAction::Validate { file } => config_ops::settings_validate(&file),
        },
        Command::Mru { action } => match action {
            MruAction::Show { file, json } => mru_ops::mru_show(Path::new(&file), json),
        },
    }
}
