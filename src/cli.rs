//! CLI definitions for replykit.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// replykit CLI.
#[derive(Parser)]
#[command(name = "replykit")]
#[command(about = "Operator console that suggests replies to incoming chat messages")]
#[command(version)]
pub(crate) struct Cli {
    /// Settings file (default: ~/.config/replykit/settings.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings_file: Option<PathBuf>,

    #[command(flatten)]
    pub console: ConsoleArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options for the interactive console (the default command)
#[derive(Args)]
pub(crate) struct ConsoleArgs {
    /// Read chat events from this JSON-lines file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub feed: Option<PathBuf>,

    /// Keep reading the feed file as it grows
    #[arg(long, requires = "feed")]
    pub follow: bool,

    /// Append sent replies to this JSON-lines file
    #[arg(long, value_name = "PATH")]
    pub outbox: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show or change assistant settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Generate replies for one message and print them
    Suggest {
        /// The customer message to answer
        message: String,

        /// Earlier conversation lines, oldest first, as `client:` or `operator:` prefixed text
        #[arg(long = "context", value_name = "LINE")]
        context: Vec<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Print the current settings (API key masked)
    Show,

    /// Change one setting
    Set {
        /// Setting name (see `replykit settings keys`)
        key: String,

        /// New value
        value: String,
    },

    /// Restore the defaults
    Reset,

    /// Print the settings file location
    Path,

    /// List the setting names `set` accepts
    Keys,
}
