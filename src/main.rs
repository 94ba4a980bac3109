use std::io::{self, IsTerminal};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;

use replykit::ReplykitError;
use replykit::app::{App, Outbox};
use replykit::chat::feed::{FeedSource, spawn_feed_reader};
use replykit::settings::{SettingsError, SettingsStore};

mod cli;
mod cmd_settings;
mod cmd_suggest;
mod logging;

use cli::{Cli, Commands, ConsoleArgs};
use logging::{LogTarget, init_logging};

/// How long to wait for a key before ticking again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();
    let store = open_store(cli.settings_file)?;

    match cli.command {
        Some(Commands::Settings { action }) => {
            init_logging(LogTarget::Stderr);
            cmd_settings::handle_settings_command(action, store)?;
        }
        Some(Commands::Suggest { message, context }) => {
            init_logging(LogTarget::Stderr);
            cmd_suggest::handle_suggest_command(&message, &context, store)?;
        }
        None => run_console(cli.console, store)?,
    }
    Ok(())
}

fn open_store(path: Option<std::path::PathBuf>) -> Result<SettingsStore, SettingsError> {
    match path {
        Some(path) => Ok(SettingsStore::new(path)),
        None => SettingsStore::open_default(),
    }
}

fn run_console(args: ConsoleArgs, store: SettingsStore) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(ReplykitError::NoTerminal.into());
    }
    init_logging(LogTarget::File);

    let mut app = App::from_store(store);

    let source = match args.feed {
        Some(path) => Some(FeedSource::File {
            path,
            follow: args.follow,
        }),
        // A terminal on stdin is the keyboard, not a feed
        None if !io::stdin().is_terminal() => Some(FeedSource::Stdin),
        None => None,
    };
    match source {
        Some(source) => {
            let (feed_tx, feed_rx) = mpsc::channel();
            spawn_feed_reader(source, feed_tx)?;
            app = app.with_feed(feed_rx);
        }
        None => {
            log::warn!("No chat feed; pass --feed or pipe events on stdin");
            app.notification
                .show_warning("No chat feed: pass --feed FILE or pipe events on stdin");
        }
    }

    if let Some(path) = args.outbox {
        app = app.with_outbox(Outbox::open(path).map_err(ReplykitError::from)?);
    }
    app.start_worker().map_err(ReplykitError::from)?;

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    let result = run(terminal, &mut app);
    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    log::info!("Console started");
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events(POLL_INTERVAL)?;

        if app.should_quit() {
            break;
        }
    }
    log::info!("Console closed");
    Ok(())
}
