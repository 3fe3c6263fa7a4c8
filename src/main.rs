// cardreel - scroll-driven card carousel for the terminal
//
// Shows a deck of cards in a horizontally scrolling strip with buttons,
// keyboard, swipe, progress bar and free scrolling all kept in sync.
//
// Architecture:
// - Carousel core: state, navigation, settle timer, visibility, input adapters
// - Stage: in-process surface the core writes to and reads geometry from
// - TUI (ratatui): draws the stage and maps terminal input to carousel events
// - Replay: drives the same core headless from a JSONL event script

mod carousel;
mod cli;
mod config;
mod deck;
mod logging;
mod replay;
mod startup;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use deck::Deck;
use logging::{LogBuffer, Sink};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands run before anything else touches the terminal
    if let Some(Commands::Config {
        show,
        reset,
        edit,
        update,
        path,
    }) = &cli.command
    {
        cli::handle_config(*show, *reset, *edit, *update, *path);
        return Ok(());
    }

    // Create config file with defaults on first run
    Config::ensure_config_exists();

    // Load configuration: flags > env vars > file > defaults
    let mut config = Config::from_env();
    cli.apply(&mut config);

    if let Some(Commands::Replay { script, width }) = &cli.command {
        let _guard = logging::init(&config.logging, Sink::Stderr);
        let deck = Deck::resolve(config.deck.as_deref()).context("Failed to load deck")?;
        let mut source = replay::load_script(script)?;
        let snapshot = replay::Replay::new(&deck, &config, *width)?.run(&mut source);
        let json =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize final state")?;
        println!("{}", json);
        return Ok(());
    }

    // Logs go to the in-app buffer while the TUI owns the screen
    let log_buffer = LogBuffer::new();
    let _guard = logging::init(&config.logging, Sink::Buffer(log_buffer.clone()));

    let deck = Deck::resolve(config.deck.as_deref()).context("Failed to load deck")?;

    startup::print_startup(&config, &deck);
    startup::log_startup(&config, &deck);

    tui::run_tui(deck, config, log_buffer).await?;

    Ok(())
}
