// Startup module - displays banner and feature status
//
// Printed to the normal screen before the TUI takes over, and mirrored into
// the log buffer so it is still visible from inside the viewer.

use crate::config::{Config, VERSION};
use crate::deck::Deck;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Navigation help, shared by the banner and the log
const NAVIGATION: &str = "← → arrows, swipe, or click the progress bar";

/// Feature status for display
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: &'static str,
}

/// Status of every optional behavior, based on config
fn module_status(config: &Config) -> Vec<ModuleStatus> {
    vec![
        ModuleStatus {
            name: "carousel",
            enabled: true,
            description: "Navigation, settle, visibility",
        },
        ModuleStatus {
            name: "motion",
            enabled: !config.motion.reduced_motion,
            description: "Smooth scroll and fades",
        },
        ModuleStatus {
            name: "clamp-click",
            enabled: config.carousel.clamp_progress_click,
            description: "Progress bar edge lands on last card",
        },
        ModuleStatus {
            name: "file-log",
            enabled: config.logging.file_enabled,
            description: "JSON log files",
        },
    ]
}

/// Print the startup banner and feature status
pub fn print_startup(config: &Config, deck: &Deck) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}cardreel{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {BOLD}{}{RESET}", deck.title);
    if let Some(tagline) = &deck.tagline {
        match &deck.attribution {
            Some(by) => println!("  {DIM}\"{}\" - {}{RESET}", tagline, by),
            None => println!("  {DIM}\"{}\"{RESET}", tagline),
        }
    }
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    match &config.deck {
        Some(path) => println!("  {DIM}Deck:{RESET}   {GREEN}✓{RESET} {}", path.display()),
        None => println!("  {DIM}Deck:{RESET}   {DIM}(bundled){RESET}"),
    }
    println!();

    for module in module_status(config) {
        print_module_status(&module);
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} {BOLD}{}{RESET} cards. Navigation: {}",
        deck.cards.len(),
        NAVIGATION
    );
    println!();
}

fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

/// Same information, written to the log buffer
pub fn log_startup(config: &Config, deck: &Deck) {
    tracing::info!("═══════════════════════════════════");
    tracing::info!("  {} ({} cards)", deck.title.to_uppercase(), deck.cards.len());
    tracing::info!("═══════════════════════════════════");

    for module in module_status(config) {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }

    tracing::info!("▸ Navigation: {}", NAVIGATION);
    if let Some(tagline) = &deck.tagline {
        tracing::info!("\"{}\"", tagline);
    }
}
