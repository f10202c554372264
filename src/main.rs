use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use clap::Parser;
use color_eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal;

use smartnotes::ai::{OpenAiClient, spawn_worker};
use smartnotes::app::App;
use smartnotes::config::{describe_config_location, load_config};
use smartnotes::editor::EditorState;
use smartnotes::logging;

/// Terminal note editor with AI-generated titles, tags, rewrites and completions
#[derive(Parser, Debug)]
#[command(name = "smartnotes", version, about)]
struct Args {
    /// Path to the config file (default: ~/.config/smartnotes/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Model to use instead of the configured one
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Write debug logs to the cache directory
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();

    let log_path = logging::init(args.debug)?;
    if let Some(path) = &log_path {
        log::info!("Logging to {}", path.display());
    }

    // Everything that can fail on bad setup happens before the terminal is
    // taken over, so errors print normally
    let config = load_config(args.config.as_deref())?;
    let location = describe_config_location(args.config.as_deref());
    let gateway = config.ai.resolve(
        std::env::var("OPENAI_API_KEY").ok(),
        args.model,
        &location,
    )?;
    log::info!("Using model {} at {}", gateway.model, gateway.endpoint);

    let client = OpenAiClient::new(&gateway)?;
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let _worker = spawn_worker(client, request_rx, response_tx);

    let mut editor = EditorState::with_notification_timeout(config.notifications.timeout());
    editor.set_channels(request_tx, response_rx);

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    let keyboard_enhanced = enable_input_extensions();
    let result = App::new(editor).run(terminal);

    disable_input_extensions(keyboard_enhanced);
    // Restore terminal (automatic cleanup)
    ratatui::restore();

    result
}

/// Turn on bracketed paste, and Shift+Enter reporting where the terminal
/// supports the keyboard enhancement protocol
///
/// Returns whether enhancement flags were pushed. Alt+Enter remains the
/// suggestion key on terminals without it.
fn enable_input_extensions() -> bool {
    let mut stdout = io::stdout();
    if let Err(e) = stdout.execute(EnableBracketedPaste) {
        log::warn!("Bracketed paste unavailable: {}", e);
    }

    match terminal::supports_keyboard_enhancement() {
        Ok(true) => stdout
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
            ))
            .is_ok(),
        _ => {
            log::debug!("Keyboard enhancement not supported, Shift+Enter may not be reported");
            false
        }
    }
}

fn disable_input_extensions(keyboard_enhanced: bool) {
    let mut stdout = io::stdout();
    if keyboard_enhanced {
        let _ = stdout.execute(PopKeyboardEnhancementFlags);
    }
    let _ = stdout.execute(DisableBracketedPaste);
}
