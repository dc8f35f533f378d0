use color_eyre::eyre::{WrapErr, eyre};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::env;
use std::io::stdout;
use std::path::PathBuf;

use burger_dodge::{GameConfig, app::App, headless};

const LOG_FILE: &str = "burger-dodge.log";

/// Command line: `burger-dodge [CONFIG.json] [--headless TICKS] [--seed N]`
#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    headless_ticks: Option<u32>,
    seed: Option<u64>,
}

fn parse_args() -> color_eyre::Result<Args> {
    let mut args = Args::default();
    let mut raw = env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--headless" => {
                let value = raw.next().ok_or_else(|| eyre!("--headless needs a tick count"))?;
                args.headless_ticks =
                    Some(value.parse().wrap_err("--headless expects a number")?);
            }
            "--seed" => {
                let value = raw.next().ok_or_else(|| eyre!("--seed needs a value"))?;
                args.seed = Some(value.parse().wrap_err("--seed expects a number")?);
            }
            path => args.config_path = Some(PathBuf::from(path)),
        }
    }
    Ok(args)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = parse_args()?;
    let config = GameConfig::load_or_default(args.config_path.as_deref())?;

    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    simple_logging::log_to_file(LOG_FILE, level).wrap_err("failed to open log file")?;
    info!("config: {config:?}");

    if let Some(ticks) = args.headless_ticks {
        let summary = headless::run(config, args.seed.unwrap_or(0), ticks);
        println!(
            "ticks: {}  score: {}  lives: {}  level: {}  game over: {}",
            summary.ticks, summary.score, summary.lives, summary.level, summary.game_over
        );
        return Ok(());
    }

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!("keyboard enhancement supported: {supports_keyboard_enhancement}");

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = App::new(config).run(&mut terminal);

    // Cleanup
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
