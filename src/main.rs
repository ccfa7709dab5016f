use std::fs::File;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use arcade_hub::app::App;
use arcade_hub::config::{Cli, Config};
use arcade_hub::event::{Event, EventHandler};
use arcade_hub::ui;

/// Logs go to a file; the terminal belongs to the ui.
fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path();
    let file = File::create(&path).with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli).context("failed to load configuration")?;
    init_logging(&config)?;
    log::info!("starting with {:?}", config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    // Key release events, where the terminal can report them
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &config);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("exiting on error: {:#}", e);
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    let event_handler = EventHandler::new(Duration::from_millis(config.tick_rate_ms));

    let size = terminal.size()?;
    app.set_game_area(ui::layout(Rect::new(0, 0, size.width, size.height)).1);

    // Main loop
    loop {
        terminal.draw(|frame| {
            app.set_game_area(ui::layout(frame.area()).1);
            ui::render(frame, &app);
        })?;

        match event_handler.next()? {
            Event::Tick(dt) => app.on_tick(dt),
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            Event::Resize(width, height) => {
                log::debug!("terminal resized to {}x{}", width, height);
                app.set_game_area(ui::layout(Rect::new(0, 0, width, height)).1);
            }
        }

        if app.should_quit {
            break;
        }
    }
    log::info!("quit");
    Ok(())
}
