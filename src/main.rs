//! Questline - Entry Point
//!
//! Initializes the terminal, opens the tracker and runs the main loop.

use std::fs::OpenOptions;
use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use questline::game::{Game, GameState};
use questline::ui::App;

/// The board only changes on input or a date change
const FRAME_TIME: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("questline.log");

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match log_file {
        Ok(file) => {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            logger.filter_level(log::LevelFilter::Off);
        }
    }
    logger.init();

    log::info!("Starting Questline v{}", env!("CARGO_PKG_VERSION"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let mut game = Game::new();

    let result = run_loop(&mut terminal, &mut app, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Questline exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Questline shut down cleanly");
    result
}

/// Main loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut Game,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Picks up a date change while the app is left open
        app.sync(game);

        terminal.draw(|frame| {
            app.render(frame, game);
        })?;

        let timeout = FRAME_TIME.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press {
                    match app.handle_input(key, game) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => log::warn!("Input handling error: {}", e),
                    }
                }
            }
        }

        if matches!(game.state(), GameState::Quit) {
            break;
        }
    }

    Ok(())
}
