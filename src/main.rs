#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use tetris_bricks::app::{App, AppResult};
use tetris_bricks::components::Input;
use tetris_bricks::config::Config;
use tetris_bricks::sound::AudioState;
use tetris_bricks::ui;

const LOG_PATH: &str = "tetris-bricks.log";

fn main() -> AppResult<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_PATH)?;

    // Redirect stderr to the log file so log lines don't land on the game screen
    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Tetris");

    if Config::force_reload() {
        info!("Configuration loaded successfully");
    } else {
        error!("Failed to load configuration, continuing with defaults");
    }
    let config = Config::current();
    debug!("Using {:?}", config);

    let audio = AudioState::new(&config.audio);
    if !audio.is_audio_available() {
        error!("Audio device is unavailable. Continuing without sound.");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_audio(config, audio);
    app.start();
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    info!("Bye");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> AppResult<()> {
    let frame_rate = app.config.timing.frame_rate();
    let tick_rate = app.config.timing.tick_rate();

    let mut last_render = Instant::now();
    let mut last_tick = Instant::now();

    // Drop anything typed before the game was on screen
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if last_render.elapsed() >= frame_rate {
            terminal.draw(|f| ui::render(f, app))?;
            app.record_render();
            last_render = Instant::now();
        }

        if last_tick.elapsed() >= tick_rate {
            let delta_seconds = last_tick.elapsed().as_secs_f32();
            last_tick = Instant::now();
            app.on_tick(delta_seconds);
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                debug!("Key event: {key:?}");

                if key.code == KeyCode::Char('q') {
                    app.quit();
                    continue;
                }

                if app.is_game_over() {
                    if key.code == KeyCode::Enter {
                        app.reset();
                    }
                    continue;
                }

                let mut input = app.world.resource_mut::<Input>();
                match key.code {
                    KeyCode::Left | KeyCode::Char('a') => {
                        input.current.left = true;
                        input.current.right = false;
                    }
                    KeyCode::Right | KeyCode::Char('d') => {
                        input.current.right = true;
                        input.current.left = false;
                    }
                    KeyCode::Down | KeyCode::Char('s') => input.current.down = true,
                    KeyCode::Char('w') => input.current.up = true,
                    KeyCode::Up | KeyCode::Char(' ') => input.current.rotate = true,
                    KeyCode::Char('m') => input.toggle_music = true,
                    KeyCode::Char('n') => input.toggle_sound = true,
                    KeyCode::Char('+' | '=') => input.volume_up = true,
                    KeyCode::Char('-' | '_') => input.volume_down = true,
                    _ => {}
                }
            }
        }
    }
}
