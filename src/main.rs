mod app;
mod config;
mod error;
mod pet;
mod sound;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use sound::SoundBackend;

#[derive(Parser, Debug)]
#[command(name = "gigapet")]
#[command(version = "0.1.0")]
#[command(about = "A terminal virtual pet")]
struct Args {
    /// Name of the pet you start with
    #[arg(short, long)]
    name: Option<String>,

    /// Kind of the pet you start with (cat, dog, bird, fish, ...)
    #[arg(short, long)]
    kind: Option<String>,

    /// Disable sound cues
    #[arg(short, long)]
    mute: bool,

    /// Use this config file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding images/ and sounds/
    #[arg(short, long)]
    assets: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so `2>gigapet.log` keeps the screen clean)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    run_tui(&config).await
}

fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load().unwrap_or_default(),
    };

    if let Some(name) = &args.name {
        config.default_pet.name = name.clone();
    }
    if let Some(kind) = &args.kind {
        config.default_pet.kind = kind.clone();
    }
    if let Some(assets) = &args.assets {
        config.assets_dir = assets.clone();
    }
    if args.mute {
        config.sound = SoundBackend::Off;
    }

    // The startup pet needs a name like any other
    error::require_name(&config.default_pet.name)?;

    Ok(config)
}

async fn run_tui(config: &AppConfig) -> Result<()> {
    // Setup terminal; raw mode must not outlive a failed setup
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        restore_terminal,
    )?;

    let player = sound::player_for(config.sound, &config.assets_dir);
    let mut app = App::new(config, player);
    tracing::info!("Session started with {}", config.default_pet.name);

    let result = run_app(&mut terminal, &mut app).await;
    tracing::info!(
        "Session ended with {} pets and {} log entries",
        app.widget.registry().len(),
        app.widget.registry().log().len()
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Runs `setup`, calling `restore` before passing on its error
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            restore();
            Err(e)
        }
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!("Failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        tracing::warn!("Failed to leave alternate screen: {}", e);
    }
}

/// Runs blocking terminal I/O on the blocking pool so runtime workers stay
/// free for sound tasks
async fn off_worker<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

async fn next_event(timeout: Duration) -> Result<Option<Event>> {
    off_worker(move || {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    })
    .await
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Some(Event::Key(key)) = next_event(Duration::from_millis(100)).await? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => app.handle_key(key),
                }
            }
        }

        // Periodic refresh: animation frames and status expiry
        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("gigapet").chain(argv.iter().copied()))
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        AppConfig::default().save_to(&path).unwrap();
        let path_str = path.to_str().unwrap();

        let config = resolve_config(&args(&[
            "--config", path_str, "--name", "Rex", "--kind", "dog", "--mute", "--assets", "/tmp/pets",
        ]).unwrap())
        .unwrap();

        assert_eq!(config.default_pet.name, "Rex");
        assert_eq!(config.default_pet.kind, "dog");
        assert_eq!(config.sound, SoundBackend::Off);
        assert_eq!(config.assets_dir, PathBuf::from("/tmp/pets"));
    }

    #[test]
    fn test_empty_startup_name_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        AppConfig::default().save_to(&path).unwrap();

        // Either clap or the presence check refuses it
        let refused = match args(&["--config", path.to_str().unwrap(), "--name", ""]) {
            Ok(args) => resolve_config(&args).is_err(),
            Err(_) => true,
        };
        assert!(refused);
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: Result<()> = setup_or_restore(|| Err(anyhow::anyhow!("no tty")), || restored = true);
        assert!(result.is_err());
        assert!(restored);

        let mut restored = false;
        let value = setup_or_restore(|| Ok(7), || restored = true).unwrap();
        assert_eq!(value, 7);
        assert!(!restored);
    }

    #[tokio::test]
    async fn test_blocking_wait_leaves_runtime_free() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        // Single-threaded runtime: the spawned task only runs if the wait
        // below does not hold the thread
        let flag = Arc::new(AtomicBool::new(false));
        let setter = flag.clone();
        tokio::spawn(async move { setter.store(true, Ordering::SeqCst) });

        let seen = off_worker(move || {
            let deadline = std::time::Instant::now() + Duration::from_secs(2);
            while std::time::Instant::now() < deadline {
                if flag.load(Ordering::SeqCst) {
                    return Ok(true);
                }
                std::thread::sleep(Duration::from_millis(5));
            }
            Ok(false)
        })
        .await
        .unwrap();
        assert!(seen);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let result = resolve_config(&args(&["--config", "/nonexistent/gigapet.toml"]).unwrap());
        assert!(result.is_err());
    }
}
