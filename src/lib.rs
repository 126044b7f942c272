pub mod app;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod scene;
pub mod ui;

use std::io::{self, Stdout};

use anyhow::{Context, Result, bail};
use app::events::{AppEvent, spawn_input_task};
use app::profile::{Profile, default_profile_path, load_profile, save_profile};
use app::settings::RuntimeSettings;
use app::state::{AppMode, AppState};
use cli::Cli;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    if cli.init_profile {
        return init_profile(&cli);
    }

    let profile = load_profile(cli.profile.as_deref())?;
    if cli.one_shot {
        print!("{}", ui::widgets::card::plain_text(&profile, cli.icons));
        return Ok(());
    }

    let settings = RuntimeSettings::from_cli(&cli);
    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, settings, profile).await;
    restore_terminal(&mut terminal)?;
    result
}

fn init_profile(cli: &Cli) -> Result<()> {
    let path = match &cli.profile {
        Some(path) => path.clone(),
        None => default_profile_path()
            .context("no profile location: set HOME or STORMBIO_CONFIG_DIR")?,
    };
    if path.exists() {
        bail!("{} already exists; not overwriting", path.display());
    }
    save_profile(&path, &Profile::default())?;
    println!("wrote {}", path.display());
    Ok(())
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: RuntimeSettings,
    profile: Profile,
) -> Result<()> {
    let size = terminal.size()?;
    let screen = Rect::new(0, 0, size.width, size.height);
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(settings, profile, screen);

    let result = drive(terminal, &mut app, &tx, &mut rx, &mut input_stream).await;
    app.shutdown().await;
    info!(frames = app.frame_tick, "storm stopped");
    result
}

async fn drive<S>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
    input_stream: &mut S,
) -> Result<()>
where
    S: futures::Stream<Item = crossterm::event::Event> + Unpin,
{
    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), tx).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, tx).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
