use std::time::Instant;

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::layout::Rect;
use tokio::{
    sync::{mpsc, watch},
    task::{AbortHandle, JoinSet},
};
use tracing::{debug, info};

use crate::{
    app::{
        audio::{Cue, ToneSink, play_logged, sink_for},
        events::{
            AppEvent, schedule_flash_decay, start_drift_task, start_frame_task,
            start_lightning_task,
        },
        launch::{LinkOpener, SystemOpener, open_logged},
        profile::Profile,
        settings::RuntimeSettings,
    },
    domain::{Point, Viewport, flash::DecayTicket, weather::WeatherState},
    scene::WeatherScene,
    ui::widgets::card::CardLayout,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Running,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub profile: Profile,
    pub settings: RuntimeSettings,
    pub scene: WeatherScene,
    /// Snapshot the scene was last ticked with.
    pub weather: WeatherState,
    pub selected_link: usize,
    pub pointer: Option<Point>,
    pub screen: Rect,
    pub last_frame_at: Instant,
    pub frame_tick: u64,
    rng: StdRng,
    weather_rx: watch::Receiver<WeatherState>,
    weather_tx: Option<watch::Sender<WeatherState>>,
    tasks: JoinSet<()>,
    flash_decay: Option<AbortHandle>,
    tone: Box<dyn ToneSink>,
    opener: Box<dyn LinkOpener>,
}

impl AppState {
    pub fn new(settings: RuntimeSettings, profile: Profile, screen: Rect) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let weather = WeatherState::default();
        let (weather_tx, weather_rx) = watch::channel(weather);
        let scene = WeatherScene::new(
            Viewport::from_cells(screen.width, screen.height),
            &weather,
            StdRng::seed_from_u64(rng.random()),
        );

        Self {
            mode: AppMode::Running,
            running: true,
            profile,
            settings,
            scene,
            weather,
            selected_link: 0,
            pointer: None,
            screen,
            last_frame_at: Instant::now(),
            frame_tick: 0,
            rng,
            weather_rx,
            weather_tx: Some(weather_tx),
            tasks: JoinSet::new(),
            flash_decay: None,
            tone: sink_for(settings.bell),
            opener: Box::new(SystemOpener),
        }
    }

    /// Swaps the tone and link side effects, mainly for tests.
    #[must_use]
    pub fn with_effects(mut self, tone: Box<dyn ToneSink>, opener: Box<dyn LinkOpener>) -> Self {
        self.tone = tone;
        self.opener = opener;
        self
    }

    #[must_use]
    pub fn tone(&self) -> &dyn ToneSink {
        self.tone.as_ref()
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn has_flash_decay(&self) -> bool {
        self.flash_decay
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.bootstrap(tx),
            AppEvent::TickFrame => {
                let now = Instant::now();
                let delta = now.duration_since(self.last_frame_at);
                self.last_frame_at = now;
                self.frame_tick = self.frame_tick.saturating_add(1);

                self.weather = *self.weather_rx.borrow_and_update();
                self.scene.tick(delta, self.weather, self.pointer);
                while self.tasks.try_join_next().is_some() {}
            }
            AppEvent::Strike(strike) => {
                if self.settings.flash {
                    let ticket = self.scene.apply_strike(&strike);
                    self.arm_flash_decay(ticket, tx);
                } else {
                    self.scene.add_bolts(&strike);
                }
            }
            AppEvent::Flash(flash) => {
                if self.settings.flash {
                    let ticket = self.scene.ignite(flash);
                    self.arm_flash_decay(ticket, tx);
                }
            }
            AppEvent::FlashDecay { generation } => {
                if !self.scene.decay_flash(generation) {
                    debug!(generation, "stale flash decay ignored");
                }
            }
            AppEvent::ThunderTone => play_logged(self.tone.as_mut(), Cue::Thunder),
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    /// Aborts every timer the app owns.
    pub async fn shutdown(&mut self) {
        self.flash_decay = None;
        self.tasks.shutdown().await;
    }

    fn bootstrap(&mut self, tx: &mpsc::Sender<AppEvent>) {
        info!(
            fps = self.settings.fps,
            animate = self.settings.animates(),
            links = self.profile.links.len(),
            "storm starting"
        );
        if !self.settings.animates() {
            return;
        }
        let Some(weather_tx) = self.weather_tx.take() else {
            return;
        };
        self.last_frame_at = Instant::now();
        start_frame_task(&mut self.tasks, tx.clone(), self.settings.fps);
        start_lightning_task(
            &mut self.tasks,
            tx.clone(),
            self.weather_rx.clone(),
            StdRng::seed_from_u64(self.rng.random()),
        );
        start_drift_task(
            &mut self.tasks,
            weather_tx,
            StdRng::seed_from_u64(self.rng.random()),
        );
    }

    fn arm_flash_decay(&mut self, ticket: Option<DecayTicket>, tx: &mpsc::Sender<AppEvent>) {
        if let Some(previous) = self.flash_decay.take() {
            previous.abort();
        }
        if let Some(ticket) = ticket {
            self.flash_decay = Some(schedule_flash_decay(&mut self.tasks, tx.clone(), ticket));
        }
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, tx).await?,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.screen = Rect::new(0, 0, width, height);
                self.scene
                    .resize(Viewport::from_cells(width, height), &self.weather);
                self.pointer = None;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                tx.send(AppEvent::Quit).await?;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                tx.send(AppEvent::Quit).await?;
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Enter => {
                self.open_selected();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let hovered = self.link_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = Some(Viewport::cell_center(mouse.column, mouse.row));
                if let Some(index) = hovered {
                    self.selected_link = index;
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = hovered {
                    self.selected_link = index;
                    self.open_selected();
                }
            }
            _ => {}
        }
    }

    fn link_at(&self, column: u16, row: u16) -> Option<usize> {
        CardLayout::compute(self.screen, &self.profile, self.settings.icon_mode)?
            .link_at(column, row)
    }

    pub fn select_next(&mut self) {
        let count = self.profile.links.len();
        if count > 0 {
            self.selected_link = (self.selected_link + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.profile.links.len();
        if count > 0 {
            self.selected_link = (self.selected_link + count - 1) % count;
        }
    }

    /// Opens the highlighted link; launch failures only reach the log.
    pub fn open_selected(&mut self) -> bool {
        let Some(link) = self.profile.links.get(self.selected_link) else {
            return false;
        };
        open_logged(self.opener.as_mut(), &link.url)
    }
}
