#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use clap::Parser;
use ratatui::{Terminal, backend::TestBackend, layout::Rect};
use stormbio::{
    app::{
        audio::Silent,
        launch::{LaunchError, LinkOpener},
        profile::Profile,
        settings::RuntimeSettings,
        state::AppState,
    },
    cli::Cli,
    ui::{self, theme::ColorCapability},
};

/// Link opener that remembers every URL instead of launching a browser.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub fn opened(&self) -> Vec<String> {
        self.0.lock().expect("recorder lock").clone()
    }
}

impl LinkOpener for Recorder {
    fn open(&mut self, url: &str) -> Result<(), LaunchError> {
        self.0.lock().expect("recorder lock").push(url.to_string());
        Ok(())
    }
}

pub fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["stormbio", "--seed", "7"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

pub fn state(
    width: u16,
    height: u16,
    args: &[&str],
    capability: ColorCapability,
) -> (AppState, Recorder) {
    let settings = RuntimeSettings::with_capability(&cli(args), capability);
    let recorder = Recorder::default();
    let state = AppState::new(settings, Profile::default(), Rect::new(0, 0, width, height))
        .with_effects(Box::new(Silent::default()), Box::new(recorder.clone()));
    (state, recorder)
}

pub fn draw(state: &AppState) -> Terminal<TestBackend> {
    let mut terminal =
        Terminal::new(TestBackend::new(state.screen.width, state.screen.height)).unwrap();
    terminal.draw(|frame| ui::render(frame, state)).expect("draw");
    terminal
}

pub fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut lines = Vec::new();
    for y in 0..buffer.area.height {
        let mut line = String::new();
        for x in 0..buffer.area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
