use std::{
    fmt::Debug,
    io::{self, Write},
};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Thunder,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("writing bell to the terminal failed")]
    Bell(#[from] io::Error),
}

/// Receives thunder cues. [`TerminalBell`] rings the bell when `--bell` is
/// set, [`Silent`] swallows the cue otherwise.
pub trait ToneSink: Debug + Send {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;

    /// Number of cues that reached the sink, played or not.
    fn cues_seen(&self) -> u64;
}

#[derive(Debug, Default)]
pub struct Silent {
    seen: u64,
}

impl ToneSink for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        self.seen += 1;
        Ok(())
    }

    fn cues_seen(&self) -> u64 {
        self.seen
    }
}

/// Writes BEL to stdout. The terminal decides whether that beeps or flashes.
#[derive(Debug, Default)]
pub struct TerminalBell {
    seen: u64,
}

impl ToneSink for TerminalBell {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        self.seen += 1;
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }

    fn cues_seen(&self) -> u64 {
        self.seen
    }
}

#[must_use]
pub fn sink_for(bell: bool) -> Box<dyn ToneSink> {
    if bell {
        Box::new(TerminalBell::default())
    } else {
        Box::new(Silent::default())
    }
}

/// Playback failures only reach the log.
pub fn play_logged(sink: &mut dyn ToneSink, cue: Cue) {
    if let Err(err) = sink.play(cue) {
        warn!(?cue, error = %err, "failed to play cue");
    }
}
