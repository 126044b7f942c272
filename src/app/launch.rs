use std::{
    fmt::Debug,
    io,
    process::{Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no opener known for this platform")]
    Unsupported,
    #[error("spawning {program} failed")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Hands a link to whatever opens URLs on this machine.
pub trait LinkOpener: Debug + Send {
    fn open(&mut self, url: &str) -> Result<(), LaunchError>;
}

#[derive(Debug, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<(), LaunchError> {
        let (program, leading) = opener_program().ok_or(LaunchError::Unsupported)?;
        let mut command = Command::new(program);
        command.args(leading).arg(url);
        spawn_reaped(command, program)?;
        Ok(())
    }
}

/// Starts `command` detached from the terminal and waits for it on a helper
/// thread so the finished process does not linger as a zombie.
pub fn spawn_reaped(
    mut command: Command,
    program: &'static str,
) -> Result<JoinHandle<io::Result<ExitStatus>>, LaunchError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| LaunchError::Spawn { program, source })?;
    Ok(thread::spawn(move || child.wait()))
}

/// Program plus leading arguments for the platform URL opener.
#[must_use]
pub fn opener_program() -> Option<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") {
        Some(("open", &[]))
    } else if cfg!(target_os = "windows") {
        // Bypasses cmd.exe, which would split URLs at `&`.
        Some(("rundll32", &["url.dll,FileProtocolHandler"]))
    } else if cfg!(unix) {
        Some(("xdg-open", &[]))
    } else {
        None
    }
}

pub fn open_logged(opener: &mut dyn LinkOpener, url: &str) -> bool {
    match opener.open(url) {
        Ok(()) => {
            debug!(url, "opened link");
            true
        }
        Err(err) => {
            warn!(url, error = %err, "failed to open link");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Refusing;

    impl LinkOpener for Refusing {
        fn open(&mut self, _url: &str) -> Result<(), LaunchError> {
            Err(LaunchError::Unsupported)
        }
    }

    #[test]
    fn launch_failure_is_reported_not_raised() {
        assert!(!open_logged(&mut Refusing, "https://example.com"));
    }

    #[cfg(unix)]
    #[test]
    fn spawned_opener_is_waited_for() {
        let handle = spawn_reaped(Command::new("true"), "true").expect("spawn true");
        let status = handle.join().expect("reaper thread").expect("wait");
        assert!(status.success());
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let command = Command::new("stormbio-no-such-opener");
        let err = spawn_reaped(command, "stormbio-no-such-opener").expect_err("spawn fails");
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn windows_opener_does_not_go_through_cmd() {
        assert_eq!(opener_program().map(|(program, _)| program), Some("rundll32"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_uses_xdg_open() {
        assert_eq!(opener_program().map(|(program, _)| program), Some("xdg-open"));
    }
}
