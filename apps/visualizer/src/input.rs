//! Keyboard command map and the interactive command loop.

use shared::domain::{Algorithm, Theme};
use sort_engine::{ControllerError, RunController, StartOutcome};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::watch,
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::{print_info, print_report, theme::ThemeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Start,
    Generate,
    Reset,
    Select(Algorithm),
    Size(usize),
    Speed(u8),
    ToggleTheme,
    Help,
    Quit,
}

pub const HELP: &str = "\
keys: s start | g generate | r reset | 1-6 select algorithm | t toggle theme | q quit
      size <n> | speed <1-10> | algo <name>";

/// Maps one line of input to a command. Single keys follow the keyboard
/// shortcuts; `size`, `speed` and `algo` take an argument.
pub fn parse_command(line: &str) -> Option<InputCommand> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let head = words.next()?.to_ascii_lowercase();
    let arg = words.next();

    let command = match (head.as_str(), arg) {
        ("s", None) | ("start", None) => InputCommand::Start,
        ("g", None) | ("generate", None) => InputCommand::Generate,
        ("r", None) | ("reset", None) => InputCommand::Reset,
        ("t", None) | ("theme", None) => InputCommand::ToggleTheme,
        ("q", None) | ("quit", None) => InputCommand::Quit,
        ("?", None) | ("h", None) | ("help", None) => InputCommand::Help,
        ("size", Some(n)) => InputCommand::Size(n.parse().ok()?),
        ("speed", Some(n)) => InputCommand::Speed(n.parse().ok()?),
        ("algo", Some(name)) => InputCommand::Select(Algorithm::from_name(name)),
        (key, None) if key.len() == 1 => {
            let digit = key.chars().next()?.to_digit(10)?;
            let index = usize::try_from(digit).ok()?.checked_sub(1)?;
            InputCommand::Select(*Algorithm::ALL.get(index)?)
        }
        _ => return None,
    };
    Some(command)
}

pub struct Session {
    controller: RunController,
    themes: ThemeStore,
    theme: watch::Sender<Theme>,
    json: bool,
    run: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(
        controller: RunController,
        themes: ThemeStore,
        theme: watch::Sender<Theme>,
        json: bool,
    ) -> Self {
        Self {
            controller,
            themes,
            theme,
            json,
            run: None,
        }
    }

    /// Reads commands until quit or end of input, then lets any in-flight
    /// run finish.
    pub async fn run<R: AsyncBufRead + Unpin>(mut self, input: R) -> anyhow::Result<()> {
        let mut lines = input.lines();
        eprintln!("{HELP}");
        while let Some(line) = lines.next_line().await? {
            let Some(command) = parse_command(&line) else {
                if !line.trim().is_empty() {
                    eprintln!("unrecognized input '{}'; ? for help", line.trim());
                }
                continue;
            };
            if command == InputCommand::Quit {
                break;
            }
            self.dispatch(command).await;
        }

        if let Some(run) = self.run.take() {
            run.await?;
        }
        Ok(())
    }

    pub async fn dispatch(&mut self, command: InputCommand) {
        let result = match command {
            InputCommand::Start => {
                self.spawn_run();
                Ok(())
            }
            InputCommand::Generate => self.controller.generate().await,
            InputCommand::Reset => self.controller.reset().await.map(|_| ()),
            InputCommand::Select(algorithm) => self
                .controller
                .select(algorithm)
                .await
                .map(print_info),
            InputCommand::Size(size) => self.controller.configure_size(size).await.map(|_| ()),
            InputCommand::Speed(speed) => self.controller.configure_speed(speed).await.map(|_| ()),
            InputCommand::ToggleTheme => {
                self.toggle_theme();
                Ok(())
            }
            InputCommand::Help => {
                eprintln!("{HELP}");
                Ok(())
            }
            InputCommand::Quit => Ok(()),
        };

        if let Err(ControllerError::Busy { algorithm }) = result {
            debug!(?command, %algorithm, "ignored while sorting");
        }
    }

    fn spawn_run(&mut self) {
        let controller = self.controller.clone();
        let json = self.json;
        let handle = tokio::spawn(async move {
            match controller.start().await {
                StartOutcome::Completed(report) => print_report(&report, json),
                StartOutcome::Rejected => debug!("start ignored while sorting"),
            }
        });
        // A rejected start finishes immediately; keep tracking the live run.
        if self.run.as_ref().map_or(true, |run| run.is_finished()) {
            self.run = Some(handle);
        }
    }

    fn toggle_theme(&mut self) {
        let current = *self.theme.borrow();
        match self.themes.toggle(current) {
            Ok(next) => {
                self.theme.send_replace(next);
                debug!(theme = next.as_str(), "theme toggled");
            }
            Err(error) => warn!(%error, "failed to persist theme preference"),
        }
    }
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
