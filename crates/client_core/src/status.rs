//! Transient user-facing status line shared by all commands.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use tracing::debug;

use crate::surface::StatusContainer;

pub const STATUS_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub visible: bool,
}

/// Issue order of a command. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CommandTicket(u64);

#[derive(Default)]
struct BoardState {
    shown_ticket: Option<CommandTicket>,
    generation: u64,
}

/// Owns the status container and decides which command result it shows.
///
/// A result is displayed only when no later-issued command has already shown
/// its own, so the line always reflects the most recent user action even if
/// responses arrive out of order. Every display schedules a hide after the
/// display window; a hide only applies to the display that scheduled it.
pub struct StatusBoard {
    container: Arc<dyn StatusContainer>,
    display_window: Duration,
    next_ticket: AtomicU64,
    state: Arc<Mutex<BoardState>>,
}

impl StatusBoard {
    pub fn new(container: Arc<dyn StatusContainer>) -> Self {
        Self::with_display_window(container, STATUS_DISPLAY_WINDOW)
    }

    pub fn with_display_window(container: Arc<dyn StatusContainer>, display_window: Duration) -> Self {
        Self {
            container,
            display_window,
            next_ticket: AtomicU64::new(1),
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    pub fn display_window(&self) -> Duration {
        self.display_window
    }

    pub fn issue_ticket(&self) -> CommandTicket {
        CommandTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Shows `text` for the command holding `ticket`. Returns `false` when a
    /// later command already owns the status line.
    pub fn publish(&self, ticket: CommandTicket, text: &str, kind: StatusKind) -> bool {
        let generation = {
            let mut state = lock(&self.state);
            if state.shown_ticket.is_some_and(|shown| shown > ticket) {
                debug!(?ticket, "dropping status from superseded command");
                return false;
            }
            state.shown_ticket = Some(ticket);
            state.generation += 1;
            self.container.show(text, kind);
            state.generation
        };
        self.schedule_hide(generation);
        true
    }

    fn schedule_hide(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        let container = Arc::clone(&self.container);
        let window = self.display_window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let state = lock(&state);
            if state.generation == generation {
                container.hide();
            }
        });
    }
}

fn lock(state: &Mutex<BoardState>) -> MutexGuard<'_, BoardState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
