use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::{
    error::ClientError,
    status::{StatusBoard, StatusKind},
    surface::{ActivitiesContainer, ActivitySelect, SignupForm, StatusContainer},
    view::{RosterSnapshot, RosterView},
    RosterApi,
};

pub const GENERIC_REJECTION_TEXT: &str = "An error occurred";
pub const SIGNUP_FAILED_TEXT: &str = "Failed to sign up. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandPhase {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The server accepted the command; the roster has been reloaded.
    Succeeded { message: String },
    /// The server answered with a rejection.
    Rejected { detail: String },
    /// No usable answer: unreachable server, timeout or malformed body.
    Unreachable,
}

impl CommandOutcome {
    pub fn phase(&self) -> CommandPhase {
        match self {
            Self::Succeeded { .. } => CommandPhase::Succeeded,
            Self::Rejected { .. } | Self::Unreachable => CommandPhase::Failed,
        }
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Drives fetch/render cycles and the enroll/withdraw commands. The only
/// component that talks to the server.
pub struct RosterController {
    api: Arc<dyn RosterApi>,
    view: RosterView,
    status: StatusBoard,
    signup_form: Arc<dyn SignupForm>,
    in_flight: AtomicUsize,
}

impl RosterController {
    pub fn new(
        api: Arc<dyn RosterApi>,
        view: RosterView,
        status: StatusBoard,
        signup_form: Arc<dyn SignupForm>,
    ) -> Self {
        Self {
            api,
            view,
            status,
            signup_form,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Wires every page element to a single surface.
    pub fn with_surface<S>(api: Arc<dyn RosterApi>, surface: Arc<S>, display_window: Duration) -> Self
    where
        S: ActivitiesContainer + ActivitySelect + SignupForm + StatusContainer + 'static,
    {
        let view = RosterView::new(surface.clone(), surface.clone());
        let status = StatusBoard::with_display_window(surface.clone(), display_window);
        Self::new(api, view, status, surface)
    }

    /// Number of commands and loads currently awaiting the server.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> CommandPhase {
        if self.in_flight() == 0 {
            CommandPhase::Idle
        } else {
            CommandPhase::InFlight
        }
    }

    /// Fetches the roster and renders it, or renders the failure state.
    /// Returns whether a roster was rendered.
    pub async fn load_roster(&self) -> bool {
        let _in_flight = InFlight::enter(&self.in_flight);
        match self.api.fetch_roster().await {
            Ok(roster) => {
                info!(activities = roster.len(), "roster loaded");
                self.view.render(&RosterSnapshot::Loaded(roster));
                true
            }
            Err(err) => {
                error!(error = %err, "failed to fetch activities");
                self.view.render(&RosterSnapshot::Unavailable);
                false
            }
        }
    }

    pub fn spawn_load_roster(self: &Arc<Self>) -> JoinHandle<bool> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.load_roster().await })
    }

    pub async fn enroll(&self, activity: &str, email: &str) -> CommandOutcome {
        let ticket = self.status.issue_ticket();
        let result = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.api.enroll(activity, email).await
        };

        match result {
            Ok(reply) => {
                let message = reply.message.unwrap_or_default();
                info!(activity, email, "enrollment accepted");
                self.status.publish(ticket, &message, StatusKind::Success);
                self.signup_form.reset();
                self.load_roster().await;
                CommandOutcome::Succeeded { message }
            }
            Err(ClientError::Application(rejection)) => {
                warn!(activity, email, status = rejection.status, "enrollment rejected");
                let detail = rejection
                    .detail
                    .unwrap_or_else(|| GENERIC_REJECTION_TEXT.to_string());
                self.status.publish(ticket, &detail, StatusKind::Error);
                CommandOutcome::Rejected { detail }
            }
            Err(err) => {
                error!(activity, email, error = %err, "enrollment request failed");
                self.status
                    .publish(ticket, SIGNUP_FAILED_TEXT, StatusKind::Error);
                CommandOutcome::Unreachable
            }
        }
    }

    /// Withdrawals never touch the status line; a reply carrying `message`
    /// triggers a reload and everything else is only logged.
    pub async fn withdraw(&self, activity: &str, email: &str) -> CommandOutcome {
        let result = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.api.withdraw(activity, email).await
        };

        match result {
            Ok(reply) => match reply.message {
                Some(message) => {
                    info!(activity, email, "participant withdrawn");
                    self.load_roster().await;
                    CommandOutcome::Succeeded { message }
                }
                None => {
                    let detail = reply
                        .detail_text()
                        .unwrap_or(GENERIC_REJECTION_TEXT)
                        .to_string();
                    warn!(activity, email, detail = %detail, "withdrawal not confirmed");
                    CommandOutcome::Rejected { detail }
                }
            },
            Err(err) => {
                error!(activity, email, error = %err, "withdrawal request failed");
                CommandOutcome::Unreachable
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
