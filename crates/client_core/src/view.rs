use std::sync::{Arc, Mutex, PoisonError};

use askama::Template;
use shared::domain::{Activity, Roster};
use tracing::error;

use crate::surface::{ActivitiesContainer, ActivitySelect, SelectOption};

pub const LOAD_FAILURE_HTML: &str = "<p>Failed to load activities. Please try again later.</p>";

/// Result of one roster fetch, as handed to the view.
#[derive(Debug, Clone)]
pub enum RosterSnapshot {
    Loaded(Roster),
    Unavailable,
}

struct ParticipantEntry<'a> {
    email: &'a str,
    initials: String,
}

// Every interpolation below goes through askama's HTML escaper.
#[derive(Template)]
#[template(
    source = r#"<div class="activity-card">
  <h4>{{ name }}</h4>
  <p>{{ description }}</p>
  <p><strong>Schedule:</strong> {{ schedule }}</p>
  <p><strong>Availability:</strong> {{ spots_left }} spots left</p>
  <div class="participants">
    <h5>Participants</h5>
    {%- if participants.is_empty() %}
    <div class="empty">No participants yet</div>
    {%- else %}
    <ul>
      {%- for participant in participants %}
      <li><span class="avatar">{{ participant.initials }}</span><span class="name">{{ participant.email }}</span><button type="button" class="withdraw" data-activity="{{ name }}" data-email="{{ participant.email }}" title="Withdraw">Withdraw</button></li>
      {%- endfor %}
    </ul>
    {%- endif %}
  </div>
</div>
"#,
    ext = "html"
)]
struct ActivityCard<'a> {
    name: &'a str,
    description: &'a str,
    schedule: &'a str,
    spots_left: i64,
    participants: Vec<ParticipantEntry<'a>>,
}

impl<'a> ActivityCard<'a> {
    fn new(name: &'a str, activity: &'a Activity) -> Self {
        Self {
            name,
            description: &activity.description,
            schedule: &activity.schedule,
            spots_left: activity.spots_left(),
            participants: activity
                .participants
                .iter()
                .map(|email| ParticipantEntry {
                    email,
                    initials: initials(email),
                })
                .collect(),
        }
    }
}

/// Two-letter avatar badge for a participant.
pub fn initials(participant: &str) -> String {
    let mut tokens = participant.split_whitespace();
    let Some(first) = tokens.next() else {
        return String::new();
    };
    let badge: String = match tokens.last() {
        None => first.chars().take(2).collect(),
        Some(last) => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };
    badge.to_uppercase()
}

pub struct RosterView {
    container: Arc<dyn ActivitiesContainer>,
    select: Arc<dyn ActivitySelect>,
    render_lock: Mutex<()>,
}

impl RosterView {
    pub fn new(container: Arc<dyn ActivitiesContainer>, select: Arc<dyn ActivitySelect>) -> Self {
        Self {
            container,
            select,
            render_lock: Mutex::new(()),
        }
    }

    /// Replaces the container content and the selector options wholesale.
    pub fn render(&self, snapshot: &RosterSnapshot) {
        // Container and selector must always describe the same fetch.
        let _guard = self.render_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let roster = match snapshot {
            RosterSnapshot::Loaded(roster) => roster,
            RosterSnapshot::Unavailable => {
                self.show_failure();
                return;
            }
        };

        let mut html = String::new();
        let mut options = Vec::with_capacity(roster.len());
        for (name, activity) in roster.iter() {
            match ActivityCard::new(name, activity).render() {
                Ok(card) => html.push_str(&card),
                Err(err) => {
                    error!(activity = name, error = %err, "failed to render activity card");
                    self.show_failure();
                    return;
                }
            }
            options.push(SelectOption {
                value: name.to_string(),
                label: name.to_string(),
            });
        }

        self.container.set_content(html);
        self.select.set_options(options);
    }

    fn show_failure(&self) {
        self.container.set_content(LOAD_FAILURE_HTML.to_string());
        self.select.set_options(Vec::new());
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
