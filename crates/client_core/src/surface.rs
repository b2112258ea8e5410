//! Rendering surfaces the view and controller write into.
//!
//! Each trait stands for one element of the page: the activities container,
//! the activity selector, the signup form and the status container. They are
//! injected at construction so the components never look anything up.

use std::sync::{Mutex, MutexGuard, PoisonError};

use askama::Template;

use crate::status::{StatusKind, StatusMessage};

pub trait ActivitiesContainer: Send + Sync {
    /// Replaces the container's whole content with already-escaped markup.
    fn set_content(&self, html: String);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

pub trait ActivitySelect: Send + Sync {
    /// Replaces the full option set.
    fn set_options(&self, options: Vec<SelectOption>);
}

pub trait SignupForm: Send + Sync {
    fn reset(&self);
}

pub trait StatusContainer: Send + Sync {
    fn show(&self, text: &str, kind: StatusKind);
    fn hide(&self);
}

#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub activities_html: String,
    pub options: Vec<SelectOption>,
    pub email_input: String,
    pub form_resets: usize,
    pub status: Option<StatusMessage>,
}

/// In-memory page used by the command-line host and by tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<PageState>,
}

#[derive(Template)]
#[template(
    source = r#"<div id="activities-list">{{ activities_html|safe }}</div>
<select id="activity">
{%- for option in options %}
  <option value="{{ option.value }}">{{ option.label }}</option>
{%- endfor %}
</select>
<div id="message" class="{{ status_class }}">{{ status_text }}</div>
"#,
    ext = "html"
)]
struct PageSnapshot<'a> {
    activities_html: &'a str,
    options: &'a [SelectOption],
    status_class: &'a str,
    status_text: &'a str,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> PageState {
        self.lock().clone()
    }

    pub fn activities_html(&self) -> String {
        self.lock().activities_html.clone()
    }

    pub fn option_values(&self) -> Vec<String> {
        self.lock()
            .options
            .iter()
            .map(|option| option.value.clone())
            .collect()
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.lock().status.clone()
    }

    pub fn set_email_input(&self, email: impl Into<String>) {
        self.lock().email_input = email.into();
    }

    /// Serialises the page elements with the ids the static markup uses.
    pub fn snapshot_html(&self) -> Result<String, askama::Error> {
        let state = self.lock();
        let (status_class, status_text) = match &state.status {
            Some(status) if status.visible => (status.kind.css_class(), status.text.as_str()),
            Some(status) => ("hidden", status.text.as_str()),
            None => ("hidden", ""),
        };
        let snapshot = PageSnapshot {
            activities_html: &state.activities_html,
            options: &state.options,
            status_class,
            status_text,
        };
        let html = snapshot.render()?;
        Ok(html)
    }
}

impl ActivitiesContainer for MemorySurface {
    fn set_content(&self, html: String) {
        self.lock().activities_html = html;
    }
}

impl ActivitySelect for MemorySurface {
    fn set_options(&self, options: Vec<SelectOption>) {
        self.lock().options = options;
    }
}

impl SignupForm for MemorySurface {
    fn reset(&self) {
        let mut state = self.lock();
        state.email_input.clear();
        state.form_resets += 1;
    }
}

impl StatusContainer for MemorySurface {
    fn show(&self, text: &str, kind: StatusKind) {
        self.lock().status = Some(StatusMessage {
            text: text.to_string(),
            kind,
            visible: true,
        });
    }

    fn hide(&self) {
        if let Some(status) = self.lock().status.as_mut() {
            status.visible = false;
        }
    }
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
