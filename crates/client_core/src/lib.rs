use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::Roster,
    error::ApiError,
    protocol::{ServerReply, SignupQuery, UnregisterRequest},
};
use tracing::debug;
use url::Url;

pub mod controller;
pub mod error;
pub mod status;
pub mod surface;
pub mod view;

pub use controller::{CommandOutcome, CommandPhase, RosterController};
pub use error::ClientError;
pub use status::{StatusBoard, StatusKind, StatusMessage, STATUS_DISPLAY_WINDOW};
pub use surface::{ActivitiesContainer, ActivitySelect, MemorySurface, SignupForm, StatusContainer};
pub use view::{initials, RosterSnapshot, RosterView};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The REST backend as seen by the controller.
#[async_trait]
pub trait RosterApi: Send + Sync {
    async fn fetch_roster(&self) -> Result<Roster, ClientError>;
    /// Resolves to the server's reply on 2xx and to
    /// [`ClientError::Application`] when the server rejected the signup.
    async fn enroll(&self, activity: &str, email: &str) -> Result<ServerReply, ClientError>;
    /// Resolves to whatever JSON reply the server sent, regardless of status.
    async fn withdraw(&self, activity: &str, email: &str) -> Result<ServerReply, ClientError>;
}

pub struct HttpRosterApi {
    http: Client,
    base_url: Url,
}

impl HttpRosterApi {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(server_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: server_url.to_string(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::CannotBeABase(server_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path, percent-encoding each one so an
    /// activity name can never escape its path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode_body<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { endpoint, source })
}

#[async_trait]
impl RosterApi for HttpRosterApi {
    async fn fetch_roster(&self) -> Result<Roster, ClientError> {
        let url = self.endpoint(&["activities"])?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: "activities",
                status: status.as_u16(),
            });
        }
        decode_body("activities", response).await
    }

    async fn enroll(&self, activity: &str, email: &str) -> Result<ServerReply, ClientError> {
        let url = self.endpoint(&["activities", activity, "signup"])?;
        let response = self
            .http
            .post(url)
            .query(&SignupQuery {
                email: email.to_string(),
            })
            .send()
            .await?;
        let status = response.status();
        let reply: ServerReply = decode_body("signup", response).await?;
        debug!(activity, status = status.as_u16(), "signup answered");

        if status.is_success() {
            Ok(reply)
        } else {
            Err(ApiError::new(status.as_u16(), reply.detail_text().map(str::to_owned)).into())
        }
    }

    async fn withdraw(&self, activity: &str, email: &str) -> Result<ServerReply, ClientError> {
        let url = self.endpoint(&["activities", activity, "unregister"])?;
        let response = self
            .http
            .delete(url)
            .json(&UnregisterRequest {
                email: email.to_string(),
            })
            .send()
            .await?;
        let status = response.status();
        let reply = decode_body("unregister", response).await?;
        debug!(activity, status = status.as_u16(), "unregister answered");
        Ok(reply)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
