//! Reqwest-backed remote store adapter.
//!
//! Owns transport details only: session cookie handling, status and error
//! mapping, and JSON decoding into the shared wire types. Recovery policy
//! lives in the store, not here.

use std::time::Duration;

use async_trait::async_trait;
use board_core::{
    CreateTaskBody, ErrorBody, ErrorCode, TaskDeleted, TaskMutation, TaskPayload, UpdateTaskBody,
    UserRef,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::remote::{RemoteTasks, RemoteTasksError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Remote store adapter speaking the board's HTTP API.
///
/// Holds the session cookie issued by [`HttpRemoteTasks::login`] in the
/// underlying cookie store, so subsequent writes carry the identity.
pub struct HttpRemoteTasks {
    client: Client,
    base: Url,
}

impl HttpRemoteTasks {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteTasksError> {
        self.base
            .join(path)
            .map_err(|error| RemoteTasksError::transport(format!("invalid endpoint: {error}")))
    }

    /// Establish a session; the cookie is retained for later calls.
    ///
    /// # Errors
    /// [`RemoteTasksError::Unauthorized`] on bad credentials, otherwise the
    /// usual transport and decode failures.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRef, RemoteTasksError> {
        let response = self
            .client
            .post(self.endpoint("api/v1/login")?)
            .json(&LoginBody { username, password })
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RemoteTasksError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref())
        .map_err(|error| RemoteTasksError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> RemoteTasksError {
    RemoteTasksError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteTasksError {
    let decoded: Option<ErrorBody> = serde_json::from_slice(body).ok();
    let message = decoded.as_ref().map_or_else(
        || format!("status {}", status.as_u16()),
        |body| body.message.clone(),
    );

    // Prefer the server's error code over the raw status; both agree when
    // the payload comes from this backend.
    if let Some(body) = &decoded {
        match body.code {
            ErrorCode::InvalidRequest => return RemoteTasksError::validation(message),
            ErrorCode::Unauthorized => return RemoteTasksError::unauthorized(message),
            ErrorCode::Forbidden => return RemoteTasksError::forbidden(message),
            ErrorCode::NotFound => return RemoteTasksError::not_found(message),
            _ => return RemoteTasksError::transport(message),
        }
    }

    match status {
        StatusCode::BAD_REQUEST => RemoteTasksError::validation(message),
        StatusCode::UNAUTHORIZED => RemoteTasksError::unauthorized(message),
        StatusCode::FORBIDDEN => RemoteTasksError::forbidden(message),
        StatusCode::NOT_FOUND => RemoteTasksError::not_found(message),
        _ => RemoteTasksError::transport(message),
    }
}

#[async_trait]
impl RemoteTasks for HttpRemoteTasks {
    async fn list(&self) -> Result<Vec<TaskPayload>, RemoteTasksError> {
        let response = self
            .client
            .get(self.endpoint("api/v1/tasks")?)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(response).await
    }

    async fn create(&self, body: CreateTaskBody) -> Result<TaskMutation, RemoteTasksError> {
        let response = self
            .client
            .post(self.endpoint("api/v1/tasks")?)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(response).await
    }

    async fn update(
        &self,
        id: Uuid,
        body: UpdateTaskBody,
    ) -> Result<TaskMutation, RemoteTasksError> {
        let response = self
            .client
            .patch(self.endpoint(&format!("api/v1/tasks/{id}"))?)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(response).await
    }

    async fn delete(&self, id: Uuid) -> Result<TaskDeleted, RemoteTasksError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("api/v1/tasks/{id}"))?)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(response).await
    }
}
