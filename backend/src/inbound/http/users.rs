//! Household member HTTP handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"maja","password":"hygge"}
//! GET /api/v1/users
//! ```

use actix_web::{get, post, web};
use board_core::UserRef;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{Credentials, UserDirectoryError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Unavailable { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
    }
}

fn validated_credentials(request: LoginRequest) -> Result<Credentials, Error> {
    let username = request.username.trim().to_owned();
    if username.is_empty() {
        return Err(Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })));
    }
    if request.password.is_empty() {
        return Err(Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })));
    }
    Ok(Credentials {
        username,
        password: request.password,
    })
}

/// Authenticate a household member and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success; the acting member", body = crate::inbound::http::schemas::UserRefSchema, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Directory unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserRef>> {
    let credentials = validated_credentials(payload.into_inner())?;
    let member = state
        .members
        .authenticate(&credentials)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::unauthorized("invalid credentials"))?;
    session.persist_user(member.id)?;
    Ok(web::Json(member.to_ref()))
}

/// List the household members tasks can reference.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Known household members", body = [crate::inbound::http::schemas::UserRefSchema]),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Directory unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserRef>>> {
    session.require_user_id()?;
    let members = state.members.list().await.map_err(map_directory_error)?;
    Ok(web::Json(
        members.iter().map(|member| member.to_ref()).collect(),
    ))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
