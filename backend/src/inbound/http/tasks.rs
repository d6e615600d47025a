//! Task HTTP handlers.
//!
//! ```text
//! GET    /api/v1/tasks
//! POST   /api/v1/tasks
//! PATCH  /api/v1/tasks/{id}
//! DELETE /api/v1/tasks/{id}
//! ```
//!
//! Reads are open to any caller; every write requires a session. The
//! handlers translate between HTTP and the driving ports and add nothing
//! else; permissions and completion rules live in the domain service.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use board_core::{CreateTaskBody, TaskDeleted, TaskPayload, UpdateTaskBody};
use uuid::Uuid;

use crate::domain::ports::{CreateTaskRequest, DeleteTaskRequest, UpdateTaskRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// List every task on the board, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "All tasks, relations resolved", body = [crate::inbound::http::schemas::TaskPayloadSchema]),
        (status = 503, description = "Store unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTasks",
    security([])
)]
#[get("/tasks")]
pub async fn list_tasks(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TaskPayload>>> {
    let tasks = state.queries.list_tasks().await?;
    Ok(web::Json(tasks))
}

/// Create a task owned by the logged-in member.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = crate::inbound::http::schemas::CreateTaskBodySchema,
    responses(
        (status = 201, description = "Created task plus any badges earned", body = crate::inbound::http::schemas::TaskMutationSchema),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Store unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<CreateTaskBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let mutation = state
        .commands
        .create_task(CreateTaskRequest {
            actor,
            body: payload.into_inner(),
        })
        .await?;
    Ok(HttpResponse::Created().json(mutation))
}

/// Apply a partial update to one task.
#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    request_body = crate::inbound::http::schemas::UpdateTaskBodySchema,
    responses(
        (status = 200, description = "Updated task plus any badges earned", body = crate::inbound::http::schemas::TaskMutationSchema),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Not permitted for this member", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No such task", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Store unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[patch("/tasks/{id}")]
pub async fn update_task(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateTaskBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let mutation = state
        .commands
        .update_task(UpdateTaskRequest {
            actor,
            id: id.into_inner(),
            body: payload.into_inner(),
        })
        .await?;
    Ok(HttpResponse::Ok().json(mutation))
}

/// Delete a task; creator only.
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Deletion acknowledgement", body = crate::inbound::http::schemas::TaskDeletedSchema),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Only the creator may delete", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No such task", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Store unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<TaskDeleted>> {
    let actor = session.require_user_id()?;
    let ack = state
        .commands
        .delete_task(DeleteTaskRequest {
            actor,
            id: id.into_inner(),
        })
        .await?;
    Ok(web::Json(ack))
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
