//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI document for the board's REST API: the
//! task and member endpoints, the health probes, the shared error schema,
//! and the session-cookie security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{
    CreateTaskBodySchema, ErrorCodeSchema, ErrorSchema, TaskDeletedSchema, TaskMutationSchema,
    TaskPayloadSchema, TaskStatusSchema, UpdateTaskBodySchema, UserRefSchema,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the task board API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Task board API",
        description = "HTTP interface for the household task board: session \
                       login, task CRUD, and badge-carrying mutation responses."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserRefSchema,
        TaskStatusSchema,
        TaskPayloadSchema,
        CreateTaskBodySchema,
        UpdateTaskBodySchema,
        TaskMutationSchema,
        TaskDeletedSchema,
    )),
    tags(
        (name = "users", description = "Login and household membership"),
        (name = "tasks", description = "The task board"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names.
    const ERROR_SCHEMA_NAME: &str = "board_core.ErrorBody";
    const TASK_SCHEMA_NAME: &str = "board_core.TaskPayload";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn the_error_schema_is_registered_with_its_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("error schema");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn the_task_schema_carries_the_completion_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let task_schema = schemas.get(TASK_SCHEMA_NAME).expect("task schema");
        assert_object_schema_has_field(task_schema, "status");
        assert_object_schema_has_field(task_schema, "completed");
        assert_object_schema_has_field(task_schema, "completedBy");
    }

    #[test]
    fn every_task_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in ["/api/v1/tasks", "/api/v1/tasks/{id}", "/api/v1/login"] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }
}
