use utoipa::OpenApi;

/// Combined API documentation served at `/api-docs/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tasker API",
        version = "0.1.0",
        description = "Task tracking: unique titles, due dates in the future, status workflow"
    ),
    nest(
        (path = "/api/v1/tasks", api = domain_tasks::ApiDoc),
    )
)]
pub struct ApiDoc;
