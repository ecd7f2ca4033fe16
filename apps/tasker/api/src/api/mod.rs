use axum::Router;
use domain_tasks::{PgTaskRepository, TaskService};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    let tasks = TaskService::new(PgTaskRepository::new(state.db.clone()));

    Router::new().nest("/v1/tasks", domain_tasks::handlers::router(tasks))
}

/// Router with the `/ready` endpoint; merged next to `/health`, outside `/api`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
