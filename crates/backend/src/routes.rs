use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::shared::files::service::FILES_URL_PREFIX;
use crate::system::state::SharedState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: SharedState, max_body_bytes: usize) -> Router {
    // GET отдаёт файл из каталога загрузок, DELETE удаляет его
    let files = Router::new().route(
        "/:filename",
        delete(handlers::files::delete).fallback_service(ServeDir::new(state.upload_dir.as_ref())),
    );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // PROJECTS / TASKS / MEMBERS
        // ========================================
        .route(
            "/api/projects",
            get(handlers::a001_project::list_all).post(handlers::a001_project::create),
        )
        .route(
            "/api/projects/:id",
            get(handlers::a001_project::get_by_id)
                .patch(handlers::a001_project::update)
                .put(handlers::a001_project::update)
                .delete(handlers::a001_project::delete),
        )
        .route(
            "/api/tasks",
            get(handlers::a002_task::list_all).post(handlers::a002_task::create),
        )
        .route(
            "/api/tasks/:id",
            get(handlers::a002_task::get_by_id)
                .patch(handlers::a002_task::update)
                .put(handlers::a002_task::update)
                .delete(handlers::a002_task::delete),
        )
        .route("/api/tasks/:id/assign", post(handlers::a002_task::assign))
        .route("/api/tasks/:id/comments", post(handlers::a002_task::comment))
        .route(
            "/api/members",
            get(handlers::a003_member::list_all).post(handlers::a003_member::create),
        )
        .route(
            "/api/members/:id",
            get(handlers::a003_member::get_by_id)
                .patch(handlers::a003_member::update)
                .put(handlers::a003_member::update)
                .delete(handlers::a003_member::delete),
        )
        // ========================================
        // ACTIVITY LOG / SETTINGS / BACKUP
        // ========================================
        .route(
            "/api/activities",
            get(handlers::a004_activity::list).delete(handlers::a004_activity::clear),
        )
        .route(
            "/api/settings",
            get(handlers::settings::get)
                .patch(handlers::settings::update)
                .put(handlers::settings::update),
        )
        .route("/api/settings/reset", post(handlers::settings::reset))
        .route("/api/backup/export", get(handlers::backup::export))
        .route("/api/backup/import", post(handlers::backup::import))
        // ========================================
        // DERIVED VIEWS
        // ========================================
        .route("/api/dashboard", get(handlers::dashboards::dashboard))
        .route("/api/notifications", get(handlers::dashboards::notifications))
        .route(
            "/api/reports/projects",
            get(handlers::dashboards::project_reports),
        )
        .route(
            "/api/reports/members",
            get(handlers::dashboards::member_workloads),
        )
        .route("/api/timeline", get(handlers::dashboards::timeline))
        .route("/api/calendar", get(handlers::dashboards::calendar))
        // ========================================
        // FILES
        // ========================================
        .route("/upload", post(handlers::files::upload))
        .nest(FILES_URL_PREFIX, files)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
