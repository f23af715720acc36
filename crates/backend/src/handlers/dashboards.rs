use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use contracts::dashboards::d400_dashboard::dto::DashboardResponse;
use contracts::dashboards::d401_notifications::dto::Notification;
use contracts::dashboards::d402_reports::dto::{MemberWorkload, ProjectReport};
use contracts::dashboards::d403_timeline::dto::TimelineItem;
use contracts::dashboards::d404_calendar::dto::{CalendarDay, CalendarRequest};

use crate::dashboards::{
    d400_dashboard, d401_notifications, d402_reports, d403_timeline, d404_calendar,
};
use crate::system::state::SharedState;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /api/dashboard
pub async fn dashboard(State(state): State<SharedState>) -> Json<DashboardResponse> {
    let app = state.app.lock().await;
    Json(d400_dashboard::service::get_dashboard(&app, today()))
}

/// GET /api/notifications
pub async fn notifications(State(state): State<SharedState>) -> Json<Vec<Notification>> {
    let app = state.app.lock().await;
    Json(d401_notifications::service::get_notifications(&app, today()))
}

/// GET /api/reports/projects
pub async fn project_reports(State(state): State<SharedState>) -> Json<Vec<ProjectReport>> {
    let app = state.app.lock().await;
    Json(d402_reports::service::get_project_reports(&app, today()))
}

/// GET /api/reports/members
pub async fn member_workloads(State(state): State<SharedState>) -> Json<Vec<MemberWorkload>> {
    let app = state.app.lock().await;
    Json(d402_reports::service::get_member_workloads(&app, today()))
}

/// GET /api/timeline
pub async fn timeline(State(state): State<SharedState>) -> Json<Vec<TimelineItem>> {
    let app = state.app.lock().await;
    Json(d403_timeline::service::get_timeline(&app))
}

/// GET /api/calendar?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn calendar(
    State(state): State<SharedState>,
    Query(request): Query<CalendarRequest>,
) -> Result<Json<Vec<CalendarDay>>, StatusCode> {
    let span = (request.to - request.from).num_days();
    if !(0..=d404_calendar::service::MAX_RANGE_DAYS).contains(&span) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let app = state.app.lock().await;
    Ok(Json(d404_calendar::service::get_calendar(&app, &request)))
}
