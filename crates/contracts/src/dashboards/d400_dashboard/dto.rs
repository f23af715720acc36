use serde::{Deserialize, Serialize};

use crate::domain::a004_activity::presentation::ActivityView;

/// Response for the main dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub projects_by_status: Vec<StatusCount>,
    pub total_tasks: usize,
    pub tasks_by_status: Vec<StatusCount>,
    pub overdue_tasks: usize,
    pub total_members: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    /// Spent / budget in percent, 0 when no budget is set
    pub budget_utilization: f64,
    /// Mean of project progress, 0 when there are no projects
    pub average_progress: f64,
    pub recent_activities: Vec<ActivityView>,
}

/// Count of records in one status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    /// Persisted status code (e.g. "IN_PROGRESS")
    pub status: String,
    /// Display label (e.g. "진행 중")
    pub label: String,
    pub count: usize,
}
