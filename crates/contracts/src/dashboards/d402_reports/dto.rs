use serde::{Deserialize, Serialize};

use crate::domain::a001_project::aggregate::ProjectId;
use crate::domain::a003_member::aggregate::MemberId;
use crate::enums::{MemberRole, ProjectStatus};

/// Per-project summary row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub project_id: ProjectId,
    pub project_name: String,
    pub status: ProjectStatus,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    /// Completed / total in percent
    pub completion_rate: f64,
    pub progress: f64,
    pub budget: f64,
    pub spent_budget: f64,
    pub remaining_budget: f64,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    /// actual - estimated
    pub hours_variance: f64,
}

/// Per-member workload row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberWorkload {
    pub member_id: MemberId,
    pub member_name: String,
    pub role: MemberRole,
    pub assigned_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    pub estimated_hours: f64,
    pub actual_hours: f64,
}
