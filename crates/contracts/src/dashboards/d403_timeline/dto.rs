use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_project::aggregate::ProjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineItemKind {
    Project,
    Task,
}

/// One bar on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: String,
    pub kind: TimelineItemKind,
    pub title: String,
    pub project_id: ProjectId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// 0..100
    pub progress: f64,
    /// Persisted status code of the project or task
    pub status: String,
}
