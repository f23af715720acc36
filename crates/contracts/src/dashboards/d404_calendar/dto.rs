use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_project::aggregate::ProjectId;
use crate::domain::a002_task::aggregate::TaskId;
use crate::domain::a003_member::aggregate::MemberId;
use crate::enums::{Priority, TaskStatus};

/// Calendar range query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarRequest {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Task placed on the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub task_id: TaskId,
    pub project_id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<MemberId>,
}

/// Events active on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}
