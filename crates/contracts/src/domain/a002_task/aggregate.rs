use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_project::aggregate::ProjectId;
use crate::domain::a003_member::aggregate::MemberId;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::enums::{Priority, TaskStatus};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор задачи (`task-<millis>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AggregateId for TaskId {
    const PREFIX: &'static str = "task";

    fn from_raw(value: String) -> Self {
        Self(value)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Задача проекта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Проект-владелец (ссылочная целостность не проверяется)
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    /// Исполнитель (слабая ссылка на участника)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Task {
    /// Создать новую задачу из DTO
    pub fn new_for_insert(id: TaskId, dto: TaskDto) -> Self {
        Self {
            id,
            project_id: dto.project_id,
            title: dto.title,
            description: dto.description,
            status: dto.status,
            priority: dto.priority,
            assignee: dto.assignee,
            start_date: dto.start_date,
            due_date: dto.due_date,
            estimated_hours: dto.estimated_hours,
            actual_hours: dto.actual_hours,
            estimated_cost: dto.estimated_cost,
            actual_cost: dto.actual_cost,
            tags: normalize_tags(dto.tags),
            metadata: EntityMetadata::new(),
        }
    }

    /// Слить частичное обновление в задачу (timestamp не трогает)
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(project_id) = &patch.project_id {
            self.project_id = project_id.clone();
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee) = &patch.assignee {
            self.assignee = assignee.clone();
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(estimated_hours) = patch.estimated_hours {
            self.estimated_hours = estimated_hours;
        }
        if let Some(actual_hours) = patch.actual_hours {
            self.actual_hours = actual_hours;
        }
        if let Some(estimated_cost) = patch.estimated_cost {
            self.estimated_cost = estimated_cost;
        }
        if let Some(actual_cost) = patch.actual_cost {
            self.actual_cost = actual_cost;
        }
        if let Some(tags) = &patch.tags {
            self.tags = normalize_tags(tags.clone());
        }
    }

    /// Стоимость задачи для расчёта бюджета: фактическая, иначе плановая, иначе 0
    pub fn effective_cost(&self) -> f64 {
        self.actual_cost.or(self.estimated_cost).unwrap_or(0.0)
    }

    /// Просрочена: срок раньше `today` и задача не завершена
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_done() && self.due_date.is_some_and(|due| due < today)
    }
}

/// Теги хранятся как множество: без пустых значений и повторов, порядок ввода сохраняется
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || result.iter().any(|t| t == tag) {
            continue;
        }
        result.push(tag.to_string());
    }
    result
}

impl AggregateRoot for Task {
    type Id = TaskId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn description(&self) -> &str {
        &self.title
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "task"
    }

    fn element_name() -> &'static str {
        "작업"
    }

    fn list_name() -> &'static str {
        "작업 목록"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания задачи
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDto {
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: Option<MemberId>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub tags: Vec<String>,
}

/// Частичное обновление задачи.
///
/// Для необязательных полей `Some(None)` очищает значение (JSON `null`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee: Option<Option<MemberId>>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_hours: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_cost: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_cost: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    /// Патч только со статусом
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
