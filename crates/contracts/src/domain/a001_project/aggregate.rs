use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a003_member::aggregate::MemberId;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::enums::{Priority, ProjectStatus};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор проекта (`project-<millis>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AggregateId for ProjectId {
    const PREFIX: &'static str = "project";

    fn from_raw(value: String) -> Self {
        Self(value)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Проект
///
/// Поля `progress` и `spent_budget` вычисляются по задачам проекта и
/// записываются только при пересчёте после изменения задач.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub priority: Priority,
    /// Прогресс 0..100
    #[serde(default)]
    pub progress: f64,
    /// Общий бюджет
    #[serde(default)]
    pub budget: f64,
    /// Израсходованный бюджет
    #[serde(default)]
    pub spent_budget: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<MemberId>,
    #[serde(default)]
    pub team_members: Vec<MemberId>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Project {
    /// Создать новый проект из DTO
    pub fn new_for_insert(id: ProjectId, dto: ProjectDto) -> Self {
        Self {
            id,
            name: dto.name,
            description: dto.description,
            status: dto.status,
            priority: dto.priority,
            progress: 0.0,
            budget: dto.budget,
            spent_budget: 0.0,
            start_date: dto.start_date,
            end_date: dto.end_date,
            manager: dto.manager,
            team_members: dedup_members(dto.team_members),
            metadata: EntityMetadata::new(),
        }
    }

    /// Применить частичное обновление.
    ///
    /// `progress` и `spent_budget` патчем не меняются.
    pub fn apply_patch(&mut self, patch: &ProjectPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
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
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(manager) = &patch.manager {
            self.manager = manager.clone();
        }
        if let Some(team_members) = &patch.team_members {
            self.team_members = dedup_members(team_members.clone());
        }
    }

    /// Остаток бюджета (может быть отрицательным при перерасходе)
    pub fn remaining_budget(&self) -> f64 {
        self.budget - self.spent_budget
    }

    /// Процент использования бюджета; `None`, если бюджет не задан
    pub fn budget_utilization(&self) -> Option<f64> {
        if self.budget > 0.0 {
            Some(self.spent_budget / self.budget * 100.0)
        } else {
            None
        }
    }
}

fn dedup_members(members: Vec<MemberId>) -> Vec<MemberId> {
    let mut result: Vec<MemberId> = Vec::with_capacity(members.len());
    for member in members {
        if !result.contains(&member) {
            result.push(member);
        }
    }
    result
}

impl AggregateRoot for Project {
    type Id = ProjectId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn description(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "project"
    }

    fn element_name() -> &'static str {
        "프로젝트"
    }

    fn list_name() -> &'static str {
        "프로젝트 목록"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания проекта
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDto {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub budget: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager: Option<MemberId>,
    pub team_members: Vec<MemberId>,
}

/// Частичное обновление проекта
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
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
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub manager: Option<Option<MemberId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<MemberId>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project::new_for_insert(
            ProjectId::new("project-1"),
            ProjectDto {
                name: "X".into(),
                budget: 1_000_000.0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_patch_never_touches_derived_fields() {
        let mut project = sample();
        project.progress = 40.0;
        project.spent_budget = 1000.0;

        let patch: ProjectPatch =
            serde_json::from_str(r#"{"name":"Y","progress":99,"spentBudget":5}"#).unwrap();
        project.apply_patch(&patch);

        assert_eq!(project.name, "Y");
        assert_eq!(project.progress, 40.0);
        assert_eq!(project.spent_budget, 1000.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("spentBudget").is_some());
        assert!(json.get("teamMembers").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "PLANNING");
    }

    #[test]
    fn test_budget_utilization() {
        let mut project = sample();
        project.spent_budget = 250_000.0;
        assert_eq!(project.budget_utilization(), Some(25.0));
        assert_eq!(project.remaining_budget(), 750_000.0);
        project.budget = 0.0;
        assert_eq!(project.budget_utilization(), None);
    }
}
