use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_project::aggregate::ProjectId;
use crate::domain::a002_task::aggregate::TaskId;
use crate::domain::a003_member::aggregate::MemberId;

/// Максимальное число записей в журнале активности
pub const MAX_ACTIVITIES: usize = 500;

/// Сколько последних записей отдаётся по умолчанию
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Storage key of the activity log.
pub const ACTIVITY_STORAGE_KEY: &str = "activity-storage";

// ============================================================================
// Activity type
// ============================================================================

/// Тип записи журнала активности
///
/// Сериализуется строковым тегом (`TASK_CREATED`, ...). Неизвестный тег из
/// сохранённых данных читается как `Other` и записывается обратно без изменений.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    TaskStatusChanged,
    TaskAssigned,
    TaskCommented,
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    ProjectStatusChanged,
    MemberAdded,
    MemberRemoved,
    Other(String),
}

impl ActivityType {
    pub fn code(&self) -> &str {
        match self {
            ActivityType::TaskCreated => "TASK_CREATED",
            ActivityType::TaskUpdated => "TASK_UPDATED",
            ActivityType::TaskDeleted => "TASK_DELETED",
            ActivityType::TaskStatusChanged => "TASK_STATUS_CHANGED",
            ActivityType::TaskAssigned => "TASK_ASSIGNED",
            ActivityType::TaskCommented => "TASK_COMMENTED",
            ActivityType::ProjectCreated => "PROJECT_CREATED",
            ActivityType::ProjectUpdated => "PROJECT_UPDATED",
            ActivityType::ProjectDeleted => "PROJECT_DELETED",
            ActivityType::ProjectStatusChanged => "PROJECT_STATUS_CHANGED",
            ActivityType::MemberAdded => "MEMBER_ADDED",
            ActivityType::MemberRemoved => "MEMBER_REMOVED",
            ActivityType::Other(code) => code,
        }
    }

    /// Все известные типы
    pub fn all() -> Vec<ActivityType> {
        vec![
            ActivityType::TaskCreated,
            ActivityType::TaskUpdated,
            ActivityType::TaskDeleted,
            ActivityType::TaskStatusChanged,
            ActivityType::TaskAssigned,
            ActivityType::TaskCommented,
            ActivityType::ProjectCreated,
            ActivityType::ProjectUpdated,
            ActivityType::ProjectDeleted,
            ActivityType::ProjectStatusChanged,
            ActivityType::MemberAdded,
            ActivityType::MemberRemoved,
        ]
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "TASK_CREATED" => ActivityType::TaskCreated,
            "TASK_UPDATED" => ActivityType::TaskUpdated,
            "TASK_DELETED" => ActivityType::TaskDeleted,
            "TASK_STATUS_CHANGED" => ActivityType::TaskStatusChanged,
            "TASK_ASSIGNED" => ActivityType::TaskAssigned,
            "TASK_COMMENTED" => ActivityType::TaskCommented,
            "PROJECT_CREATED" => ActivityType::ProjectCreated,
            "PROJECT_UPDATED" => ActivityType::ProjectUpdated,
            "PROJECT_DELETED" => ActivityType::ProjectDeleted,
            "PROJECT_STATUS_CHANGED" => ActivityType::ProjectStatusChanged,
            "MEMBER_ADDED" => ActivityType::MemberAdded,
            "MEMBER_REMOVED" => ActivityType::MemberRemoved,
            other => ActivityType::Other(other.to_string()),
        }
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        ActivityType::from_code(&value)
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        value.code().to_string()
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Actor
// ============================================================================

/// Текущий пользователь, от имени которого пишется журнал
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MemberId>,
    pub name: String,
}

impl Actor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

// ============================================================================
// Activity record
// ============================================================================

/// Запись журнала активности (неизменяемая после создания)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Activity {
    /// Зафиксировать черновик с присвоенными id и временем
    pub fn from_draft(id: String, timestamp: DateTime<Utc>, draft: ActivityDraft) -> Self {
        Self {
            id,
            activity_type: draft.activity_type,
            timestamp,
            user_id: draft.user_id,
            user_name: draft.user_name,
            project_id: draft.project_id,
            project_name: draft.project_name,
            task_id: draft.task_id,
            task_name: draft.task_name,
            member_id: draft.member_id,
            member_name: draft.member_name,
            old_value: draft.old_value,
            new_value: draft.new_value,
            description: draft.description,
        }
    }

    /// Относится ли запись к участнику.
    ///
    /// Проверяются оба поля: старые записи хранят участника в `userId`.
    pub fn involves_member(&self, member_id: &MemberId) -> bool {
        self.user_id.as_ref() == Some(member_id) || self.member_id.as_ref() == Some(member_id)
    }
}

/// Черновик записи журнала: всё, кроме id и времени
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    pub activity_type: ActivityType,
    pub user_id: Option<MemberId>,
    pub user_name: Option<String>,
    pub project_id: Option<ProjectId>,
    pub project_name: Option<String>,
    pub task_id: Option<TaskId>,
    pub task_name: Option<String>,
    pub member_id: Option<MemberId>,
    pub member_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: Option<String>,
}

impl ActivityDraft {
    pub fn new(activity_type: ActivityType) -> Self {
        Self {
            activity_type,
            user_id: None,
            user_name: None,
            project_id: None,
            project_name: None,
            task_id: None,
            task_name: None,
            member_id: None,
            member_name: None,
            old_value: None,
            new_value: None,
            description: None,
        }
    }

    pub fn actor(mut self, actor: Option<&Actor>) -> Self {
        if let Some(actor) = actor {
            self.user_id = actor.id.clone();
            self.user_name = Some(actor.name.clone());
        }
        self
    }

    pub fn project(mut self, id: &ProjectId, name: Option<String>) -> Self {
        self.project_id = Some(id.clone());
        self.project_name = name;
        self
    }

    pub fn task(mut self, id: &TaskId, name: impl Into<String>) -> Self {
        self.task_id = Some(id.clone());
        self.task_name = Some(name.into());
        self
    }

    pub fn member(mut self, id: &MemberId, name: Option<String>) -> Self {
        self.member_id = Some(id.clone());
        self.member_name = name;
        self
    }

    pub fn change(mut self, old_value: impl Into<String>, new_value: impl Into<String>) -> Self {
        self.old_value = Some(old_value.into());
        self.new_value = Some(new_value.into());
        self
    }

    pub fn new_value(mut self, value: impl Into<String>) -> Self {
        self.new_value = Some(value.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags_round_trip() {
        for t in ActivityType::all() {
            let json = serde_json::to_string(&t).unwrap();
            let back: ActivityType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }
        let unknown: ActivityType = serde_json::from_str("\"SPRINT_STARTED\"").unwrap();
        assert_eq!(unknown, ActivityType::Other("SPRINT_STARTED".into()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"SPRINT_STARTED\"");
        assert_eq!(ActivityType::all().len(), 12);
    }

    #[test]
    fn test_involves_member_checks_both_fields() {
        let member = MemberId::new("member-1");
        let by_user = Activity::from_draft(
            "a1".into(),
            Utc::now(),
            ActivityDraft::new(ActivityType::TaskCreated).actor(Some(&Actor {
                id: Some(member.clone()),
                name: "Kim".into(),
            })),
        );
        let by_member = Activity::from_draft(
            "a2".into(),
            Utc::now(),
            ActivityDraft::new(ActivityType::MemberAdded).member(&member, Some("Kim".into())),
        );
        let other = Activity::from_draft(
            "a3".into(),
            Utc::now(),
            ActivityDraft::new(ActivityType::TaskCreated),
        );
        assert!(by_user.involves_member(&member));
        assert!(by_member.involves_member(&member));
        assert!(!other.involves_member(&member));
    }

    #[test]
    fn test_serialized_shape() {
        let activity = Activity::from_draft(
            "activity-1".into(),
            Utc::now(),
            ActivityDraft::new(ActivityType::TaskStatusChanged)
                .task(&TaskId::new("task-1"), "A")
                .change("할 일", "진행 중"),
        );
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "TASK_STATUS_CHANGED");
        assert_eq!(json["taskName"], "A");
        assert_eq!(json["oldValue"], "할 일");
        assert!(json.get("projectName").is_none());
    }
}
