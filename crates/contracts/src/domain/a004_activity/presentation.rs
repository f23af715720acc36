//! Presentation lookups for activity records: message text, icon and color.

use serde::{Deserialize, Serialize};

use super::aggregate::{Activity, ActivityType};

const UNKNOWN_NAME: &str = "알 수 없음";
const DEFAULT_MESSAGE: &str = "활동이 기록되었습니다";

fn name_or_unknown(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or(UNKNOWN_NAME)
}

/// Человекочитаемое сообщение для записи журнала
pub fn activity_message(activity: &Activity) -> String {
    let task = name_or_unknown(&activity.task_name);
    let project = name_or_unknown(&activity.project_name);
    let member = name_or_unknown(&activity.member_name);
    let old_value = activity.old_value.as_deref().unwrap_or("");
    let new_value = activity.new_value.as_deref().unwrap_or("");

    match &activity.activity_type {
        ActivityType::TaskCreated => format!("'{}' 작업을 생성했습니다", task),
        ActivityType::TaskUpdated => format!("'{}' 작업을 수정했습니다", task),
        ActivityType::TaskDeleted => format!("'{}' 작업을 삭제했습니다", task),
        ActivityType::TaskStatusChanged => format!(
            "'{}' 작업 상태를 {}에서 {}(으)로 변경했습니다",
            task, old_value, new_value
        ),
        ActivityType::TaskAssigned => format!("'{}' 작업을 {}에게 할당했습니다", task, member),
        ActivityType::TaskCommented => format!("'{}' 작업에 댓글을 남겼습니다", task),
        ActivityType::ProjectCreated => format!("'{}' 프로젝트를 생성했습니다", project),
        ActivityType::ProjectUpdated => format!("'{}' 프로젝트를 수정했습니다", project),
        ActivityType::ProjectDeleted => format!("'{}' 프로젝트를 삭제했습니다", project),
        ActivityType::ProjectStatusChanged => format!(
            "'{}' 프로젝트 상태를 {}에서 {}(으)로 변경했습니다",
            project, old_value, new_value
        ),
        ActivityType::MemberAdded => format!("{}님이 팀에 합류했습니다", member),
        ActivityType::MemberRemoved => format!("{}님이 팀에서 제외되었습니다", member),
        ActivityType::Other(_) => activity
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
    }
}

/// Имя иконки (lucide) для типа записи
pub fn activity_icon(activity_type: &ActivityType) -> &'static str {
    match activity_type {
        ActivityType::TaskCreated => "plus-circle",
        ActivityType::TaskUpdated => "edit",
        ActivityType::TaskDeleted => "trash-2",
        ActivityType::TaskStatusChanged => "refresh-cw",
        ActivityType::TaskAssigned => "user-plus",
        ActivityType::TaskCommented => "message-square",
        ActivityType::ProjectCreated => "folder-plus",
        ActivityType::ProjectUpdated => "folder",
        ActivityType::ProjectDeleted => "folder-minus",
        ActivityType::ProjectStatusChanged => "activity",
        ActivityType::MemberAdded => "user-check",
        ActivityType::MemberRemoved => "user-minus",
        ActivityType::Other(_) => "info",
    }
}

/// Цвет для типа записи
pub fn activity_color(activity_type: &ActivityType) -> &'static str {
    match activity_type {
        ActivityType::TaskCreated | ActivityType::ProjectCreated | ActivityType::MemberAdded => {
            "green"
        }
        ActivityType::TaskUpdated | ActivityType::ProjectUpdated => "blue",
        ActivityType::TaskDeleted | ActivityType::ProjectDeleted | ActivityType::MemberRemoved => {
            "red"
        }
        ActivityType::TaskStatusChanged | ActivityType::ProjectStatusChanged => "purple",
        ActivityType::TaskAssigned => "orange",
        ActivityType::TaskCommented => "cyan",
        ActivityType::Other(_) => "gray",
    }
}

/// Запись журнала вместе с готовым текстом, иконкой и цветом
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    pub message: String,
    pub icon: String,
    pub color: String,
}

impl From<&Activity> for ActivityView {
    fn from(activity: &Activity) -> Self {
        Self {
            message: activity_message(activity),
            icon: activity_icon(&activity.activity_type).to_string(),
            color: activity_color(&activity.activity_type).to_string(),
            activity: activity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_task::aggregate::TaskId;
    use crate::domain::a004_activity::aggregate::ActivityDraft;
    use chrono::Utc;

    fn record(draft: ActivityDraft) -> Activity {
        Activity::from_draft("activity-1".into(), Utc::now(), draft)
    }

    #[test]
    fn test_status_change_message_uses_labels() {
        let activity = record(
            ActivityDraft::new(ActivityType::TaskStatusChanged)
                .task(&TaskId::new("task-1"), "로그인")
                .change("할 일", "완료"),
        );
        assert_eq!(
            activity_message(&activity),
            "'로그인' 작업 상태를 할 일에서 완료(으)로 변경했습니다"
        );
    }

    #[test]
    fn test_missing_names_use_placeholder() {
        let activity = record(ActivityDraft::new(ActivityType::ProjectDeleted));
        assert_eq!(activity_message(&activity), "'알 수 없음' 프로젝트를 삭제했습니다");
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let with_description = record(
            ActivityDraft::new(ActivityType::Other("SPRINT_STARTED".into()))
                .description("스프린트 시작"),
        );
        assert_eq!(activity_message(&with_description), "스프린트 시작");

        let bare = record(ActivityDraft::new(ActivityType::Other("X".into())));
        assert_eq!(activity_message(&bare), DEFAULT_MESSAGE);
        assert_eq!(activity_icon(&bare.activity_type), "info");
        assert_eq!(activity_color(&bare.activity_type), "gray");
    }
}
