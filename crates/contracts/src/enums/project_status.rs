use serde::{Deserialize, Serialize};

/// Статус проекта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "PLANNING",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "계획",
            ProjectStatus::InProgress => "진행 중",
            ProjectStatus::OnHold => "보류",
            ProjectStatus::Completed => "완료",
            ProjectStatus::Cancelled => "취소",
        }
    }

    /// Проект ещё в работе (учитывается в уведомлениях о бюджете)
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectStatus::Planning | ProjectStatus::InProgress)
    }

    pub fn all() -> Vec<ProjectStatus> {
        vec![
            ProjectStatus::Planning,
            ProjectStatus::InProgress,
            ProjectStatus::OnHold,
            ProjectStatus::Completed,
            ProjectStatus::Cancelled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PLANNING" => Some(ProjectStatus::Planning),
            "IN_PROGRESS" => Some(ProjectStatus::InProgress),
            "ON_HOLD" => Some(ProjectStatus::OnHold),
            "COMPLETED" => Some(ProjectStatus::Completed),
            "CANCELLED" => Some(ProjectStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
