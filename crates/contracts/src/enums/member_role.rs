use serde::{Deserialize, Serialize};

/// Роль участника команды
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    Manager,
    #[default]
    Developer,
    Designer,
    Qa,
    Viewer,
}

impl MemberRole {
    pub fn code(&self) -> &'static str {
        match self {
            MemberRole::Admin => "ADMIN",
            MemberRole::Manager => "MANAGER",
            MemberRole::Developer => "DEVELOPER",
            MemberRole::Designer => "DESIGNER",
            MemberRole::Qa => "QA",
            MemberRole::Viewer => "VIEWER",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MemberRole::Admin => "관리자",
            MemberRole::Manager => "매니저",
            MemberRole::Developer => "개발자",
            MemberRole::Designer => "디자이너",
            MemberRole::Qa => "QA",
            MemberRole::Viewer => "뷰어",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ADMIN" => Some(MemberRole::Admin),
            "MANAGER" => Some(MemberRole::Manager),
            "DEVELOPER" => Some(MemberRole::Developer),
            "DESIGNER" => Some(MemberRole::Designer),
            "QA" => Some(MemberRole::Qa),
            "VIEWER" => Some(MemberRole::Viewer),
            _ => None,
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
