use serde::{Deserialize, Serialize};

/// Статус задачи
///
/// Строковые значения (`TODO`, `IN_PROGRESS`, ...) входят в формат
/// сохранённых данных и не должны меняться.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Код статуса в сохранённых данных
    pub fn code(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Review => "REVIEW",
            TaskStatus::Done => "DONE",
        }
    }

    /// Человекочитаемое название (пишется в журнал активности)
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "할 일",
            TaskStatus::InProgress => "진행 중",
            TaskStatus::Review => "검토",
            TaskStatus::Done => "완료",
        }
    }

    /// Вес статуса при расчёте прогресса проекта
    pub fn progress_weight(&self) -> f64 {
        match self {
            TaskStatus::Todo => 0.0,
            TaskStatus::InProgress => 0.5,
            TaskStatus::Review => 0.8,
            TaskStatus::Done => 1.0,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    pub fn all() -> Vec<TaskStatus> {
        vec![
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Done,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TODO" => Some(TaskStatus::Todo),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "REVIEW" => Some(TaskStatus::Review),
            "DONE" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
