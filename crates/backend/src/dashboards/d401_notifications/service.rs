//! Уведомления, вычисляемые из текущего состояния (не хранятся).

use chrono::{Days, NaiveDate};
use contracts::dashboards::d401_notifications::dto::{
    Notification, NotificationKind, NotificationSeverity,
};
use contracts::domain::a001_project::aggregate::Project;
use contracts::domain::a002_task::aggregate::Task;
use contracts::shared::settings::AppSettings;

use crate::shared::format::format_amount;
use crate::system::state::AppState;

pub fn get_notifications(state: &AppState, today: NaiveDate) -> Vec<Notification> {
    build_notifications(
        state.tasks().list_tasks(),
        state.projects().list_projects(),
        state.settings(),
        today,
    )
}

/// Просроченные и скоро истекающие задачи, проекты у порога бюджета.
///
/// Порядок: по важности, затем по дате (без даты в конце).
pub fn build_notifications(
    tasks: &[Task],
    projects: &[Project],
    settings: &AppSettings,
    today: NaiveDate,
) -> Vec<Notification> {
    let due_soon_limit = today
        .checked_add_days(Days::new(settings.notifications.due_soon_window()))
        .unwrap_or(NaiveDate::MAX);
    let mut result = Vec::new();

    for task in tasks.iter().filter(|t| !t.status.is_done()) {
        let Some(due) = task.due_date else {
            continue;
        };
        if due < today {
            let days = (today - due).num_days();
            result.push(Notification {
                id: format!("overdue-{}", task.id),
                kind: NotificationKind::TaskOverdue,
                severity: NotificationSeverity::Critical,
                title: "마감 기한 초과".to_string(),
                message: format!("'{}' 작업이 마감일을 {}일 지났습니다", task.title, days),
                project_id: Some(task.project_id.clone()),
                task_id: Some(task.id.clone()),
                date: Some(due),
            });
        } else if due <= due_soon_limit {
            let days = (due - today).num_days();
            let message = if days == 0 {
                format!("'{}' 작업의 마감일이 오늘입니다", task.title)
            } else {
                format!("'{}' 작업의 마감일이 {}일 남았습니다", task.title, days)
            };
            result.push(Notification {
                id: format!("due-soon-{}", task.id),
                kind: NotificationKind::TaskDueSoon,
                severity: if days <= 1 {
                    NotificationSeverity::Warning
                } else {
                    NotificationSeverity::Info
                },
                title: "마감 임박".to_string(),
                message,
                project_id: Some(task.project_id.clone()),
                task_id: Some(task.id.clone()),
                date: Some(due),
            });
        }
    }

    for project in projects {
        let Some(utilization) = project.budget_utilization() else {
            continue;
        };
        if utilization < settings.budget_warning_threshold {
            continue;
        }
        let over = project.spent_budget > project.budget;
        result.push(Notification {
            id: format!("budget-{}", project.id),
            kind: NotificationKind::BudgetWarning,
            severity: if over {
                NotificationSeverity::Critical
            } else {
                NotificationSeverity::Warning
            },
            title: if over { "예산 초과" } else { "예산 경고" }.to_string(),
            message: format!(
                "'{}' 프로젝트 예산의 {:.0}%를 사용했습니다 ({} / {})",
                project.name,
                utilization,
                format_amount(project.spent_budget, &settings.currency),
                format_amount(project.budget, &settings.currency)
            ),
            project_id: Some(project.id.clone()),
            task_id: None,
            date: project.end_date,
        });
    }

    result.sort_by_key(|n| (n.severity, n.date.unwrap_or(NaiveDate::MAX)));
    result
}
