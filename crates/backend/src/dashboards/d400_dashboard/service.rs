use chrono::NaiveDate;
use contracts::dashboards::d400_dashboard::dto::{DashboardResponse, StatusCount};
use contracts::domain::a004_activity::presentation::ActivityView;
use contracts::enums::{ProjectStatus, TaskStatus};

use crate::system::state::AppState;

/// Количество последних событий на главной
pub const DASHBOARD_RECENT_ACTIVITIES: usize = 10;

/// Сводка для главной страницы
pub fn get_dashboard(state: &AppState, today: NaiveDate) -> DashboardResponse {
    let projects = state.projects().list_projects();
    let tasks = state.tasks().list_tasks();

    let projects_by_status = ProjectStatus::all()
        .into_iter()
        .map(|status| StatusCount {
            status: status.code().to_string(),
            label: status.display_name().to_string(),
            count: projects.iter().filter(|p| p.status == status).count(),
        })
        .collect();

    let tasks_by_status = TaskStatus::all()
        .into_iter()
        .map(|status| StatusCount {
            status: status.code().to_string(),
            label: status.display_name().to_string(),
            count: tasks.iter().filter(|t| t.status == status).count(),
        })
        .collect();

    let total_budget: f64 = projects.iter().map(|p| p.budget).sum();
    let total_spent: f64 = projects.iter().map(|p| p.spent_budget).sum();
    let budget_utilization = if total_budget > 0.0 {
        total_spent / total_budget * 100.0
    } else {
        0.0
    };
    let average_progress = if projects.is_empty() {
        0.0
    } else {
        projects.iter().map(|p| p.progress).sum::<f64>() / projects.len() as f64
    };

    DashboardResponse {
        total_projects: projects.len(),
        active_projects: projects.iter().filter(|p| p.status.is_active()).count(),
        completed_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .count(),
        projects_by_status,
        total_tasks: tasks.len(),
        tasks_by_status,
        overdue_tasks: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        total_members: state.members().list_members().len(),
        total_budget,
        total_spent,
        budget_utilization,
        average_progress,
        recent_activities: state
            .activities()
            .get_recent_activities(Some(DASHBOARD_RECENT_ACTIVITIES))
            .into_iter()
            .map(ActivityView::from)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::MemoryStorage;
    use contracts::domain::a001_project::aggregate::ProjectDto;
    use contracts::domain::a002_task::aggregate::TaskDto;
    use std::sync::Arc;

    #[test]
    fn test_empty_state() {
        let state = AppState::load(Arc::new(MemoryStorage::new()), None);
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let dashboard = get_dashboard(&state, today);
        assert_eq!(dashboard.total_projects, 0);
        assert_eq!(dashboard.budget_utilization, 0.0);
        assert_eq!(dashboard.average_progress, 0.0);
        assert_eq!(dashboard.tasks_by_status.len(), 4);
        assert!(dashboard.recent_activities.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut state = AppState::load(Arc::new(MemoryStorage::new()), None);
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let project = state.add_project(ProjectDto {
            name: "X".into(),
            budget: 1_000.0,
            ..Default::default()
        });
        state.add_task(TaskDto {
            project_id: project.id.clone(),
            title: "late".into(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            estimated_cost: Some(250.0),
            ..Default::default()
        });
        state.add_task(TaskDto {
            project_id: project.id.clone(),
            title: "done".into(),
            status: TaskStatus::Done,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        });

        let dashboard = get_dashboard(&state, today);
        assert_eq!(dashboard.total_tasks, 2);
        assert_eq!(dashboard.overdue_tasks, 1);
        assert_eq!(dashboard.total_spent, 250.0);
        assert_eq!(dashboard.budget_utilization, 25.0);
        assert_eq!(dashboard.average_progress, 50.0);
        assert_eq!(dashboard.recent_activities.len(), 3);
        let done = dashboard
            .tasks_by_status
            .iter()
            .find(|c| c.status == "DONE")
            .unwrap();
        assert_eq!(done.count, 1);
        assert_eq!(done.label, "완료");
    }
}
