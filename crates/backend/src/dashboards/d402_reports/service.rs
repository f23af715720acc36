use chrono::NaiveDate;
use contracts::dashboards::d402_reports::dto::{MemberWorkload, ProjectReport};
use contracts::domain::a001_project::aggregate::Project;
use contracts::domain::a002_task::aggregate::Task;
use contracts::domain::a003_member::aggregate::Member;
use contracts::enums::TaskStatus;

use crate::system::state::AppState;

pub fn get_project_reports(state: &AppState, today: NaiveDate) -> Vec<ProjectReport> {
    let tasks = state.tasks().list_tasks();
    state
        .projects()
        .list_projects()
        .iter()
        .map(|project| project_report(project, tasks, today))
        .collect()
}

pub fn get_member_workloads(state: &AppState, today: NaiveDate) -> Vec<MemberWorkload> {
    let tasks = state.tasks().list_tasks();
    state
        .members()
        .list_members()
        .iter()
        .map(|member| member_workload(member, tasks, today))
        .collect()
}

fn project_report(project: &Project, tasks: &[Task], today: NaiveDate) -> ProjectReport {
    let own: Vec<&Task> = tasks.iter().filter(|t| t.project_id == project.id).collect();
    let completed = own.iter().filter(|t| t.status.is_done()).count();
    let estimated_hours: f64 = own.iter().filter_map(|t| t.estimated_hours).sum();
    let actual_hours: f64 = own.iter().filter_map(|t| t.actual_hours).sum();

    ProjectReport {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        status: project.status,
        total_tasks: own.len(),
        completed_tasks: completed,
        in_progress_tasks: own
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count(),
        overdue_tasks: own.iter().filter(|t| t.is_overdue(today)).count(),
        completion_rate: percent(completed, own.len()),
        progress: project.progress,
        budget: project.budget,
        spent_budget: project.spent_budget,
        remaining_budget: project.remaining_budget(),
        estimated_hours,
        actual_hours,
        hours_variance: actual_hours - estimated_hours,
    }
}

fn member_workload(member: &Member, tasks: &[Task], today: NaiveDate) -> MemberWorkload {
    let assigned: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.assignee.as_ref() == Some(&member.id))
        .collect();

    MemberWorkload {
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        role: member.role,
        assigned_tasks: assigned.len(),
        completed_tasks: assigned.iter().filter(|t| t.status.is_done()).count(),
        in_progress_tasks: assigned
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count(),
        overdue_tasks: assigned.iter().filter(|t| t.is_overdue(today)).count(),
        estimated_hours: assigned.iter().filter_map(|t| t.estimated_hours).sum(),
        actual_hours: assigned.iter().filter_map(|t| t.actual_hours).sum(),
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_project::aggregate::{ProjectDto, ProjectId};
    use contracts::domain::a002_task::aggregate::{TaskDto, TaskId};
    use contracts::domain::a003_member::aggregate::{MemberDto, MemberId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn task(id: &str, status: TaskStatus, est: f64, act: Option<f64>) -> Task {
        Task::new_for_insert(
            TaskId::new(id),
            TaskDto {
                project_id: ProjectId::new("project-1"),
                title: id.into(),
                status,
                assignee: Some(MemberId::new("member-1")),
                estimated_hours: Some(est),
                actual_hours: act,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_project_report() {
        let mut project = Project::new_for_insert(
            ProjectId::new("project-1"),
            ProjectDto {
                name: "X".into(),
                budget: 1_000.0,
                ..Default::default()
            },
        );
        project.spent_budget = 400.0;
        let tasks = vec![
            task("a", TaskStatus::Done, 8.0, Some(10.0)),
            task("b", TaskStatus::InProgress, 4.0, None),
            task("c", TaskStatus::Todo, 2.0, None),
            task("d", TaskStatus::Done, 6.0, Some(5.0)),
        ];

        let report = project_report(&project, &tasks, today());
        assert_eq!(report.total_tasks, 4);
        assert_eq!(report.completed_tasks, 2);
        assert_eq!(report.in_progress_tasks, 1);
        assert_eq!(report.completion_rate, 50.0);
        assert_eq!(report.remaining_budget, 600.0);
        assert_eq!(report.estimated_hours, 20.0);
        assert_eq!(report.actual_hours, 15.0);
        assert_eq!(report.hours_variance, -5.0);
    }

    #[test]
    fn test_member_workload() {
        let member = Member::new_for_insert(
            MemberId::new("member-1"),
            MemberDto {
                name: "Kim".into(),
                ..Default::default()
            },
        );
        let mut unassigned = task("x", TaskStatus::Todo, 1.0, None);
        unassigned.assignee = None;
        let tasks = vec![
            task("a", TaskStatus::Done, 8.0, Some(10.0)),
            task("b", TaskStatus::InProgress, 4.0, None),
            unassigned,
        ];

        let workload = member_workload(&member, &tasks, today());
        assert_eq!(workload.assigned_tasks, 2);
        assert_eq!(workload.completed_tasks, 1);
        assert_eq!(workload.in_progress_tasks, 1);
        assert_eq!(workload.estimated_hours, 12.0);
        assert_eq!(workload.actual_hours, 10.0);
    }
}
