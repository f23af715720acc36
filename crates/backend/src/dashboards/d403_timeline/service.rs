use contracts::dashboards::d403_timeline::dto::{TimelineItem, TimelineItemKind};
use contracts::domain::a001_project::aggregate::Project;
use contracts::domain::a002_task::aggregate::Task;

use crate::system::state::AppState;

pub fn get_timeline(state: &AppState) -> Vec<TimelineItem> {
    build_timeline(
        state.projects().list_projects(),
        state.tasks().list_tasks(),
    )
}

/// Строки диаграммы Ганта: проекты и задачи, у которых заданы обе даты.
///
/// Сортировка по началу, затем по концу; при равных датах проект идёт раньше задачи.
pub fn build_timeline(projects: &[Project], tasks: &[Task]) -> Vec<TimelineItem> {
    let project_rows = projects.iter().filter_map(|p| {
        let (start, end) = (p.start_date?, p.end_date?);
        Some(TimelineItem {
            id: p.id.to_string(),
            kind: TimelineItemKind::Project,
            title: p.name.clone(),
            project_id: p.id.clone(),
            start: start.min(end),
            end: start.max(end),
            progress: p.progress,
            status: p.status.code().to_string(),
        })
    });

    let task_rows = tasks.iter().filter_map(|t| {
        let (start, end) = (t.start_date?, t.due_date?);
        Some(TimelineItem {
            id: t.id.to_string(),
            kind: TimelineItemKind::Task,
            title: t.title.clone(),
            project_id: t.project_id.clone(),
            start: start.min(end),
            end: start.max(end),
            progress: t.status.progress_weight() * 100.0,
            status: t.status.code().to_string(),
        })
    });

    let mut rows: Vec<TimelineItem> = project_rows.chain(task_rows).collect();
    rows.sort_by_key(|item| {
        (
            item.start,
            item.end,
            item.kind == TimelineItemKind::Task,
        )
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_project::aggregate::{ProjectDto, ProjectId};
    use contracts::domain::a002_task::aggregate::{TaskDto, TaskId};
    use contracts::enums::TaskStatus;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_rows_are_ordered_and_undated_skipped() {
        let project = Project::new_for_insert(
            ProjectId::new("project-1"),
            ProjectDto {
                name: "X".into(),
                start_date: Some(day(1)),
                end_date: Some(day(31)),
                ..Default::default()
            },
        );
        let dated = |id: &str, start, due, status| {
            Task::new_for_insert(
                TaskId::new(id),
                TaskDto {
                    project_id: project.id.clone(),
                    title: id.into(),
                    status,
                    start_date: start,
                    due_date: due,
                    ..Default::default()
                },
            )
        };
        let tasks = vec![
            dated("late", Some(day(10)), Some(day(20)), TaskStatus::Review),
            dated("first", Some(day(1)), Some(day(5)), TaskStatus::Done),
            dated("undated", None, Some(day(5)), TaskStatus::Todo),
        ];

        let rows = build_timeline(std::slice::from_ref(&project), &tasks);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "project-1", "late"]);
        assert_eq!(rows[2].progress, 80.0);
        assert_eq!(rows[1].kind, TimelineItemKind::Project);
    }
}
