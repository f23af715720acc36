use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use contracts::dashboards::d404_calendar::dto::{CalendarDay, CalendarEvent, CalendarRequest};
use contracts::domain::a002_task::aggregate::Task;

use crate::domain::a001_project::store::ProjectAggregates;
use crate::system::state::AppState;

/// Максимальная длина запрашиваемого диапазона
pub const MAX_RANGE_DAYS: i64 = 366;

pub fn get_calendar(state: &AppState, request: &CalendarRequest) -> Vec<CalendarDay> {
    build_calendar(state.tasks().list_tasks(), state.projects(), request)
}

/// Интервал задачи: `[startDate ?? dueDate, dueDate ?? startDate]`
fn task_span(task: &Task) -> Option<(NaiveDate, NaiveDate)> {
    let start = task.start_date.or(task.due_date)?;
    let end = task.due_date.or(task.start_date)?;
    Some((start.min(end), start.max(end)))
}

/// Разложить задачи по дням диапазона `[from, to]`.
///
/// Дни без задач не возвращаются; внутри дня задачи идут по убыванию приоритета.
pub fn build_calendar(
    tasks: &[Task],
    projects: &dyn ProjectAggregates,
    request: &CalendarRequest,
) -> Vec<CalendarDay> {
    if request.from > request.to {
        return Vec::new();
    }

    let mut days: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    for task in tasks {
        let Some((start, end)) = task_span(task) else {
            continue;
        };
        if end < request.from || start > request.to {
            continue;
        }

        let event = CalendarEvent {
            task_id: task.id.clone(),
            project_id: task.project_id.clone(),
            project_name: projects.project_name(&task.project_id),
            title: task.title.clone(),
            start,
            end,
            status: task.status,
            priority: task.priority,
            assignee: task.assignee.clone(),
        };

        let first = start.max(request.from);
        let last = end.min(request.to);
        for date in first.iter_days().take_while(|d| *d <= last) {
            days.entry(date).or_default().push(event.clone());
        }
    }

    days.into_iter()
        .map(|(date, mut events)| {
            events.sort_by_key(|e| (Reverse(e.priority), e.title.clone()));
            CalendarDay { date, events }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_project::store::ProjectStore;
    use contracts::domain::a001_project::aggregate::ProjectId;
    use contracts::domain::a002_task::aggregate::{TaskDto, TaskId};
    use contracts::enums::Priority;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn task(id: &str, start: Option<NaiveDate>, due: Option<NaiveDate>, priority: Priority) -> Task {
        Task::new_for_insert(
            TaskId::new(id),
            TaskDto {
                project_id: ProjectId::new("project-1"),
                title: id.into(),
                priority,
                start_date: start,
                due_date: due,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_spans_are_clipped_to_range() {
        let tasks = vec![
            task("long", Some(day(1)), Some(day(20)), Priority::Low),
            task("due-only", None, Some(day(11)), Priority::Urgent),
            task("outside", Some(day(25)), Some(day(26)), Priority::High),
            task("undated", None, None, Priority::High),
        ];
        let request = CalendarRequest {
            from: day(10),
            to: day(12),
        };

        let calendar = build_calendar(&tasks, &ProjectStore::new(), &request);
        let dates: Vec<NaiveDate> = calendar.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(10), day(11), day(12)]);

        let eleventh = &calendar[1];
        let titles: Vec<&str> = eleventh.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["due-only", "long"]);
        assert_eq!(eleventh.events[1].start, day(1));
        assert!(eleventh.events[0].project_name.is_none());
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let tasks = vec![task("a", Some(day(1)), Some(day(3)), Priority::Low)];
        let request = CalendarRequest {
            from: day(3),
            to: day(1),
        };
        assert!(build_calendar(&tasks, &ProjectStore::new(), &request).is_empty());
    }
}
