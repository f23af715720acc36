//! Project aggregate fields derived from its tasks.
//!
//! Both values are recomputed from the full task list on every mutation.

use contracts::domain::a002_task::aggregate::Task;

/// `100 * Σ weight(status) / count`; 0 for an empty list.
/// Weights: TODO 0, IN_PROGRESS 0.5, REVIEW 0.8, DONE 1.
pub fn calculate_progress<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> f64 {
    let (sum, count) = tasks
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), task| {
            (sum + task.status.progress_weight(), count + 1)
        });
    if count == 0 {
        return 0.0;
    }
    sum / count as f64 * 100.0
}

/// `Σ (actualCost ?? estimatedCost ?? 0)`
pub fn calculate_spent_budget<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> f64 {
    tasks.into_iter().map(Task::effective_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_project::aggregate::ProjectId;
    use contracts::domain::a002_task::aggregate::{TaskDto, TaskId};
    use contracts::enums::TaskStatus;

    fn task(status: TaskStatus, estimated: Option<f64>, actual: Option<f64>) -> Task {
        Task::new_for_insert(
            TaskId::new("task-1"),
            TaskDto {
                project_id: ProjectId::new("project-1"),
                title: "t".into(),
                status,
                estimated_cost: estimated,
                actual_cost: actual,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_progress_empty_is_zero() {
        assert_eq!(calculate_progress(Vec::<&Task>::new()), 0.0);
    }

    #[test]
    fn test_progress_weights() {
        let tasks = vec![
            task(TaskStatus::Todo, None, None),
            task(TaskStatus::InProgress, None, None),
            task(TaskStatus::Review, None, None),
            task(TaskStatus::Done, None, None),
        ];
        let progress = calculate_progress(&tasks);
        assert!((progress - 57.5).abs() < 1e-9);

        let done_and_wip = vec![
            task(TaskStatus::InProgress, None, None),
            task(TaskStatus::Done, None, None),
        ];
        assert!((calculate_progress(&done_and_wip) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_spent_budget_prefers_actual_cost() {
        let tasks = vec![
            task(TaskStatus::Todo, Some(100.0), None),
            task(TaskStatus::Done, Some(500.0), Some(200.0)),
            task(TaskStatus::Todo, None, None),
        ];
        assert_eq!(calculate_spent_budget(&tasks), 300.0);
        // idempotent
        assert_eq!(calculate_spent_budget(&tasks), calculate_spent_budget(&tasks));
    }
}
