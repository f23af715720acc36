//! Хранилище задач.
//!
//! Каждая успешная мутация выполняется в фиксированном порядке:
//! 1. изменение списка задач;
//! 2. пересчёт прогресса и расхода бюджета проекта-владельца;
//! 3. ровно одна запись в журнал активности.
//!
//! Операции с неизвестным id ничего не меняют и возвращают `None`.

use contracts::domain::a001_project::aggregate::ProjectId;
use contracts::domain::a002_task::aggregate::{Task, TaskDto, TaskId, TaskPatch};
use contracts::domain::a003_member::aggregate::MemberId;
use contracts::domain::a004_activity::aggregate::{Activity, ActivityDraft, ActivityType};
use contracts::domain::common::AggregateRoot;
use contracts::enums::TaskStatus;
use serde::{Deserialize, Serialize};

use super::aggregates::{calculate_progress, calculate_spent_budget};
use crate::domain::a001_project::store::ProjectAggregates;
use crate::domain::a004_activity::store::AuditContext;
use crate::shared::ids::next_id;

/// Зависимости мутаций задач: агрегаты проектов и журнал
pub struct TaskContext<'a> {
    pub projects: &'a mut dyn ProjectAggregates,
    pub audit: AuditContext<'a>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn get_tasks_by_project(&self, project_id: &ProjectId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| &t.project_id == project_id)
            .collect()
    }

    pub fn get_tasks_by_status(&self, project_id: &ProjectId, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| &t.project_id == project_id && t.status == status)
            .collect()
    }

    pub fn get_tasks_by_assignee(&self, member_id: &MemberId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.assignee.as_ref() == Some(member_id))
            .collect()
    }

    /// Пересчитать прогресс и расход бюджета проекта по текущему списку задач
    pub fn recompute_project(&self, project_id: &ProjectId, projects: &mut dyn ProjectAggregates) {
        let tasks = self.get_tasks_by_project(project_id);
        projects.update_project_progress(project_id, calculate_progress(tasks.iter().copied()));
        projects.update_project_budget(project_id, calculate_spent_budget(tasks.iter().copied()));
    }

    fn task_draft(
        activity_type: ActivityType,
        task: &Task,
        projects: &dyn ProjectAggregates,
    ) -> ActivityDraft {
        ActivityDraft::new(activity_type)
            .task(&task.id, task.title.clone())
            .project(&task.project_id, projects.project_name(&task.project_id))
    }

    /// Создание задачи
    pub fn add_task(&mut self, dto: TaskDto, ctx: &mut TaskContext<'_>) -> Task {
        let id: TaskId = next_id(|candidate| self.get_task(candidate).is_some());
        let task = Task::new_for_insert(id, dto);
        self.tasks.push(task.clone());

        self.recompute_project(&task.project_id, ctx.projects);
        ctx.audit.record(Self::task_draft(
            ActivityType::TaskCreated,
            &task,
            ctx.projects,
        ));

        tracing::info!(
            "{} created: {} (project {})",
            Task::element_name(),
            task.id,
            task.project_id
        );
        task
    }

    /// Частичное обновление задачи.
    ///
    /// В журнал пишется `TASK_STATUS_CHANGED`, если сменился статус, иначе
    /// `TASK_UPDATED`, даже если вместе со статусом менялись другие поля.
    pub fn update_task(
        &mut self,
        id: &TaskId,
        patch: &TaskPatch,
        ctx: &mut TaskContext<'_>,
    ) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| &t.id == id)?;
        let old_status = task.status;
        let old_project = task.project_id.clone();
        task.apply_patch(patch);
        task.touch();
        let updated = task.clone();

        self.recompute_project(&updated.project_id, ctx.projects);
        if old_project != updated.project_id {
            self.recompute_project(&old_project, ctx.projects);
        }

        let draft = if updated.status != old_status {
            Self::task_draft(ActivityType::TaskStatusChanged, &updated, ctx.projects)
                .change(old_status.display_name(), updated.status.display_name())
        } else {
            Self::task_draft(ActivityType::TaskUpdated, &updated, ctx.projects)
        };
        ctx.audit.record(draft);

        tracing::debug!("{} updated: {}", Task::element_name(), updated.id);
        Some(updated)
    }

    /// Удаление задачи; агрегаты считаются по списку уже без неё
    pub fn delete_task(&mut self, id: &TaskId, ctx: &mut TaskContext<'_>) -> Option<Task> {
        let index = self.tasks.iter().position(|t| &t.id == id)?;
        let removed = self.tasks.remove(index);

        self.recompute_project(&removed.project_id, ctx.projects);
        ctx.audit.record(Self::task_draft(
            ActivityType::TaskDeleted,
            &removed,
            ctx.projects,
        ));

        tracing::info!("{} deleted: {}", Task::element_name(), removed.id);
        Some(removed)
    }

    /// Назначить исполнителя; пишет `TASK_ASSIGNED`
    pub fn assign_task(
        &mut self,
        id: &TaskId,
        member_id: &MemberId,
        member_name: Option<String>,
        ctx: &mut TaskContext<'_>,
    ) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| &t.id == id)?;
        task.assignee = Some(member_id.clone());
        task.touch();
        let updated = task.clone();

        self.recompute_project(&updated.project_id, ctx.projects);
        ctx.audit.record(
            Self::task_draft(ActivityType::TaskAssigned, &updated, ctx.projects)
                .member(member_id, member_name),
        );
        Some(updated)
    }

    /// Комментарий к задаче: только запись `TASK_COMMENTED`, задача не меняется
    pub fn comment_on_task(
        &self,
        id: &TaskId,
        text: &str,
        ctx: &mut TaskContext<'_>,
    ) -> Option<Activity> {
        let task = self.get_task(id)?;
        let activity = ctx.audit.record(
            Self::task_draft(ActivityType::TaskCommented, task, ctx.projects).new_value(text),
        );
        Some(activity)
    }
}
