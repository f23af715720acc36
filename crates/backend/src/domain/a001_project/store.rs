use contracts::domain::a001_project::aggregate::{Project, ProjectDto, ProjectId, ProjectPatch};
use contracts::domain::a004_activity::aggregate::{ActivityDraft, ActivityType};
use contracts::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

use crate::domain::a004_activity::store::AuditContext;
use crate::shared::ids::next_id;

/// Узкий интерфейс проекта для пересчёта агрегатов после изменения задач.
///
/// Сеттеры перезаписывают поле без проверок; неизвестный проект игнорируется.
pub trait ProjectAggregates {
    fn project_name(&self, project_id: &ProjectId) -> Option<String>;

    fn update_project_progress(&mut self, project_id: &ProjectId, progress: f64);

    fn update_project_budget(&mut self, project_id: &ProjectId, spent_budget: f64);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    fn get_project_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| &p.id == id)
    }

    /// Создание проекта (прогресс и расход бюджета начинаются с нуля)
    pub fn add_project(&mut self, dto: ProjectDto, audit: &mut AuditContext<'_>) -> Project {
        let id: ProjectId = next_id(|candidate| self.get_project(candidate).is_some());
        let project = Project::new_for_insert(id, dto);
        self.projects.push(project.clone());

        audit.record(
            ActivityDraft::new(ActivityType::ProjectCreated)
                .project(&project.id, Some(project.name.clone())),
        );
        tracing::info!("{} created: {}", Project::element_name(), project.id);
        project
    }

    /// Обновление проекта; `progress` и `spentBudget` не меняются
    pub fn update_project(
        &mut self,
        id: &ProjectId,
        patch: &ProjectPatch,
        audit: &mut AuditContext<'_>,
    ) -> Option<Project> {
        let project = self.get_project_mut(id)?;
        let old_status = project.status;
        project.apply_patch(patch);
        project.touch();
        let updated = project.clone();

        let draft = if updated.status != old_status {
            ActivityDraft::new(ActivityType::ProjectStatusChanged)
                .change(old_status.display_name(), updated.status.display_name())
        } else {
            ActivityDraft::new(ActivityType::ProjectUpdated)
        };
        audit.record(draft.project(&updated.id, Some(updated.name.clone())));
        Some(updated)
    }

    /// Удаление проекта. Задачи проекта остаются на месте.
    pub fn delete_project(
        &mut self,
        id: &ProjectId,
        audit: &mut AuditContext<'_>,
    ) -> Option<Project> {
        let index = self.projects.iter().position(|p| &p.id == id)?;
        let removed = self.projects.remove(index);
        audit.record(
            ActivityDraft::new(ActivityType::ProjectDeleted)
                .project(&removed.id, Some(removed.name.clone())),
        );
        tracing::info!("{} deleted: {}", Project::element_name(), removed.id);
        Some(removed)
    }

    /// Записать прогресс проекта. Возвращает `false`, если проекта нет.
    pub fn set_progress(&mut self, id: &ProjectId, progress: f64) -> bool {
        match self.get_project_mut(id) {
            Some(project) => {
                project.progress = progress;
                true
            }
            None => false,
        }
    }

    /// Записать израсходованный бюджет. Возвращает `false`, если проекта нет.
    pub fn set_spent_budget(&mut self, id: &ProjectId, spent_budget: f64) -> bool {
        match self.get_project_mut(id) {
            Some(project) => {
                project.spent_budget = spent_budget;
                true
            }
            None => false,
        }
    }
}

impl ProjectAggregates for ProjectStore {
    fn project_name(&self, project_id: &ProjectId) -> Option<String> {
        self.get_project(project_id).map(|p| p.name.clone())
    }

    fn update_project_progress(&mut self, project_id: &ProjectId, progress: f64) {
        if !self.set_progress(project_id, progress) {
            tracing::debug!("Progress for unknown project {} ignored", project_id);
        }
    }

    fn update_project_budget(&mut self, project_id: &ProjectId, spent_budget: f64) {
        if !self.set_spent_budget(project_id, spent_budget) {
            tracing::debug!("Spent budget for unknown project {} ignored", project_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_activity::store::ActivityStore;
    use contracts::enums::ProjectStatus;

    fn dto(name: &str) -> ProjectDto {
        ProjectDto {
            name: name.into(),
            budget: 1_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_logs_project_created() {
        let mut store = ProjectStore::new();
        let mut activities = ActivityStore::new();
        let project = store.add_project(dto("X"), &mut AuditContext::new(&mut activities, None));

        assert_eq!(project.progress, 0.0);
        assert_eq!(project.spent_budget, 0.0);
        let logged = activities.iter().next().unwrap();
        assert_eq!(logged.activity_type, ActivityType::ProjectCreated);
        assert_eq!(logged.project_name.as_deref(), Some("X"));
    }

    #[test]
    fn test_status_change_vs_plain_update() {
        let mut store = ProjectStore::new();
        let mut activities = ActivityStore::new();
        let mut audit = AuditContext::new(&mut activities, None);
        let project = store.add_project(dto("X"), &mut audit);

        let patch = ProjectPatch {
            status: Some(ProjectStatus::InProgress),
            ..Default::default()
        };
        store.update_project(&project.id, &patch, &mut audit).unwrap();
        let patch = ProjectPatch {
            description: Some("d".into()),
            ..Default::default()
        };
        store.update_project(&project.id, &patch, &mut audit).unwrap();

        let types: Vec<ActivityType> = activities.iter().map(|a| a.activity_type.clone()).collect();
        assert_eq!(
            types,
            vec![
                ActivityType::ProjectUpdated,
                ActivityType::ProjectStatusChanged,
                ActivityType::ProjectCreated
            ]
        );
        let changed = activities.iter().nth(1).unwrap();
        assert_eq!(changed.old_value.as_deref(), Some("계획"));
        assert_eq!(changed.new_value.as_deref(), Some("진행 중"));
    }

    #[test]
    fn test_setters_are_noops_for_unknown_project() {
        let mut store = ProjectStore::new();
        let unknown = ProjectId::new("project-404");
        store.update_project_progress(&unknown, 50.0);
        store.update_project_budget(&unknown, 10.0);
        assert!(store.list_projects().is_empty());
        assert!(!store.set_progress(&unknown, 1.0));
    }

    #[test]
    fn test_setters_overwrite_without_validation() {
        let mut store = ProjectStore::new();
        let mut activities = ActivityStore::new();
        let project = store.add_project(dto("X"), &mut AuditContext::new(&mut activities, None));

        store.update_project_progress(&project.id, 150.0);
        store.update_project_budget(&project.id, 42.0);
        let stored = store.get_project(&project.id).unwrap();
        assert_eq!(stored.progress, 150.0);
        assert_eq!(stored.spent_budget, 42.0);
    }

    #[test]
    fn test_unknown_update_and_delete_do_not_log() {
        let mut store = ProjectStore::new();
        let mut activities = ActivityStore::new();
        let mut audit = AuditContext::new(&mut activities, None);
        let unknown = ProjectId::new("project-404");
        assert!(store
            .update_project(&unknown, &ProjectPatch::default(), &mut audit)
            .is_none());
        assert!(store.delete_project(&unknown, &mut audit).is_none());
        assert!(activities.is_empty());
    }
}
