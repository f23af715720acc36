//! Контейнер состояния приложения.
//!
//! Владеет всеми хранилищами, текущим пользователем и key-value хранилищем.
//! Каждая мутация сначала меняет данные в памяти, затем сохраняет
//! затронутые хранилища. Ошибки записи логируются и не откатывают изменения.

use std::path::PathBuf;
use std::sync::Arc;

use contracts::domain::a001_project::aggregate::{Project, ProjectDto, ProjectId, ProjectPatch};
use contracts::domain::a002_task::aggregate::{Task, TaskDto, TaskId, TaskPatch};
use contracts::domain::a003_member::aggregate::{Member, MemberDto, MemberId, MemberPatch};
use contracts::domain::a004_activity::aggregate::{Activity, Actor};
use contracts::shared::backup::{BackupDocument, BackupImportResult};
use contracts::shared::settings::{AppSettings, AppSettingsPatch};

use crate::domain::a001_project::{self, store::ProjectStore};
use crate::domain::a002_task::{
    self,
    store::{TaskContext, TaskStore},
};
use crate::domain::a003_member::{self, store::MemberStore};
use crate::domain::a004_activity::{
    self,
    store::{ActivityStore, AuditContext},
};
use crate::domain::a005_settings;
use crate::shared::data::{KeyValueStorage, StorageError};
use crate::system::backup::service::{self as backup, BackupError};

/// Состояние HTTP-слоя: контейнер под мьютексом и каталог загрузок.
///
/// Обработчик держит блокировку всю цепочку мутация -> пересчёт -> журнал -> запись.
#[derive(Clone)]
pub struct SharedState {
    pub app: Arc<tokio::sync::Mutex<AppState>>,
    pub upload_dir: Arc<PathBuf>,
}

impl SharedState {
    pub fn new(app: AppState, upload_dir: PathBuf) -> Self {
        Self {
            app: Arc::new(tokio::sync::Mutex::new(app)),
            upload_dir: Arc::new(upload_dir),
        }
    }
}

pub struct AppState {
    storage: Arc<dyn KeyValueStorage>,
    actor: Option<Actor>,
    projects: ProjectStore,
    tasks: TaskStore,
    members: MemberStore,
    activities: ActivityStore,
    settings: AppSettings,
}

fn log_persist_error(what: &str, result: Result<(), StorageError>) {
    if let Err(e) = result {
        tracing::error!("Failed to persist {}: {}", what, e);
    }
}

impl AppState {
    /// Загрузить все хранилища; отсутствующие или битые данные дают пустое состояние
    pub fn load(storage: Arc<dyn KeyValueStorage>, actor: Option<Actor>) -> Self {
        let mut state = Self {
            storage,
            actor,
            projects: ProjectStore::default(),
            tasks: TaskStore::default(),
            members: MemberStore::default(),
            activities: ActivityStore::default(),
            settings: AppSettings::default(),
        };
        state.reload();
        state
    }

    /// Перечитать состояние из хранилища (после импорта резервной копии)
    pub fn reload(&mut self) {
        let storage = self.storage.as_ref();
        self.projects = a001_project::repository::load(storage);
        self.tasks = a002_task::repository::load(storage);
        self.members = a003_member::repository::load(storage);
        self.activities = a004_activity::repository::load(storage);
        self.settings = a005_settings::repository::load(storage);
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn members(&self) -> &MemberStore {
        &self.members
    }

    pub fn activities(&self) -> &ActivityStore {
        &self.activities
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    fn persist_projects(&self) {
        log_persist_error(
            "projects",
            a001_project::repository::persist(self.storage.as_ref(), &self.projects),
        );
    }

    fn persist_tasks(&self) {
        log_persist_error(
            "tasks",
            a002_task::repository::persist(self.storage.as_ref(), &self.tasks),
        );
    }

    fn persist_members(&self) {
        log_persist_error(
            "members",
            a003_member::repository::persist(self.storage.as_ref(), &self.members),
        );
    }

    fn persist_activities(&self) {
        log_persist_error(
            "activities",
            a004_activity::repository::persist(self.storage.as_ref(), &self.activities),
        );
    }

    fn persist_settings(&self) {
        log_persist_error(
            "settings",
            a005_settings::repository::persist(self.storage.as_ref(), &self.settings),
        );
    }

    /// Задачи меняют агрегаты проектов и журнал
    fn persist_task_chain(&self) {
        self.persist_tasks();
        self.persist_projects();
        self.persist_activities();
    }

    // ------------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------------

    pub fn add_project(&mut self, dto: ProjectDto) -> Project {
        let mut audit = AuditContext::new(&mut self.activities, self.actor.as_ref());
        let project = self.projects.add_project(dto, &mut audit);
        self.persist_projects();
        self.persist_activities();
        project
    }

    pub fn update_project(&mut self, id: &ProjectId, patch: &ProjectPatch) -> Option<Project> {
        let mut audit = AuditContext::new(&mut self.activities, self.actor.as_ref());
        let project = self.projects.update_project(id, patch, &mut audit)?;
        self.persist_projects();
        self.persist_activities();
        Some(project)
    }

    pub fn delete_project(&mut self, id: &ProjectId) -> Option<Project> {
        let mut audit = AuditContext::new(&mut self.activities, self.actor.as_ref());
        let project = self.projects.delete_project(id, &mut audit)?;
        self.persist_projects();
        self.persist_activities();
        Some(project)
    }

    // ------------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------------

    pub fn add_task(&mut self, dto: TaskDto) -> Task {
        let mut ctx = TaskContext {
            projects: &mut self.projects,
            audit: AuditContext::new(&mut self.activities, self.actor.as_ref()),
        };
        let task = self.tasks.add_task(dto, &mut ctx);
        self.persist_task_chain();
        task
    }

    pub fn update_task(&mut self, id: &TaskId, patch: &TaskPatch) -> Option<Task> {
        let mut ctx = TaskContext {
            projects: &mut self.projects,
            audit: AuditContext::new(&mut self.activities, self.actor.as_ref()),
        };
        let task = self.tasks.update_task(id, patch, &mut ctx)?;
        self.persist_task_chain();
        Some(task)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> Option<Task> {
        let mut ctx = TaskContext {
            projects: &mut self.projects,
            audit: AuditContext::new(&mut self.activities, self.actor.as_ref()),
        };
        let task = self.tasks.delete_task(id, &mut ctx)?;
        self.persist_task_chain();
        Some(task)
    }

    pub fn assign_task(&mut self, id: &TaskId, member_id: &MemberId) -> Option<Task> {
        let member_name = self.members.member_name(member_id);
        let mut ctx = TaskContext {
            projects: &mut self.projects,
            audit: AuditContext::new(&mut self.activities, self.actor.as_ref()),
        };
        let task = self.tasks.assign_task(id, member_id, member_name, &mut ctx)?;
        self.persist_task_chain();
        Some(task)
    }

    pub fn comment_on_task(&mut self, id: &TaskId, text: &str) -> Option<Activity> {
        let mut ctx = TaskContext {
            projects: &mut self.projects,
            audit: AuditContext::new(&mut self.activities, self.actor.as_ref()),
        };
        let activity = self.tasks.comment_on_task(id, text, &mut ctx)?;
        self.persist_activities();
        Some(activity)
    }

    // ------------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------------

    pub fn add_member(&mut self, dto: MemberDto) -> Member {
        let mut audit = AuditContext::new(&mut self.activities, self.actor.as_ref());
        let member = self.members.add_member(dto, &mut audit);
        self.persist_members();
        self.persist_activities();
        member
    }

    pub fn update_member(&mut self, id: &MemberId, patch: &MemberPatch) -> Option<Member> {
        let member = self.members.update_member(id, patch)?;
        self.persist_members();
        Some(member)
    }

    pub fn remove_member(&mut self, id: &MemberId) -> Option<Member> {
        let mut audit = AuditContext::new(&mut self.activities, self.actor.as_ref());
        let member = self.members.remove_member(id, &mut audit)?;
        self.persist_members();
        self.persist_activities();
        Some(member)
    }

    // ------------------------------------------------------------------------
    // Activities & settings
    // ------------------------------------------------------------------------

    pub fn clear_activities(&mut self) {
        self.activities.clear_activities();
        self.persist_activities();
    }

    pub fn update_settings(&mut self, patch: &AppSettingsPatch) -> &AppSettings {
        self.settings.apply_patch(patch);
        self.persist_settings();
        &self.settings
    }

    pub fn reset_settings(&mut self) -> &AppSettings {
        self.settings = AppSettings::default();
        self.persist_settings();
        &self.settings
    }

    // ------------------------------------------------------------------------
    // Backup
    // ------------------------------------------------------------------------

    pub fn export_backup(&self) -> BackupDocument {
        backup::export_backup(self.storage.as_ref())
    }

    /// Импорт перезаписывает ключи хранилища и перечитывает состояние
    pub fn import_backup(&mut self, raw: &str) -> Result<BackupImportResult, BackupError> {
        let result = backup::import_backup(self.storage.as_ref(), raw)?;
        self.reload();
        Ok(result)
    }
}
