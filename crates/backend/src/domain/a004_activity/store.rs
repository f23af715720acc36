//! Журнал активности: ограниченная очередь, новые записи в начале.

use std::collections::VecDeque;

use chrono::Utc;
use contracts::domain::a001_project::aggregate::ProjectId;
use contracts::domain::a003_member::aggregate::MemberId;
use contracts::domain::a004_activity::aggregate::{
    Activity, ActivityDraft, Actor, DEFAULT_RECENT_LIMIT, MAX_ACTIVITIES,
};
use serde::{Deserialize, Serialize};

use crate::shared::ids::activity_id;

/// Приёмник записей журнала.
///
/// Хранилища задач, проектов и участников пишут журнал только через него.
pub trait ActivitySink {
    fn add_activity(&mut self, draft: ActivityDraft) -> Activity;
}

/// Журнал + текущий пользователь, от имени которого пишутся записи
pub struct AuditContext<'a> {
    pub activities: &'a mut dyn ActivitySink,
    pub actor: Option<&'a Actor>,
}

impl<'a> AuditContext<'a> {
    pub fn new(activities: &'a mut dyn ActivitySink, actor: Option<&'a Actor>) -> Self {
        Self { activities, actor }
    }

    /// Записать событие, подставив автора
    pub fn record(&mut self, draft: ActivityDraft) -> Activity {
        self.activities.add_activity(draft.actor(self.actor))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityStore {
    /// Новые записи в начале, не больше `MAX_ACTIVITIES`
    activities: VecDeque<Activity>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Восстановить журнал из сохранённых записей (лишние старые отбрасываются)
    pub fn from_activities(activities: impl IntoIterator<Item = Activity>) -> Self {
        let mut store = Self {
            activities: activities.into_iter().collect(),
        };
        store.activities.truncate(MAX_ACTIVITIES);
        store
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Все записи, новые первыми
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn clear_activities(&mut self) {
        self.activities.clear();
        tracing::info!("Activity log cleared");
    }

    pub fn get_activities_by_project(&self, project_id: &ProjectId) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| a.project_id.as_ref() == Some(project_id))
            .collect()
    }

    /// Записи, где участник указан как автор (`userId`) или как объект (`memberId`)
    pub fn get_activities_by_member(&self, member_id: &MemberId) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| a.involves_member(member_id))
            .collect()
    }

    /// Последние `limit` записей (по умолчанию 50)
    pub fn get_recent_activities(&self, limit: Option<usize>) -> Vec<&Activity> {
        self.activities
            .iter()
            .take(limit.unwrap_or(DEFAULT_RECENT_LIMIT))
            .collect()
    }
}

impl ActivitySink for ActivityStore {
    fn add_activity(&mut self, draft: ActivityDraft) -> Activity {
        let activity = Activity::from_draft(activity_id(), Utc::now(), draft);
        self.activities.push_front(activity.clone());
        if self.activities.len() > MAX_ACTIVITIES {
            self.activities.pop_back();
        }
        tracing::debug!(
            "Activity {} recorded: {}",
            activity.id,
            activity.activity_type
        );
        activity
    }
}
