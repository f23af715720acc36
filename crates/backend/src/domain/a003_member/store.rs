use contracts::domain::a003_member::aggregate::{Member, MemberDto, MemberId, MemberPatch};
use contracts::domain::a004_activity::aggregate::{ActivityDraft, ActivityType};
use contracts::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

use crate::domain::a004_activity::store::AuditContext;
use crate::shared::ids::next_id;

/// Хранилище участников команды.
///
/// Удаление участника не трогает задачи и проекты, которые на него ссылаются.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberStore {
    members: Vec<Member>,
}

impl MemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_members(&self) -> &[Member] {
        &self.members
    }

    pub fn get_member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn member_name(&self, id: &MemberId) -> Option<String> {
        self.get_member(id).map(|m| m.name.clone())
    }

    pub fn add_member(&mut self, dto: MemberDto, audit: &mut AuditContext<'_>) -> Member {
        let id: MemberId = next_id(|candidate| self.get_member(candidate).is_some());
        let member = Member::new_for_insert(id, dto);
        self.members.push(member.clone());

        audit.record(
            ActivityDraft::new(ActivityType::MemberAdded)
                .member(&member.id, Some(member.name.clone()))
                .new_value(member.role.display_name()),
        );
        tracing::info!("{} added: {}", Member::element_name(), member.id);
        member
    }

    /// Обновление профиля; в журнал не пишется
    pub fn update_member(&mut self, id: &MemberId, patch: &MemberPatch) -> Option<Member> {
        let member = self.members.iter_mut().find(|m| &m.id == id)?;
        member.apply_patch(patch);
        member.touch();
        Some(member.clone())
    }

    pub fn remove_member(&mut self, id: &MemberId, audit: &mut AuditContext<'_>) -> Option<Member> {
        let index = self.members.iter().position(|m| &m.id == id)?;
        let removed = self.members.remove(index);
        audit.record(
            ActivityDraft::new(ActivityType::MemberRemoved)
                .member(&removed.id, Some(removed.name.clone())),
        );
        tracing::info!("{} removed: {}", Member::element_name(), removed.id);
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_activity::store::ActivityStore;
    use contracts::enums::MemberRole;

    fn dto(name: &str) -> MemberDto {
        MemberDto {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: MemberRole::Designer,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_update_remove() {
        let mut store = MemberStore::new();
        let mut activities = ActivityStore::new();
        let mut audit = AuditContext::new(&mut activities, None);

        let member = store.add_member(dto("Kim"), &mut audit);
        assert_eq!(store.member_name(&member.id).as_deref(), Some("Kim"));

        let patch = MemberPatch {
            department: Some("Design".into()),
            ..Default::default()
        };
        let updated = store.update_member(&member.id, &patch).unwrap();
        assert_eq!(updated.department, "Design");
        assert_eq!(updated.email, "kim@example.com");

        store.remove_member(&member.id, &mut audit).unwrap();
        assert!(store.list_members().is_empty());

        let types: Vec<ActivityType> = activities.iter().map(|a| a.activity_type.clone()).collect();
        assert_eq!(types, vec![ActivityType::MemberRemoved, ActivityType::MemberAdded]);
        let added = activities.iter().nth(1).unwrap();
        assert_eq!(added.member_id, Some(member.id.clone()));
        assert_eq!(added.member_name.as_deref(), Some("Kim"));
    }

    #[test]
    fn test_unknown_member_is_a_noop() {
        let mut store = MemberStore::new();
        let mut activities = ActivityStore::new();
        let missing = MemberId::new("member-404");

        assert!(store
            .update_member(&missing, &MemberPatch::default())
            .is_none());
        assert!(store
            .remove_member(&missing, &mut AuditContext::new(&mut activities, None))
            .is_none());
        assert!(activities.is_empty());
    }
}
