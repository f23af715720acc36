use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::enums::MemberRole;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор участника команды (`member-<millis>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AggregateId for MemberId {
    const PREFIX: &'static str = "member";

    fn from_raw(value: String) -> Self {
        Self(value)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Участник команды
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Member {
    pub fn new_for_insert(id: MemberId, dto: MemberDto) -> Self {
        Self {
            id,
            name: dto.name,
            email: dto.email,
            role: dto.role,
            department: dto.department,
            phone: dto.phone,
            avatar: dto.avatar,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn apply_patch(&mut self, patch: &MemberPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(department) = &patch.department {
            self.department = department.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(avatar) = &patch.avatar {
            self.avatar = avatar.clone();
        }
    }
}

impl AggregateRoot for Member {
    type Id = MemberId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn description(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "member"
    }

    fn element_name() -> &'static str {
        "팀원"
    }

    fn list_name() -> &'static str {
        "팀원 목록"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberDto {
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub department: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::shared::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<Option<String>>,
}
