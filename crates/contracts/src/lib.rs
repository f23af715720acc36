//! Shared domain types of the project management application:
//! aggregates, enums, DTOs of derived views, settings and backup format.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod shared;
