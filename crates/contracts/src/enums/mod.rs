pub mod member_role;
pub mod priority;
pub mod project_status;
pub mod task_status;

pub use member_role::MemberRole;
pub use priority::Priority;
pub use project_status::ProjectStatus;
pub use task_status::TaskStatus;
