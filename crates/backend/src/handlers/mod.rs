pub mod a001_project;
pub mod a002_task;
pub mod a003_member;
pub mod a004_activity;
pub mod backup;
pub mod dashboards;
pub mod files;
pub mod settings;
