pub mod a001_project;
pub mod a002_task;
pub mod a003_member;
pub mod a004_activity;
pub mod common;
