pub mod config;
pub mod data;
pub mod files;
pub mod format;
pub mod ids;
