pub mod backup;
pub mod nullable;
pub mod settings;
pub mod upload;
