pub mod repository;
pub mod store;
