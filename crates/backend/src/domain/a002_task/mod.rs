pub mod aggregates;
pub mod repository;
pub mod store;
