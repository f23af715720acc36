pub mod aggregate;
pub mod presentation;
