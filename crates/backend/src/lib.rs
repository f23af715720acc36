//! Backend of the project management application: in-memory stores with
//! JSON key-value persistence, derived views and the HTTP API over them.

pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;
