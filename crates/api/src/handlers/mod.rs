//! HTTP handler functions, one module per resource.

pub mod auth;
pub mod media;
pub mod milestone;
pub mod phase;
pub mod project;
pub mod task;
pub mod timeline;
pub mod users;
