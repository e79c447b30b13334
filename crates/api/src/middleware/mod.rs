//! Request extractors for authentication, role checks, and project
//! visibility.

pub mod auth;
pub mod rbac;
pub mod visibility;
