//! Pure domain logic for the sitetrack platform.
//!
//! This crate has zero internal dependencies so the aggregation and timeline
//! layout logic can be used by the API/repository layer and any future worker
//! or CLI tooling.

pub mod aggregate;
pub mod error;
pub mod palette;
pub mod progress;
pub mod roles;
pub mod status;
pub mod timeline;
pub mod types;
