//! Well-known status name constants.
//!
//! Projects and tasks share one lifecycle vocabulary. The names must match
//! the CHECK constraints in the project/task migrations and the typed enums
//! in the db crate's `models::status`; they are duplicated here because
//! `core` has zero internal deps.

pub const STATUS_PLANNED: &str = "planned";
pub const STATUS_IN_PROGRESS: &str = "in-progress";
pub const STATUS_DELAYED: &str = "delayed";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid status names, in lifecycle order.
pub const STATUSES: [&str; 4] = [
    STATUS_PLANNED,
    STATUS_IN_PROGRESS,
    STATUS_DELAYED,
    STATUS_COMPLETED,
];
