//! Progress/status derivation and progress-update input validation.
//!
//! The derivation rule applies only to the dedicated progress-update
//! operation. The general task-edit operation sets status and progress
//! independently and may therefore leave them inconsistent; that divergence
//! is accepted behaviour and is not reconciled anywhere.

use crate::error::CoreError;
use crate::status::{STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_PLANNED};

/// Derive the status implied by a progress percentage.
///
/// 100 maps to completed, 0 maps back to planned, anything in between is
/// in-progress.
pub fn status_for_progress(progress: i32) -> &'static str {
    if progress >= 100 {
        STATUS_COMPLETED
    } else if progress > 0 {
        STATUS_IN_PROGRESS
    } else {
        STATUS_PLANNED
    }
}

/// Validate that a progress percentage is within 0..=100.
pub fn validate_progress(progress: i32) -> Result<(), CoreError> {
    if !(0..=100).contains(&progress) {
        return Err(CoreError::Validation(format!(
            "Progress must be between 0 and 100, got {progress}"
        )));
    }
    Ok(())
}

/// Validate the mandatory comment accompanying a progress update.
///
/// Every progress update appends exactly one progress comment; an empty or
/// whitespace-only comment is rejected before any write is attempted.
pub fn validate_comment(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "A progress update requires a non-empty comment".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
