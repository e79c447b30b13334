//! Closed string vocabularies stored in CHECK-constrained TEXT columns.
//!
//! Each enum maps 1:1 to the values allowed by the corresponding table's
//! CHECK constraint; `as_str` values must match the migration SQL and the
//! name constants in `sitetrack_core::status` / the wire format.

use serde::{Deserialize, Serialize};
use sitetrack_core::error::CoreError;

/// Lifecycle status shared by projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    Planned,
    InProgress,
    Delayed,
    Completed,
}

impl WorkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in-progress",
            Self::Delayed => "delayed",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<String> for WorkStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "planned" => Ok(Self::Planned),
            "in-progress" => Ok(Self::InProgress),
            "delayed" => Ok(Self::Delayed),
            "completed" => Ok(Self::Completed),
            other => Err(CoreError::Internal(format!("Unknown status: {other}"))),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(CoreError::Internal(format!("Unknown priority: {other}"))),
        }
    }
}

/// Media attachment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl TryFrom<String> for MediaKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(CoreError::Internal(format!("Unknown media kind: {other}"))),
        }
    }
}

/// Milestone marker kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    Inspection,
    Approval,
    Handover,
}

impl MilestoneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inspection => "inspection",
            Self::Approval => "approval",
            Self::Handover => "handover",
        }
    }
}

impl TryFrom<String> for MilestoneKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "inspection" => Ok(Self::Inspection),
            "approval" => Ok(Self::Approval),
            "handover" => Ok(Self::Handover),
            other => Err(CoreError::Internal(format!(
                "Unknown milestone kind: {other}"
            ))),
        }
    }
}
