//! Project domain model.
//!
//! # Invariants
//! - Deleting a project removes every task whose `project_id` matches it.
//! - `team_member_ids` is treated as a set by callers, but duplicates are
//!   stored as given.
//! - `progress` is conventionally `0.0..=1.0` and is never clamped.

use super::validation::{check_finite, check_id, check_non_negative, ValidationError};
use super::{MemberId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable project identifier.
pub type ProjectId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: Timestamp,
    pub deadline: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub team_member_ids: Vec<MemberId>,
    /// Display color tag, interpreted by the UI.
    pub color: String,
    pub budget: Option<f64>,
    pub progress: f64,
}

impl Project {
    /// Creates a `Planning` project starting now, with a fresh id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        deadline: Timestamp,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, description, deadline)
    }

    pub fn with_id(
        id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        deadline: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            status: ProjectStatus::Planning,
            start_date: Utc::now(),
            deadline,
            completed_at: None,
            team_member_ids: Vec::new(),
            color: "blue".to_string(),
            budget: None,
            progress: 0.0,
        }
    }

    /// Moves the project to `status`, stamping `completed_at` with `now` the
    /// first time it reaches `Completed`.
    pub fn set_status(&mut self, status: ProjectStatus, now: Timestamp) {
        self.status = status;
        if status == ProjectStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Checks id, budget and progress.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `NegativeValue` for a negative budget.
    /// - `NonFiniteValue` for NaN/infinite budget or progress.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.id)?;
        if let Some(budget) = self.budget {
            check_non_negative("budget", budget)?;
        }
        check_finite("progress", self.progress)
    }
}
