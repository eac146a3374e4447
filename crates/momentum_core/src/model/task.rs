//! Task domain model.
//!
//! # Responsibility
//! - Define the unit of work tracked by the dashboard and project screens.
//! - Provide completion stamping and overdue checks used by read paths.
//!
//! # Invariants
//! - `id` is generated once and never reused for another task.
//! - `estimated_hours` and `actual_hours` are expected to be non-negative;
//!   the store only checks this when write validation is enabled.
//! - `completed_at` is only stamped once, on the first move to `Completed`.

use super::validation::{check_id, check_non_negative, ValidationError};
use super::{MemberId, ProjectId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable task identifier.
pub type TaskId = Uuid;

/// Urgency of a task, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    /// Every priority, least urgent first.
    pub const ALL: [TaskPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];
}

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not started.
    Todo,
    /// Work is in progress.
    InProgress,
    /// Waiting on review.
    Review,
    /// Done.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub deadline: Timestamp,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    /// Team member responsible for the task. May dangle after a member delete.
    pub assigned_to_id: Option<MemberId>,
    /// Owning project. Tasks are removed together with their project.
    pub project_id: Option<ProjectId>,
    /// Free-text tags in insertion order.
    pub tags: Vec<String>,
    pub estimated_hours: f64,
    pub actual_hours: f64,
}

impl Task {
    /// Creates a `Todo` task of medium priority with a fresh id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: Timestamp,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, description, deadline)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used by seed/import paths where identity already exists.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: Timestamp,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            priority: TaskPriority::Medium,
            status: TaskStatus::Todo,
            deadline,
            created_at: Utc::now(),
            completed_at: None,
            assigned_to_id: None,
            project_id: None,
            tags: Vec::new(),
            estimated_hours: 0.0,
            actual_hours: 0.0,
        }
    }

    /// Moves the task to `status`, stamping `completed_at` with `now` the
    /// first time it reaches `Completed`.
    pub fn set_status(&mut self, status: TaskStatus, now: Timestamp) {
        self.status = status;
        if status == TaskStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// A task is overdue when its deadline has passed and it is not completed.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.deadline < now && !self.is_completed()
    }

    /// Checks id and hour fields.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `NegativeValue`/`NonFiniteValue` for invalid hour values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.id)?;
        check_non_negative("estimated_hours", self.estimated_hours)?;
        check_non_negative("actual_hours", self.actual_hours)
    }
}
