//! Domain model for tasks, projects, team members and messages.
//!
//! # Responsibility
//! - Define the entity types and the `ApplicationState` aggregate root.
//! - Stay free of storage and presentation concerns.
//!
//! # Invariants
//! - Every entity is identified by a random UUID that never changes.
//! - Enums carry no display data; colors and labels belong to the UI.

pub mod app_state;
pub mod message;
pub mod project;
pub mod task;
pub mod team_member;
pub mod validation;

use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

pub use app_state::{ApplicationState, DanglingReference};
pub use message::{Message, MessageId};
pub use project::{Project, ProjectId, ProjectStatus};
pub use task::{Task, TaskId, TaskPriority, TaskStatus};
pub use team_member::{initials, MemberId, MemberRole, TeamMember};
pub use validation::ValidationError;

/// Wall-clock instant used for every date field.
pub type Timestamp = DateTime<Utc>;

/// Entity list an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Task,
    Project,
    TeamMember,
    Message,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::TeamMember => "team member",
            Self::Message => "message",
        };
        f.write_str(label)
    }
}
