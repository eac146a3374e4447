//! Aggregate root holding every entity list.
//!
//! # Responsibility
//! - Own ordered entity lists and the current-user pointer.
//! - Resolve id references at read time.
//!
//! # Invariants
//! - List order is insertion order and survives encode/decode unchanged.
//! - References are not enforced on write; `dangling_references` reports
//!   the ones that no longer resolve.
//! - The JSON snapshot has no NaN or infinity; `non_finite_field` finds
//!   values that cannot be encoded.

use super::{
    EntityKind, MemberId, Message, MessageId, Project, ProjectId, Task, TaskId, TeamMember,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The unit of persistence: the whole object graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationState {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub team_members: Vec<TeamMember>,
    pub messages: Vec<Message>,
    pub current_user_id: MemberId,
}

/// One reference field whose target is missing from its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingReference {
    /// Kind of the entity holding the reference.
    pub owner: EntityKind,
    pub owner_id: Uuid,
    /// Wire name of the reference field.
    pub field: &'static str,
    pub target: Uuid,
}

impl ApplicationState {
    /// Empty graph pointing at `current_user_id`.
    pub fn empty(current_user_id: MemberId) -> Self {
        Self {
            tasks: Vec::new(),
            projects: Vec::new(),
            team_members: Vec::new(),
            messages: Vec::new(),
            current_user_id,
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn team_member(&self, id: MemberId) -> Option<&TeamMember> {
        self.team_members.iter().find(|member| member.id == id)
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    pub fn current_user(&self) -> Option<&TeamMember> {
        self.team_member(self.current_user_id)
    }

    /// Tasks whose `project_id` equals `project_id`, in list order.
    pub fn tasks_for_project(&self, project_id: ProjectId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == Some(project_id))
            .collect()
    }

    pub fn unread_message_count(&self) -> usize {
        self.messages.iter().filter(|message| !message.is_read).count()
    }

    /// First float field holding NaN or infinity, as `(owner kind, owner id,
    /// field)`.
    pub fn non_finite_field(&self) -> Option<(EntityKind, Uuid, &'static str)> {
        let task = self.tasks.iter().find_map(|task| {
            [
                ("estimated_hours", task.estimated_hours),
                ("actual_hours", task.actual_hours),
            ]
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(field, _)| (EntityKind::Task, task.id, field))
        });
        task.or_else(|| {
            self.projects.iter().find_map(|project| {
                [("budget", project.budget), ("progress", Some(project.progress))]
                    .into_iter()
                    .find(|(_, value)| value.is_some_and(|value| !value.is_finite()))
                    .map(|(field, _)| (EntityKind::Project, project.id, field))
            })
        })
    }

    /// Lists every reference that does not resolve, grouped by owner list
    /// in list order.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        let member_missing = |id: MemberId| self.team_member(id).is_none();
        let project_missing = |id: ProjectId| self.project(id).is_none();

        for task in &self.tasks {
            if let Some(target) = task.assigned_to_id.filter(|id| member_missing(*id)) {
                dangling.push(DanglingReference {
                    owner: EntityKind::Task,
                    owner_id: task.id,
                    field: "assigned_to_id",
                    target,
                });
            }
            if let Some(target) = task.project_id.filter(|id| project_missing(*id)) {
                dangling.push(DanglingReference {
                    owner: EntityKind::Task,
                    owner_id: task.id,
                    field: "project_id",
                    target,
                });
            }
        }

        for project in &self.projects {
            for target in project
                .team_member_ids
                .iter()
                .copied()
                .filter(|id| member_missing(*id))
            {
                dangling.push(DanglingReference {
                    owner: EntityKind::Project,
                    owner_id: project.id,
                    field: "team_member_ids",
                    target,
                });
            }
        }

        for message in &self.messages {
            if member_missing(message.sender_id) {
                dangling.push(DanglingReference {
                    owner: EntityKind::Message,
                    owner_id: message.id,
                    field: "sender_id",
                    target: message.sender_id,
                });
            }
            if let Some(target) = message.recipient_id.filter(|id| member_missing(*id)) {
                dangling.push(DanglingReference {
                    owner: EntityKind::Message,
                    owner_id: message.id,
                    field: "recipient_id",
                    target,
                });
            }
            if let Some(target) = message.project_id.filter(|id| project_missing(*id)) {
                dangling.push(DanglingReference {
                    owner: EntityKind::Message,
                    owner_id: message.id,
                    field: "project_id",
                    target,
                });
            }
        }

        dangling
    }
}
