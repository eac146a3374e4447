//! Built-in sample dataset used when no valid snapshot exists.
//!
//! # Invariants
//! - Exactly 4 tasks, 2 projects, 4 team members and 2 messages.
//! - The first member is the owner and is the current user.
//! - Every reference in the dataset resolves.
//! - Ids are fresh on every call; dates are relative to `now`.

use crate::model::{
    ApplicationState, MemberRole, Message, Project, ProjectStatus, Task, TaskPriority,
    TaskStatus, TeamMember, Timestamp,
};
use chrono::Duration;

/// Builds the sample dataset relative to `now`.
pub fn sample_state(now: Timestamp) -> ApplicationState {
    let you = member("You", "you@company.com", MemberRole::Owner, "pink", now);
    let sarah = member("Sarah Johnson", "sarah@company.com", MemberRole::Manager, "blue", now);
    let michael = member(
        "Michael Chen",
        "michael@company.com",
        MemberRole::Developer,
        "green",
        now,
    );
    let emma = member("Emma Williams", "emma@company.com", MemberRole::Designer, "purple", now);

    let mut launch = Project::new(
        "Mobile App Launch",
        "Launch the new mobile application for our platform",
        now + Duration::days(30),
    );
    launch.status = ProjectStatus::Active;
    launch.start_date = now - Duration::days(30);
    launch.team_member_ids = vec![you.id, sarah.id, michael.id];
    launch.color = "blue".to_string();
    launch.budget = Some(50_000.0);
    launch.progress = 0.65;

    let mut redesign = Project::new(
        "Website Redesign",
        "Complete redesign of the company website",
        now + Duration::days(60),
    );
    redesign.status = ProjectStatus::Planning;
    redesign.start_date = now;
    redesign.team_member_ids = vec![you.id, emma.id];
    redesign.color = "purple".to_string();
    redesign.budget = Some(30_000.0);
    redesign.progress = 0.15;

    let mockups = TaskSeed {
        title: "Design new UI mockups",
        description: "Create high-fidelity mockups for the main dashboard",
        priority: TaskPriority::High,
        status: TaskStatus::InProgress,
        deadline_days: 5,
        tags: &["design", "ui"],
        hours: (16.0, 8.0),
    }
    .build(now, &emma, &launch);

    let auth = TaskSeed {
        title: "Implement authentication",
        description: "Add OAuth2 authentication to the backend",
        priority: TaskPriority::Critical,
        status: TaskStatus::Todo,
        deadline_days: 3,
        tags: &["backend", "security"],
        hours: (24.0, 0.0),
    }
    .build(now, &michael, &launch);

    let docs = TaskSeed {
        title: "Write project documentation",
        description: "Document the API endpoints and usage",
        priority: TaskPriority::Medium,
        status: TaskStatus::Review,
        deadline_days: 7,
        tags: &["documentation"],
        hours: (8.0, 6.0),
    }
    .build(now, &you, &launch);

    let mut research = TaskSeed {
        title: "Research competitor websites",
        description: "Analyze top 10 competitor websites for inspiration",
        priority: TaskPriority::Low,
        status: TaskStatus::Completed,
        deadline_days: -2,
        tags: &["research"],
        hours: (4.0, 5.0),
    }
    .build(now, &sarah, &redesign);
    research.completed_at = Some(now - Duration::days(1));

    let mut timeline = Message::new(
        sarah.id,
        "Can we schedule a meeting to discuss the project timeline?",
    );
    timeline.recipient_id = Some(you.id);
    timeline.project_id = Some(launch.id);
    timeline.sent_at = now - Duration::hours(2);

    let mut migration = Message::new(
        michael.id,
        "I've completed the database migration. Ready for review.",
    );
    migration.recipient_id = Some(you.id);
    migration.sent_at = now - Duration::hours(5);
    migration.is_read = true;

    ApplicationState {
        tasks: vec![mockups, auth, docs, research],
        projects: vec![launch, redesign],
        current_user_id: you.id,
        team_members: vec![you, sarah, michael, emma],
        messages: vec![timeline, migration],
    }
}

fn member(
    name: &str,
    email: &str,
    role: MemberRole,
    avatar_color: &str,
    now: Timestamp,
) -> TeamMember {
    let mut member = TeamMember::new(name, email, role);
    member.avatar_color = avatar_color.to_string();
    member.joined_at = now;
    member
}

struct TaskSeed {
    title: &'static str,
    description: &'static str,
    priority: TaskPriority,
    status: TaskStatus,
    deadline_days: i64,
    tags: &'static [&'static str],
    /// `(estimated, actual)`.
    hours: (f64, f64),
}

impl TaskSeed {
    fn build(self, now: Timestamp, assignee: &TeamMember, project: &Project) -> Task {
        let deadline = now + Duration::days(self.deadline_days);
        let mut task = Task::new(self.title, self.description, deadline);
        task.priority = self.priority;
        task.status = self.status;
        task.created_at = now;
        task.assigned_to_id = Some(assignee.id);
        task.project_id = Some(project.id);
        task.tags = self.tags.iter().map(|tag| (*tag).to_string()).collect();
        (task.estimated_hours, task.actual_hours) = self.hours;
        task
    }
}

#[cfg(test)]
mod tests {
    use super::sample_state;
    use crate::model::MemberRole;
    use chrono::Utc;

    #[test]
    fn sample_state_has_expected_shape() {
        let state = sample_state(Utc::now());

        assert_eq!(state.tasks.len(), 4);
        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.team_members.len(), 4);
        assert_eq!(state.messages.len(), 2);

        let owner = state.current_user().expect("current user resolves");
        assert_eq!(owner.role, MemberRole::Owner);
        assert_eq!(owner.name, "You");
        assert!(state.dangling_references().is_empty());
    }

    #[test]
    fn sample_state_splits_tasks_three_to_one() {
        let state = sample_state(Utc::now());
        assert_eq!(state.tasks_for_project(state.projects[0].id).len(), 3);
        assert_eq!(state.tasks_for_project(state.projects[1].id).len(), 1);
        assert_eq!(state.unread_message_count(), 1);
    }
}
