//! Read-only summaries behind the dashboard, analytics and team screens.
//!
//! Every function takes the state (or a slice of it) plus an explicit `now`
//! where dates matter, so results are deterministic for a given input.
//! Calendar math uses UTC days and ISO weeks.

use crate::model::{
    ApplicationState, MemberId, Message, Project, ProjectStatus, Task, TaskPriority, Timestamp,
};
use chrono::{Datelike, Duration, NaiveDate};

/// Longest window `daily_completions` reports.
pub const MAX_COMPLETION_WINDOW_DAYS: u32 = 7;

/// Dashboard task filters. All of them hide completed tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    /// Deadline on the same UTC day as `now`.
    Today,
    /// Deadline in the same ISO week as `now`.
    ThisWeek,
    /// Deadline before `now`.
    Overdue,
}

/// Completion stats for one team member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberPerformance {
    pub member_id: MemberId,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    /// `completed / total`, in `0.0..=1.0`.
    pub ratio: f64,
}

/// Open tasks matching `filter`, earliest deadline first.
pub fn filter_tasks<'a>(
    state: &'a ApplicationState,
    filter: TaskFilter,
    now: Timestamp,
) -> Vec<&'a Task> {
    let today = now.date_naive();
    let this_week = now.iso_week();
    let mut tasks = state
        .tasks
        .iter()
        .filter(|task| !task.is_completed())
        .filter(|task| match filter {
            TaskFilter::All => true,
            TaskFilter::Today => task.deadline.date_naive() == today,
            TaskFilter::ThisWeek => task.deadline.iso_week() == this_week,
            TaskFilter::Overdue => task.is_overdue(now),
        })
        .collect::<Vec<_>>();
    tasks.sort_by_key(|task| task.deadline);
    tasks
}

/// Share of completed tasks as a truncated whole percentage.
pub fn completion_rate(tasks: &[Task]) -> u32 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    // Truncation, not rounding: 2 of 3 reports 66.
    (completed * 100 / tasks.len()) as u32
}

pub fn total_actual_hours(tasks: &[Task]) -> f64 {
    tasks.iter().map(|task| task.actual_hours).sum()
}

pub fn active_project_count(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|project| project.status == ProjectStatus::Active)
        .count()
}

pub fn projects_with_status(projects: &[Project], status: ProjectStatus) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| project.status == status)
        .collect()
}

/// Open task count per priority, every priority listed from low to critical.
pub fn open_tasks_by_priority(tasks: &[Task]) -> Vec<(TaskPriority, usize)> {
    TaskPriority::ALL
        .iter()
        .map(|&priority| {
            let count = tasks
                .iter()
                .filter(|task| !task.is_completed() && task.priority == priority)
                .count();
            (priority, count)
        })
        .collect()
}

/// Per-member completion stats in member list order. Members without any
/// assigned task are left out.
pub fn team_performance(state: &ApplicationState) -> Vec<MemberPerformance> {
    state
        .team_members
        .iter()
        .filter_map(|member| {
            let assigned = tasks_assigned_to(state, member.id);
            if assigned.is_empty() {
                return None;
            }
            let completed = assigned.iter().filter(|task| task.is_completed()).count();
            Some(MemberPerformance {
                member_id: member.id,
                name: member.name.clone(),
                completed,
                total: assigned.len(),
                ratio: completed as f64 / assigned.len() as f64,
            })
        })
        .collect()
}

/// Completed-task counts per UTC day for the last `days` days (capped at
/// [`MAX_COMPLETION_WINDOW_DAYS`]), oldest day first, today last.
pub fn daily_completions(tasks: &[Task], now: Timestamp, days: u32) -> Vec<(NaiveDate, usize)> {
    let window = days.min(MAX_COMPLETION_WINDOW_DAYS);
    (0..window)
        .rev()
        .map(|offset| {
            let day = (now - Duration::days(i64::from(offset))).date_naive();
            let count = tasks
                .iter()
                .filter_map(|task| task.completed_at)
                .filter(|completed_at| completed_at.date_naive() == day)
                .count();
            (day, count)
        })
        .collect()
}

pub fn tasks_assigned_to(state: &ApplicationState, member_id: MemberId) -> Vec<&Task> {
    state
        .tasks
        .iter()
        .filter(|task| task.assigned_to_id == Some(member_id))
        .collect()
}

/// Non-completed tasks assigned to `member_id`.
pub fn open_task_count_for(state: &ApplicationState, member_id: MemberId) -> usize {
    tasks_assigned_to(state, member_id)
        .into_iter()
        .filter(|task| !task.is_completed())
        .count()
}

pub fn messages_newest_first(state: &ApplicationState) -> Vec<&Message> {
    let mut messages = state.messages.iter().collect::<Vec<_>>();
    messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    messages
}

#[cfg(test)]
mod tests {
    use super::{completion_rate, daily_completions};
    use crate::model::{Task, TaskStatus};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn completion_rate_truncates() {
        let now = Utc::now();
        let mut tasks = vec![
            Task::new("a", "", now),
            Task::new("b", "", now),
            Task::new("c", "", now),
        ];
        tasks[0].set_status(TaskStatus::Completed, now);
        tasks[1].set_status(TaskStatus::Completed, now);

        assert_eq!(completion_rate(&tasks), 66);
        assert_eq!(completion_rate(&[]), 0);
    }

    #[test]
    fn daily_completions_is_capped_and_ordered() {
        let now = Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
        let mut done = Task::new("done", "", now);
        done.set_status(TaskStatus::Completed, now - Duration::days(2));

        let series = daily_completions(&[done], now, 30);
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].0, now.date_naive());
        assert_eq!(series[4], ((now - Duration::days(2)).date_naive(), 1));
        assert_eq!(series.iter().map(|(_, count)| count).sum::<usize>(), 1);
    }
}
