//! Application store: the single owner of the in-memory object graph.
//!
//! # Responsibility
//! - Load the snapshot once at startup, falling back to the sample dataset.
//! - Apply add/update/delete mutations and persist the full snapshot after
//!   each of them.
//! - Notify subscribed views synchronously after every mutation.
//!
//! # Invariants
//! - The in-memory state is authoritative; a failed write never rolls it back.
//! - Deleting a project deletes its tasks. No other delete cascades.
//! - A snapshot with NaN or infinite numbers is never written; the stored
//!   copy may go stale but stays decodable.
//! - An update or mark-as-read on a missing id writes nothing and notifies
//!   no one. A delete of a missing id still persists and notifies.
//! - Read accessors hand out shared borrows only; every change goes through
//!   a mutation method.

use crate::config::{MissingIdPolicy, StoreConfig, WriteFailurePolicy};
use crate::model::{
    ApplicationState, EntityKind, MemberId, Message, MessageId, Project, ProjectId, Task, TaskId,
    TeamMember, ValidationError,
};
use crate::repo::blob_repo::{BlobStore, RepoError};
use crate::seed::sample_state;
use chrono::Utc;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surfaced by the store when a strict policy is configured.
#[derive(Debug)]
pub enum StoreError {
    /// Blob store read/write failure.
    Repo(RepoError),
    /// Snapshot could not be serialized.
    Encode(serde_json::Error),
    /// A float field holds NaN or infinity, which the snapshot cannot carry.
    /// The previous snapshot is left in place.
    NonFinite {
        kind: EntityKind,
        id: Uuid,
        field: &'static str,
    },
    /// Target id is not present in its list.
    NotFound { kind: EntityKind, id: Uuid },
    /// Input rejected by entity validation.
    Validation(ValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode application state: {err}"),
            Self::NonFinite { kind, id, field } => {
                write!(f, "cannot encode {kind} {id}: {field} is not a finite number")
            }
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NonFinite { .. } | Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Where the current state came from at the last (re)load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSource {
    /// Decoded from the stored snapshot.
    Persisted,
    /// Built from the sample dataset.
    Seeded,
}

/// Handle returned by [`ApplicationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ApplicationState)>;

/// Explicit application context owning the object graph and its storage.
///
/// Construct once at process entry with [`ApplicationStore::open`] and pass
/// it by reference to consumers.
pub struct ApplicationStore<B: BlobStore> {
    blobs: B,
    config: StoreConfig,
    state: ApplicationState,
    source: StateSource,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
}

impl<B: BlobStore> ApplicationStore<B> {
    /// Loads the stored snapshot or falls back to the sample dataset.
    ///
    /// A missing key, unreadable record or undecodable payload all take the
    /// fallback path, which persists the sample dataset immediately.
    ///
    /// # Errors
    /// Only with `WriteFailurePolicy::Propagate`, when persisting the
    /// sample dataset fails.
    pub fn open(blobs: B, config: StoreConfig) -> StoreResult<Self> {
        let started_at = Instant::now();
        let (state, source) = load_state(&blobs, &config.storage_key);
        let mut store = Self {
            blobs,
            config,
            state,
            source,
            listeners: BTreeMap::new(),
            next_subscription: 0,
        };

        if source == StateSource::Seeded {
            let written = store.persist();
            store.settle_write(written)?;
        }

        info!(
            "event=store_open module=store status=ok source={} tasks={} projects={} members={} messages={} duration_ms={}",
            source_label(source),
            store.state.tasks.len(),
            store.state.projects.len(),
            store.state.team_members.len(),
            store.state.messages.len(),
            started_at.elapsed().as_millis()
        );
        Ok(store)
    }

    /// Re-reads the snapshot from the blob store, with the same fallback as
    /// [`ApplicationStore::open`]. Subscribers are notified.
    pub fn reload(&mut self) -> StoreResult<()> {
        let (state, source) = load_state(&self.blobs, &self.config.storage_key);
        self.state = state;
        self.source = source;
        info!(
            "event=store_reload module=store status=ok source={}",
            source_label(source)
        );
        if source == StateSource::Seeded {
            return self.commit();
        }
        self.notify();
        Ok(())
    }

    /// Consumes the store and returns the blob store it wrapped.
    pub fn into_inner(self) -> B {
        self.blobs
    }

    // Reads

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn source(&self) -> StateSource {
        self.source
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn team_members(&self) -> &[TeamMember] {
        &self.state.team_members
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn current_user_id(&self) -> MemberId {
        self.state.current_user_id
    }

    pub fn current_user(&self) -> Option<&TeamMember> {
        self.state.current_user()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.state.task(id)
    }

    /// First project with `id`.
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.state.project(id)
    }

    /// First team member with `id`.
    pub fn team_member(&self, id: MemberId) -> Option<&TeamMember> {
        self.state.team_member(id)
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.state.message(id)
    }

    /// Tasks belonging to `project_id`, in list order.
    pub fn tasks_for_project(&self, project_id: ProjectId) -> Vec<&Task> {
        self.state.tasks_for_project(project_id)
    }

    pub fn unread_message_count(&self) -> usize {
        self.state.unread_message_count()
    }

    // Tasks

    pub fn add_task(&mut self, task: Task) -> StoreResult<()> {
        self.check(|| task.validate())?;
        debug!("event=task_add module=store status=ok");
        self.state.tasks.push(task);
        self.commit()
    }

    /// Replaces the first task whose id matches `task.id`.
    pub fn update_task(&mut self, task: Task) -> StoreResult<()> {
        self.check(|| task.validate())?;
        let Some(slot) = self.state.tasks.iter_mut().find(|t| t.id == task.id) else {
            return self.missing(EntityKind::Task, task.id);
        };
        *slot = task;
        self.commit()
    }

    /// Removes every task with `id`.
    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<()> {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|task| task.id != id);
        let removed = before - self.state.tasks.len();
        self.commit_delete(EntityKind::Task, id, removed)
    }

    // Projects

    pub fn add_project(&mut self, project: Project) -> StoreResult<()> {
        self.check(|| project.validate())?;
        self.state.projects.push(project);
        self.commit()
    }

    pub fn update_project(&mut self, project: Project) -> StoreResult<()> {
        self.check(|| project.validate())?;
        let Some(slot) = self.state.projects.iter_mut().find(|p| p.id == project.id) else {
            return self.missing(EntityKind::Project, project.id);
        };
        *slot = project;
        self.commit()
    }

    /// Removes the project and every task that belongs to it.
    pub fn delete_project(&mut self, id: ProjectId) -> StoreResult<()> {
        let projects_before = self.state.projects.len();
        let tasks_before = self.state.tasks.len();
        self.state.projects.retain(|project| project.id != id);
        self.state.tasks.retain(|task| task.project_id != Some(id));

        let removed = projects_before - self.state.projects.len();
        debug!(
            "event=project_delete module=store removed={} cascaded_tasks={}",
            removed,
            tasks_before - self.state.tasks.len()
        );
        self.commit_delete(EntityKind::Project, id, removed)
    }

    // Team members

    pub fn add_team_member(&mut self, member: TeamMember) -> StoreResult<()> {
        self.check(|| member.validate())?;
        self.state.team_members.push(member);
        self.commit()
    }

    pub fn update_team_member(&mut self, member: TeamMember) -> StoreResult<()> {
        self.check(|| member.validate())?;
        let Some(slot) = self
            .state
            .team_members
            .iter_mut()
            .find(|m| m.id == member.id)
        else {
            return self.missing(EntityKind::TeamMember, member.id);
        };
        *slot = member;
        self.commit()
    }

    /// Removes the member only. Tasks, projects and messages that reference
    /// the member keep the now dangling id.
    pub fn delete_team_member(&mut self, id: MemberId) -> StoreResult<()> {
        let before = self.state.team_members.len();
        self.state.team_members.retain(|member| member.id != id);
        let removed = before - self.state.team_members.len();
        self.commit_delete(EntityKind::TeamMember, id, removed)
    }

    // Messages

    pub fn add_message(&mut self, message: Message) -> StoreResult<()> {
        self.check(|| message.validate())?;
        self.state.messages.push(message);
        self.commit()
    }

    pub fn mark_message_as_read(&mut self, id: MessageId) -> StoreResult<()> {
        let Some(message) = self.state.messages.iter_mut().find(|m| m.id == id) else {
            return self.missing(EntityKind::Message, id);
        };
        message.is_read = true;
        self.commit()
    }

    /// Drops the stored snapshot and starts over from the sample dataset.
    pub fn reset_all_data(&mut self) -> StoreResult<()> {
        let removed = self
            .blobs
            .remove_blob(&self.config.storage_key)
            .map(|_| ())
            .map_err(StoreError::from);
        if let Err(err) = &removed {
            error!("event=store_reset module=store status=error stage=remove error={err}");
        }
        self.settle_write(removed)?;

        self.state = sample_state(Utc::now());
        self.source = StateSource::Seeded;
        info!("event=store_reset module=store status=ok");
        self.commit()
    }

    // Subscriptions

    /// Registers a listener called with the new state after every mutation.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ApplicationState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    // Internals

    fn check(&self, validate: impl FnOnce() -> Result<(), ValidationError>) -> StoreResult<()> {
        if self.config.validate_writes {
            validate()?;
        }
        Ok(())
    }

    fn missing(&self, kind: EntityKind, id: Uuid) -> StoreResult<()> {
        debug!("event=store_missing_id module=store kind={kind:?}");
        match self.config.missing_id {
            MissingIdPolicy::Ignore => Ok(()),
            MissingIdPolicy::Reject => Err(StoreError::NotFound { kind, id }),
        }
    }

    fn commit_delete(&mut self, kind: EntityKind, id: Uuid, removed: usize) -> StoreResult<()> {
        if removed == 0 && self.config.missing_id == MissingIdPolicy::Reject {
            return Err(StoreError::NotFound { kind, id });
        }
        self.commit()
    }

    /// Persists the snapshot, notifies listeners, then applies the write
    /// failure policy.
    fn commit(&mut self) -> StoreResult<()> {
        let written = self.persist();
        self.notify();
        self.settle_write(written)
    }

    fn persist(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        let encodable = match self.state.non_finite_field() {
            Some((kind, id, field)) => Err(StoreError::NonFinite { kind, id, field }),
            None => Ok(()),
        };
        let result = encodable
            .and_then(|()| serde_json::to_vec(&self.state).map_err(StoreError::Encode))
            .and_then(|bytes| {
                self.blobs.write_blob(&self.config.storage_key, &bytes)?;
                Ok(bytes.len())
            });

        match result {
            Ok(bytes) => {
                debug!(
                    "event=store_persist module=store status=ok bytes={} duration_ms={}",
                    bytes,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_persist module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn settle_write(&self, written: StoreResult<()>) -> StoreResult<()> {
        match (written, self.config.write_failure) {
            (Ok(()), _) | (Err(_), WriteFailurePolicy::Swallow) => Ok(()),
            (Err(err), WriteFailurePolicy::Propagate) => Err(err),
        }
    }

    fn notify(&mut self) {
        for listener in self.listeners.values_mut() {
            listener(&self.state);
        }
    }
}

/// Two-branch load: decoded snapshot, or a fresh sample dataset.
fn load_state(blobs: &impl BlobStore, key: &str) -> (ApplicationState, StateSource) {
    let payload = match blobs.read_blob(key) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("event=store_load module=store status=error stage=read error={err}");
            None
        }
    };

    if let Some(bytes) = payload {
        match serde_json::from_slice::<ApplicationState>(&bytes) {
            Ok(state) => return (state, StateSource::Persisted),
            Err(err) => warn!(
                "event=store_decode module=store status=error category={:?} line={} column={} bytes={}",
                err.classify(),
                err.line(),
                err.column(),
                bytes.len()
            ),
        }
    }

    (sample_state(Utc::now()), StateSource::Seeded)
}

fn source_label(source: StateSource) -> &'static str {
    match source {
        StateSource::Persisted => "persisted",
        StateSource::Seeded => "seed",
    }
}
