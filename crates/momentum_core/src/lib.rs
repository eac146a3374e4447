//! Core data layer for the Momentum productivity app.
//! Owns the task/project/team/message graph and its local persistence; the
//! UI calls into [`ApplicationStore`] and renders what it returns.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::{MissingIdPolicy, StoreConfig, WriteFailurePolicy, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    initials, ApplicationState, DanglingReference, EntityKind, MemberId, MemberRole, Message,
    MessageId, Project, ProjectId, ProjectStatus, Task, TaskId, TaskPriority, TaskStatus,
    TeamMember, Timestamp, ValidationError,
};
pub use repo::blob_repo::{BlobStore, RepoError, RepoResult, SqliteBlobStore};
pub use service::app_store::{
    ApplicationStore, StateSource, StoreError, StoreResult, SubscriptionId,
};
pub use service::insights::{MemberPerformance, TaskFilter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
