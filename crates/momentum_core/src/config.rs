//! Store configuration and failure policies.
//!
//! Defaults reproduce the lenient behaviour of the mobile app: unknown ids
//! are ignored and failed writes are logged but never surfaced.

/// Storage key under which the snapshot blob is written.
pub const DEFAULT_STORAGE_KEY: &str = "MomentumDrivesSuccess_AppData";

/// What `update*`, `delete*` and `mark_message_as_read` do when the id is
/// not present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingIdPolicy {
    /// Return `Ok` and leave the lists unchanged.
    #[default]
    Ignore,
    /// Return `StoreError::NotFound`.
    Reject,
}

/// What a mutation does when the snapshot cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteFailurePolicy {
    /// Log at error level and keep going on the in-memory state.
    #[default]
    Swallow,
    /// Return the failure to the caller. The in-memory change is kept.
    Propagate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub missing_id: MissingIdPolicy,
    pub write_failure: WriteFailurePolicy,
    /// Run entity `validate()` on every add/update.
    pub validate_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            missing_id: MissingIdPolicy::default(),
            write_failure: WriteFailurePolicy::default(),
            validate_writes: false,
        }
    }
}

impl StoreConfig {
    /// Strict variant: rejects unknown ids, surfaces write failures and
    /// validates input.
    pub fn strict() -> Self {
        Self {
            missing_id: MissingIdPolicy::Reject,
            write_failure: WriteFailurePolicy::Propagate,
            validate_writes: true,
            ..Self::default()
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
