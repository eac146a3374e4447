//! Message domain model.

use super::validation::{check_id, ValidationError};
use super::{MemberId, ProjectId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable message identifier.
pub type MessageId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: MemberId,
    /// `None` for broadcast messages.
    pub recipient_id: Option<MemberId>,
    pub project_id: Option<ProjectId>,
    pub content: String,
    pub sent_at: Timestamp,
    pub is_read: bool,
}

impl Message {
    /// Creates an unread message sent now.
    pub fn new(sender_id: MemberId, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), sender_id, content)
    }

    pub fn with_id(id: MessageId, sender_id: MemberId, content: impl Into<String>) -> Self {
        Self {
            id,
            sender_id,
            recipient_id: None,
            project_id: None,
            content: content.into(),
            sent_at: Utc::now(),
            is_read: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.id)
    }
}
