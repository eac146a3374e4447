//! Team member domain model.

use super::validation::{check_id, ValidationError};
use super::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable team member identifier.
pub type MemberId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Manager,
    Developer,
    Designer,
    Qa,
    Marketing,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    /// Avatar color tag, interpreted by the UI.
    pub avatar_color: String,
    pub joined_at: Timestamp,
    pub is_active: bool,
}

impl TeamMember {
    /// Creates an active member who joined now.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: MemberRole) -> Self {
        Self::with_id(Uuid::new_v4(), name, email, role)
    }

    pub fn with_id(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: MemberRole,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            avatar_color: "blue".to_string(),
            joined_at: Utc::now(),
            is_active: true,
        }
    }

    /// Initials derived from the current name. Not stored.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.id)
    }
}

/// Uppercased first letters of the first two space-separated tokens.
///
/// Tokens are split on single spaces, so leading or repeated spaces yield
/// empty tokens that contribute nothing.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .take(2)
        .filter_map(|token| token.chars().next())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn initials_use_first_two_tokens() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("mary ann lee"), "MA");
        assert_eq!(initials("You"), "Y");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn initials_count_empty_tokens() {
        assert_eq!(initials(" bob smith"), "B");
        assert_eq!(initials("  bob"), "");
    }
}
