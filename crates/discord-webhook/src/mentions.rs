//! Mention filtering policy for outgoing messages.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::Snowflake;

/// Controls which mentions in the message content actually notify.
///
/// The platform still validates against the content: to ping everyone the
/// content must contain `@everyone` and [`MentionType::Everyone`] must be
/// allowed. `roles` and `users` are capped at 100 entries by the platform.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedMentions {
    /// Mention types parsed from the content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parse: Vec<MentionType>,
    /// Role IDs allowed to be mentioned.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Snowflake>,
    /// User IDs allowed to be mentioned.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<Snowflake>,
}

impl AllowedMentions {
    /// A policy that suppresses every mention.
    ///
    /// Serializes to `{}`, which the platform reads as "parse nothing".
    pub fn none() -> Self {
        Self::default()
    }

    /// A policy that allows every mention type found in the content.
    pub fn all() -> Self {
        Self {
            parse: vec![MentionType::Roles, MentionType::Users, MentionType::Everyone],
            ..Self::default()
        }
    }

    /// Allows a mention type, ignoring duplicates.
    #[must_use]
    pub fn with_parse(mut self, kind: MentionType) -> Self {
        if !self.parse.contains(&kind) {
            self.parse.push(kind);
        }
        self
    }

    /// Allows a specific role to be mentioned.
    #[must_use]
    pub fn with_role(mut self, role_id: impl Into<Snowflake>) -> Self {
        self.roles.push(role_id.into());
        self
    }

    /// Allows a specific user to be mentioned.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<Snowflake>) -> Self {
        self.users.push(user_id.into());
        self
    }
}

/// Mention categories that may be parsed from message content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MentionType {
    /// Role mentions.
    Roles,
    /// User mentions.
    Users,
    /// `@everyone` and `@here`.
    Everyone,
}
