//! Chat messages and the conversations they belong to

use crate::date::flexible_timestamp;
use crate::error::{ModelError, ModelResult};
use crate::ids::{ConversationId, MessageId, StaffId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Message author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: StaffId,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Sender {
    /// Create sender without avatar
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<StaffId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }

    /// The synthetic author of join/leave notices
    #[must_use]
    pub fn system() -> Self {
        Self::new("system", "System")
    }
}

/// What a message carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain text
    Text,
    /// File share; see [`Message::file_name`]
    File,
    /// System notice (joins, renames)
    System,
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Text
    }
}

impl FromStr for MessageType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageType::Text),
            "file" => Ok(MessageType::File),
            "system" => Ok(MessageType::System),
            other => Err(ModelError::unknown_value("message type", other)),
        }
    }
}

/// Emoji reaction tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    pub count: u32,
}

/// Chat message view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    #[serde(with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub kind: MessageType,
    /// Shared file name for [`MessageType::File`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    /// Read receipt; `None` when the sender does not track it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
}

impl Message {
    /// Create a text message
    #[must_use]
    pub fn text(
        id: impl Into<MessageId>,
        sender: Sender,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            sender,
            content: content.into(),
            timestamp,
            kind: MessageType::Text,
            file_name: None,
            reactions: Vec::new(),
            read: None,
        }
    }

    /// Create a system notice
    #[must_use]
    pub fn system(id: impl Into<MessageId>, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: MessageType::System,
            ..Self::text(id, Sender::system(), content, timestamp)
        }
    }

    /// Attach a shared file
    #[inline]
    #[must_use]
    pub fn with_file(mut self, file_name: impl Into<String>) -> Self {
        self.kind = MessageType::File;
        self.file_name = Some(file_name.into());
        self
    }

    /// Whether `staff` wrote this message
    #[inline]
    #[must_use]
    pub fn is_from(&self, staff: &StaffId) -> bool {
        &self.sender.id == staff
    }

    /// Check ingestion invariants
    ///
    /// # Errors
    /// Empty content, or a file message without a file name.
    pub fn validate(&self) -> ModelResult<()> {
        if self.content.trim().is_empty() {
            return Err(ModelError::MissingField("message.content"));
        }
        if self.kind == MessageType::File && self.file_name.is_none() {
            return Err(ModelError::MissingField("message.fileName"));
        }
        Ok(())
    }
}

/// Channel vs direct thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    Channel,
    Direct,
}

/// A channel or direct-message thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(alias = "title")]
    pub name: String,
    pub kind: ConversationKind,
    #[serde(default, alias = "unreadCount")]
    pub unread: u32,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub participants: Vec<Sender>,
    /// Presence of the other participant in a direct thread
    #[serde(default)]
    pub online: Option<bool>,
}

impl Conversation {
    /// Create a channel
    #[must_use]
    pub fn channel(id: impl Into<ConversationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ConversationKind::Channel,
            unread: 0,
            project: None,
            participants: Vec::new(),
            online: None,
        }
    }

    /// Create a direct thread
    #[must_use]
    pub fn direct(id: impl Into<ConversationId>, name: impl Into<String>) -> Self {
        Self {
            kind: ConversationKind::Direct,
            ..Self::channel(id, name)
        }
    }
}
