use chrono::{ DateTime, Utc };
use serde::{ Serialize, Deserialize };
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Builds a message that has not been stored yet. `temp_id` must be negative
    /// so it can never shadow an id handed out by the server.
    pub fn local(temp_id: i64, conversation_id: i64, role: Role, content: &str) -> Self {
        debug_assert!(temp_id < 0);
        Self {
            id: temp_id,
            conversation_id,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Confirmed,
    Failed,
}

/// A message as held by the session, together with whether the backend has it.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalMessage {
    pub message: Message,
    pub status: DeliveryStatus,
}

impl LocalMessage {
    pub fn pending(message: Message) -> Self {
        Self { message, status: DeliveryStatus::Pending }
    }

    pub fn confirmed(message: Message) -> Self {
        Self { message, status: DeliveryStatus::Confirmed }
    }

    pub fn role(&self) -> Role {
        self.message.role
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}

pub fn format_transcript(messages: &[LocalMessage]) -> String {
    let mut result = String::new();
    for entry in messages {
        let marker = match entry.status {
            DeliveryStatus::Pending => " (sending)",
            DeliveryStatus::Failed => " (not saved)",
            DeliveryStatus::Confirmed => "",
        };
        result.push_str(&format!("{}{}: {}\n", entry.role(), marker, entry.content()));
    }
    result
}
