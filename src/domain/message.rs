use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment::{ParseResult, Segment};
use crate::parser::parse_content;

/// A chat message as stored by the document database.
///
/// Only the raw text and timestamp of an AI message are persisted; segments are rebuilt from the
/// text whenever a message is constructed, updated or loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatMessage {
    User(UserMessage),
    Ai(AiMessage),
}

impl ChatMessage {
    pub fn text(&self) -> &str {
        match self {
            ChatMessage::User(message) => &message.text,
            ChatMessage::Ai(message) => &message.text,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ChatMessage::User(message) => message.timestamp,
            ChatMessage::Ai(message) => message.timestamp,
        }
    }

    pub fn as_ai(&self) -> Option<&AiMessage> {
        match self {
            ChatMessage::Ai(message) => Some(message),
            ChatMessage::User(_) => None,
        }
    }

    pub fn as_ai_mut(&mut self) -> Option<&mut AiMessage> {
        match self {
            ChatMessage::Ai(message) => Some(message),
            ChatMessage::User(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl UserMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// An AI response. `text` is the single source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredAiMessage", into = "StoredAiMessage")]
pub struct AiMessage {
    text: String,
    parsed: ParseResult,
    pub is_streaming: bool,
    pub timestamp: DateTime<Utc>,
}

/// Persisted shape of an AI message.
#[derive(Serialize, Deserialize)]
struct StoredAiMessage {
    text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl From<StoredAiMessage> for AiMessage {
    fn from(stored: StoredAiMessage) -> Self {
        Self::with_timestamp(stored.text, stored.timestamp)
    }
}

impl From<AiMessage> for StoredAiMessage {
    fn from(message: AiMessage) -> Self {
        Self {
            text: message.text,
            timestamp: message.timestamp,
        }
    }
}

impl AiMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_timestamp(text, Utc::now())
    }

    pub fn with_timestamp(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let text = text.into();
        let parsed = parse_content(&text);
        Self {
            text,
            parsed,
            is_streaming: false,
            timestamp,
        }
    }

    /// An empty response that is about to receive streamed chunks.
    pub fn streaming() -> Self {
        let mut message = Self::new(String::new());
        message.is_streaming = true;
        message
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the raw text and recompute the derived fields.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.parsed = parse_content(&self.text);
    }

    /// Adopt a parse computed elsewhere for exactly this text.
    pub(crate) fn set_parsed(&mut self, text: String, parsed: ParseResult) {
        self.text = text;
        self.parsed = parsed;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.parsed.segments
    }

    pub fn dependencies_string(&self) -> Option<&str> {
        self.parsed.dependencies_string.as_deref()
    }

    pub fn parsed(&self) -> &ParseResult {
        &self.parsed
    }
}
