use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{AiMessage, ChatMessage, ParseResult, SessionError, TitleSource, UserMessage};
use crate::parser::StreamingBuffer;
use crate::view::route::encode_title;
use crate::view::state::ViewInputs;

/// One chat transcript and the response currently streaming into it, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Option<String>,
    /// URL slug of the session title.
    pub title: Option<String>,
    pub messages: Vec<ChatMessage>,
    #[serde(skip)]
    stream: Option<StreamingBuffer>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::User(UserMessage::new(text)));
    }

    /// Start a new AI response. An unfinished previous response is closed first.
    pub fn begin_response(&mut self) {
        if self.stream.is_some() {
            log::warn!("Starting a response while another is still streaming");
            let _ = self.finish_response();
        }
        self.messages.push(ChatMessage::Ai(AiMessage::streaming()));
        self.stream = Some(StreamingBuffer::new());
    }

    /// Append a streamed chunk and re-derive the segments of the response.
    pub fn push_chunk(&mut self, chunk: &str) -> Result<&ParseResult, SessionError> {
        let stream = self.stream.as_mut().ok_or(SessionError::NotStreaming)?;
        let parsed = stream.push_chunk(chunk).clone();
        let text = stream.text().to_string();

        let message = self.latest_ai_mut().ok_or(SessionError::NotStreaming)?;
        message.set_parsed(text, parsed);
        Ok(message.parsed())
    }

    pub fn finish_response(&mut self) -> Result<&AiMessage, SessionError> {
        if self.stream.take().is_none() {
            return Err(SessionError::NotStreaming);
        }
        let message = self.latest_ai_mut().ok_or(SessionError::NotStreaming)?;
        message.is_streaming = false;
        Ok(message)
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    pub fn latest_ai(&self) -> Option<&AiMessage> {
        self.messages.iter().rev().find_map(ChatMessage::as_ai)
    }

    fn latest_ai_mut(&mut self) -> Option<&mut AiMessage> {
        self.messages.iter_mut().rev().find_map(ChatMessage::as_ai_mut)
    }

    /// Fill in a missing id and title slug, returning both.
    ///
    /// The title comes from the first user message; `fallback_title` is used when there is none.
    pub fn assign_identity(&mut self, fallback_title: Option<&str>) -> (String, String) {
        let id = self
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();

        if self.title.is_none() {
            let source = self
                .messages
                .iter()
                .find_map(|message| match message {
                    ChatMessage::User(user) => Some(user.text.as_str()),
                    ChatMessage::Ai(_) => None,
                })
                .or(fallback_title)
                .unwrap_or_default();
            self.title = Some(encode_title(source));
        }

        (id, self.title.clone().unwrap_or_default())
    }

    /// The app code of the latest response: its first code segment.
    pub fn current_code(&self) -> Option<&str> {
        self.latest_ai()
            .and_then(|message| message.parsed().first_code())
    }

    pub fn title_source(&self) -> Option<TitleSource<'_>> {
        self.latest_ai()
            .map(|message| message.parsed().title_source())
            .filter(|source| !source.is_empty())
    }

    /// Observation handed to the view controller on each render.
    pub fn view_inputs(&self, preview_ready: bool) -> ViewInputs {
        ViewInputs {
            session_id: self.id.clone(),
            title: self.title.clone(),
            code_length: self.current_code().map(str::len).unwrap_or(0),
            is_streaming: self.is_streaming(),
            preview_ready,
        }
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SessionError> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("write session to {}", path.display()))?;
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read session from {}", path.display()))?;
        Self::from_json(&json)
    }
}
