//! Messages posted by the sandboxed preview iframe.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::IframeMessageError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum IframeMessage {
    PreviewReady,
    PreviewLoaded,
    /// Data fetching inside the generated app started or stopped.
    Streaming {
        #[serde(default)]
        state: bool,
    },
    Screenshot {
        #[serde(default)]
        data: Option<String>,
    },
    ScreenshotError {
        #[serde(default)]
        error: Option<Value>,
    },
    IframeError {
        #[serde(default)]
        error: Option<Value>,
    },
}

impl IframeMessage {
    pub const KNOWN_TYPES: [&'static str; 6] = [
        "preview-ready",
        "preview-loaded",
        "streaming",
        "screenshot",
        "screenshot-error",
        "iframe-error",
    ];

    pub fn from_json(json: &str) -> Result<Self, IframeMessageError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, IframeMessageError> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !Self::KNOWN_TYPES.contains(&kind) {
            return Err(IframeMessageError::UnsupportedType(kind.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Human-readable text for an error payload, which may be a string or an `{ message }` object.
pub fn error_text(error: Option<&Value>) -> String {
    match error {
        None | Some(Value::Null) => "Unknown error".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(value) => value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
    }
}
