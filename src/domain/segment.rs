use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a parsed response segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Markdown,
    Code,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Markdown => write!(f, "markdown"),
            SegmentKind::Code => write!(f, "code"),
        }
    }
}

impl FromStr for SegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" => Ok(SegmentKind::Markdown),
            "code" => Ok(SegmentKind::Code),
            _ => Err(format!("Invalid segment kind: {s}")),
        }
    }
}

/// One ordered piece of an AI response, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Markdown,
            content: content.into(),
        }
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Code,
            content: content.into(),
        }
    }

    pub fn is_code(&self) -> bool {
        self.kind == SegmentKind::Code
    }

    pub fn is_markdown(&self) -> bool {
        self.kind == SegmentKind::Markdown
    }
}

/// Output of a full parse of the accumulated response text.
///
/// Always derived from the raw text, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub segments: Vec<Segment>,
    /// Raw manifest prefix including its trailing `}}`, if the text started with one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies_string: Option<String>,
}

impl ParseResult {
    /// The canonical app code: the first code segment.
    pub fn first_code(&self) -> Option<&str> {
        self.segments
            .iter()
            .find(|segment| segment.is_code())
            .map(|segment| segment.content.as_str())
    }

    pub fn last_code(&self) -> Option<&str> {
        self.segments
            .iter()
            .rev()
            .find(|segment| segment.is_code())
            .map(|segment| segment.content.as_str())
    }

    pub fn first_markdown(&self) -> Option<&str> {
        self.segments
            .iter()
            .find(|segment| segment.is_markdown())
            .map(|segment| segment.content.as_str())
    }

    /// Length of the canonical app code, `0` when no code segment exists yet.
    pub fn code_length(&self) -> usize {
        self.first_code().map(str::len).unwrap_or(0)
    }

    pub fn has_code(&self) -> bool {
        self.segments.iter().any(Segment::is_code)
    }

    /// Input handed to the external title generator: first markdown and first code segment.
    pub fn title_source(&self) -> TitleSource<'_> {
        TitleSource {
            markdown: self.first_markdown(),
            code: self.first_code(),
        }
    }

    /// Lenient key/value view of the dependency manifest.
    pub fn dependencies(&self) -> std::collections::BTreeMap<String, String> {
        crate::parser::parse_dependencies(self.dependencies_string.as_deref())
    }
}

/// Borrowed excerpt of a response used to ask for a session title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleSource<'a> {
    pub markdown: Option<&'a str>,
    pub code: Option<&'a str>,
}

impl TitleSource<'_> {
    pub fn is_empty(&self) -> bool {
        self.markdown.is_none_or(|text| text.trim().is_empty())
            && self.code.is_none_or(|code| code.trim().is_empty())
    }
}
