//! URL conventions for chat sessions: `{prefix}/{session_id}/{title}[/app|/code|/data]`.

use lazy_static::lazy_static;
use regex::Regex;

use super::state::ViewType;

pub const DEFAULT_ROUTE_PREFIX: &str = "/chat";

lazy_static! {
    static ref TITLE_SEPARATOR_RE: Regex =
        Regex::new(r"[^\p{L}\p{N}]+").expect("title separator regex");
}

/// The view pinned by the URL, if any.
///
/// Chat routes are read segment by segment, so a session whose title slug is `app`, `code` or
/// `data` still has a bare base path. Only paths outside `prefix` fall back to suffix matching.
pub fn explicit_view(prefix: &str, path: &str) -> Option<ViewType> {
    if let Some(route) = ChatRoute::parse(prefix, path) {
        return route.view;
    }
    let path = path.trim_end_matches('/');
    ViewType::ALL
        .into_iter()
        .find(|view| path.ends_with(&format!("/{}", view.suffix())))
}

/// View named by the URL. Anything without a recognized suffix means preview.
pub fn view_from_path(prefix: &str, path: &str) -> ViewType {
    explicit_view(prefix, path).unwrap_or(ViewType::Preview)
}

/// Build the path of `view` for a session.
pub fn view_path(prefix: &str, session_id: &str, title: &str, view: ViewType) -> String {
    format!(
        "{}/{}/{}/{}",
        prefix.trim_end_matches('/'),
        session_id,
        title,
        view.suffix()
    )
}

/// Session identity carried by a chat URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoute {
    pub session_id: String,
    pub title: String,
    pub view: Option<ViewType>,
}

impl ChatRoute {
    /// Parse `{prefix}/{session_id}/{title}[/{suffix}]`. Returns `None` for any other shape.
    pub fn parse(prefix: &str, path: &str) -> Option<Self> {
        let rest = path
            .trim_end_matches('/')
            .strip_prefix(prefix.trim_end_matches('/'))?
            .strip_prefix('/')?;

        let mut parts = rest.split('/');
        let session_id = parts.next().filter(|part| !part.is_empty())?;
        let title = parts.next().filter(|part| !part.is_empty())?;
        let view = match parts.next() {
            None => None,
            Some(suffix) => Some(ViewType::from_suffix(suffix)?),
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            session_id: session_id.to_string(),
            title: title.to_string(),
            view,
        })
    }
}

/// Slug used as the title segment of a session URL.
pub fn encode_title(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let slug = TITLE_SEPARATOR_RE.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "untitled-chat".to_string()
    } else {
        slug.to_string()
    }
}
