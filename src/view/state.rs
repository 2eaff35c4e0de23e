use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::infra::app_config::ViewConfig;

use super::route::{self, ChatRoute};

/// Which result panel is shown next to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Preview,
    Code,
    Data,
}

impl ViewType {
    pub const ALL: [ViewType; 3] = [ViewType::Preview, ViewType::Code, ViewType::Data];

    /// URL suffix that pins this view.
    pub fn suffix(&self) -> &'static str {
        match self {
            ViewType::Preview => "app",
            ViewType::Code => "code",
            ViewType::Data => "data",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.suffix() == suffix)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Preview => "App",
            ViewType::Code => "Code",
            ViewType::Data => "Data",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewType::Preview => write!(f, "preview"),
            ViewType::Code => write!(f, "code"),
            ViewType::Data => write!(f, "data"),
        }
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preview" | "app" => Ok(ViewType::Preview),
            "code" => Ok(ViewType::Code),
            "data" => Ok(ViewType::Data),
            _ => Err(format!("Invalid view: {s}")),
        }
    }
}

/// Latest values observed from the chat host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewInputs {
    pub session_id: Option<String>,
    /// URL title segment of the session.
    pub title: Option<String>,
    pub code_length: usize,
    pub is_streaming: bool,
    pub preview_ready: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewControl {
    pub enabled: bool,
    pub label: &'static str,
    pub loading: bool,
}

/// Tab state for the view switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewControls {
    pub preview: ViewControl,
    pub code: ViewControl,
    pub data: ViewControl,
}

impl ViewControls {
    pub fn get(&self, view: ViewType) -> &ViewControl {
        match view {
            ViewType::Preview => &self.preview,
            ViewType::Code => &self.code,
            ViewType::Data => &self.data,
        }
    }
}

/// A debounced auto-navigation waiting for its timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub token: u64,
    pub target: String,
}

/// View state for one mounted session view.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub config: ViewConfig,
    pub inputs: ViewInputs,
    /// Current URL path as reported by the router.
    pub path: String,
    /// `None` until the host reports a viewport; treated as desktop.
    pub viewport_width: Option<u32>,
    pub mobile_preview_shown: bool,
    pub user_clicked_back: bool,
    /// In-app data fetching inside the generated app, not LLM streaming.
    pub is_iframe_fetching: bool,
    pub initial_navigation_done: bool,
    /// View picked before the session had an identity to put in the URL.
    pub local_view: Option<ViewType>,
    pub pending_navigation: Option<PendingNavigation>,
    pub next_navigation_token: u64,
    /// Last path handed to the router, cleared whenever the router reports a new path.
    pub last_navigation: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ViewConfig::default(), "/")
    }
}

impl ViewState {
    pub fn new(config: ViewConfig, path: impl Into<String>) -> Self {
        Self {
            config,
            inputs: ViewInputs::default(),
            path: path.into(),
            viewport_width: None,
            mobile_preview_shown: false,
            user_clicked_back: false,
            is_iframe_fetching: false,
            initial_navigation_done: false,
            local_view: None,
            pending_navigation: None,
            next_navigation_token: 0,
            last_navigation: None,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport_width
            .is_some_and(|width| width < self.config.mobile_breakpoint_px)
    }

    /// Session id and title, from the inputs first and the URL second.
    pub fn session_identity(&self) -> Option<(String, String)> {
        let route = ChatRoute::parse(&self.config.route_prefix, &self.path);
        let session_id = self
            .inputs
            .session_id
            .clone()
            .or_else(|| route.as_ref().map(|route| route.session_id.clone()))?;
        let title = self
            .inputs
            .title
            .clone()
            .or_else(|| route.map(|route| route.title))?;
        if session_id.is_empty() || title.is_empty() {
            return None;
        }
        Some((session_id, title))
    }

    /// Path for `view`, or `None` while the session has no identity.
    pub fn target_path(&self, view: ViewType) -> Option<String> {
        let (session_id, title) = self.session_identity()?;
        Some(route::view_path(
            &self.config.route_prefix,
            &session_id,
            &title,
            view,
        ))
    }

    pub fn current_view(&self) -> ViewType {
        route::view_from_path(&self.config.route_prefix, &self.path)
    }

    /// View pinned by the current URL, if any.
    pub fn explicit_view(&self) -> Option<ViewType> {
        route::explicit_view(&self.config.route_prefix, &self.path)
    }

    pub fn is_base_path(&self) -> bool {
        self.explicit_view().is_none()
    }

    pub fn is_explicit_code_or_data(&self) -> bool {
        matches!(self.explicit_view(), Some(ViewType::Code | ViewType::Data))
    }

    pub fn view_controls(&self) -> ViewControls {
        ViewControls {
            preview: ViewControl {
                enabled: self.inputs.preview_ready,
                label: ViewType::Preview.label(),
                loading: self.is_iframe_fetching,
            },
            code: ViewControl {
                enabled: true,
                label: ViewType::Code.label(),
                loading: self.inputs.is_streaming,
            },
            data: ViewControl {
                enabled: !self.inputs.is_streaming,
                label: ViewType::Data.label(),
                loading: false,
            },
        }
    }

    pub fn show_view_controls(&self) -> bool {
        self.inputs.code_length > 0 || self.inputs.is_streaming
    }

    pub fn display_view(&self) -> ViewType {
        if self.is_mobile() {
            return if self.mobile_preview_shown {
                self.current_view()
            } else {
                ViewType::Code
            };
        }

        if self.session_identity().is_none()
            && let Some(view) = self.local_view
        {
            return view;
        }

        if let Some(view) = self.explicit_view() {
            return view;
        }

        // Base path: watch the code being written until there is something to preview.
        if self.inputs.is_streaming || (self.initial_navigation_done && !self.inputs.preview_ready)
        {
            return ViewType::Code;
        }

        ViewType::Preview
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            current_view: self.current_view(),
            display_view: self.display_view(),
            view_controls: self.view_controls(),
            show_view_controls: self.show_view_controls(),
            mobile_preview_shown: self.mobile_preview_shown,
            user_clicked_back: self.user_clicked_back,
            is_iframe_fetching: self.is_iframe_fetching,
        }
    }
}

/// What the rendering layer reads after each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub current_view: ViewType,
    pub display_view: ViewType,
    pub view_controls: ViewControls,
    pub show_view_controls: bool,
    pub mobile_preview_shown: bool,
    pub user_clicked_back: bool,
    pub is_iframe_fetching: bool,
}
