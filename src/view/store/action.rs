use crate::view::iframe::IframeMessage;
use crate::view::state::{ViewInputs, ViewType};

#[derive(Debug, Clone)]
pub enum ViewAction {
    Host(HostAction),
    Navigation(NavigationAction),
    Iframe(IframeMessage),
    Async(AsyncAction),
}

/// Observations pushed by the host on every render.
#[derive(Debug, Clone)]
pub enum HostAction {
    InputsChanged(ViewInputs),
    UrlChanged(String),
    ViewportResized { width: u32 },
}

/// Explicit user intent.
#[derive(Debug, Clone)]
pub enum NavigationAction {
    SelectView(ViewType),
    Back,
}

#[derive(Debug, Clone)]
pub enum AsyncAction {
    ScheduledNavigationDue { token: u64 },
}
