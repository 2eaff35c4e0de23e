use crate::view::iframe::{IframeMessage, error_text};
use crate::view::state::ViewState;

use super::super::command::ViewCommand;
use super::navigation;

pub fn reduce(state: &mut ViewState, message: IframeMessage) -> Vec<ViewCommand> {
    match message {
        IframeMessage::PreviewReady | IframeMessage::PreviewLoaded => {
            state.mobile_preview_shown = true;
            let mut commands = vec![ViewCommand::PreviewLoaded];
            if navigation::preview_auto_navigation_allowed(state) {
                commands.extend(navigation::schedule_preview_navigation(state));
            }
            commands
        }
        IframeMessage::Streaming { state: fetching } => {
            state.is_iframe_fetching = fetching;
            Vec::new()
        }
        IframeMessage::Screenshot { data: Some(data) } => {
            vec![ViewCommand::ScreenshotCaptured { data }]
        }
        IframeMessage::Screenshot { data: None } => {
            log::warn!("Screenshot message without image data");
            Vec::new()
        }
        IframeMessage::ScreenshotError { error } => {
            let error = error_text(error.as_ref());
            log::warn!("Preview screenshot failed: {error}");
            vec![ViewCommand::ScreenshotFailed { error }]
        }
        IframeMessage::IframeError { error } => {
            let error = error_text(error.as_ref());
            log::error!("Preview iframe reported an error: {error}");
            vec![ViewCommand::IframeFailed { error }]
        }
    }
}
