use crate::view::state::{ViewInputs, ViewState};

use super::super::action::HostAction;
use super::super::command::ViewCommand;
use super::navigation;

pub fn reduce(state: &mut ViewState, action: HostAction) -> Vec<ViewCommand> {
    match action {
        HostAction::InputsChanged(inputs) => inputs_changed(state, inputs),
        HostAction::UrlChanged(path) => {
            let had_identity = state.session_identity().is_some();
            state.path = path;
            state.last_navigation = None;
            if state.is_explicit_code_or_data() {
                state.pending_navigation = None;
            }
            if !had_identity && state.session_identity().is_some() {
                return navigation::resume_after_identity(state).into_iter().collect();
            }
            Vec::new()
        }
        HostAction::ViewportResized { width } => {
            state.viewport_width = Some(width);
            Vec::new()
        }
    }
}

/// Edge-triggered rules, evaluated against the previous observation.
fn inputs_changed(state: &mut ViewState, inputs: ViewInputs) -> Vec<ViewCommand> {
    let had_identity = state.session_identity().is_some();
    let previous = std::mem::replace(&mut state.inputs, inputs);
    let identity_arrived = !had_identity && state.session_identity().is_some();
    let stream_started = !previous.is_streaming && state.inputs.is_streaming;
    let stream_ended = previous.is_streaming && !state.inputs.is_streaming;
    let preview_became_ready = !previous.preview_ready && state.inputs.preview_ready;

    let mut commands = Vec::new();

    if stream_started {
        state.user_clicked_back = false;
        state.pending_navigation = None;
        if previous.code_length == 0 {
            // First generation: stay on the chat path and show the code being written.
            state.initial_navigation_done = true;
            log::debug!("Streaming started without code, showing code view");
        }
    }

    if preview_became_ready {
        if state.inputs.is_streaming {
            log::debug!("Preview ready while streaming, waiting for the stream to end");
        } else {
            commands.extend(navigation::auto_navigate_to_preview(state));
        }
    }

    if stream_ended && state.inputs.preview_ready {
        commands.extend(navigation::auto_navigate_to_preview(state));
    }

    if identity_arrived {
        commands.extend(navigation::resume_after_identity(state));
    }

    commands
}
