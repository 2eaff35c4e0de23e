use crate::view::state::{PendingNavigation, ViewState, ViewType};

use super::super::action::NavigationAction;
use super::super::command::ViewCommand;

pub fn reduce(state: &mut ViewState, action: NavigationAction) -> Vec<ViewCommand> {
    match action {
        NavigationAction::SelectView(view) => select_view(state, view),
        NavigationAction::Back => {
            if state.inputs.is_streaming {
                state.user_clicked_back = true;
            }
            state.mobile_preview_shown = false;
            state.pending_navigation = None;
            vec![ViewCommand::GoBack]
        }
    }
}

fn select_view(state: &mut ViewState, view: ViewType) -> Vec<ViewCommand> {
    if !state.view_controls().get(view).enabled {
        log::debug!("Ignoring selection of disabled view {view}");
        return Vec::new();
    }

    state.user_clicked_back = false;
    state.mobile_preview_shown = true;
    state.pending_navigation = None;

    match state.target_path(view) {
        Some(target) => navigate_to(state, target).into_iter().collect(),
        None => {
            state.local_view = Some(view);
            Vec::new()
        }
    }
}

/// Issue a navigation unless the router is already there or was just sent there.
pub(super) fn navigate_to(state: &mut ViewState, target: String) -> Option<ViewCommand> {
    if state.path == target || state.last_navigation.as_deref() == Some(target.as_str()) {
        return None;
    }
    log::debug!("Navigating from {} to {}", state.path, target);
    state.last_navigation = Some(target.clone());
    Some(ViewCommand::Navigate { path: target })
}

/// Move a session sitting on its bare base path to the preview route.
pub(super) fn auto_navigate_to_preview(state: &mut ViewState) -> Option<ViewCommand> {
    if state.user_clicked_back {
        log::debug!("Auto-navigation suppressed: user went back during streaming");
        return None;
    }
    if !state.is_base_path() {
        return None;
    }
    let target = state.target_path(ViewType::Preview)?;
    navigate_to(state, target)
}

/// Re-run the stream-end rule once a session that finished anonymously gets its identity.
pub(super) fn resume_after_identity(state: &mut ViewState) -> Option<ViewCommand> {
    if state.inputs.is_streaming || !state.inputs.preview_ready || !state.initial_navigation_done
    {
        return None;
    }
    log::debug!("Session identity arrived, resuming auto-navigation");
    auto_navigate_to_preview(state)
}

/// Debounced variant used for iframe readiness; a later schedule replaces this one.
pub(super) fn schedule_preview_navigation(state: &mut ViewState) -> Option<ViewCommand> {
    if state.user_clicked_back {
        return None;
    }
    let target = state.target_path(ViewType::Preview)?;
    if state.path == target {
        return None;
    }

    state.next_navigation_token = state.next_navigation_token.wrapping_add(1);
    let token = state.next_navigation_token;
    state.pending_navigation = Some(PendingNavigation { token, target });
    Some(ViewCommand::ScheduleNavigation {
        token,
        delay: state.config.auto_navigate_delay(),
    })
}

/// Conditions under which a pending auto-navigation to preview may still fire.
pub(super) fn preview_auto_navigation_allowed(state: &ViewState) -> bool {
    !state.is_explicit_code_or_data()
        && !state.is_mobile()
        && !state.inputs.is_streaming
        && !state.user_clicked_back
}
