use crate::view::state::{ViewState, ViewType};

use super::super::action::AsyncAction;
use super::super::command::ViewCommand;
use super::navigation;

pub fn reduce(state: &mut ViewState, action: AsyncAction) -> Vec<ViewCommand> {
    match action {
        AsyncAction::ScheduledNavigationDue { token } => {
            let Some(pending) = state
                .pending_navigation
                .take_if(|pending| pending.token == token)
            else {
                log::debug!("Dropping stale scheduled navigation {token}");
                return Vec::new();
            };

            // Re-check against the latest observation; it may have changed since scheduling.
            if !navigation::preview_auto_navigation_allowed(state) {
                log::debug!("Scheduled navigation to {} superseded", pending.target);
                return Vec::new();
            }

            let target = state
                .target_path(ViewType::Preview)
                .unwrap_or(pending.target);
            navigation::navigate_to(state, target).into_iter().collect()
        }
    }
}
