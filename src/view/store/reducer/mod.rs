pub mod async_handler;
pub mod host;
pub mod iframe;
pub mod navigation;

use crate::view::state::ViewState;

use super::action::ViewAction;
use super::command::ViewCommand;

pub fn reduce(state: &mut ViewState, action: ViewAction) -> Vec<ViewCommand> {
    match action {
        ViewAction::Host(action) => host::reduce(state, action),
        ViewAction::Navigation(action) => navigation::reduce(state, action),
        ViewAction::Iframe(message) => iframe::reduce(state, message),
        ViewAction::Async(action) => async_handler::reduce(state, action),
    }
}
