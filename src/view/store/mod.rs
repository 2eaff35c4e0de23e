//! Reducer-style view updates + side-effect commands.

mod action;
mod command;
mod reducer;
mod runtime;

pub use action::{AsyncAction, HostAction, NavigationAction, ViewAction};
pub use command::ViewCommand;
pub use reducer::reduce;

use super::controller::{ViewController, ViewHost};

impl<H: ViewHost> ViewController<H> {
    pub fn dispatch(&mut self, action: ViewAction) {
        let commands = reducer::reduce(&mut self.state, action);
        for command in commands {
            runtime::run(self, command);
        }
    }
}
