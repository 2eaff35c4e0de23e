use std::time::Duration;

use super::action::{AsyncAction, ViewAction};
use super::command::ViewCommand;
use crate::view::controller::{ViewController, ViewHost};

pub fn run<H: ViewHost>(controller: &mut ViewController<H>, command: ViewCommand) {
    match command {
        ViewCommand::Navigate { path } => controller.host.navigate(&path),
        ViewCommand::GoBack => controller.host.go_back(),
        ViewCommand::ScheduleNavigation { token, delay } => {
            schedule_navigation(controller, token, delay)
        }
        ViewCommand::PreviewLoaded => controller.host.preview_loaded(),
        ViewCommand::ScreenshotCaptured { data } => controller.host.screenshot_captured(&data),
        ViewCommand::ScreenshotFailed { error } => controller.host.screenshot_failed(&error),
        ViewCommand::IframeFailed { error } => controller.host.iframe_failed(&error),
    }
}

fn schedule_navigation<H: ViewHost>(controller: &ViewController<H>, token: u64, delay: Duration) {
    let action_tx = controller.action_tx.clone();
    let due = ViewAction::Async(AsyncAction::ScheduledNavigationDue { token });

    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        log::warn!("No async runtime for navigation timer, firing immediately");
        let _ = action_tx.send(due);
        return;
    };

    handle.spawn(async move {
        tokio::time::sleep(delay).await;
        // The controller may be gone by now.
        let _ = action_tx.send(due);
    });
}
