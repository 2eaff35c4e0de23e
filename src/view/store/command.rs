use std::time::Duration;

/// Side effects requested by the reducer and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Navigate { path: String },
    GoBack,
    /// Start a timer that reports back with `ScheduledNavigationDue { token }`.
    ScheduleNavigation { token: u64, delay: Duration },
    PreviewLoaded,
    ScreenshotCaptured { data: String },
    ScreenshotFailed { error: String },
    IframeFailed { error: String },
}
