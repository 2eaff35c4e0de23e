use tokio::sync::mpsc;

use crate::domain::IframeMessageError;
use crate::infra::app_config::ViewConfig;

use super::iframe::IframeMessage;
use super::state::{ViewInputs, ViewSnapshot, ViewState, ViewType};
use super::store::{HostAction, NavigationAction, ViewAction};

/// Router and parent-window hooks the view drives.
pub trait ViewHost {
    /// Replace the current route with `path`.
    fn navigate(&mut self, path: &str);

    /// Browser-history back.
    fn go_back(&mut self);

    fn preview_loaded(&mut self) {}

    fn screenshot_captured(&mut self, _data: &str) {}

    fn screenshot_failed(&mut self, _error: &str) {}

    fn iframe_failed(&mut self, _error: &str) {}
}

/// Owns the view state of one mounted session and routes commands to its host.
pub struct ViewController<H: ViewHost> {
    pub state: ViewState,
    pub(crate) host: H,
    pub(crate) action_tx: mpsc::UnboundedSender<ViewAction>,
    action_rx: mpsc::UnboundedReceiver<ViewAction>,
}

impl<H: ViewHost> ViewController<H> {
    pub fn new(config: ViewConfig, path: impl Into<String>, host: H) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            state: ViewState::new(config, path),
            host,
            action_tx,
            action_rx,
        }
    }

    /// Sender for actions produced off the render path (timers, message listeners).
    pub fn action_sender(&self) -> mpsc::UnboundedSender<ViewAction> {
        self.action_tx.clone()
    }

    pub fn update_inputs(&mut self, inputs: ViewInputs) {
        self.dispatch(ViewAction::Host(HostAction::InputsChanged(inputs)));
    }

    pub fn url_changed(&mut self, path: impl Into<String>) {
        self.dispatch(ViewAction::Host(HostAction::UrlChanged(path.into())));
    }

    pub fn viewport_resized(&mut self, width: u32) {
        self.dispatch(ViewAction::Host(HostAction::ViewportResized { width }));
    }

    pub fn select_view(&mut self, view: ViewType) {
        self.dispatch(ViewAction::Navigation(NavigationAction::SelectView(view)));
    }

    pub fn back(&mut self) {
        self.dispatch(ViewAction::Navigation(NavigationAction::Back));
    }

    /// Handle a raw `postMessage` payload from the preview iframe.
    pub fn receive_iframe_message(&mut self, json: &str) -> Result<(), IframeMessageError> {
        let message = IframeMessage::from_json(json)
            .inspect_err(|err| log::warn!("Dropping iframe message: {err}"))?;
        self.dispatch(ViewAction::Iframe(message));
        Ok(())
    }

    /// Drain queued actions without waiting. Returns whether anything ran.
    pub fn poll_actions(&mut self) -> bool {
        let mut any = false;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            any = true;
        }
        any
    }

    /// Wait for the next queued action and apply it.
    pub async fn next_action(&mut self) -> bool {
        match self.action_rx.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.snapshot()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
