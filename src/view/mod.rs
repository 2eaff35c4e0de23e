//! Which panel (preview, code or data) a chat session shows, and when the
//! router should move between them.
//!
//! Hosts feed observations into a [`ViewController`], which runs them through
//! the reducer in [`store`] and calls back into its [`ViewHost`].

pub mod controller;
pub mod iframe;
pub mod route;
pub mod state;
pub mod store;

pub use controller::{ViewController, ViewHost};
pub use iframe::IframeMessage;
pub use route::{ChatRoute, encode_title};
pub use state::{ViewControl, ViewControls, ViewInputs, ViewSnapshot, ViewState, ViewType};
