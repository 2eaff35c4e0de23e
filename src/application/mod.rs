//! Application layer (use-cases, policies).
//!
//! Glues the parser and the view inputs to a chat transcript without depending
//! on any UI framework or storage engine.

pub mod session;

pub use session::ChatSession;
