//! Domain types shared by the parser, the session glue and the view state machine.

pub mod error;
pub mod message;
pub mod segment;

pub use error::*;
pub use message::*;
pub use segment::*;
