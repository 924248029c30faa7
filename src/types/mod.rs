//! Core type definitions for the autoshell agent

pub mod identifiers;
pub mod messages;
pub mod options;

pub use identifiers::SessionId;
pub use messages::{Message, Role};
pub use options::{AgentOptions, AgentOptionsBuilder};
