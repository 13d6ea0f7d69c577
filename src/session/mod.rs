//! Session management for interactive shell tasks
//!
//! This module handles:
//! - Session lifecycle (start, respond, peek)
//! - The per-session output pump and line queue
//! - The task-ID registry
//! - Status tracking (running / exited)

mod controller;
mod pump;
mod queue;
mod registry;
#[allow(clippy::module_inception)]
mod session;

pub use controller::{
    DEFAULT_PEEK_LIMIT, DEFAULT_PEEK_WAIT_SECONDS, DEFAULT_RESPOND_WAIT_SECONDS,
    DEFAULT_START_WAIT_SECONDS, SessionController,
};
pub use queue::OutputQueue;
pub use registry::SessionRegistry;
pub use session::{TaskSession, TaskStatus};
