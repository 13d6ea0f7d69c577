//! Interactive shell task runner
//!
//! Starts, tracks, feeds input to, and pages output from long-running
//! shell sessions, gated by a safety classifier that blocks destructive
//! commands before they run.
//!
//! ## Operations
//!
//! - `start_task`: classify the command, spawn it under the host shell,
//!   attach an output pump, register it under a caller-chosen task ID
//! - `respond_task`: write a line to a running task's stdin
//! - `peek_task`: destructively drain the task's buffered output and page
//!   it with an offset/limit window
//!
//! All three return plain text; failures share the success channel and are
//! distinguishable only by message content.
//!
//! ## Quick Start
//!
//! ```no_run
//! use term_task::SessionController;
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = SessionController::new();
//!     println!("{}", controller.start_task("echo hello", "t1", 0.2).await);
//!     println!("{}", controller.peek_task("t1", 50, 0, 0.2).await);
//! }
//! ```
//!
//! ## Known limits
//!
//! - Sessions are never reaped: exited tasks keep their registry entry and
//!   any undrained output for the lifetime of the program.
//! - There is no kill operation; a task ends only when its process does.
//! - A `peek` drain is at-most-once: concurrent peeks on one task race for
//!   lines with no defined arbitration order.

pub mod cli;
pub mod driver;
pub mod logging;
pub mod safety;
pub mod session;
pub mod types;

pub use cli::Cli;
pub use safety::{ShellDialect, classify, is_dangerous_command};
pub use session::{OutputQueue, SessionController, SessionRegistry, TaskSession, TaskStatus};
pub use types::{Result, TaskError};
