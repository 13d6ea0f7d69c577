//! Shared types for the task runner

mod error;

pub use error::{Result, TaskError};
