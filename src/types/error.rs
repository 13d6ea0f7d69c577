//! Error types for the task runner
//!
//! Every public operation catches errors at its boundary and renders them as
//! descriptive text; the `Display` impls here are the exact strings callers
//! see, so the facade can map `Err(e)` to `e.to_string()` directly.

use thiserror::Error;

/// Main error type for task operations
#[derive(Debug, Error)]
pub enum TaskError {
    // === Security errors ===
    /// Command was blocked by the safety classifier
    #[error(
        "Security rejection: command '{0}' contains a potentially destructive operation and was blocked."
    )]
    SecurityRejected(String),

    // === Registry errors ===
    /// A task with this ID is already registered
    #[error("Error: a task with ID '{0}' already exists.")]
    DuplicateTask(String),

    /// No task registered under this ID
    #[error("No task found with ID '{0}'.")]
    TaskNotFound(String),

    /// Task exists but its process has already exited
    #[error("Failed: task '{0}' does not exist or has already exited.")]
    TaskExited(String),

    // === External errors ===
    /// Spawning the shell process failed
    #[error("Failed to start task: {0}")]
    Spawn(#[source] std::io::Error),

    /// IO error while writing to the process's input stream
    #[error("Failed to send input: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    /// Check if this error was caused by invalid caller input rather than
    /// a runtime failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TaskError::SecurityRejected(_)
                | TaskError::DuplicateTask(_)
                | TaskError::TaskNotFound(_)
                | TaskError::TaskExited(_)
        )
    }

    // === Constructor helpers ===

    /// Create a security rejection error
    pub fn security_rejected(command: impl Into<String>) -> Self {
        TaskError::SecurityRejected(command.into())
    }

    /// Create a duplicate task error
    pub fn duplicate_task(task_id: impl Into<String>) -> Self {
        TaskError::DuplicateTask(task_id.into())
    }

    /// Create a task not found error
    pub fn task_not_found(task_id: impl Into<String>) -> Self {
        TaskError::TaskNotFound(task_id.into())
    }

    /// Create a task exited error
    pub fn task_exited(task_id: impl Into<String>) -> Self {
        TaskError::TaskExited(task_id.into())
    }
}
