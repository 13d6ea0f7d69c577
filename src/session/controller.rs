//! Session controller: the public start/respond/peek operations
//!
//! Composes the classifier gate, process spawning, the output pump, and the
//! registry. Operations are typed internally (`Result<String, TaskError>`);
//! the `*_task` facade renders every outcome, success or failure, as plain
//! text for the orchestrator.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::Command;

use super::pump::spawn_pump;
use super::queue::OutputQueue;
use super::registry::SessionRegistry;
use super::session::TaskSession;
use crate::safety::{ShellDialect, classify};
use crate::types::{Result, TaskError};

/// Default seconds to let output accumulate after `start`
pub const DEFAULT_START_WAIT_SECONDS: f64 = 0.2;
/// Default seconds to wait after writing to stdin
pub const DEFAULT_RESPOND_WAIT_SECONDS: f64 = 0.1;
/// Default seconds to wait before draining in `peek`
pub const DEFAULT_PEEK_WAIT_SECONDS: f64 = 0.2;
/// Default page size for `peek`
pub const DEFAULT_PEEK_LIMIT: i64 = 50;

/// Marker reported when a `peek` page is empty
const NO_DATA_MARKER: &str = "[no data or offset out of range]";

/// Controller owning the session registry and the host dialect
#[derive(Debug)]
pub struct SessionController {
    registry: SessionRegistry,
    dialect: ShellDialect,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    /// Create a controller for the host platform's shell dialect
    pub fn new() -> Self {
        Self::with_dialect(ShellDialect::host())
    }

    /// Create a controller with an explicit dialect
    pub fn with_dialect(dialect: ShellDialect) -> Self {
        Self {
            registry: SessionRegistry::new(),
            dialect,
        }
    }

    /// The dialect commands are classified and interpreted under
    pub fn dialect(&self) -> ShellDialect {
        self.dialect
    }

    /// The underlying registry
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Start a shell task under a unique caller-chosen ID
    ///
    /// The command is interpreted by the host shell. Its stdout and stderr
    /// are pumped into the session queue; stdin stays writable for
    /// [`respond`](Self::respond).
    pub async fn start(&self, command: &str, task_id: &str, wait_seconds: f64) -> Result<String> {
        if classify(self.dialect, command, 0) {
            tracing::warn!(task_id, command, "command blocked by safety classifier");
            return Err(TaskError::security_rejected(command));
        }

        if self.registry.contains(task_id) {
            return Err(TaskError::duplicate_task(task_id));
        }

        let (shell, flag) = self.dialect.shell_invocation();
        let mut child = Command::new(shell)
            .arg(flag)
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(TaskError::Spawn)?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let queue = Arc::new(OutputQueue::new());
        if let (Some(stdout), Some(stderr)) = (stdout, stderr) {
            drop(spawn_pump(stdout, stderr, Arc::clone(&queue)));
        }

        let session = Arc::new(TaskSession::new(child, stdin, queue));
        self.registry.register(task_id.to_string(), session);
        tracing::info!(task_id, "task started");

        buffer_wait(wait_seconds).await;

        Ok(format!(
            "Task '{task_id}' started under {}. Monitor its output to handle interactive prompts.",
            self.dialect.label()
        ))
    }

    /// Send a line of input to a running task's stdin
    ///
    /// Fails when the task is unknown or its process already exited; an
    /// exited task keeps its buffered output but no longer accepts input.
    pub async fn respond(&self, task_id: &str, response: &str, wait_seconds: f64) -> Result<String> {
        let session = self
            .registry
            .get(task_id)
            .ok_or_else(|| TaskError::task_not_found(task_id))?;

        if !session.status().await.is_running() {
            return Err(TaskError::task_exited(task_id));
        }

        session.write_stdin(response).await?;
        tracing::debug!(task_id, "input written to task stdin");

        buffer_wait(wait_seconds).await;

        Ok(format!(
            "Input sent to task '{task_id}'. Peek the output again to confirm the result."
        ))
    }

    /// Drain and page the task's buffered output
    ///
    /// The drain is destructive: lines returned here are gone from the
    /// queue, so repeated peeks never replay output. Negative `limit` or
    /// `offset` are clamped to zero.
    pub async fn peek(
        &self,
        task_id: &str,
        limit: i64,
        offset: i64,
        wait_seconds: f64,
    ) -> Result<String> {
        let session = self
            .registry
            .get(task_id)
            .ok_or_else(|| TaskError::task_not_found(task_id))?;

        // Give the pump a moment to accumulate more lines.
        buffer_wait(wait_seconds).await;

        let drained = session.queue().drain_all().await;

        let start = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let end = start.saturating_add(take);

        let total = drained.len();
        let remaining = total.saturating_sub(end);

        let page: Vec<&str> = drained
            .iter()
            .skip(start)
            .take(take)
            .map(String::as_str)
            .collect();

        let body = if page.is_empty() {
            NO_DATA_MARKER.to_string()
        } else {
            page.join("\n")
        };

        let status = session.status().await.describe();
        tracing::debug!(task_id, total, remaining, %status, "peeked task output");

        Ok(format!(
            "Task: {task_id} | Status: {status}\n\
             --- output (offset={offset}, limit={limit}) ---\n\
             total lines: {total} | unread remaining: {remaining}\n\
             {body}"
        ))
    }

    // === Text facade ===
    //
    // The orchestrator consumes opaque text; failures share the success
    // channel and are distinguishable only by message content.

    /// [`start`](Self::start), rendered to text
    pub async fn start_task(&self, command: &str, task_id: &str, wait_seconds: f64) -> String {
        self.start(command, task_id, wait_seconds)
            .await
            .unwrap_or_else(|e| e.to_string())
    }

    /// [`respond`](Self::respond), rendered to text
    pub async fn respond_task(&self, task_id: &str, response: &str, wait_seconds: f64) -> String {
        self.respond(task_id, response, wait_seconds)
            .await
            .unwrap_or_else(|e| e.to_string())
    }

    /// [`peek`](Self::peek), rendered to text
    pub async fn peek_task(
        &self,
        task_id: &str,
        limit: i64,
        offset: i64,
        wait_seconds: f64,
    ) -> String {
        self.peek(task_id, limit, offset, wait_seconds)
            .await
            .unwrap_or_else(|e| e.to_string())
    }
}

/// Best-effort sleep to let the pump catch up; not a synchronization
/// guarantee
async fn buffer_wait(wait_seconds: f64) {
    if wait_seconds > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(wait_seconds)).await;
    }
}
