//! One tracked interactive subprocess
//!
//! A session owns its child process handle, the stdin pipe, the output
//! queue its pump writes into, and a cached exit code. Exit is never pushed
//! proactively; it is detected lazily whenever the status is queried.

use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin};
use tokio::sync::Mutex;

use super::queue::OutputQueue;
use crate::types::Result;

/// Derived status of a session's process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Process is still alive
    Running,
    /// Process has exited with the given code
    Exited(i32),
}

impl TaskStatus {
    /// Render the status the way `peek` reports it
    pub fn describe(self) -> String {
        match self {
            Self::Running => "running".to_string(),
            Self::Exited(code) => format!("exited (code: {code})"),
        }
    }

    /// Whether the process is still alive
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// A live (or exited but still registered) shell task
#[derive(Debug)]
pub struct TaskSession {
    child: Mutex<Child>,
    stdin: Mutex<Option<ChildStdin>>,
    queue: Arc<OutputQueue>,
    /// Most recent exit code observed by a status query
    exit_code: Mutex<Option<i32>>,
}

impl TaskSession {
    /// Wrap a spawned child whose stdin has already been taken
    pub(crate) fn new(child: Child, stdin: Option<ChildStdin>, queue: Arc<OutputQueue>) -> Self {
        Self {
            child: Mutex::new(child),
            stdin: Mutex::new(stdin),
            queue,
            exit_code: Mutex::new(None),
        }
    }

    /// The session's output queue
    pub fn queue(&self) -> &Arc<OutputQueue> {
        &self.queue
    }

    /// Query the process status, caching the exit code once observed
    ///
    /// Exit codes lost to signals are reported as -1.
    pub async fn status(&self) -> TaskStatus {
        if let Some(code) = *self.exit_code.lock().await {
            return TaskStatus::Exited(code);
        }

        let mut child = self.child.lock().await;
        match child.try_wait() {
            Ok(Some(exit_status)) => {
                let code = exit_status.code().unwrap_or(-1);
                *self.exit_code.lock().await = Some(code);
                TaskStatus::Exited(code)
            }
            // A wait error leaves the session looking alive; the next
            // query retries.
            Ok(None) | Err(_) => TaskStatus::Running,
        }
    }

    /// Write a response to the process's stdin and flush
    ///
    /// A trailing newline is appended when missing so line-buffered readers
    /// on the other side see the input.
    pub async fn write_stdin(&self, response: &str) -> Result<()> {
        let mut data = response.to_string();
        if !data.ends_with('\n') {
            data.push('\n');
        }

        let mut stdin = self.stdin.lock().await;
        if let Some(stdin) = stdin.as_mut() {
            stdin.write_all(data.as_bytes()).await?;
            stdin.flush().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::process::Stdio;

    use tokio::process::Command;

    use super::*;

    fn spawn_session(command: &str) -> TaskSession {
        let mut child = Command::new("bash")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn test process");
        let stdin = child.stdin.take();
        TaskSession::new(child, stdin, Arc::new(OutputQueue::new()))
    }

    #[test]
    fn test_status_describe() {
        assert_eq!(TaskStatus::Running.describe(), "running");
        assert_eq!(TaskStatus::Exited(0).describe(), "exited (code: 0)");
        assert_eq!(TaskStatus::Exited(2).describe(), "exited (code: 2)");
        assert!(TaskStatus::Running.is_running());
        assert!(!TaskStatus::Exited(0).is_running());
    }

    #[tokio::test]
    async fn test_status_detects_exit_lazily() {
        let session = spawn_session("exit 3");

        // Exit is only observed on a status query; poll until seen.
        let mut status = session.status().await;
        for _ in 0..50 {
            if !status.is_running() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            status = session.status().await;
        }
        assert_eq!(status, TaskStatus::Exited(3));

        // Cached afterwards.
        assert_eq!(session.status().await, TaskStatus::Exited(3));
    }

    #[tokio::test]
    async fn test_long_running_session_reports_running() {
        let session = spawn_session("sleep 30");
        assert_eq!(session.status().await, TaskStatus::Running);
    }

    #[tokio::test]
    async fn test_write_stdin_appends_newline() {
        let session = spawn_session("read line; echo \"got:$line\"");
        session.write_stdin("hello").await.unwrap();

        let mut status = session.status().await;
        for _ in 0..50 {
            if !status.is_running() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            status = session.status().await;
        }
        // `read` only completes when it sees the appended newline.
        assert_eq!(status, TaskStatus::Exited(0));
    }
}
