//! Output pump: background reader for one session
//!
//! Moves the child's stdout and stderr into the session queue line by line
//! until both streams reach end-of-stream. Runs detached so `start` never
//! blocks on it. A read error silently ends that stream; the pump never
//! propagates failures to the controller.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{ChildStderr, ChildStdout};
use tokio::task::JoinHandle;

use super::queue::OutputQueue;

/// Spawn the pump task for one session
///
/// A single task owns all writes to the queue; the two pipes are merged by
/// selecting over them, which interleaves lines roughly in arrival order.
pub(crate) fn spawn_pump(
    stdout: ChildStdout,
    stderr: ChildStderr,
    queue: Arc<OutputQueue>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut out_lines = BufReader::new(stdout).lines();
        let mut err_lines = BufReader::new(stderr).lines();
        let mut out_open = true;
        let mut err_open = true;

        while out_open || err_open {
            tokio::select! {
                line = out_lines.next_line(), if out_open => match line {
                    Ok(Some(line)) => queue.push(line).await,
                    // EOF or read error both close the stream.
                    Ok(None) | Err(_) => out_open = false,
                },
                line = err_lines.next_line(), if err_open => match line {
                    Ok(Some(line)) => queue.push(line).await,
                    Ok(None) | Err(_) => err_open = false,
                },
            }
        }

        tracing::debug!("output pump finished, both streams closed");
    })
}
