//! Line queue between a session's output pump and `peek`
//!
//! Unbounded, insertion-order preserving. The pump is the only writer; any
//! number of `peek` calls may drain concurrently, racing for lines with no
//! defined arbitration order. A drain is destructive: a line handed out is
//! never handed out again.

use std::collections::VecDeque;

use tokio::sync::Mutex;

/// Thread-safe FIFO of output lines for one session
#[derive(Debug, Default)]
pub struct OutputQueue {
    lines: Mutex<VecDeque<String>>,
}

impl OutputQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line
    pub async fn push(&self, line: String) {
        self.lines.lock().await.push_back(line);
    }

    /// Remove and return every line currently buffered
    pub async fn drain_all(&self) -> Vec<String> {
        let mut lines = self.lines.lock().await;
        lines.drain(..).collect()
    }

    /// Number of buffered lines
    pub async fn len(&self) -> usize {
        self.lines.lock().await.len()
    }

    /// Whether the queue is currently empty
    pub async fn is_empty(&self) -> bool {
        self.lines.lock().await.is_empty()
    }
}
