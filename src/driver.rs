//! Stdio driver: the orchestrator-facing request loop
//!
//! Reads one JSON request per line from stdin, dispatches it to the
//! controller, and writes the resulting text to stdout followed by a blank
//! line. Malformed requests produce an error line on the same channel, so
//! the caller never sees anything but text.
//!
//! Request shapes:
//!
//! ```json
//! {"op":"start","command":"echo hi","task_id":"t1"}
//! {"op":"respond","task_id":"t1","response":"y"}
//! {"op":"peek","task_id":"t1","limit":50,"offset":0}
//! ```

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::Cli;
use crate::logging;
use crate::session::{
    DEFAULT_PEEK_LIMIT, DEFAULT_PEEK_WAIT_SECONDS, DEFAULT_RESPOND_WAIT_SECONDS,
    DEFAULT_START_WAIT_SECONDS, SessionController,
};

/// One request line from the orchestrator
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Start a shell task
    Start {
        command: String,
        task_id: String,
        #[serde(default = "default_start_wait")]
        wait_seconds: f64,
    },
    /// Send input to a running task's stdin
    Respond {
        task_id: String,
        response: String,
        #[serde(default = "default_respond_wait")]
        wait_seconds: f64,
    },
    /// Drain and page a task's buffered output
    Peek {
        task_id: String,
        #[serde(default = "default_limit")]
        limit: i64,
        #[serde(default)]
        offset: i64,
        #[serde(default = "default_peek_wait")]
        wait_seconds: f64,
    },
}

fn default_start_wait() -> f64 {
    DEFAULT_START_WAIT_SECONDS
}

fn default_respond_wait() -> f64 {
    DEFAULT_RESPOND_WAIT_SECONDS
}

fn default_peek_wait() -> f64 {
    DEFAULT_PEEK_WAIT_SECONDS
}

fn default_limit() -> i64 {
    DEFAULT_PEEK_LIMIT
}

/// Dispatch one parsed request against the controller
pub async fn dispatch(controller: &SessionController, request: Request) -> String {
    match request {
        Request::Start {
            command,
            task_id,
            wait_seconds,
        } => controller.start_task(&command, &task_id, wait_seconds).await,
        Request::Respond {
            task_id,
            response,
            wait_seconds,
        } => controller.respond_task(&task_id, &response, wait_seconds).await,
        Request::Peek {
            task_id,
            limit,
            offset,
            wait_seconds,
        } => controller.peek_task(&task_id, limit, offset, wait_seconds).await,
    }
}

/// Run the stdio request loop until stdin closes
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    logging::init(cli)?;

    let controller = SessionController::new();
    tracing::info!(dialect = controller.dialect().label(), "task driver started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Request>(&line) {
            Ok(request) => dispatch(&controller, request).await,
            Err(e) => format!("Invalid request: {e}"),
        };

        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, task driver exiting");
    Ok(())
}
