use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::info;
use tokio::process::Command;

use crate::domain::error::TaskError;
use crate::tasks::TaskRunner;

/// Runs an external program as the background task.
///
/// Trimmed stdout is the success text; a non-zero exit fails with stderr.
#[derive(Debug, Clone)]
pub struct CommandTask {
    program: String,
    args: Vec<String>,
    limit: Duration,
}

impl CommandTask {
    pub fn new(program: impl Into<String>, args: Vec<String>, limit: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            limit,
        }
    }
}

#[async_trait]
impl TaskRunner for CommandTask {
    async fn run(&self, operation: &str) -> Result<String, TaskError> {
        info!("{operation}: running {} {:?}", self.program, self.args);

        let child = Command::new(&self.program)
            .args(&self.args)
            .env("MAILPANE_OPERATION", operation)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TaskError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.limit, child.wait_with_output())
            .await
            .map_err(|_| TaskError::TimedOut(self.limit))?
            .map_err(|e| TaskError::Failed(e.to_string()))?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            Ok(if stdout.is_empty() {
                "Task completed".to_string()
            } else {
                stdout
            })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(TaskError::Failed(if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr
            }))
        }
    }
}
