use std::fmt;

use log::{debug, info, warn};

use crate::domain::error::TaskError;
use crate::tasks::TaskRunner;

/// Operation name handed to the task runner.
pub const CORE_TASK: &str = "run_core_task";

/// Result slot of the most recent task invocation.
///
/// Displays as the text shown in the task box: empty when idle,
/// `Running...` while in flight, the runner's text, or `Error: <reason>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    Idle,
    Running,
    Succeeded(String),
    Failed(String),
}

impl TaskStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, TaskStatus::Running)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Idle => Ok(()),
            TaskStatus::Running => f.write_str("Running..."),
            TaskStatus::Succeeded(text) => f.write_str(text),
            TaskStatus::Failed(reason) => write!(f, "Error: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTicket(u64);

/// Request lifecycle to the task runner.
///
/// Overlapping runs are allowed. Only the most recently started run may write
/// the status; earlier runs that resolve late are ignored.
#[derive(Debug, Default)]
pub struct TaskInvoker {
    status: TaskStatus,
    issued: u64,
}

impl TaskInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &TaskStatus {
        &self.status
    }

    pub fn begin(&mut self) -> TaskTicket {
        self.issued += 1;
        self.status = TaskStatus::Running;
        debug!("task run #{} started", self.issued);
        TaskTicket(self.issued)
    }

    /// Applies a runner result. Returns false when a newer run superseded it.
    pub fn complete(&mut self, ticket: TaskTicket, result: Result<String, TaskError>) -> bool {
        if ticket.0 != self.issued {
            debug!(
                "task run #{} superseded by #{}; result dropped",
                ticket.0, self.issued
            );
            return false;
        }
        self.status = match result {
            Ok(text) => {
                info!("task run #{} succeeded", ticket.0);
                TaskStatus::Succeeded(text)
            }
            Err(e) => {
                warn!("task run #{} failed: {e}", ticket.0);
                TaskStatus::Failed(e.to_string())
            }
        };
        true
    }

    pub async fn run(&mut self, runner: &dyn TaskRunner) -> &TaskStatus {
        let ticket = self.begin();
        let result = runner.run(CORE_TASK).await;
        self.complete(ticket, result);
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text() {
        assert_eq!(TaskStatus::Idle.to_string(), "");
        assert_eq!(TaskStatus::Running.to_string(), "Running...");
        assert_eq!(
            TaskStatus::Succeeded("Task completed: Success".into()).to_string(),
            "Task completed: Success"
        );
        assert_eq!(TaskStatus::Failed("boom".into()).to_string(), "Error: boom");
    }

    #[test]
    fn begin_marks_running() {
        let mut task = TaskInvoker::new();
        task.begin();
        assert!(task.status().is_running());
    }

    #[test]
    fn failure_is_formatted() {
        let mut task = TaskInvoker::new();
        let t = task.begin();
        assert!(task.complete(t, Err(TaskError::Failed("exit status 2".into()))));
        assert_eq!(task.status().to_string(), "Error: exit status 2");
    }

    #[test]
    fn latest_invocation_wins() {
        let mut task = TaskInvoker::new();
        let older = task.begin();
        let newer = task.begin();

        assert!(task.complete(newer, Ok("second".into())));
        assert!(!task.complete(older, Ok("first".into())));
        assert_eq!(task.status(), &TaskStatus::Succeeded("second".into()));
    }

    #[test]
    fn superseded_run_resolving_first_keeps_running() {
        let mut task = TaskInvoker::new();
        let older = task.begin();
        let _newer = task.begin();

        assert!(!task.complete(older, Ok("first".into())));
        assert!(task.status().is_running());
    }
}
