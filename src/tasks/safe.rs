use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::time::{sleep, timeout};

use crate::domain::error::TaskError;
use crate::tasks::TaskRunner;

/// Simulated unit of work run under a hard timeout.
#[derive(Debug, Clone)]
pub struct SafeTask {
    limit: Duration,
    work: Duration,
}

impl SafeTask {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(2))
    }

    pub fn with_timeout(limit: Duration) -> Self {
        Self {
            limit,
            work: Duration::from_millis(100),
        }
    }

    pub fn with_work(mut self, work: Duration) -> Self {
        self.work = work;
        self
    }

    async fn heavy_task(&self) -> String {
        sleep(self.work).await;
        "Success".to_string()
    }
}

impl Default for SafeTask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRunner for SafeTask {
    async fn run(&self, operation: &str) -> Result<String, TaskError> {
        debug!("{operation}: safe task, limit {:?}", self.limit);
        match timeout(self.limit, self.heavy_task()).await {
            Ok(result) => Ok(format!("Task completed: {result}")),
            Err(_) => Err(TaskError::TimedOut(self.limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_within_limit() {
        let out = SafeTask::new().run("run_core_task").await.unwrap();
        assert_eq!(out, "Task completed: Success");
    }

    #[tokio::test]
    async fn slow_work_times_out() {
        let err = SafeTask::with_timeout(Duration::from_millis(50))
            .with_work(Duration::from_secs(5))
            .run("run_core_task")
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::TimedOut(_)));
        assert_eq!(
            err.to_string(),
            "Task timed out after 50ms (possible logic bomb detected)"
        );
    }
}
