pub mod command;
pub mod safe;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::TaskConfig;
use crate::domain::error::TaskError;

use command::CommandTask;
use safe::SafeTask;

/// Executes one named background operation.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run(&self, operation: &str) -> Result<String, TaskError>;
}

pub fn runner_for(cfg: &TaskConfig) -> Arc<dyn TaskRunner> {
    let timeout = Duration::from_secs(cfg.timeout_secs);
    match &cfg.command {
        Some(program) => Arc::new(CommandTask::new(program, cfg.args.clone(), timeout)),
        None => Arc::new(SafeTask::with_timeout(timeout)),
    }
}
