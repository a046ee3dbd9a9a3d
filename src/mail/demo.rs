use std::time::Duration;

use async_trait::async_trait;

use crate::domain::error::FetchError;
use crate::domain::message::Message;
use crate::mail::MailboxProvider;

/// Built-in sample inbox, used when no real source is configured.
#[derive(Debug, Clone)]
pub struct DemoProvider {
    latency: Duration,
}

impl DemoProvider {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(300),
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

pub fn sample_messages() -> Vec<Message> {
    vec![
        Message::new(
            1,
            "Apple",
            "Your Receipt",
            "Thank you for your purchase...",
            "10:30 AM",
        ),
        Message::new(
            2,
            "GitHub",
            "[GitHub] Security Alert",
            "We noticed a new login...",
            "Yesterday",
        ),
        Message::new(
            3,
            "Mom",
            "Dinner?",
            "Are you coming over this weekend?",
            "Friday",
        ),
    ]
}

#[async_trait]
impl MailboxProvider for DemoProvider {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_messages(&self) -> Result<Vec<Message>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(sample_messages())
    }
}
