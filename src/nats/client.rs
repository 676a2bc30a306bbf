use super::messages::InterruptionMessage;
use crate::driver::{InterruptionNotice, InterruptionSink};
use anyhow::{Context, Result};
use async_nats::Client;
use tracing::info;

/// Subject prefix for outbound interruptions (`moderator.interrupt.<session_id>`)
pub const INTERRUPT_SUBJECT_PREFIX: &str = "moderator.interrupt";

/// Transcripts from the STT service (partial and final)
pub const TRANSCRIPT_SUBJECT: &str = "stt.text.>";

#[derive(Clone)]
pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    pub fn interrupt_subject(session_id: &str) -> String {
        format!("{}.{}", INTERRUPT_SUBJECT_PREFIX, session_id)
    }

    /// Publish an interruption for the TTS service to speak
    pub async fn publish_interruption(&self, notice: &InterruptionNotice) -> Result<()> {
        let subject = Self::interrupt_subject(&notice.session_id);
        let payload = serde_json::to_vec(&InterruptionMessage::from(notice))?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish interruption")?;

        info!(
            "Published interruption to {} (reason={})",
            subject, notice.reason
        );

        Ok(())
    }

    /// Subscribe to transcript messages
    pub async fn subscribe_transcripts(&self) -> Result<async_nats::Subscriber> {
        // Sessions are routed by the session_id in the message payload
        info!("Subscribing to transcripts on {}", TRANSCRIPT_SUBJECT);

        let subscriber = self
            .client
            .subscribe(TRANSCRIPT_SUBJECT)
            .await
            .context("Failed to subscribe to transcripts")?;

        info!("Subscribed to {}", TRANSCRIPT_SUBJECT);

        Ok(subscriber)
    }
}

#[async_trait::async_trait]
impl InterruptionSink for NatsClient {
    async fn deliver(&self, notice: &InterruptionNotice) -> Result<()> {
        self.publish_interruption(notice).await
    }
}
