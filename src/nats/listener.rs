use super::client::NatsClient;
use super::messages::TranscriptMessage;
use crate::driver::SessionRegistry;
use anyhow::{Context, Result};
use futures::stream::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Route STT transcripts to the registered conversation with the same session id
pub async fn spawn_transcript_listener(
    client: &NatsClient,
    registry: SessionRegistry,
) -> Result<JoinHandle<()>> {
    let mut subscriber = client
        .subscribe_transcripts()
        .await
        .context("Failed to start transcript listener")?;

    Ok(tokio::spawn(async move {
        info!("Transcript listener started");

        while let Some(msg) = subscriber.next().await {
            let transcript = match serde_json::from_slice::<TranscriptMessage>(&msg.payload) {
                Ok(transcript) => transcript,
                Err(e) => {
                    warn!("Failed to parse transcript message: {}", e);
                    continue;
                }
            };

            let Some(driver) = registry.get(&transcript.session_id).await else {
                debug!("No session {}, skipping transcript", transcript.session_id);
                continue;
            };

            let mut driver = driver.lock().await;
            if let Err(e) = driver
                .handle_update(&transcript.text, transcript.speaking())
                .await
            {
                error!("Failed to handle transcript for {}: {:#}", transcript.session_id, e);
            }
        }

        info!("Transcript listener stopped");
    }))
}
