use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::listener::ingest_loop;
use super::slot::EventSlot;

/// Owns the background ingest task: spawns it against a transport payload
/// channel, cancels and joins it on stop.
pub struct IngestController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl IngestController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start(&mut self, payloads: mpsc::Receiver<String>, slot: EventSlot) -> Result<()> {
        if self.handle.is_some() {
            bail!("ingest already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(ingest_loop(payloads, slot, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("ingest loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for IngestController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn double_start_bails() {
        let mut controller = IngestController::new();
        let slot = EventSlot::new();

        let (_tx1, rx1) = mpsc::channel(1);
        controller.start(rx1, slot.clone()).unwrap();

        let (_tx2, rx2) = mpsc::channel(1);
        assert!(controller.start(rx2, slot).is_err());

        controller.stop().await.unwrap();
    }

    #[tokio::test]
    async fn start_then_stop_delivers_pending_payloads() {
        let mut controller = IngestController::new();
        let slot = EventSlot::new();
        let (tx, rx) = mpsc::channel(8);

        controller.start(rx, slot.clone()).unwrap();
        tx.send("CHANGE:-700".to_string()).await.unwrap();

        // Wait for the listener to post before shutting it down
        tokio::time::timeout(std::time::Duration::from_secs(2), async {
            while !slot.is_pending() {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        controller.stop().await.unwrap();
        assert_eq!(slot.take().map(|e| e.delta_grams), Some(-700));
    }

    #[tokio::test]
    async fn stop_without_start_is_a_noop() {
        let mut controller = IngestController::new();
        controller.stop().await.unwrap();
    }
}
