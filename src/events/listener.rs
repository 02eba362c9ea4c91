use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::payload::{parse_payload, WeightEvent};
use super::slot::EventSlot;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Background ingest loop: consumes raw payload strings from the transport
/// channel, parses them, and posts the result into the shared slot. The
/// transport itself (broker connection, subscription, reconnects) lives
/// behind the channel's sender half and is not our concern here.
///
/// This loop only ever writes the slot; it never reads it back and never
/// waits on the frame loop. A parse failure is logged and dropped, leaving
/// any previously pending event untouched.
pub async fn ingest_loop(
    mut payloads: mpsc::Receiver<String>,
    slot: EventSlot,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            message = payloads.recv() => {
                match message {
                    Some(payload) => handle_payload(&payload, &slot),
                    None => {
                        log_info!("transport channel closed, ingest loop ending");
                        break;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("ingest loop shutting down");
                break;
            }
        }
    }
}

fn handle_payload(payload: &str, slot: &EventSlot) {
    match parse_payload(payload) {
        Ok(delta_grams) => {
            log_info!("scale reported change of {delta_grams} g");
            slot.post(WeightEvent::new(delta_grams));
        }
        Err(err) => {
            log_warn!("dropping malformed scale payload: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_payload_posts_event() {
        let slot = EventSlot::new();
        handle_payload("CHANGE:-350", &slot);
        assert_eq!(slot.take().map(|e| e.delta_grams), Some(-350));
    }

    #[test]
    fn malformed_payload_leaves_pending_event_untouched() {
        let slot = EventSlot::new();
        handle_payload("CHANGE:-350", &slot);
        handle_payload("garbage", &slot);
        // The earlier event is still pending
        assert_eq!(slot.take().map(|e| e.delta_grams), Some(-350));
    }

    #[tokio::test]
    async fn loop_ends_when_channel_closes() {
        let (tx, rx) = mpsc::channel(8);
        let slot = EventSlot::new();
        let token = CancellationToken::new();

        tx.send("CHANGE:100".to_string()).await.unwrap();
        drop(tx);
        ingest_loop(rx, slot.clone(), token).await;

        assert_eq!(slot.take().map(|e| e.delta_grams), Some(100));
    }

    #[tokio::test]
    async fn loop_ends_on_cancellation() {
        let (_tx, rx) = mpsc::channel::<String>(8);
        let slot = EventSlot::new();
        let token = CancellationToken::new();
        token.cancel();

        // Returns promptly even though the sender is still alive
        ingest_loop(rx, slot, token).await;
    }
}
