use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::attribution::{AttributionConfig, TriggerStrategy};
use crate::events::EventSlot;
use crate::settings::ZoneStore;
use crate::tracking::TrackFeed;

use super::loop_worker::{frame_loop, ShelfView};

/// Owns the frame-loop task. Renderers subscribe to the view channel; the
/// controller keeps one receiver alive so the loop's sends always have a
/// home.
pub struct PipelineController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    view_rx: Option<watch::Receiver<ShelfView>>,
}

impl PipelineController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
            view_rx: None,
        }
    }

    pub fn start(
        &mut self,
        feed: Box<dyn TrackFeed>,
        slot: EventSlot,
        zone_store: Arc<ZoneStore>,
        config: AttributionConfig,
        strategy: TriggerStrategy,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("pipeline already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let (view_tx, view_rx) = watch::channel(ShelfView::default());

        let handle = tokio::spawn(frame_loop(
            feed,
            slot,
            zone_store,
            config,
            strategy,
            view_tx,
            token_clone,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.view_rx = Some(view_rx);
        Ok(())
    }

    /// A fresh receiver for the live view stream. `None` before `start`.
    pub fn subscribe(&self) -> Option<watch::Receiver<ShelfView>> {
        self.view_rx.clone()
    }

    /// Has the loop finished on its own (feed ended)?
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(true)
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        self.view_rx = None;
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("frame loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for PipelineController {
    fn default() -> Self {
        Self::new()
    }
}
