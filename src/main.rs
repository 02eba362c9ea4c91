//! Demo wiring: a scripted person tracker and a simulated shelf scale feed
//! the real ingest + frame-loop pipeline, so the whole attribution path runs
//! end to end without a camera or hardware.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use rand::Rng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use shelfwatch::scale::{format_payload, stable_reading, Calibration, DeltaDetector};
use shelfwatch::{
    AttributionConfig, BoundingBox, EventSlot, FrameSnapshot, IngestController,
    PipelineController, TrackFeed, TrackedEntity, TriggerStrategy, ZoneStore,
};

const ZONE_CONFIG_PATH: &str = "zone_config.json";
const DEMO_RUN_SECS: u64 = 20;

/// Bench calibration of the demo shelf's load cell.
const TARE_VALUE: i64 = 471_778;
const VALUE_WITH_WEIGHT: i64 = 256_326;
const KNOWN_WEIGHT_G: f64 = 480.0;

const BOTTLE_WEIGHT_G: f64 = 350.0;
const CHANGE_THRESHOLD_G: f64 = 50.0;

/// Two synthetic shoppers: #1 loiters near the frame edge, #2 drifts in and
/// out of the shelf zone. Deterministic, driven by the frame counter.
struct ScriptedFeed {
    frame: u64,
    frames_total: u64,
}

impl ScriptedFeed {
    fn new(frames_total: u64) -> Self {
        Self {
            frame: 0,
            frames_total,
        }
    }
}

impl TrackFeed for ScriptedFeed {
    fn next_frame(&mut self) -> Result<Option<FrameSnapshot>> {
        if self.frame >= self.frames_total {
            return Ok(None);
        }
        self.frame += 1;

        let t = self.frame as f32 / 30.0;
        let loiterer = TrackedEntity::new(
            1,
            BoundingBox::new(60.0, 80.0, 120.0, 240.0),
        );
        // Oscillates around the demo zone's center (400, 325)
        let cx = 400.0 + 120.0 * (t * 0.7).sin();
        let shopper = TrackedEntity::new(
            2,
            BoundingBox::new(cx - 30.0, 255.0, cx + 30.0, 395.0),
        );

        Ok(Some(FrameSnapshot::new(vec![loiterer, shopper])))
    }
}

/// Simulated scale firmware: keeps a true shelf mass, nudges it as bottles
/// are taken or returned, and reports threshold-crossing deltas the same way
/// the embedded program does — raw counts, median-of-burst, linear
/// calibration, `CHANGE:<n>` payloads.
async fn scale_simulator(tx: mpsc::Sender<String>, cancel_token: CancellationToken) {
    let calibration = Calibration::from_reference(TARE_VALUE, VALUE_WITH_WEIGHT, KNOWN_WEIGHT_G);
    let mut shelf_grams: f64 = 6.0 * BOTTLE_WEIGHT_G;
    let mut bottles_off_shelf: u32 = 0;
    let mut detector = DeltaDetector::new(shelf_grams, CHANGE_THRESHOLD_G);

    loop {
        tokio::select! {
            _ = tokio::time::sleep(std::time::Duration::from_secs(2)) => {}
            _ = cancel_token.cancelled() => break,
        }

        // Somebody interacts with the shelf now and then
        {
            let mut rng = rand::thread_rng();
            let roll: f64 = rng.gen();
            if roll < 0.35 {
                shelf_grams -= BOTTLE_WEIGHT_G;
                bottles_off_shelf += 1;
            } else if roll < 0.45 {
                shelf_grams -= 2.0 * BOTTLE_WEIGHT_G;
                bottles_off_shelf += 2;
            } else if roll < 0.60 && bottles_off_shelf > 0 {
                shelf_grams += BOTTLE_WEIGHT_G;
                bottles_off_shelf -= 1;
            }
        }

        // Burst-read the cell with some raw-count noise, then take the median
        let samples: Vec<i64> = {
            let mut rng = rand::thread_rng();
            (0..5)
                .map(|_| {
                    let true_raw =
                        TARE_VALUE as f64 + shelf_grams * calibration.ratio;
                    (true_raw + rng.gen_range(-200.0..200.0)) as i64
                })
                .collect()
        };
        let grams = calibration.grams(stable_reading(&samples));

        if let Some(delta) = detector.observe(grams) {
            let payload = format_payload(delta);
            info!("scale publishing: {payload}");
            if tx.send(payload).await.is_err() {
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let zone_store = Arc::new(ZoneStore::new(PathBuf::from(ZONE_CONFIG_PATH))?);
    info!("shelf zone: {:?}", zone_store.zone());

    let slot = EventSlot::new();
    let (payload_tx, payload_rx) = mpsc::channel(16);

    let mut ingest = IngestController::new();
    ingest.start(payload_rx, slot.clone())?;

    let sim_token = CancellationToken::new();
    let sim_handle = tokio::spawn(scale_simulator(payload_tx, sim_token.clone()));

    let mut pipeline = PipelineController::new();
    let frames_total = DEMO_RUN_SECS * 1000 / shelfwatch::pipeline::FRAME_INTERVAL_MS;
    pipeline.start(
        Box::new(ScriptedFeed::new(frames_total)),
        slot,
        zone_store.clone(),
        AttributionConfig::default(),
        TriggerStrategy::Proximity,
    )?;
    let mut view_rx = pipeline
        .subscribe()
        .context("pipeline started without a view channel")?;

    info!("demo running for {DEMO_RUN_SECS}s (ctrl-c to stop early)");
    let run = tokio::time::sleep(std::time::Duration::from_secs(DEMO_RUN_SECS));
    tokio::select! {
        _ = run => {}
        _ = tokio::signal::ctrl_c() => info!("interrupted, shutting down"),
    }

    sim_token.cancel();
    let _ = sim_handle.await;
    ingest.stop().await?;
    pipeline.stop().await?;

    let view = view_rx.borrow_and_update().clone();
    if view.counts.is_empty() {
        info!("no attributions this run");
    } else {
        let mut counts: Vec<_> = view.counts.iter().collect();
        counts.sort();
        for (id, n) in counts {
            info!("person #{id}: {n} unit(s) in cart");
        }
    }

    zone_store.save()?;
    Ok(())
}
