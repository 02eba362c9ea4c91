pub mod attribution;
pub mod cart;
pub mod events;
pub mod pipeline;
pub mod scale;
pub mod settings;
pub mod tracking;
pub mod utils;
pub mod zone;

pub use attribution::{attribute, Attribution, AttributionConfig, TriggerStrategy};
pub use cart::CartLedger;
pub use events::{EventSlot, IngestController, WeightEvent};
pub use pipeline::{PipelineController, ShelfView};
pub use settings::ZoneStore;
pub use tracking::{BoundingBox, FrameSnapshot, TrackFeed, TrackedEntity};
pub use zone::{Zone, ZoneEditor};
