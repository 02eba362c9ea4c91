pub mod controller;
pub mod listener;
pub mod payload;
pub mod slot;

pub use controller::IngestController;
pub use payload::{parse_payload, WeightEvent};
pub use slot::EventSlot;
