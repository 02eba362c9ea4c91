pub mod algorithm;
pub mod config;
pub mod trigger;

pub use algorithm::{attribute, nearest_entity, Attribution};
pub use config::AttributionConfig;
pub use trigger::{Trigger, TriggerStrategy};
