use std::time::Duration;

/// Configuration for the event-to-person attribution policy.
#[derive(Debug, Clone)]
pub struct AttributionConfig {
    /// Grams per unit on this shelf; a delta of -700 at 350 g/unit counts
    /// as two units taken.
    pub unit_weight_grams: u32,

    /// When true, a positive delta (mass put back) decrements the nearest
    /// person's cart, floored at zero. Off by default: the shipped policy
    /// only logs restocks.
    pub restock_decrement: bool,

    /// How long the "last taker" highlight stays valid for rendering.
    pub highlight_duration: Duration,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            unit_weight_grams: 350,
            restock_decrement: false,
            highlight_duration: Duration::from_secs(2),
        }
    }
}
