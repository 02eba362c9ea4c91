use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

/// Prefix the scale firmware puts on every delta report.
const CHANGE_PREFIX: &str = "CHANGE:";

/// One weight change on the shelf: signed grams since the previous stable
/// reading. Negative means mass left the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightEvent {
    pub delta_grams: i32,
    pub received_at: DateTime<Utc>,
}

impl WeightEvent {
    pub fn new(delta_grams: i32) -> Self {
        Self {
            delta_grams,
            received_at: Utc::now(),
        }
    }
}

/// Parse a raw transport payload of the form `CHANGE:<signed integer>`.
/// Anything else is an error; the listener logs and drops it.
pub fn parse_payload(payload: &str) -> Result<i32> {
    let rest = payload
        .strip_prefix(CHANGE_PREFIX)
        .ok_or_else(|| anyhow!("payload missing '{CHANGE_PREFIX}' prefix: {payload:?}"))?;
    rest.trim()
        .parse::<i32>()
        .with_context(|| format!("payload has non-integer delta: {payload:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_delta() {
        assert_eq!(parse_payload("CHANGE:-350").unwrap(), -350);
    }

    #[test]
    fn parses_positive_delta() {
        assert_eq!(parse_payload("CHANGE:400").unwrap(), 400);
    }

    #[test]
    fn tolerates_surrounding_whitespace_on_value() {
        assert_eq!(parse_payload("CHANGE: -70 ").unwrap(), -70);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(parse_payload("-350").is_err());
        assert!(parse_payload("WEIGHT:-350").is_err());
    }

    #[test]
    fn rejects_garbage_value() {
        assert!(parse_payload("CHANGE:abc").is_err());
        assert!(parse_payload("CHANGE:").is_err());
        assert!(parse_payload("").is_err());
    }
}
