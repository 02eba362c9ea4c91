//! Raw load-cell readings to gram deltas: the shelf scale's conversion and
//! change-detection logic, kept here so the demo publisher (and tests) run
//! the same arithmetic the embedded firmware does.

/// Linear raw-to-grams calibration for the load-cell amplifier.
///
/// Derived from a two-point reference: the raw reading with nothing on the
/// scale (tare) and the raw reading with a known mass loaded.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    pub tare: i64,
    pub ratio: f64,
}

impl Calibration {
    /// `ratio = (loaded_raw - tare) / known_grams`; typically negative on
    /// these amplifiers because the raw count drops as load increases.
    pub fn from_reference(tare: i64, loaded_raw: i64, known_grams: f64) -> Self {
        Self {
            tare,
            ratio: (loaded_raw - tare) as f64 / known_grams,
        }
    }

    pub fn grams(&self, raw: i64) -> f64 {
        (raw - self.tare) as f64 / self.ratio
    }
}

/// Median of a sample window. The firmware reads a burst of raw samples and
/// takes the sorted middle to shrug off single-sample spikes.
pub fn stable_reading(samples: &[i64]) -> i64 {
    if samples.is_empty() {
        return 0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2]
}

/// Threshold the scale firmware uses before reporting a change.
pub const DEFAULT_CHANGE_THRESHOLD_GRAMS: f64 = 50.0;

/// Tracks the last stable weight and emits a rounded gram delta whenever the
/// current weight drifts past the threshold, then re-baselines. Changes
/// under the threshold are noise and produce nothing.
#[derive(Debug)]
pub struct DeltaDetector {
    baseline_grams: f64,
    threshold_grams: f64,
}

impl DeltaDetector {
    pub fn new(initial_grams: f64, threshold_grams: f64) -> Self {
        Self {
            baseline_grams: initial_grams,
            threshold_grams,
        }
    }

    pub fn observe(&mut self, current_grams: f64) -> Option<i32> {
        let change = current_grams - self.baseline_grams;
        if change.abs() > self.threshold_grams {
            self.baseline_grams = current_grams;
            Some(change.round() as i32)
        } else {
            None
        }
    }
}

/// Wire format the listener expects on the other end.
pub fn format_payload(delta_grams: i32) -> String {
    format!("CHANGE:{delta_grams}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference numbers from the bench calibration of the demo shelf.
    const TARE: i64 = 471_778;
    const LOADED: i64 = 256_326;
    const KNOWN_GRAMS: f64 = 480.0;

    #[test]
    fn calibration_maps_reference_points() {
        let cal = Calibration::from_reference(TARE, LOADED, KNOWN_GRAMS);
        assert!((cal.grams(TARE)).abs() < 1e-9);
        assert!((cal.grams(LOADED) - KNOWN_GRAMS).abs() < 1e-6);
    }

    #[test]
    fn stable_reading_is_the_median() {
        assert_eq!(stable_reading(&[5, 1, 900, 3, 4]), 4);
        assert_eq!(stable_reading(&[]), 0);
    }

    #[test]
    fn small_drift_stays_silent() {
        let mut detector = DeltaDetector::new(1000.0, DEFAULT_CHANGE_THRESHOLD_GRAMS);
        assert_eq!(detector.observe(1030.0), None);
        assert_eq!(detector.observe(980.0), None);
    }

    #[test]
    fn removal_past_threshold_emits_and_rebaselines() {
        let mut detector = DeltaDetector::new(1000.0, DEFAULT_CHANGE_THRESHOLD_GRAMS);
        assert_eq!(detector.observe(650.2), Some(-350));
        // Re-baselined at 650.2: the same weight again reports nothing
        assert_eq!(detector.observe(650.2), None);
        // Putting the bottle back reports the positive delta
        assert_eq!(detector.observe(1000.0), Some(350));
    }

    #[test]
    fn payload_matches_wire_format() {
        assert_eq!(format_payload(-350), "CHANGE:-350");
        assert_eq!(format_payload(400), "CHANGE:400");
        assert_eq!(crate::events::parse_payload(&format_payload(-700)).unwrap(), -700);
    }
}
