use crate::geometry::DETECTION_THRESHOLD_CM;
use crate::wire::decoder::TERMINATOR;
use serde::{Deserialize, Serialize};

/// One decoded sensor reading.
///
/// Both fields come from a single successfully parsed message; a partially
/// valid message never produces a `Sample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub angle_deg: i32,
    pub distance_cm: i32,
}

impl Sample {
    pub fn new(angle_deg: i32, distance_cm: i32) -> Self {
        Self {
            angle_deg,
            distance_cm,
        }
    }

    /// Encodes the sample as one wire frame, terminator included.
    pub fn to_wire(&self) -> String {
        format!(
            "{},{}{}",
            self.angle_deg, self.distance_cm, TERMINATOR as char
        )
    }
}

/// Holder for the most recent sample, replaced wholesale on each decode and
/// read by the renderer once per frame.
#[derive(Debug, Clone)]
pub struct SampleStore {
    current: Sample,
}

impl SampleStore {
    pub fn record(&mut self, sample: Sample) {
        self.current = sample;
    }

    pub fn current(&self) -> &Sample {
        &self.current
    }
}

impl Default for SampleStore {
    /// Starts at the detection threshold so no marker renders before the
    /// first valid frame arrives.
    fn default() -> Self {
        Self {
            current: Sample::new(0, DETECTION_THRESHOLD_CM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_encoding_is_terminator_delimited() {
        assert_eq!(Sample::new(45, 12).to_wire(), "45,12.");
        assert_eq!(Sample::new(-3, 0).to_wire(), "-3,0.");
    }

    #[test]
    fn default_store_sits_at_the_threshold() {
        let store = SampleStore::default();
        assert_eq!(store.current().angle_deg, 0);
        assert_eq!(store.current().distance_cm, DETECTION_THRESHOLD_CM);
    }

    #[test]
    fn record_replaces_the_sample_wholesale() {
        let mut store = SampleStore::default();
        store.record(Sample::new(60, 25));
        assert_eq!(*store.current(), Sample::new(60, 25));
    }
}
