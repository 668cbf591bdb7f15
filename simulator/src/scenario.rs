use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An angular sector holding a simulated object at a fixed distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSector {
    pub from_deg: i32,
    pub to_deg: i32,
    pub distance_cm: i32,
}

impl ObjectSector {
    pub fn contains(&self, angle_deg: i32) -> bool {
        angle_deg >= self.from_deg && angle_deg <= self.to_deg
    }
}

/// Sweep scenario: cadence, background distance, and object placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Degrees advanced per emitted frame.
    pub step_deg: i32,
    pub interval_ms: u64,
    /// Distance reported where no sector matches; at or beyond the
    /// detection threshold this reads as "no object".
    pub background_cm: i32,
    pub jitter_cm: i32,
    pub seed: u64,
    pub objects: Vec<ObjectSector>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            step_deg: 2,
            interval_ms: 33,
            background_cm: 80,
            jitter_cm: 0,
            seed: 0,
            objects: vec![ObjectSector {
                from_deg: 60,
                to_deg: 80,
                distance_cm: 25,
            }],
        }
    }
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario {}", path_ref.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario {}", path_ref.display()))?;
        Ok(config)
    }
}
