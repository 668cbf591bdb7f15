use crate::scenario::ScenarioConfig;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sweepcore::prelude::Sample;

/// Emits one sample per call while bouncing the sweep across [0, 180].
pub struct SweepGenerator {
    scenario: ScenarioConfig,
    angle_deg: i32,
    direction: i32,
    rng: StdRng,
}

impl SweepGenerator {
    pub fn new(scenario: ScenarioConfig) -> Self {
        let rng = StdRng::seed_from_u64(scenario.seed);
        Self {
            scenario,
            angle_deg: 0,
            direction: 1,
            rng,
        }
    }

    pub fn next_sample(&mut self) -> Sample {
        let sample = Sample::new(self.angle_deg, self.distance_at(self.angle_deg));
        self.advance();
        sample
    }

    fn distance_at(&mut self, angle_deg: i32) -> i32 {
        let base = self
            .scenario
            .objects
            .iter()
            .find(|sector| sector.contains(angle_deg))
            .map(|sector| sector.distance_cm)
            .unwrap_or(self.scenario.background_cm);

        let jitter = self.scenario.jitter_cm;
        let jittered = if jitter > 0 {
            base + self.rng.gen_range(-jitter..=jitter)
        } else {
            base
        };
        jittered.max(0)
    }

    fn advance(&mut self) {
        let step = self.scenario.step_deg.max(1);
        self.angle_deg += self.direction * step;
        if self.angle_deg >= 180 {
            self.angle_deg = 180;
            self.direction = -1;
        } else if self.angle_deg <= 0 {
            self.angle_deg = 0;
            self.direction = 1;
        }
    }
}
