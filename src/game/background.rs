//! Ambient background drift and UI pulse rules. The gradient hue creeps
//! forward every tenth placement while saturation/lightness shift even more
//! slowly, so the canvas darkens almost imperceptibly as the artwork grows.

const START_HUE: i64 = 200;
const HUE_STEP: i64 = 5;

/// Background gradient state; only the hue persists between placements.
pub struct Background {
    hue: i64,
}

impl Background {
    pub fn new() -> Self {
        Self { hue: START_HUE }
    }

    pub fn hue(&self) -> i64 {
        self.hue
    }

    /// Advance the drift for the given cumulative dancer count and return
    /// the CSS background value to apply. The hue only moves on every tenth
    /// placement (count 0 included, matching the initial paint).
    pub fn evolve(&mut self, dancer_count: u32) -> String {
        let count = dancer_count as i64;
        if count % 10 == 0 {
            self.hue = (self.hue + HUE_STEP) % 360;
        }

        let saturation = 25 + count / 20;
        let lightness = 88 - count / 30;

        format!(
            "linear-gradient(135deg, hsl({}, {}%, {}%), hsl({}, {}%, {}%))",
            self.hue,
            saturation.min(40),
            lightness.max(75),
            (self.hue + 25) % 360,
            (saturation + 8).min(45),
            (lightness + 3).max(78),
        )
    }

    /// Reset to the starting hue and return the fresh gradient.
    pub fn reset(&mut self) -> String {
        self.hue = START_HUE;
        self.evolve(0)
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

/// The page title joins the dance every fifteenth placement.
pub fn title_pulse(dancer_count: u32) -> bool {
    dancer_count > 0 && dancer_count % 15 == 0
}
