//! Per-frame color animation.

/// Fixed per-frame step of the oscillator.
const STEP: f32 = 0.05;

/// Green channel of the animated color.
const GREEN: f32 = 0.3;

/// Blue channel of the animated color.
const BLUE: f32 = 0.8;

/// Triangle-wave oscillator driving the quad's red channel.
///
/// Starts at `0.5` moving upward and bounces between `0.0` and `1.0` in
/// fixed steps, one step per frame.
#[derive(Debug, Clone)]
pub struct ColorPulse {
    value: f32,
    step: f32,
}

impl ColorPulse {
    /// Create an oscillator at the starting value of `0.5`, increasing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: 0.5,
            step: STEP,
        }
    }

    /// Advance one frame, returning the new red channel value.
    ///
    /// The value is pinned to the `[0.0, 1.0]` endpoints when a step would
    /// overshoot, and the direction reverses there.
    pub fn tick(&mut self) -> f32 {
        self.value += self.step;
        if self.value >= 1.0 {
            self.value = 1.0;
            self.step = -STEP;
        } else if self.value <= 0.0 {
            self.value = 0.0;
            self.step = STEP;
        }
        self.value
    }

    /// The full RGBA color for the current value.
    ///
    /// Only the red channel animates; green, blue, and alpha are fixed.
    #[must_use]
    pub fn color(&self) -> [f32; 4] {
        [self.value, GREEN, BLUE, 1.0]
    }
}

impl Default for ColorPulse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_within_the_unit_interval() {
        let mut pulse = ColorPulse::new();
        for _ in 0..1000 {
            let value = pulse.tick();
            assert!((0.0..=1.0).contains(&value), "value {value} out of range");
        }
    }

    #[test]
    fn reaches_both_endpoints() {
        let mut pulse = ColorPulse::new();
        let mut hit_top = false;
        let mut hit_bottom = false;
        for _ in 0..100 {
            let value = pulse.tick();
            if (value - 1.0).abs() < f32::EPSILON {
                hit_top = true;
            }
            if value.abs() < f32::EPSILON {
                hit_bottom = true;
            }
        }
        assert!(hit_top, "never reached 1.0");
        assert!(hit_bottom, "never reached 0.0");
    }

    #[test]
    fn moves_in_fixed_steps() {
        let mut pulse = ColorPulse::new();
        let mut previous = pulse.tick();
        for _ in 0..200 {
            let value = pulse.tick();
            let delta = (value - previous).abs();
            // A full step everywhere except at a pinned endpoint.
            assert!(delta <= STEP + 1e-6, "step {delta} too large");
            assert!(delta > 0.0, "oscillator stalled at {value}");
            previous = value;
        }
    }

    #[test]
    fn reverses_direction_at_the_top() {
        let mut pulse = ColorPulse::new();
        // 0.5 start, so the ceiling is roughly ten steps away.
        let mut value = pulse.tick();
        for _ in 0..20 {
            if (value - 1.0).abs() < f32::EPSILON {
                break;
            }
            value = pulse.tick();
        }
        assert_eq!(value, 1.0, "never pinned to the ceiling");
        assert!(pulse.tick() < 1.0);
    }

    #[test]
    fn color_animates_only_the_red_channel() {
        let mut pulse = ColorPulse::new();
        let before = pulse.color();
        pulse.tick();
        let after = pulse.color();
        assert!((before[0] - after[0]).abs() > 0.0);
        assert_eq!(before[1..], after[1..]);
    }
}
