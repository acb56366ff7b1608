//! Schmitt-trigger style rising-edge detection for gate, clock and button lines.

/// Level at or above which a line latches high.
pub const HIGH_THRESHOLD: f32 = 1.0;
/// Level at or below which a line latches low.
pub const LOW_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Latch {
    /// Nothing seen yet: a high level here latches without an edge
    #[default]
    Unknown,
    Low,
    High,
}

/// Hysteresis comparator that reports a rising edge exactly once per
/// low-to-high crossing.
///
/// Levels between the two thresholds leave the latch alone, so a noisy line
/// hovering around 0.5 V never chatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeDetector {
    latch: Latch,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample. Returns true on the tick the line crosses up through
    /// `HIGH_THRESHOLD` after having been at or below `LOW_THRESHOLD`.
    #[inline]
    pub fn process(&mut self, level: f32) -> bool {
        match self.latch {
            Latch::High => {
                if level <= LOW_THRESHOLD {
                    self.latch = Latch::Low;
                }
                false
            }
            Latch::Low => {
                if level >= HIGH_THRESHOLD {
                    self.latch = Latch::High;
                    true
                } else {
                    false
                }
            }
            Latch::Unknown => {
                if level >= HIGH_THRESHOLD {
                    self.latch = Latch::High;
                } else if level <= LOW_THRESHOLD {
                    self.latch = Latch::Low;
                }
                false
            }
        }
    }

    /// Current latched level, without consuming an edge.
    #[inline]
    pub fn is_high(&self) -> bool {
        self.latch == Latch::High
    }

    pub fn reset(&mut self) {
        self.latch = Latch::Unknown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_edge_fires_once() {
        let mut d = EdgeDetector::new();
        assert!(!d.process(0.0));
        assert!(d.process(10.0));
        assert!(!d.process(10.0));
        assert!(d.is_high());
    }

    #[test]
    fn hysteresis_ignores_middle_band() {
        let mut d = EdgeDetector::new();
        d.process(0.0);
        assert!(d.process(1.0));
        // Dipping into the dead band does not re-arm
        assert!(!d.process(0.5));
        assert!(!d.process(1.2));
        assert!(d.is_high());
        // A real low does
        assert!(!d.process(0.1));
        assert!(!d.is_high());
        assert!(!d.process(0.9));
        assert!(d.process(1.0));
    }

    #[test]
    fn high_at_startup_is_not_an_edge() {
        let mut d = EdgeDetector::new();
        assert!(!d.process(5.0));
        assert!(d.is_high());
        assert!(!d.process(0.0));
        assert!(d.process(5.0));
    }

    #[test]
    fn nan_leaves_latch_alone() {
        let mut d = EdgeDetector::new();
        d.process(0.0);
        assert!(!d.process(f32::NAN));
        assert!(d.process(2.0));
    }

    #[test]
    fn reset_forgets_level() {
        let mut d = EdgeDetector::new();
        d.process(0.0);
        d.reset();
        assert!(!d.process(10.0));
    }
}
