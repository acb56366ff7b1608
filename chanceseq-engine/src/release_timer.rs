//! Hold-off timer between manual step selection and clock advancement.

/// Default ceiling: 100 seconds of ticks at 192 kHz.
pub const DEFAULT_CEILING: u32 = 100 * 192_000;

/// The clock may only advance once more than this many ticks have passed
/// since a manual index-setting input was last asserted.
pub const RELEASE_GUARD_TICKS: u32 = 1;

/// Saturating tick counter, reset whenever a trigger input, trigger button or
/// reset claims the step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseTimer {
    ticks: u32,
    ceiling: u32,
}

impl ReleaseTimer {
    pub fn new() -> Self {
        Self::with_ceiling(DEFAULT_CEILING)
    }

    pub fn with_ceiling(ceiling: u32) -> Self {
        Self {
            ticks: 0,
            ceiling: ceiling.max(RELEASE_GUARD_TICKS + 1),
        }
    }

    #[inline]
    pub fn tick(&mut self) {
        if self.ticks < self.ceiling {
            self.ticks += 1;
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.ticks
    }

    /// Whether clock advancement is allowed this tick.
    #[inline]
    pub fn released(&self) -> bool {
        self.ticks > RELEASE_GUARD_TICKS
    }
}

impl Default for ReleaseTimer {
    fn default() -> Self {
        Self::new()
    }
}
