/// Fires once every `floor(period) + 1` calls to [`advance`](Self::advance).
///
/// Periods are fractional because they come from bell draws; the
/// comparison against the integer counter does the rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    period: f32,
    count: u32,
}

impl Ticker {
    /// Ticker that first fires after `floor(period) + 1` ticks.
    pub fn new(period: f32) -> Self {
        Self { period, count: 0 }
    }

    /// Count one tick; `true` on a period boundary.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.count += 1;
        if self.count as f32 > self.period {
            self.count = 0;
            true
        } else {
            false
        }
    }
}
