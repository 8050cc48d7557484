//! Wall-clock text occasionally embedded in a strip on reset.

/// Source of the timestamp text written into strips.
pub trait ClockText {
    /// Current timestamp as printable ASCII.
    fn text(&self) -> String;
}

/// Local wall clock, formatted like `Thu Oct 16 2026 21:04:11 GMT+0200`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl ClockText for LocalClock {
    fn text(&self) -> String {
        chrono::Local::now()
            .format("%a %b %d %Y %H:%M:%S GMT%z")
            .to_string()
    }
}

/// Always returns the same text. Used for reproducible runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl ClockText for FixedClock {
    fn text(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_clock_is_printable_ascii() {
        let text = LocalClock.text();
        assert!(text.contains("GMT"));
        assert!(text.chars().all(|c| (' '..='~').contains(&c)), "{text}");
    }
}
