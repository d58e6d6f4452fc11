// src/crawl/progress.rs
// =============================================================================
// Rough progress estimate for a crawl.
//
// We never know the size of a site up front, so the estimate is simple:
// every time a page finishes, advance by 100 / (URLs found so far). Early
// pages move the bar a lot, later pages barely at all. The running total can
// pass 100 on link-poor sites; `percent()` clamps it for display, `total()`
// keeps the raw value.
// =============================================================================

/// Units in a full bar
pub const PROGRESS_UNITS: f64 = 100.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    total: f64,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances by 100 / found and returns the increment.
    /// Does nothing when no URL has been found yet.
    pub fn advance(&mut self, found: usize) -> f64 {
        if found == 0 {
            return 0.0;
        }
        let step = PROGRESS_UNITS / found as f64;
        self.total += step;
        step
    }

    /// Raw accumulated units, may exceed 100
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Display value in [0, 100]
    pub fn percent(&self) -> f64 {
        self.total.clamp(0.0, PROGRESS_UNITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_shrinks_as_found_grows() {
        let mut progress = Progress::new();
        assert_eq!(progress.advance(1), 100.0);
        assert_eq!(progress.advance(4), 25.0);
        assert_eq!(progress.total(), 125.0);
    }

    #[test]
    fn test_percent_is_clamped() {
        let mut progress = Progress::new();
        progress.advance(1);
        progress.advance(2);
        assert_eq!(progress.total(), 150.0);
        assert_eq!(progress.percent(), 100.0);
    }

    #[test]
    fn test_nothing_found_no_change() {
        let mut progress = Progress::new();
        assert_eq!(progress.advance(0), 0.0);
        assert_eq!(progress.total(), 0.0);
    }
}
