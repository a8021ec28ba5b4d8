// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Count-up figures for the hero.

use kaymo_charts::{format_fixed, format_grouped};

/// A number that counts up from zero to `target` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedCounter {
    /// Final value.
    pub target: f64,
    /// Text before the number.
    pub prefix: &'static str,
    /// Text after the number.
    pub suffix: &'static str,
    /// Time to reach the target.
    pub duration_ms: f64,
}

impl AnimatedCounter {
    /// Creates a counter with no affixes and the default 2 s duration.
    pub const fn new(target: f64) -> Self {
        Self {
            target,
            prefix: "",
            suffix: "",
            duration_ms: 2000.0,
        }
    }

    /// Sets the prefix.
    pub const fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    /// Sets the suffix.
    pub const fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    /// Sets the duration.
    pub const fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Value shown `elapsed_ms` after the counter started.
    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        let progress = if self.duration_ms > 0.0 {
            (elapsed_ms.max(0.0) / self.duration_ms).min(1.0)
        } else {
            1.0
        };
        progress * self.target
    }

    /// Formatted text at `elapsed_ms`.
    ///
    /// Targets below one keep two decimals; anything else counts in whole, grouped units.
    pub fn text_at(&self, elapsed_ms: f64) -> String {
        let v = self.value_at(elapsed_ms);
        let number = if self.target < 1.0 {
            format_fixed(v, 2)
        } else {
            format_grouped(v)
        };
        format!("{}{number}{}", self.prefix, self.suffix)
    }

    /// Formatted final text.
    pub fn final_text(&self) -> String {
        self.text_at(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_linearly_then_holds() {
        let c = AnimatedCounter::new(686.0).with_suffix("K");
        assert_eq!(c.value_at(0.0), 0.0);
        assert_eq!(c.value_at(1000.0), 343.0);
        assert_eq!(c.value_at(5000.0), 686.0);
        assert_eq!(c.text_at(999.0), "342K");
        assert_eq!(c.final_text(), "686K");
    }

    #[test]
    fn small_targets_keep_two_decimals() {
        let c = AnimatedCounter::new(0.5).with_suffix("%");
        assert_eq!(c.text_at(1000.0), "0.25%");
        assert_eq!(c.final_text(), "0.50%");
    }

    #[test]
    fn large_values_are_grouped() {
        let c = AnimatedCounter::new(7310.0).with_prefix("$").with_duration(100.0);
        assert_eq!(c.final_text(), "$7,310");
    }

    #[test]
    fn headline_rate_floors_to_a_whole_percent() {
        let c = AnimatedCounter::new(1.03).with_suffix("%");
        assert_eq!(c.final_text(), "1%");
    }

    #[test]
    fn zero_duration_shows_the_target() {
        let c = AnimatedCounter::new(47.0).with_duration(0.0);
        assert_eq!(c.value_at(0.0), 47.0);
    }
}
