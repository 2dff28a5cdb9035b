//! Priority tiering of extracted suggestion lines.
//!
//! Tiers are positional: the source list is consumed front to back as
//! three contiguous runs (high, then medium, then low). Anything past the
//! third run is dropped.

use super::models::{ImprovementSuggestions, Suggestion};

pub const MAX_HIGH: usize = 3;
pub const MAX_MEDIUM: usize = 2;
pub const MAX_LOW: usize = 2;

/// How many lines each tier takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSizes {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierSizes {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// A tiering policy maps the number of extracted lines to tier sizes.
pub type TierPolicy = fn(usize) -> TierSizes;

/// high = min(3, ceil(k/3)), medium = min(2, floor(k/3)), low = min(2, rest).
pub fn positional_tiers(total: usize) -> TierSizes {
    let high = total.div_ceil(3).min(MAX_HIGH);
    let medium = (total / 3).min(MAX_MEDIUM);
    let low = total.saturating_sub(high + medium).min(MAX_LOW);
    TierSizes { high, medium, low }
}

/// Distributes `lines` into tiers sized by `policy`.
pub fn assign_tiers(lines: Vec<String>, policy: TierPolicy) -> ImprovementSuggestions {
    let sizes = policy(lines.len());
    let mut lines = lines.iter().map(|line| Suggestion::from_line(line));

    let high_priority = lines.by_ref().take(sizes.high).collect();
    let medium_priority = lines.by_ref().take(sizes.medium).collect();
    let low_priority = lines.take(sizes.low).collect();

    ImprovementSuggestions {
        high_priority,
        medium_priority,
        low_priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(high: usize, medium: usize, low: usize) -> TierSizes {
        TierSizes { high, medium, low }
    }

    #[test]
    fn test_small_counts() {
        assert_eq!(positional_tiers(0), sizes(0, 0, 0));
        assert_eq!(positional_tiers(1), sizes(1, 0, 0));
        assert_eq!(positional_tiers(2), sizes(1, 0, 1));
        assert_eq!(positional_tiers(3), sizes(1, 1, 1));
        assert_eq!(positional_tiers(4), sizes(2, 1, 1));
        assert_eq!(positional_tiers(5), sizes(2, 1, 2));
    }

    #[test]
    fn test_caps_reached() {
        assert_eq!(positional_tiers(7), sizes(3, 2, 2));
        assert_eq!(positional_tiers(9), sizes(3, 2, 2));
        assert_eq!(positional_tiers(40), sizes(3, 2, 2));
    }

    #[test]
    fn test_conservation_up_to_seven() {
        for k in 0..30 {
            let s = positional_tiers(k);
            assert_eq!(s.total(), k.min(7), "k = {k}");
            assert_eq!(s.high, k.div_ceil(3).min(3));
            assert_eq!(s.medium, (k / 3).min(2));
        }
    }

    #[test]
    fn test_assign_tiers_is_contiguous_and_ordered() {
        let lines: Vec<String> = (1..=9).map(|i| format!("Item {i}: do {i}")).collect();
        let tiers = assign_tiers(lines, positional_tiers);

        fn titles(v: &[Suggestion]) -> Vec<String> {
            v.iter().map(|s| s.title.clone()).collect()
        }
        assert_eq!(titles(&tiers.high_priority), vec!["Item 1", "Item 2", "Item 3"]);
        assert_eq!(titles(&tiers.medium_priority), vec!["Item 4", "Item 5"]);
        assert_eq!(titles(&tiers.low_priority), vec!["Item 6", "Item 7"]);
        assert_eq!(tiers.len(), 7);
    }

    #[test]
    fn test_custom_policy() {
        fn everything_high(total: usize) -> TierSizes {
            TierSizes {
                high: total,
                medium: 0,
                low: 0,
            }
        }
        let lines = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        let tiers = assign_tiers(lines, everything_high);
        assert_eq!(tiers.high_priority.len(), 4);
        assert!(tiers.medium_priority.is_empty());
    }
}
