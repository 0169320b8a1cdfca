//! Candidate gene-name generation
//!
//! Gene families are numbered (`Atg1`, `Atg2`, ...), so the feature flow
//! profiles a base name across a numeric suffix range. The series is an
//! explicit, finite, restartable component rather than a hard-coded loop,
//! so other naming conventions can replace it without touching the
//! pipeline.

/// Default number of suffixed candidates to generate.
pub const DEFAULT_CANDIDATE_COUNT: u32 = 49;

/// Finite series of candidate gene names: `base1`, `base2`, ... `baseN`.
#[derive(Debug, Clone)]
pub struct NameSeries {
    base: String,
    count: u32,
}

impl NameSeries {
    pub fn new(base: impl Into<String>, count: u32) -> Self {
        Self {
            base: base.into(),
            count,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The candidate names, in suffix order. Restartable.
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.count).map(move |n| format!("{}{}", self.base, n))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_series_order_and_bounds() {
        let series = NameSeries::new("Atg", 3);
        let names: Vec<String> = series.iter().collect();
        assert_eq!(names, vec!["Atg1", "Atg2", "Atg3"]);
    }

    #[test]
    fn test_series_is_restartable() {
        let series = NameSeries::new("Vps", 2);
        assert_eq!(series.iter().count(), 2);
        assert_eq!(series.iter().count(), 2);
    }

    #[test]
    fn test_empty_series() {
        let series = NameSeries::new("Atg", 0);
        assert!(series.is_empty());
        assert_eq!(series.iter().count(), 0);
    }
}
