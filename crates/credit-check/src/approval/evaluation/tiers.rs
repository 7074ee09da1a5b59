use serde::Serialize;

/// Named creditworthiness band: an inclusive score range plus the history it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalTier {
    pub name: String,
    pub min_score: u32,
    pub max_score: u32,
    pub min_duration_years: u32,
}

impl ApprovalTier {
    pub fn new(name: &str, min_score: u32, max_score: u32, min_duration_years: u32) -> Self {
        Self {
            name: name.to_string(),
            min_score,
            max_score,
            min_duration_years,
        }
    }

    pub fn contains(&self, score: u32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TierTableError {
    #[error("tier table must contain at least one tier")]
    Empty,
    #[error("tier '{tier}' has min score {min} above max score {max}")]
    InvertedRange { tier: String, min: u32, max: u32 },
    #[error("tier '{next}' overlaps or precedes tier '{previous}'")]
    Overlap { previous: String, next: String },
    #[error("scores between tier '{previous}' and tier '{next}' are not covered")]
    Gap { previous: String, next: String },
    #[error("tier '{next}' requires more history than lower tier '{previous}'")]
    DurationIncreases { previous: String, next: String },
}

/// Ordered tiers, lowest creditworthiness first.
///
/// Ranges are contiguous and non-overlapping, and minimum durations never increase as the
/// score band improves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierTable {
    tiers: Vec<ApprovalTier>,
}

impl TierTable {
    pub fn new(tiers: Vec<ApprovalTier>) -> Result<Self, TierTableError> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }

        for tier in &tiers {
            if tier.min_score > tier.max_score {
                return Err(TierTableError::InvertedRange {
                    tier: tier.name.clone(),
                    min: tier.min_score,
                    max: tier.max_score,
                });
            }
        }

        for pair in tiers.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            let names = || (previous.name.clone(), next.name.clone());

            if next.min_score <= previous.max_score {
                let (previous, next) = names();
                return Err(TierTableError::Overlap { previous, next });
            }
            if next.min_score != previous.max_score + 1 {
                let (previous, next) = names();
                return Err(TierTableError::Gap { previous, next });
            }
            if next.min_duration_years > previous.min_duration_years {
                let (previous, next) = names();
                return Err(TierTableError::DurationIncreases { previous, next });
            }
        }

        Ok(Self { tiers })
    }

    /// Default bands: poor through exceptional.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                ApprovalTier::new("poor", 300, 499, 10),
                ApprovalTier::new("fair", 500, 599, 7),
                ApprovalTier::new("good", 600, 699, 5),
                ApprovalTier::new("very_good", 700, 749, 3),
                ApprovalTier::new("excellent", 750, 799, 1),
                ApprovalTier::new("exceptional", 800, 850, 0),
            ],
        }
    }

    pub fn tiers(&self) -> &[ApprovalTier] {
        &self.tiers
    }

    pub fn tier_for(&self, score: u32) -> Option<&ApprovalTier> {
        self.tiers.iter().find(|tier| tier.contains(score))
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_satisfies_invariants() {
        let standard = TierTable::standard();
        let rebuilt = TierTable::new(standard.tiers().to_vec()).expect("standard table valid");
        assert_eq!(rebuilt, standard);
    }

    #[test]
    fn lookup_uses_inclusive_ranges() {
        let table = TierTable::standard();
        assert_eq!(table.tier_for(499).map(|t| t.name.as_str()), Some("poor"));
        assert_eq!(table.tier_for(500).map(|t| t.name.as_str()), Some("fair"));
        assert_eq!(
            table.tier_for(850).map(|t| t.name.as_str()),
            Some("exceptional")
        );
        assert!(table.tier_for(299).is_none());
        assert!(table.tier_for(851).is_none());
    }

    #[test]
    fn rejects_gaps_and_overlaps() {
        let gap = TierTable::new(vec![
            ApprovalTier::new("low", 300, 499, 5),
            ApprovalTier::new("high", 501, 850, 0),
        ]);
        assert!(matches!(gap, Err(TierTableError::Gap { .. })));

        let overlap = TierTable::new(vec![
            ApprovalTier::new("low", 300, 520, 5),
            ApprovalTier::new("high", 500, 850, 0),
        ]);
        assert!(matches!(overlap, Err(TierTableError::Overlap { .. })));
    }

    #[test]
    fn rejects_increasing_duration_and_inverted_ranges() {
        let increasing = TierTable::new(vec![
            ApprovalTier::new("low", 300, 499, 2),
            ApprovalTier::new("high", 500, 850, 4),
        ]);
        assert!(matches!(
            increasing,
            Err(TierTableError::DurationIncreases { .. })
        ));

        let inverted = TierTable::new(vec![ApprovalTier::new("only", 700, 600, 0)]);
        assert!(matches!(inverted, Err(TierTableError::InvertedRange { .. })));
        assert_eq!(TierTable::new(Vec::new()), Err(TierTableError::Empty));
    }
}
