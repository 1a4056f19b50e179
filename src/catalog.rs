//! Static business descriptions for each segment label

/// Returned for labels the catalog does not know.
pub const FALLBACK_DESCRIPTION: &str = "No description available.";

const ENTRIES: [(&str, &str); 7] = [
    ("RETAIN", "High-value, regular customers. Focus on retention."),
    ("RE-ENGAGE", "Low-value, infrequent buyers. Target for re-engagement."),
    ("NURTURE", "Recent but low-value customers. Nurture for growth."),
    ("REWARD", "Top loyal customers. Reward their loyalty."),
    ("PAMPER", "High spenders, infrequent. Offer luxury/personalized services."),
    ("UPSELL", "Frequent buyers, low spend. Upsell opportunities."),
    ("DELIGHT", "Top-tier, frequent and high spenders. VIP treatment."),
];

/// Label to description mapping, fixed for the life of the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentCatalog;

impl SegmentCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Description for `label`, or [`FALLBACK_DESCRIPTION`].
    pub fn describe(&self, label: &str) -> &'static str {
        ENTRIES
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, description)| *description)
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        ENTRIES.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        let catalog = SegmentCatalog::new();
        assert_eq!(
            catalog.describe("DELIGHT"),
            "Top-tier, frequent and high spenders. VIP treatment."
        );
        assert_ne!(catalog.describe("RE-ENGAGE"), FALLBACK_DESCRIPTION);
        assert_eq!(catalog.entries().count(), 7);
        assert_eq!(catalog.entries().next().map(|(label, _)| label), Some("RETAIN"));
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let catalog = SegmentCatalog::new();
        for label in ["", "delight", "VIP", "RETAIN "] {
            assert_eq!(catalog.describe(label), FALLBACK_DESCRIPTION);
        }
    }
}
