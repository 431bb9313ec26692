//! NDIS budget ledger types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// NDIS funding category a shift's cost is drawn from.
///
/// Day and evening shifts draw from community access; night and sleepover
/// shifts draw from supported independent living.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingCategory {
    /// Daytime/evening community participation supports.
    CommunityAccess,
    /// Supported Independent Living (overnight supports).
    Sil,
}

impl std::fmt::Display for FundingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FundingCategory::CommunityAccess => write!(f, "community_access"),
            FundingCategory::Sil => write!(f, "sil"),
        }
    }
}

/// Remaining balance for one client in one funding category.
///
/// Mutated in place by subtraction; there is no transaction log beyond the
/// optional free-text note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLedgerEntry {
    /// The client this balance belongs to.
    pub client_id: Uuid,
    /// The funding category.
    pub category: FundingCategory,
    /// Remaining balance in dollars.
    pub remaining: Decimal,
    /// Optional free-text note describing the most recent activity.
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(
            format!("{}", FundingCategory::CommunityAccess),
            "community_access"
        );
        assert_eq!(format!("{}", FundingCategory::Sil), "sil");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&FundingCategory::CommunityAccess).unwrap();
        assert_eq!(json, "\"community_access\"");

        let deserialized: FundingCategory = serde_json::from_str("\"sil\"").unwrap();
        assert_eq!(deserialized, FundingCategory::Sil);
    }

    #[test]
    fn test_ledger_entry_round_trip() {
        let entry = BudgetLedgerEntry {
            client_id: Uuid::new_v4(),
            category: FundingCategory::Sil,
            remaining: Decimal::new(150000, 2), // 1500.00
            note: Some("initial plan allocation".to_string()),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: BudgetLedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
