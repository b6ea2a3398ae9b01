//! Supplier depot directory entries and per-depot stock availability.
//!
//! The depot code is the join key between the supplier's depot directory and
//! branch availability responses; depot names are free text and never used
//! for matching.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Depot name reported when a branch has no directory entry.
pub const UNKNOWN_DEPOT_NAME: &str = "Unknown";

/// Postal address of a depot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepotAddress {
    /// First address line.
    pub line1: String,
    /// Second address line.
    pub line2: String,
    /// Town or city.
    pub town: String,
    /// County.
    pub county: String,
    /// Postcode.
    pub postcode: String,
}

/// One entry in the supplier's depot directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepotDirectoryEntry {
    /// Stable depot identifier.
    pub depot_code: String,
    /// Display name.
    pub depot_name: String,
    /// Postal address.
    pub address: DepotAddress,
    /// Contact telephone number.
    pub telephone: String,
    /// Contact email address.
    pub email: String,
}

/// Quantity and price of one part at one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStock {
    /// Stable depot identifier.
    pub depot_code: String,
    /// Units available.
    pub quantity: u32,
    /// Unit price at this branch.
    pub price: Decimal,
}

/// Joined availability of one part at one depot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepotAvailability {
    /// Stable depot identifier.
    pub depot_code: String,
    /// Display name, or [`UNKNOWN_DEPOT_NAME`] without a directory match.
    pub depot_name: String,
    /// Postal address; empty without a directory match.
    pub address: DepotAddress,
    /// Contact telephone number.
    pub telephone: String,
    /// Contact email address.
    pub email: String,
    /// Units available.
    pub quantity: u32,
    /// Unit price at this depot.
    #[schema(value_type = String, example = "129.50")]
    pub price: Decimal,
}

/// Availability of one part across all reporting depots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepotAvailabilityReport {
    /// One entry per distinct depot code in the branch response.
    pub depots: Vec<DepotAvailability>,
    /// Sum of `quantity` over `depots`.
    pub total_available: u64,
}

impl DepotAvailabilityReport {
    /// Left-join branch rows onto the depot directory.
    ///
    /// Branch rows sharing a depot code collapse into one entry whose
    /// quantity is the sum of the rows and whose price is the first row's.
    /// Output order follows the first appearance of each depot code.
    ///
    /// # Examples
    /// ```
    /// use glasstrade::domain::{BranchStock, DepotAvailabilityReport};
    /// use rust_decimal::Decimal;
    ///
    /// let report = DepotAvailabilityReport::join(
    ///     Vec::new(),
    ///     vec![BranchStock {
    ///         depot_code: "LDS".to_owned(),
    ///         quantity: 4,
    ///         price: Decimal::new(12_500, 2),
    ///     }],
    /// );
    /// assert_eq!(report.total_available, 4);
    /// assert_eq!(report.depots[0].depot_name, "Unknown");
    /// ```
    pub fn join(directory: Vec<DepotDirectoryEntry>, branches: Vec<BranchStock>) -> Self {
        let mut directory: HashMap<String, DepotDirectoryEntry> = directory
            .into_iter()
            .map(|entry| (entry.depot_code.clone(), entry))
            .collect();

        let mut depots: Vec<DepotAvailability> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for branch in branches {
            if let Some(existing) = positions
                .get(&branch.depot_code)
                .and_then(|index| depots.get_mut(*index))
            {
                existing.quantity = existing.quantity.saturating_add(branch.quantity);
                continue;
            }
            positions.insert(branch.depot_code.clone(), depots.len());
            depots.push(joined_entry(directory.remove(&branch.depot_code), branch));
        }

        let total_available = depots.iter().map(|d| u64::from(d.quantity)).sum();
        Self {
            depots,
            total_available,
        }
    }
}

fn joined_entry(entry: Option<DepotDirectoryEntry>, branch: BranchStock) -> DepotAvailability {
    match entry {
        Some(entry) => DepotAvailability {
            depot_code: branch.depot_code,
            depot_name: entry.depot_name,
            address: entry.address,
            telephone: entry.telephone,
            email: entry.email,
            quantity: branch.quantity,
            price: branch.price,
        },
        None => DepotAvailability {
            depot_code: branch.depot_code,
            depot_name: UNKNOWN_DEPOT_NAME.to_owned(),
            address: DepotAddress::default(),
            telephone: String::new(),
            email: String::new(),
            quantity: branch.quantity,
            price: branch.price,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_entry(code: &str, name: &str) -> DepotDirectoryEntry {
        DepotDirectoryEntry {
            depot_code: code.to_owned(),
            depot_name: name.to_owned(),
            address: DepotAddress {
                town: "Leeds".to_owned(),
                ..DepotAddress::default()
            },
            telephone: "0113 000 0000".to_owned(),
            email: "depot@example.test".to_owned(),
        }
    }

    fn branch(code: &str, quantity: u32) -> BranchStock {
        BranchStock {
            depot_code: code.to_owned(),
            quantity,
            price: Decimal::new(9_999, 2),
        }
    }

    #[test]
    fn unmatched_branch_is_kept_with_defaulted_directory_fields() {
        let report = DepotAvailabilityReport::join(
            vec![directory_entry("LDS", "Leeds")],
            vec![branch("LDS", 2), branch("MAN", 5)],
        );

        assert_eq!(report.depots.len(), 2);
        assert_eq!(report.depots[0].depot_name, "Leeds");
        assert_eq!(report.depots[0].address.town, "Leeds");
        assert_eq!(report.depots[1].depot_code, "MAN");
        assert_eq!(report.depots[1].depot_name, UNKNOWN_DEPOT_NAME);
        assert_eq!(report.depots[1].address, DepotAddress::default());
        assert_eq!(report.total_available, 7);
    }

    #[test]
    fn directory_entries_without_stock_are_not_reported() {
        let report = DepotAvailabilityReport::join(
            vec![directory_entry("LDS", "Leeds"), directory_entry("BRS", "Bristol")],
            vec![branch("LDS", 0)],
        );

        assert_eq!(report.depots.len(), 1);
        assert_eq!(report.total_available, 0);
    }

    #[test]
    fn duplicate_depot_codes_collapse_into_one_entry() {
        let report = DepotAvailabilityReport::join(
            Vec::new(),
            vec![branch("LDS", 2), branch("MAN", 1), branch("LDS", 3)],
        );

        let codes: Vec<&str> = report.depots.iter().map(|d| d.depot_code.as_str()).collect();
        assert_eq!(codes, vec!["LDS", "MAN"]);
        assert_eq!(report.depots[0].quantity, 5);
        assert_eq!(report.total_available, 6);
    }
}
