//! Regional availability: pharmacy lookup by region, region selection
//! state, and availability banding.
//!
//! Region associations are plain string equality on the region id. A typo
//! or an unknown region yields an empty result, never an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::Thresholds;
use crate::models::{PharmacyListing, RegionRecord, ALL_REGIONS};

/// Region shown when the user location is "All Regions".
pub const DEFAULT_REGION: &str = "Central";

static STOCK_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<name>[^()\s][^()]*?)\s*\((?P<qty>\d+)\)\s*$").expect("stock fragment pattern")
});

/// Pharmacies whose region tag equals `region_id` exactly.
pub fn pharmacies_in_region<'a>(
    pharmacies: &'a [PharmacyListing],
    region_id: &str,
) -> Vec<&'a PharmacyListing> {
    let matched: Vec<&PharmacyListing> = pharmacies
        .iter()
        .filter(|p| p.region == region_id)
        .collect();
    tracing::debug!(region = region_id, matched = matched.len(), "Filtered pharmacies by region");
    matched
}

pub fn find_region<'a>(regions: &'a [RegionRecord], id: &str) -> Option<&'a RegionRecord> {
    regions.iter().find(|r| r.id == id)
}

/// Which region the availability screen shows, kept in step with the
/// user's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSelection {
    last_location: String,
    selected: String,
}

impl RegionSelection {
    pub fn new(user_location: &str) -> Self {
        let selected = if user_location == ALL_REGIONS {
            DEFAULT_REGION.to_string()
        } else {
            user_location.to_string()
        };
        Self {
            last_location: user_location.to_string(),
            selected,
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Explicit pick from the region list.
    pub fn select(&mut self, region_id: &str) {
        self.selected = region_id.to_string();
    }

    /// Follow a changed user location. Switching to "All Regions" keeps
    /// whatever region is currently shown.
    pub fn sync_location(&mut self, user_location: &str) {
        if user_location == self.last_location {
            return;
        }
        self.last_location = user_location.to_string();
        if user_location != ALL_REGIONS {
            self.selected = user_location.to_string();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityBand {
    Good,
    Fair,
    Poor,
}

impl AvailabilityBand {
    pub fn bar_color(&self) -> &'static str {
        match self {
            Self::Good => "bg-emerald-500",
            Self::Fair => "bg-amber-500",
            Self::Poor => "bg-red-500",
        }
    }

    pub fn card_color(&self) -> &'static str {
        match self {
            Self::Good => "bg-emerald-500/20 border-emerald-500/50",
            Self::Fair => "bg-amber-500/20 border-amber-500/50",
            Self::Poor => "bg-red-500/20 border-red-500/50",
        }
    }
}

pub fn availability_band(percentage: u8, thresholds: &Thresholds) -> AvailabilityBand {
    if percentage >= thresholds.region_good_pct {
        AvailabilityBand::Good
    } else if percentage >= thresholds.region_fair_pct {
        AvailabilityBand::Fair
    } else {
        AvailabilityBand::Poor
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLine {
    pub medication: String,
    pub quantity: u32,
}

/// Parse a summary like "Amoxicillin (156), Metformin (245)".
/// Fragments that do not look like `name (count)` are skipped.
pub fn parse_stock_summary(summary: &str) -> Vec<StockLine> {
    summary
        .split(',')
        .filter_map(|fragment| {
            let caps = STOCK_FRAGMENT.captures(fragment)?;
            let quantity = caps["qty"].parse().ok()?;
            Some(StockLine {
                medication: caps["name"].to_string(),
                quantity,
            })
        })
        .collect()
}

/// Where a medication is well stocked and where it is short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MedicationRegions<'a> {
    pub well_stocked: Vec<&'a str>,
    pub shortage: Vec<&'a str>,
}

pub fn medication_regions<'a>(regions: &'a [RegionRecord], medication: &str) -> MedicationRegions<'a> {
    let mut result = MedicationRegions::default();
    for region in regions {
        if region.main_meds.iter().any(|m| m == medication) {
            result.well_stocked.push(region.id.as_str());
        }
        if region.shortages.iter().any(|m| m == medication) {
            result.shortage.push(region.id.as_str());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    #[test]
    fn north_returns_only_north() {
        let data = ReferenceData::bundled().unwrap();
        let north = pharmacies_in_region(&data.pharmacies, "North");
        assert_eq!(north.len(), 1);
        assert!(north.iter().all(|p| p.region == "North"));
        assert_eq!(north[0].name, "North Star Pharmacy");
    }

    #[test]
    fn unknown_region_is_empty() {
        let data = ReferenceData::bundled().unwrap();
        assert!(pharmacies_in_region(&data.pharmacies, "Atlantis").is_empty());
        assert!(pharmacies_in_region(&data.pharmacies, "central").is_empty());
        assert!(pharmacies_in_region(&data.pharmacies, "West").is_empty());
    }

    #[test]
    fn central_keeps_order() {
        let data = ReferenceData::bundled().unwrap();
        let ids: Vec<u32> = pharmacies_in_region(&data.pharmacies, "Central")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn find_region_by_id() {
        let data = ReferenceData::bundled().unwrap();
        assert_eq!(find_region(&data.regions, "East").unwrap().name, "East Valley");
        assert!(find_region(&data.regions, "Atlantis").is_none());
    }

    #[test]
    fn selection_defaults_to_central() {
        assert_eq!(RegionSelection::new("All Regions").selected(), "Central");
        assert_eq!(RegionSelection::new("South").selected(), "South");
    }

    #[test]
    fn selection_follows_named_location() {
        let mut sel = RegionSelection::new("All Regions");
        sel.select("East");
        sel.sync_location("All Regions");
        assert_eq!(sel.selected(), "East");
        sel.sync_location("North");
        assert_eq!(sel.selected(), "North");
        sel.select("West");
        sel.sync_location("North");
        assert_eq!(sel.selected(), "West");
        sel.sync_location("All Regions");
        assert_eq!(sel.selected(), "West");
    }

    #[test]
    fn availability_bands() {
        let t = Thresholds::default();
        assert_eq!(availability_band(85, &t), AvailabilityBand::Good);
        assert_eq!(availability_band(80, &t), AvailabilityBand::Good);
        assert_eq!(availability_band(62, &t), AvailabilityBand::Fair);
        assert_eq!(availability_band(59, &t), AvailabilityBand::Poor);
        assert_eq!(AvailabilityBand::Poor.bar_color(), "bg-red-500");
    }

    #[test]
    fn parses_stock_summary() {
        let lines = parse_stock_summary("Amoxicillin (156), Metformin (245)");
        assert_eq!(
            lines,
            vec![
                StockLine {
                    medication: "Amoxicillin".into(),
                    quantity: 156
                },
                StockLine {
                    medication: "Metformin".into(),
                    quantity: 245
                },
            ]
        );
    }

    #[test]
    fn malformed_fragments_skipped() {
        let lines = parse_stock_summary("Aspirin, Lisinopril (28), (12), Ibuprofen (x)");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].medication, "Lisinopril");
        assert!(parse_stock_summary("").is_empty());
    }

    #[test]
    fn blank_name_is_skipped() {
        assert!(parse_stock_summary(" (12)").is_empty());
        assert!(parse_stock_summary("   (4),  ").is_empty());
        let lines = parse_stock_summary("  Omeprazole   (167) ");
        assert_eq!(lines[0].medication, "Omeprazole");
        assert_eq!(lines[0].quantity, 167);
    }

    #[test]
    fn medication_region_lookup() {
        let data = ReferenceData::bundled().unwrap();
        let amox = medication_regions(&data.regions, "Amoxicillin");
        assert_eq!(amox.well_stocked, vec!["Central", "East"]);
        assert_eq!(amox.shortage, vec!["North", "South", "West"]);
        let none = medication_regions(&data.regions, "Unobtainium");
        assert!(none.well_stocked.is_empty() && none.shortage.is_empty());
    }
}
