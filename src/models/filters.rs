use std::str::FromStr;

use crate::error::EngineError;

use super::enums::{AlertSeverity, AlertStatus, Availability, InventoryStatus, RiskLevel};

/// Sentinel region selector that matches every region.
pub const ALL_REGIONS: &str = "All Regions";

/// "all" or exactly one enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<T> {
    All,
    Only(T),
}

impl<T> Default for StatusFilter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> StatusFilter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr<Err = EngineError>> FromStr for StatusFilter<T> {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

pub type AvailabilityFilter = StatusFilter<Availability>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionSelector {
    #[default]
    AllRegions,
    Named(String),
}

impl RegionSelector {
    pub fn matches(&self, region: &str) -> bool {
        match self {
            Self::AllRegions => true,
            Self::Named(name) => name == region,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::AllRegions => ALL_REGIONS,
            Self::Named(name) => name,
        }
    }
}

impl From<&str> for RegionSelector {
    fn from(s: &str) -> Self {
        if s == ALL_REGIONS {
            Self::AllRegions
        } else {
            Self::Named(s.to_string())
        }
    }
}

/// Criteria for the customer medication search.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationCriteria {
    pub query: String,
    pub availability: AvailabilityFilter,
    /// Inclusive upper price bound; the lower bound is always 0.
    pub price_ceiling: f64,
    pub region: RegionSelector,
}

impl Default for MedicationCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            availability: StatusFilter::All,
            price_ceiling: 500.0,
            region: RegionSelector::AllRegions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockCriteria {
    pub query: String,
    pub status: StatusFilter<InventoryStatus>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertCriteria {
    pub query: String,
    pub severity: StatusFilter<AlertSeverity>,
    pub status: StatusFilter<AlertStatus>,
}

pub type RiskFilter = StatusFilter<RiskLevel>;
