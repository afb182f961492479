//! List filtering for every search and filter bar.
//!
//! All filters keep the input order and never invent records: the output
//! is always a borrowed subset of the input slice.

use serde::Serialize;

use crate::models::enums::InventoryStatus;
use crate::models::{
    AlertCriteria, AlertRecord, MedicationCriteria, MedicationRecord, PredictionRecord,
    RiskFilter, StockCriteria, StockItem, ALL_REGIONS,
};

// ═══════════════════════════════════════════
// Medication search
// ═══════════════════════════════════════════

/// Result of a medication search.
///
/// `NotFiltered` means no criteria were supplied yet; `Empty` means criteria
/// were applied and nothing matched, which the search screen renders as an
/// explicit "no results" state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "records", rename_all = "snake_case")]
pub enum SearchOutcome<'a> {
    NotFiltered,
    Empty,
    Matches(Vec<&'a MedicationRecord>),
}

impl<'a> SearchOutcome<'a> {
    pub fn records(&self) -> &[&'a MedicationRecord] {
        match self {
            Self::Matches(records) => records,
            Self::NotFiltered | Self::Empty => &[],
        }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Whether one record passes every criterion.
pub fn medication_matches(record: &MedicationRecord, criteria: &MedicationCriteria) -> bool {
    let query = criteria.query.to_lowercase();
    let matches_search = contains_ignore_case(&record.name, &query)
        || contains_ignore_case(&record.description, &query);
    let matches_filter = criteria.availability.matches(&record.availability);
    let matches_price = record.price >= 0.0 && record.price <= criteria.price_ceiling;
    let matches_location = criteria.region.matches(&record.region);

    matches_search && matches_filter && matches_price && matches_location
}

/// Filter medications, preserving insertion order.
pub fn filter_medications<'a>(
    records: &'a [MedicationRecord],
    criteria: &MedicationCriteria,
) -> Vec<&'a MedicationRecord> {
    let filtered: Vec<&MedicationRecord> = records
        .iter()
        .filter(|m| medication_matches(m, criteria))
        .collect();
    tracing::debug!(
        total = records.len(),
        matched = filtered.len(),
        region = criteria.region.as_str(),
        "Filtered medications"
    );
    filtered
}

pub fn search_medications<'a>(
    records: &'a [MedicationRecord],
    criteria: Option<&MedicationCriteria>,
) -> SearchOutcome<'a> {
    let Some(criteria) = criteria else {
        return SearchOutcome::NotFiltered;
    };
    let filtered = filter_medications(records, criteria);
    if filtered.is_empty() {
        SearchOutcome::Empty
    } else {
        SearchOutcome::Matches(filtered)
    }
}

// ═══════════════════════════════════════════
// Inventory, alerts, predictions
// ═══════════════════════════════════════════

/// Medication name matches case-insensitively; strength matches verbatim
/// so "mg" and "MG" stay distinct.
pub fn filter_stock_items<'a>(items: &'a [StockItem], criteria: &StockCriteria) -> Vec<&'a StockItem> {
    let query = criteria.query.to_lowercase();
    let filtered: Vec<&StockItem> = items
        .iter()
        .filter(|item| {
            let matches_search = contains_ignore_case(&item.medication, &query)
                || item.strength.contains(&criteria.query);
            matches_search && criteria.status.matches(&item.status)
        })
        .collect();
    tracing::debug!(total = items.len(), matched = filtered.len(), "Filtered stock items");
    filtered
}

pub fn filter_alerts<'a>(alerts: &'a [AlertRecord], criteria: &AlertCriteria) -> Vec<&'a AlertRecord> {
    let query = criteria.query.to_lowercase();
    let filtered: Vec<&AlertRecord> = alerts
        .iter()
        .filter(|alert| {
            let matches_search = contains_ignore_case(&alert.medication, &query)
                || contains_ignore_case(&alert.pharmacy, &query);
            matches_search
                && criteria.severity.matches(&alert.severity)
                && criteria.status.matches(&alert.status)
        })
        .collect();
    tracing::debug!(total = alerts.len(), matched = filtered.len(), "Filtered alerts");
    filtered
}

pub fn filter_predictions<'a>(
    predictions: &'a [PredictionRecord],
    risk: &RiskFilter,
) -> Vec<&'a PredictionRecord> {
    predictions
        .iter()
        .filter(|p| risk.matches(&p.risk_level))
        .collect()
}

/// A prediction concerns the user when it names their location or covers
/// every region.
pub fn is_locally_affected(prediction: &PredictionRecord, user_location: &str) -> bool {
    prediction
        .regions
        .iter()
        .any(|r| r == user_location || r == ALL_REGIONS)
}

/// Per-status totals for the inventory summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub critical: u32,
    pub low: u32,
    pub optimal: u32,
}

pub fn status_counts(items: &[StockItem]) -> StatusCounts {
    items.iter().fold(StatusCounts::default(), |mut acc, item| {
        match item.status {
            InventoryStatus::Critical => acc.critical += 1,
            InventoryStatus::Low => acc.low += 1,
            InventoryStatus::Optimal => acc.optimal += 1,
        }
        acc
    })
}
