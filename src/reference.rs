//! Static reference dataset the engine reads from.
//!
//! The bundled tables are compiled into the binary from
//! `data/reference.json`; an alternative dataset with the same shape can
//! be loaded from disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    AlertRecord, InventoryEntry, MedicationRecord, PersonalAlert, PharmacyListing, PharmacySite,
    PredictionRecord, RegionRecord, StockItem, TrackedMedication,
};

const BUNDLED_REFERENCE: &str = include_str!("../data/reference.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    pub medications: Vec<MedicationRecord>,
    pub stock_items: Vec<StockItem>,
    pub alerts: Vec<AlertRecord>,
    pub predictions: Vec<PredictionRecord>,
    pub regions: Vec<RegionRecord>,
    pub pharmacies: Vec<PharmacyListing>,
    pub tracked_medications: Vec<TrackedMedication>,
    pub pharmacy_sites: Vec<PharmacySite>,
    pub inventory: Vec<InventoryEntry>,
    pub personal_alerts: Vec<PersonalAlert>,
}

impl ReferenceData {
    /// The dataset shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_REFERENCE)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let data = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), "Loaded reference dataset");
        Ok(data)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(raw)?;
        tracing::debug!(
            medications = data.medications.len(),
            stock_items = data.stock_items.len(),
            alerts = data.alerts.len(),
            predictions = data.predictions.len(),
            regions = data.regions.len(),
            pharmacies = data.pharmacies.len(),
            "Parsed reference dataset"
        );
        Ok(data)
    }
}
