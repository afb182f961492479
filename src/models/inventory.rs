use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::StockChangeReason;

/// One (pharmacy, medication) stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub pharmacy_id: u32,
    pub medication_id: u32,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacySite {
    pub id: u32,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockHistoryEntry {
    pub id: Uuid,
    pub pharmacy_id: u32,
    pub medication_id: u32,
    pub old_quantity: i64,
    pub new_quantity: i64,
    pub changed_at: NaiveDateTime,
    pub reason: StockChangeReason,
}
