use serde::{Deserialize, Serialize};

use super::enums::InventoryStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: u32,
    pub medication: String,
    /// Dosage form, e.g. "Tablet".
    pub dosage: String,
    pub strength: String,
    pub quantity: i64,
    pub reorder_point: i64,
    pub daily_usage: i64,
    pub status: InventoryStatus,
    pub last_restocked: String,
    pub supplier: String,
    pub expiry_date: String,
}
