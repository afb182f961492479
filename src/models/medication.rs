use serde::{Deserialize, Serialize};

use super::enums::Availability;

/// A medication listing on the customer search screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub id: u32,
    pub name: String,
    pub dosage: String,
    pub form: String,
    pub price: f64,
    pub availability: Availability,
    pub stock: u32,
    pub nearby_pharmacies: u32,
    /// Display string such as "2.5 km".
    pub distance: String,
    pub rating: f64,
    pub region: String,
    pub description: String,
}

/// A medication watched by the pharmacist tracking and prediction screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedMedication {
    pub id: u32,
    pub name: String,
    pub current_stock: i64,
    pub min_threshold: i64,
    pub max_threshold: i64,
    pub avg_daily_usage: f64,
    pub category: String,
    #[serde(default)]
    pub risk_level: Option<String>,
}
