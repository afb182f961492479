use serde::{Deserialize, Serialize};

use super::enums::{RiskLevel, Trend};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: u32,
    pub medication: String,
    pub current_status: String,
    pub predicted_status: String,
    pub risk_level: RiskLevel,
    pub days_until_shortage: u32,
    pub confidence: f64,
    pub reason: String,
    pub trend: Trend,
    pub regions: Vec<String>,
}
