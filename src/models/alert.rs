use serde::{Deserialize, Serialize};

use super::enums::{
    AlertSeverity, AlertStatus, PersonalAlertKind, PersonalAlertStatus, PersonalSeverity,
};

/// Pharmacist-facing stock-out alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: u32,
    pub medication: String,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub pharmacy: String,
    pub days_until_out: u32,
    pub current_stock: i64,
    pub daily_usage: f64,
    pub predicted_out_date: String,
    pub confidence: f64,
    pub created_at: String,
    pub last_updated: String,
}

/// Customer-facing notification about a tracked medication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalAlert {
    pub id: u32,
    pub medication: String,
    pub kind: PersonalAlertKind,
    pub message: String,
    pub severity: PersonalSeverity,
    pub region: String,
    pub created_at: String,
    pub status: PersonalAlertStatus,
}
