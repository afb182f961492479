//! Rule-based shortage risk scoring for per-pharmacy inventory.
//!
//! Scores are fixed per bucket so the ordering is stable and a learned
//! model can later replace `compute_risk` behind the same result type.

use std::str::FromStr;

use serde::Serialize;

use crate::config::Thresholds;
use crate::models::enums::{RiskReason, RiskTier};
use crate::models::InventoryEntry;

pub const SCORE_OUT_OF_STOCK: f64 = 1.0;
pub const SCORE_CRITICAL_LOW: f64 = 0.85;
pub const SCORE_LOW: f64 = 0.55;
pub const SCORE_OK: f64 = 0.15;

/// Lower bound of the "critical" severity query.
const CRITICAL_MIN_SCORE: f64 = 0.8;
/// Lower bound of the "low" severity query.
const LOW_MIN_SCORE: f64 = 0.5;
/// Scores below this read as normal.
const WATCH_MIN_SCORE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShortageRisk {
    pub pharmacy_id: u32,
    pub medication_id: u32,
    pub quantity: i64,
    /// 0.0 (low) to 1.0 (high).
    pub risk_score: f64,
    pub reason: RiskReason,
}

pub fn compute_risk(entry: &InventoryEntry, thresholds: &Thresholds) -> ShortageRisk {
    let qty = entry.quantity;
    let (risk_score, reason) = if qty <= 0 {
        (SCORE_OUT_OF_STOCK, RiskReason::OutOfStock)
    } else if qty <= thresholds.quantity_critical {
        (SCORE_CRITICAL_LOW, RiskReason::CriticalLowStock)
    } else if qty <= thresholds.quantity_low {
        (SCORE_LOW, RiskReason::LowStock)
    } else {
        (SCORE_OK, RiskReason::StockOk)
    };

    ShortageRisk {
        pharmacy_id: entry.pharmacy_id,
        medication_id: entry.medication_id,
        quantity: qty,
        risk_score,
        reason,
    }
}

/// Risks whose score reaches `thresholds.high_risk_min_score`.
pub fn high_risk_items(inventory: &[InventoryEntry], thresholds: &Thresholds) -> Vec<ShortageRisk> {
    let items: Vec<ShortageRisk> = inventory
        .iter()
        .map(|e| compute_risk(e, thresholds))
        .filter(|r| r.risk_score >= thresholds.high_risk_min_score)
        .collect();
    tracing::debug!(total = inventory.len(), high_risk = items.len(), "Scored inventory");
    items
}

/// Band a risk score for display. Shares its upper bounds with
/// `SeverityQuery`.
pub fn risk_tier(risk_score: f64) -> RiskTier {
    if risk_score >= CRITICAL_MIN_SCORE {
        RiskTier::Critical
    } else if risk_score >= LOW_MIN_SCORE {
        RiskTier::Warning
    } else if risk_score >= WATCH_MIN_SCORE {
        RiskTier::Low
    } else {
        RiskTier::Normal
    }
}

/// Severity query for shortage listings. Anything other than "critical" or
/// "low" (case-insensitive) means no extra filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityQuery {
    Critical,
    Low,
    #[default]
    Any,
}

impl SeverityQuery {
    pub fn matches(&self, risk: &ShortageRisk) -> bool {
        match self {
            Self::Critical => risk.risk_score >= CRITICAL_MIN_SCORE,
            Self::Low => (LOW_MIN_SCORE..CRITICAL_MIN_SCORE).contains(&risk.risk_score),
            Self::Any => true,
        }
    }
}

impl FromStr for SeverityQuery {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "critical" => Self::Critical,
            "low" => Self::Low,
            _ => Self::Any,
        })
    }
}
