//! Threshold-based shortage outlook for tracked medications.

use serde::Serialize;

use crate::models::enums::ShortageOutlook;
use crate::models::TrackedMedication;

/// Confidence reported with every threshold prediction. Fixed, not
/// derived from the record.
pub const PREDICTION_CONFIDENCE: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortagePrediction {
    pub prediction: ShortageOutlook,
    pub days_to_threshold: i64,
    pub confidence: u8,
}

/// Predict whether a medication is heading for a shortage.
///
/// HIGH RISK when stock is already under the minimum threshold. Days are
/// `floor(stock / usage)`, with non-positive usage treated as 1/day.
pub fn predict_shortage(med: &TrackedMedication) -> ShortagePrediction {
    let prediction = if med.current_stock < med.min_threshold {
        ShortageOutlook::HighRisk
    } else {
        ShortageOutlook::LowRisk
    };
    let usage = if med.avg_daily_usage > 0.0 {
        med.avg_daily_usage
    } else {
        1.0
    };
    let days_to_threshold = (med.current_stock as f64 / usage).floor() as i64;

    ShortagePrediction {
        prediction,
        days_to_threshold,
        confidence: PREDICTION_CONFIDENCE,
    }
}
