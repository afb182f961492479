//! Stock-level classification and the fill/progress arithmetic behind the
//! tracking and inventory bars.

use serde::Serialize;

use crate::config::Thresholds;
use crate::error::{EngineError, Result};
use crate::models::enums::StockLevel;
use crate::models::{StockItem, TrackedMedication};

/// A stock label plus the gradient tag used for its card header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockClassification {
    pub level: StockLevel,
    pub color: &'static str,
}

pub fn level_color(level: StockLevel) -> &'static str {
    match level {
        StockLevel::Critical => "from-red-600 to-red-400",
        StockLevel::Low => "from-orange-500 to-yellow-400",
        StockLevel::Healthy => "from-blue-600 to-cyan-400",
    }
}

/// `current / max`, refusing a non-positive denominator.
pub fn checked_stock_ratio(current_stock: i64, max_threshold: i64) -> Result<f64> {
    if max_threshold <= 0 {
        return Err(EngineError::DivisionGuard {
            field: "max_threshold".into(),
        });
    }
    Ok(current_stock as f64 / max_threshold as f64)
}

pub fn classify_ratio(ratio: f64, thresholds: &Thresholds) -> StockLevel {
    if ratio < thresholds.stock_critical_ratio {
        StockLevel::Critical
    } else if ratio < thresholds.stock_low_ratio {
        StockLevel::Low
    } else {
        StockLevel::Healthy
    }
}

/// Classify a tracked medication by how full it is relative to its max
/// threshold. A non-positive max threshold is Critical.
pub fn classify_stock(med: &TrackedMedication, thresholds: &Thresholds) -> StockClassification {
    let level = match checked_stock_ratio(med.current_stock, med.max_threshold) {
        Ok(ratio) => classify_ratio(ratio, thresholds),
        Err(_) => {
            tracing::warn!(
                medication = %med.name,
                max_threshold = med.max_threshold,
                "Non-positive max threshold; classifying as critical"
            );
            StockLevel::Critical
        }
    };
    StockClassification {
        level,
        color: level_color(level),
    }
}

/// Width of the tracking bar: `min(100, current / max * 100)`.
/// Zero when the max threshold is not positive.
pub fn stock_fill_percentage(med: &TrackedMedication) -> f64 {
    match checked_stock_ratio(med.current_stock, med.max_threshold) {
        Ok(ratio) => (ratio * 100.0).min(100.0),
        Err(_) => 0.0,
    }
}

pub fn is_tracking_low(med: &TrackedMedication, thresholds: &Thresholds) -> bool {
    stock_fill_percentage(med) < thresholds.tracking_low_fill_pct
}

/// Quantity as a percentage of the reorder point, unclamped (values above
/// 100 mean comfortably above reorder). Zero for a non-positive reorder point.
pub fn reorder_percentage(item: &StockItem) -> f64 {
    checked_stock_ratio(item.quantity, item.reorder_point)
        .map(|r| r * 100.0)
        .unwrap_or(0.0)
}

/// Bar width for the reorder progress bar, capped at 100.
pub fn reorder_bar_width(item: &StockItem) -> f64 {
    reorder_percentage(item).min(100.0)
}

pub fn progress_color(percentage: f64, thresholds: &Thresholds) -> &'static str {
    if percentage < thresholds.reorder_critical_pct {
        "bg-red-500"
    } else if percentage < thresholds.reorder_low_pct {
        "bg-orange-500"
    } else {
        "bg-emerald-500"
    }
}

/// Whole days of stock left at the current daily usage.
/// Non-positive usage counts as one unit per day.
pub fn days_remaining(item: &StockItem) -> i64 {
    let usage = if item.daily_usage > 0 { item.daily_usage } else { 1 };
    item.quantity.div_euclid(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::InventoryStatus;
    use crate::reference::ReferenceData;

    fn tracked(current: i64, max: i64) -> TrackedMedication {
        TrackedMedication {
            id: 1,
            name: "Amoxicillin".into(),
            current_stock: current,
            min_threshold: 100,
            max_threshold: max,
            avg_daily_usage: 15.0,
            category: "Antibiotic".into(),
            risk_level: None,
        }
    }

    fn item(quantity: i64, reorder_point: i64, daily_usage: i64) -> StockItem {
        StockItem {
            id: 1,
            medication: "Amoxicillin".into(),
            dosage: "Tablet".into(),
            strength: "500mg".into(),
            quantity,
            reorder_point,
            daily_usage,
            status: InventoryStatus::Optimal,
            last_restocked: "2024-02-28".into(),
            supplier: "PharmaCorp Ltd".into(),
            expiry_date: "2025-12-31".into(),
        }
    }

    #[test]
    fn low_ratio_is_critical() {
        let c = classify_stock(&tracked(45, 500), &Thresholds::default());
        assert_eq!(c.level, StockLevel::Critical);
        assert_eq!(c.color, "from-red-600 to-red-400");
    }

    #[test]
    fn bucket_boundaries() {
        let t = Thresholds::default();
        assert_eq!(classify_stock(&tracked(99, 500), &t).level, StockLevel::Critical);
        assert_eq!(classify_stock(&tracked(100, 500), &t).level, StockLevel::Low);
        assert_eq!(classify_stock(&tracked(249, 500), &t).level, StockLevel::Low);
        assert_eq!(classify_stock(&tracked(250, 500), &t).level, StockLevel::Healthy);
        assert_eq!(classify_stock(&tracked(900, 500), &t).level, StockLevel::Healthy);
    }

    #[test]
    fn classification_is_monotonic_in_stock() {
        let t = Thresholds::default();
        let mut previous = 0;
        for current in 0..=600 {
            let rank = classify_stock(&tracked(current, 500), &t).level.rank();
            assert!(rank >= previous, "rank dropped at stock {current}");
            previous = rank;
        }
    }

    #[test]
    fn zero_threshold_is_critical() {
        let t = Thresholds::default();
        assert_eq!(classify_stock(&tracked(400, 0), &t).level, StockLevel::Critical);
        assert_eq!(classify_stock(&tracked(400, -5), &t).level, StockLevel::Critical);
    }

    #[test]
    fn checked_ratio_reports_division_guard() {
        assert!(matches!(
            checked_stock_ratio(10, 0),
            Err(EngineError::DivisionGuard { .. })
        ));
        assert_eq!(checked_stock_ratio(50, 200).unwrap(), 0.25);
    }

    #[test]
    fn custom_thresholds_shift_buckets() {
        let t = Thresholds {
            stock_critical_ratio: 0.05,
            ..Thresholds::default()
        };
        assert_eq!(classify_stock(&tracked(45, 500), &t).level, StockLevel::Low);
    }

    #[test]
    fn fill_percentage_clamps_at_100() {
        assert_eq!(stock_fill_percentage(&tracked(250, 500)), 50.0);
        assert_eq!(stock_fill_percentage(&tracked(750, 500)), 100.0);
        assert_eq!(stock_fill_percentage(&tracked(10, 0)), 0.0);
    }

    #[test]
    fn tracking_low_below_quarter() {
        let t = Thresholds::default();
        assert!(is_tracking_low(&tracked(120, 500), &t));
        assert!(!is_tracking_low(&tracked(125, 500), &t));
    }

    #[test]
    fn reorder_progress_bands() {
        let t = Thresholds::default();
        let amox = item(450, 500, 45);
        assert_eq!(reorder_percentage(&amox), 90.0);
        assert_eq!(progress_color(reorder_percentage(&amox), &t), "bg-emerald-500");
        assert_eq!(progress_color(29.9, &t), "bg-red-500");
        assert_eq!(progress_color(30.0, &t), "bg-orange-500");
        assert_eq!(progress_color(60.0, &t), "bg-emerald-500");
    }

    #[test]
    fn reorder_bar_width_caps() {
        let lisinopril = item(2500, 1000, 25);
        assert_eq!(reorder_percentage(&lisinopril), 250.0);
        assert_eq!(reorder_bar_width(&lisinopril), 100.0);
        assert_eq!(reorder_percentage(&item(10, 0, 1)), 0.0);
    }

    #[test]
    fn days_remaining_matches_reference_table() {
        let data = ReferenceData::bundled().unwrap();
        let days: Vec<i64> = data.stock_items.iter().map(days_remaining).collect();
        assert_eq!(days, vec![10, 40, 100, 12, 70, 70]);
    }

    #[test]
    fn days_remaining_guards_zero_usage() {
        assert_eq!(days_remaining(&item(30, 100, 0)), 30);
        assert_eq!(days_remaining(&item(31, 100, 2)), 15);
    }
}
