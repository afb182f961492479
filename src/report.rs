//! Shortage reports aggregated from per-pharmacy inventory risk.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::Thresholds;
use crate::error::{EngineError, Result};
use crate::models::enums::RiskReason;
use crate::models::{InventoryEntry, PharmacySite};
use crate::risk::{compute_risk, SeverityQuery, ShortageRisk};

const TREND_NOTE: &str = "Trend requires historical data; baseline is rule-based only.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortageItem {
    pub medication_id: u32,
    pub quantity: i64,
    pub risk_score: f64,
    pub reason: RiskReason,
}

impl From<&ShortageRisk> for ShortageItem {
    fn from(r: &ShortageRisk) -> Self {
        Self {
            medication_id: r.medication_id,
            quantity: r.quantity,
            risk_score: r.risk_score,
            reason: r.reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PharmacyShortages {
    pub pharmacy_id: u32,
    pub shortage_count: u32,
    pub items: Vec<ShortageItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    pub status: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortageReport {
    pub generated_at: NaiveDateTime,
    pub total_items: u32,
    pub total_shortages: u32,
    pub critical_shortages: u32,
    pub low_shortages: u32,
    /// Pharmacies in the order their first shortage appears.
    pub by_pharmacy: Vec<PharmacyShortages>,
    pub trend: TrendSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PharmacyShortageDetail {
    pub pharmacy_id: u32,
    pub generated_at: NaiveDateTime,
    pub total_medications: u32,
    pub shortage_count: u32,
    pub critical_count: u32,
    pub low_count: u32,
    pub shortages: Vec<ShortageItem>,
}

fn count_where(risks: &[ShortageRisk], pred: impl Fn(&ShortageRisk) -> bool) -> u32 {
    risks.iter().filter(|&r| pred(r)).count() as u32
}

pub fn generate_shortage_report(
    inventory: &[InventoryEntry],
    thresholds: &Thresholds,
    generated_at: NaiveDateTime,
) -> ShortageReport {
    let shortages: Vec<ShortageRisk> = inventory
        .iter()
        .map(|e| compute_risk(e, thresholds))
        .filter(|r| r.reason.is_shortage())
        .collect();

    let mut by_pharmacy: Vec<PharmacyShortages> = Vec::new();
    for risk in &shortages {
        match by_pharmacy.iter_mut().find(|p| p.pharmacy_id == risk.pharmacy_id) {
            Some(group) => {
                group.shortage_count += 1;
                group.items.push(risk.into());
            }
            None => by_pharmacy.push(PharmacyShortages {
                pharmacy_id: risk.pharmacy_id,
                shortage_count: 1,
                items: vec![risk.into()],
            }),
        }
    }

    let report = ShortageReport {
        generated_at,
        total_items: inventory.len() as u32,
        total_shortages: shortages.len() as u32,
        critical_shortages: count_where(&shortages, |r| r.reason.is_critical()),
        low_shortages: count_where(&shortages, |r| r.reason == RiskReason::LowStock),
        by_pharmacy,
        trend: TrendSummary {
            status: "stable".into(),
            note: TREND_NOTE.into(),
        },
    };
    tracing::info!(
        total_items = report.total_items,
        total_shortages = report.total_shortages,
        critical = report.critical_shortages,
        "Generated shortage report"
    );
    report
}

impl ShortageReport {
    /// Drop items scoring below `min_risk_score`, then drop pharmacies left
    /// without items and recount the shortage totals. `total_items` keeps
    /// the size of the scored inventory.
    pub fn retain_min_score(&mut self, min_risk_score: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&min_risk_score) {
            return Err(EngineError::Validation(format!(
                "min_risk_score must be between 0.0 and 1.0, got {min_risk_score}"
            )));
        }

        for group in &mut self.by_pharmacy {
            group.items.retain(|i| i.risk_score >= min_risk_score);
            group.shortage_count = group.items.len() as u32;
        }
        self.by_pharmacy.retain(|g| g.shortage_count > 0);

        let (mut total, mut critical, mut low) = (0, 0, 0);
        for item in self.by_pharmacy.iter().flat_map(|g| &g.items) {
            total += 1;
            if item.reason.is_critical() {
                critical += 1;
            } else if item.reason == RiskReason::LowStock {
                low += 1;
            }
        }
        self.total_shortages = total;
        self.critical_shortages = critical;
        self.low_shortages = low;

        tracing::debug!(min_risk_score, remaining = total, "Applied minimum risk score");
        Ok(())
    }
}

// ═══════════════════════════════════════════
// Summary overview
// ═══════════════════════════════════════════

/// Largest accepted `top_n` for [`reports_summary`].
pub const MAX_TOP_SHORTAGES: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryOverview {
    pub total_pharmacies: u32,
    pub total_medications: u32,
    pub total_shortages: u32,
    pub critical_count: u32,
    pub low_count: u32,
    /// Share of scored items that are shortages, 0..=100, two decimals.
    pub overall_risk_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PharmacySummary {
    pub pharmacy_id: u32,
    pub pharmacy_name: Option<String>,
    pub total_medications: u32,
    pub total_shortages: u32,
    pub critical_shortages: u32,
    pub low_shortages: u32,
    /// Mean score over every item at the pharmacy, three decimals.
    pub average_risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopShortageItem {
    pub pharmacy_id: u32,
    #[serde(flatten)]
    pub item: ShortageItem,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportsSummary {
    pub generated_at: NaiveDateTime,
    pub overview: SummaryOverview,
    /// Most critical shortages first.
    pub by_pharmacy: Vec<PharmacySummary>,
    /// Highest score first, at most `top_n` entries.
    pub top_shortages: Vec<TopShortageItem>,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Overview across pharmacies, optionally narrowed to one pharmacy id.
///
/// Pharmacy names come from `sites` when the id is known there.
pub fn reports_summary(
    sites: &[PharmacySite],
    inventory: &[InventoryEntry],
    pharmacy_id: Option<u32>,
    top_n: usize,
    thresholds: &Thresholds,
    generated_at: NaiveDateTime,
) -> Result<ReportsSummary> {
    if !(1..=MAX_TOP_SHORTAGES).contains(&top_n) {
        return Err(EngineError::Validation(format!(
            "top_n must be between 1 and {MAX_TOP_SHORTAGES}, got {top_n}"
        )));
    }

    let risks: Vec<ShortageRisk> = inventory
        .iter()
        .filter(|e| pharmacy_id.map_or(true, |id| e.pharmacy_id == id))
        .map(|e| compute_risk(e, thresholds))
        .collect();

    let mut pharmacy_ids: Vec<u32> = Vec::new();
    for risk in &risks {
        if !pharmacy_ids.contains(&risk.pharmacy_id) {
            pharmacy_ids.push(risk.pharmacy_id);
        }
    }

    let mut by_pharmacy: Vec<PharmacySummary> = pharmacy_ids
        .iter()
        .map(|&id| {
            let own: Vec<ShortageRisk> = risks.iter().filter(|r| r.pharmacy_id == id).copied().collect();
            let score_sum: f64 = own.iter().map(|r| r.risk_score).sum();
            PharmacySummary {
                pharmacy_id: id,
                pharmacy_name: sites.iter().find(|s| s.id == id).map(|s| s.name.clone()),
                total_medications: own.len() as u32,
                total_shortages: count_where(&own, |r| r.reason.is_shortage()),
                critical_shortages: count_where(&own, |r| r.reason.is_critical()),
                low_shortages: count_where(&own, |r| r.reason == RiskReason::LowStock),
                average_risk_score: round_to(score_sum / own.len() as f64, 3),
            }
        })
        .collect();
    by_pharmacy.sort_by(|a, b| b.critical_shortages.cmp(&a.critical_shortages));

    let mut shortages: Vec<&ShortageRisk> = risks.iter().filter(|r| r.reason.is_shortage()).collect();
    shortages.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    let top_shortages = shortages
        .iter()
        .take(top_n)
        .map(|&r| TopShortageItem {
            pharmacy_id: r.pharmacy_id,
            item: r.into(),
        })
        .collect();

    let total_shortages = shortages.len() as u32;
    let overall_risk_percentage = if risks.is_empty() {
        0.0
    } else {
        round_to(f64::from(total_shortages) / risks.len() as f64 * 100.0, 2)
    };

    let overview = SummaryOverview {
        total_pharmacies: pharmacy_ids.len() as u32,
        total_medications: risks.len() as u32,
        total_shortages,
        critical_count: count_where(&risks, |r| r.reason.is_critical()),
        low_count: count_where(&risks, |r| r.reason == RiskReason::LowStock),
        overall_risk_percentage,
    };
    tracing::info!(
        pharmacies = overview.total_pharmacies,
        shortages = overview.total_shortages,
        risk_pct = overview.overall_risk_percentage,
        "Generated summary report"
    );

    Ok(ReportsSummary {
        generated_at,
        overview,
        by_pharmacy,
        top_shortages,
    })
}

/// Shortage detail for one pharmacy.
///
/// `include_all` keeps items whose stock is fine; `severity` narrows by
/// score band afterwards. Counts reflect the returned items.
pub fn pharmacy_shortage_detail(
    sites: &[PharmacySite],
    inventory: &[InventoryEntry],
    pharmacy_id: u32,
    include_all: bool,
    severity: SeverityQuery,
    thresholds: &Thresholds,
    generated_at: NaiveDateTime,
) -> Result<PharmacyShortageDetail> {
    if !sites.iter().any(|s| s.id == pharmacy_id) {
        return Err(EngineError::NotFound {
            entity_type: "pharmacy".into(),
            id: pharmacy_id.to_string(),
        });
    }

    let entries: Vec<&InventoryEntry> = inventory
        .iter()
        .filter(|e| e.pharmacy_id == pharmacy_id)
        .collect();

    let risks: Vec<ShortageRisk> = entries
        .iter()
        .map(|e| compute_risk(e, thresholds))
        .filter(|r| include_all || r.reason.is_shortage())
        .filter(|r| severity.matches(r))
        .collect();

    Ok(PharmacyShortageDetail {
        pharmacy_id,
        generated_at,
        total_medications: entries.len() as u32,
        shortage_count: risks.len() as u32,
        critical_count: count_where(&risks, |r| r.reason.is_critical()),
        low_count: count_where(&risks, |r| r.reason == RiskReason::LowStock),
        shortages: risks.iter().map(ShortageItem::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 2)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap()
    }

    fn entry(pharmacy_id: u32, medication_id: u32, quantity: i64) -> InventoryEntry {
        InventoryEntry {
            pharmacy_id,
            medication_id,
            quantity,
        }
    }

    fn sites() -> Vec<PharmacySite> {
        vec![
            PharmacySite {
                id: 1,
                name: "Central Pharmacy".into(),
                address: Some("Beirut".into()),
            },
            PharmacySite {
                id: 2,
                name: "HealthPlus Pharmacy".into(),
                address: None,
            },
            PharmacySite {
                id: 3,
                name: "Empty Shelf".into(),
                address: None,
            },
        ]
    }

    #[test]
    fn report_totals() {
        let inventory = vec![entry(1, 1, 0), entry(1, 2, 3), entry(2, 3, 50)];
        let report = generate_shortage_report(&inventory, &Thresholds::default(), at());
        assert_eq!(report.total_items, 3);
        assert_eq!(report.total_shortages, 2);
        assert_eq!(report.critical_shortages, 2);
        assert_eq!(report.low_shortages, 0);
        assert_eq!(report.by_pharmacy.len(), 1);
        assert_eq!(report.by_pharmacy[0].shortage_count, 2);
        assert_eq!(report.trend.status, "stable");
    }

    #[test]
    fn pharmacies_grouped_in_first_seen_order() {
        let inventory = vec![entry(2, 1, 10), entry(1, 1, 0), entry(2, 2, 4), entry(1, 3, 99)];
        let report = generate_shortage_report(&inventory, &Thresholds::default(), at());
        let order: Vec<u32> = report.by_pharmacy.iter().map(|p| p.pharmacy_id).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(report.by_pharmacy[0].items.len(), 2);
        assert_eq!(report.low_shortages, 1);
    }

    #[test]
    fn report_serializes_timestamp_as_iso() {
        let report = generate_shortage_report(&[], &Thresholds::default(), at());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"generated_at\":\"2026-02-02T12:34:56\""));
        assert!(json.contains("\"by_pharmacy\":[]"));
    }

    #[test]
    fn detail_unknown_pharmacy_is_not_found() {
        let err = pharmacy_shortage_detail(
            &sites(),
            &[],
            42,
            false,
            SeverityQuery::Any,
            &Thresholds::default(),
            at(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn detail_without_inventory_is_zeroed() {
        let d = pharmacy_shortage_detail(
            &sites(),
            &[entry(1, 1, 0)],
            3,
            false,
            SeverityQuery::Any,
            &Thresholds::default(),
            at(),
        )
        .unwrap();
        assert_eq!(d.total_medications, 0);
        assert_eq!(d.shortage_count, 0);
        assert!(d.shortages.is_empty());
    }

    #[test]
    fn detail_filters_and_counts() {
        let inventory = vec![entry(1, 1, 0), entry(1, 2, 3), entry(1, 3, 12), entry(1, 4, 80), entry(2, 1, 0)];
        let t = Thresholds::default();

        let d = pharmacy_shortage_detail(&sites(), &inventory, 1, false, SeverityQuery::Any, &t, at()).unwrap();
        assert_eq!(d.total_medications, 4);
        assert_eq!(d.shortage_count, 3);
        assert_eq!(d.critical_count, 2);
        assert_eq!(d.low_count, 1);

        let d = pharmacy_shortage_detail(&sites(), &inventory, 1, true, SeverityQuery::Any, &t, at()).unwrap();
        assert_eq!(d.shortage_count, 4);

        let d = pharmacy_shortage_detail(&sites(), &inventory, 1, false, SeverityQuery::Low, &t, at()).unwrap();
        assert_eq!(d.shortage_count, 1);
        assert_eq!(d.shortages[0].medication_id, 3);
        assert_eq!(d.critical_count, 0);

        let d = pharmacy_shortage_detail(&sites(), &inventory, 1, true, SeverityQuery::Critical, &t, at()).unwrap();
        let ids: Vec<u32> = d.shortages.iter().map(|s| s.medication_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    fn reference_inventory() -> Vec<InventoryEntry> {
        vec![entry(1, 1, 0), entry(1, 2, 3), entry(1, 3, 48), entry(2, 1, 12), entry(2, 2, 95), entry(2, 3, 5)]
    }

    #[test]
    fn min_score_refilters_and_recounts() {
        let t = Thresholds::default();
        let mut report = generate_shortage_report(&reference_inventory(), &t, at());
        assert_eq!(report.total_shortages, 4);

        report.retain_min_score(0.8).unwrap();
        assert_eq!(report.total_items, 6);
        assert_eq!(report.total_shortages, 3);
        assert_eq!(report.critical_shortages, 3);
        assert_eq!(report.low_shortages, 0);
        assert_eq!(report.by_pharmacy[1].shortage_count, 1);
        assert_eq!(report.by_pharmacy[1].items[0].medication_id, 3);

        report.retain_min_score(0.9).unwrap();
        let ids: Vec<u32> = report.by_pharmacy.iter().map(|p| p.pharmacy_id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(report.total_shortages, 1);
    }

    #[test]
    fn min_score_out_of_range_is_rejected() {
        let mut report = generate_shortage_report(&reference_inventory(), &Thresholds::default(), at());
        let before = report.clone();
        assert!(matches!(report.retain_min_score(1.5), Err(EngineError::Validation(_))));
        assert!(matches!(report.retain_min_score(-0.1), Err(EngineError::Validation(_))));
        assert!(matches!(report.retain_min_score(f64::NAN), Err(EngineError::Validation(_))));
        assert_eq!(report, before);
    }

    #[test]
    fn summary_overview_and_averages() {
        let s = reports_summary(&sites(), &reference_inventory(), None, 10, &Thresholds::default(), at()).unwrap();
        assert_eq!(s.overview.total_pharmacies, 2);
        assert_eq!(s.overview.total_medications, 6);
        assert_eq!(s.overview.total_shortages, 4);
        assert_eq!(s.overview.critical_count, 3);
        assert_eq!(s.overview.low_count, 1);
        assert_eq!(s.overview.overall_risk_percentage, 66.67);

        assert_eq!(s.by_pharmacy[0].pharmacy_id, 1);
        assert_eq!(s.by_pharmacy[0].pharmacy_name.as_deref(), Some("Central Pharmacy"));
        assert_eq!(s.by_pharmacy[0].average_risk_score, 0.667);
        assert_eq!(s.by_pharmacy[1].average_risk_score, 0.517);
        assert_eq!(s.by_pharmacy[1].low_shortages, 1);
    }

    #[test]
    fn summary_orders_pharmacies_by_critical_count() {
        let inventory = vec![entry(2, 1, 12), entry(9, 1, 0), entry(9, 2, 1), entry(2, 2, 40)];
        let s = reports_summary(&sites(), &inventory, None, 10, &Thresholds::default(), at()).unwrap();
        let order: Vec<u32> = s.by_pharmacy.iter().map(|p| p.pharmacy_id).collect();
        assert_eq!(order, vec![9, 2]);
        assert_eq!(s.by_pharmacy[0].pharmacy_name, None);
    }

    #[test]
    fn summary_top_shortages_by_score() {
        let s = reports_summary(&sites(), &reference_inventory(), None, 3, &Thresholds::default(), at()).unwrap();
        let top: Vec<(u32, u32)> = s
            .top_shortages
            .iter()
            .map(|t| (t.pharmacy_id, t.item.medication_id))
            .collect();
        assert_eq!(top, vec![(1, 1), (1, 2), (2, 3)]);
        let json = serde_json::to_string(&s.top_shortages[0]).unwrap();
        assert!(json.contains("\"pharmacy_id\":1"));
        assert!(json.contains("\"reason\":\"out_of_stock\""));
    }

    #[test]
    fn summary_for_one_pharmacy() {
        let s = reports_summary(&sites(), &reference_inventory(), Some(2), 10, &Thresholds::default(), at()).unwrap();
        assert_eq!(s.overview.total_pharmacies, 1);
        assert_eq!(s.overview.total_medications, 3);
        assert_eq!(s.overview.overall_risk_percentage, 66.67);
        assert!(s.top_shortages.iter().all(|t| t.pharmacy_id == 2));
    }

    #[test]
    fn summary_empty_and_bad_top_n() {
        let t = Thresholds::default();
        let s = reports_summary(&sites(), &[], None, 10, &t, at()).unwrap();
        assert_eq!(s.overview.total_pharmacies, 0);
        assert_eq!(s.overview.overall_risk_percentage, 0.0);
        assert!(s.by_pharmacy.is_empty() && s.top_shortages.is_empty());

        assert!(matches!(reports_summary(&sites(), &[], None, 0, &t, at()), Err(EngineError::Validation(_))));
        assert!(matches!(reports_summary(&sites(), &[], None, 51, &t, at()), Err(EngineError::Validation(_))));
    }
}
