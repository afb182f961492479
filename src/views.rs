//! Explicit view state and the pure render functions that turn it, plus
//! the reference dataset, into fully-derived screens.
//!
//! Nothing here holds global state. A caller owns a `CustomerState` or
//! `PharmacistState`, mutates it in response to input, and re-renders.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::Thresholds;
use crate::forecast::{predict_shortage, ShortagePrediction};
use crate::models::enums::{
    AlertSeverity, AlertStatus, CustomerPage, PersonalAlertStatus, PharmacistPage, Timeframe,
};
use crate::models::{
    AlertCriteria, AlertRecord, MedicationCriteria, MedicationRecord, PersonalAlert,
    PharmacyListing, PredictionRecord, RegionRecord, RegionSelector, RiskFilter, StatusFilter,
    StockCriteria, StockItem, TrackedMedication,
};
use crate::palette::{self, RiskStyle, SeverityStyle};
use crate::reference::ReferenceData;
use crate::regional::{
    self, availability_band, AvailabilityBand, MedicationRegions, RegionSelection, StockLine,
};
use crate::report::{generate_shortage_report, ShortageReport};
use crate::risk::{high_risk_items, ShortageRisk};
use crate::search::{self, SearchOutcome, StatusCounts};
use crate::stock_status::{self, StockClassification};

// ═══════════════════════════════════════════
// Selection helpers
// ═══════════════════════════════════════════

/// Add `id` to the selection, or remove it when already present.
pub fn toggle_selection(selected: &[u32], id: u32) -> Vec<u32> {
    if selected.contains(&id) {
        selected.iter().copied().filter(|&s| s != id).collect()
    } else {
        let mut next = selected.to_vec();
        next.push(id);
        next
    }
}

/// At most one row is expanded; toggling the open row closes it.
pub fn toggle_expanded(current: Option<u32>, id: u32) -> Option<u32> {
    if current == Some(id) {
        None
    } else {
        Some(id)
    }
}

// ═══════════════════════════════════════════
// Customer
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerState {
    pub page: CustomerPage,
    user_location: String,
    /// `None` until the user has submitted a search. The region part is
    /// ignored at render time; search always follows `user_location`.
    pub criteria: Option<MedicationCriteria>,
    pub region: RegionSelection,
    pub timeframe: Timeframe,
    pub risk_filter: RiskFilter,
    pub selected_medication: Option<u32>,
}

impl CustomerState {
    pub fn new(user_location: &str) -> Self {
        Self {
            page: CustomerPage::Search,
            user_location: user_location.to_string(),
            criteria: None,
            region: RegionSelection::new(user_location),
            timeframe: Timeframe::default(),
            risk_filter: StatusFilter::All,
            selected_medication: None,
        }
    }

    pub fn user_location(&self) -> &str {
        &self.user_location
    }

    pub fn set_location(&mut self, user_location: &str) {
        self.user_location = user_location.to_string();
        self.region.sync_location(user_location);
    }

    /// Open the details page for a medication.
    pub fn open_details(&mut self, medication_id: u32) {
        self.selected_medication = Some(medication_id);
        self.page = CustomerPage::Details;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicationRow<'a> {
    pub record: &'a MedicationRecord,
    pub label: &'static str,
    pub badge: &'static str,
}

impl<'a> MedicationRow<'a> {
    fn new(record: &'a MedicationRecord) -> Self {
        let token = record.availability.as_str();
        Self {
            record,
            label: palette::availability_label(token),
            badge: palette::availability_badge(token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTile<'a> {
    pub region: &'a RegionRecord,
    pub band: AvailabilityBand,
    pub bar_color: &'static str,
    pub card_color: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PharmacyRow<'a> {
    pub listing: &'a PharmacyListing,
    pub stock: Vec<StockLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow<'a> {
    pub record: &'a PredictionRecord,
    pub style: RiskStyle,
    pub locally_affected: bool,
    pub within_horizon: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalAlertRow<'a> {
    pub alert: &'a PersonalAlert,
    pub badge: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum CustomerScreen<'a> {
    Search {
        outcome: SearchOutcome<'a>,
        rows: Vec<MedicationRow<'a>>,
    },
    Availability {
        selected_region: String,
        tiles: Vec<RegionTile<'a>>,
        /// Pharmacies in the selected region; empty for an unknown region.
        pharmacies: Vec<PharmacyRow<'a>>,
    },
    Predictions {
        timeframe: Timeframe,
        horizon_days: u32,
        rows: Vec<PredictionRow<'a>>,
    },
    Alerts {
        unread: u32,
        rows: Vec<PersonalAlertRow<'a>>,
    },
    Details {
        /// `None` when nothing is selected or the id is unknown.
        medication: Option<MedicationRow<'a>>,
        regions: MedicationRegions<'a>,
    },
}

pub fn render_customer<'a>(
    state: &CustomerState,
    data: &'a ReferenceData,
    thresholds: &Thresholds,
) -> CustomerScreen<'a> {
    tracing::debug!(page = state.page.as_str(), location = state.user_location(), "Rendering customer view");
    match state.page {
        CustomerPage::Search => {
            // Search is always scoped to where the user is.
            let criteria = state.criteria.as_ref().map(|c| MedicationCriteria {
                region: RegionSelector::from(state.user_location()),
                ..c.clone()
            });
            let outcome = search::search_medications(&data.medications, criteria.as_ref());
            let rows = outcome.records().iter().map(|&m| MedicationRow::new(m)).collect();
            CustomerScreen::Search { outcome, rows }
        }
        CustomerPage::Availability => {
            let selected = state.region.selected();
            let tiles = data
                .regions
                .iter()
                .map(|region| {
                    let band = availability_band(region.availability, thresholds);
                    RegionTile {
                        region,
                        band,
                        bar_color: band.bar_color(),
                        card_color: band.card_color(),
                        selected: region.id == selected,
                    }
                })
                .collect();
            let pharmacies = regional::pharmacies_in_region(&data.pharmacies, selected)
                .into_iter()
                .map(|listing| PharmacyRow {
                    listing,
                    stock: regional::parse_stock_summary(&listing.stock),
                })
                .collect();
            CustomerScreen::Availability {
                selected_region: selected.to_string(),
                tiles,
                pharmacies,
            }
        }
        CustomerPage::Predictions => {
            let horizon_days = state.timeframe.horizon_days();
            let rows = search::filter_predictions(&data.predictions, &state.risk_filter)
                .into_iter()
                .map(|record| PredictionRow {
                    record,
                    style: palette::risk_style(record.risk_level.as_str()),
                    locally_affected: search::is_locally_affected(record, state.user_location()),
                    within_horizon: record.days_until_shortage <= horizon_days,
                })
                .collect();
            CustomerScreen::Predictions {
                timeframe: state.timeframe,
                horizon_days,
                rows,
            }
        }
        CustomerPage::Alerts => {
            let unread = data
                .personal_alerts
                .iter()
                .filter(|a| a.status == PersonalAlertStatus::Active)
                .count() as u32;
            let rows = data
                .personal_alerts
                .iter()
                .map(|alert| PersonalAlertRow {
                    alert,
                    badge: palette::personal_severity_badge(alert.severity.as_str()),
                })
                .collect();
            CustomerScreen::Alerts { unread, rows }
        }
        CustomerPage::Details => {
            let medication = state
                .selected_medication
                .and_then(|id| data.medications.iter().find(|m| m.id == id));
            let regions = medication
                .map(|m| regional::medication_regions(&data.regions, &m.name))
                .unwrap_or_default();
            CustomerScreen::Details {
                medication: medication.map(MedicationRow::new),
                regions,
            }
        }
    }
}

// ═══════════════════════════════════════════
// Pharmacist
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct PharmacistState {
    pub page: PharmacistPage,
    pub alert_criteria: AlertCriteria,
    pub selected_alerts: Vec<u32>,
    pub stock_criteria: StockCriteria,
    pub expanded_stock: Option<u32>,
    pub timeframe: Timeframe,
}

impl Default for PharmacistState {
    fn default() -> Self {
        Self {
            page: PharmacistPage::Home,
            alert_criteria: AlertCriteria::default(),
            selected_alerts: Vec::new(),
            stock_criteria: StockCriteria::default(),
            expanded_stock: None,
            timeframe: Timeframe::default(),
        }
    }
}

impl PharmacistState {
    pub fn toggle_alert(&mut self, id: u32) {
        self.selected_alerts = toggle_selection(&self.selected_alerts, id);
    }

    pub fn toggle_stock_row(&mut self, id: u32) {
        self.expanded_stock = toggle_expanded(self.expanded_stock, id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedRow<'a> {
    pub medication: &'a TrackedMedication,
    pub classification: StockClassification,
    pub fill_percentage: f64,
    pub tracking_low: bool,
}

impl<'a> TrackedRow<'a> {
    fn new(medication: &'a TrackedMedication, thresholds: &Thresholds) -> Self {
        Self {
            medication,
            classification: stock_status::classify_stock(medication, thresholds),
            fill_percentage: stock_status::stock_fill_percentage(medication),
            tracking_low: stock_status::is_tracking_low(medication, thresholds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow<'a> {
    pub medication: &'a TrackedMedication,
    pub classification: StockClassification,
    pub forecast: ShortagePrediction,
    pub within_horizon: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow<'a> {
    pub alert: &'a AlertRecord,
    pub style: SeverityStyle,
    pub days_text: &'static str,
    pub days_bar: &'static str,
    pub days_bar_width: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRow<'a> {
    pub item: &'a StockItem,
    pub badge: &'static str,
    pub reorder_percentage: f64,
    pub bar_width: f64,
    pub progress_color: &'static str,
    pub days_remaining: i64,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PharmacistScreen<'a> {
    Home {
        active_critical_alerts: u32,
        counts: StatusCounts,
        tracked: Vec<TrackedRow<'a>>,
    },
    Alerts {
        rows: Vec<AlertRow<'a>>,
        selected_count: u32,
    },
    Stock {
        counts: StatusCounts,
        rows: Vec<StockRow<'a>>,
    },
    Analytics {
        high_risk: Vec<ShortageRisk>,
    },
    Reports {
        report: ShortageReport,
    },
    Settings {
        thresholds: Thresholds,
    },
    Predictions {
        timeframe: Timeframe,
        horizon_days: u32,
        rows: Vec<ForecastRow<'a>>,
    },
    Tracking {
        rows: Vec<TrackedRow<'a>>,
    },
}

pub fn render_pharmacist<'a>(
    state: &PharmacistState,
    data: &'a ReferenceData,
    thresholds: &Thresholds,
    now: NaiveDateTime,
) -> PharmacistScreen<'a> {
    tracing::debug!(page = state.page.as_str(), "Rendering pharmacist view");
    match state.page {
        PharmacistPage::Home => {
            let active_critical_alerts = data
                .alerts
                .iter()
                .filter(|a| a.severity == AlertSeverity::Critical && a.status == AlertStatus::Active)
                .count() as u32;
            PharmacistScreen::Home {
                active_critical_alerts,
                counts: search::status_counts(&data.stock_items),
                tracked: data
                    .tracked_medications
                    .iter()
                    .map(|m| TrackedRow::new(m, thresholds))
                    .collect(),
            }
        }
        PharmacistPage::Alerts => {
            let rows: Vec<AlertRow> = search::filter_alerts(&data.alerts, &state.alert_criteria)
                .into_iter()
                .map(|alert| AlertRow {
                    alert,
                    style: palette::color_for_severity(alert.severity.as_str()),
                    days_text: palette::days_until_out_text(alert.days_until_out, thresholds.days_urgent),
                    days_bar: palette::days_until_out_bar(
                        alert.days_until_out,
                        thresholds.days_urgent,
                        thresholds.days_soon,
                    ),
                    days_bar_width: palette::days_bar_width(alert.days_until_out),
                    selected: state.selected_alerts.contains(&alert.id),
                })
                .collect();
            PharmacistScreen::Alerts {
                selected_count: state.selected_alerts.len() as u32,
                rows,
            }
        }
        PharmacistPage::Stock => {
            let rows = search::filter_stock_items(&data.stock_items, &state.stock_criteria)
                .into_iter()
                .map(|item| {
                    let reorder_percentage = stock_status::reorder_percentage(item);
                    StockRow {
                        item,
                        badge: palette::inventory_status_badge(item.status.as_str()),
                        reorder_percentage,
                        bar_width: stock_status::reorder_bar_width(item),
                        progress_color: stock_status::progress_color(reorder_percentage, thresholds),
                        days_remaining: stock_status::days_remaining(item),
                        expanded: state.expanded_stock == Some(item.id),
                    }
                })
                .collect();
            PharmacistScreen::Stock {
                counts: search::status_counts(&data.stock_items),
                rows,
            }
        }
        PharmacistPage::Analytics => PharmacistScreen::Analytics {
            high_risk: high_risk_items(&data.inventory, thresholds),
        },
        PharmacistPage::Reports => PharmacistScreen::Reports {
            report: generate_shortage_report(&data.inventory, thresholds, now),
        },
        PharmacistPage::Settings => PharmacistScreen::Settings {
            thresholds: thresholds.clone(),
        },
        PharmacistPage::Predictions => {
            let horizon_days = state.timeframe.horizon_days();
            let rows = data
                .tracked_medications
                .iter()
                .map(|medication| {
                    let forecast = predict_shortage(medication);
                    ForecastRow {
                        medication,
                        classification: stock_status::classify_stock(medication, thresholds),
                        within_horizon: forecast.days_to_threshold <= i64::from(horizon_days),
                        forecast,
                    }
                })
                .collect();
            PharmacistScreen::Predictions {
                timeframe: state.timeframe,
                horizon_days,
                rows,
            }
        }
        PharmacistPage::Tracking => PharmacistScreen::Tracking {
            rows: data
                .tracked_medications
                .iter()
                .map(|m| TrackedRow::new(m, thresholds))
                .collect(),
        },
    }
}
