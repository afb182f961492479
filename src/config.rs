use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Application-level constants
pub const APP_NAME: &str = "RxRadar";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,rxradar_lib=debug"
}

/// Get the application data directory.
/// ~/RxRadar/ on all platforms; falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Location of the optional threshold override file.
pub fn thresholds_path() -> PathBuf {
    app_data_dir().join("thresholds.json")
}

/// Every banding and cut-off constant the engine uses.
///
/// Percent fields are on a 0..=100 scale, ratio fields on 0..=1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Stock/max ratio below which a medication is Critical.
    pub stock_critical_ratio: f64,
    /// Stock/max ratio below which a medication is Low.
    pub stock_low_ratio: f64,
    /// Tracking fill bar turns red below this percentage.
    pub tracking_low_fill_pct: f64,
    pub reorder_critical_pct: f64,
    pub reorder_low_pct: f64,
    pub region_good_pct: u8,
    pub region_fair_pct: u8,
    pub risk_high_pct: u8,
    pub risk_elevated_pct: u8,
    pub risk_moderate_pct: u8,
    pub days_urgent: u32,
    pub days_soon: u32,
    /// Quantity at or below which stock is critically low (rule-based score).
    pub quantity_critical: i64,
    /// Quantity at or below which stock is low (rule-based score).
    pub quantity_low: i64,
    pub high_risk_min_score: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            stock_critical_ratio: 0.2,
            stock_low_ratio: 0.5,
            tracking_low_fill_pct: 25.0,
            reorder_critical_pct: 30.0,
            reorder_low_pct: 60.0,
            region_good_pct: 80,
            region_fair_pct: 60,
            risk_high_pct: 80,
            risk_elevated_pct: 60,
            risk_moderate_pct: 40,
            days_urgent: 3,
            days_soon: 7,
            quantity_critical: 5,
            quantity_low: 15,
            high_risk_min_score: 0.8,
        }
    }
}

impl Thresholds {
    /// Read overrides from a JSON file. A missing file yields defaults;
    /// fields absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let thresholds = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded threshold overrides");
        Ok(thresholds)
    }

    /// Like [`Thresholds::load`] but never fails: a broken file is logged
    /// and the defaults are used.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring threshold overrides");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("RxRadar"));
    }

    #[test]
    fn thresholds_path_under_app_data() {
        let path = thresholds_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("thresholds.json"));
    }

    #[test]
    fn app_name_is_rxradar() {
        assert_eq!(APP_NAME, "RxRadar");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let t = Thresholds::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(t, Thresholds::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"stock_critical_ratio": 0.1, "days_urgent": 2}}"#).unwrap();
        let t = Thresholds::load(file.path()).unwrap();
        assert_eq!(t.stock_critical_ratio, 0.1);
        assert_eq!(t.days_urgent, 2);
        assert_eq!(t.stock_low_ratio, 0.5);
        assert_eq!(t.quantity_low, 15);
    }

    #[test]
    fn malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "stock_critical_ratio = 0.1").unwrap();
        let err = Thresholds::load(file.path()).unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Json(_)));
    }

    #[test]
    fn load_or_default_swallows_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();
        assert_eq!(Thresholds::load_or_default(file.path()), Thresholds::default());
    }
}
