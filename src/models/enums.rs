use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same token as `as_str`, so reference data and
/// view models round-trip through one spelling.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(EngineError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Availability {
    Available => "available",
    Low => "low",
    Out => "out",
});

str_enum!(InventoryStatus {
    Optimal => "optimal",
    Low => "low",
    Critical => "critical",
});

str_enum!(StockLevel {
    Critical => "Critical",
    Low => "Low",
    Healthy => "Healthy",
});

impl StockLevel {
    /// Higher is healthier.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Low => 1,
            Self::Healthy => 2,
        }
    }
}

str_enum!(AlertSeverity {
    Critical => "CRITICAL",
    High => "HIGH",
    Medium => "MEDIUM",
    Low => "LOW",
});

str_enum!(AlertStatus {
    Active => "active",
    Acknowledged => "acknowledged",
    Resolved => "resolved",
});

str_enum!(RiskLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

str_enum!(Trend {
    Declining => "declining",
    Stable => "stable",
    Unavailable => "unavailable",
});

str_enum!(Timeframe {
    OneWeek => "1w",
    TwoWeeks => "2w",
    OneMonth => "1m",
    ThreeMonths => "3m",
});

impl Timeframe {
    pub fn horizon_days(&self) -> u32 {
        match self {
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::OneMonth
    }
}

str_enum!(ShortageOutlook {
    HighRisk => "HIGH RISK",
    LowRisk => "LOW RISK",
});

str_enum!(RiskReason {
    OutOfStock => "out_of_stock",
    CriticalLowStock => "critical_low_stock",
    LowStock => "low_stock",
    StockOk => "stock_ok",
});

impl RiskReason {
    pub fn is_shortage(&self) -> bool {
        !matches!(self, Self::StockOk)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::OutOfStock | Self::CriticalLowStock)
    }
}

/// Human-readable band for a 0.0..=1.0 risk score.
str_enum!(RiskTier {
    Critical => "CRITICAL",
    Warning => "WARNING",
    Low => "LOW",
    Normal => "NORMAL",
});

str_enum!(StockChangeReason {
    Add => "ADD",
    Update => "UPDATE",
    Remove => "REMOVE",
});

str_enum!(PersonalAlertKind {
    ShortageWarning => "shortage_warning",
    StockAlert => "stock_alert",
    PriceChange => "price_change",
    BackInStock => "back_in_stock",
});

str_enum!(PersonalSeverity {
    Critical => "critical",
    High => "high",
    Medium => "medium",
    Info => "info",
});

str_enum!(PersonalAlertStatus {
    Active => "active",
    Read => "read",
});

str_enum!(PharmacistPage {
    Home => "home",
    Alerts => "alerts",
    Stock => "stock",
    Analytics => "analytics",
    Reports => "reports",
    Settings => "settings",
    Predictions => "predictions",
    Tracking => "tracking",
});

str_enum!(CustomerPage {
    Search => "search",
    Availability => "availability",
    Predictions => "predictions",
    Alerts => "alerts",
    Details => "details",
});
