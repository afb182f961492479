//! Token to presentation-class lookups.
//!
//! Every function here is total: unrecognised tokens fall into an explicit
//! default bucket instead of failing. Tokens are matched exactly as they
//! appear in the reference data.

use serde::Serialize;

use crate::config::Thresholds;

// ═══════════════════════════════════════════
// Alert severity
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeverityStyle {
    pub bg: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub badge: &'static str,
}

const SEVERITY_CRITICAL: SeverityStyle = SeverityStyle {
    bg: "bg-red-500/20",
    border: "border-red-500/30",
    text: "text-red-400",
    badge: "bg-red-500/30 text-red-300",
};

const SEVERITY_HIGH: SeverityStyle = SeverityStyle {
    bg: "bg-amber-500/20",
    border: "border-amber-500/30",
    text: "text-amber-400",
    badge: "bg-amber-500/30 text-amber-300",
};

const SEVERITY_MEDIUM: SeverityStyle = SeverityStyle {
    bg: "bg-yellow-500/20",
    border: "border-yellow-500/30",
    text: "text-yellow-400",
    badge: "bg-yellow-500/30 text-yellow-300",
};

const SEVERITY_LOW: SeverityStyle = SeverityStyle {
    bg: "bg-emerald-500/20",
    border: "border-emerald-500/30",
    text: "text-emerald-400",
    badge: "bg-emerald-500/30 text-emerald-300",
};

const SEVERITY_DEFAULT: SeverityStyle = SeverityStyle {
    bg: "bg-slate-500/20",
    border: "border-slate-500/30",
    text: "text-slate-400",
    badge: "bg-slate-500/30 text-slate-300",
};

/// Style for an alert severity token ("CRITICAL", "HIGH", "MEDIUM", "LOW").
pub fn color_for_severity(token: &str) -> SeverityStyle {
    match token {
        "CRITICAL" => SEVERITY_CRITICAL,
        "HIGH" => SEVERITY_HIGH,
        "MEDIUM" => SEVERITY_MEDIUM,
        "LOW" => SEVERITY_LOW,
        _ => SEVERITY_DEFAULT,
    }
}

// ═══════════════════════════════════════════
// Prediction risk level
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RiskStyle {
    pub card: &'static str,
    pub text: &'static str,
    pub badge: &'static str,
}

/// Style for a prediction risk level token. Anything below medium,
/// including unknown tokens, renders as low risk.
pub fn risk_style(level: &str) -> RiskStyle {
    match level {
        "critical" => RiskStyle {
            card: "from-red-500/20 to-red-600/10 border-red-500/30 shadow-red-500/5",
            text: "text-red-400",
            badge: "bg-red-500/20 border-red-500/50 text-red-300",
        },
        "high" => RiskStyle {
            card: "from-orange-500/20 to-orange-600/10 border-orange-500/30 shadow-orange-500/5",
            text: "text-orange-400",
            badge: "bg-orange-500/20 border-orange-500/50 text-orange-300",
        },
        "medium" => RiskStyle {
            card: "from-amber-500/20 to-amber-600/10 border-amber-500/30 shadow-amber-500/5",
            text: "text-amber-400",
            badge: "bg-amber-500/20 border-amber-500/50 text-amber-300",
        },
        _ => RiskStyle {
            card: "from-emerald-500/20 to-emerald-600/10 border-emerald-500/30 shadow-emerald-500/5",
            text: "text-emerald-400",
            badge: "bg-emerald-500/20 border-emerald-500/50 text-emerald-300",
        },
    }
}

/// Text colour for a 0..=100 risk percentage.
pub fn risk_percent_color(risk: u8, thresholds: &Thresholds) -> &'static str {
    if risk >= thresholds.risk_high_pct {
        "text-red-400"
    } else if risk >= thresholds.risk_elevated_pct {
        "text-amber-400"
    } else if risk >= thresholds.risk_moderate_pct {
        "text-yellow-400"
    } else {
        "text-emerald-400"
    }
}

// ═══════════════════════════════════════════
// Badges
// ═══════════════════════════════════════════

pub fn availability_badge(token: &str) -> &'static str {
    match token {
        "available" => "bg-emerald-500/20 text-emerald-300 border-emerald-500/30",
        "low" => "bg-amber-500/20 text-amber-300 border-amber-500/30",
        "out" => "bg-red-500/20 text-red-300 border-red-500/30",
        _ => "bg-slate-700/50 text-slate-300",
    }
}

pub fn availability_label(token: &str) -> &'static str {
    match token {
        "available" => "In Stock",
        "low" => "Low Stock",
        "out" => "Out of Stock",
        _ => "Unknown",
    }
}

pub fn inventory_status_badge(token: &str) -> &'static str {
    match token {
        "critical" => "bg-red-500/20 text-red-300 border-red-500/30",
        "low" => "bg-orange-500/20 text-orange-300 border-orange-500/30",
        _ => "bg-emerald-500/20 text-emerald-300 border-emerald-500/30",
    }
}

/// Badge for a customer notification severity; "info" and unknown tokens
/// share the blue bucket.
pub fn personal_severity_badge(token: &str) -> &'static str {
    match token {
        "critical" => "bg-red-500/20 text-red-300 border-red-500/50",
        "high" => "bg-orange-500/20 text-orange-300 border-orange-500/50",
        "medium" => "bg-amber-500/20 text-amber-300 border-amber-500/50",
        _ => "bg-blue-500/20 text-blue-300 border-blue-500/50",
    }
}

// ═══════════════════════════════════════════
// Days until stock-out
// ═══════════════════════════════════════════

/// Days shown on the countdown bar. The bar fills over a 30 day window.
pub const DAYS_BAR_WINDOW: u32 = 30;

pub fn days_until_out_text(days: u32, urgent: u32) -> &'static str {
    if days <= urgent {
        "text-red-400"
    } else {
        "text-yellow-400"
    }
}

pub fn days_until_out_bar(days: u32, urgent: u32, soon: u32) -> &'static str {
    if days <= urgent {
        "from-red-500 to-red-600"
    } else if days <= soon {
        "from-amber-500 to-amber-600"
    } else {
        "from-yellow-500 to-yellow-600"
    }
}

/// Bar width in percent, capped at 100.
pub fn days_bar_width(days: u32) -> f64 {
    (days as f64 / DAYS_BAR_WINDOW as f64 * 100.0).min(100.0)
}
