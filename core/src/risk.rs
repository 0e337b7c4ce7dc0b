//! Risk level normalisation and detail-page banding.
//!
//! The divisor is always a parameter. The overview gauge and the detail
//! badge use different divisors (see `DashConfig`), and both are valid.

use crate::config::BandThresholds;
use serde::Serialize;

/// `min(score / divisor, 1.0)`, clamped to [0, 1].
///
/// `divisor` must be positive (enforced by `DashConfig::validate`).
/// A NaN score maps to 0.
pub fn normalize(score: f64, divisor: f64) -> f64 {
    let level = score / divisor;
    if level.is_nan() {
        return 0.0;
    }
    level.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    VeryHigh,
    Medium,
    Low,
}

impl RiskBand {
    /// Band for an already-normalised level.
    pub fn for_level(level: f64, bands: &BandThresholds) -> Self {
        if level >= bands.very_high {
            RiskBand::VeryHigh
        } else if level >= bands.medium {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::VeryHigh => "very high",
            RiskBand::Medium   => "medium",
            RiskBand::Low      => "low",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            RiskBand::VeryHigh => "🔴",
            RiskBand::Medium   => "🟠",
            RiskBand::Low      => "🟢",
        }
    }

    pub fn badge_color(self) -> &'static str {
        match self {
            RiskBand::VeryHigh => "rgba(255,76,76,0.2)",
            RiskBand::Medium   => "rgba(255,180,76,0.2)",
            RiskBand::Low      => "rgba(76,255,100,0.2)",
        }
    }
}

/// Detail-page badge: band plus the raw score it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBadge {
    pub level: f64,
    pub band:  RiskBand,
    pub text:  String,
    pub color: &'static str,
}

impl RiskBadge {
    pub fn new(score: f64, divisor: f64, bands: &BandThresholds) -> Self {
        let level = normalize(score, divisor);
        let band = RiskBand::for_level(level, bands);
        Self {
            level,
            band,
            text: format!("{} {} ({score:.2})", band.glyph(), band.label()),
            color: band.badge_color(),
        }
    }
}
