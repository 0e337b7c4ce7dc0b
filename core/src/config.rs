use crate::error::{DashError, DashResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_PATH: &str = "ecommerce_customer_churn_hybrid_with_id.csv";

/// Level cut-offs for the detail-page risk badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    #[serde(default = "default_very_high")]
    pub very_high: f64,
    #[serde(default = "default_medium")]
    pub medium:    f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            very_high: default_very_high(),
            medium:    default_medium(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashConfig {
    #[serde(default = "default_data_path")]
    pub data_path:        String,
    /// Divisor for the gauge on the overview lookup tab.
    #[serde(default = "default_overview_divisor")]
    pub overview_divisor: f64,
    /// Divisor for the gauge and badge on the customer detail page.
    #[serde(default = "default_detail_divisor")]
    pub detail_divisor:   f64,
    #[serde(default)]
    pub bands:            BandThresholds,
    #[serde(default = "default_top_n")]
    pub top_n:            usize,
}

fn default_data_path() -> String { DEFAULT_DATA_PATH.into() }
fn default_overview_divisor() -> f64 { 2.0 }
fn default_detail_divisor() -> f64 { 2.5 }
fn default_very_high() -> f64 { 0.8 }
fn default_medium() -> f64 { 0.5 }
fn default_top_n() -> usize { 10 }

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_path:        default_data_path(),
            overview_divisor: default_overview_divisor(),
            detail_divisor:   default_detail_divisor(),
            bands:            BandThresholds::default(),
            top_n:            default_top_n(),
        }
    }
}

impl DashConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    /// In tests, use DashConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashConfig = serde_json::from_str(&content).map_err(DashError::Json)?;
        config.validate()?;
        log::debug!("config loaded from {path}: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> DashResult<()> {
        let invalid = |reason: String| Err(DashError::InvalidConfig { reason });

        if !(self.overview_divisor > 0.0) {
            return invalid(format!("overview_divisor must be > 0, got {}", self.overview_divisor));
        }
        if !(self.detail_divisor > 0.0) {
            return invalid(format!("detail_divisor must be > 0, got {}", self.detail_divisor));
        }
        let b = &self.bands;
        if !(0.0 <= b.medium && b.medium <= b.very_high && b.very_high <= 1.0) {
            return invalid(format!(
                "bands must satisfy 0 <= medium <= very_high <= 1, got medium={} very_high={}",
                b.medium, b.very_high
            ));
        }
        if self.top_n == 0 {
            return invalid("top_n must be >= 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_constants() {
        let c = DashConfig::default();
        assert_eq!(c.overview_divisor, 2.0);
        assert_eq!(c.detail_divisor, 2.5);
        assert_eq!(c.bands.very_high, 0.8);
        assert_eq!(c.bands.medium, 0.5);
        assert_eq!(c.top_n, 10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: DashConfig = serde_json::from_str(r#"{ "top_n": 5, "bands": { "medium": 0.4 } }"#)
            .unwrap();
        assert_eq!(c.top_n, 5);
        assert_eq!(c.bands.medium, 0.4);
        assert_eq!(c.bands.very_high, 0.8);
        assert_eq!(c.detail_divisor, 2.5);
        assert_eq!(c.data_path, DEFAULT_DATA_PATH);
    }

    #[test]
    fn rejects_non_positive_divisor() {
        let c = DashConfig { detail_divisor: 0.0, ..DashConfig::default() };
        assert!(matches!(c.validate(), Err(DashError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_inverted_bands() {
        let c = DashConfig {
            bands: BandThresholds { very_high: 0.3, medium: 0.6 },
            ..DashConfig::default()
        };
        assert!(c.validate().is_err(), "medium above very_high must be rejected");
    }
}
