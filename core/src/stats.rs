//! Aggregate statistics for the analysis dashboard.
//!
//! This module provides:
//!   1. Detector counts and the common-churn share
//!   2. Per-model churn rates (the bar chart series)
//!   3. Box-plot summaries of key metrics, split by the IF flag
//!   4. Pearson correlation matrix over the numeric columns
//!
//! All functions are pure over a borrowed slice of records.

use crate::record::CustomerRecord;
use serde::Serialize;

// ── Detector counts ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DetectorCounts {
    pub total:             usize,
    pub isolation_forest:  usize,
    pub autoencoder:       usize,
    pub both:              usize,
    /// Rows whose precomputed Both flag disagrees with IF AND AE.
    pub inconsistent_both: usize,
}

impl DetectorCounts {
    pub fn compute(records: &[CustomerRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            acc.isolation_forest += r.if_churn_flag.is_set() as usize;
            acc.autoencoder += r.ae_churn_flag.is_set() as usize;
            acc.both += r.both_churn_flag.is_set() as usize;
            acc.inconsistent_both += r.both_flag_inconsistent() as usize;
            acc
        })
    }

    /// Share of customers flagged by both detectors, in percent,
    /// rounded to two decimals. Zero for an empty table.
    pub fn common_share_pct(&self) -> f64 {
        round2(pct(self.both, self.total))
    }

    pub fn model_rates(&self) -> Vec<ModelRate> {
        vec![
            ModelRate { model: "Isolation Forest", rate_pct: pct(self.isolation_forest, self.total) },
            ModelRate { model: "Autoencoder",      rate_pct: pct(self.autoencoder, self.total) },
            ModelRate { model: "Both",             rate_pct: pct(self.both, self.total) },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRate {
    pub model:    &'static str,
    pub rate_pct: f64,
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Two-decimal rounding with ties to even, so 3.125 becomes 3.12.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

// ── Box-plot summaries ───────────────────────────────────────────────────────

/// Five-number summary with 1.5 × IQR whiskers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count:         usize,
    pub min:           f64,
    pub q1:            f64,
    pub median:        f64,
    pub q3:            f64,
    pub max:           f64,
    pub whisker_low:   f64,
    pub whisker_high:  f64,
    pub outliers:      usize,
}

impl BoxSummary {
    /// `None` for an empty sample. NaN values are ignored.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.50)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let fence_low = q1 - 1.5 * iqr;
        let fence_high = q3 + 1.5 * iqr;

        let inside = sorted.iter().copied().filter(|v| *v >= fence_low && *v <= fence_high);
        let whisker_low = inside.clone().next().unwrap_or(q1);
        let whisker_high = inside.last().unwrap_or(q3);
        let outliers = sorted.iter().filter(|v| **v < fence_low || **v > fence_high).count();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Linear-interpolation quantile over an ascending slice. `None` when empty.
fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Numeric columns exposed to the box plots and the correlation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    PurchaseFrequency,
    CSFrequency,
    ChurnRiskScore,
    CLVPerMonth,
    RecencyProxy,
    IFChurnFlag,
}

impl Metric {
    pub fn column(self) -> &'static str {
        match self {
            Metric::PurchaseFrequency => "PurchaseFrequency",
            Metric::CSFrequency       => "CSFrequency",
            Metric::ChurnRiskScore    => "ChurnRiskScore",
            Metric::CLVPerMonth       => "CLVPerMonth",
            Metric::RecencyProxy      => "RecencyProxy",
            Metric::IFChurnFlag       => "IF_ChurnFlag",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::PurchaseFrequency => "Monthly purchase frequency",
            Metric::CSFrequency       => "Support contact frequency",
            Metric::ChurnRiskScore    => "Overall churn risk score",
            Metric::CLVPerMonth       => "CLV per month",
            Metric::RecencyProxy      => "Activity decline index",
            Metric::IFChurnFlag       => "Isolation Forest flag",
        }
    }

    pub fn value(self, r: &CustomerRecord) -> f64 {
        match self {
            Metric::PurchaseFrequency => r.purchase_frequency,
            Metric::CSFrequency       => r.cs_frequency,
            Metric::ChurnRiskScore    => r.churn_risk_score,
            Metric::CLVPerMonth       => r.clv_per_month,
            Metric::RecencyProxy      => r.recency_proxy,
            Metric::IFChurnFlag       => r.if_churn_flag.as_f64(),
        }
    }
}

pub const BOX_METRICS: [Metric; 3] = [
    Metric::PurchaseFrequency,
    Metric::CSFrequency,
    Metric::ChurnRiskScore,
];

pub const CORRELATION_METRICS: [Metric; 6] = [
    Metric::PurchaseFrequency,
    Metric::CSFrequency,
    Metric::ChurnRiskScore,
    Metric::CLVPerMonth,
    Metric::RecencyProxy,
    Metric::IFChurnFlag,
];

/// One metric split by the Isolation Forest flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagSplitBox {
    pub metric:      Metric,
    pub title:       &'static str,
    pub not_flagged: Option<BoxSummary>,
    pub flagged:     Option<BoxSummary>,
}

pub fn box_summaries_by_if_flag(records: &[CustomerRecord]) -> Vec<FlagSplitBox> {
    let (flagged, not_flagged): (Vec<&CustomerRecord>, Vec<&CustomerRecord>) =
        records.iter().partition(|r| r.if_churn_flag.is_set());

    BOX_METRICS
        .iter()
        .map(|&metric| {
            let values = |rows: &[&CustomerRecord]| -> Vec<f64> {
                rows.iter().map(|r| metric.value(r)).collect()
            };
            FlagSplitBox {
                metric,
                title: metric.title(),
                not_flagged: BoxSummary::from_values(&values(&not_flagged)),
                flagged: BoxSummary::from_values(&values(&flagged)),
            }
        })
        .collect()
}

// ── Correlation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<&'static str>,
    /// Row-major, `columns.len()` × `columns.len()`. NaN where undefined.
    pub values:  Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn compute(records: &[CustomerRecord], metrics: &[Metric]) -> Self {
        let series: Vec<Vec<f64>> = metrics
            .iter()
            .map(|m| records.iter().map(|r| m.value(r)).collect())
            .collect();

        let k = metrics.len();
        let mut values = vec![vec![f64::NAN; k]; k];
        for i in 0..k {
            for j in i..k {
                let c = pearson(&series[i], &series[j]);
                values[i][j] = c;
                values[j][i] = c;
            }
        }

        Self {
            columns: metrics.iter().map(|m| m.column()).collect(),
            values,
        }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlation. NaN with fewer than two points or zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantiles_use_linear_interpolation() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&v, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&v, 0.50), Some(2.5));
        assert_eq!(quantile_sorted(&v, 0.75), Some(3.25));
        assert_eq!(quantile_sorted(&[7.0], 0.5), Some(7.0));
    }

    #[test]
    fn quantile_of_empty_sample_is_none() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert!(BoxSummary::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn box_summary_flags_outliers() {
        let b = BoxSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(b.count, 5);
        assert_eq!(b.median, 3.0);
        assert_eq!(b.q1, 2.0);
        assert_eq!(b.q3, 4.0);
        assert_eq!(b.max, 100.0);
        assert_eq!(b.whisker_high, 4.0);
        assert_eq!(b.whisker_low, 1.0);
        assert_eq!(b.outliers, 1);
    }

    #[test]
    fn box_summary_empty_is_none() {
        assert!(BoxSummary::from_values(&[]).is_none());
    }

    #[test]
    fn pearson_linear_and_degenerate() {
        assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0], &[1.0]).is_nan());
    }

    #[test]
    fn share_rounds_to_two_decimals() {
        let c = DetectorCounts { total: 3, both: 1, ..Default::default() };
        assert_eq!(c.common_share_pct(), 33.33);
        assert_eq!(DetectorCounts::default().common_share_pct(), 0.0);
    }
}
