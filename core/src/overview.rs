//! Analysis dashboard page and its per-customer lookup tab.
//!
//! The overview gauge uses `DashConfig::overview_divisor`. The detail
//! page uses its own divisor; the two are configured independently.

use crate::{
    classifier::{classify, ChurnType, Severity},
    config::DashConfig,
    lookup::Selection,
    record::{CustomerRecord, KeyMetrics},
    risk::normalize,
    stats::{box_summaries_by_if_flag, CorrelationMatrix, DetectorCounts, FlagSplitBox, ModelRate, CORRELATION_METRICS},
    table::CustomerTable,
    types::CustomerId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ── Analysis tab ─────────────────────────────────────────────────────────────

/// Projection of a top-risk row for the ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskyCustomerRow {
    pub customer_id:        CustomerId,
    pub churn_risk_score:   f64,
    pub purchase_frequency: f64,
    pub cs_frequency:       f64,
}

impl RiskyCustomerRow {
    fn from_record(r: &CustomerRecord) -> Option<Self> {
        Some(Self {
            customer_id:        r.id()?.to_string(),
            churn_risk_score:   r.churn_risk_score,
            purchase_frequency: r.purchase_frequency,
            cs_frequency:       r.cs_frequency,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewPage {
    pub loaded_at:        DateTime<Utc>,
    pub counts:           DetectorCounts,
    pub common_share_pct: f64,
    pub top_risky:        Vec<RiskyCustomerRow>,
    pub model_rates:      Vec<ModelRate>,
    pub boxes:            Vec<FlagSplitBox>,
    pub correlation:      CorrelationMatrix,
}

impl OverviewPage {
    pub fn build(table: &CustomerTable, config: &DashConfig) -> Self {
        let records = table.records();
        let counts = DetectorCounts::compute(records);

        let top_risky = table
            .top_risky(config.top_n)
            .into_iter()
            .filter_map(RiskyCustomerRow::from_record)
            .collect::<Vec<_>>();

        log::debug!(
            "overview built: total={} both={} top_risky={}",
            counts.total, counts.both, top_risky.len(),
        );

        Self {
            loaded_at: table.loaded_at(),
            counts,
            common_share_pct: counts.common_share_pct(),
            top_risky,
            model_rates: counts.model_rates(),
            boxes: box_summaries_by_if_flag(records),
            correlation: CorrelationMatrix::compute(records, &CORRELATION_METRICS),
        }
    }
}

// ── Lookup tab ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorVerdict {
    SuspectedChurn,
    Normal,
}

impl DetectorVerdict {
    fn from_flag(set: bool) -> Self {
        if set { DetectorVerdict::SuspectedChurn } else { DetectorVerdict::Normal }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetectorVerdict::SuspectedChurn => "suspected churn",
            DetectorVerdict::Normal         => "normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerPrediction {
    pub customer_id:      CustomerId,
    pub isolation_forest: DetectorVerdict,
    pub autoencoder:      DetectorVerdict,
    pub common:           DetectorVerdict,
    pub metrics:          KeyMetrics,
    /// Gauge level in [0, 1].
    pub risk_level:       f64,
    pub churn_type:       ChurnType,
    pub severity:         Severity,
    pub verdict:          &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CustomerLookupView {
    NoSelection,
    NotFound { customer_id: CustomerId },
    Found(CustomerPrediction),
}

impl CustomerLookupView {
    pub fn build(table: &CustomerTable, input: &str, config: &DashConfig) -> Self {
        match Selection::from_input(table, input) {
            Selection::NoSelection => CustomerLookupView::NoSelection,
            Selection::NotFound(customer_id) => CustomerLookupView::NotFound { customer_id },
            Selection::Found(r) => {
                let churn_type = classify(r);
                CustomerLookupView::Found(CustomerPrediction {
                    customer_id:      input.to_string(),
                    isolation_forest: DetectorVerdict::from_flag(r.if_churn_flag.is_set()),
                    autoencoder:      DetectorVerdict::from_flag(r.ae_churn_flag.is_set()),
                    common:           DetectorVerdict::from_flag(r.both_churn_flag.is_set()),
                    metrics:          r.key_metrics(),
                    risk_level:       normalize(r.churn_risk_score, config.overview_divisor),
                    churn_type,
                    severity:         churn_type.severity(),
                    verdict:          churn_type.verdict(),
                })
            }
        }
    }
}
