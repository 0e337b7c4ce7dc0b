//! Customer detail page: churn type, risk badge, and retention strategy.

use crate::{
    action::{recommend, ActionSet},
    classifier::{classify, ChurnType},
    config::DashConfig,
    lookup::{NavParam, Selection},
    record::KeyMetrics,
    risk::RiskBadge,
    table::CustomerTable,
    types::CustomerId,
};
use serde::Serialize;

pub const NO_SELECTION_HINT: &str =
    "No customer selected. Pick a customer on the main dashboard.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerStrategy {
    pub customer_id:       CustomerId,
    pub churn_type:        ChurnType,
    /// One-line gloss of the churn type, e.g. "quietly disengaging".
    pub churn_description: &'static str,
    pub badge:             RiskBadge,
    pub metrics:           KeyMetrics,
    pub strategy:          ActionSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailPage {
    NoSelection { hint: &'static str },
    NotFound { customer_id: CustomerId },
    Found(CustomerStrategy),
}

impl DetailPage {
    pub fn build(table: &CustomerTable, param: Option<&NavParam>, config: &DashConfig) -> Self {
        match Selection::resolve(table, param) {
            Selection::NoSelection => DetailPage::NoSelection { hint: NO_SELECTION_HINT },
            Selection::NotFound(customer_id) => DetailPage::NotFound { customer_id },
            Selection::Found(r) => {
                let churn_type = classify(r);
                let badge = RiskBadge::new(r.churn_risk_score, config.detail_divisor, &config.bands);
                log::debug!(
                    "detail built: {:?} type={} band={:?}",
                    r.customer_id, churn_type.key(), badge.band,
                );
                DetailPage::Found(CustomerStrategy {
                    customer_id: r.id().unwrap_or_default().to_string(),
                    churn_type,
                    churn_description: churn_type.description(),
                    badge,
                    metrics: r.key_metrics(),
                    strategy: recommend(churn_type),
                })
            }
        }
    }
}
