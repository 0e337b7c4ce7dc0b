//! One row of the precomputed churn-score table.
//!
//! Column names follow the upstream export (`IF_ChurnFlag`, ...). The
//! non-underscored spellings are accepted as aliases.

use crate::types::{CustomerId, Flag};
use serde::{Deserialize, Serialize};

/// Canonical header name plus accepted aliases, for every required column.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("CustomerID",        &[]),
    ("IF_ChurnFlag",      &["IFChurnFlag"]),
    ("AE_ChurnFlag",      &["AEChurnFlag"]),
    ("Both_ChurnFlag",    &["BothChurnFlag"]),
    ("ChurnRiskScore",    &[]),
    ("PurchaseFrequency", &[]),
    ("CSFrequency",       &[]),
    ("RecencyProxy",      &[]),
    ("CLVPerMonth",       &[]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "CustomerID")]
    pub customer_id:        Option<CustomerId>,
    #[serde(rename = "IF_ChurnFlag", alias = "IFChurnFlag")]
    pub if_churn_flag:      Flag,
    #[serde(rename = "AE_ChurnFlag", alias = "AEChurnFlag")]
    pub ae_churn_flag:      Flag,
    #[serde(rename = "Both_ChurnFlag", alias = "BothChurnFlag")]
    pub both_churn_flag:    Flag,
    #[serde(rename = "ChurnRiskScore")]
    pub churn_risk_score:   f64,
    #[serde(rename = "PurchaseFrequency")]
    pub purchase_frequency: f64,
    #[serde(rename = "CSFrequency")]
    pub cs_frequency:       f64,
    #[serde(rename = "RecencyProxy")]
    pub recency_proxy:      f64,
    #[serde(rename = "CLVPerMonth")]
    pub clv_per_month:      f64,
}

impl CustomerRecord {
    /// The identifier, or `None` when the cell is empty or whitespace.
    pub fn id(&self) -> Option<&str> {
        self.customer_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    /// True when the precomputed `Both` flag disagrees with `IF AND AE`.
    pub fn both_flag_inconsistent(&self) -> bool {
        self.both_churn_flag.is_set()
            != (self.if_churn_flag.is_set() && self.ae_churn_flag.is_set())
    }

    /// The four headline metrics shown on both lookup views.
    pub fn key_metrics(&self) -> KeyMetrics {
        KeyMetrics {
            churn_risk_score:   self.churn_risk_score,
            purchase_frequency: self.purchase_frequency,
            cs_frequency:       self.cs_frequency,
            recency_proxy:      self.recency_proxy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub churn_risk_score:   f64,
    pub purchase_frequency: f64,
    pub cs_frequency:       f64,
    pub recency_proxy:      f64,
}

#[cfg(test)]
pub(crate) fn test_record(id: &str, if_f: bool, ae_f: bool, both_f: bool, score: f64) -> CustomerRecord {
    CustomerRecord {
        customer_id:        if id.is_empty() { None } else { Some(id.to_string()) },
        if_churn_flag:      if_f.into(),
        ae_churn_flag:      ae_f.into(),
        both_churn_flag:    both_f.into(),
        churn_risk_score:   score,
        purchase_frequency: 1.0,
        cs_frequency:       1.0,
        recency_proxy:      1.0,
        clv_per_month:      100.0,
    }
}
