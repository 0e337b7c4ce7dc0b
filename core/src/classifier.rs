//! Churn type classifier.
//!
//! RULE: the first matching rule wins. Flags are not independent:
//! a row with IF and AE set but Both clear is a complaint churn, because
//! only the flags actually present are consulted. The `Both` column is
//! never recomputed from the other two.

use crate::record::CustomerRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnType {
    /// Flagged by both detectors: high-confidence churn.
    CommonChurn,
    /// Isolation Forest only: active but dissatisfied.
    ComplaintChurn,
    /// Autoencoder only: quietly disengaging.
    SilentChurn,
    Normal,
}

/// How loudly a view should present a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
    Ok,
}

type Rule = (fn(&CustomerRecord) -> bool, ChurnType);

/// Ordered (predicate, label) table. Position is precedence.
const RULES: [Rule; 3] = [
    (flagged_by_both, ChurnType::CommonChurn),
    (flagged_by_if,   ChurnType::ComplaintChurn),
    (flagged_by_ae,   ChurnType::SilentChurn),
];

fn flagged_by_both(r: &CustomerRecord) -> bool { r.both_churn_flag.is_set() }
fn flagged_by_if(r: &CustomerRecord) -> bool { r.if_churn_flag.is_set() }
fn flagged_by_ae(r: &CustomerRecord) -> bool { r.ae_churn_flag.is_set() }

pub fn classify(record: &CustomerRecord) -> ChurnType {
    RULES
        .iter()
        .find(|(matches, _)| matches(record))
        .map(|(_, label)| *label)
        .unwrap_or(ChurnType::Normal)
}

impl ChurnType {
    pub const ALL: [ChurnType; 4] = [
        ChurnType::CommonChurn,
        ChurnType::ComplaintChurn,
        ChurnType::SilentChurn,
        ChurnType::Normal,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ChurnType::CommonChurn    => "common_churn",
            ChurnType::ComplaintChurn => "complaint_churn",
            ChurnType::SilentChurn    => "silent_churn",
            ChurnType::Normal         => "normal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChurnType::CommonChurn    => "Common churn",
            ChurnType::ComplaintChurn => "Complaint churn (IF)",
            ChurnType::SilentChurn    => "Silent churn (AE)",
            ChurnType::Normal         => "Normal",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChurnType::CommonChurn    => "high-confidence churn",
            ChurnType::ComplaintChurn => "active but dissatisfied",
            ChurnType::SilentChurn    => "quietly disengaging",
            ChurnType::Normal         => "no churn signal",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            ChurnType::CommonChurn    => Severity::Critical,
            ChurnType::ComplaintChurn => Severity::Warning,
            ChurnType::SilentChurn    => Severity::Info,
            ChurnType::Normal         => Severity::Ok,
        }
    }

    /// Verdict line shown on the overview lookup tab.
    pub fn verdict(self) -> &'static str {
        match self {
            ChurnType::CommonChurn =>
                "This customer is classified as high-confidence churn. Immediate care is needed.",
            ChurnType::ComplaintChurn =>
                "Active but highly dissatisfied customer. Support management needed.",
            ChurnType::SilentChurn =>
                "This customer may be quietly churning. Remarketing is needed.",
            ChurnType::Normal =>
                "Classified as a normal customer. Retention management target.",
        }
    }
}

impl std::fmt::Display for ChurnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_record;

    #[test]
    fn every_flag_combination_resolves_by_precedence() {
        for bits in 0u8..8 {
            let (if_f, ae_f, both_f) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let got = classify(&test_record("C", if_f, ae_f, both_f, 0.0));
            let expected = if both_f {
                ChurnType::CommonChurn
            } else if if_f {
                ChurnType::ComplaintChurn
            } else if ae_f {
                ChurnType::SilentChurn
            } else {
                ChurnType::Normal
            };
            assert_eq!(got, expected, "if={if_f} ae={ae_f} both={both_f}");
        }
    }

    #[test]
    fn both_detectors_without_both_flag_is_complaint_churn() {
        let r = test_record("C", true, true, false, 1.0);
        assert_eq!(classify(&r), ChurnType::ComplaintChurn);
    }

    #[test]
    fn keys_are_snake_case_serde_names() {
        for t in ChurnType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.key()));
        }
    }
}
