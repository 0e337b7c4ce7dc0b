//! Recommended retention actions per churn type.

use crate::classifier::{ChurnType, Severity};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSet {
    pub churn_type: ChurnType,
    pub category:   &'static str,
    pub severity:   Severity,
    pub headline:   &'static str,
    pub actions:    Vec<&'static str>,
}

pub fn recommend(churn_type: ChurnType) -> ActionSet {
    let (category, headline, actions): (&'static str, &'static str, &[&'static str]) = match churn_type {
        ChurnType::CommonChurn => (
            "VIP retention",
            "Core customer retention needed: VIP care, premium benefits",
            &[
                "Review and resolve recent complaints",
                "Assign dedicated support and send a retention coupon",
            ],
        ),
        ChurnType::ComplaintChurn => (
            "Support quality improvement",
            "Complaint-resolution customer: improve support quality",
            &[
                "Audit support-contact history and act on handling feedback",
                "Run a post-resolution satisfaction survey",
            ],
        ),
        ChurnType::SilentChurn => (
            "Re-engagement",
            "Inactive customer: re-engagement strategy needed",
            &[
                "Send remarketing emails and discount coupons",
                "Push app re-visit notifications",
            ],
        ),
        ChurnType::Normal => (
            "Long-term retention",
            "Normal customer: long-term retention strategy",
            &[
                "Encourage referral and loyalty program enrollment",
                "Expand membership benefits",
            ],
        ),
    };

    ActionSet {
        churn_type,
        category,
        severity: churn_type.severity(),
        headline,
        actions: actions.to_vec(),
    }
}
