//! Churn type classification, risk normalisation and recommended actions
//! over rows loaded from CSV.

mod common;

use churnboard_core::{
    action::recommend,
    classifier::{classify, ChurnType},
    config::{BandThresholds, DashConfig},
    risk::{normalize, RiskBadge, RiskBand},
};
use common::scenario_table;

const EPS: f64 = 1e-9;

/// Flagged by both detectors: common churn, gauge at 0.9 on the overview divisor.
#[test]
fn common_churn_scenario() {
    let table = scenario_table();
    let r = table.find_by_customer_id("CUST00001").unwrap();

    assert_eq!(classify(r), ChurnType::CommonChurn);
    let level = normalize(r.churn_risk_score, DashConfig::default().overview_divisor);
    assert!((level - 0.9).abs() < EPS, "expected 0.9, got {level}");
}

/// IF only with a score above the detail divisor: clamps to 1.0, very high band.
#[test]
fn complaint_churn_scenario_clamps_to_very_high() {
    let table = scenario_table();
    let r = table.find_by_customer_id("CUST00002").unwrap();
    let config = DashConfig::default();

    assert_eq!(classify(r), ChurnType::ComplaintChurn);
    let badge = RiskBadge::new(r.churn_risk_score, config.detail_divisor, &config.bands);
    assert_eq!(badge.level, 1.0, "2.6 / 2.5 must clamp to 1.0");
    assert_eq!(badge.band, RiskBand::VeryHigh);
}

/// No flags with a low score: normal, 0.16 on the detail divisor, low band.
#[test]
fn normal_scenario_is_low_band() {
    let table = scenario_table();
    let r = table.find_by_customer_id("CUST00003").unwrap();

    assert_eq!(classify(r), ChurnType::Normal);
    let level = normalize(r.churn_risk_score, 2.5);
    assert!((level - 0.16).abs() < EPS, "expected 0.16, got {level}");
    assert_eq!(RiskBand::for_level(level, &BandThresholds::default()), RiskBand::Low);
}

/// AE only: silent churn with the re-engagement strategy.
#[test]
fn silent_churn_gets_re_engagement() {
    let table = scenario_table();
    let r = table.find_by_customer_id("CUST00004").unwrap();

    let t = classify(r);
    assert_eq!(t, ChurnType::SilentChurn);
    assert_eq!(recommend(t).category, "Re-engagement");
}

/// Every row classifies to exactly one of the four types.
#[test]
fn every_row_gets_exactly_one_type() {
    let table = scenario_table();
    for r in table.records() {
        let t = classify(r);
        assert!(ChurnType::ALL.contains(&t), "unexpected type {t:?}");
    }
}

/// The divisor is a parameter: the same score lands in different bands
/// depending on which view's divisor is applied.
#[test]
fn divisor_changes_band_not_classification() {
    let bands = BandThresholds::default();
    let score = 1.7;
    assert_eq!(RiskBand::for_level(normalize(score, 2.0), &bands), RiskBand::VeryHigh);
    assert_eq!(RiskBand::for_level(normalize(score, 2.5), &bands), RiskBand::Medium);
}
