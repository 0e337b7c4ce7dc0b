//! Plain-text rendering of the dashboard pages.

use churnboard_core::{
    classifier::Severity,
    detail::DetailPage,
    overview::{CustomerLookupView, OverviewPage},
    record::KeyMetrics,
    stats::BoxSummary,
};
use std::fmt::{self, Write};

const RULE: &str = "----------------------------------------";

pub fn overview(page: &OverviewPage) -> Result<String, fmt::Error> {
    let mut s = String::new();
    let c = &page.counts;

    writeln!(s, "=== CHURN OVERVIEW ===")?;
    writeln!(s, "  loaded at:          {}", page.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(s, "  total customers:    {}", c.total)?;
    writeln!(s, "  isolation forest:   {}", c.isolation_forest)?;
    writeln!(s, "  autoencoder:        {}", c.autoencoder)?;
    writeln!(s, "  common (both):      {} ({:.2}%)", c.both, page.common_share_pct)?;
    if c.inconsistent_both > 0 {
        writeln!(s, "  inconsistent both:  {}", c.inconsistent_both)?;
    }
    writeln!(s, "{RULE}")?;

    writeln!(s, "=== TOP {} AT-RISK CUSTOMERS ===", page.top_risky.len())?;
    if page.top_risky.is_empty() {
        writeln!(s, "  (No customers flagged by both models)")?;
    }
    for (rank, row) in page.top_risky.iter().enumerate() {
        writeln!(
            s,
            "  {:>2}. {:<12} | Risk: {:.2} | Purchase: {:.2} | CS: {:.2}",
            rank + 1, row.customer_id, row.churn_risk_score, row.purchase_frequency, row.cs_frequency,
        )?;
    }
    writeln!(s, "  * flagged as churn risk by both Isolation Forest and Autoencoder")?;
    writeln!(s, "{RULE}")?;

    writeln!(s, "=== CHURN RATE BY MODEL ===")?;
    for rate in &page.model_rates {
        writeln!(s, "  {:<17} {:>6.2}%", rate.model, rate.rate_pct)?;
    }
    writeln!(s, "{RULE}")?;

    writeln!(s, "=== KEY METRICS BY IF FLAG ===")?;
    for b in &page.boxes {
        writeln!(s, "  {}", b.title)?;
        writeln!(s, "    IF=0: {}", box_line(b.not_flagged.as_ref()))?;
        writeln!(s, "    IF=1: {}", box_line(b.flagged.as_ref()))?;
    }
    writeln!(s, "{RULE}")?;

    writeln!(s, "=== CORRELATION ===")?;
    let m = &page.correlation;
    write!(s, "  {:<18}", "")?;
    for col in &m.columns {
        write!(s, " {:>8}", short(col))?;
    }
    writeln!(s)?;
    for (col, row) in m.columns.iter().zip(&m.values) {
        write!(s, "  {:<18}", col)?;
        for v in row {
            if v.is_nan() {
                write!(s, " {:>8}", "-")?;
            } else {
                write!(s, " {:>8.2}", v)?;
            }
        }
        writeln!(s)?;
    }
    Ok(s)
}

pub fn lookup(view: &CustomerLookupView) -> Result<String, fmt::Error> {
    let mut s = String::new();
    match view {
        CustomerLookupView::NoSelection => {
            writeln!(s, "Enter a customer ID (e.g. CUST00010).")?;
        }
        CustomerLookupView::NotFound { customer_id } => {
            writeln!(s, "[!] Customer ID '{customer_id}' not found.")?;
        }
        CustomerLookupView::Found(p) => {
            writeln!(s, "=== PREDICTION: {} ===", p.customer_id)?;
            writeln!(s, "  Isolation Forest:  {}", p.isolation_forest.label())?;
            writeln!(s, "  Autoencoder:       {}", p.autoencoder.label())?;
            writeln!(s, "  Common verdict:    {}", p.common.label())?;
            writeln!(s, "{RULE}")?;
            metrics_block(&mut s, &p.metrics)?;
            writeln!(s, "  Risk gauge: {}", gauge(p.risk_level))?;
            writeln!(s, "{} {}", marker(p.severity), p.verdict)?;
        }
    }
    Ok(s)
}

pub fn detail(page: &DetailPage) -> Result<String, fmt::Error> {
    let mut s = String::new();
    match page {
        DetailPage::NoSelection { hint } => {
            writeln!(s, "[!] {hint}")?;
        }
        DetailPage::NotFound { customer_id } => {
            writeln!(s, "[x] Customer data for '{customer_id}' not found.")?;
        }
        DetailPage::Found(c) => {
            writeln!(s, "=== RETENTION STRATEGY: {} ===", c.customer_id)?;
            writeln!(s, "  Risk gauge: {}", gauge(c.badge.level))?;
            writeln!(s, "  Risk level: {}", c.badge.text)?;
            writeln!(s, "{RULE}")?;
            writeln!(s, "  Churn type: {} ({})", c.churn_type, c.churn_description)?;
            metrics_block(&mut s, &c.metrics)?;
            writeln!(s, "{RULE}")?;
            writeln!(s, "{} {}: {}", marker(c.strategy.severity), c.strategy.category, c.strategy.headline)?;
            for action in &c.strategy.actions {
                writeln!(s, "  - {action}")?;
            }
        }
    }
    Ok(s)
}

fn metrics_block(s: &mut String, m: &KeyMetrics) -> fmt::Result {
    writeln!(s, "  ChurnRiskScore:     {:.2}", m.churn_risk_score)?;
    writeln!(s, "  PurchaseFrequency:  {:.2}", m.purchase_frequency)?;
    writeln!(s, "  CSFrequency:        {:.2}", m.cs_frequency)?;
    writeln!(s, "  RecencyProxy:       {:.2}", m.recency_proxy)
}

fn box_line(b: Option<&BoxSummary>) -> String {
    match b {
        None => "(no rows)".into(),
        Some(b) => format!(
            "n={} min={:.2} q1={:.2} med={:.2} q3={:.2} max={:.2} outliers={}",
            b.count, b.min, b.q1, b.median, b.q3, b.max, b.outliers,
        ),
    }
}

/// Twenty-cell bar for a level in [0, 1].
fn gauge(level: f64) -> String {
    let filled = (level.clamp(0.0, 1.0) * 20.0).round() as usize;
    format!("[{}{}] {:>3.0}%", "#".repeat(filled), ".".repeat(20 - filled), level * 100.0)
}

fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[!!]",
        Severity::Warning  => "[!]",
        Severity::Info     => "[i]",
        Severity::Ok       => "[ok]",
    }
}

fn short(col: &str) -> String {
    col.chars().take(8).collect()
}
