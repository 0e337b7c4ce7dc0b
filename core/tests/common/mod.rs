//! Shared fixtures for integration tests.
#![allow(dead_code)]

use churnboard_core::table::CustomerTable;

pub const HEADER: &str = "CustomerID,IF_ChurnFlag,AE_ChurnFlag,Both_ChurnFlag,ChurnRiskScore,\
PurchaseFrequency,CSFrequency,RecencyProxy,CLVPerMonth";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One CSV row with neutral metrics.
pub fn row(id: &str, if_f: u8, ae_f: u8, both_f: u8, score: f64) -> String {
    format!("{id},{if_f},{ae_f},{both_f},{score},1.00,1.00,0.50,100.0")
}

pub fn table_from_rows(rows: &[String]) -> CustomerTable {
    init_logging();
    let mut csv = String::from(HEADER);
    for r in rows {
        csv.push('\n');
        csv.push_str(r);
    }
    csv.push('\n');
    CustomerTable::from_reader(csv.as_bytes()).unwrap()
}

/// The three worked scenarios plus one silent churner.
pub fn scenario_table() -> CustomerTable {
    table_from_rows(&[
        row("CUST00001", 1, 1, 1, 1.8),
        row("CUST00002", 1, 0, 0, 2.6),
        row("CUST00003", 0, 0, 0, 0.4),
        row("CUST00004", 0, 1, 0, 1.3),
    ])
}
