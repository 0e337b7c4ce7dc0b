//! In-memory customer table.
//!
//! RULE: the table is loaded once per session and never mutated.
//! Every view borrows from it; nothing here hands out `&mut`.

use crate::{
    error::{DashError, DashResult},
    record::{CustomerRecord, REQUIRED_COLUMNS},
};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CustomerTable {
    records:   Vec<CustomerRecord>,
    source:    Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl CustomerTable {
    /// Read the CSV at `path`. A missing file or a missing required column
    /// is fatal for the caller.
    pub fn load<P: AsRef<Path>>(path: P) -> DashResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let mut table = Self::from_reader(file)?;
        table.source = Some(path.to_path_buf());
        log::info!("loaded {} customer rows from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> DashResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        check_required_columns(&headers)?;

        let records = rdr
            .deserialize::<CustomerRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        let table = Self::from_records(records);
        table.warn_on_data_issues();
        Ok(table)
    }

    pub fn from_records(records: Vec<CustomerRecord>) -> Self {
        Self {
            records,
            source: None,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Exact string match on `CustomerID`. First row in file order wins.
    pub fn find_by_customer_id(&self, id: &str) -> Option<&CustomerRecord> {
        find_by_customer_id(&self.records, id)
    }

    /// Highest-risk common-churn customers. See [`top_risky`].
    pub fn top_risky(&self, n: usize) -> Vec<&CustomerRecord> {
        top_risky(&self.records, n)
    }

    fn warn_on_data_issues(&self) {
        let mut seen = HashSet::new();
        let mut duplicates = 0usize;
        let mut missing_ids = 0usize;
        for r in &self.records {
            match r.id() {
                Some(id) => {
                    if !seen.insert(id) {
                        duplicates += 1;
                    }
                }
                None => missing_ids += 1,
            }
        }
        if duplicates > 0 {
            log::warn!("{duplicates} duplicate CustomerID rows; lookups return the first match");
        }
        if missing_ids > 0 {
            log::debug!("{missing_ids} rows without CustomerID");
        }

        let inconsistent = self.records.iter().filter(|r| r.both_flag_inconsistent()).count();
        if inconsistent > 0 {
            log::warn!(
                "{inconsistent} rows where Both_ChurnFlag != IF_ChurnFlag AND AE_ChurnFlag; \
                 flags are used as given"
            );
        }
    }
}

fn check_required_columns(headers: &csv::StringRecord) -> DashResult<()> {
    for (canonical, aliases) in REQUIRED_COLUMNS {
        let present = headers
            .iter()
            .any(|h| h == *canonical || aliases.contains(&h));
        if !present {
            return Err(DashError::MissingColumn { column: (*canonical).to_string() });
        }
    }
    Ok(())
}

pub fn find_by_customer_id<'a>(records: &'a [CustomerRecord], id: &str) -> Option<&'a CustomerRecord> {
    records.iter().find(|r| r.customer_id.as_deref() == Some(id))
}

/// Rows flagged by both detectors, highest `ChurnRiskScore` first.
///
/// Rows without an identifier are dropped. The sort is stable, so equal
/// scores keep file order. Unparseable (NaN) scores rank last. At most `n`
/// rows are returned.
pub fn top_risky(records: &[CustomerRecord], n: usize) -> Vec<&CustomerRecord> {
    let mut risky: Vec<&CustomerRecord> = records
        .iter()
        .filter(|r| r.both_churn_flag.is_set())
        .filter(|r| r.id().is_some())
        .collect();
    // NaN scores sink to the bottom instead of outranking real ones.
    risky.sort_by(|a, b| {
        let (x, y) = (a.churn_risk_score, b.churn_risk_score);
        match (x.is_nan(), y.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => y.total_cmp(&x),
        }
    });
    risky.truncate(n);
    risky
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_record;

    #[test]
    fn top_risky_keeps_file_order_on_ties() {
        let rows = vec![
            test_record("A", true, true, true, 1.0),
            test_record("B", true, true, true, 1.5),
            test_record("C", true, true, true, 1.0),
        ];
        let ids: Vec<_> = top_risky(&rows, 10).iter().filter_map(|r| r.id()).collect();
        assert_eq!(ids, ["B", "A", "C"]);
    }

    #[test]
    fn top_risky_drops_missing_ids() {
        let rows = vec![
            test_record("", true, true, true, 9.0),
            test_record("A", true, true, true, 1.0),
        ];
        let top = top_risky(&rows, 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id(), Some("A"));
    }

    #[test]
    fn find_returns_first_duplicate() {
        let rows = vec![
            test_record("A", false, false, false, 0.1),
            test_record("A", true, false, false, 0.9),
        ];
        let found = find_by_customer_id(&rows, "A").unwrap();
        assert_eq!(found.churn_risk_score, 0.1);
    }
}
