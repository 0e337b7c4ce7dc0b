//! Customer selection from a typed id or a navigation parameter.
//!
//! Two distinct non-found states:
//!   - `NoSelection`: nothing was supplied (absent, empty, or blank)
//!   - `NotFound`:    an id was supplied but no row matches it exactly

use crate::{record::CustomerRecord, table::CustomerTable};
use serde::{Deserialize, Serialize};

/// The `customer_id` navigation parameter as it arrives from the caller.
///
/// Some front ends hand over a single string, others a list of fragments
/// (one per character in the worst case). Lists are joined with no separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavParam {
    Single(String),
    Fragments(Vec<String>),
}

impl NavParam {
    /// Joined raw value. Not trimmed: lookups are exact.
    pub fn value(&self) -> String {
        match self {
            NavParam::Single(s) => s.clone(),
            NavParam::Fragments(parts) => parts.concat(),
        }
    }

    /// Extract `customer_id` from a URL query string such as
    /// `?customer_id=CUST00010&tab=detail`. Repeated keys are joined.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.trim_start_matches('?');
        let values: Vec<String> = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| key == "customer_id")
            .map(|(_, value)| value.into_owned())
            .collect();

        match values.len() {
            0 => None,
            1 => values.into_iter().next().map(NavParam::Single),
            _ => Some(NavParam::Fragments(values)),
        }
    }
}

/// The id to look up, or `None` for "no selection".
pub fn selected_id(param: Option<&NavParam>) -> Option<String> {
    param
        .map(NavParam::value)
        .filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    NoSelection,
    NotFound(String),
    Found(&'a CustomerRecord),
}

impl<'a> Selection<'a> {
    pub fn resolve(table: &'a CustomerTable, param: Option<&NavParam>) -> Self {
        match selected_id(param) {
            None => Selection::NoSelection,
            Some(id) => match table.find_by_customer_id(&id) {
                Some(record) => Selection::Found(record),
                None => {
                    log::debug!("customer lookup miss: '{id}'");
                    Selection::NotFound(id)
                }
            },
        }
    }

    /// Resolve a plain typed id (the overview lookup tab).
    pub fn from_input(table: &'a CustomerTable, input: &str) -> Self {
        Self::resolve(table, Some(&NavParam::Single(input.to_string())))
    }
}
