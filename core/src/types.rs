//! Shared primitive types used across the dashboard core.

use serde::{Deserialize, Deserializer, Serialize};

/// A stable customer identifier, as it appears in the `CustomerID` column.
pub type CustomerId = String;

/// A detector output flag. Set iff the source cell equals 1.
///
/// Upstream exports write these as `0`/`1`, `0.0`/`1.0` or `true`/`false`
/// depending on the tool that produced the file, so all three parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Flag(bool);

impl Flag {
    pub const SET:   Flag = Flag(true);
    pub const CLEAR: Flag = Flag(false);

    pub fn is_set(self) -> bool {
        self.0
    }

    /// 0/1 encoding, as used by the correlation matrix.
    pub fn as_f64(self) -> f64 {
        if self.0 { 1.0 } else { 0.0 }
    }
}

impl From<bool> for Flag {
    fn from(v: bool) -> Self {
        Flag(v)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        match raw {
            "" => Ok(Flag::CLEAR),
            "true" | "True" | "TRUE" => Ok(Flag::SET),
            "false" | "False" | "FALSE" => Ok(Flag::CLEAR),
            other => other
                .parse::<f64>()
                .map(|v| Flag(v == 1.0))
                .map_err(|_| serde::de::Error::custom(format!("invalid flag value '{other}'"))),
        }
    }
}
