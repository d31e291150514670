//! Cell name parsing and normalization.
//!
//! A cell name is one or more ASCII letters followed by one or more ASCII
//! digits (`A1`, `bc27`, `Zz0`). Names are case-insensitive; the canonical
//! form is uppercase.
//!
//! # Examples
//!
//! ```
//! use cellgraph_engine::engine::CellName;
//!
//! let cell = CellName::from_str("bc27").unwrap();
//! assert_eq!(cell.as_str(), "BC27");
//! assert!(CellName::from_str("27bc").is_none());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A validated, uppercase cell name.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellName(String);

impl CellName {
    /// Parse a cell name, normalizing it to uppercase.
    /// Returns None if the input is not letters followed by digits.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellName> {
        if Self::is_valid(name) {
            Some(CellName(name.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// Whether `name` has the letters-then-digits shape, in any case.
    pub fn is_valid(name: &str) -> bool {
        cell_name_re().is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn cell_name_re() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]+[0-9]+$").expect("cell name regex must compile")
    })
}

impl std::str::FromStr for CellName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellName::from_str(s).ok_or_else(|| format!("Invalid cell name: {}", s))
    }
}

impl TryFrom<String> for CellName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellName> for String {
    fn from(name: CellName) -> String {
        name.0
    }
}

impl AsRef<str> for CellName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::CellName;

    #[test]
    fn test_from_str_normalizes_case() {
        assert_eq!(CellName::from_str("a1").unwrap().as_str(), "A1");
        assert_eq!(CellName::from_str("xYz99").unwrap().as_str(), "XYZ99");
    }

    #[test]
    fn test_zero_row_is_valid() {
        // Digits are not interpreted as a row index; only the shape matters.
        assert!(CellName::from_str("A0").is_some());
        assert!(CellName::from_str("A007").is_some());
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        for bad in ["", "A", "1", "1A", "A1A", "A 1", " A1", "A1 ", "A-1", "$A$1", "Ä1"] {
            assert!(CellName::from_str(bad).is_none(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_serde_roundtrip_rejects_invalid() {
        let name: CellName = serde_json::from_str("\"b2\"").unwrap();
        assert_eq!(name.as_str(), "B2");
        assert!(serde_json::from_str::<CellName>("\"2b\"").is_err());
    }
}
