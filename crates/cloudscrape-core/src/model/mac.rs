// ── Hardware identity ──

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MAC address, normalized to lowercase colon-separated form
/// (`aa:bb:cc:dd:ee:ff`).
///
/// The dashboard is inconsistent about case and sometimes emits
/// dash-separated addresses; everything downstream (checkin fetches,
/// record-store keys, user-to-node association) compares normalized forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address from any common format.
    /// Accepts colon-separated, dash-separated, or bare hex.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_lowercase().replace('-', ":");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_separators() {
        assert_eq!(MacAddress::new("AA-BB-CC-DD-EE-FF").as_str(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(MacAddress::new(" aa:bb:cc:dd:ee:ff ").as_str(), "aa:bb:cc:dd:ee:ff");
    }
}
