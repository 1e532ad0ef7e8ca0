use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Currency code of a wallet or a rate (`USD`, `SGD`, `BTC`, `USDT`, ...).
///
/// The set of currencies is open: any code with a row in the rate table (plus
/// the configured base currency) is usable. Codes are normalized to upper
/// case on construction.
///
/// ## Minor units
///
/// Amounts of every currency are stored with the same fixed scale, see
/// [`Money::SCALE`](crate::Money::SCALE).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    const MIN_LEN: usize = 3;
    const MAX_LEN: usize = 10;

    /// Validates and normalizes a currency code.
    pub fn new(code: &str) -> Result<Self, EngineError> {
        let code = code.trim().to_ascii_uppercase();
        if code.len() < Self::MIN_LEN || code.len() > Self::MAX_LEN {
            return Err(EngineError::InvalidCurrency(format!(
                "currency code must be {}-{} characters, got '{code}'",
                Self::MIN_LEN,
                Self::MAX_LEN
            )));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EngineError::InvalidCurrency(format!(
                "currency code must be alphanumeric, got '{code}'"
            )));
        }
        Ok(Self(code))
    }

    /// Wraps a code known to be valid and upper case.
    pub(crate) fn from_static(code: &'static str) -> Self {
        Self(code.to_string())
    }

    /// Canonical currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Currency {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let ccy = Currency::new(" sgd ").unwrap();
        assert_eq!(ccy.code(), "SGD");
        assert_eq!(ccy, Currency::new("SGD").unwrap());
    }

    #[test]
    fn accepts_longer_crypto_codes() {
        assert_eq!(Currency::new("usdt").unwrap().to_string(), "USDT");
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(Currency::new("").is_err());
        assert!(Currency::new("US").is_err());
        assert!(Currency::new("U-S-D").is_err());
        assert!(Currency::new("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn deserializes_through_validation() {
        let ccy: Currency = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(ccy.code(), "EUR");
        assert!(serde_json::from_str::<Currency>("\"e\"").is_err());
    }
}
