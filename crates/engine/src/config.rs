//! Ledger configuration handed to [`EngineBuilder`](crate::EngineBuilder).

use crate::Currency;

/// Settings the engine needs at construction time.
///
/// Built once by the binary from its settings file and passed by value to
/// the builder; the engine keeps no other configuration state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Reference currency every cross rate pivots through. Its rate against
    /// itself is exactly 1 and is never stored.
    pub base_currency: Currency,
}

impl LedgerConfig {
    pub const DEFAULT_BASE_CURRENCY: &'static str = "USD";

    pub fn new(base_currency: Currency) -> Self {
        Self { base_currency }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_currency: Currency::from_static(Self::DEFAULT_BASE_CURRENCY),
        }
    }
}
