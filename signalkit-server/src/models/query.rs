//! Signal list query: symbol filter and row limit

use super::symbol::normalize;
use super::validation::ValidationError;

/// Maximum rows returned by a single list call
pub const MAX_LIMIT: u32 = 500;

/// Rows returned when no limit is given
pub const DEFAULT_LIMIT: u32 = 50;

/// Parameters for listing signals, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalQuery {
    symbols: Vec<String>,
    limit: u32,
}

impl SignalQuery {
    /// Create a query with the given limit.
    ///
    /// - Missing limit falls back to 50
    /// - Limit is clamped to 1..=500
    pub fn new(limit: Option<i64>) -> Self {
        let limit = match limit {
            Some(n) => n.clamp(1, i64::from(MAX_LIMIT)) as u32,
            None => DEFAULT_LIMIT,
        };

        Self {
            symbols: Vec::new(),
            limit,
        }
    }

    /// Create a query, rejecting a limit outside 1..=500.
    ///
    /// Missing limit falls back to 50.
    pub fn checked(limit: Option<i64>) -> Result<Self, ValidationError> {
        if let Some(n) = limit {
            if !(1..=i64::from(MAX_LIMIT)).contains(&n) {
                return Err(ValidationError::OutOfRange {
                    field: "limit",
                    min: 1,
                    max: i64::from(MAX_LIMIT),
                    value: n,
                });
            }
        }
        Ok(Self::new(limit))
    }

    /// Restrict the query to the given symbols.
    ///
    /// Each entry is trimmed and uppercased; blank entries are dropped and
    /// duplicates collapse. An empty result means "no filter".
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for raw in symbols {
            let symbol = normalize(raw.as_ref());
            if !symbol.is_empty() && !self.symbols.contains(&symbol) {
                self.symbols.push(symbol);
            }
        }
        self
    }

    /// Restrict the query to a comma separated list such as `"BTC,eth, SOL"`.
    pub fn with_symbol_list(self, list: &str) -> Self {
        self.with_symbols(list.split(','))
    }

    /// Normalized symbol filter. Empty when unfiltered.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Whether a stored symbol passes the filter.
    pub fn matches(&self, symbol: &str) -> bool {
        self.symbols.is_empty() || self.symbols.iter().any(|s| s == symbol)
    }
}

impl Default for SignalQuery {
    fn default() -> Self {
        Self::new(None)
    }
}
