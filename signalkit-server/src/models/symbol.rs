//! Ticker symbol validation
//!
//! Symbols are trimmed and uppercased so that `btc`, ` BTC ` and `BTC`
//! all refer to the same instrument when filtering.

use serde::Serialize;

use super::ValidationError;

/// Maximum length for a symbol
const MAX_SYMBOL_LEN: usize = 32;

/// Validated, uppercase ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol.
    ///
    /// # Example
    /// ```
    /// use signalkit_server::models::Symbol;
    ///
    /// assert_eq!(Symbol::new(" eth ").unwrap().as_str(), "ETH");
    /// assert!(Symbol::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let normalized = normalize(s);

        if normalized.is_empty() {
            return Err(ValidationError::Empty { field: "symbol" });
        }

        if normalized.chars().count() > MAX_SYMBOL_LEN {
            return Err(ValidationError::TooLong {
                field: "symbol",
                max: MAX_SYMBOL_LEN,
            });
        }

        Ok(Self(normalized))
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim and uppercase a raw symbol token.
pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_uppercase()
}
