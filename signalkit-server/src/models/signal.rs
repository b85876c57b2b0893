//! Signal records
//!
//! `SignalInput` is what clients send, `NewSignal` is the validated form
//! handed to a store, and `Signal` is a stored row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Side, Symbol, ValidationError};

/// A stored trading signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: Uuid,
    pub symbol: String,
    pub side: Side,
    pub price: f64,
    pub confidence: Option<f64>,
    pub note: Option<String>,
    pub ts: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Validated signal ready for insertion.
///
/// `ts` left as `None` is filled with the current time by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSignal {
    pub symbol: Symbol,
    pub side: Side,
    pub price: f64,
    pub confidence: Option<f64>,
    pub note: Option<String>,
    pub ts: Option<DateTime<Utc>>,
}

/// Raw create request body
#[derive(Debug, Clone, Deserialize)]
pub struct SignalInput {
    pub symbol: String,
    pub side: String,
    pub price: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub ts: Option<DateTime<Utc>>,
}

impl SignalInput {
    /// Validate into a `NewSignal`.
    ///
    /// The side is checked first so a bad direction is always reported as
    /// such, whatever else is wrong with the payload.
    pub fn validate(self) -> Result<NewSignal, ValidationError> {
        let side = self.side.parse::<Side>()?;
        let symbol = Symbol::new(&self.symbol)?;

        if !self.price.is_finite() {
            return Err(ValidationError::NotFinite { field: "price" });
        }
        if matches!(self.confidence, Some(c) if !c.is_finite()) {
            return Err(ValidationError::NotFinite { field: "confidence" });
        }

        Ok(NewSignal {
            symbol,
            side,
            price: self.price,
            confidence: self.confidence,
            note: self.note,
            ts: self.ts,
        })
    }
}
