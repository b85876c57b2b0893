//! Domain models with validation at construction
//!
//! Client input is validated when converting into these types.
//! Invalid input returns ValidationError, not panic.

pub mod query;
pub mod side;
pub mod signal;
pub mod symbol;
pub mod validation;

pub use query::{SignalQuery, DEFAULT_LIMIT, MAX_LIMIT};
pub use side::Side;
pub use signal::{NewSignal, Signal, SignalInput};
pub use symbol::Symbol;
pub use validation::ValidationError;
