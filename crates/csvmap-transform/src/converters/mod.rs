//! Converter implementations, one module per kind.
//!
//! Converters that can degrade expose a `try_*` form returning the reason
//! alongside the total form used by callers that only want a value.

pub mod case;
pub mod conditional;
pub mod date_format;
pub mod padding;
pub mod prefix;
pub mod replace;
pub mod split;
pub mod substring;
pub mod suffix;
pub mod trim;

pub use case::case;
pub use conditional::{conditional, try_conditional};
pub use date_format::{DateFields, DateTemplate, DateToken, date_format, try_date_format};
pub use padding::padding;
pub use prefix::{prefix, render_clock};
pub use replace::replace;
pub use split::{split, try_split};
pub use substring::substring;
pub use suffix::suffix;
pub use trim::trim;
