//! Pure text extractors.
//!
//! Both extractors are deterministic functions with no side effects:
//! - `keywords`: significant-token extraction for lexical overlap scoring
//! - `extract_numeric`: first numeric/percentage value in a text

pub mod keywords;
pub mod numeric;

// Re-export key functions and types
pub use keywords::keywords;
pub use numeric::{extract_numeric, NumericKind, NumericValue};
