//! Path grammar for nested access
//!
//! A path is a delimiter-joined string (default `.`), a single scalar key,
//! or an explicit list of segments. Three segment literals are reserved:
//!
//! - `*` fans the rest of the path out over every element
//! - `>` merges the elements' members one level into a single list, and
//!   later segments address that merged list
//! - `|` closes the innermost open fan-out so later segments address the
//!   collected list itself
//!
//! Everything else is a literal key.

pub mod error;
pub mod parser;
pub mod token;

pub use error::{PathError, PathResult};
pub use parser::{PathParser, DEFAULT_DELIMITER};
pub use token::{RawPath, Token};
