//! Option file loading and the shared option table
//!
//! Files are parsed independently, then merged into one table where later
//! loads replace earlier values. Lookups convert on read and fall back to a
//! caller-supplied default.

pub mod encoding;
pub mod error;
pub mod parser;
pub mod registry;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ParseError, ParseResult};
pub use parser::{parse_file, FileOptions};
pub use registry::{ConfigRegistry, CONFIG_PATH, DIST_SUFFIX};
pub use value::{OptionKind, OptionValue, TypedValue};
