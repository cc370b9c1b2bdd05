//! conf-registry: load `key = value` option files into one shared table
//!
//! Files are merged into a [`ConfigRegistry`], later loads replacing earlier
//! values, and read back through typed lookups that fall back to a default.

pub mod config;

pub use config::{ConfigRegistry, OptionKind, OptionValue, ParseError, TypedValue};
