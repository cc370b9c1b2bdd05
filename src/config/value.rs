//! Conversion between raw option text and typed values.

use std::fmt;

/// A type an option value can be read as.
///
/// Implemented for `String`, the signed and unsigned integers of every
/// width, `f32` and `bool`. Parsing is locale-free: numbers are plain
/// decimal with an optional `-`, no `+` and no surrounding whitespace.
pub trait OptionValue: Sized {
    /// Convert raw option text, or `None` if it is not a valid value.
    fn from_option_str(raw: &str) -> Option<Self>;

    /// Render the value the way it would be written in an option file.
    fn to_option_string(&self) -> String;

    /// Render the value for "using default" diagnostics.
    fn display_default(&self) -> String {
        self.to_option_string()
    }
}

impl OptionValue for String {
    fn from_option_str(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn to_option_string(&self) -> String {
        self.clone()
    }
}

macro_rules! impl_parsed_option_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OptionValue for $ty {
                fn from_option_str(raw: &str) -> Option<Self> {
                    // `str::parse` takes a leading `+`, option files never did.
                    if raw.starts_with('+') {
                        return None;
                    }
                    raw.parse::<$ty>().ok()
                }

                fn to_option_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_parsed_option_value!(i8, i16, i32, i64, u8, u16, u32, u64, f32);

impl OptionValue for bool {
    fn from_option_str(raw: &str) -> Option<Self> {
        parse_bool(raw)
    }

    fn to_option_string(&self) -> String {
        String::from(if *self { "1" } else { "0" })
    }

    fn display_default(&self) -> String {
        self.to_string()
    }
}

/// Boolean text forms: `1/0`, `true/false`, `yes/no`, `on/off`, `y/n`,
/// case-insensitive.
pub fn parse_bool(raw: &str) -> Option<bool> {
    const TRUE: [&str; 5] = ["1", "true", "yes", "on", "y"];
    const FALSE: [&str; 5] = ["0", "false", "no", "off", "n"];

    if TRUE.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| raw.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

/// Runtime tag for the closed set of [`OptionValue`] types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OptionKind {
    String,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    Bool,
}

/// A value of one of the [`OptionKind`] types.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    Bool(bool),
}

impl OptionKind {
    /// Parse `raw` as this kind.
    pub fn parse(self, raw: &str) -> Option<TypedValue> {
        Some(match self {
            Self::String => TypedValue::String(String::from_option_str(raw)?),
            Self::I8 => TypedValue::I8(i8::from_option_str(raw)?),
            Self::I16 => TypedValue::I16(i16::from_option_str(raw)?),
            Self::I32 => TypedValue::I32(i32::from_option_str(raw)?),
            Self::I64 => TypedValue::I64(i64::from_option_str(raw)?),
            Self::U8 => TypedValue::U8(u8::from_option_str(raw)?),
            Self::U16 => TypedValue::U16(u16::from_option_str(raw)?),
            Self::U32 => TypedValue::U32(u32::from_option_str(raw)?),
            Self::U64 => TypedValue::U64(u64::from_option_str(raw)?),
            Self::F32 => TypedValue::F32(f32::from_option_str(raw)?),
            Self::Bool => TypedValue::Bool(bool::from_option_str(raw)?),
        })
    }

    /// The zero value of this kind, used when no default is given.
    pub fn zero(self) -> TypedValue {
        match self {
            Self::String => TypedValue::String(String::new()),
            Self::I8 => TypedValue::I8(0),
            Self::I16 => TypedValue::I16(0),
            Self::I32 => TypedValue::I32(0),
            Self::I64 => TypedValue::I64(0),
            Self::U8 => TypedValue::U8(0),
            Self::U16 => TypedValue::U16(0),
            Self::U32 => TypedValue::U32(0),
            Self::U64 => TypedValue::U64(0),
            Self::F32 => TypedValue::F32(0.0),
            Self::Bool => TypedValue::Bool(false),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(v) => f.write_str(v),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}
