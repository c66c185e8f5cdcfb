//! String-to-typed-value decoding for hydrated fields.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::num::{ParseFloatError, ParseIntError};
use std::time::Duration;

use thiserror::Error;

/// Error converting a raw parameter value into its destination type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("invalid integer literal '{value}': {source}")]
    Int {
        value: String,
        source: ParseIntError,
    },

    #[error("invalid float literal '{value}': {source}")]
    Float {
        value: String,
        source: ParseFloatError,
    },

    #[error("invalid boolean literal '{value}'")]
    Bool { value: String },

    #[error("invalid duration '{value}': {source}")]
    Duration {
        value: String,
        source: humantime::DurationError,
    },

    #[error("map entry '{entry}' is not a 'key:value' pair")]
    MapEntry { entry: String },
}

/// Types a raw parameter value can be decoded into.
///
/// The supported set is closed: text, booleans, integers of every width,
/// floats, [`Duration`] (duration-literal syntax such as `"5m"` or `"1h30m"`),
/// byte buffers (`Vec<u8>`, taken verbatim), comma-delimited sequences of the
/// other scalars, and `:`-paired maps of scalars. Anything else cannot be
/// registered as a leaf binding.
///
/// Integer literals recognize the explicit `0x`/`0o`/`0b` radix prefixes
/// only. Legacy leading-zero octal is intentionally not recognized
/// (`"0755"` is decimal 755), and `_` digit separators are not accepted.
pub trait FromParam: Sized {
    fn from_param(raw: &str) -> Result<Self, DecodeError>;
}

impl FromParam for String {
    fn from_param(raw: &str) -> Result<Self, DecodeError> {
        Ok(raw.to_string())
    }
}

impl FromParam for bool {
    fn from_param(raw: &str) -> Result<Self, DecodeError> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(DecodeError::Bool {
                value: raw.to_string(),
            }),
        }
    }
}

impl FromParam for Duration {
    fn from_param(raw: &str) -> Result<Self, DecodeError> {
        humantime::parse_duration(raw).map_err(|source| DecodeError::Duration {
            value: raw.to_string(),
            source,
        })
    }
}

macro_rules! impl_from_param_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromParam for $ty {
            fn from_param(raw: &str) -> Result<Self, DecodeError> {
                let (literal, radix) = split_radix(raw);
                <$ty>::from_str_radix(&literal, radix).map_err(|source| DecodeError::Int {
                    value: raw.to_string(),
                    source,
                })
            }
        }
    )*};
}

impl_from_param_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_param_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromParam for $ty {
            fn from_param(raw: &str) -> Result<Self, DecodeError> {
                raw.parse::<$ty>().map_err(|source| DecodeError::Float {
                    value: raw.to_string(),
                    source,
                })
            }
        }
    )*};
}

impl_from_param_float!(f32, f64);

/// Byte buffers take the raw string verbatim; no delimiter splitting.
impl FromParam for Vec<u8> {
    fn from_param(raw: &str) -> Result<Self, DecodeError> {
        Ok(raw.as_bytes().to_vec())
    }
}

// Delimited sequences are implemented per concrete scalar so they cannot
// collide with the verbatim Vec<u8> impl above.
macro_rules! impl_from_param_vec {
    ($($ty:ty),* $(,)?) => {$(
        impl FromParam for Vec<$ty> {
            fn from_param(raw: &str) -> Result<Self, DecodeError> {
                split_delimited(raw)
            }
        }
    )*};
}

impl_from_param_vec!(
    String, bool, i8, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64, Duration,
);

impl<K, V> FromParam for HashMap<K, V>
where
    K: FromParam + Eq + Hash,
    V: FromParam,
{
    fn from_param(raw: &str) -> Result<Self, DecodeError> {
        let mut map = HashMap::new();
        for (key, value) in split_pairs(raw)? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<K, V> FromParam for BTreeMap<K, V>
where
    K: FromParam + Ord,
    V: FromParam,
{
    fn from_param(raw: &str) -> Result<Self, DecodeError> {
        let mut map = BTreeMap::new();
        for (key, value) in split_pairs(raw)? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// Splits a comma-delimited sequence, decoding each segment in order.
///
/// A raw value that is empty after trimming decodes to an empty vec, never
/// an error. Segments themselves are not trimmed.
fn split_delimited<T: FromParam>(raw: &str) -> Result<Vec<T>, DecodeError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(T::from_param).collect()
}

/// Splits `k:v,k:v` pairs, decoding keys and values recursively.
///
/// Each comma-separated entry must split on `:` into exactly two parts.
/// Duplicate keys are resolved last-write-wins by the callers' inserts.
fn split_pairs<K: FromParam, V: FromParam>(raw: &str) -> Result<Vec<(K, V)>, DecodeError> {
    let mut pairs = Vec::new();
    if raw.trim().is_empty() {
        return Ok(pairs);
    }
    for entry in raw.split(',') {
        let parts: Vec<&str> = entry.split(':').collect();
        let [key, value] = parts[..] else {
            return Err(DecodeError::MapEntry {
                entry: entry.to_string(),
            });
        };
        pairs.push((K::from_param(key)?, V::from_param(value)?));
    }
    Ok(pairs)
}

/// Recognizes `0x`/`0o`/`0b` radix prefixes (after an optional sign) the way
/// base-flexible integer literals are written; everything else is base 10.
fn split_radix(raw: &str) -> (Cow<'_, str>, u32) {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (digits, radix) = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(oct) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
        (oct, 8)
    } else if let Some(bin) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (bin, 2)
    } else {
        // from_str_radix handles signs itself in base 10
        return (Cow::Borrowed(raw), 10);
    };

    if negative {
        (Cow::Owned(format!("-{digits}")), radix)
    } else {
        (Cow::Borrowed(digits), radix)
    }
}
