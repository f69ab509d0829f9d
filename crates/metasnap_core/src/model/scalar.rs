//! Accepted scalar kinds and snapshot values.
//!
//! # Invariants
//! - `ScalarKind` is closed: adding a kind means updating the classifier
//!   table in `introspect::classifier` as well.
//! - Every `ScalarValue` variant except `Null` maps to exactly one kind.
//!
//! # Wire shape
//! - Fixed-width numbers and booleans serialize as JSON numbers/booleans.
//!   128-bit and pointer-sized integers fall back to decimal strings outside
//!   the 64-bit range.
//! - Decimals and big integers serialize as decimal strings, so no precision
//!   is lost in JSON consumers that parse numbers as doubles.
//! - Timestamps serialize as RFC 3339 with millisecond precision in UTC.
//! - URLs serialize as their serialized string form; type references as
//!   their type path.

use crate::model::type_ref::TypeRef;
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use url::Url;

/// Closed set of property types a snapshot may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    String,
    Decimal,
    BigInteger,
    Timestamp,
    Url,
    TypeRef,
}

impl ScalarKind {
    /// Stable lower-case id for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
            Self::Decimal => "decimal",
            Self::BigInteger => "big_integer",
            Self::Timestamp => "timestamp",
            Self::Url => "url",
            Self::TypeRef => "type_ref",
        }
    }
}

/// One exposed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// A nullable property that currently holds no value.
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
    Decimal(Decimal),
    BigInteger(BigInt),
    Timestamp(DateTime<Utc>),
    Url(Url),
    TypeRef(TypeRef),
}

impl ScalarValue {
    /// Kind of the held value, `None` for `Null`.
    pub fn kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            Self::Null => return None,
            Self::Bool(_) => ScalarKind::Bool,
            Self::Char(_) => ScalarKind::Char,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::I128(_) => ScalarKind::I128,
            Self::Isize(_) => ScalarKind::Isize,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::U128(_) => ScalarKind::U128,
            Self::Usize(_) => ScalarKind::Usize,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::String(_) => ScalarKind::String,
            Self::Decimal(_) => ScalarKind::Decimal,
            Self::BigInteger(_) => ScalarKind::BigInteger,
            Self::Timestamp(_) => ScalarKind::Timestamp,
            Self::Url(_) => ScalarKind::Url,
            Self::TypeRef(_) => ScalarKind::TypeRef,
        };
        Some(kind)
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Char(value) => serializer.serialize_char(*value),
            Self::I8(value) => serializer.serialize_i8(*value),
            Self::I16(value) => serializer.serialize_i16(*value),
            Self::I32(value) => serializer.serialize_i32(*value),
            Self::I64(value) => serializer.serialize_i64(*value),
            Self::I128(value) => match i64::try_from(*value) {
                Ok(narrow) => serializer.serialize_i64(narrow),
                Err(_) => serializer.collect_str(value),
            },
            Self::Isize(value) => match i64::try_from(*value) {
                Ok(narrow) => serializer.serialize_i64(narrow),
                Err(_) => serializer.collect_str(value),
            },
            Self::U8(value) => serializer.serialize_u8(*value),
            Self::U16(value) => serializer.serialize_u16(*value),
            Self::U32(value) => serializer.serialize_u32(*value),
            Self::U64(value) => serializer.serialize_u64(*value),
            Self::U128(value) => match u64::try_from(*value) {
                Ok(narrow) => serializer.serialize_u64(narrow),
                Err(_) => serializer.collect_str(value),
            },
            Self::Usize(value) => match u64::try_from(*value) {
                Ok(narrow) => serializer.serialize_u64(narrow),
                Err(_) => serializer.collect_str(value),
            },
            Self::F32(value) => serializer.serialize_f32(*value),
            Self::F64(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Decimal(value) => serializer.collect_str(value),
            Self::BigInteger(value) => serializer.collect_str(value),
            Self::Timestamp(value) => {
                serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Url(value) => serializer.serialize_str(value.as_str()),
            Self::TypeRef(value) => value.serialize(serializer),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    Bool => bool,
    Char => char,
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    I128 => i128,
    Isize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    U128 => u128,
    Usize => usize,
    F32 => f32,
    F64 => f64,
    String => String,
    Decimal => Decimal,
    BigInteger => BigInt,
    Timestamp => DateTime<Utc>,
    Url => Url,
    TypeRef => TypeRef,
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
