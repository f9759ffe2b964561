//! Decoded CQL values
//!
//! `CqlValue` is what every codec encodes from and decodes to. Collection
//! values nest, so a `list<set<int>>` decodes to a `List` of `Set`s of `Int`s.

use std::fmt;
use std::net::IpAddr;

use bigdecimal::BigDecimal;
use bytes::Bytes;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use num_bigint::BigInt;
use uuid::Uuid;

/// Days from 0001-01-01 (day 1 of the common era) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A value of any supported CQL type
#[derive(Debug, Clone, PartialEq)]
pub enum CqlValue {
    /// Absent value (`-1` length on the wire)
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    /// `bigint`, `counter` and `time` (nanoseconds since midnight)
    BigInt(i64),
    Float(f32),
    Double(f64),
    /// `ascii` and `varchar`
    Text(String),
    Blob(Bytes),
    Varint(BigInt),
    Decimal(BigDecimal),
    Timestamp(DateTime<Utc>),
    Date(CqlDate),
    /// `uuid` and `timeuuid`
    Uuid(Uuid),
    Inet(IpAddr),
    List(Vec<CqlValue>),
    /// Insertion-ordered set
    Set(Vec<CqlValue>),
}

impl CqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CqlValue::Null)
    }

    /// Short name of the value's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            CqlValue::Null => "null",
            CqlValue::Boolean(_) => "boolean",
            CqlValue::TinyInt(_) => "tinyint",
            CqlValue::SmallInt(_) => "smallint",
            CqlValue::Int(_) => "int",
            CqlValue::BigInt(_) => "bigint",
            CqlValue::Float(_) => "float",
            CqlValue::Double(_) => "double",
            CqlValue::Text(_) => "text",
            CqlValue::Blob(_) => "blob",
            CqlValue::Varint(_) => "varint",
            CqlValue::Decimal(_) => "decimal",
            CqlValue::Timestamp(_) => "timestamp",
            CqlValue::Date(_) => "date",
            CqlValue::Uuid(_) => "uuid",
            CqlValue::Inet(_) => "inet",
            CqlValue::List(_) => "list",
            CqlValue::Set(_) => "set",
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            CqlValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bigint(&self) -> Option<i64> {
        match self {
            CqlValue::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CqlValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Bytes> {
        match self {
            CqlValue::Blob(v) => Some(v),
            _ => None,
        }
    }

    /// Elements of a list or set
    pub fn as_elements(&self) -> Option<&[CqlValue]> {
        match self {
            CqlValue::List(elements) | CqlValue::Set(elements) => Some(elements),
            _ => None,
        }
    }
}

impl From<bool> for CqlValue {
    fn from(v: bool) -> Self {
        CqlValue::Boolean(v)
    }
}

impl From<i8> for CqlValue {
    fn from(v: i8) -> Self {
        CqlValue::TinyInt(v)
    }
}

impl From<i16> for CqlValue {
    fn from(v: i16) -> Self {
        CqlValue::SmallInt(v)
    }
}

impl From<i32> for CqlValue {
    fn from(v: i32) -> Self {
        CqlValue::Int(v)
    }
}

impl From<i64> for CqlValue {
    fn from(v: i64) -> Self {
        CqlValue::BigInt(v)
    }
}

impl From<f32> for CqlValue {
    fn from(v: f32) -> Self {
        CqlValue::Float(v)
    }
}

impl From<f64> for CqlValue {
    fn from(v: f64) -> Self {
        CqlValue::Double(v)
    }
}

impl From<&str> for CqlValue {
    fn from(v: &str) -> Self {
        CqlValue::Text(v.to_string())
    }
}

impl From<String> for CqlValue {
    fn from(v: String) -> Self {
        CqlValue::Text(v)
    }
}

impl From<Bytes> for CqlValue {
    fn from(v: Bytes) -> Self {
        CqlValue::Blob(v)
    }
}

impl From<BigInt> for CqlValue {
    fn from(v: BigInt) -> Self {
        CqlValue::Varint(v)
    }
}

impl From<BigDecimal> for CqlValue {
    fn from(v: BigDecimal) -> Self {
        CqlValue::Decimal(v)
    }
}

impl From<DateTime<Utc>> for CqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        CqlValue::Timestamp(v)
    }
}

impl From<CqlDate> for CqlValue {
    fn from(v: CqlDate) -> Self {
        CqlValue::Date(v)
    }
}

impl From<Uuid> for CqlValue {
    fn from(v: Uuid) -> Self {
        CqlValue::Uuid(v)
    }
}

impl From<IpAddr> for CqlValue {
    fn from(v: IpAddr) -> Self {
        CqlValue::Inet(v)
    }
}

impl<T: Into<CqlValue>> From<Option<T>> for CqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CqlValue::Null)
    }
}

/// A CQL `date`: signed days since 1970-01-01
///
/// The whole 32-bit range is representable on the wire, which is wider than
/// the calendar range of `NaiveDate`, so the raw day count is the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CqlDate(i32);

impl CqlDate {
    pub const EPOCH: CqlDate = CqlDate(0);

    pub fn from_days_since_epoch(days: i32) -> Self {
        CqlDate(days)
    }

    pub fn days_since_epoch(self) -> i32 {
        self.0
    }

    /// Calendar date, if the day count falls in `NaiveDate`'s range
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        self.0
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
    }
}

impl From<NaiveDate> for CqlDate {
    fn from(date: NaiveDate) -> Self {
        CqlDate(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
    }
}

impl fmt::Display for CqlDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive_date() {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => write!(f, "{}", self.0),
        }
    }
}
