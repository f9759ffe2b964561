//! JSON value trees
//!
//! Converts decoded values to a `serde_json::Value` tree and back. This is
//! the shape the message-serialization layer works with: it never sees raw
//! bytes, only the values produced here.
//!
//! ## Mapping
//! ```text
//! boolean                         ↔ true / false
//! tinyint smallint int bigint     ↔ number
//! counter time                    ↔ number
//! float double                    ↔ number (non-finite → null)
//! ascii varchar                   ↔ string
//! blob                            ↔ "0x0aff..."
//! varint decimal                  ↔ string (numbers accepted on input)
//! timestamp                       ↔ millis since epoch (RFC 3339 accepted on input)
//! date                            ↔ "YYYY-MM-DD" (day count outside the calendar range)
//! uuid timeuuid inet              ↔ string
//! list set                        ↔ array
//! ```

use std::net::IpAddr;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use num_bigint::BigInt;
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::error::{CodecError, Result};
use crate::types::{CqlDate, CqlValue, DataType, PrimitiveType};

/// Render a decoded value as JSON
pub fn to_json(value: &CqlValue) -> Value {
    match value {
        CqlValue::Null => Value::Null,
        CqlValue::Boolean(v) => Value::Bool(*v),
        CqlValue::TinyInt(v) => Value::from(*v),
        CqlValue::SmallInt(v) => Value::from(*v),
        CqlValue::Int(v) => Value::from(*v),
        CqlValue::BigInt(v) => Value::from(*v),
        CqlValue::Float(v) => float_to_json(f64::from(*v)),
        CqlValue::Double(v) => float_to_json(*v),
        CqlValue::Text(v) => Value::String(v.clone()),
        CqlValue::Blob(v) => Value::String(format!("0x{}", hex::encode(v))),
        CqlValue::Varint(v) => Value::String(v.to_string()),
        CqlValue::Decimal(v) => Value::String(v.to_string()),
        CqlValue::Timestamp(v) => Value::from(v.timestamp_millis()),
        CqlValue::Date(v) => match v.to_naive_date() {
            Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            None => Value::from(v.days_since_epoch()),
        },
        CqlValue::Uuid(v) => Value::String(v.hyphenated().to_string()),
        CqlValue::Inet(v) => Value::String(v.to_string()),
        CqlValue::List(elements) | CqlValue::Set(elements) => {
            Value::Array(elements.iter().map(to_json).collect())
        }
    }
}

/// Build a value of `cql_type` from JSON
pub fn from_json(cql_type: &DataType, json: &Value) -> Result<CqlValue> {
    if json.is_null() {
        return Ok(CqlValue::Null);
    }

    match cql_type {
        DataType::Primitive(kind) => primitive_from_json(*kind, json),
        DataType::List(element) => Ok(CqlValue::List(elements_from_json(element, json)?)),
        DataType::Set(element) => Ok(CqlValue::Set(elements_from_json(element, json)?)),
        other => Err(CodecError::UnsupportedType(other.clone())),
    }
}

fn elements_from_json(element: &DataType, json: &Value) -> Result<Vec<CqlValue>> {
    let items = json
        .as_array()
        .ok_or_else(|| mismatch("array", json))?;
    items.iter().map(|item| from_json(element, item)).collect()
}

fn primitive_from_json(kind: PrimitiveType, json: &Value) -> Result<CqlValue> {
    match kind {
        PrimitiveType::Boolean => json
            .as_bool()
            .map(CqlValue::Boolean)
            .ok_or_else(|| mismatch("boolean", json)),
        PrimitiveType::TinyInt => narrow(json, "tinyint").map(CqlValue::TinyInt),
        PrimitiveType::SmallInt => narrow(json, "smallint").map(CqlValue::SmallInt),
        PrimitiveType::Int => narrow(json, "int").map(CqlValue::Int),
        PrimitiveType::BigInt | PrimitiveType::Counter | PrimitiveType::Time => json
            .as_i64()
            .map(CqlValue::BigInt)
            .ok_or_else(|| mismatch("64-bit integer", json)),
        PrimitiveType::Float => json
            .as_f64()
            .map(|v| CqlValue::Float(v as f32))
            .ok_or_else(|| mismatch("number", json)),
        PrimitiveType::Double => json
            .as_f64()
            .map(CqlValue::Double)
            .ok_or_else(|| mismatch("number", json)),
        PrimitiveType::Ascii | PrimitiveType::Varchar => text(json).map(CqlValue::from),
        PrimitiveType::Blob => {
            let literal = text(json)?;
            let digits = literal
                .strip_prefix("0x")
                .or_else(|| literal.strip_prefix("0X"))
                .unwrap_or(literal);
            hex::decode(digits)
                .map(|raw| CqlValue::Blob(Bytes::from(raw)))
                .map_err(|e| CodecError::Json(format!("Invalid blob literal '{}': {}", literal, e)))
        }
        PrimitiveType::Varint => {
            let literal = numeric_literal(json)?;
            BigInt::from_str(&literal)
                .map(CqlValue::Varint)
                .map_err(|e| CodecError::Json(format!("Invalid varint '{}': {}", literal, e)))
        }
        PrimitiveType::Decimal => {
            let literal = numeric_literal(json)?;
            BigDecimal::from_str(&literal)
                .map(CqlValue::Decimal)
                .map_err(|e| CodecError::Json(format!("Invalid decimal '{}': {}", literal, e)))
        }
        PrimitiveType::Timestamp => timestamp_from_json(json).map(CqlValue::Timestamp),
        PrimitiveType::Date => date_from_json(json).map(CqlValue::Date),
        PrimitiveType::Uuid | PrimitiveType::TimeUuid => {
            let literal = text(json)?;
            Uuid::parse_str(literal)
                .map(CqlValue::Uuid)
                .map_err(|e| CodecError::Json(format!("Invalid uuid '{}': {}", literal, e)))
        }
        PrimitiveType::Inet => {
            let literal = text(json)?;
            IpAddr::from_str(literal)
                .map(CqlValue::Inet)
                .map_err(|e| CodecError::Json(format!("Invalid inet '{}': {}", literal, e)))
        }
    }
}

fn timestamp_from_json(json: &Value) -> Result<DateTime<Utc>> {
    if let Some(millis) = json.as_i64() {
        return DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| CodecError::Json(format!("Timestamp {} ms out of range", millis)));
    }
    let literal = text(json)?;
    DateTime::parse_from_rfc3339(literal)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| CodecError::Json(format!("Invalid timestamp '{}': {}", literal, e)))
}

fn date_from_json(json: &Value) -> Result<CqlDate> {
    if let Some(days) = json.as_i64() {
        return i32::try_from(days)
            .map(CqlDate::from_days_since_epoch)
            .map_err(|_| CodecError::Json(format!("Date {} days out of range", days)));
    }
    let literal = text(json)?;
    NaiveDate::parse_from_str(literal, "%Y-%m-%d")
        .map(CqlDate::from)
        .map_err(|e| CodecError::Json(format!("Invalid date '{}': {}", literal, e)))
}

fn narrow<T: TryFrom<i64>>(json: &Value, what: &str) -> Result<T> {
    let wide = json.as_i64().ok_or_else(|| mismatch(what, json))?;
    T::try_from(wide).map_err(|_| CodecError::Json(format!("{} out of range for {}", wide, what)))
}

fn text(json: &Value) -> Result<&str> {
    json.as_str().ok_or_else(|| mismatch("string", json))
}

fn numeric_literal(json: &Value) -> Result<String> {
    match json {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(mismatch("number or numeric string", other)),
    }
}

fn float_to_json(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

fn mismatch(expected: &str, json: &Value) -> CodecError {
    CodecError::Json(format!("Expected {}, got {}", expected, json))
}
