//! Temporal codecs
//!
//! `timestamp` rides on the bigint layout and `date` on the int layout.
//! `time` needs no codec of its own: it is a `LongCodec` gated at
//! version 4.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::numeric::{IntCodec, LongCodec};
use super::{is_empty, Codec, CodecInfo};
use crate::error::{CodecError, Result};
use crate::types::{CqlDate, CqlValue, PrimitiveType, ProtocolVersion};

/// Minimum protocol version of `date`
pub const DATE_MIN_PROTOCOL_VERSION: ProtocolVersion = 4;

/// Minimum protocol version of `time`
pub const TIME_MIN_PROTOCOL_VERSION: ProtocolVersion = 4;

/// Offset between a signed epoch day and its unsigned wire form (2^31)
const DATE_WIRE_OFFSET: u32 = 1 << 31;

/// `timestamp`: milliseconds since the Unix epoch
#[derive(Debug)]
pub struct TimestampCodec {
    info: CodecInfo,
    bigint: LongCodec,
}

impl TimestampCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Timestamp, 0, protocol_version),
            bigint: LongCodec::new(PrimitiveType::BigInt, 0, protocol_version),
        }
    }
}

impl Codec for TimestampCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Timestamp(ts) => self
                .bigint
                .encode_internal(&CqlValue::BigInt(ts.timestamp_millis())),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        if is_empty(input.as_ref()) {
            return Ok(CqlValue::Null);
        }
        let millis = self.bigint.decode_internal(input)?.as_bigint().unwrap_or_default();
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(CqlValue::Timestamp)
            .ok_or_else(|| {
                CodecError::InvalidEncoding(format!(
                    "Invalid timestamp value, {} ms is outside the supported range",
                    millis
                ))
            })
    }
}

/// `date`: epoch day shifted by 2^31 onto the unsigned range
///
/// Epoch day 0 goes on the wire as `0x8000_0000`; `i32::MIN` as `0`.
#[derive(Debug)]
pub struct DateCodec {
    info: CodecInfo,
    int: IntCodec,
}

impl DateCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(
                PrimitiveType::Date,
                DATE_MIN_PROTOCOL_VERSION,
                protocol_version,
            ),
            int: IntCodec::new(protocol_version),
        }
    }

    fn to_wire(date: CqlDate) -> i32 {
        (date.days_since_epoch() as u32).wrapping_add(DATE_WIRE_OFFSET) as i32
    }

    fn from_wire(raw: i32) -> CqlDate {
        CqlDate::from_days_since_epoch((raw as u32).wrapping_sub(DATE_WIRE_OFFSET) as i32)
    }
}

impl Codec for DateCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Date(date) => self.int.encode_internal(&CqlValue::Int(Self::to_wire(*date))),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        if is_empty(input.as_ref()) {
            return Ok(CqlValue::Null);
        }
        let raw = self.int.decode_internal(input)?.as_int().unwrap_or_default();
        Ok(CqlValue::Date(Self::from_wire(raw)))
    }
}
