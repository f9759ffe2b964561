//! Numeric and boolean codecs
//!
//! Fixed-width types are big-endian two's complement (or IEEE-754) and
//! decode empty input to zero. `varint` and `decimal` are variable width
//! and decode empty input to null.

use bigdecimal::BigDecimal;
use bytes::{Buf, Bytes};
use num_bigint::BigInt;

use super::{fixed_width, Codec, CodecInfo};
use crate::error::{CodecError, Result};
use crate::types::{CqlValue, PrimitiveType, ProtocolVersion};

/// Minimum protocol version of `tinyint` and `smallint`
pub const SMALL_INT_MIN_PROTOCOL_VERSION: ProtocolVersion = 4;

// =============================================================================
// boolean
// =============================================================================

#[derive(Debug)]
pub struct BooleanCodec {
    info: CodecInfo,
}

impl BooleanCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Boolean, 0, protocol_version),
        }
    }
}

impl Codec for BooleanCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Boolean(true) => Ok(Bytes::from_static(&[1])),
            CqlValue::Boolean(false) => Ok(Bytes::from_static(&[0])),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let raw = fixed_width::<1>(input.as_ref(), "boolean")?;
        Ok(CqlValue::Boolean(raw.map_or(false, |[b]| b != 0)))
    }
}

// =============================================================================
// tinyint / smallint / int
// =============================================================================

#[derive(Debug)]
pub struct TinyIntCodec {
    info: CodecInfo,
}

impl TinyIntCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(
                PrimitiveType::TinyInt,
                SMALL_INT_MIN_PROTOCOL_VERSION,
                protocol_version,
            ),
        }
    }
}

impl Codec for TinyIntCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::TinyInt(v) => Ok(Bytes::copy_from_slice(&v.to_be_bytes())),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let raw = fixed_width::<1>(input.as_ref(), "8-bits integer")?;
        Ok(CqlValue::TinyInt(raw.map_or(0, i8::from_be_bytes)))
    }
}

#[derive(Debug)]
pub struct SmallIntCodec {
    info: CodecInfo,
}

impl SmallIntCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(
                PrimitiveType::SmallInt,
                SMALL_INT_MIN_PROTOCOL_VERSION,
                protocol_version,
            ),
        }
    }
}

impl Codec for SmallIntCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::SmallInt(v) => Ok(Bytes::copy_from_slice(&v.to_be_bytes())),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let raw = fixed_width::<2>(input.as_ref(), "16-bits integer")?;
        Ok(CqlValue::SmallInt(raw.map_or(0, i16::from_be_bytes)))
    }
}

#[derive(Debug)]
pub struct IntCodec {
    info: CodecInfo,
}

impl IntCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Int, 0, protocol_version),
        }
    }

    pub(crate) fn encode_i32(v: i32) -> Bytes {
        Bytes::copy_from_slice(&v.to_be_bytes())
    }

    pub(crate) fn decode_i32(input: Option<&Bytes>) -> Result<i32> {
        let raw = fixed_width::<4>(input, "32-bits integer")?;
        Ok(raw.map_or(0, i32::from_be_bytes))
    }
}

impl Codec for IntCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Int(v) => Ok(Self::encode_i32(*v)),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        Self::decode_i32(input.as_ref()).map(CqlValue::Int)
    }
}

// =============================================================================
// bigint / counter / time
// =============================================================================

/// 64-bit integer codec shared by `bigint`, `counter` and `time`
#[derive(Debug)]
pub struct LongCodec {
    info: CodecInfo,
}

impl LongCodec {
    pub fn new(
        kind: PrimitiveType,
        min_protocol_version: ProtocolVersion,
        protocol_version: ProtocolVersion,
    ) -> Self {
        Self {
            info: CodecInfo::new(kind, min_protocol_version, protocol_version),
        }
    }

    pub(crate) fn encode_i64(v: i64) -> Bytes {
        Bytes::copy_from_slice(&v.to_be_bytes())
    }

    pub(crate) fn decode_i64(input: Option<&Bytes>) -> Result<i64> {
        let raw = fixed_width::<8>(input, "64-bits long")?;
        Ok(raw.map_or(0, i64::from_be_bytes))
    }
}

impl Codec for LongCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::BigInt(v) => Ok(Self::encode_i64(*v)),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        Self::decode_i64(input.as_ref()).map(CqlValue::BigInt)
    }
}

// =============================================================================
// float / double
// =============================================================================

#[derive(Debug)]
pub struct FloatCodec {
    info: CodecInfo,
}

impl FloatCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Float, 0, protocol_version),
        }
    }
}

impl Codec for FloatCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Float(v) => Ok(Bytes::copy_from_slice(&v.to_be_bytes())),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let raw = fixed_width::<4>(input.as_ref(), "32-bits float")?;
        Ok(CqlValue::Float(raw.map_or(0.0, f32::from_be_bytes)))
    }
}

#[derive(Debug)]
pub struct DoubleCodec {
    info: CodecInfo,
}

impl DoubleCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Double, 0, protocol_version),
        }
    }
}

impl Codec for DoubleCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Double(v) => Ok(Bytes::copy_from_slice(&v.to_be_bytes())),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let raw = fixed_width::<8>(input.as_ref(), "64-bits double")?;
        Ok(CqlValue::Double(raw.map_or(0.0, f64::from_be_bytes)))
    }
}

// =============================================================================
// varint / decimal
// =============================================================================

#[derive(Debug)]
pub struct VarintCodec {
    info: CodecInfo,
}

impl VarintCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Varint, 0, protocol_version),
        }
    }
}

impl Codec for VarintCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Varint(v) => Ok(Bytes::from(v.to_signed_bytes_be())),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        match input {
            Some(bytes) if !bytes.is_empty() => {
                Ok(CqlValue::Varint(BigInt::from_signed_bytes_be(&bytes)))
            }
            _ => Ok(CqlValue::Null),
        }
    }
}

/// `decimal`: 4-byte scale followed by the unscaled two's-complement value
#[derive(Debug)]
pub struct DecimalCodec {
    info: CodecInfo,
}

impl DecimalCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Decimal, 0, protocol_version),
        }
    }
}

impl Codec for DecimalCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        let CqlValue::Decimal(decimal) = value else {
            return Err(CodecError::kind_mismatch(self.cql_type(), value.kind()));
        };

        let (unscaled, scale) = decimal.as_bigint_and_exponent();
        let scale = i32::try_from(scale).map_err(|_| {
            CodecError::InvalidEncoding(format!(
                "Invalid decimal value, scale {} does not fit in 32 bits",
                scale
            ))
        })?;
        let digits = unscaled.to_signed_bytes_be();

        let mut bytes = Vec::with_capacity(4 + digits.len());
        bytes.extend_from_slice(&scale.to_be_bytes());
        bytes.extend_from_slice(&digits);
        Ok(Bytes::from(bytes))
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let mut bytes = match input {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok(CqlValue::Null),
        };
        if bytes.len() < 4 {
            return Err(CodecError::InvalidEncoding(format!(
                "Invalid decimal value, expected at least 4, got {} bytes",
                bytes.len()
            )));
        }

        let scale = bytes.get_i32();
        let unscaled = BigInt::from_signed_bytes_be(&bytes);
        Ok(CqlValue::Decimal(BigDecimal::new(unscaled, i64::from(scale))))
    }
}
