//! Codec Module
//!
//! Converts `CqlValue`s to and from their native protocol byte layout.
//!
//! ## Components
//! - `framing`: length-prefixed value read/write helpers
//! - `Codec`: the contract every type codec implements
//! - primitive codecs: one per scalar CQL type
//! - `CollectionCodec`: list/set of any element codec
//!
//! ## Value Layouts
//! ```text
//! boolean   [0x00 | 0x01]
//! tinyint   [i8]      smallint [i16 BE]   int [i32 BE]   bigint/counter/time [i64 BE]
//! float     [f32 BE]  double   [f64 BE]
//! uuid      [msb (8)][lsb (8)]
//! decimal   [scale: i32 BE][unscaled: two's-complement BE]
//! varint    [two's-complement BE]
//! date      [epoch_day + 2^31 as i32 BE]
//! timestamp [millis since epoch: i64 BE]
//! inet      [4 | 16 address bytes]
//! ```
//!
//! ## Null vs. Empty
//! A null buffer and a zero-length buffer are different inputs. Fixed-width
//! numeric and boolean codecs decode both to the type's zero value. Text and
//! blob codecs decode empty bytes to an empty value and null to `Null`. All
//! other scalar codecs decode both to `Null`.

pub mod framing;

mod collection;
mod identity;
mod numeric;
mod temporal;
mod text;

use std::fmt::Debug;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::{CodecError, Result};
use crate::types::{CqlValue, DataType, ProtocolVersion};

pub use collection::{CollectionCodec, CollectionKind, COLLECTION_MIN_PROTOCOL_VERSION};
pub use identity::{InetCodec, UuidCodec};
pub use numeric::{
    BooleanCodec, DecimalCodec, DoubleCodec, FloatCodec, IntCodec, LongCodec, SmallIntCodec,
    TinyIntCodec, VarintCodec, SMALL_INT_MIN_PROTOCOL_VERSION,
};
pub use temporal::{
    DateCodec, TimestampCodec, DATE_MIN_PROTOCOL_VERSION, TIME_MIN_PROTOCOL_VERSION,
};
pub use text::{BlobCodec, Charset, StringCodec};

/// Codec handle shared between a registry and its callers
pub type SharedCodec = Arc<dyn Codec>;

/// Identity and version gate of a codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Descriptor this codec handles
    pub cql_type: DataType,

    /// Lowest protocol version the type exists in
    pub min_protocol_version: ProtocolVersion,

    /// Version of the registry the codec was built for
    pub protocol_version: ProtocolVersion,
}

impl CodecInfo {
    pub fn new(
        cql_type: impl Into<DataType>,
        min_protocol_version: ProtocolVersion,
        protocol_version: ProtocolVersion,
    ) -> Self {
        Self {
            cql_type: cql_type.into(),
            min_protocol_version,
            protocol_version,
        }
    }

    /// Fails if the codec is used below its minimum protocol version
    pub fn check_protocol_version(&self) -> Result<()> {
        if self.min_protocol_version > self.protocol_version {
            return Err(CodecError::ProtocolVersion {
                cql_type: self.cql_type.clone(),
                version: self.protocol_version,
                min_version: self.min_protocol_version,
            });
        }
        Ok(())
    }
}

/// Encode/decode behavior for one type descriptor
///
/// Implementors provide `encode_internal`/`decode_internal`; callers use
/// `encode`/`decode`, which apply the version gate and null handling.
/// Codecs are immutable after construction.
pub trait Codec: Send + Sync + Debug {
    /// Descriptor and version information
    fn info(&self) -> &CodecInfo;

    /// Encode a non-null value
    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes>;

    /// Decode a possibly-null buffer
    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue>;

    fn cql_type(&self) -> &DataType {
        &self.info().cql_type
    }

    fn min_protocol_version(&self) -> ProtocolVersion {
        self.info().min_protocol_version
    }

    /// Encode a value; `Null` encodes to no bytes
    fn encode(&self, value: &CqlValue) -> Result<Option<Bytes>> {
        self.info().check_protocol_version()?;
        if value.is_null() {
            return Ok(None);
        }
        self.encode_internal(value).map(Some)
    }

    /// Decode a buffer; `None` is the null value
    fn decode(&self, input: Option<Bytes>) -> Result<CqlValue> {
        self.info().check_protocol_version()?;
        self.decode_internal(input)
    }
}

/// Copy a fixed-width value out of `input`
///
/// Null and empty input both yield `None`; any other length that differs
/// from `N` is an encoding error.
pub(crate) fn fixed_width<const N: usize>(
    input: Option<&Bytes>,
    what: &str,
) -> Result<Option<[u8; N]>> {
    match input {
        None => Ok(None),
        Some(bytes) if bytes.is_empty() => Ok(None),
        Some(bytes) if bytes.len() != N => Err(CodecError::invalid_length(what, N, bytes.len())),
        Some(bytes) => {
            let mut raw = [0u8; N];
            raw.copy_from_slice(bytes);
            Ok(Some(raw))
        }
    }
}

/// True for a null or zero-length buffer
pub(crate) fn is_empty(input: Option<&Bytes>) -> bool {
    input.map_or(true, |bytes| bytes.is_empty())
}
