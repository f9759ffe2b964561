//! Primitive codec table
//!
//! Builds the scalar codecs for one protocol version as a plain table that
//! the registry takes ownership of.

use std::sync::Arc;

use crate::codec::{
    BlobCodec, BooleanCodec, DateCodec, DecimalCodec, DoubleCodec, FloatCodec, InetCodec,
    IntCodec, LongCodec, SharedCodec, SmallIntCodec, StringCodec, TimestampCodec, TinyIntCodec,
    UuidCodec, VarintCodec, TIME_MIN_PROTOCOL_VERSION,
};
use crate::types::{DataType, PrimitiveType, ProtocolVersion};

/// Scalar codecs available at one protocol version, in registration order
#[derive(Debug, Clone)]
pub struct PrimitiveCodecs {
    protocol_version: ProtocolVersion,
    codecs: Vec<SharedCodec>,
}

impl PrimitiveCodecs {
    /// Every primitive codec whose minimum version is at most `protocol_version`
    pub fn build(protocol_version: ProtocolVersion) -> Self {
        let codecs = Self::all(protocol_version)
            .into_iter()
            .filter(|codec| codec.min_protocol_version() <= protocol_version)
            .collect();
        Self {
            protocol_version,
            codecs,
        }
    }

    /// Every primitive codec regardless of availability
    ///
    /// Codecs above their version still refuse to encode or decode.
    pub fn all(protocol_version: ProtocolVersion) -> Vec<SharedCodec> {
        PrimitiveType::ALL
            .iter()
            .map(|&kind| new_codec(kind, protocol_version))
            .collect()
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    pub fn get(&self, kind: PrimitiveType) -> Option<&SharedCodec> {
        let cql_type = DataType::Primitive(kind);
        self.codecs.iter().find(|codec| *codec.cql_type() == cql_type)
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedCodec> {
        self.codecs.iter()
    }
}

impl IntoIterator for PrimitiveCodecs {
    type Item = SharedCodec;
    type IntoIter = std::vec::IntoIter<SharedCodec>;

    fn into_iter(self) -> Self::IntoIter {
        self.codecs.into_iter()
    }
}

fn new_codec(kind: PrimitiveType, v: ProtocolVersion) -> SharedCodec {
    match kind {
        PrimitiveType::Ascii => Arc::new(StringCodec::ascii(v)),
        PrimitiveType::BigInt => Arc::new(LongCodec::new(kind, 0, v)),
        PrimitiveType::Blob => Arc::new(BlobCodec::new(v)),
        PrimitiveType::Boolean => Arc::new(BooleanCodec::new(v)),
        PrimitiveType::Counter => Arc::new(LongCodec::new(kind, 0, v)),
        PrimitiveType::Decimal => Arc::new(DecimalCodec::new(v)),
        PrimitiveType::Double => Arc::new(DoubleCodec::new(v)),
        PrimitiveType::Float => Arc::new(FloatCodec::new(v)),
        PrimitiveType::Int => Arc::new(IntCodec::new(v)),
        PrimitiveType::Timestamp => Arc::new(TimestampCodec::new(v)),
        PrimitiveType::Uuid => Arc::new(UuidCodec::new(kind, v)),
        PrimitiveType::Varchar => Arc::new(StringCodec::varchar(v)),
        PrimitiveType::Varint => Arc::new(VarintCodec::new(v)),
        PrimitiveType::TimeUuid => Arc::new(UuidCodec::new(kind, v)),
        PrimitiveType::Inet => Arc::new(InetCodec::new(v)),
        PrimitiveType::Date => Arc::new(DateCodec::new(v)),
        PrimitiveType::Time => Arc::new(LongCodec::new(kind, TIME_MIN_PROTOCOL_VERSION, v)),
        PrimitiveType::SmallInt => Arc::new(SmallIntCodec::new(v)),
        PrimitiveType::TinyInt => Arc::new(TinyIntCodec::new(v)),
    }
}
