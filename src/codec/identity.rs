//! UUID and address codecs

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::Bytes;
use uuid::Uuid;

use super::{fixed_width, Codec, CodecInfo};
use crate::error::{CodecError, Result};
use crate::types::{CqlValue, PrimitiveType, ProtocolVersion};

/// `uuid` / `timeuuid`: most-significant 8 bytes, then least-significant 8
#[derive(Debug)]
pub struct UuidCodec {
    info: CodecInfo,
}

impl UuidCodec {
    pub fn new(kind: PrimitiveType, protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(kind, 0, protocol_version),
        }
    }
}

impl Codec for UuidCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Uuid(uuid) => Ok(Bytes::copy_from_slice(uuid.as_bytes())),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let raw = fixed_width::<16>(input.as_ref(), "UUID")?;
        Ok(raw.map_or(CqlValue::Null, |bytes| CqlValue::Uuid(Uuid::from_bytes(bytes))))
    }
}

/// `inet`: the 4 or 16 raw address bytes
#[derive(Debug)]
pub struct InetCodec {
    info: CodecInfo,
}

impl InetCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Inet, 0, protocol_version),
        }
    }
}

impl Codec for InetCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Inet(IpAddr::V4(addr)) => Ok(Bytes::copy_from_slice(&addr.octets())),
            CqlValue::Inet(IpAddr::V6(addr)) => Ok(Bytes::copy_from_slice(&addr.octets())),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let Some(bytes) = input else {
            return Ok(CqlValue::Null);
        };
        match bytes.len() {
            0 => Ok(CqlValue::Null),
            4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(&bytes);
                Ok(CqlValue::Inet(IpAddr::V4(Ipv4Addr::from(octets))))
            }
            16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&bytes);
                Ok(CqlValue::Inet(IpAddr::V6(Ipv6Addr::from(octets))))
            }
            n => Err(CodecError::InvalidEncoding(format!(
                "Invalid bytes for inet value, expected 4 or 16, got {} bytes",
                n
            ))),
        }
    }
}
