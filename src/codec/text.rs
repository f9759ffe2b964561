//! Text and blob codecs

use bytes::Bytes;

use super::{Codec, CodecInfo};
use crate::error::{CodecError, Result};
use crate::types::{CqlValue, PrimitiveType, ProtocolVersion};

/// Character set of a string codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// US-ASCII, used by `ascii`
    Ascii,
    /// UTF-8, used by `varchar`
    Utf8,
}

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Charset::Ascii => "US-ASCII",
            Charset::Utf8 => "UTF-8",
        }
    }
}

/// `ascii` / `varchar`
///
/// Zero-length input decodes to the empty string; only a null buffer
/// decodes to `Null`.
#[derive(Debug)]
pub struct StringCodec {
    info: CodecInfo,
    charset: Charset,
}

impl StringCodec {
    pub fn new(kind: PrimitiveType, charset: Charset, protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(kind, 0, protocol_version),
            charset,
        }
    }

    pub fn ascii(protocol_version: ProtocolVersion) -> Self {
        Self::new(PrimitiveType::Ascii, Charset::Ascii, protocol_version)
    }

    pub fn varchar(protocol_version: ProtocolVersion) -> Self {
        Self::new(PrimitiveType::Varchar, Charset::Utf8, protocol_version)
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }
}

impl Codec for StringCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        let CqlValue::Text(text) = value else {
            return Err(CodecError::kind_mismatch(self.cql_type(), value.kind()));
        };
        if self.charset == Charset::Ascii && !text.is_ascii() {
            return Err(CodecError::InvalidEncoding(format!(
                "Invalid input for charset {}",
                self.charset.name()
            )));
        }
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let Some(bytes) = input else {
            return Ok(CqlValue::Null);
        };
        if bytes.is_empty() {
            return Ok(CqlValue::Text(String::new()));
        }
        if self.charset == Charset::Ascii && !bytes.is_ascii() {
            return Err(CodecError::InvalidEncoding(format!(
                "Invalid bytes for charset {}",
                self.charset.name()
            )));
        }
        let text = std::str::from_utf8(&bytes).map_err(|e| {
            CodecError::InvalidEncoding(format!(
                "Invalid bytes for charset {}: {}",
                self.charset.name(),
                e
            ))
        })?;
        Ok(CqlValue::Text(text.to_string()))
    }
}

/// `blob`: raw bytes, shared rather than copied in both directions
#[derive(Debug)]
pub struct BlobCodec {
    info: CodecInfo,
}

impl BlobCodec {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            info: CodecInfo::new(PrimitiveType::Blob, 0, protocol_version),
        }
    }
}

impl Codec for BlobCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        match value {
            CqlValue::Blob(bytes) => Ok(bytes.clone()),
            other => Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        }
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        Ok(input.map_or(CqlValue::Null, CqlValue::Blob))
    }
}
