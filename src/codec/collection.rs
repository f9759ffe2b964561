//! Collection codec
//!
//! Lists and sets of any element codec, including other collections.
//!
//! ## Wire Format
//! ```text
//! ┌───────────┬─────────────────┬─────────────────┬─────┐
//! │ Count (4) │ Len (4) │ Elem  │ Len (4) │ Elem  │ ... │
//! └───────────┴─────────────────┴─────────────────┴─────┘
//! ```
//!
//! Sets keep first-encounter order and hold each distinct element once.
//! Distinctness is decided on the canonical encoding of each element, so
//! non-canonical frames of one value (`[0x02]` as a boolean) collapse.

use std::collections::HashSet;

use bytes::{Buf, Bytes};

use super::framing::{self, SIZE_PREFIX_LEN};
use super::{Codec, CodecInfo, SharedCodec};
use crate::error::{CodecError, Result};
use crate::types::{CqlValue, DataType, ProtocolVersion};

/// Minimum protocol version of every collection codec
pub const COLLECTION_MIN_PROTOCOL_VERSION: ProtocolVersion = 4;

/// Ordering semantics of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    Set,
}

/// Codec for `list<E>` / `set<E>` built around the element's codec
#[derive(Debug)]
pub struct CollectionCodec {
    info: CodecInfo,
    kind: CollectionKind,
    element: SharedCodec,
}

impl CollectionCodec {
    pub fn new(kind: CollectionKind, element: SharedCodec, protocol_version: ProtocolVersion) -> Self {
        let element_type = element.cql_type().clone();
        let cql_type = match kind {
            CollectionKind::List => DataType::list(element_type),
            CollectionKind::Set => DataType::set(element_type),
        };
        Self {
            info: CodecInfo::new(cql_type, COLLECTION_MIN_PROTOCOL_VERSION, protocol_version),
            kind,
            element,
        }
    }

    pub fn list(element: SharedCodec, protocol_version: ProtocolVersion) -> Self {
        Self::new(CollectionKind::List, element, protocol_version)
    }

    pub fn set(element: SharedCodec, protocol_version: ProtocolVersion) -> Self {
        Self::new(CollectionKind::Set, element, protocol_version)
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn element_codec(&self) -> &SharedCodec {
        &self.element
    }

    fn wrap(&self, elements: Vec<CqlValue>) -> CqlValue {
        match self.kind {
            CollectionKind::List => CqlValue::List(elements),
            CollectionKind::Set => CqlValue::Set(elements),
        }
    }

    fn decode_elements(&self, input: &mut Bytes) -> Result<Vec<CqlValue>> {
        let count = framing::read_size(input)?;
        if count < 0 {
            return Err(CodecError::InvalidEncoding(format!(
                "Invalid element count {} for {}",
                count,
                self.cql_type()
            )));
        }
        let count = count as usize;

        // Every element needs at least its length prefix.
        let mut elements = Vec::with_capacity(count.min(input.remaining() / SIZE_PREFIX_LEN));
        let mut seen = HashSet::new();

        for _ in 0..count {
            let element = self.element.decode(framing::read_value(input)?)?;
            // Distinct frames can decode to one value; compare canonical bytes.
            if self.kind == CollectionKind::Set && !seen.insert(self.element.encode(&element)?) {
                continue;
            }
            elements.push(element);
        }

        if input.has_remaining() {
            return Err(CodecError::InvalidEncoding(format!(
                "Unexpected {} trailing bytes after {} elements of {}",
                input.remaining(),
                count,
                self.cql_type()
            )));
        }

        Ok(elements)
    }
}

impl Codec for CollectionCodec {
    fn info(&self) -> &CodecInfo {
        &self.info
    }

    fn encode_internal(&self, value: &CqlValue) -> Result<Bytes> {
        let elements = match (self.kind, value) {
            (CollectionKind::List, CqlValue::List(elements))
            | (CollectionKind::Set, CqlValue::Set(elements)) => elements,
            (_, other) => return Err(CodecError::kind_mismatch(self.cql_type(), other.kind())),
        };

        let mut frames = Vec::with_capacity(elements.len());
        let mut seen = HashSet::new();

        for element in elements {
            if element.is_null() {
                return Err(CodecError::InvalidEncoding(
                    "Collection elements cannot be null".to_string(),
                ));
            }
            let frame = self.element.encode(element)?;
            if self.kind == CollectionKind::Set && !seen.insert(frame.clone()) {
                continue;
            }
            frames.push(frame);
        }

        framing::pack(&frames)
    }

    fn decode_internal(&self, input: Option<Bytes>) -> Result<CqlValue> {
        let mut input = match input {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok(self.wrap(Vec::new())),
        };

        let elements = self.decode_elements(&mut input).map_err(|e| match e {
            CodecError::BufferUnderflow { .. } => CodecError::InvalidEncoding(format!(
                "Not enough bytes to deserialize {}: {}",
                self.cql_type(),
                e
            )),
            other => other,
        })?;

        Ok(self.wrap(elements))
    }
}
