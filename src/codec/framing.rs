//! Binary framing primitives
//!
//! Length-prefixed values shared by every variable-size codec.
//!
//! ## Value Frame
//! ```text
//! ┌────────────┬──────────────────────┐
//! │ Len (4)    │ Bytes (Len)          │   Len >= 0
//! └────────────┴──────────────────────┘
//! ┌────────────┐
//! │ -1 (4)     │                          null value, no payload
//! └────────────┘
//! ```
//!
//! ## Packed Sequence
//! ```text
//! ┌────────────┬─────────┬─────────┬─────┐
//! │ Count (4)  │ Frame 1 │ Frame 2 │ ... │
//! └────────────┴─────────┴─────────┴─────┘
//! ```
//!
//! Reads advance a `Bytes` cursor and hand out slices of it, so decoded
//! frames share the input's storage instead of copying it.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result};

/// Length written for a null value
pub const NULL_LENGTH: i32 = -1;

/// Width of a length or count prefix
pub const SIZE_PREFIX_LEN: usize = 4;

/// Read a 4-byte signed big-endian length or count
pub fn read_size(input: &mut Bytes) -> Result<i32> {
    ensure_remaining(input, SIZE_PREFIX_LEN)?;
    Ok(input.get_i32())
}

/// Read one framed value; a negative length is a null value
pub fn read_value(input: &mut Bytes) -> Result<Option<Bytes>> {
    let size = read_size(input)?;
    if size < 0 {
        return Ok(None);
    }
    read_bytes(input, size as usize).map(Some)
}

/// Split `len` bytes off the front of `input` without copying
pub fn read_bytes(input: &mut Bytes, len: usize) -> Result<Bytes> {
    ensure_remaining(input, len)?;
    Ok(input.split_to(len))
}

pub fn write_size(output: &mut BytesMut, size: i32) {
    output.put_i32(size);
}

/// Write one framed value; `None` writes the null length
pub fn write_value(output: &mut BytesMut, value: Option<&Bytes>) -> Result<()> {
    match value {
        None => write_size(output, NULL_LENGTH),
        Some(bytes) => {
            write_size(output, frame_len(bytes.len())?);
            output.put_slice(bytes);
        }
    }
    Ok(())
}

/// Encoded size of one framed value
pub fn size_of_value(value: Option<&Bytes>) -> usize {
    SIZE_PREFIX_LEN + value.map_or(0, Bytes::len)
}

/// Pack already-encoded elements into a count-prefixed sequence
pub fn pack(elements: &[Option<Bytes>]) -> Result<Bytes> {
    let body: usize = elements.iter().map(|e| size_of_value(e.as_ref())).sum();
    let mut output = BytesMut::with_capacity(SIZE_PREFIX_LEN + body);

    write_size(&mut output, frame_len(elements.len())?);
    for element in elements {
        write_value(&mut output, element.as_ref())?;
    }

    Ok(output.freeze())
}

fn frame_len(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        CodecError::InvalidEncoding(format!(
            "Frame length {} exceeds the 32-bit signed limit",
            len
        ))
    })
}

fn ensure_remaining(input: &Bytes, needed: usize) -> Result<()> {
    if input.remaining() < needed {
        return Err(CodecError::BufferUnderflow {
            needed,
            remaining: input.remaining(),
        });
    }
    Ok(())
}
