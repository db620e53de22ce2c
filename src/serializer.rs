//! Append-only tagged byte buffer writer.

use crate::{Encode, Error};
use bytes::{BufMut, Bytes, BytesMut};

/// Accumulates encoded values into a growable byte buffer.
///
/// Every raw write emits one *unit*: a 1-byte integrity tag equal to the
/// payload length modulo 256, followed by the payload itself. The tag is a
/// cheap corruption detector checked again on the read side; it is not length
/// framing (payloads over 255 bytes wrap).
///
/// A serializer is single-writer and lives for one logical encode: create it
/// empty, push values, then hand the buffer to a
/// [`Deserializer`](crate::Deserializer) or [`freeze`](Self::freeze) it.
#[derive(Debug, Default)]
pub struct Serializer {
    buffer: BytesMut,
    break_offset: Option<usize>,
}

impl Serializer {
    /// Creates an empty serializer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one raw unit: `tag(len) ++ payload`.
    ///
    /// This is the only primitive; every other write funnels through it.
    ///
    /// Fails with [`Error::BreakOffsetReached`] if a break offset is armed,
    /// the buffer has not yet passed it, and this unit would end past it. A
    /// unit ending exactly at the offset succeeds.
    pub fn write_raw(&mut self, payload: &[u8]) -> Result<(), Error> {
        if let Some(limit) = self.break_offset {
            if self.buffer.len() <= limit && self.buffer.len() + payload.len() + 1 > limit {
                return Err(Error::BreakOffsetReached(limit));
            }
        }
        self.buffer.put_u8(payload.len() as u8);
        self.buffer.put_slice(payload);
        Ok(())
    }

    /// Encodes a value through its [`Encode`] impl.
    #[inline]
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.encode(self)
    }

    /// Writes a presence flag, then the value if present.
    pub fn write_optional<T: Encode>(&mut self, value: &Option<T>) -> Result<(), Error> {
        self.write(value)
    }

    /// Writes an element count (as `u64`), then each element in order.
    pub fn write_slice<T: Encode>(&mut self, items: &[T]) -> Result<(), Error> {
        self.write(&(items.len() as u64))?;
        for item in items {
            self.write(item)?;
        }
        Ok(())
    }

    /// Writes text as a sequence of its byte units.
    pub fn write_str(&mut self, text: &str) -> Result<(), Error> {
        self.write(text)
    }

    /// Returns the accumulated bytes without consuming the serializer.
    pub fn get_buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the serializer, transferring ownership of the buffer.
    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }

    /// Number of bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Arms the early-abort guard: once the next raw write would end past
    /// `offset`, it fails with [`Error::BreakOffsetReached`].
    ///
    /// Used by test harnesses to produce deliberately truncated buffers.
    pub fn set_break_offset(&mut self, offset: usize) {
        self.break_offset = Some(offset);
    }

    /// Byte-wise comparison against another serializer's buffer.
    ///
    /// Returns the first index at which the buffers differ, the length of the
    /// shorter buffer if one is a strict prefix of the other, or `None` if
    /// they are byte-identical.
    pub fn diff(&self, other: &Serializer) -> Option<usize> {
        let a = self.get_buffer();
        let b = other.get_buffer();
        if let Some(index) = a.iter().zip(b).position(|(x, y)| x != y) {
            return Some(index);
        }
        if a.len() != b.len() {
            return Some(a.len().min(b.len()));
        }
        None
    }
}

// A serializer embeds into another as a single opaque unit, so a composite
// can be framed by encoding it into its own serializer first.
impl Encode for Serializer {
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write_raw(self.get_buffer())
    }
}
