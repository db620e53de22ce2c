//! Core codec traits.
//!
//! Every value passes through one of three capabilities, resolved at compile
//! time by trait bounds:
//!
//! - [`Encode`]: the value writes itself through a [`Serializer`] handle.
//! - [`Decode`]: the value constructs itself from a [`Deserializer`] handle,
//!   consuming exactly the bytes it needs.
//! - [`Populate`]: an existing instance is filled in place. This is the read
//!   path for types that cannot construct themselves: the instance comes from
//!   `Default`, from a factory registered on the deserializer, or from a
//!   caller-supplied closure.
//!
//! A type with no applicable impl fails to compile at the call site; there is
//! no runtime type inspection and no type tag on the wire.

use crate::{Deserializer, Error, Serializer};
use bytes::Bytes;

/// Trait for types that can be written to a [`Serializer`].
///
/// Composite types compose recursively: encode each field in a fixed order,
/// with no framing and no type discriminant. The decode side must mirror the
/// exact field order.
pub trait Encode {
    /// Encodes this value by writing to the serializer.
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error>;
}

// References encode as the value they point at.
impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        (**self).encode(ser)
    }
}

/// Trait for types that construct themselves from a [`Deserializer`].
pub trait Decode: Sized {
    /// Reads a value from the deserializer, consuming the necessary bytes.
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error>;
}

/// Trait for types that can be filled in place from a [`Deserializer`].
///
/// Containers clear themselves before refilling, so a populated container
/// holds exactly the decoded elements regardless of its prior contents.
pub trait Populate {
    /// Reads into this value, replacing its current contents.
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error>;
}

/// Extension trait providing one-shot encoding through a fresh [`Serializer`].
pub trait EncodeExt: Encode {
    /// Encodes this value into an owned byte buffer.
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut ser = Serializer::new();
        ser.write(self)?;
        Ok(ser.freeze())
    }
}

// Automatically implement `EncodeExt` for types that implement `Encode`.
impl<T: Encode + ?Sized> EncodeExt for T {}

/// Extension trait providing one-shot decoding from a byte slice.
pub trait DecodeExt: Decode {
    /// Decodes a value from the start of `bytes`.
    ///
    /// Trailing bytes are ignored; use a [`Deserializer`] directly to decode
    /// several values in sequence.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Deserializer::new(bytes).read()
    }
}

// Automatically implement `DecodeExt` for types that implement `Decode`.
impl<T: Decode> DecodeExt for T {}

/// Implements [`Decode`] for types that are `Default + Populate`: construct
/// the default value, then populate it.
///
/// Rust's coherence rules forbid the blanket impl, so the default-then-
/// populate construction route is opted into per type:
///
/// ```
/// use snapcodec::{decode_via_default, Deserializer, Encode, EncodeExt, DecodeExt, Error, Populate, Serializer};
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Counter {
///     hits: u64,
/// }
///
/// impl Encode for Counter {
///     fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
///         ser.write(&self.hits)
///     }
/// }
///
/// impl Populate for Counter {
///     fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
///         self.hits = de.read()?;
///         Ok(())
///     }
/// }
///
/// decode_via_default!(Counter);
///
/// let counter = Counter { hits: 3 };
/// let restored = Counter::from_bytes(&counter.to_bytes().unwrap()).unwrap();
/// assert_eq!(counter, restored);
/// ```
#[macro_export]
macro_rules! decode_via_default {
    ($($type:ty),+ $(,)?) => {$(
        impl $crate::Decode for $type {
            fn decode(de: &mut $crate::Deserializer<'_>) -> Result<Self, $crate::Error> {
                let mut value = <$type as Default>::default();
                $crate::Populate::populate(&mut value, de)?;
                Ok(value)
            }
        }
    )+};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes_from_bytes() {
        let value = 0x01020304u32;
        let bytes = value.to_bytes().unwrap();
        assert_eq!(bytes.len(), 1 + 4);
        let decoded = u32::from_bytes(&bytes).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn test_from_bytes_ignores_trailing() {
        let mut ser = Serializer::new();
        ser.write(&7u16).unwrap();
        ser.write(&8u16).unwrap();
        assert_eq!(u16::from_bytes(ser.get_buffer()).unwrap(), 7);
    }

    #[test]
    fn test_decode_via_default() {
        #[derive(Default, Debug, PartialEq)]
        struct Pair {
            left: u32,
            right: Option<bool>,
        }

        impl Encode for Pair {
            fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
                ser.write(&self.left)?;
                ser.write(&self.right)
            }
        }

        impl Populate for Pair {
            fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
                self.left = de.read()?;
                self.right = de.read()?;
                Ok(())
            }
        }

        decode_via_default!(Pair);

        let pair = Pair {
            left: 42,
            right: Some(true),
        };
        let restored = Pair::from_bytes(&pair.to_bytes().unwrap()).unwrap();
        assert_eq!(pair, restored);
    }
}
