//! Codec implementations for Rust primitive types.
//!
//! Each numeric value is one raw unit whose payload is the value's
//! native-endian representation. The layout is deliberately NOT canonicalized
//! to a fixed endianness: buffers are only byte-stable between platforms with
//! matching layout. Callers that need cross-platform stability must
//! canonicalize above this layer.
//!
//! Booleans are one raw unit with a single 0/1 payload byte. The reader maps
//! any nonzero byte to `true` without further validation.
//!
//! Atomics encode as a plain snapshot of their current value; the atomicity
//! guarantee itself is not preserved in the byte stream.

use crate::{Decode, Deserializer, Encode, Error, Populate, Serializer};
use std::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicU16, AtomicU32, AtomicU64,
    AtomicU8, Ordering,
};

// Numeric types implementation
macro_rules! impl_numeric {
    ($($type:ty),+ $(,)?) => {$(
        impl Encode for $type {
            #[inline]
            fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
                ser.write_raw(&self.to_ne_bytes())
            }
        }

        impl Decode for $type {
            #[inline]
            fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
                let payload = de.read_raw(std::mem::size_of::<$type>())?;
                let mut bytes = [0u8; std::mem::size_of::<$type>()];
                bytes.copy_from_slice(payload);
                Ok(<$type>::from_ne_bytes(bytes))
            }
        }

        impl Populate for $type {
            #[inline]
            fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
                *self = Self::decode(de)?;
                Ok(())
            }
        }
    )+};
}

impl_numeric!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

// Bool implementation
impl Encode for bool {
    #[inline]
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write_raw(&[*self as u8])
    }
}

impl Decode for bool {
    #[inline]
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        Ok(de.read_raw(1)?[0] != 0)
    }
}

impl Populate for bool {
    #[inline]
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        *self = Self::decode(de)?;
        Ok(())
    }
}

// Atomic types implementation
macro_rules! impl_atomic {
    ($($atomic:ty => $inner:ty),+ $(,)?) => {$(
        impl Encode for $atomic {
            #[inline]
            fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
                self.load(Ordering::SeqCst).encode(ser)
            }
        }

        impl Decode for $atomic {
            #[inline]
            fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
                Ok(<$atomic>::new(<$inner>::decode(de)?))
            }
        }

        impl Populate for $atomic {
            #[inline]
            fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
                self.store(<$inner>::decode(de)?, Ordering::SeqCst);
                Ok(())
            }
        }
    )+};
}

impl_atomic!(
    AtomicBool => bool,
    AtomicU8 => u8,
    AtomicU16 => u16,
    AtomicU32 => u32,
    AtomicU64 => u64,
    AtomicI8 => i8,
    AtomicI16 => i16,
    AtomicI32 => i32,
    AtomicI64 => i64,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeExt, EncodeExt};
    use paste::paste;

    macro_rules! impl_num_test {
        ($($type:ty),+ $(,)?) => {$(
            paste! {
                #[test]
                fn [<test_ $type _round_trip>]() {
                    let size = std::mem::size_of::<$type>();
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values {
                        let encoded = value.to_bytes().unwrap();
                        assert_eq!(encoded.len(), 1 + size);
                        assert_eq!(encoded[0], size as u8);
                        let decoded = <$type>::from_bytes(&encoded).unwrap();
                        assert_eq!(value, decoded);
                    }
                }
            }
        )+};
    }

    impl_num_test!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

    #[test]
    fn test_numeric_unit_layout() {
        let encoded = 0x01020304u32.to_bytes().unwrap();
        let mut expected = vec![4u8];
        expected.extend_from_slice(&0x01020304u32.to_ne_bytes());
        assert_eq!(&encoded[..], &expected[..]);
    }

    #[test]
    fn test_bool_layout() {
        assert_eq!(&true.to_bytes().unwrap()[..], &[1, 1]);
        assert_eq!(&false.to_bytes().unwrap()[..], &[1, 0]);
    }

    #[test]
    fn test_bool_nonzero_is_true() {
        // Only 0/1 are ever written, but the reader does not validate.
        assert!(bool::from_bytes(&[1, 7]).unwrap());
    }

    #[test]
    fn test_float_round_trip_special_values() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::MIN_POSITIVE, -0.0] {
            let decoded = f64::from_bytes(&value.to_bytes().unwrap()).unwrap();
            assert_eq!(value.to_bits(), decoded.to_bits());
        }
        let nan = f32::from_bytes(&f32::NAN.to_bytes().unwrap()).unwrap();
        assert!(nan.is_nan());
    }

    #[test]
    fn test_atomic_round_trip() {
        let value = AtomicU64::new(0xDEAD_BEEF);
        let encoded = value.to_bytes().unwrap();
        // Same bytes as the plain inner value.
        assert_eq!(encoded, 0xDEAD_BEEFu64.to_bytes().unwrap());
        let decoded = AtomicU64::from_bytes(&encoded).unwrap();
        assert_eq!(decoded.load(Ordering::SeqCst), 0xDEAD_BEEF);
    }

    #[test]
    fn test_atomic_bool_populate() {
        let encoded = AtomicBool::new(true).to_bytes().unwrap();
        let mut target = AtomicBool::new(false);
        let mut de = crate::Deserializer::new(&encoded);
        de.read_into(&mut target).unwrap();
        assert!(target.load(Ordering::SeqCst));
    }
}
