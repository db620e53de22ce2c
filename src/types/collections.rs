//! Codec implementations for containers and text.
//!
//! Containers write one raw unit carrying a `u64` element count, then each
//! element (or key followed by its value) in iteration order. Decoding an
//! empty container yields a count of 0, never an absent container. Map
//! iteration order is whatever the map yields; the read side reconstructs by
//! association, not position.
//!
//! Text is a sequence of its byte units: each byte goes through the generic
//! dispatch as its own raw unit. [`Bytes`] is the bulk alternative for opaque
//! blobs: a count followed by one contiguous raw unit.

use crate::{Decode, Deserializer, Encode, Error, Populate, Serializer};
use bytes::Bytes;
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    hash::{BuildHasher, Hash},
};

// Option implementation
impl<T: Encode> Encode for Option<T> {
    #[inline]
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        self.is_some().encode(ser)?;
        if let Some(inner) = self {
            inner.encode(ser)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for Option<T> {
    #[inline]
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        de.read_optional()
    }
}

impl<T: Decode> Populate for Option<T> {
    #[inline]
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        *self = Self::decode(de)?;
        Ok(())
    }
}

// Vec implementation
impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write_slice(self)
    }
}

impl<T: Decode> Decode for Vec<T> {
    #[inline]
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        let mut items = Vec::new();
        items.populate(de)?;
        Ok(items)
    }
}

impl<T: Decode> Populate for Vec<T> {
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        let len = de.read::<u64>()? as usize;
        self.clear();
        self.reserve(len);
        for _ in 0..len {
            self.push(de.read()?);
        }
        Ok(())
    }
}

// VecDeque implementation
impl<T: Encode> Encode for VecDeque<T> {
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write(&(self.len() as u64))?;
        for item in self {
            ser.write(item)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    #[inline]
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        let mut items = VecDeque::new();
        items.populate(de)?;
        Ok(items)
    }
}

impl<T: Decode> Populate for VecDeque<T> {
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        let len = de.read::<u64>()? as usize;
        self.clear();
        for _ in 0..len {
            self.push_back(de.read()?);
        }
        Ok(())
    }
}

// Text implementation
impl Encode for str {
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write(&(self.len() as u64))?;
        for byte in self.bytes() {
            ser.write(&byte)?;
        }
        Ok(())
    }
}

impl Encode for String {
    #[inline]
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        self.as_str().encode(ser)
    }
}

impl Decode for String {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        let start = de.position();
        let len = de.read::<u64>()? as usize;
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            bytes.push(de.read::<u8>()?);
        }
        String::from_utf8(bytes).map_err(|_| Error::InvalidText(start))
    }
}

impl Populate for String {
    #[inline]
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        *self = Self::decode(de)?;
        Ok(())
    }
}

// HashMap implementation
impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write(&(self.len() as u64))?;
        for (key, value) in self {
            ser.write(key)?;
            ser.write(value)?;
        }
        Ok(())
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    #[inline]
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        let mut map = HashMap::default();
        map.populate(de)?;
        Ok(map)
    }
}

impl<K, V, S> Populate for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher,
{
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        self.clear();
        let len = de.read::<u64>()?;
        for _ in 0..len {
            let key = de.read()?;
            let value = de.read()?;
            self.insert(key, value);
        }
        Ok(())
    }
}

// BTreeMap implementation
impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write(&(self.len() as u64))?;
        for (key, value) in self {
            ser.write(key)?;
            ser.write(value)?;
        }
        Ok(())
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    #[inline]
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        let mut map = BTreeMap::new();
        map.populate(de)?;
        Ok(map)
    }
}

impl<K: Decode + Ord, V: Decode> Populate for BTreeMap<K, V> {
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        self.clear();
        let len = de.read::<u64>()?;
        for _ in 0..len {
            let key = de.read()?;
            let value = de.read()?;
            self.insert(key, value);
        }
        Ok(())
    }
}

// Constant-size byte array implementation: raw-copied as a single unit, no
// count (the length is statically known).
impl<const N: usize> Encode for [u8; N] {
    #[inline]
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write_raw(self)
    }
}

impl<const N: usize> Decode for [u8; N] {
    #[inline]
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        let payload = de.read_raw(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(payload);
        Ok(out)
    }
}

impl<const N: usize> Populate for [u8; N] {
    #[inline]
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        self.copy_from_slice(de.read_raw(N)?);
        Ok(())
    }
}

// Bytes implementation: count, then the whole blob as one contiguous unit.
impl Encode for Bytes {
    #[inline]
    fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
        ser.write(&(self.len() as u64))?;
        ser.write_raw(self)
    }
}

impl Decode for Bytes {
    #[inline]
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
        let len = de.read::<u64>()? as usize;
        Ok(Bytes::copy_from_slice(de.read_raw(len)?))
    }
}

impl Populate for Bytes {
    #[inline]
    fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        *self = Self::decode(de)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeExt, EncodeExt};

    #[test]
    fn test_option_round_trip() {
        for value in [Some(42u32), None] {
            let decoded = Option::<u32>::from_bytes(&value.to_bytes().unwrap()).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_option_layout() {
        // Absent: just the presence flag, no value payload.
        assert_eq!(&None::<u32>.to_bytes().unwrap()[..], &[1, 0]);
        let encoded = Some(7u8).to_bytes().unwrap();
        assert_eq!(&encoded[..], &[1, 1, 1, 7]);
    }

    #[test]
    fn test_vec_round_trip() {
        for value in [vec![], vec![1u16], vec![1u16, 2, 3]] {
            let decoded = Vec::<u16>::from_bytes(&value.to_bytes().unwrap()).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_empty_vec_is_count_zero() {
        let encoded = Vec::<u32>::new().to_bytes().unwrap();
        let mut expected = vec![8u8];
        expected.extend_from_slice(&0u64.to_ne_bytes());
        assert_eq!(&encoded[..], &expected[..]);
    }

    #[test]
    fn test_vec_populate_clears_target() {
        let encoded = vec![5u8, 6].to_bytes().unwrap();
        let mut target = vec![1u8, 2, 3, 4];
        let mut de = crate::Deserializer::new(&encoded);
        de.read_into(&mut target).unwrap();
        assert_eq!(target, vec![5, 6]);
    }

    #[test]
    fn test_vecdeque_round_trip() {
        let value: VecDeque<u32> = [9, 8, 7].into_iter().collect();
        let decoded = VecDeque::<u32>::from_bytes(&value.to_bytes().unwrap()).unwrap();
        assert_eq!(value, decoded);
        // Same wire layout as the equivalent Vec.
        assert_eq!(value.to_bytes().unwrap(), vec![9u32, 8, 7].to_bytes().unwrap());
    }

    #[test]
    fn test_string_round_trip() {
        for value in ["", "snapshot", "zält-崩"] {
            let decoded = String::from_bytes(&value.to_string().to_bytes().unwrap()).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_str_layout_is_byte_sequence() {
        let encoded = "ab".to_bytes().unwrap();
        let mut expected = vec![8u8];
        expected.extend_from_slice(&2u64.to_ne_bytes());
        expected.extend_from_slice(&[1, b'a', 1, b'b']);
        assert_eq!(&encoded[..], &expected[..]);
    }

    #[test]
    fn test_string_invalid_utf8() {
        let mut ser = crate::Serializer::new();
        ser.write(&1u64).unwrap();
        ser.write(&0xFFu8).unwrap();
        assert!(matches!(
            String::from_bytes(ser.get_buffer()),
            Err(Error::InvalidText(0))
        ));
    }

    #[test]
    fn test_hashmap_round_trip() {
        let mut map = HashMap::new();
        map.insert("alpha".to_string(), 1u32);
        map.insert("beta".to_string(), 2);
        let decoded = HashMap::<String, u32>::from_bytes(&map.to_bytes().unwrap()).unwrap();
        assert_eq!(map, decoded);
    }

    #[test]
    fn test_btreemap_round_trip() {
        let mut map = BTreeMap::new();
        map.insert(3u8, vec![1u32, 2]);
        map.insert(1u8, vec![]);
        let decoded = BTreeMap::<u8, Vec<u32>>::from_bytes(&map.to_bytes().unwrap()).unwrap();
        assert_eq!(map, decoded);
    }

    #[test]
    fn test_map_populate_clears_target() {
        let mut written = BTreeMap::new();
        written.insert(1u8, 10u8);
        let encoded = written.to_bytes().unwrap();

        let mut target = BTreeMap::new();
        target.insert(9u8, 90u8);
        let mut de = crate::Deserializer::new(&encoded);
        de.read_into(&mut target).unwrap();
        assert_eq!(target, written);
    }

    #[test]
    fn test_array_round_trip() {
        let value = [1u8, 2, 3];
        let encoded = value.to_bytes().unwrap();
        assert_eq!(&encoded[..], &[3, 1, 2, 3]);
        assert_eq!(<[u8; 3]>::from_bytes(&encoded).unwrap(), value);
    }

    #[test]
    fn test_bytes_round_trip() {
        for value in [Bytes::new(), Bytes::from_static(b"blob"), Bytes::from(vec![0; 300])] {
            let decoded = Bytes::from_bytes(&value.to_bytes().unwrap()).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_bytes_is_single_unit() {
        let encoded = Bytes::from_static(&[10, 20]).to_bytes().unwrap();
        let mut expected = vec![8u8];
        expected.extend_from_slice(&2u64.to_ne_bytes());
        expected.extend_from_slice(&[2, 10, 20]);
        assert_eq!(&encoded[..], &expected[..]);
    }

    #[test]
    fn test_bytes_corrupt_count() {
        // A blob count the region cannot possibly hold fails the bounds
        // check instead of wrapping it.
        let mut ser = crate::Serializer::new();
        ser.write(&u64::MAX).unwrap();
        assert!(matches!(
            Bytes::from_bytes(ser.get_buffer()),
            Err(Error::OutOfBoundsRead { .. })
        ));
    }

    #[test]
    fn test_nested_containers() {
        let value = vec![Some(vec!["a".to_string()]), None];
        let decoded =
            Vec::<Option<Vec<String>>>::from_bytes(&value.to_bytes().unwrap()).unwrap();
        assert_eq!(value, decoded);
    }
}
