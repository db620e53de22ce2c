//! Cursor-based reader over an immutable byte region.

use crate::{Decode, Error, Populate, Serializer};
use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
};

/// Type-erased zero-argument constructor installed by
/// [`Deserializer::register_factory`].
type Factory = Box<dyn Fn() -> Box<dyn Any>>;

/// Reads values back out of a byte region in the exact order and with the
/// exact types they were written.
///
/// The region is borrowed, never mutated; only the cursor advances. The wire
/// format carries no type tags, so a read sequence that diverges from the
/// write sequence is caught only incidentally, by the per-unit integrity tag
/// or by a bounds violation.
///
/// Any error is terminal for this instance: discard it and start over from
/// the original bytes with a fresh one.
pub struct Deserializer<'a> {
    buffer: &'a [u8],
    offset: usize,
    factories: HashMap<TypeId, Factory>,
}

impl<'a> Deserializer<'a> {
    /// Creates a deserializer over `buffer` with the cursor at 0.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            factories: HashMap::new(),
        }
    }

    /// Verifies bounds and the integrity tag, then returns the next `len`
    /// payload bytes and advances the cursor past tag and payload.
    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8], Error> {
        // `available` must cover the tag byte plus `len` payload bytes; the
        // comparison is phrased to avoid overflow on oversized `len` (e.g. a
        // corrupted container count).
        let available = self.buffer.len() - self.offset;
        if len >= available {
            return Err(Error::OutOfBoundsRead {
                offset: self.offset,
                requested: len,
                available,
            });
        }
        let expected = len as u8;
        let found = self.buffer[self.offset];
        if found != expected {
            return Err(Error::IntegrityMismatch {
                offset: self.offset,
                expected,
                found,
            });
        }
        self.offset += 1;
        let payload = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(payload)
    }

    /// Reads a self-constructing value through its [`Decode`] impl.
    #[inline]
    pub fn read<T: Decode>(&mut self) -> Result<T, Error> {
        T::decode(self)
    }

    /// Reads into an existing value through its [`Populate`] impl, replacing
    /// its contents.
    #[inline]
    pub fn read_into<T: Populate + ?Sized>(&mut self, value: &mut T) -> Result<(), Error> {
        value.populate(self)
    }

    /// Reads a value that is neither self-constructing nor default-
    /// constructible: the registered factory builds a blank instance, which
    /// is then populated and returned with sole ownership.
    ///
    /// Fails with [`Error::MissingFactory`] if no factory is registered for
    /// `T` on this instance.
    pub fn read_constructed<T: Populate + Any>(&mut self) -> Result<T, Error> {
        let factory = self
            .factories
            .get(&TypeId::of::<T>())
            .ok_or(Error::MissingFactory(type_name::<T>()))?;
        let boxed = factory();
        // The registry keys each closure by the concrete type it produces.
        let mut value = *boxed
            .downcast::<T>()
            .expect("factory registered under mismatched TypeId");
        value.populate(self)?;
        Ok(value)
    }

    /// Reads a presence flag, then the value if present.
    pub fn read_optional<T: Decode>(&mut self) -> Result<Option<T>, Error> {
        if self.read::<bool>()? {
            Ok(Some(self.read()?))
        } else {
            Ok(None)
        }
    }

    /// Like [`read_optional`](Self::read_optional), but constructs a present
    /// value with the supplied closure before populating it. For optional
    /// types with no empty/default value.
    pub fn read_optional_with<T: Populate>(
        &mut self,
        factory: impl FnOnce() -> T,
    ) -> Result<Option<T>, Error> {
        if self.read::<bool>()? {
            let mut value = factory();
            value.populate(self)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Bytes left between the cursor and the end of the region.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// The unread tail of the region, without advancing the cursor.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.buffer[self.offset..]
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Installs a zero-argument constructor for `T`, replacing any prior
    /// registration for the same type. Scoped to this instance.
    pub fn register_factory<T, F>(&mut self, factory: F)
    where
        T: Any,
        F: Fn() -> T + 'static,
    {
        self.factories.insert(
            TypeId::of::<T>(),
            Box::new(move || Box::new(factory()) as Box<dyn Any>),
        );
    }
}

// A deserializer borrows a serializer's buffer as its source of truth.
impl<'a> From<&'a Serializer> for Deserializer<'a> {
    fn from(ser: &'a Serializer) -> Self {
        Self::new(ser.get_buffer())
    }
}
