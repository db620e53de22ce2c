//! Tagged binary serialization for in-memory state snapshots.
//!
//! # Overview
//!
//! A schema-free binary codec: composite values are flattened into a byte
//! buffer by a [`Serializer`] and reconstructed by a [`Deserializer`], in the
//! exact order and with the exact types they were written. There is no IDL,
//! no random access, and no type tag on the wire; encode order == decode
//! order is a hard contract.
//!
//! Every raw write is one *unit*: a 1-byte integrity tag (`length mod 256`)
//! followed by the payload. The tag is checked on every read; a mismatch
//! usually means the buffer was corrupted or the read sequence diverged from
//! the write sequence. It is a corruption detector, not a security boundary.
//!
//! # Supported types
//!
//! Natively supports:
//! - Primitives: the fixed-width integers, `f32`, `f64`, `bool` (payloads in
//!   native-endian layout)
//! - Atomics: snapshots of `AtomicBool`, `AtomicU8`..`AtomicU64`,
//!   `AtomicI8`..`AtomicI64`
//! - Containers: `Option<T>`, `Vec<T>`, `VecDeque<T>`, `HashMap<K, V>`,
//!   `BTreeMap<K, V>`, tuples, `[u8; N]`
//! - Text and blobs: `String`/`&str`, [`bytes::Bytes`]
//!
//! User-defined types implement [`Encode`] plus either [`Decode`]
//! (self-constructing) or [`Populate`] (filled in place after construction
//! via `Default`, the [`decode_via_default!`] macro, or a factory registered
//! on the deserializer).
//!
//! # Example
//!
//! ```
//! use snapcodec::{Decode, Deserializer, Encode, Error, Serializer};
//!
//! #[derive(Debug, PartialEq)]
//! struct Checkpoint {
//!     tick: u64,
//!     label: String,
//!     parent: Option<u32>,
//! }
//!
//! impl Encode for Checkpoint {
//!     fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
//!         ser.write(&self.tick)?;
//!         ser.write(&self.label)?;
//!         ser.write(&self.parent)
//!     }
//! }
//!
//! impl Decode for Checkpoint {
//!     fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
//!         Ok(Self {
//!             tick: de.read()?,
//!             label: de.read()?,
//!             parent: de.read()?,
//!         })
//!     }
//! }
//!
//! let point = Checkpoint { tick: 7, label: "boot".into(), parent: None };
//! let mut ser = Serializer::new();
//! ser.write(&point).unwrap();
//!
//! let mut de = Deserializer::from(&ser);
//! let restored: Checkpoint = de.read().unwrap();
//! assert_eq!(point, restored);
//! ```
//!
//! # Example (factory construction)
//!
//! Types with no default value decode through a per-deserializer factory:
//!
//! ```
//! use snapcodec::{Deserializer, Encode, Error, Populate, Serializer};
//!
//! struct Session {
//!     id: u32,
//! }
//!
//! impl Encode for Session {
//!     fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
//!         ser.write(&self.id)
//!     }
//! }
//!
//! impl Populate for Session {
//!     fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
//!         self.id = de.read()?;
//!         Ok(())
//!     }
//! }
//!
//! let mut ser = Serializer::new();
//! ser.write(&Session { id: 9 }).unwrap();
//!
//! let mut de = Deserializer::from(&ser);
//! de.register_factory(|| Session { id: 0 });
//! let restored: Session = de.read_constructed().unwrap();
//! assert_eq!(restored.id, 9);
//! ```

pub mod codec;
pub mod deserializer;
pub mod error;
pub mod serializer;
pub mod types;

// Re-export main types and traits
pub use codec::{Decode, DecodeExt, Encode, EncodeExt, Populate};
pub use deserializer::Deserializer;
pub use error::Error;
pub use serializer::Serializer;
