//! # kad-keyspace
//!
//! Fixed-width identifier type and XOR distance metric for Kademlia-style
//! overlay networks.
//!
//! ## Architecture
//!
//! Three layers, leaves first:
//!
//! - **`bigint`** - interprets `[u8; KEY_SIZE_BYTES]` as an unsigned
//!   big-endian integer: magnitude compare, byte-wise XOR, power-of-two
//!   construction, uniform full-range and closed-interval sampling.
//! - **`encoding`** - lossless transcoding between raw bytes and the
//!   canonical hex / base-32 / base-64 forms, plus binary pass-through.
//! - **`node_id`** - the public immutable [`NodeId`] value composing the
//!   two: constructors, total order, `^` distance, closeness predicate,
//!   abbreviated debug form.
//!
//! Identifiers are plain `Copy` values: once built they can be compared
//! and combined by any number of threads with no synchronization. Random
//! construction either takes an injected [`rand::RngCore`] (deterministic
//! in tests) or falls back to the per-thread generator.
//!
//! ## Example
//!
//! ```rust
//! use kad_keyspace::{EncodingType, IdType, NodeId};
//!
//! let a = NodeId::new(IdType::Random);
//! let b = NodeId::new(IdType::Random);
//! let target = NodeId::zero();
//!
//! // XOR distance decides which identifier is nearer to the target.
//! let nearer = if NodeId::closer_to_target(&a, &b, &target) { a } else { b };
//! assert!(nearer.is_valid());
//!
//! // Every textual encoding round-trips losslessly.
//! let hex = nearer.to_encoded(EncodingType::Hex);
//! assert_eq!(NodeId::from_encoded(&hex, EncodingType::Hex).unwrap(), nearer);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bigint;
pub mod encoding;
pub mod error;
pub mod node_id;

pub use bigint::{bit_to_byte_count, RawId};
pub use encoding::EncodingType;
pub use error::KeyspaceError;
pub use node_id::{debug_id, IdType, NodeId, ZERO_ID};

/// Identifier width in bytes.
pub const KEY_SIZE_BYTES: usize = 64;

/// Identifier width in bits.
pub const KEY_SIZE_BITS: usize = 8 * KEY_SIZE_BYTES;
