//! Identifier facade for the XOR-metric keyspace
//!
//! [`NodeId`] is an immutable value: construct it once through one of the
//! constructors, then copy, compare and XOR it freely from any number of
//! threads. The only mutable state touched by this module is the random
//! source, and that is either the caller's injected generator or the
//! per-thread `rand::thread_rng()`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::BitXor;
use std::str::FromStr;

use rand::RngCore;

use crate::bigint::{self, RawId};
use crate::encoding::{self, EncodingType};
use crate::error::KeyspaceError;
use crate::KEY_SIZE_BYTES;

/// The zero-valued identifier: `KEY_SIZE_BYTES` zero bytes.
///
/// Distinct from [`NodeId::empty`], which holds no bytes at all.
pub const ZERO_ID: NodeId = NodeId::zero();

/// Selector for the canned non-zero constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdType {
    /// `2^KEY_SIZE_BITS - 1`, every byte `0xFF`
    Max,
    /// Uniform draw over the full keyspace
    Random,
}

/// Fixed-width identifier in a Kademlia-style XOR keyspace.
///
/// A *valid* `NodeId` holds exactly [`KEY_SIZE_BYTES`] bytes interpreted
/// as an unsigned big-endian integer. The *empty* state (zero-length, from
/// [`NodeId::empty`]) is a placeholder for failed or not-yet-assigned
/// identifiers: it never holds a value and must be checked with
/// [`is_valid`](NodeId::is_valid) before joining any metric computation.
///
/// The `Ord` impl is the unsigned magnitude order, so `NodeId` works
/// directly as a sorted-container key; the empty state sorts before every
/// valid identifier to keep the order total.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    raw: Option<RawId>,
}

impl NodeId {
    /// The zero-valued identifier. Also what [`Default`] produces.
    pub const fn zero() -> Self {
        Self {
            raw: Some(bigint::ZERO),
        }
    }

    /// The empty placeholder: no bytes, not valid.
    pub const fn empty() -> Self {
        Self { raw: None }
    }

    /// Maximum identifier or uniform random identifier, per `id_type`.
    ///
    /// The random variant draws from `rand::thread_rng()`; use
    /// [`random_with`](Self::random_with) to inject a generator.
    pub fn new(id_type: IdType) -> Self {
        match id_type {
            IdType::Max => Self {
                raw: Some(bigint::MAX),
            },
            IdType::Random => Self::random_with(&mut rand::thread_rng()),
        }
    }

    /// Uniform draw over the full keyspace from an injected generator.
    pub fn random_with<R: RngCore>(rng: &mut R) -> Self {
        Self {
            raw: Some(bigint::random(rng)),
        }
    }

    /// Identifier from an owned fixed-width array. Cannot fail: the width
    /// is enforced by the type.
    pub const fn from_bytes(raw: RawId) -> Self {
        Self { raw: Some(raw) }
    }

    /// Identifier from a raw (already decoded) byte buffer.
    ///
    /// Fails with [`KeyspaceError::InvalidLength`] unless `bytes` is
    /// exactly [`KEY_SIZE_BYTES`] long.
    pub fn from_raw(bytes: &[u8]) -> Result<Self, KeyspaceError> {
        let raw: RawId = bytes
            .try_into()
            .map_err(|_| KeyspaceError::InvalidLength {
                expected: KEY_SIZE_BYTES,
                actual: bytes.len(),
            })?;
        Ok(Self { raw: Some(raw) })
    }

    /// Identifier from an encoded buffer in the given format.
    ///
    /// Fails with [`KeyspaceError::Decoding`] on out-of-alphabet input,
    /// malformed padding, or a decoded length other than
    /// [`KEY_SIZE_BYTES`].
    pub fn from_encoded(encoded: &[u8], encoding: EncodingType) -> Result<Self, KeyspaceError> {
        let bytes = encoding::decode(encoded, encoding)?;
        let actual = bytes.len();
        let raw: RawId = bytes.try_into().map_err(|_| {
            KeyspaceError::decoding(
                encoding,
                format!("decoded to {actual} bytes, expected {KEY_SIZE_BYTES}"),
            )
        })?;
        Ok(Self { raw: Some(raw) })
    }

    /// The identifier `2^power`.
    ///
    /// Fails with [`KeyspaceError::PowerOutOfRange`] unless
    /// `power < KEY_SIZE_BITS`.
    pub fn from_power(power: u16) -> Result<Self, KeyspaceError> {
        Ok(Self {
            raw: Some(bigint::pow2(usize::from(power))?),
        })
    }

    /// Uniform random identifier in the closed interval
    /// `[min(a, b), max(a, b)]`, drawn from `rand::thread_rng()`.
    ///
    /// Bound order is irrelevant; `a == b` returns that exact value.
    /// Fails if either bound is empty.
    pub fn random_in_range(a: &NodeId, b: &NodeId) -> Result<Self, KeyspaceError> {
        Self::random_in_range_with(&mut rand::thread_rng(), a, b)
    }

    /// [`random_in_range`](Self::random_in_range) with an injected
    /// generator.
    pub fn random_in_range_with<R: RngCore>(
        rng: &mut R,
        a: &NodeId,
        b: &NodeId,
    ) -> Result<Self, KeyspaceError> {
        match (&a.raw, &b.raw) {
            (Some(low), Some(high)) => Ok(Self {
                raw: Some(bigint::random_in_range(rng, low, high)),
            }),
            // An empty bound is a zero-length buffer.
            _ => Err(KeyspaceError::InvalidLength {
                expected: KEY_SIZE_BYTES,
                actual: 0,
            }),
        }
    }

    /// Decoded byte representation: [`KEY_SIZE_BYTES`] bytes for a valid
    /// identifier, the empty slice for the empty state.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.raw {
            Some(raw) => raw,
            None => &[],
        }
    }

    /// Fixed-width array view, `None` for the empty state.
    pub fn raw(&self) -> Option<&RawId> {
        self.raw.as_ref()
    }

    /// Encoded representation in the given format.
    ///
    /// Total for valid identifiers; the empty state yields an empty
    /// buffer in every format.
    pub fn to_encoded(&self, encoding: EncodingType) -> Vec<u8> {
        encoding::encode(self.as_bytes(), encoding)
    }

    /// Canonical lowercase hex string; empty string for the empty state.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// True iff the identifier holds exactly [`KEY_SIZE_BYTES`] bytes.
    pub fn is_valid(&self) -> bool {
        self.raw.is_some()
    }

    /// True iff the identifier holds no bytes. The zero-valued identifier
    /// is NOT empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }

    /// Stateless magnitude comparison, for use as an explicit comparator
    /// (`slice.sort_by(NodeId::cmp_magnitude)`). Identical to the `Ord`
    /// impl.
    pub fn cmp_magnitude(a: &NodeId, b: &NodeId) -> Ordering {
        a.cmp(b)
    }

    /// True iff `a` is strictly closer to `target` than `b` under the XOR
    /// metric: `(a ^ target) < (b ^ target)`.
    ///
    /// `closer_to_target(a, a, t)` is `false` for every `a` and `t`.
    /// Returns `false` if any participant is empty: invalid identifiers
    /// never silently join distance computations.
    pub fn closer_to_target(a: &NodeId, b: &NodeId, target: &NodeId) -> bool {
        let (Some(a_raw), Some(b_raw), Some(t_raw)) = (&a.raw, &b.raw, &target.raw) else {
            return false;
        };
        bigint::compare(&bigint::xor(a_raw, t_raw), &bigint::xor(b_raw, t_raw)) == Ordering::Less
    }
}

impl Default for NodeId {
    /// The zero-valued identifier, not the empty state.
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.raw, &other.raw) {
            (Some(a), Some(b)) => bigint::compare(a, b),
            (None, None) => Ordering::Equal,
            // Empty sorts before every valid identifier.
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        }
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BitXor for &NodeId {
    type Output = NodeId;

    /// XOR distance. Valid operands always give a valid-width result;
    /// any empty operand propagates the empty state.
    fn bitxor(self, rhs: &NodeId) -> NodeId {
        match (&self.raw, &rhs.raw) {
            (Some(a), Some(b)) => NodeId {
                raw: Some(bigint::xor(a, b)),
            },
            _ => NodeId::empty(),
        }
    }
}

impl BitXor for NodeId {
    type Output = NodeId;

    fn bitxor(self, rhs: NodeId) -> NodeId {
        &self ^ &rhs
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&debug_id(self))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", debug_id(self))
    }
}

impl FromStr for NodeId {
    type Err = KeyspaceError;

    /// Parses the canonical lowercase hex form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_encoded(s.as_bytes(), EncodingType::Hex)
    }
}

/// Abbreviated hex prefix of `id` for logging; never fails.
///
/// Valid identifiers render as their first 8 hex characters followed by
/// `..`; the empty state renders as the `"<empty>"` sentinel.
pub fn debug_id(id: &NodeId) -> String {
    match &id.raw {
        Some(raw) => {
            let mut abbrev = hex::encode(&raw[..4]);
            abbrev.push_str("..");
            abbrev
        }
        None => "<empty>".to_string(),
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::de::{Error as DeError, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Human-readable formats carry the canonical hex string, binary
    /// formats the raw bytes; the empty state round-trips as an empty
    /// string / empty byte run either way.
    impl Serialize for NodeId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.to_hex())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    struct NodeIdVisitor;

    impl<'de> Visitor<'de> for NodeIdVisitor {
        type Value = NodeId;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a {KEY_SIZE_BYTES}-byte identifier as hex or raw bytes")
        }

        fn visit_str<E: DeError>(self, v: &str) -> Result<NodeId, E> {
            if v.is_empty() {
                return Ok(NodeId::empty());
            }
            v.parse().map_err(E::custom)
        }

        fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<NodeId, E> {
            if v.is_empty() {
                return Ok(NodeId::empty());
            }
            NodeId::from_raw(v).map_err(E::custom)
        }

        fn visit_byte_buf<E: DeError>(self, v: Vec<u8>) -> Result<NodeId, E> {
            self.visit_bytes(&v)
        }
    }

    impl<'de> Deserialize<'de> for NodeId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(NodeIdVisitor)
            } else {
                deserializer.deserialize_bytes(NodeIdVisitor)
            }
        }
    }
}
