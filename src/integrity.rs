//! # Integrity tag
//!
//! Optional 4-byte big-endian CRC-32 (the "zlib/PNG" variant: polynomial
//! `0xEDB88320` reflected, init `0xFFFFFFFF`, final XOR `0xFFFFFFFF`)
//! appended to a symbol's XOR payload. Verification is a drop filter: a
//! failing symbol is rejected before any decoder state changes, and the
//! rejection is only ever observable through metrics.

use bytes::{Bytes, BytesMut};

const TAG_BYTES: usize = 4;

/// Why a framed symbol was rejected during `verify_and_strip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Framed payload shorter than the tag itself.
    TooShort,
    /// CRC-32 recomputed over the prefix does not match the trailing tag.
    CrcMismatch,
}

impl RejectReason {
    /// Stable string key used by [`crate::metrics::FountainMetrics`]'s
    /// per-reason rejection counter.
    pub fn as_key(&self) -> &'static str {
        match self {
            RejectReason::TooShort => "too_short",
            RejectReason::CrcMismatch => "crc_mismatch",
        }
    }
}

/// Outcome of integrity verification: the stripped payload, or why it was
/// rejected. A sum type rather than `Option`, since a missing tag and a bad
/// tag are distinguishable failure reasons callers may want to log.
pub enum Verified {
    Accepted(Bytes),
    Rejected(RejectReason),
}

/// Append a 4-byte big-endian CRC-32 of `payload` to it.
pub fn attach(payload: &[u8]) -> Bytes {
    let crc = crc32fast::hash(payload);
    let mut out = BytesMut::with_capacity(payload.len() + TAG_BYTES);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc.to_be_bytes());
    out.freeze()
}

/// Verify and strip a framed payload produced by [`attach`].
pub fn verify_and_strip(framed: &[u8]) -> Verified {
    if framed.len() < TAG_BYTES {
        return Verified::Rejected(RejectReason::TooShort);
    }
    let (prefix, tag) = framed.split_at(framed.len() - TAG_BYTES);
    let expected = crc32fast::hash(prefix).to_be_bytes();
    if tag != expected {
        return Verified::Rejected(RejectReason::CrcMismatch);
    }
    Verified::Accepted(Bytes::copy_from_slice(prefix))
}
