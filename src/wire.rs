//! # Wire framing
//!
//! The ASCII/JSON frame formats used by the receiver-session façade: symbol
//! frames (`S:...`), metadata frames (`M:...`), and sync frames (`Y:...`).
//! These are the only part of the core that touches text serialization —
//! everything else speaks in blocks, symbols, and bytes.

use serde::{Deserialize, Serialize};

/// Number of sync frames sent as a preamble before the first metadata frame.
pub const SYNC_PREAMBLE_COUNT: u32 = 4;
/// A sync frame is reinserted after this many symbol frames.
pub const SYNC_INSERT_INTERVAL: u32 = 8;
/// Default number of identical sync frames a receiver requires before
/// treating the stream as locked.
pub const SYNC_CONFIRMATION_REQUIRED: u32 = 3;

/// `M:<json>` — must precede any symbol frame the receiver will act on
/// (unless pre-configured out of band).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub block_size: usize,
    pub k: usize,
    pub orig_len: usize,
    pub integrity_check: bool,
}

/// Payload of a `Y:<json>` sync frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncPayload {
    pub sequence: u64,
    pub ordinal: u32,
    pub total: u32,
    pub block_size: usize,
    pub k: usize,
    pub orig_len: usize,
    pub integrity_check: bool,
    pub confirmation_required: u32,
}

/// Render a symbol as `S:<sequence>|<i1,i2,...>|<payload_hex>`. `indices`
/// serializes as comma-separated decimal with no spaces; `payload` is
/// lowercase hex, including the CRC tag when integrity is enabled.
pub fn encode_symbol_frame(sequence: u64, indices: &[usize], payload: &[u8]) -> String {
    let idx_part = indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("S:{sequence}|{idx_part}|{}", hex_encode(payload))
}

/// Parse a symbol frame produced by [`encode_symbol_frame`].
pub fn decode_symbol_frame(frame: &str) -> Option<(u64, Vec<usize>, Vec<u8>)> {
    let rest = frame.strip_prefix("S:")?;
    let mut parts = rest.splitn(3, '|');
    let sequence: u64 = parts.next()?.parse().ok()?;
    let idx_part = parts.next()?;
    let payload_hex = parts.next()?;

    let indices = if idx_part.is_empty() {
        Vec::new()
    } else {
        idx_part
            .split(',')
            .map(|s| s.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?
    };
    let payload = hex_decode(payload_hex)?;
    Some((sequence, indices, payload))
}

/// Render a metadata frame: `M:<json>`.
pub fn encode_metadata_frame(metadata: &Metadata) -> String {
    format!("M:{}", serde_json::to_string(metadata).expect("Metadata always serializes"))
}

/// Parse a metadata frame produced by [`encode_metadata_frame`].
pub fn decode_metadata_frame(frame: &str) -> Option<Metadata> {
    serde_json::from_str(frame.strip_prefix("M:")?).ok()
}

/// Render a sync frame: `Y:<json>`.
pub fn encode_sync_frame(payload: &SyncPayload) -> String {
    format!("Y:{}", serde_json::to_string(payload).expect("SyncPayload always serializes"))
}

/// Parse a sync frame produced by [`encode_sync_frame`].
pub fn decode_sync_frame(frame: &str) -> Option<SyncPayload> {
    serde_json::from_str(frame.strip_prefix("Y:")?).ok()
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        write!(s, "{b:02x}").unwrap();
    }
    s
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
