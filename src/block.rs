//! # Block codec
//!
//! Splits a payload into fixed-size, zero-padded blocks and recombines them.
//! The only component with no GF(2) arithmetic in it.

use bytes::{Bytes, BytesMut};

/// Split `data` into `⌈max(1, len)/block_size⌉` blocks of exactly `block_size`
/// bytes. Empty input yields a single all-zero block. The final block is
/// right-padded with zeros.
///
/// # Panics
///
/// Panics if `block_size == 0` — callers validate this at construction via
/// [`crate::error::FountainError::BadParameter`] before ever reaching here.
pub fn split(data: &[u8], block_size: usize) -> Vec<Bytes> {
    assert!(block_size > 0, "block_size must be positive");

    if data.is_empty() {
        return vec![Bytes::from(vec![0u8; block_size])];
    }

    let k = data.len().div_ceil(block_size);
    let mut blocks = Vec::with_capacity(k);
    for i in 0..k {
        let start = i * block_size;
        let end = (start + block_size).min(data.len());
        let mut buf = BytesMut::with_capacity(block_size);
        buf.extend_from_slice(&data[start..end]);
        buf.resize(block_size, 0);
        blocks.push(buf.freeze());
    }
    blocks
}

/// Concatenate `blocks` and truncate to `orig_len` bytes, discarding padding.
pub fn combine(blocks: &[Bytes], orig_len: usize) -> Bytes {
    let mut out = BytesMut::with_capacity(blocks.len() * blocks.first().map_or(0, |b| b.len()));
    for block in blocks {
        out.extend_from_slice(block);
    }
    out.truncate(orig_len);
    out.freeze()
}

/// Number of blocks `split` would produce for a payload of length `orig_len`.
pub fn block_count(orig_len: usize, block_size: usize) -> usize {
    assert!(block_size > 0, "block_size must be positive");
    orig_len.max(1).div_ceil(block_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── split ──────────────────────────────────────────────────────────

    #[test]
    fn split_empty_yields_one_zero_block() {
        let blocks = split(b"", 4);
        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0][..], &[0, 0, 0, 0]);
    }

    #[test]
    fn split_exact_multiple() {
        let blocks = split(b"HELLOFOUN", 3);
        assert_eq!(blocks.len(), 3);
        assert_eq!(&blocks[0][..], b"HEL");
        assert_eq!(&blocks[1][..], b"LOF");
        assert_eq!(&blocks[2][..], b"OUN");
    }

    #[test]
    fn split_pads_last_block() {
        let blocks = split(b"HELLO FOUNTAIN", 4);
        assert_eq!(blocks.len(), 4);
        assert_eq!(&blocks[3][..], &[b'A', b'I', b'N', 0]);
    }

    #[test]
    fn block_count_matches_split_len() {
        for len in 0..20 {
            let data = vec![0xAB; len];
            assert_eq!(split(&data, 4).len(), block_count(len, 4));
        }
    }

    // ─── combine ────────────────────────────────────────────────────────

    #[test]
    fn combine_truncates_padding() {
        let blocks = split(b"HELLO FOUNTAIN", 4);
        let out = combine(&blocks, 14);
        assert_eq!(&out[..], b"HELLO FOUNTAIN");
    }

    // ─── round-trip law ─────────────────────────────────────────────────

    #[test]
    fn round_trip_various_sizes() {
        for block_size in 1..8usize {
            for len in 0..40usize {
                let data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
                let blocks = split(&data, block_size);
                let out = combine(&blocks, data.len());
                assert_eq!(&out[..], &data[..], "block_size={block_size} len={len}");
            }
        }
    }

    #[test]
    fn round_trip_one_byte_short_of_full_block() {
        let block_size = 8;
        let data = vec![0x5Au8; block_size * 3 - 1];
        let blocks = split(&data, block_size);
        assert_eq!(blocks.len(), 3);
        let out = combine(&blocks, data.len());
        assert_eq!(&out[..], &data[..]);
    }
}
