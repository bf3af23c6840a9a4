//! # Encoder
//!
//! Emits a systematic prefix followed by degree-weighted XOR combinations
//! drawn from the robust-soliton distribution. Owns its block array and
//! degree CDF exclusively; nothing else mutates them.

use bytes::Bytes;
use rand::RngExt as _;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::block;
use crate::error::FountainError;
use crate::integrity;
use crate::soliton::{DEFAULT_C, DEFAULT_DELTA, RobustSoliton};

/// One emitted symbol: the source-block indices XORed together and the
/// resulting payload (CRC-tagged if the encoder was built with
/// `integrity_check`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub indices: Vec<usize>,
    pub payload: Bytes,
}

impl Symbol {
    /// Degree of this symbol: the number of distinct source-block indices.
    pub fn degree(&self) -> usize {
        self.indices.len()
    }
}

/// Construction parameters for [`Encoder`], mirroring the teacher's
/// `...Config` + `Default` convention.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    pub block_size: usize,
    pub c: f64,
    pub delta: f64,
    pub systematic: bool,
    pub integrity_check: bool,
    /// `None` draws a fresh seed from the OS; set for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            block_size: 256,
            c: DEFAULT_C,
            delta: DEFAULT_DELTA,
            systematic: true,
            integrity_check: false,
            seed: None,
        }
    }
}

/// LT fountain encoder over a fixed payload.
pub struct Encoder {
    blocks: Vec<Bytes>,
    k: usize,
    dist: RobustSoliton,
    rng: StdRng,
    config: EncoderConfig,
    emitted: usize,
}

impl Encoder {
    /// Build an encoder over `data` per `config`. Fails on `block_size == 0`.
    pub fn new(data: &[u8], config: EncoderConfig) -> Result<Self, FountainError> {
        if config.block_size == 0 {
            return Err(FountainError::bad_parameter("block_size must be positive"));
        }
        let delta = config.delta.clamp(1e-6, 1.0 - 1e-6);
        let blocks = block::split(data, config.block_size);
        let k = blocks.len();
        let dist = RobustSoliton::new(k, config.c, delta);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Encoder {
            blocks,
            k,
            dist,
            rng,
            config: EncoderConfig { delta, ..config },
            emitted: 0,
        })
    }

    /// Number of source blocks.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    pub fn integrity_check(&self) -> bool {
        self.config.integrity_check
    }

    /// Emit all `k` systematic (degree-1) symbols in source-block order.
    pub fn emit_systematic(&self) -> Vec<Symbol> {
        (0..self.k)
            .map(|i| Symbol {
                indices: vec![i],
                payload: self.tag(&self.blocks[i]),
            })
            .collect()
    }

    /// Produce the next symbol. While `systematic` is enabled and fewer than
    /// `k` symbols have been emitted, returns the next systematic symbol;
    /// otherwise samples a degree and XOR-combines that many distinct
    /// randomly-chosen blocks.
    pub fn next_symbol(&mut self) -> Symbol {
        if self.k == 0 {
            self.emitted += 1;
            return Symbol {
                indices: Vec::new(),
                payload: self.tag(&[]),
            };
        }

        if self.config.systematic && self.emitted < self.k {
            let i = self.emitted;
            self.emitted += 1;
            return Symbol {
                indices: vec![i],
                payload: self.tag(&self.blocks[i]),
            };
        }

        self.emitted += 1;
        let degree = self.dist.sample(&mut self.rng).clamp(1, self.k);
        let mut indices = Vec::with_capacity(degree);
        while indices.len() < degree {
            let idx = self.rng.random_range(0..self.k);
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }

        let mut combined = self.blocks[indices[0]].to_vec();
        for &idx in &indices[1..] {
            for (dst, src) in combined.iter_mut().zip(self.blocks[idx].iter()) {
                *dst ^= src;
            }
        }

        Symbol {
            indices,
            payload: self.tag(&combined),
        }
    }

    /// Pull `n` symbols via repeated `next_symbol` calls.
    pub fn encode(&mut self, n: usize) -> Vec<Symbol> {
        (0..n).map(|_| self.next_symbol()).collect()
    }

    fn tag(&self, payload: &[u8]) -> Bytes {
        if self.config.integrity_check {
            integrity::attach(payload)
        } else {
            Bytes::copy_from_slice(payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(block_size: usize) -> EncoderConfig {
        EncoderConfig {
            block_size,
            seed: Some(1337),
            ..Default::default()
        }
    }

    // ─── construction ───────────────────────────────────────────────────

    #[test]
    fn zero_block_size_is_bad_parameter() {
        let err = Encoder::new(b"data", EncoderConfig { block_size: 0, ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, FountainError::BadParameter { .. }));
    }

    #[test]
    fn empty_payload_yields_k_one() {
        let enc = Encoder::new(b"", cfg(4)).unwrap();
        assert_eq!(enc.k(), 1);
    }

    // ─── systematic emission ────────────────────────────────────────────

    #[test]
    fn emit_systematic_covers_every_block_exactly_once() {
        let enc = Encoder::new(b"HELLO FOUNTAIN", cfg(4)).unwrap();
        let symbols = enc.emit_systematic();
        assert_eq!(symbols.len(), enc.k());
        for (i, s) in symbols.iter().enumerate() {
            assert_eq!(s.indices, vec![i]);
            assert_eq!(s.degree(), 1);
        }
    }

    #[test]
    fn next_symbol_emits_systematic_prefix_then_random() {
        let mut enc = Encoder::new(b"HELLO FOUNTAIN", cfg(4)).unwrap();
        let k = enc.k();
        for i in 0..k {
            let s = enc.next_symbol();
            assert_eq!(s.indices, vec![i]);
        }
        let redundant = enc.next_symbol();
        assert!(redundant.degree() >= 1 && redundant.degree() <= k);
    }

    // ─── degree bounds (invariant 5) ────────────────────────────────────

    #[test]
    fn every_symbol_has_degree_in_range_and_distinct_indices() {
        let mut enc = Encoder::new(&vec![0xAB; 400], cfg(8)).unwrap();
        let k = enc.k();
        for s in enc.encode(k * 4) {
            assert!(s.degree() >= 1 && s.degree() <= k);
            let mut sorted = s.indices.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), s.indices.len(), "indices must be distinct");
        }
    }

    #[test]
    fn payload_length_includes_tag_when_enabled() {
        let mut enc = Encoder::new(
            b"CRC protected fountain blocks",
            EncoderConfig {
                block_size: 4,
                integrity_check: true,
                seed: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        for s in enc.encode(10) {
            assert_eq!(s.payload.len(), 4 + 4);
        }
    }

    // ─── reproducibility ────────────────────────────────────────────────

    #[test]
    fn same_seed_produces_same_stream() {
        let mut a = Encoder::new(b"reproducible data here", cfg(5)).unwrap();
        let mut b = Encoder::new(b"reproducible data here", cfg(5)).unwrap();
        let sa = a.encode(20);
        let sb = b.encode(20);
        assert_eq!(sa, sb);
    }
}
