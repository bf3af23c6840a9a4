//! # Decoder
//!
//! Collects symbols, selects a full-rank subset via forward elimination over
//! GF(2), then solves each payload bit-plane using the pivot order already
//! discovered during selection (§4.6 step 4 of the design notes: only
//! back-substitution repeats per bit-plane, not the elimination itself).

use bytes::Bytes;
use quanta::Instant;

use crate::block;
use crate::error::FountainError;
use crate::gf2::{BitRow, Elimination};
use crate::integrity::{self, Verified};
use crate::metrics::{self, FountainMetrics};

/// One accepted symbol: source-block indices plus the (already
/// integrity-verified and stripped) XOR payload.
#[derive(Debug, Clone)]
struct AcceptedSymbol {
    indices: Vec<usize>,
    payload: Bytes,
}

/// LT fountain decoder matched to a single encoder's parameters.
pub struct Decoder {
    block_size: usize,
    k: usize,
    orig_len: usize,
    integrity_check: bool,
    symbols: Vec<AcceptedSymbol>,
    metrics: FountainMetrics,
}

impl Decoder {
    /// Construct a decoder for `k` blocks of `block_size` bytes each,
    /// reconstructing to `orig_len` bytes. Fails if `block_size` or `k` is
    /// zero.
    pub fn new(
        block_size: usize,
        k: usize,
        orig_len: usize,
        integrity_check: bool,
    ) -> Result<Self, FountainError> {
        if block_size == 0 {
            return Err(FountainError::bad_parameter("block_size must be positive"));
        }
        if k == 0 {
            return Err(FountainError::bad_parameter("k must be positive"));
        }
        Ok(Decoder {
            block_size,
            k,
            orig_len,
            integrity_check,
            symbols: Vec::new(),
            metrics: FountainMetrics::new(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn metrics(&self) -> &FountainMetrics {
        &self.metrics
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Accept a raw symbol. If integrity checking is enabled, verifies and
    /// strips the CRC tag first, dropping (and counting) the symbol on
    /// failure. A degenerate empty-index symbol is still appended — it
    /// contributes a zero row and is simply ignored by row selection.
    pub fn add_symbol(&mut self, indices: Vec<usize>, payload: &[u8]) {
        let stripped = if self.integrity_check {
            match integrity::verify_and_strip(payload) {
                Verified::Accepted(bytes) => bytes,
                Verified::Rejected(reason) => {
                    tracing::trace!(reason = reason.as_key(), "dropping symbol that failed integrity check");
                    self.metrics.record_symbol_rejected(reason.as_key());
                    return;
                }
            }
        } else {
            Bytes::copy_from_slice(payload)
        };

        self.metrics.record_degree(indices.len());
        self.symbols.push(AcceptedSymbol {
            indices,
            payload: stripped,
        });
    }

    /// Attempt to reconstruct the payload. `Ok(None)` means "not enough
    /// symbols yet" — callers add more and retry. Has no side effects on
    /// symbol state: a failed attempt leaves the decoder exactly as it was,
    /// and a later call with a strengthened symbol set may still succeed.
    pub fn decode(&mut self) -> Result<Option<Bytes>, FountainError> {
        if self.symbols.len() < self.k {
            return Ok(None);
        }

        if let Some(fast) = self.try_systematic_fast_path() {
            self.metrics.record_decode(0.0, true, self.k, self.symbols.len());
            return Ok(Some(fast));
        }

        let start = Instant::now();
        let matrix: Vec<BitRow> = self
            .symbols
            .iter()
            .map(|s| BitRow::from_indices(self.k, s.indices.iter().copied()))
            .collect();

        let elim = Elimination::build(&matrix);
        if elim.rank() < self.k {
            self.metrics
                .record_decode(metrics::elapsed_secs(start), false, elim.rank(), self.symbols.len());
            return Ok(None);
        }

        let total_bits = self.block_size * 8;
        let mut recovered = vec![vec![0u8; self.block_size]; self.k];
        for bit in 0..total_bits {
            let byte_idx = bit / 8;
            let bit_idx = bit % 8;
            let rhs: Vec<u8> = self
                .symbols
                .iter()
                .map(|s| (byte_at(&s.payload, byte_idx) >> bit_idx) & 1)
                .collect();

            let Some(solution) = elim.solve(&rhs) else {
                self.metrics
                    .record_decode(metrics::elapsed_secs(start), false, self.k, self.symbols.len());
                return Ok(None);
            };
            for (idx, bit_value) in solution.into_iter().enumerate() {
                if bit_value == 1 {
                    recovered[idx][byte_idx] |= 1 << bit_idx;
                }
            }
        }

        let blocks: Vec<Bytes> = recovered.into_iter().map(Bytes::from).collect();
        let payload = block::combine(&blocks, self.orig_len);
        self.metrics
            .record_decode(metrics::elapsed_secs(start), true, self.k, self.symbols.len());
        Ok(Some(payload))
    }

    fn try_systematic_fast_path(&self) -> Option<Bytes> {
        if self.symbols.len() < self.k {
            return None;
        }
        let mut seen = vec![false; self.k];
        for s in &self.symbols {
            if s.indices.len() == 1 {
                let idx = s.indices[0];
                if idx < self.k && !seen[idx] {
                    seen[idx] = true;
                }
            }
        }
        if !seen.iter().all(|&v| v) {
            return None;
        }

        let mut blocks: Vec<Option<Bytes>> = vec![None; self.k];
        for s in &self.symbols {
            if s.indices.len() == 1 {
                let idx = s.indices[0];
                if idx < self.k && blocks[idx].is_none() {
                    blocks[idx] = Some(s.payload.clone());
                }
            }
        }
        let blocks: Vec<Bytes> = blocks.into_iter().collect::<Option<Vec<_>>>()?;
        Some(block::combine(&blocks, self.orig_len))
    }
}

fn byte_at(payload: &[u8], i: usize) -> u8 {
    payload.get(i).copied().unwrap_or(0)
}
