//! # Receiver session façade
//!
//! A thin wrapper for non-core transports: deduplicates sequence numbers,
//! forwards framed symbols to a [`Decoder`], and exposes coverage/decode
//! status. Everything here is orchestration over the core — no codec logic
//! lives in this module.

use std::collections::HashSet;

use bytes::Bytes;

use crate::decoder::Decoder;
use crate::error::FountainError;
use crate::metrics::MetricsSummary;
use crate::wire;

/// Status snapshot returned after forwarding a symbol or on demand.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    pub redundant: bool,
    pub newly_added: bool,
    pub symbols_observed: usize,
    pub unique_symbols: usize,
    pub coverage: f64,
    pub decode_complete: bool,
    pub recovered: Option<Bytes>,
    pub metrics: MetricsSummary,
}

/// Deduplicating façade in front of a [`Decoder`].
pub struct ReceiverSession {
    k: usize,
    decoder: Decoder,
    sequences_seen: HashSet<u64>,
    unique_indices: HashSet<usize>,
    recovered: Option<Bytes>,
}

impl ReceiverSession {
    pub fn new(
        block_size: usize,
        k: usize,
        orig_len: usize,
        integrity_check: bool,
    ) -> Result<Self, FountainError> {
        Ok(ReceiverSession {
            k,
            decoder: Decoder::new(block_size, k, orig_len, integrity_check)?,
            sequences_seen: HashSet::new(),
            unique_indices: HashSet::new(),
            recovered: None,
        })
    }

    /// Forward one incoming symbol. Duplicate `sequence` values are
    /// silently deduplicated — reported via the status, not as an error.
    pub fn add_symbol(&mut self, sequence: u64, indices: Vec<usize>, payload: &[u8]) -> SessionStatus {
        if self.sequences_seen.contains(&sequence) {
            return self.status(true, false);
        }

        self.decoder.add_symbol(indices.clone(), payload);
        self.sequences_seen.insert(sequence);
        self.unique_indices.extend(indices);

        if self.recovered.is_none() {
            if let Ok(Some(bytes)) = self.decoder.decode() {
                self.recovered = Some(bytes);
            }
        }

        self.status(false, true)
    }

    /// Forward an `S:<sequence>|<indices>|<payload_hex>` wire frame.
    pub fn add_symbol_frame(&mut self, frame: &str) -> Option<SessionStatus> {
        let (sequence, indices, payload) = wire::decode_symbol_frame(frame)?;
        Some(self.add_symbol(sequence, indices, &payload))
    }

    /// Current status without forwarding a new symbol.
    pub fn status(&self, redundant: bool, newly_added: bool) -> SessionStatus {
        let coverage = if self.k == 0 {
            0.0
        } else {
            self.unique_indices.len() as f64 / self.k as f64
        };
        SessionStatus {
            redundant,
            newly_added,
            symbols_observed: self.sequences_seen.len(),
            unique_symbols: self.unique_indices.len(),
            coverage,
            decode_complete: self.recovered.is_some(),
            recovered: self.recovered.clone(),
            metrics: self.decoder.metrics().summary(),
        }
    }
}
