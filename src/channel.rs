//! # Channel simulator
//!
//! Burst and Gilbert-Elliott erasure models used only by tests and the
//! channel-simulation harness — never by the encoder/decoder core itself.
//! Every call takes an explicit RNG so simulated runs are reproducible, per
//! the single-seedable-source rule in §9.

use rand::RngExt as _;
use rand::rngs::StdRng;

use crate::encoder::Symbol;

/// Drop random contiguous bursts from `symbols`. At each position, with
/// probability `loss_rate` a burst of length in `[1, burst_len]` is dropped
/// and the walk advances past it; otherwise the symbol is kept.
pub fn burst_eraser(symbols: &[Symbol], loss_rate: f64, burst_len: usize, rng: &mut StdRng) -> Vec<Symbol> {
    let n = symbols.len();
    let mut kept = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if rng.random::<f64>() < loss_rate {
            let drop = rng.random_range(1..=burst_len.max(1));
            i += drop;
        } else {
            kept.push(symbols[i].clone());
            i += 1;
        }
    }
    kept
}

/// Two-state Markov erasure channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Good,
    Bad,
}

/// Gilbert-Elliott channel eraser: in `Good`, drop with probability
/// `good_loss` then transition to `Bad` with probability `p`; in `Bad`, drop
/// with probability `bad_loss` then transition to `Good` with probability
/// `r`.
pub fn gilbert_elliott_eraser(
    symbols: &[Symbol],
    p: f64,
    r: f64,
    good_loss: f64,
    bad_loss: f64,
    start_state: ChannelState,
    rng: &mut StdRng,
) -> Vec<Symbol> {
    let mut state = start_state;
    let mut kept = Vec::with_capacity(symbols.len());
    for s in symbols {
        match state {
            ChannelState::Good => {
                if rng.random::<f64>() >= good_loss {
                    kept.push(s.clone());
                }
                if rng.random::<f64>() < p {
                    state = ChannelState::Bad;
                }
            }
            ChannelState::Bad => {
                if rng.random::<f64>() >= bad_loss {
                    kept.push(s.clone());
                }
                if rng.random::<f64>() < r {
                    state = ChannelState::Good;
                }
            }
        }
    }
    kept
}

/// Drop the symbols at the given inclusive `[start, end]` index ranges, used
/// by deterministic scenario tests (e.g. E5) that need exact drop positions
/// rather than a randomized model.
pub fn drop_ranges(symbols: &[Symbol], ranges: &[(usize, usize)]) -> Vec<Symbol> {
    symbols
        .iter()
        .enumerate()
        .filter(|(i, _)| !ranges.iter().any(|&(lo, hi)| *i >= lo && *i <= hi))
        .map(|(_, s)| s.clone())
        .collect()
}
