//! # Metrics
//!
//! Append-only counters and histograms with no role in codec correctness.
//! Mirrors the teacher's `SenderStats`/`ReceiverStats` shape: a plain
//! `Default`-derived struct, zero-guarded derived-rate methods, and a
//! `summary()` snapshot suitable for JSON export.

use std::collections::HashMap;

use quanta::Instant;
use serde::Serialize;

/// Fountain-coding instrumentation: degree histogram, decode attempts, and
/// symbol rejections. No semantic role in correctness — read by operators
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct FountainMetrics {
    degree_hist: HashMap<usize, u64>,
    decode_durations: Vec<f64>,
    decode_attempts: u64,
    decode_successes: u64,
    decode_failures: u64,
    symbols_used: Vec<usize>,
    symbols_available: Vec<usize>,
    rejected_symbols: HashMap<&'static str, u64>,
    total_symbols: u64,
}

impl FountainMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one emitted/accepted symbol's degree. No-op for `d == 0`.
    pub fn record_degree(&mut self, degree: usize) {
        if degree == 0 {
            return;
        }
        *self.degree_hist.entry(degree).or_insert(0) += 1;
        self.total_symbols += 1;
    }

    /// Record the outcome of one `decode()` attempt.
    pub fn record_decode(
        &mut self,
        duration_secs: f64,
        success: bool,
        symbols_used: usize,
        total_available: usize,
    ) {
        self.decode_attempts += 1;
        if success {
            self.decode_successes += 1;
        } else {
            self.decode_failures += 1;
        }
        self.decode_durations.push(duration_secs);
        self.symbols_used.push(symbols_used);
        self.symbols_available.push(total_available);
    }

    /// Record a dropped symbol by reason key (`"too_short"`,
    /// `"crc_mismatch"`).
    pub fn record_symbol_rejected(&mut self, reason: &'static str) {
        *self.rejected_symbols.entry(reason).or_insert(0) += 1;
    }

    /// Merge another metrics instance into this one, element-wise.
    pub fn merge(&mut self, other: &FountainMetrics) {
        for (&d, &count) in &other.degree_hist {
            *self.degree_hist.entry(d).or_insert(0) += count;
        }
        self.decode_durations.extend(&other.decode_durations);
        self.decode_attempts += other.decode_attempts;
        self.decode_successes += other.decode_successes;
        self.decode_failures += other.decode_failures;
        self.symbols_used.extend(&other.symbols_used);
        self.symbols_available.extend(&other.symbols_available);
        for (&reason, &count) in &other.rejected_symbols {
            *self.rejected_symbols.entry(reason).or_insert(0) += count;
        }
        self.total_symbols += other.total_symbols;
    }

    /// Count of accepted symbols of a given degree.
    pub fn degree_count(&self, degree: usize) -> u64 {
        self.degree_hist.get(&degree).copied().unwrap_or(0)
    }

    /// Count of symbols rejected for a given reason key.
    pub fn rejected_count(&self, reason: &str) -> u64 {
        self.rejected_symbols.get(reason).copied().unwrap_or(0)
    }

    pub fn decode_attempts(&self) -> u64 {
        self.decode_attempts
    }

    pub fn decode_successes(&self) -> u64 {
        self.decode_successes
    }

    /// Fraction of decode attempts that succeeded. `0.0` when no attempts
    /// have been recorded.
    pub fn decode_success_rate(&self) -> f64 {
        if self.decode_attempts == 0 {
            0.0
        } else {
            self.decode_successes as f64 / self.decode_attempts as f64
        }
    }

    /// Mean decode duration in seconds. `0.0` when empty.
    pub fn average_decode_duration(&self) -> f64 {
        mean(&self.decode_durations)
    }

    /// Mean number of symbols consumed per decode attempt. `0.0` when empty.
    pub fn average_symbols_used(&self) -> f64 {
        mean(&self.symbols_used.iter().map(|&v| v as f64).collect::<Vec<_>>())
    }

    /// Mean degree across all recorded symbols. `0.0` when empty.
    pub fn average_degree(&self) -> f64 {
        if self.total_symbols == 0 {
            return 0.0;
        }
        let weighted: u64 = self.degree_hist.iter().map(|(&d, &c)| d as u64 * c).sum();
        weighted as f64 / self.total_symbols as f64
    }

    /// A point-in-time snapshot suitable for JSON export / test assertions.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_symbols: self.total_symbols,
            degree_hist: self
                .degree_hist
                .iter()
                .map(|(&d, &c)| (d, c))
                .collect(),
            average_degree: self.average_degree(),
            decode_attempts: self.decode_attempts,
            decode_successes: self.decode_successes,
            decode_failures: self.decode_failures,
            decode_success_rate: self.decode_success_rate(),
            average_decode_duration: self.average_decode_duration(),
            average_symbols_used: self.average_symbols_used(),
            rejected_symbols: self
                .rejected_symbols
                .iter()
                .map(|(&k, &v)| (k.to_string(), v))
                .collect(),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Helper for timing a `decode()` call with `quanta`, matching the teacher's
/// use of `quanta::Instant` over `std::time::Instant` elsewhere in the crate.
pub fn elapsed_secs(start: Instant) -> f64 {
    Instant::now().duration_since(start).as_secs_f64()
}

/// Serializable snapshot returned by [`FountainMetrics::summary`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub total_symbols: u64,
    pub degree_hist: HashMap<usize, u64>,
    pub average_degree: f64,
    pub decode_attempts: u64,
    pub decode_successes: u64,
    pub decode_failures: u64,
    pub decode_success_rate: f64,
    pub average_decode_duration: f64,
    pub average_symbols_used: f64,
    pub rejected_symbols: HashMap<String, u64>,
}
