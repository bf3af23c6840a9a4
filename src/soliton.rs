//! # Degree sampler
//!
//! Builds the robust-soliton CDF once per `k` and draws degrees from it.
//! The only consumer of randomness on the encoder side; callers always
//! supply the RNG so two encoders never share state (§9: avoid
//! process-global RNG in library code).

use rand::RngExt as _;
use rand::rngs::StdRng;

/// Default skew parameter `c` for the robust-soliton spike.
pub const DEFAULT_C: f64 = 0.1;
/// Default failure probability `δ` for the robust-soliton spike.
pub const DEFAULT_DELTA: f64 = 0.5;

/// Precomputed robust-soliton CDF for a fixed `k`.
#[derive(Debug, Clone)]
pub struct RobustSoliton {
    k: usize,
    /// `cdf[d-1]` is the cumulative probability of degree `<= d`, for
    /// `d` in `1..=k`. Always ends at exactly `1.0`.
    cdf: Vec<f64>,
}

impl RobustSoliton {
    /// Build the CDF for `k` source blocks with spike parameters `c`, `δ`.
    ///
    /// `k == 0` or `k == 1` produce a degenerate single-point distribution
    /// (degree is always 1, never sampled).
    pub fn new(k: usize, c: f64, delta: f64) -> Self {
        if k <= 1 {
            return RobustSoliton {
                k,
                cdf: vec![1.0; k.max(1)],
            };
        }

        let kf = k as f64;

        // Ideal soliton: rho[1] = 1/k, rho[d] = 1/(d*(d-1)) for d in 2..=k.
        let mut rho = vec![0.0f64; k + 1];
        rho[1] = 1.0 / kf;
        for d in 2..=k {
            rho[d] = 1.0 / ((d * (d - 1)) as f64);
        }

        // Robust spike.
        let r = (c * (kf / delta).ln() * kf.sqrt()).max(1.0);
        let threshold = (kf / r).floor() as usize;

        let mut tau = vec![0.0f64; k + 1];
        for d in 1..threshold.min(k + 1) {
            tau[d] = r / (d as f64 * kf);
        }
        if (1..=k).contains(&threshold) {
            tau[threshold] = r * (r / delta).ln() / kf;
        }

        let total: f64 = (1..=k).map(|d| rho[d] + tau[d]).sum();

        let mut cdf = vec![0.0f64; k];
        if total > 0.0 {
            let mut acc = 0.0;
            for d in 1..=k {
                acc += (rho[d] + tau[d]) / total;
                cdf[d - 1] = acc;
            }
        } else {
            // Degenerate fallback: uniform over [1, k].
            for d in 1..=k {
                cdf[d - 1] = (d as f64) / kf;
            }
        }
        // Clamp numeric drift so the last entry is exactly 1.0.
        *cdf.last_mut().unwrap() = 1.0;

        RobustSoliton { k, cdf }
    }

    /// Number of source blocks this distribution was built for.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The CDF, for inspection/testing. `cdf()[d-1]` is `P(degree <= d)`.
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Draw a degree in `[1, k]` using `rng`. For `k <= 1` always returns 1
    /// without consuming randomness.
    pub fn sample(&self, rng: &mut StdRng) -> usize {
        if self.k <= 1 {
            return 1;
        }
        let r: f64 = rng.random();
        for (i, &cum) in self.cdf.iter().enumerate() {
            if cum >= r {
                return i + 1;
            }
        }
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    // ─── CDF shape ──────────────────────────────────────────────────────

    #[test]
    fn cdf_is_monotone_and_ends_at_one() {
        for k in [2usize, 3, 10, 50, 500, 5000] {
            let dist = RobustSoliton::new(k, DEFAULT_C, DEFAULT_DELTA);
            let cdf = dist.cdf();
            assert_eq!(cdf.len(), k);
            let mut prev = 0.0;
            for &v in cdf {
                assert!(v + 1e-9 >= prev, "cdf not monotone at k={k}: {cdf:?}");
                prev = v;
            }
            assert!((cdf[k - 1] - 1.0).abs() < 1e-9, "k={k} cdf={cdf:?}");
        }
    }

    #[test]
    fn k_zero_or_one_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(RobustSoliton::new(0, DEFAULT_C, DEFAULT_DELTA).sample(&mut rng), 1);
        assert_eq!(RobustSoliton::new(1, DEFAULT_C, DEFAULT_DELTA).sample(&mut rng), 1);
    }

    // ─── sampling ───────────────────────────────────────────────────────

    #[test]
    fn sample_is_always_in_range() {
        let dist = RobustSoliton::new(40, DEFAULT_C, DEFAULT_DELTA);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            let d = dist.sample(&mut rng);
            assert!((1..=40).contains(&d));
        }
    }

    #[test]
    fn sample_is_reproducible_given_same_seed() {
        let dist = RobustSoliton::new(40, DEFAULT_C, DEFAULT_DELTA);
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let seq_a: Vec<usize> = (0..100).map(|_| dist.sample(&mut rng_a)).collect();
        let seq_b: Vec<usize> = (0..100).map(|_| dist.sample(&mut rng_b)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn degree_one_is_dominant_mass() {
        // rho[1] = 1/k is always a sizeable share of the mass; degree-1
        // should be drawn noticeably more often than any single higher
        // degree across a large sample.
        let dist = RobustSoliton::new(200, DEFAULT_C, DEFAULT_DELTA);
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0u32; 201];
        for _ in 0..20_000 {
            counts[dist.sample(&mut rng)] += 1;
        }
        let max_other = counts[2..].iter().copied().max().unwrap_or(0);
        assert!(counts[1] > max_other);
    }
}
