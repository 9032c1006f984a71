//! Synthetic workload generation for the bench harness, built on the
//! crate's dependency-free PRNG.

use crate::bench::config::{BenchConfig, Distribution};
use crate::rng::Rng;

/// Draws `cfg.n()` values per `cfg.distribution()`, and an access order over
/// `[0, n)` for the `get` timing pass.
pub fn generate(cfg: &BenchConfig) -> (Vec<u64>, Vec<usize>) {
    let mut rng = Rng::new(cfg.seed());
    let values = match cfg.distribution() {
        Distribution::Uniform => (0..cfg.n())
            .map(|_| rng.below_u64(cfg.max_value() + 1))
            .collect(),
        Distribution::SkewedWithOutliers => (0..cfg.n())
            .map(|_| {
                // 1 in 20 draws is a near-max outlier; the rest stay under 1/64th
                // of the ceiling, giving the overflow codec a thin tail to split.
                if rng.below(20) == 0 {
                    let span = cfg.max_value() / 16;
                    cfg.max_value() - rng.below_u64(span.max(1))
                } else {
                    rng.below_u64((cfg.max_value() / 64).max(1))
                }
            })
            .collect(),
    };

    let mut order: Vec<usize> = (0..cfg.n()).collect();
    rng.shuffle(&mut order);
    (values, order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count_within_bounds() {
        let mut cfg = BenchConfig::new();
        cfg.set_n(200).set_max_value(1000);
        let (values, order) = generate(&cfg);
        assert_eq!(values.len(), 200);
        assert_eq!(order.len(), 200);
        assert!(values.iter().all(|&v| v <= 1000));
        let mut sorted_order = order.clone();
        sorted_order.sort_unstable();
        assert_eq!(sorted_order, (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_is_reproducible() {
        let mut cfg = BenchConfig::new();
        cfg.set_n(50).set_seed(42);
        let (a, _) = generate(&cfg);
        let (b, _) = generate(&cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn skewed_distribution_produces_a_thin_tail() {
        let mut cfg = BenchConfig::new();
        cfg.set_n(2000).set_max_value(1_000_000).set_distribution(Distribution::SkewedWithOutliers);
        let (values, _) = generate(&cfg);
        let outliers = values.iter().filter(|&&v| v > 500_000).count();
        assert!(outliers > 0);
        assert!(outliers < values.len() / 5);
    }
}
