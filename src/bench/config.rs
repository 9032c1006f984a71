//! Bench configuration: a plain struct with chained `set_*` builder methods,
//! each taking `&mut self` and returning `&mut Self`, matching the teacher's
//! own `bench/config.rs` setter shape.

/// Distribution used to draw the synthetic workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Values drawn uniformly from `[0, max_value]`.
    Uniform,
    /// Most values small, a thin tail near `max_value` — exercises the
    /// overflow codec's flag-bit split.
    SkewedWithOutliers,
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    n: usize,
    variant: String,
    overflow_threshold: Option<f64>,
    max_value: u64,
    distribution: Distribution,
    warmup_rounds: usize,
    sample_rounds: usize,
    seed: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            n: 100_000,
            variant: "noncross".to_string(),
            overflow_threshold: None,
            max_value: u32::MAX as u64,
            distribution: Distribution::Uniform,
            warmup_rounds: 16,
            sample_rounds: 64,
            seed: 0xBADC0FFE,
        }
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_n(&mut self, n: usize) -> &mut Self {
        self.n = n;
        self
    }

    pub fn set_variant(&mut self, variant: impl Into<String>) -> &mut Self {
        self.variant = variant.into();
        self
    }

    pub fn set_overflow_threshold(&mut self, threshold: Option<f64>) -> &mut Self {
        self.overflow_threshold = threshold;
        self
    }

    pub fn set_max_value(&mut self, max_value: u64) -> &mut Self {
        self.max_value = max_value;
        self
    }

    pub fn set_distribution(&mut self, distribution: Distribution) -> &mut Self {
        self.distribution = distribution;
        self
    }

    pub fn set_warmup_rounds(&mut self, rounds: usize) -> &mut Self {
        self.warmup_rounds = rounds;
        self
    }

    pub fn set_sample_rounds(&mut self, rounds: usize) -> &mut Self {
        self.sample_rounds = rounds;
        self
    }

    pub fn set_seed(&mut self, seed: u32) -> &mut Self {
        self.seed = seed;
        self
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn overflow_threshold(&self) -> Option<f64> {
        self.overflow_threshold
    }

    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn warmup_rounds(&self) -> usize {
        self.warmup_rounds
    }

    pub fn sample_rounds(&self) -> usize {
        self.sample_rounds
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain_overrides_defaults() {
        let mut cfg = BenchConfig::new();
        cfg.set_n(500)
            .set_variant("overflow")
            .set_overflow_threshold(Some(0.9))
            .set_max_value(1000)
            .set_distribution(Distribution::SkewedWithOutliers)
            .set_seed(7);
        assert_eq!(cfg.n(), 500);
        assert_eq!(cfg.variant(), "overflow");
        assert_eq!(cfg.overflow_threshold(), Some(0.9));
        assert_eq!(cfg.max_value(), 1000);
        assert_eq!(cfg.distribution(), Distribution::SkewedWithOutliers);
        assert_eq!(cfg.seed(), 7);
    }

    #[test]
    fn defaults_are_sane() {
        let cfg = BenchConfig::new();
        assert_eq!(cfg.variant(), "noncross");
        assert!(cfg.n() > 0);
        assert!(cfg.sample_rounds() > 0);
    }
}
