//! Seedable source of uniform, Erlang and Normal variates.
//!
//! `VariateGenerator` owns its own `StdRng`; two generators built from the
//! same seed produce the same stream. `SampleSet` collects raw draws under
//! fixed laws for offline distribution testing.

use rand::distributions::{Distribution, Open01};
use rand::rngs::StdRng;
use rand::{FromEntropy, SeedableRng};
use serde::Serialize;
use tracing::trace;

use crate::distribution::{self, Law};
use crate::error::Result;

pub struct VariateGenerator {
    rng: StdRng,
}

impl VariateGenerator {
    pub fn seeded(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        for chunk in bytes.chunks_mut(8) {
            chunk.copy_from_slice(&seed.to_le_bytes());
        }
        VariateGenerator {
            rng: StdRng::from_seed(bytes),
        }
    }

    pub fn from_entropy() -> Self {
        VariateGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => VariateGenerator::seeded(seed),
            None => VariateGenerator::from_entropy(),
        }
    }

    /// One draw in the open interval (0, 1), so it is always safe to take its log.
    pub fn uniform(&mut self) -> f64 {
        Open01.sample(&mut self.rng)
    }

    pub fn erlang(&mut self, k: u32, theta: f64) -> f64 {
        debug_assert!(k >= 1 && theta > 0.);
        distribution::erlang(&mut self.rng, k, theta)
    }

    pub fn normal(&mut self, mu: f64, sigma: f64) -> f64 {
        debug_assert!(sigma > 0.);
        distribution::box_muller(&mut self.rng, mu, sigma)
    }

    /// Raw draw from `law`, negative values included.
    pub fn sample(&mut self, law: &Law) -> f64 {
        law.sample(&mut self.rng)
    }

    /// Draw from `law` conditioned on the result being strictly positive.
    ///
    /// Truncation shifts the mean of Normal laws upward: Normal(2, 2) becomes
    /// a law with mean about 2.58, Normal(2, 1.5) about 2.27, while
    /// Normal(1.5, 0.5) is practically unchanged. Erlang laws are unaffected.
    /// Laws failing `Law::validate_duration` are rejected before any draw.
    pub fn duration(&mut self, law: &Law) -> Result<f64> {
        law.validate_duration()?;
        loop {
            let v = self.sample(law);
            if v > 0. {
                return Ok(v);
            }
            trace!(rejected = v, "non-positive duration redrawn");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleColumn {
    pub name: String,
    pub law: Law,
    pub values: Vec<f64>,
}

impl SampleColumn {
    /// `None` when there are fewer than two values.
    pub fn summary(&self) -> Option<SampleSummary> {
        if self.values.len() < 2 {
            return None;
        }
        let mean = statistical::mean(&self.values);
        Some(SampleSummary {
            count: self.values.len(),
            mean,
            std_dev: statistical::standard_deviation(&self.values, Some(mean)),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleSet {
    pub columns: Vec<SampleColumn>,
}

impl SampleSet {
    /// Draws `rows` rows; within a row the laws are sampled in the order given.
    /// Every law is validated before the first draw.
    pub fn collect(gen: &mut VariateGenerator, laws: &[(&str, Law)], rows: usize) -> Result<SampleSet> {
        for (_, law) in laws {
            law.validate()?;
        }
        let mut columns: Vec<SampleColumn> = laws
            .iter()
            .map(|&(name, law)| SampleColumn {
                name: name.to_owned(),
                law,
                values: Vec::with_capacity(rows),
            })
            .collect();
        for _ in 0..rows {
            for column in columns.iter_mut() {
                let v = gen.sample(&column.law);
                column.values.push(v);
            }
        }
        Ok(SampleSet { columns })
    }

    /// The four parameter sets the simulator uses by default.
    pub fn reference(gen: &mut VariateGenerator, rows: usize) -> Result<SampleSet> {
        let laws = [
            ("rand_norm_2_2", Law::Normal { mu: 2., sigma: 2. }),
            ("rand_norm_2_1.5", Law::Normal { mu: 2., sigma: 1.5 }),
            ("rand_norm_1.5_0.5", Law::Normal { mu: 1.5, sigma: 0.5 }),
            ("rand_erl", Law::Erlang { k: 2, theta: 3. }),
        ];
        SampleSet::collect(gen, &laws, rows)
    }

    pub fn column(&self, name: &str) -> Option<&SampleColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn uniform_stays_in_open_interval() {
        let mut gen = VariateGenerator::seeded(1);
        for _ in 0..10_000 {
            let u = gen.uniform();
            assert!(u > 0. && u < 1.);
        }
    }

    #[test]
    fn erlang_shape_one_is_a_single_exponential() {
        let mut a = VariateGenerator::seeded(42);
        let mut b = VariateGenerator::seeded(42);
        for _ in 0..100 {
            let expected = -3. * b.uniform().ln();
            assert_eq!(a.erlang(1, 3.), expected);
        }
    }

    #[test]
    fn erlang_is_product_then_log() {
        let mut a = VariateGenerator::seeded(9);
        let mut b = VariateGenerator::seeded(9);
        let u1 = b.uniform();
        let u2 = b.uniform();
        assert_eq!(a.erlang(2, 3.), -3. * (u1 * u2).ln());
    }

    #[test]
    fn normal_is_box_muller_cosine_branch() {
        let mut a = VariateGenerator::seeded(5);
        let mut b = VariateGenerator::seeded(5);
        let u1 = b.uniform();
        let u2 = b.uniform();
        let z = (-2. * u1.ln()).sqrt() * (2. * std::f64::consts::PI * u2).cos();
        assert_eq!(a.normal(2., 1.5), z * 1.5 + 2.);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = VariateGenerator::seeded(77);
        let mut b = VariateGenerator::seeded(77);
        let xs: Vec<f64> = (0..50).map(|_| a.normal(0., 1.)).collect();
        let ys: Vec<f64> = (0..50).map(|_| b.normal(0., 1.)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn durations_are_positive() {
        let mut gen = VariateGenerator::seeded(3);
        let law = Law::Normal { mu: 2., sigma: 2. };
        for _ in 0..5_000 {
            assert!(gen.duration(&law).unwrap() > 0.);
        }
    }

    #[test]
    fn sample_moments_are_close() {
        let mut gen = VariateGenerator::seeded(2024);
        let set = SampleSet::reference(&mut gen, 20_000).unwrap();
        assert_eq!(set.columns.len(), 4);
        for column in &set.columns {
            let s = column.summary().unwrap();
            assert_eq!(s.count, 20_000);
            assert!((s.mean - column.law.mean()).abs() < 0.1, "{}: {:?}", column.name, s);
            assert!((s.std_dev - column.law.std_dev()).abs() < 0.15, "{}: {:?}", column.name, s);
        }
    }

    #[test]
    fn reference_rows_are_interleaved() {
        let mut a = VariateGenerator::seeded(11);
        let mut b = VariateGenerator::seeded(11);
        let set = SampleSet::reference(&mut a, 2).unwrap();
        let first_norm = b.normal(2., 2.);
        let _ = b.normal(2., 1.5);
        let _ = b.normal(1.5, 0.5);
        let first_erl = b.erlang(2, 3.);
        assert_eq!(set.column("rand_norm_2_2").unwrap().values[0], first_norm);
        assert_eq!(set.column("rand_erl").unwrap().values[0], first_erl);
        assert!(set.column("missing").is_none());
    }

    #[test]
    fn summary_needs_two_values() {
        let mut gen = VariateGenerator::seeded(0);
        let set = SampleSet::collect(&mut gen, &[("x", Law::Erlang { k: 1, theta: 1. })], 1).unwrap();
        assert!(set.columns[0].summary().is_none());
    }

    #[test]
    fn collect_rejects_invalid_laws() {
        let mut gen = VariateGenerator::seeded(0);
        let laws = [
            ("rand_erl", Law::Erlang { k: 2, theta: 3. }),
            ("bad_erl", Law::Erlang { k: 0, theta: 3. }),
        ];
        match SampleSet::collect(&mut gen, &laws, 3) {
            Err(SimError::InvalidParameter { param, .. }) => assert_eq!(param, "k"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }

        let bad_sigma = [("bad_norm", Law::Normal { mu: 2., sigma: -1. })];
        match SampleSet::collect(&mut gen, &bad_sigma, 3) {
            Err(SimError::InvalidParameter { param, .. }) => assert_eq!(param, "sigma"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn collect_draws_nothing_when_rejecting() {
        let mut a = VariateGenerator::seeded(6);
        let mut b = VariateGenerator::seeded(6);
        let laws = [
            ("ok", Law::Normal { mu: 0., sigma: 1. }),
            ("bad", Law::Normal { mu: 0., sigma: 0. }),
        ];
        assert!(SampleSet::collect(&mut a, &laws, 5).is_err());
        assert_eq!(a.uniform(), b.uniform());
    }

    #[test]
    fn duration_rejects_laws_without_positive_mass() {
        let mut gen = VariateGenerator::seeded(4);
        match gen.duration(&Law::Normal { mu: -1e6, sigma: 1. }) {
            Err(SimError::InvalidParameter { param, .. }) => assert_eq!(param, "mu"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
        assert!(gen.duration(&Law::Erlang { k: 0, theta: 1. }).is_err());
    }

    #[test]
    fn truncated_normal_mean_shifts_up() {
        let mut gen = VariateGenerator::seeded(31);
        let law = Law::Normal { mu: 2., sigma: 2. };
        let draws: Vec<f64> = (0..20_000).map(|_| gen.duration(&law).unwrap()).collect();
        let mean = statistical::mean(&draws);
        assert!((mean - 2.58).abs() < 0.1, "mean {}", mean);
    }
}
