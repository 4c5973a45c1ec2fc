use std::f64::consts::PI;

use rand::distributions::{Distribution, Open01};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

// Beyond this the product of uniforms underflows often enough to matter
pub const MAX_ERLANG_SHAPE: u32 = 512;

/// Sum of `k` Exponential(theta) variates, computed as `-theta * ln(u_1 * ... * u_k)`.
pub fn erlang<R: Rng + ?Sized>(rng: &mut R, k: u32, theta: f64) -> f64 {
    let mut u_product = 1.0f64;
    for _ in 0..k {
        let u: f64 = Open01.sample(rng);
        u_product *= u;
    }
    -theta * u_product.ln()
}

/// Box–Muller, cosine branch only. The sine companion is dropped.
pub fn box_muller<R: Rng + ?Sized>(rng: &mut R, mu: f64, sigma: f64) -> f64 {
    let u1: f64 = Open01.sample(rng);
    let u2: f64 = Open01.sample(rng);
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    z0 * sigma + mu
}

/// A sampling law for arrival gaps and processing times.
///
/// In TOML a law is a table tagged by its family:
///
/// ```toml
/// type1_arrival = { family = "erlang", k = 2, theta = 3.0 }
/// type2_arrival = { family = "normal", mu = 2.0, sigma = 2.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum Law {
    Erlang { k: u32, theta: f64 },
    Normal { mu: f64, sigma: f64 },
}

impl Law {
    pub fn erlang(k: u32, theta: f64) -> Result<Law> {
        let law = Law::Erlang { k, theta };
        law.validate()?;
        Ok(law)
    }

    pub fn normal(mu: f64, sigma: f64) -> Result<Law> {
        let law = Law::Normal { mu, sigma };
        law.validate()?;
        Ok(law)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Law::Erlang { k, theta } => {
                if k == 0 {
                    return Err(invalid("k", k as f64, "shape must be at least 1"));
                }
                if k > MAX_ERLANG_SHAPE {
                    return Err(invalid("k", k as f64, "shape too large for product sampling"));
                }
                if !(theta.is_finite() && theta > 0.) {
                    return Err(invalid("theta", theta, "scale must be finite and positive"));
                }
            }
            Law::Normal { mu, sigma } => {
                if !mu.is_finite() {
                    return Err(invalid("mu", mu, "mean must be finite"));
                }
                if !(sigma.is_finite() && sigma > 0.) {
                    return Err(invalid("sigma", sigma, "standard deviation must be finite and positive"));
                }
            }
        }
        Ok(())
    }

    /// Like `validate`, and additionally requires the law to put most of its
    /// mass on positive values, so that conditioning on a positive draw
    /// terminates quickly.
    pub fn validate_duration(&self) -> Result<()> {
        self.validate()?;
        if let Law::Normal { mu, .. } = *self {
            if mu <= 0. {
                return Err(invalid("mu", mu, "a time span needs a positive mean"));
            }
        }
        Ok(())
    }

    pub fn mean(&self) -> f64 {
        match *self {
            Law::Erlang { k, theta } => k as f64 * theta,
            Law::Normal { mu, .. } => mu,
        }
    }

    pub fn std_dev(&self) -> f64 {
        match *self {
            Law::Erlang { k, theta } => (k as f64).sqrt() * theta,
            Law::Normal { sigma, .. } => sigma,
        }
    }
}

impl Distribution<f64> for Law {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Law::Erlang { k, theta } => erlang(rng, k, theta),
            Law::Normal { mu, sigma } => box_muller(rng, mu, sigma),
        }
    }
}

fn invalid(param: &'static str, value: f64, reason: &'static str) -> SimError {
    SimError::InvalidParameter { param, value, reason }
}
