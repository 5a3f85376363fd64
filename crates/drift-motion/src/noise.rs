//! Random perturbation terms.
//!
//! Gaussian samples use the Box-Muller transform on two uniform draws.

use drift_core::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One standard-normal sample via Box-Muller.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// One sample from `N(mean, sigma²)`.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    mean + sigma * standard_normal(rng)
}

/// One sample from `U(lo, hi)`. Returns `lo` when the range is empty.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        lo + (hi - lo) * rng.random::<f64>()
    } else {
        lo
    }
}

/// A zero-mean additive noise term.
///
/// [`Perturbation::None`] never touches the generator, so models without
/// noise consume no randomness at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Perturbation {
    /// No perturbation.
    #[default]
    None,
    /// `U(-half_range, half_range)`.
    Uniform {
        /// Half-width of the interval.
        half_range: f64,
    },
    /// `N(0, sigma²)`.
    Gaussian {
        /// Standard deviation.
        sigma: f64,
    },
}

impl Perturbation {
    /// Whether this term is [`Perturbation::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Draw one scalar sample.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::None => 0.0,
            Self::Uniform { half_range } => uniform(rng, -half_range, half_range),
            Self::Gaussian { sigma } => normal(rng, 0.0, sigma),
        }
    }

    /// Draw an independent `(x, y)` pair.
    pub fn sample2<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let x = self.sample(rng);
        let y = self.sample(rng);
        (x, y)
    }

    /// Check the scale parameter is finite and non-negative.
    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        match *self {
            Self::None => Ok(()),
            Self::Uniform { half_range: s } | Self::Gaussian { sigma: s } => {
                if s.is_finite() && s >= 0.0 {
                    Ok(())
                } else {
                    Err(ConfigError::parameter(
                        name,
                        format!("scale must be finite and >= 0, got {s}"),
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn gaussian_moments_are_plausible() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| normal(&mut rng, 1.0, 0.5)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 1.0).abs() < 0.02, "mean {mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "sd {}", var.sqrt());
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let p = Perturbation::Uniform { half_range: 0.1 };
        for _ in 0..1000 {
            let s = p.sample(&mut rng);
            assert!((-0.1..=0.1).contains(&s));
        }
        assert_eq!(uniform(&mut rng, 2.0, 2.0), 2.0);
    }

    #[test]
    fn none_consumes_no_randomness() {
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = a.clone();
        assert_eq!(Perturbation::None.sample2(&mut a), (0.0, 0.0));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn validate_rejects_negative_scale() {
        assert!(Perturbation::Gaussian { sigma: -0.1 }
            .validate("thermal")
            .is_err());
        assert!(Perturbation::Uniform {
            half_range: f64::NAN
        }
        .validate("jitter")
        .is_err());
        assert!(Perturbation::Gaussian { sigma: 0.0 }.validate("thermal").is_ok());
    }

    #[test]
    fn serde_uses_kind_tag() {
        let p = Perturbation::Gaussian { sigma: 0.2 };
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"kind":"gaussian","sigma":0.2}"#);
        let back: Perturbation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
