//! Heavy-tailed step generators.
//!
//! Two interchangeable strategies produce one scalar perturbation per axis:
//!
//! - [`RandomWalk::Levy`]: a power-law step `alpha * u^(-1/lambda) * (v - 0.5)`
//!   with `u, v` uniform.
//! - [`RandomWalk::Mantegna`]: Mantegna's approximation of a symmetric
//!   Lévy-stable deviate with stability index `alpha`, built from two
//!   Gaussian draws and a Gamma-function scale.
//!
//! Both consume the caller's random source strictly sequentially.
//!
//! # References
//!
//! - Mantegna, R. N. (1994), "Fast, accurate algorithm for numerical
//!   simulation of Lévy stable stochastic processes", *Phys. Rev. E* 49(5).
//! - Yang, X.-S. & Deb, S. (2009), "Cuckoo Search via Lévy Flights"

use crate::error::CuckooError;
use rand::distr::OpenClosed01;
use rand::Rng;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use u_numflow::special::ln_gamma;

/// Random-walk variant used to perturb cuckoos.
///
/// Chosen once per run; the variant never changes between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RandomWalk {
    /// Power-law step scaled by `alpha`, tail exponent `lambda`.
    ///
    /// `lambda` in `[1, 3]` is the usual operating range.
    #[default]
    Levy,

    /// Mantegna's algorithm with stability index `alpha` in `(0, 2]`.
    ///
    /// `alpha = 1` gives Cauchy-like steps, `alpha = 2` Gaussian ones.
    Mantegna,
}

impl RandomWalk {
    /// Draws one step.
    ///
    /// `lambda` is only read by [`Levy`](Self::Levy); `alpha` is the step
    /// scale for `Levy` and the stability index for
    /// [`Mantegna`](Self::Mantegna).
    pub fn step<R: Rng>(self, lambda: f64, alpha: f64, rng: &mut R) -> Result<f64, CuckooError> {
        match self {
            RandomWalk::Levy => levy_step(lambda, alpha, rng),
            RandomWalk::Mantegna => mantegna_step(alpha, rng),
        }
    }

    /// Checks the parameters [`step`](Self::step) would reject, without
    /// drawing anything.
    pub fn validate(self, lambda: f64, alpha: f64) -> Result<(), CuckooError> {
        match self {
            RandomWalk::Levy => check_lambda(lambda),
            RandomWalk::Mantegna => mantegna_sigma(alpha).map(|_| ()),
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            RandomWalk::Levy => "levy",
            RandomWalk::Mantegna => "mantegna",
        }
    }
}

impl fmt::Display for RandomWalk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RandomWalk {
    type Err = CuckooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "levy" | "lévy" => Ok(RandomWalk::Levy),
            "mantegna" => Ok(RandomWalk::Mantegna),
            _ => Err(CuckooError::UnsupportedWalk(s.to_string())),
        }
    }
}

/// Lévy-flight step: `alpha * u^(-1/lambda) * (v - 0.5)`.
///
/// `u` is drawn from `(0, 1]` so the power stays finite; `v` from `[0, 1)`.
pub fn levy_step<R: Rng>(lambda: f64, alpha: f64, rng: &mut R) -> Result<f64, CuckooError> {
    check_lambda(lambda)?;
    let u: f64 = rng.sample(OpenClosed01);
    let f = u.powf(-1.0 / lambda);
    let v: f64 = rng.random();
    Ok(alpha * f * (v - 0.5))
}

fn check_lambda(lambda: f64) -> Result<(), CuckooError> {
    if lambda == 0.0 || !lambda.is_finite() {
        return Err(CuckooError::InvalidLambda(lambda));
    }
    Ok(())
}

/// Mantegna step with stability index `alpha`: `x / |y|^(1/alpha)` where
/// `x ~ N(0, sigma_x)` and `y ~ N(0, 1)`.
pub fn mantegna_step<R: Rng>(alpha: f64, rng: &mut R) -> Result<f64, CuckooError> {
    let sigma_x = mantegna_sigma(alpha)?;
    let x = gaussian(0.0, sigma_x, rng);
    let y = loop {
        let y = gaussian(0.0, 1.0, rng).abs();
        if y > 0.0 {
            break y;
        }
    };
    Ok(x / y.powf(1.0 / alpha))
}

/// Scale of the numerator Gaussian in Mantegna's algorithm:
///
/// ```text
/// sigma_x = ( Γ(α+1) sin(πα/2) / (Γ((α+1)/2) α 2^((α-1)/2)) )^(1/α)
/// ```
///
/// The Gamma ratio is taken in log-space with
/// [`u_numflow::special::ln_gamma`]. An `alpha` so small that the
/// scale overflows is reported as out of range.
pub fn mantegna_sigma(alpha: f64) -> Result<f64, CuckooError> {
    if !(alpha > 0.0 && alpha <= 2.0) {
        return Err(CuckooError::InvalidAlpha(alpha));
    }
    let gamma_ratio = (ln_gamma(alpha + 1.0) - ln_gamma((alpha + 1.0) * 0.5)).exp();
    let sigma = gamma_ratio * (PI * alpha * 0.5).sin() / (alpha * 2f64.powf((alpha - 1.0) * 0.5));
    let sigma = sigma.abs().powf(1.0 / alpha);
    if !sigma.is_finite() {
        return Err(CuckooError::InvalidAlpha(alpha));
    }
    Ok(sigma)
}

/// Normal deviate via the Marsaglia polar method.
///
/// Pairs with `w = x1² + x2² >= 1` (or `w == 0`) are rejected.
pub fn gaussian<R: Rng>(mean: f64, sigma: f64, rng: &mut R) -> f64 {
    let (x1, w) = loop {
        let x1 = 2.0 * rng.random::<f64>() - 1.0;
        let x2 = 2.0 * rng.random::<f64>() - 1.0;
        let w = x1 * x1 + x2 * x2;
        if w < 1.0 && w > 0.0 {
            break (x1, w);
        }
    };
    mean + sigma * x1 * (-2.0 * w.ln() / w).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_numflow::random::create_rng;

    #[test]
    fn test_mantegna_sigma_small_alpha() {
        // alpha = 0.5: (Γ(1.5) sin(π/4) / (Γ(0.75) 0.5 2^-0.25))^2
        let sigma = mantegna_sigma(0.5).unwrap();
        assert!((sigma - 1.479_337_559_594_318_8).abs() < 1e-6, "sigma = {sigma}");
    }

    #[test]
    fn test_mantegna_sigma_finite_across_domain() {
        for alpha in [0.2, 0.3, 0.7, 1.9, 2.0] {
            let sigma = mantegna_sigma(alpha).unwrap();
            assert!(sigma.is_finite() && sigma >= 0.0, "alpha {alpha}: sigma = {sigma}");
        }
    }

    #[test]
    fn test_mantegna_sigma_reference() {
        // Commonly tabulated value for beta = 1.5.
        let sigma = mantegna_sigma(1.5).unwrap();
        assert!((sigma - 0.696_574_502_557_238_5).abs() < 1e-6, "sigma = {sigma}");

        // alpha = 1 reduces to sin(π/2) Γ(2) / Γ(1) = 1.
        assert!((mantegna_sigma(1.0).unwrap() - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_mantegna_sigma_rejects_out_of_range() {
        for alpha in [0.0, -0.5, 2.0001, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(mantegna_sigma(alpha), Err(CuckooError::InvalidAlpha(_))),
                "alpha {alpha} should be rejected"
            );
        }
        assert!(mantegna_sigma(2.0).is_ok());
        assert!(mantegna_sigma(0.1).is_ok());
    }

    #[test]
    fn test_levy_rejects_zero_lambda() {
        let mut rng = create_rng(42);
        assert_eq!(
            levy_step(0.0, 1.0, &mut rng),
            Err(CuckooError::InvalidLambda(0.0))
        );
        assert!(levy_step(f64::NAN, 1.0, &mut rng).is_err());
        assert!(RandomWalk::Levy.step(0.0, 1.0, &mut rng).is_err());
        assert!(RandomWalk::Levy.validate(0.0, 1.0).is_err());
        // Levy ignores alpha's domain; Mantegna ignores lambda.
        assert!(RandomWalk::Levy.validate(1.5, -3.0).is_ok());
        assert!(RandomWalk::Mantegna.validate(0.0, 1.5).is_ok());
    }

    #[test]
    fn test_mantegna_rejects_bad_alpha_on_step() {
        let mut rng = create_rng(42);
        assert_eq!(
            RandomWalk::Mantegna.step(1.5, 0.0, &mut rng),
            Err(CuckooError::InvalidAlpha(0.0))
        );
        assert!(RandomWalk::Mantegna.step(1.5, 2.5, &mut rng).is_err());
    }

    #[test]
    fn test_levy_step_bounded_by_alpha_scale() {
        // |step| <= alpha * 0.5 * u^(-1/lambda); with lambda large the tail is short.
        let mut rng = create_rng(7);
        for _ in 0..10_000 {
            let s = levy_step(1e6, 2.0, &mut rng).unwrap();
            assert!(s.is_finite());
            assert!(s.abs() <= 1.0 + 1e-3, "step {s} too large");
        }
    }

    #[test]
    fn test_levy_step_symmetric() {
        let mut rng = create_rng(11);
        let n = 100_000;
        let positive = (0..n)
            .map(|_| levy_step(1.5, 1.0, &mut rng).unwrap())
            .filter(|&s| s > 0.0)
            .count();
        let ratio = positive as f64 / n as f64;
        assert!((ratio - 0.5).abs() < 0.01, "positive ratio {ratio}");
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = create_rng(3);
        let n = 100_000;
        let samples: Vec<f64> = (0..n).map(|_| gaussian(2.0, 3.0, &mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!((mean - 2.0).abs() < 0.05, "mean {mean}");
        assert!((var - 9.0).abs() < 0.2, "variance {var}");
    }

    fn interquartile_range(samples: &mut [f64]) -> f64 {
        samples.sort_by(f64::total_cmp);
        let n = samples.len();
        samples[3 * n / 4] - samples[n / 4]
    }

    #[test]
    fn test_mantegna_distribution_sanity() {
        let mut rng = create_rng(2024);
        let n = 100_000;
        let mut spreads = Vec::new();

        for _ in 0..2 {
            let mut samples: Vec<f64> = (0..n)
                .map(|_| mantegna_step(1.5, &mut rng).unwrap())
                .collect();
            assert!(samples.iter().all(|s| s.is_finite()));

            let mean = samples.iter().sum::<f64>() / n as f64;
            let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            assert!(mean.abs() < 1.0, "mean {mean} should be near zero");
            assert!(var.is_finite(), "variance must be finite");

            let positive = samples.iter().filter(|&&s| s > 0.0).count() as f64 / n as f64;
            assert!((positive - 0.5).abs() < 0.01, "positive ratio {positive}");

            spreads.push(interquartile_range(&mut samples));
        }

        // The bulk of the distribution is stable from batch to batch.
        let drift = (spreads[0] - spreads[1]).abs() / spreads[0];
        assert!(drift < 0.05, "spread drifted by {drift}");
    }

    #[test]
    fn test_walk_parse() {
        assert_eq!("levy".parse::<RandomWalk>(), Ok(RandomWalk::Levy));
        assert_eq!(" Mantegna ".parse::<RandomWalk>(), Ok(RandomWalk::Mantegna));
        assert_eq!(
            "brownian".parse::<RandomWalk>(),
            Err(CuckooError::UnsupportedWalk("brownian".into()))
        );
        assert_eq!(RandomWalk::Mantegna.to_string(), "mantegna");
    }
}
