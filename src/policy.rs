use crate::error::Error;
use crate::rng::VariateSource;
use crate::{atkinson, inversion, knuth, normal};
use std::fmt;
use std::str::FromStr;

/// Below this λ the primary policy uses Knuth's product method.
pub const SMALL_THRESHOLD: f64 = 64.0;
/// Above this λ the primary policy uses the normal approximation.
pub const HUGE_THRESHOLD: f64 = 4000.0;
/// From this λ up the robust policy uses the normal approximation.
pub const ROBUST_THRESHOLD: f64 = 1000.0;

/// Dispatch table mapping λ to a sampling [`Method`].
///
/// Which table applies is a property of the calling generator family, see
/// [`VariateSource::POLICY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// For families with a fast normal generator:
    /// Knuth below 64, Atkinson PA up to 4000, normal approximation above.
    #[default]
    Primary,
    /// For families without one (quasi-random sequences, MTGP-style
    /// generators): CDF inversion below 1000, normal approximation from 1000.
    Robust,
}

/// One of the sampling algorithms, selected per call from λ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// λ is zero, negative or NaN; always yields 0 and draws nothing.
    Degenerate,
    /// Knuth's product method, for λ below 64.
    Knuth,
    /// Atkinson's rejection method PA, for 64 ≤ λ ≤ 4000.
    Atkinson,
    /// Rounded normal approximation, for λ above 4000 (from 1000 under the robust policy).
    NormalApprox,
    /// Chunked CDF inversion, for λ below 1000 under the robust policy.
    ChunkedInversion,
}

impl Policy {
    /// Select the sampler for `lambda`.
    ///
    /// Total over all `f64`: anything that is not strictly positive (NaN
    /// included) maps to [`Method::Degenerate`].
    pub fn method(self, lambda: f64) -> Method {
        if lambda.is_nan() || lambda <= 0.0 {
            return Method::Degenerate;
        }
        match self {
            Policy::Primary if lambda < SMALL_THRESHOLD => Method::Knuth,
            Policy::Primary if lambda <= HUGE_THRESHOLD => Method::Atkinson,
            Policy::Primary => Method::NormalApprox,
            Policy::Robust if lambda < ROBUST_THRESHOLD => Method::ChunkedInversion,
            Policy::Robust => Method::NormalApprox,
        }
    }

    /// Draw one sample under this policy.
    #[inline]
    pub fn sample<S: VariateSource + ?Sized>(self, source: &mut S, lambda: f64) -> u32 {
        self.method(lambda).sample(source, lambda)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Primary => "primary",
            Policy::Robust => "robust",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Policy::Primary),
            "robust" => Ok(Policy::Robust),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

impl Method {
    /// Run this sampler directly, bypassing regime selection.
    ///
    /// Each method is only accurate within its own regime; outside it the
    /// result is still a count but may be biased (Knuth for large λ) or
    /// slow (Knuth or inversion for huge λ). Atkinson's envelope is undefined
    /// for λ ≤ 3.36/0.767 ≈ 4.38, so there it falls back to Knuth.
    ///
    /// # Panics
    /// Panics if Knuth exceeds 2^20 draws or Atkinson 10^8 proposals, which
    /// only a degenerate uniform stream (e.g. constant 1.0) can cause.
    #[inline]
    pub fn sample<S: VariateSource + ?Sized>(self, source: &mut S, lambda: f64) -> u32 {
        match self {
            Method::Degenerate => 0,
            Method::Knuth => knuth::sample(source, lambda),
            Method::Atkinson => atkinson::sample(source, lambda),
            Method::NormalApprox => normal::sample(source, lambda),
            Method::ChunkedInversion => inversion::sample(source, lambda),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Degenerate => "degenerate",
            Method::Knuth => "knuth",
            Method::Atkinson => "atkinson-pa",
            Method::NormalApprox => "normal-approx",
            Method::ChunkedInversion => "chunked-inversion",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draw one Poisson(λ) sample with the primary policy.
///
/// Meant for generator families with an efficient normal generator.
///
/// # Panics
/// Panics if the Knuth (2^20 draws) or Atkinson (10^8 proposals) iteration cap
/// is exhausted, which only a degenerate uniform stream can cause.
///
/// # Example
/// ```rust
/// use poisson_sampler::{SequenceSource, poisson_sample};
/// let mut source = SequenceSource::uniforms([0.9, 0.8, 0.7, 0.6, 0.5, 0.04]);
/// assert_eq!(poisson_sample(&mut source, 5.0), 5);
/// ```
#[inline]
pub fn poisson_sample<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> u32 {
    Policy::Primary.sample(source, lambda)
}

/// Draw one Poisson(λ) sample with the robust policy.
///
/// Meant for generator families whose normal generator is slow or less
/// trusted; below [`ROBUST_THRESHOLD`] only one uniform is consumed.
#[inline]
pub fn poisson_sample_robust<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> u32 {
    Policy::Robust.sample(source, lambda)
}

/// Draw one Poisson(λ) sample with the policy the source's family declares.
///
/// # Panics
/// Panics if the Knuth (2^20 draws) or Atkinson (10^8 proposals) iteration cap
/// is exhausted, which only a degenerate uniform stream can cause.
#[inline]
pub fn poisson_sample_for<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> u32 {
    S::POLICY.sample(source, lambda)
}

/// Four independent samples under the primary policy, drawn in order from
/// the same source.
///
/// # Panics
/// Panics if the Knuth (2^20 draws) or Atkinson (10^8 proposals) iteration cap
/// is exhausted, which only a degenerate uniform stream can cause.
pub fn poisson_sample4<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> [u32; 4] {
    std::array::from_fn(|_| poisson_sample(source, lambda))
}

/// Four independent samples under the robust policy.
pub fn poisson_sample4_robust<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> [u32; 4] {
    std::array::from_fn(|_| poisson_sample_robust(source, lambda))
}
