//! # Poisson Sampler
//!
//! This crate draws Poisson-distributed counts from a caller-owned stream of uniform and
//! normal variates. It is the sampling engine only: it never owns a generator, never
//! allocates while sampling, and keeps no state between calls.
//!
//! ## Features
//!
//! - **Regime dispatch:**
//!   - The primary [`Policy`] uses Knuth's product method for λ < 64, Atkinson's rejection
//!     method PA for 64 ≤ λ ≤ 4000 and a rounded normal approximation above.
//!   - The robust [`Policy`] uses a chunked CDF inversion for λ < 1000 and the normal
//!     approximation from there on. It serves generator families whose normal generator is
//!     slow or less trusted, such as quasi-random sequences.
//!
//! - **Pluggable variates:**
//!   - Samplers consume any [`VariateSource`]. [`RngSource`] adapts every [`rand::Rng`];
//!     [`SequenceSource`] replays a fixed stream for reproducible checks.
//!
//! - **Distribution object:**
//!   - [`Poisson`] validates λ once and implements [`rand::distributions::Distribution`].
//!
//! ## Mathematical Background
//!
//! - Knuth, D. E. (1969). *The Art of Computer Programming, Vol. 2: Seminumerical Algorithms*.
//! - Atkinson, A. C. (1979). The computer generation of Poisson random variables.
//!   *Journal of the Royal Statistical Society, Series C*, 28(1): 29–35.
//!
//! ## Usage Example
//!
//! ```rust
//! # use rand::SeedableRng;
//! # use rand::rngs::StdRng;
//! use poisson_sampler::Poisson;
//! let poisson = Poisson::new(100.0).unwrap();
//! let count = poisson.draw(&mut StdRng::seed_from_u64(0));
//! ```
//!
//! The free functions [`poisson_sample`] and [`poisson_sample_robust`] work directly on a
//! [`VariateSource`] for callers that manage their own generator state.
//! ## License
//! This crate is dual-licensed under the MIT OR Apache-2.0 licenses.

use rand::{Rng, prelude::Distribution};

pub use error::{Error, Result};
pub use factorial::log_factorial;
pub use inversion::INVERSION_CHUNK;
pub use policy::{
    HUGE_THRESHOLD, Method, Policy, ROBUST_THRESHOLD, SMALL_THRESHOLD, poisson_sample,
    poisson_sample_for, poisson_sample_robust, poisson_sample4, poisson_sample4_robust,
};
pub use rng::{RngSource, Robust, SequenceSource, VariateSource};

/// Poisson distribution with a fixed rate, bound to a dispatch policy.
///
/// The sampler for λ is selected once, at construction.
///
/// # Example
/// ```rust
/// # use rand::SeedableRng;
/// # use rand::rngs::StdRng;
/// use poisson_sampler::{Method, Poisson, Policy};
/// let poisson = Poisson::with_policy(250.0, Policy::Robust).unwrap();
/// assert_eq!(poisson.method(), Method::ChunkedInversion);
/// let counts = poisson.draw4(&mut StdRng::seed_from_u64(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poisson {
    lambda: f64,
    policy: Policy,
    method: Method,
}

impl Poisson {
    /// Create a Poisson(λ) sampler using the primary policy.
    ///
    /// # Errors
    /// [`Error::InvalidLambda`] if `lambda` is negative, NaN or infinite. λ = 0 is
    /// accepted and always yields 0.
    pub fn new(lambda: f64) -> Result<Self> {
        Self::with_policy(lambda, Policy::Primary)
    }

    /// Create a Poisson(λ) sampler using the given policy.
    ///
    /// # Errors
    /// [`Error::InvalidLambda`] if `lambda` is negative, NaN or infinite.
    pub fn with_policy(lambda: f64, policy: Policy) -> Result<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(Error::InvalidLambda(lambda));
        }
        let method = policy.method(lambda);
        tracing::debug!(lambda, %policy, %method, "configured Poisson sampler");
        Ok(Self {
            lambda,
            policy,
            method,
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The sampler selected for this λ.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Draw a single count using `rng` for uniform and normal variates.
    ///
    /// # Panics
    /// Panics if the Knuth (2^20 draws) or Atkinson (10^8 proposals) iteration cap is
    /// exhausted, which only a degenerate uniform stream can cause.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.sample_from(&mut RngSource::new(rng))
    }

    /// Draw a single count from an arbitrary variate source.
    ///
    /// # Panics
    /// Panics if the Knuth (2^20 draws) or Atkinson (10^8 proposals) iteration cap is
    /// exhausted, which only a degenerate uniform stream can cause.
    #[inline]
    pub fn sample_from<S: VariateSource + ?Sized>(&self, source: &mut S) -> u32 {
        self.method.sample(source, self.lambda)
    }

    /// Draw four independent counts, one after another from the same generator.
    ///
    /// # Panics
    /// Panics if the Knuth (2^20 draws) or Atkinson (10^8 proposals) iteration cap is
    /// exhausted, which only a degenerate uniform stream can cause.
    pub fn draw4<R: Rng + ?Sized>(&self, rng: &mut R) -> [u32; 4] {
        let mut source = RngSource::new(rng);
        std::array::from_fn(|_| self.sample_from(&mut source))
    }

    /// Draw `n` independent counts.
    ///
    /// # Panics
    /// Panics if the Knuth (2^20 draws) or Atkinson (10^8 proposals) iteration cap is
    /// exhausted, which only a degenerate uniform stream can cause.
    ///
    /// # Example
    /// ```rust
    /// use poisson_sampler::Poisson;
    /// let poisson = Poisson::new(3.0).unwrap();
    /// let mut rng = rand::thread_rng();
    /// let counts = poisson.draw_vec(&mut rng, 100);
    /// assert_eq!(counts.len(), 100);
    /// ```
    pub fn draw_vec<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<u32> {
        let mut source = RngSource::new(rng);
        (0..n).map(|_| self.sample_from(&mut source)).collect()
    }
}

impl Distribution<u32> for Poisson {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.draw(rng)
    }
}

mod atkinson;
mod error;
mod factorial;
mod inversion;
mod knuth;
mod normal;
mod policy;
pub(crate) mod rng;
