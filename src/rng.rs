use crate::policy::Policy;
use rand::{Rng, distributions::Open01, prelude::Distribution};
use statrs::distribution::Normal;
use std::collections::VecDeque;

/// Caller-owned source of standard variates consumed by the samplers.
///
/// This is the only capability the samplers need from a generator: each call
/// advances the underlying state by one variate. Implementors are never
/// shared across threads by the samplers; every logical thread should own its
/// own source.
pub trait VariateSource {
    /// Dispatch policy suited to this generator family.
    ///
    /// Families with a fast, trusted normal generator use
    /// [`Policy::Primary`]. Quasi-random or otherwise normal-poor families
    /// should override this with [`Policy::Robust`].
    const POLICY: Policy = Policy::Primary;

    /// Draw a uniform variate from the open interval (0, 1).
    fn uniform_double(&mut self) -> f64;

    /// Draw a standard normal variate.
    fn normal_double(&mut self) -> f64;
}

/// Adapter exposing any [`rand::Rng`] as a [`VariateSource`].
///
/// Uniforms come from [`Open01`] so that `ln(u)` and `ln(1 - u)` are always
/// finite; normals come from `statrs`'s standard normal.
///
/// # Example
/// ```rust
/// # use rand::SeedableRng;
/// # use rand::rngs::StdRng;
/// use poisson_sampler::{RngSource, VariateSource};
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut source = RngSource::new(&mut rng);
/// let u = source.uniform_double();
/// assert!(u > 0.0 && u < 1.0);
/// ```
#[derive(Debug)]
pub struct RngSource<'a, R: ?Sized> {
    rng: &'a mut R,
    std_norm: Normal,
}

impl<'a, R: Rng + ?Sized> RngSource<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            std_norm: Normal::standard(),
        }
    }
}

impl<R: Rng + ?Sized> VariateSource for RngSource<'_, R> {
    #[inline(always)]
    fn uniform_double(&mut self) -> f64 {
        self.rng.sample(Open01)
    }

    #[inline(always)]
    fn normal_double(&mut self) -> f64 {
        self.std_norm.sample(&mut *self.rng)
    }
}

/// Marks a source as belonging to a generator family without a fast normal
/// generator, so that [`crate::poisson_sample_for`] routes it through the
/// robust policy.
#[derive(Debug, Clone)]
pub struct Robust<S>(pub S);

impl<S: VariateSource> VariateSource for Robust<S> {
    const POLICY: Policy = Policy::Robust;

    #[inline(always)]
    fn uniform_double(&mut self) -> f64 {
        self.0.uniform_double()
    }

    #[inline(always)]
    fn normal_double(&mut self) -> f64 {
        self.0.normal_double()
    }
}

/// Replays a fixed stream of variates in order.
///
/// Useful for reproducing a sampler's decisions exactly, e.g. when checking a
/// rejection step by hand. Draw counters record how much of each stream was
/// consumed.
///
/// # Panics
/// Drawing from an exhausted stream panics.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    uniforms: VecDeque<f64>,
    normals: VecDeque<f64>,
    uniforms_drawn: usize,
    normals_drawn: usize,
}

impl SequenceSource {
    /// A source replaying `uniforms`, with no normal variates available.
    pub fn uniforms<I: IntoIterator<Item = f64>>(uniforms: I) -> Self {
        Self {
            uniforms: uniforms.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A source replaying `normals`, with no uniform variates available.
    pub fn normals<I: IntoIterator<Item = f64>>(normals: I) -> Self {
        Self {
            normals: normals.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_normals<I: IntoIterator<Item = f64>>(mut self, normals: I) -> Self {
        self.normals.extend(normals);
        self
    }

    pub fn uniforms_drawn(&self) -> usize {
        self.uniforms_drawn
    }

    pub fn normals_drawn(&self) -> usize {
        self.normals_drawn
    }

    /// Uniform variates not yet consumed.
    pub fn remaining_uniforms(&self) -> usize {
        self.uniforms.len()
    }
}

impl VariateSource for SequenceSource {
    fn uniform_double(&mut self) -> f64 {
        let u = self.uniforms.pop_front().unwrap_or_else(|| {
            panic!(
                "uniform stream exhausted after {} draws",
                self.uniforms_drawn
            )
        });
        self.uniforms_drawn += 1;
        u
    }

    fn normal_double(&mut self) -> f64 {
        let n = self.normals.pop_front().unwrap_or_else(|| {
            panic!("normal stream exhausted after {} draws", self.normals_drawn)
        });
        self.normals_drawn += 1;
        n
    }
}
