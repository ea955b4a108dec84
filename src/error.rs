/// Errors raised while configuring a Poisson sampler.
///
/// Sampling itself never fails; only construction and parsing do.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The rate must be finite and non-negative.
    #[error("invalid lambda {0}: must be finite and non-negative")]
    InvalidLambda(f64),

    #[error("unknown dispatch policy `{0}` (expected `primary` or `robust`)")]
    UnknownPolicy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
