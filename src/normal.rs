use crate::rng::VariateSource;

/// Approximate Poisson(λ) by a rounded Normal(λ, λ) draw.
///
/// Consumes exactly one normal variate. The cast saturates, so the
/// astronomically unlikely negative value maps to 0.
#[inline]
pub(crate) fn sample<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> u32 {
    let n = source.normal_double();
    (lambda.sqrt() * n + lambda).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;

    #[test]
    fn shifts_and_scales_the_normal() {
        let mut source = SequenceSource::normals([1.0, -2.0, 0.0, 0.004]);
        assert_eq!(sample(&mut source, 10_000.0), 10_100);
        assert_eq!(sample(&mut source, 10_000.0), 9_800);
        assert_eq!(sample(&mut source, 4_500.0), 4_500);
        // 0.004 * 100 = 0.4 rounds down
        assert_eq!(sample(&mut source, 10_000.0), 10_000);
        assert_eq!(source.normals_drawn(), 4);
        assert_eq!(source.uniforms_drawn(), 0);
    }

    #[test]
    fn negative_tail_saturates_at_zero() {
        let mut source = SequenceSource::normals([-1e6]);
        assert_eq!(sample(&mut source, 5_000.0), 0);
    }
}
