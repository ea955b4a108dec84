use statrs::function::gamma::ln_gamma;

/// Natural logarithm of `n!` for a non-negative integral `n` held as `f64`.
///
/// Uses Γ(n + 1) = n!, so the value never overflows the way `n!` itself does
/// past `n = 170`. Both `0!` and `1!` short-circuit to exactly `0.0`.
#[inline]
pub fn log_factorial(n: f64) -> f64 {
    if n <= 1.0 { 0.0 } else { ln_gamma(n + 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn boundary_values_are_exact() {
        assert_eq!(log_factorial(0.0), 0.0);
        assert_eq!(log_factorial(1.0), 0.0);
    }

    #[test]
    fn matches_exact_integer_factorial() {
        let mut fact: u128 = 1;
        for n in 2..=34u32 {
            fact *= n as u128;
            assert_relative_eq!(
                log_factorial(n as f64),
                (fact as f64).ln(),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn matches_log_sum_up_to_170_and_beyond() {
        // ln(n!) = sum_{k=2}^{n} ln k
        let mut acc = 0.0_f64;
        for n in 2..=1000u32 {
            acc += (n as f64).ln();
            assert_relative_eq!(log_factorial(n as f64), acc, max_relative = 1e-11);
        }
    }

    #[test]
    fn agrees_with_statrs_table() {
        use statrs::function::factorial::ln_factorial;
        for n in [2u64, 10, 64, 100, 170] {
            assert_relative_eq!(
                log_factorial(n as f64),
                ln_factorial(n),
                max_relative = 1e-12
            );
        }
    }
}
