//! Univariate Poisson mass function

/// Largest `k` whose factorial fits the lookup table.
pub const MAX_K: u8 = 34;

const FACTORIALS: [u128; MAX_K as usize + 1] = factorials();

const fn factorials() -> [u128; MAX_K as usize + 1] {
    let mut entries = [1u128; MAX_K as usize + 1];
    let mut i = 2;
    while i <= MAX_K as usize {
        entries[i] = i as u128 * entries[i - 1];
        i += 1;
    }
    entries
}

#[inline]
pub fn factorial(n: u8) -> u128 {
    assert!(n <= MAX_K, "{n}! overflows");
    FACTORIALS[n as usize]
}

/// P(X = k) for X ~ Poisson(mu). A zero rate puts all of the mass on `k = 0`.
#[inline]
pub fn pmf(k: u8, mu: f64) -> f64 {
    mu.powi(k as i32) * f64::exp(-mu) / factorial(k) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(1, factorial(0));
        assert_eq!(1, factorial(1));
        assert_eq!(2, factorial(2));
        assert_eq!(6, factorial(3));
        assert_eq!(24, factorial(4));
        assert_eq!(3_628_800, factorial(10));
    }

    #[test]
    #[should_panic(expected = "35! overflows")]
    fn test_factorial_overflow() {
        factorial(35);
    }

    #[test]
    fn test_pmf_known_values() {
        assert!((pmf(0, 1.0) - 0.36787944117144233).abs() < 1e-12);
        assert!((pmf(1, 1.0) - 0.36787944117144233).abs() < 1e-12);
        assert!((pmf(2, 1.0) - 0.18393972058572117).abs() < 1e-12);
        assert!((pmf(0, 2.5) - 0.0820849986238988).abs() < 1e-12);
        assert!((pmf(1, 2.5) - 0.205212496559747).abs() < 1e-12);
        assert!((pmf(2, 2.5) - 0.25651562069968376).abs() < 1e-12);
    }

    #[test]
    fn test_pmf_zero_goals_is_exp_neg_mu() {
        for mu in [0.1, 0.75, 1.3, 2.0, 3.6] {
            assert!((pmf(0, mu) - (-mu).exp()).abs() < 1e-15);
        }
    }

    #[test]
    fn test_pmf_zero_rate() {
        assert_eq!(pmf(0, 0.0), 1.0);
        assert_eq!(pmf(1, 0.0), 0.0);
        assert_eq!(pmf(4, 0.0), 0.0);
    }
}
