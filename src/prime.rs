/// Trial division up to `√n`
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut d = 3;
    // d <= n / d avoids overflowing d * d near usize::MAX
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Returns the smallest prime strictly greater than `n`
///
/// # Panics
///
/// Panics on overflow if no such prime fits in a `usize`,
/// which cannot happen for any capacity a `Vec` can allocate
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n + 1;
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
mod test {
    use super::{is_prime, next_prime};

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn squares_are_not_prime() {
        for p in [3usize, 5, 7, 11, 13, 251] {
            assert!(!is_prime(p * p), "{} is a square", p * p);
        }
    }

    #[test]
    fn strictly_greater() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(16), 17);
        assert_eq!(next_prime(17), 19);
        assert_eq!(next_prime(34), 37);
        assert_eq!(next_prime(74), 79);
        assert_eq!(next_prime(100), 101);
    }

    #[test]
    fn large_gap() {
        // 1327 and 1361 bracket the first prime gap of 34
        assert_eq!(next_prime(1327), 1361);
        assert_eq!(next_prime(1_000_000), 1_000_003);
    }
}
