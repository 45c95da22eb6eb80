//! Miller-Rabin primality testing and prime generation

use num_bigint::{BigUint, RandBigInt, ToBigUint};
use num_integer::Integer;
use num_traits::One;
use rand::{thread_rng, Rng};

use crate::arith::mod_pow;
use crate::error::{CryptoError, Result};

/// Attempt budget for rejection-sampling a prime of a given bit length.
const MAX_PRIME_ATTEMPTS: u64 = 100_000;

/// Miller-Rabin primality test.
///
/// Returns `false` for a definitely composite number and `true` for a
/// probably prime one, with a false-positive probability of at most 4^-k.
/// Witnesses are drawn from the thread-local CSPRNG.
pub fn is_probable_prime(n: &BigUint, k: usize) -> bool {
    is_probable_prime_with_rng(n, k, &mut thread_rng())
}

/// Miller-Rabin primality test with caller-supplied witness randomness.
pub fn is_probable_prime_with_rng<R: Rng + ?Sized>(n: &BigUint, k: usize, rng: &mut R) -> bool {
    let two = 2u32.to_biguint().unwrap();
    let three = 3u32.to_biguint().unwrap();

    if n < &two {
        return false;
    }
    if n == &two || n == &three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    let n_minus_1 = n - BigUint::one();
    let (s, d) = factor_powers_of_two(&n_minus_1);

    'witness: for _ in 0..k {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = mod_pow(&a, &d, n);

        if x == BigUint::one() || x == n_minus_1 {
            continue;
        }

        for _ in 0..s - 1 {
            x = mod_pow(&x, &two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Factor out powers of 2: n = 2^s * d with d odd
pub fn factor_powers_of_two(n: &BigUint) -> (u64, BigUint) {
    let mut s = 0;
    let mut d = n.clone();

    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    (s, d)
}

/// Generate a prime with exactly `bits` bits, tested at `rounds` Miller-Rabin rounds.
pub fn generate_prime(bits: u64, rounds: usize) -> Result<BigUint> {
    generate_prime_with_rng(bits, rounds, &mut thread_rng())
}

/// Generate a prime from a caller-supplied randomness source.
///
/// Rejection sampling: draw a random odd candidate with the high bit set,
/// keep it if it passes the primality test. The search is bounded; running
/// out of attempts reports `GenerationExhausted` instead of looping forever.
pub fn generate_prime_with_rng<R: Rng + ?Sized>(
    bits: u64,
    rounds: usize,
    rng: &mut R,
) -> Result<BigUint> {
    if bits < 2 {
        return Err(CryptoError::InvalidKeySize { bits, min: 2 });
    }

    for _ in 0..MAX_PRIME_ATTEMPTS {
        let mut candidate = rng.gen_biguint(bits);
        candidate |= BigUint::one(); // Make it odd
        candidate |= BigUint::one() << (bits - 1); // Set high bit

        if candidate.bits() == bits && is_probable_prime_with_rng(&candidate, rounds, rng) {
            return Ok(candidate);
        }
    }

    Err(CryptoError::GenerationExhausted {
        what: format!("{}-bit prime", bits),
        attempts: MAX_PRIME_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_known_small_primes() {
        for n in [2u32, 3, 5, 7, 11, 13, 97, 7919] {
            assert!(
                is_probable_prime(&n.to_biguint().unwrap(), 20),
                "{} should be prime",
                n
            );
        }
    }

    #[test]
    fn test_known_composites() {
        for n in [0u32, 1, 4, 6, 8, 9, 10, 12, 15, 25, 7917] {
            assert!(
                !is_probable_prime(&n.to_biguint().unwrap(), 20),
                "{} should be composite",
                n
            );
        }
    }

    #[test]
    fn test_carmichael_number() {
        // 561 = 3 * 11 * 17 fools Fermat tests but not Miller-Rabin
        assert!(!is_probable_prime(&561u32.to_biguint().unwrap(), 20));
    }

    #[test]
    fn test_large_known_prime() {
        // The Mersenne prime 2^521 - 1
        let p = (BigUint::one() << 521) - BigUint::one();
        assert!(is_probable_prime(&p, 10));
    }

    #[test]
    fn test_large_known_composite() {
        // 2^521 + 1 is divisible by 3
        let n = (BigUint::one() << 521) + BigUint::one();
        assert!(!is_probable_prime(&n, 10));
    }

    #[test]
    fn test_verdict_is_stable_across_calls() {
        let p = 97u32.to_biguint().unwrap();
        for _ in 0..50 {
            assert!(is_probable_prime(&p, 5));
        }
    }

    #[test]
    fn test_factor_powers_of_two() {
        // 96 = 2^5 * 3
        let (s, d) = factor_powers_of_two(&96u32.to_biguint().unwrap());
        assert_eq!(s, 5);
        assert_eq!(d, 3u32.to_biguint().unwrap());

        // Odd numbers are left untouched
        let (s, d) = factor_powers_of_two(&7u32.to_biguint().unwrap());
        assert_eq!(s, 0);
        assert_eq!(d, 7u32.to_biguint().unwrap());
    }

    #[test]
    fn test_generate_prime_has_requested_bits() {
        let p = generate_prime(64, 20).unwrap();
        assert_eq!(p.bits(), 64);
        assert!(is_probable_prime(&p, 20));
    }

    #[test]
    fn test_generate_prime_rejects_tiny_bit_length() {
        assert!(generate_prime(1, 20).is_err());
    }

    #[test]
    fn test_generate_prime_is_deterministic_with_seeded_rng() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        let p1 = generate_prime_with_rng(64, 20, &mut rng1).unwrap();
        let p2 = generate_prime_with_rng(64, 20, &mut rng2).unwrap();
        assert_eq!(p1, p2);
    }
}
