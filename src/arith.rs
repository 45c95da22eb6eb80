//! Exponentiation and modular-inverse primitives

use num_bigint::{BigInt, BigUint, ToBigInt};
use num_traits::{One, Zero};

/// Exponentiation by squaring: base^exp.
///
/// Performs O(log exp) multiplications. An exponent of zero yields the
/// multiplicative identity for any base, including zero.
pub fn pow(base: &BigUint, exp: u64) -> BigUint {
    let mut result = BigUint::one();
    let mut base = base.clone();
    let mut exp = exp;

    while exp > 0 {
        if exp & 1 == 1 {
            result *= &base;
        }
        exp >>= 1;
        if exp > 0 {
            base = &base * &base;
        }
    }

    result
}

/// Repeated multiplication: base^exp.
///
/// Performs O(exp) multiplications. Correctness baseline for [`pow`],
/// which must agree with it for all inputs.
pub fn classic_pow(base: &BigUint, exp: u64) -> BigUint {
    let mut result = BigUint::one();
    for _ in 0..exp {
        result *= base;
    }
    result
}

/// Modular exponentiation: base^exp mod modulus, by binary square-and-multiply.
///
/// The accumulator picks up the running square whenever the corresponding
/// bit of the exponent is set, halving the exponent each round.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.bit(0) {
            result = (&result * &base) % modulus;
        }
        exp >>= 1;
        base = (&base * &base) % modulus;
    }

    result
}

/// Compute modular inverse using extended Euclidean algorithm
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let (gcd, x, _) = extended_gcd(&a.to_bigint().unwrap(), &m.to_bigint().unwrap());

    if gcd != BigInt::one() {
        return None;
    }

    // Convert back to BigUint, handling negative values
    let result = if x < BigInt::zero() {
        let m_bigint = m.to_bigint().unwrap();
        let positive_x = ((x % &m_bigint) + &m_bigint) % &m_bigint;
        positive_x.to_biguint().unwrap()
    } else {
        (x % m.to_bigint().unwrap()).to_biguint().unwrap()
    };

    Some(result)
}

/// Extended Euclidean algorithm (using BigInt to handle negative intermediate values)
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a == &BigInt::zero() {
        return (b.clone(), BigInt::zero(), BigInt::one());
    }

    let (gcd, x1, y1) = extended_gcd(&(b % a), a);
    let x = y1 - (b / a) * &x1;
    let y = x1;

    (gcd, x, y)
}
