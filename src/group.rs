//! Group parameters for the multiplicative group of Z/pZ

use num_bigint::{BigUint, RandBigInt, ToBigUint};
use num_traits::One;
use rand::{thread_rng, Rng};
use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arith::mod_pow;
use crate::error::{CryptoError, Result};
use crate::primality::is_probable_prime_with_rng;

/// Miller-Rabin rounds used while searching for safe primes.
const SAFE_PRIME_ROUNDS: usize = 20;
/// Attempt budget for the safe-prime search.
const MAX_SAFE_PRIME_ATTEMPTS: u64 = 500_000;
/// Attempt budget for the generator search.
const MAX_GENERATOR_ATTEMPTS: u64 = 10_000;

/// The 1536-bit MODP modulus from RFC 3526, used when no group is supplied.
const DEFAULT_MODULUS_HEX: &[u8] = b"FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
83655D23DCA3AD961C62F356208552BB9ED529077096966D\
670C354E4ABC9804F1746C08CA237327FFFFFFFFFFFFFFFF";

/// Generator for the default group.
const DEFAULT_GENERATOR: u32 = 2;

/// A prime modulus p and a generator g of (a large subgroup of) Z/pZ*.
///
/// Both parties of an exchange must use the same parameters for the whole
/// session. A mismatch is not detectable here: every computation stays
/// mathematically well defined and silently produces a wrong shared secret.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupParams {
    pub(crate) p: BigUint,
    pub(crate) g: BigUint,
}

impl GroupParams {
    /// Create group parameters from an existing modulus and generator.
    pub fn new(p: BigUint, g: BigUint) -> Self {
        GroupParams { p, g }
    }

    /// Get the prime modulus
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Get the generator
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Get the bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.p.bits()
    }

    /// Validate the structural invariants of the parameters.
    ///
    /// Checks the ranges only; use [`GroupParams::confirm_prime`] to test
    /// the modulus for primality.
    pub fn validate(&self) -> Result<()> {
        if self.p <= 2u32.to_biguint().unwrap() {
            return Err(CryptoError::InvalidParameter(
                "Modulus p must be > 2".to_string(),
            ));
        }

        if self.g <= BigUint::one() || self.g >= self.p {
            return Err(CryptoError::InvalidParameter(
                "Generator g must be in range (1, p)".to_string(),
            ));
        }

        Ok(())
    }

    /// Run the Miller-Rabin test over the modulus at `rounds` rounds.
    pub fn confirm_prime(&self, rounds: usize) -> bool {
        is_probable_prime_with_rng(&self.p, rounds, &mut thread_rng())
    }

    /// Generate a fresh group from a safe prime of `bits` bits.
    pub fn generate(bits: u64) -> Result<Self> {
        Self::generate_with_rng(bits, &mut thread_rng())
    }

    /// Generate a fresh group from a caller-supplied randomness source.
    ///
    /// Searches for a safe prime p = 2q + 1 with both factors passing the
    /// primality test, then for a generator g with g^2 != 1 and g^q != 1
    /// (mod p), so g generates the whole group of order 2q. Both searches
    /// are bounded and report `GenerationExhausted` when attempts run out.
    pub fn generate_with_rng<R: Rng + ?Sized>(bits: u64, rng: &mut R) -> Result<Self> {
        if bits < 8 {
            return Err(CryptoError::InvalidKeySize { bits, min: 8 });
        }

        for _ in 0..MAX_SAFE_PRIME_ATTEMPTS {
            // q needs bits - 1 bits so that p = 2q + 1 lands on the target size
            let mut q = rng.gen_biguint(bits - 1);
            q |= BigUint::one(); // Make it odd
            q |= BigUint::one() << (bits - 2); // Set high bit

            if !is_probable_prime_with_rng(&q, SAFE_PRIME_ROUNDS, rng) {
                continue;
            }

            let p = &q * 2u32 + 1u32;
            if p.bits() != bits {
                continue;
            }

            if is_probable_prime_with_rng(&p, SAFE_PRIME_ROUNDS, rng) {
                let g = find_generator_with_rng(&p, &q, rng)?;
                return Ok(GroupParams { p, g });
            }
        }

        Err(CryptoError::GenerationExhausted {
            what: format!("{}-bit safe prime", bits),
            attempts: MAX_SAFE_PRIME_ATTEMPTS,
        })
    }

    /// Resolve an optional parameter set, falling back to the default group.
    pub(crate) fn resolve(params: Option<&GroupParams>) -> Cow<'_, GroupParams> {
        match params {
            Some(params) => Cow::Borrowed(params),
            None => Cow::Owned(GroupParams::default()),
        }
    }
}

impl Default for GroupParams {
    /// The fixed pre-agreed group: the RFC 3526 1536-bit MODP prime with g = 2.
    fn default() -> Self {
        let p = BigUint::parse_bytes(DEFAULT_MODULUS_HEX, 16).unwrap();
        let g = DEFAULT_GENERATOR.to_biguint().unwrap();
        GroupParams { p, g }
    }
}

impl fmt::Display for GroupParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupParams({} bits)", self.bit_size())
    }
}

/// Find a generator for the multiplicative group modulo the safe prime p = 2q + 1.
fn find_generator_with_rng<R: Rng + ?Sized>(
    p: &BigUint,
    q: &BigUint,
    rng: &mut R,
) -> Result<BigUint> {
    let two = 2u32.to_biguint().unwrap();
    let p_minus_1 = p - BigUint::one();

    for _ in 0..MAX_GENERATOR_ATTEMPTS {
        let g = rng.gen_biguint_range(&two, &p_minus_1);

        let g_squared = mod_pow(&g, &two, p);
        let g_to_q = mod_pow(&g, q, p);

        if !g_squared.is_one() && !g_to_q.is_one() {
            return Ok(g);
        }
    }

    Err(CryptoError::GenerationExhausted {
        what: "group generator".to_string(),
        attempts: MAX_GENERATOR_ATTEMPTS,
    })
}
