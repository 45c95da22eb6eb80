//! RSA key generation, encryption and decryption

use num_bigint::{BigUint, ToBigUint};
use num_integer::Integer;
use num_traits::One;
use rand::{thread_rng, Rng};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arith::{mod_inverse, mod_pow};
use crate::error::{CryptoError, Result};
use crate::primality::generate_prime_with_rng;

/// Public exponent used when the caller does not supply one.
const DEFAULT_PUBLIC_EXPONENT: u32 = 65537;
/// Miller-Rabin rounds for the prime search. A false "prime" verdict at
/// this count is cryptographically negligible.
const PRIME_ROUNDS: usize = 25;
/// How many times q is redrawn before key generation gives up.
const MAX_PRIME_PAIR_ATTEMPTS: u64 = 1_000;
/// Smallest accepted modulus size.
const MIN_KEY_BITS: u64 = 16;

/// RSA public key: the modulus n = p * q and the public exponent e.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaPublicKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}

impl RsaPublicKey {
    /// Create a public key from existing components
    pub fn new(n: BigUint, e: BigUint) -> Self {
        RsaPublicKey { n, e }
    }

    /// Get the modulus
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Get the public exponent
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// Get the bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a message: c = m^e mod n.
    ///
    /// Requires m < n; larger messages must be pre-chunked by the caller.
    pub fn encrypt(&self, message: &BigUint) -> Result<BigUint> {
        if message >= &self.n {
            return Err(CryptoError::MessageTooLarge);
        }
        Ok(mod_pow(message, &self.e, &self.n))
    }
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaPublicKey({} bits)", self.bit_size())
    }
}

/// RSA private key: the modulus n and the private exponent d.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaPrivateKey {
    pub(crate) n: BigUint,
    pub(crate) d: BigUint,
}

impl RsaPrivateKey {
    /// Create a private key from existing components
    pub fn new(n: BigUint, d: BigUint) -> Self {
        RsaPrivateKey { n, d }
    }

    /// Get the modulus
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Get the private exponent
    pub fn secret_exponent(&self) -> &BigUint {
        &self.d
    }

    /// Decrypt a ciphertext: m = c^d mod n.
    pub fn decrypt(&self, ciphertext: &BigUint) -> BigUint {
        mod_pow(ciphertext, &self.d, &self.n)
    }
}

impl fmt::Display for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaPrivateKey(***)")
    }
}

/// RSA key pair
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaKeyPair {
    /// Generate a key pair with a modulus of roughly `bits` bits and the
    /// default public exponent 65537.
    pub fn generate(bits: u64) -> Result<Self> {
        Self::generate_with_rng(bits, None, &mut thread_rng())
    }

    /// Generate a key pair with a caller-chosen public exponent.
    pub fn generate_with_exponent(bits: u64, e: BigUint) -> Result<Self> {
        Self::generate_with_rng(bits, Some(e), &mut thread_rng())
    }

    /// Generate a key pair from a caller-supplied randomness source.
    ///
    /// Two independent primes of `bits / 2` bits each are found by
    /// rejection sampling; the pair is redrawn while the primes coincide
    /// or while the public exponent shares a factor with
    /// phi(n) = (p-1)(q-1). Every search is bounded, so a pathological
    /// randomness source surfaces as `GenerationExhausted` rather than an
    /// infinite loop. The primes are dropped once n and d are derived.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        bits: u64,
        e: Option<BigUint>,
        rng: &mut R,
    ) -> Result<Self> {
        if bits < MIN_KEY_BITS {
            return Err(CryptoError::InvalidKeySize {
                bits,
                min: MIN_KEY_BITS,
            });
        }

        let e = match e {
            Some(e) => {
                if e <= BigUint::one() || e.is_even() {
                    return Err(CryptoError::InvalidParameter(
                        "Public exponent must be an odd integer > 1".to_string(),
                    ));
                }
                e
            }
            None => DEFAULT_PUBLIC_EXPONENT.to_biguint().unwrap(),
        };

        let prime_bits = bits / 2;

        for _ in 0..MAX_PRIME_PAIR_ATTEMPTS {
            let p = generate_prime_with_rng(prime_bits, PRIME_ROUNDS, rng)?;
            let q = generate_prime_with_rng(prime_bits, PRIME_ROUNDS, rng)?;
            if q == p {
                continue;
            }

            match Self::from_primes(&p, &q, e.clone()) {
                Ok(keypair) => return Ok(keypair),
                // e shares a factor with phi(n): redraw the pair
                Err(CryptoError::ModularInverseError) => continue,
                Err(err) => return Err(err),
            }
        }

        Err(CryptoError::GenerationExhausted {
            what: format!("prime pair coprime to e for a {}-bit modulus", bits),
            attempts: MAX_PRIME_PAIR_ATTEMPTS,
        })
    }

    /// Derive (n, d) from two distinct primes and a public exponent.
    fn from_primes(p: &BigUint, q: &BigUint, e: BigUint) -> Result<Self> {
        let n = p * q;
        let phi = (p - 1u32) * (q - 1u32);

        let d = mod_inverse(&e, &phi).ok_or(CryptoError::ModularInverseError)?;

        Ok(RsaKeyPair {
            public_key: RsaPublicKey { n: n.clone(), e },
            private_key: RsaPrivateKey { n, d },
        })
    }

    /// Get the bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.public_key.bit_size()
    }
}

impl fmt::Display for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaKeyPair({} bits)", self.bit_size())
    }
}
