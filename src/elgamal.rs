//! ElGamal encryption over a Diffie-Hellman group
//!
//! The message is masked with a shared secret derived exactly as in the
//! key exchange: the sender raises the recipient's public key to an
//! ephemeral secret. Messages are group elements and must be strictly
//! less than the modulus; callers split longer data into blocks before
//! handing it to the core. Decryption under mismatched parameters or the
//! wrong key yields garbage with no error signal.

use num_bigint::BigUint;
use rand::{thread_rng, Rng};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arith::{mod_inverse, mod_pow};
use crate::dh;
use crate::error::{CryptoError, Result};
use crate::group::GroupParams;

/// ElGamal ciphertext (c1, c2)
///
/// c1 is the sender's ephemeral public key, c2 the masked message. Both
/// components are required for decryption; losing c1 makes c2 permanently
/// undecryptable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ciphertext {
    pub(crate) c1: BigUint,
    pub(crate) c2: BigUint,
}

impl Ciphertext {
    /// Create a ciphertext from its components
    pub fn new(c1: BigUint, c2: BigUint) -> Self {
        Ciphertext { c1, c2 }
    }

    /// Get the ephemeral public key
    pub fn c1(&self) -> &BigUint {
        &self.c1
    }

    /// Get the masked message
    pub fn c2(&self) -> &BigUint {
        &self.c2
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.c1.to_bytes_be().len() + self.c2.to_bytes_be().len()
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ciphertext({} bytes)", self.size_bytes())
    }
}

/// Derive the recipient's public key A = g^a mod p.
///
/// The computation is identical to the first step of the key exchange.
pub fn key_generator(secret: &BigUint, params: Option<&GroupParams>) -> BigUint {
    dh::step1(secret, params)
}

/// Encrypt a message under the recipient's public key.
///
/// The sender's ephemeral secret b produces the ephemeral public key
/// c1 = g^b mod p and the mask S = A^b mod p; the ciphertext carries
/// c2 = m * S mod p. Errors with `MessageTooLarge` when m >= p.
pub fn encrypt(
    ephemeral_secret: &BigUint,
    peer_public: &BigUint,
    message: &BigUint,
    params: Option<&GroupParams>,
) -> Result<Ciphertext> {
    let params = GroupParams::resolve(params);

    if message >= params.modulus() {
        return Err(CryptoError::MessageTooLarge);
    }

    let c1 = mod_pow(params.generator(), ephemeral_secret, params.modulus());
    let mask = mod_pow(peer_public, ephemeral_secret, params.modulus());
    let c2 = (message * mask) % params.modulus();

    Ok(Ciphertext { c1, c2 })
}

/// Encrypt with an ephemeral secret drawn from a caller-supplied
/// randomness source.
pub fn encrypt_with_rng<R: Rng + ?Sized>(
    peer_public: &BigUint,
    message: &BigUint,
    params: Option<&GroupParams>,
    rng: &mut R,
) -> Result<Ciphertext> {
    let params = GroupParams::resolve(params);
    let ephemeral_secret = dh::generate_secret_with_rng(Some(&params), rng);
    encrypt(&ephemeral_secret, peer_public, message, Some(&params))
}

/// Encrypt with a fresh ephemeral secret from the thread-local CSPRNG.
pub fn encrypt_random(
    peer_public: &BigUint,
    message: &BigUint,
    params: Option<&GroupParams>,
) -> Result<Ciphertext> {
    encrypt_with_rng(peer_public, message, params, &mut thread_rng())
}

/// Decrypt a ciphertext with the recipient's secret exponent.
///
/// Recomputes the mask S = c1^a mod p and recovers m = c2 * S^-1 mod p.
pub fn decrypt(
    ciphertext: &Ciphertext,
    secret: &BigUint,
    params: Option<&GroupParams>,
) -> Result<BigUint> {
    let params = GroupParams::resolve(params);

    let mask = mod_pow(&ciphertext.c1, secret, params.modulus());
    let mask_inv =
        mod_inverse(&mask, params.modulus()).ok_or(CryptoError::ModularInverseError)?;

    Ok((&ciphertext.c2 * mask_inv) % params.modulus())
}
