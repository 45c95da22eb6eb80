//! Diffie-Hellman key agreement
//!
//! Two-step shared-secret derivation over a cyclic group. Passing `None`
//! for the parameters selects the fixed default group; both parties must
//! use the same parameters for both steps. The exchanged public values are
//! not authenticated, so an active attacker who substitutes parameters or
//! public values breaks confidentiality without either side noticing.

use num_bigint::{BigUint, RandBigInt, ToBigUint};
use rand::{thread_rng, Rng};

use crate::arith::mod_pow;
use crate::group::GroupParams;

/// First step of the exchange: derive the public value A = g^a mod p.
///
/// `a` is the caller's private exponent. The result is safe to disclose.
pub fn step1(secret: &BigUint, params: Option<&GroupParams>) -> BigUint {
    let params = GroupParams::resolve(params);
    mod_pow(params.generator(), secret, params.modulus())
}

/// Second step of the exchange: derive the shared secret S = B^a mod p
/// from the other party's public value B.
///
/// By commutativity of exponentiation both parties compute the same S.
/// There is no error path: a non-prime modulus or an out-of-range secret
/// produces a well-defined but cryptographically meaningless result.
pub fn step2(secret: &BigUint, peer_public: &BigUint, params: Option<&GroupParams>) -> BigUint {
    let params = GroupParams::resolve(params);
    mod_pow(peer_public, secret, params.modulus())
}

/// Draw a private exponent uniformly from [2, p - 2).
pub fn generate_secret(params: Option<&GroupParams>) -> BigUint {
    generate_secret_with_rng(params, &mut thread_rng())
}

/// Draw a private exponent from a caller-supplied randomness source.
pub fn generate_secret_with_rng<R: Rng + ?Sized>(
    params: Option<&GroupParams>,
    rng: &mut R,
) -> BigUint {
    let params = GroupParams::resolve(params);
    let two = 2u32.to_biguint().unwrap();
    let upper = params.modulus() - &two;
    rng.gen_biguint_range(&two, &upper)
}
