//! # zpz
//!
//! Classic asymmetric cryptography over the multiplicative group of Z/pZ,
//! built on arbitrary-precision integers:
//!
//! - Binary (square-and-multiply) modular exponentiation, with a naive
//!   repeated-multiplication baseline
//! - Miller-Rabin probabilistic primality testing
//! - Diffie-Hellman key agreement
//! - ElGamal encryption
//! - RSA key generation, encryption and decryption
//!
//! Messages, keys and ciphertext components are plain [`num_bigint::BigUint`]
//! values; parsing, key files and text-to-block chunking live with the
//! caller.
//!
//! ## Example
//!
//! ```rust
//! use num_bigint::ToBigUint;
//! use zpz::{dh, elgamal};
//!
//! // Alice publishes a key; Bob encrypts a message under it.
//! let a = dh::generate_secret(None);
//! let alice_public = elgamal::key_generator(&a, None);
//!
//! let m = 42u32.to_biguint().unwrap();
//! let ct = elgamal::encrypt_random(&alice_public, &m, None).unwrap();
//!
//! assert_eq!(elgamal::decrypt(&ct, &a, None).unwrap(), m);
//! ```
//!
//! ## Limitations
//!
//! Exchanged public values are not authenticated: an active attacker who
//! substitutes group parameters or public values breaks confidentiality
//! without either side noticing (the classic Diffie-Hellman
//! man-in-the-middle exposure). No constant-time guarantees are made.

pub mod arith;
pub mod dh;
pub mod elgamal;
pub mod error;
pub mod group;
pub mod primality;
pub mod rsa;

// Re-export main types for convenience
pub use arith::{classic_pow, mod_inverse, mod_pow, pow};
pub use elgamal::Ciphertext;
pub use error::{CryptoError, Result};
pub use group::GroupParams;
pub use primality::is_probable_prime;
pub use rsa::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
