#![crate_name = "secvec_traits"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Traits for the secvec library.

use rand::{CryptoRng, RngCore};
use std::fmt::Debug;

/// An additively homomorphic public-key cryptosystem, seen from the side of a
/// party that only holds the public key.
///
/// Combining two ciphertexts with [`add`](Self::add) yields an encryption of
/// the sum of their plaintexts, and [`const_multiply`](Self::const_multiply)
/// yields an encryption of the plaintext scaled by a public value. Key
/// generation and decryption are not part of this trait.
pub trait AdditivelyHomomorphic: Debug + PartialEq {
    /// Type of the plaintext values.
    type Plaintext;

    /// Type of the ciphertexts produced under this key.
    type Ciphertext: Clone + Debug + PartialEq;

    /// Type of the errors raised by encryption.
    type Error: std::error::Error;

    /// Encrypt the plaintext `m`.
    fn encrypt<R: RngCore + CryptoRng>(
        &self,
        m: &Self::Plaintext,
        rng: &mut R,
    ) -> Result<Self::Ciphertext, Self::Error>;

    /// Fresh encryption of zero.
    fn encrypt_zero<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<Self::Ciphertext, Self::Error>;

    /// Ciphertext encrypting the sum of the plaintexts of `a` and `b`.
    fn add(&self, a: &Self::Ciphertext, b: &Self::Ciphertext) -> Self::Ciphertext;

    /// Ciphertext encrypting the difference of the plaintexts of `a` and `b`.
    fn sub(&self, a: &Self::Ciphertext, b: &Self::Ciphertext) -> Self::Ciphertext;

    /// Ciphertext encrypting the plaintext of `c` multiplied by `k`.
    fn const_multiply(&self, c: &Self::Ciphertext, k: &Self::Plaintext) -> Self::Ciphertext;
}
