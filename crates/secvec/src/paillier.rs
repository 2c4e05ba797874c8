//! Public key of the Paillier cryptosystem.
//!
//! Only the public operations are provided: encryption and the homomorphic
//! combination of ciphertexts. The generator is fixed to `g = n + 1`.

use crate::{Error, Result};
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use secvec_traits::AdditivelyHomomorphic;
use secvec_util::reduce_scalar;

/// A Paillier ciphertext, an element of `Z_{n^2}^*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaillierCiphertext(BigUint);

impl PaillierCiphertext {
    /// Wrap a raw ciphertext value.
    pub fn new(c: BigUint) -> Self {
        Self(c)
    }

    /// The raw ciphertext value.
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

/// Paillier public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaillierPublicKey {
    n: BigUint,
    n_squared: BigUint,
}

impl PaillierPublicKey {
    /// Create a public key from the modulus `n = p * q`.
    ///
    /// The factorization is not checked; only `n > 2` is required.
    pub fn new(n: BigUint) -> Result<Self> {
        if n <= BigUint::from(2u8) {
            return Err(Error::InvalidArgument(format!(
                "Paillier modulus must be larger than 2, got {}",
                n
            )));
        }
        let n_squared = &n * &n;
        Ok(Self { n, n_squared })
    }

    /// The modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// The ciphertext modulus `n^2`.
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Representative of a signed plaintext in `[0, n)`.
    fn to_residue(&self, m: &BigInt) -> BigUint {
        let n = BigInt::from(self.n.clone());
        // `new` checks that `n > 2`.
        reduce_scalar(m, &n).map_or_else(BigUint::zero, |r| r.into_parts().1)
    }

    /// `r^n mod n^2` for a random `r` in `[1, n)`.
    fn random_mask<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        let r = rng.gen_biguint_range(&BigUint::one(), &self.n);
        r.modpow(&self.n, &self.n_squared)
    }
}

impl AdditivelyHomomorphic for PaillierPublicKey {
    type Plaintext = BigInt;
    type Ciphertext = PaillierCiphertext;
    type Error = Error;

    fn encrypt<R: RngCore + CryptoRng>(
        &self,
        m: &BigInt,
        rng: &mut R,
    ) -> Result<PaillierCiphertext> {
        // (n + 1)^m = 1 + m * n mod n^2
        let gm = (BigUint::one() + self.to_residue(m) * &self.n) % &self.n_squared;
        let c = gm * self.random_mask(rng) % &self.n_squared;
        Ok(PaillierCiphertext(c))
    }

    fn encrypt_zero<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<PaillierCiphertext> {
        Ok(PaillierCiphertext(self.random_mask(rng)))
    }

    fn add(&self, a: &PaillierCiphertext, b: &PaillierCiphertext) -> PaillierCiphertext {
        PaillierCiphertext(&a.0 * &b.0 % &self.n_squared)
    }

    fn sub(&self, a: &PaillierCiphertext, b: &PaillierCiphertext) -> PaillierCiphertext {
        // b^(n - 1) encrypts -m_b mod n.
        let neg_b = b.0.modpow(&(&self.n - BigUint::one()), &self.n_squared);
        PaillierCiphertext(&a.0 * neg_b % &self.n_squared)
    }

    fn const_multiply(&self, c: &PaillierCiphertext, k: &BigInt) -> PaillierCiphertext {
        PaillierCiphertext(c.0.modpow(&self.to_residue(k), &self.n_squared))
    }
}
