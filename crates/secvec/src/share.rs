//! Additive secret sharing of field vectors.
//!
//! A vector `v` is split into `k` shares over `Z_p` such that
//! `v = share_0 + ... + share_{k-1} mod p`. The first `k - 1` shares are
//! uniformly random and the last one absorbs the secret, so any strict subset
//! of the shares is independent of `v`. Reconstruction requires all `k`.
//!
//! Shares with the same index can be added or subtracted locally, and a share
//! can be multiplied by a public vector, without any interaction between the
//! parties holding them.

use crate::{Error, ParametersError, Result};
use num_bigint::BigInt;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use secvec_math::FixedPointVector;
use secvec_util::{
    decode_signed_scalar, is_probably_prime, reduce_scalar, DEFAULT_PRIMALITY_ROUNDS,
};
use tracing::{debug, trace};

/// One additive share of a vector over `Z_modulus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareVec {
    vec: FixedPointVector,
    modulus: BigInt,
    index: usize,
}

impl ShareVec {
    /// Create a share from its coordinates, which are reduced into
    /// `[0, modulus)`.
    pub fn new(vec: FixedPointVector, modulus: &BigInt, index: usize) -> Result<Self> {
        let vec = vec.reduce(modulus)?;
        Ok(Self {
            vec,
            modulus: modulus.clone(),
            index,
        })
    }

    /// The share coordinates, in `[0, modulus)`.
    pub fn coords(&self) -> &[BigInt] {
        self.vec.coords()
    }

    /// The share as a vector.
    pub fn vector(&self) -> &FixedPointVector {
        &self.vec
    }

    /// Replace the share coordinates, reducing them into `[0, modulus)`.
    pub fn set_vector(&mut self, vec: FixedPointVector) -> Result<()> {
        self.vec = vec.reduce(&self.modulus)?;
        Ok(())
    }

    /// The field modulus.
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Position of this share in the split that produced it.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Dimension of the shared vector.
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Whether the shared vector has dimension 0.
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.index != other.index {
            return Err(Error::index_mismatch(self.index, other.index));
        }
        if self.modulus != other.modulus {
            return Err(Error::ModulusMismatch);
        }
        Ok(())
    }

    /// Share of the sum of the two shared vectors.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let vec = self.vec.try_add(&other.vec)?.reduce(&self.modulus)?;
        Ok(self.with_vector(vec))
    }

    /// Share of the difference of the two shared vectors.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let vec = self.vec.try_sub(&other.vec)?.reduce(&self.modulus)?;
        Ok(self.with_vector(vec))
    }

    /// Share of the coordinate-wise product of the shared vector with a public
    /// vector.
    pub fn try_mul(&self, public: &FixedPointVector) -> Result<Self> {
        let vec = self.vec.try_mul(public)?.reduce(&self.modulus)?;
        Ok(self.with_vector(vec))
    }

    /// Local contribution to the dot product of the shared vector with a public
    /// vector. The scalar shares of all parties must be combined with
    /// [`recover_int`] to obtain the dot product.
    pub fn dot(&self, public: &FixedPointVector) -> Result<BigInt> {
        let d = self.vec.dot(public)?;
        reduce_scalar(&d, &self.modulus).ok_or_else(|| Error::invalid_modulus(&self.modulus))
    }

    fn with_vector(&self, vec: FixedPointVector) -> Self {
        Self {
            vec,
            modulus: self.modulus.clone(),
            index: self.index,
        }
    }
}

/// Split `vector` into `k` additive shares over `Z_modulus`, with indices
/// `0..k`.
///
/// The modulus must pass a probabilistic primality test with
/// [`DEFAULT_PRIMALITY_ROUNDS`] rounds, and `k` must be at least 2. For the
/// shares to reconstruct to `vector`, every coordinate must satisfy
/// `2 * |x| < modulus`.
pub fn secret_share<R: RngCore + CryptoRng>(
    vector: &FixedPointVector,
    k: usize,
    modulus: &BigInt,
    rng: &mut R,
) -> Result<Vec<ShareVec>> {
    secret_share_with_rounds(
        vector,
        k,
        modulus,
        DEFAULT_PRIMALITY_ROUNDS,
        rng,
    )
}

/// Same as [`secret_share`], checking the primality of `modulus` with
/// `rounds` Miller-Rabin rounds. At least one round is required.
pub fn secret_share_with_rounds<R: RngCore + CryptoRng>(
    vector: &FixedPointVector,
    k: usize,
    modulus: &BigInt,
    rounds: usize,
    rng: &mut R,
) -> Result<Vec<ShareVec>> {
    if rounds == 0 {
        return Err(ParametersError::InvalidPrimalityRounds.into());
    }
    if !is_probably_prime(modulus, rounds) {
        return Err(Error::not_prime(modulus));
    }
    split(vector, k, modulus, rng)
}

/// Split without checking the primality of `modulus`.
pub(crate) fn split<R: RngCore + CryptoRng>(
    vector: &FixedPointVector,
    k: usize,
    modulus: &BigInt,
    rng: &mut R,
) -> Result<Vec<ShareVec>> {
    if k < 2 {
        return Err(Error::TooFewValues(k, 2));
    }
    debug!(
        dimension = vector.len(),
        shares = k,
        modulus_bits = modulus.bits(),
        "secret sharing vector"
    );

    let dim = vector.len();
    let mut shares = Vec::with_capacity(k);
    let mut sum = FixedPointVector::zero(dim);
    for index in 0..k - 1 {
        let vec = FixedPointVector::random_below(dim, modulus, rng)?;
        sum = sum.try_add(&vec)?;
        shares.push(ShareVec {
            vec,
            modulus: modulus.clone(),
            index,
        });
    }

    let last = vector.try_sub(&sum)?.reduce(modulus)?;
    shares.push(ShareVec {
        vec: last,
        modulus: modulus.clone(),
        index: k - 1,
    });

    Ok(shares)
}

/// Reconstruct the signed vector from all of its shares.
///
/// The shares must have the same dimension and modulus.
pub fn recover_vector(shares: &[ShareVec]) -> Result<FixedPointVector> {
    let first = shares.first().ok_or(Error::TooFewValues(0, 1))?;
    let modulus = &first.modulus;
    trace!(
        dimension = first.len(),
        shares = shares.len(),
        "recovering vector"
    );

    let mut sum = FixedPointVector::zero(first.len());
    for share in shares {
        if &share.modulus != modulus {
            return Err(Error::ModulusMismatch);
        }
        sum = sum.try_add(&share.vec)?;
    }

    Ok(sum.reduce(modulus)?.decode_signed(modulus)?)
}

/// Reconstruct a signed integer from its scalar shares over `Z_modulus`.
pub fn recover_int(modulus: &BigInt, shares: &[BigInt]) -> Result<BigInt> {
    let sum = shares.iter().fold(BigInt::zero(), |acc, s| acc + s);
    decode_signed_scalar(&sum, modulus).ok_or_else(|| Error::invalid_modulus(modulus))
}
