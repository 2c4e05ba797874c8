//! Parameters for secret sharing fixed-point vectors.

use crate::share::{self, ShareVec};
use crate::{Error, ParametersError, Result};
use num_bigint::BigInt;
use num_traits::{One, Signed};
use rand::{CryptoRng, RngCore};
use secvec_math::FixedPointVector;
use secvec_util::{is_probably_prime, DEFAULT_PRIMALITY_ROUNDS};
use std::sync::Arc;

/// Validated parameters for encoding and secret sharing vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharingParameters {
    /// Prime field modulus.
    modulus: BigInt,

    /// Number of shares a vector is split into.
    num_shares: usize,

    /// Fixed-point scale factor.
    scale: BigInt,

    /// Miller-Rabin rounds the modulus was checked with.
    primality_rounds: usize,
}

impl SharingParameters {
    /// Returns the field modulus.
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Returns the number of shares.
    pub fn num_shares(&self) -> usize {
        self.num_shares
    }

    /// Returns the fixed-point scale factor.
    pub fn scale(&self) -> &BigInt {
        &self.scale
    }

    /// Returns the number of primality rounds.
    pub fn primality_rounds(&self) -> usize {
        self.primality_rounds
    }

    /// Largest absolute value an encoded coordinate may take and still be
    /// recovered with its sign: `(modulus - 1) / 2`.
    pub fn max_encoded_magnitude(&self) -> BigInt {
        (&self.modulus - BigInt::one()) / BigInt::from(2u8)
    }

    /// Whether every coordinate of `vector` is recoverable under these
    /// parameters. Sums and products computed on shares are subject to the
    /// same bound.
    pub fn is_representable(&self, vector: &FixedPointVector) -> bool {
        let bound = self.max_encoded_magnitude();
        vector.iter().all(|c| c.abs() <= bound)
    }

    /// Fixed-point encode a real vector with the configured scale factor.
    pub fn encode(&self, values: &[f64]) -> Result<FixedPointVector> {
        Ok(FixedPointVector::encode(values, &self.scale)?)
    }

    /// Split `vector` into the configured number of shares.
    pub fn share<R: RngCore + CryptoRng>(
        &self,
        vector: &FixedPointVector,
        rng: &mut R,
    ) -> Result<Vec<ShareVec>> {
        share::split(vector, self.num_shares, &self.modulus, rng)
    }

    /// Reconstruct a vector from all of its shares, checking that the shares
    /// belong to this field.
    pub fn recover(&self, shares: &[ShareVec]) -> Result<FixedPointVector> {
        if shares.iter().any(|s| s.modulus() != &self.modulus) {
            return Err(Error::ModulusMismatch);
        }
        share::recover_vector(shares)
    }
}

/// Builder for [`SharingParameters`].
#[derive(Debug)]
pub struct SharingParametersBuilder {
    modulus: Option<BigInt>,
    num_shares: usize,
    scale: BigInt,
    primality_rounds: usize,
}

impl SharingParametersBuilder {
    /// Creates a new instance of the builder, with two shares, a unit scale
    /// factor and twenty primality rounds.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            modulus: None,
            num_shares: 2,
            scale: BigInt::one(),
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
        }
    }

    /// Sets the prime field modulus.
    pub fn set_modulus(&mut self, modulus: &BigInt) -> &mut Self {
        self.modulus = Some(modulus.clone());
        self
    }

    /// Sets the number of shares. Must be at least 2.
    pub fn set_num_shares(&mut self, num_shares: usize) -> &mut Self {
        self.num_shares = num_shares;
        self
    }

    /// Sets the fixed-point scale factor. Must be positive.
    pub fn set_scale(&mut self, scale: &BigInt) -> &mut Self {
        self.scale = scale.clone();
        self
    }

    /// Sets the fixed-point scale factor to `2^bits`.
    pub fn set_scale_bits(&mut self, bits: usize) -> &mut Self {
        self.scale = BigInt::one() << bits;
        self
    }

    /// Sets the number of Miller-Rabin rounds used to check the modulus.
    pub fn set_primality_rounds(&mut self, rounds: usize) -> &mut Self {
        self.primality_rounds = rounds;
        self
    }

    /// Build a new `SharingParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<SharingParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `SharingParameters`.
    pub fn build(&self) -> Result<SharingParameters> {
        let modulus = self
            .modulus
            .clone()
            .ok_or(Error::ParametersError(ParametersError::MissingModulus))?;

        if self.primality_rounds == 0 {
            return Err(ParametersError::InvalidPrimalityRounds.into());
        }
        if !is_probably_prime(&modulus, self.primality_rounds) {
            return Err(ParametersError::NotPrime(modulus.to_string()).into());
        }
        if self.num_shares < 2 {
            return Err(ParametersError::InvalidShareCount(self.num_shares).into());
        }
        if !self.scale.is_positive() {
            return Err(ParametersError::InvalidScale(self.scale.to_string()).into());
        }

        Ok(SharingParameters {
            modulus,
            num_shares: self.num_shares,
            scale: self.scale.clone(),
            primality_rounds: self.primality_rounds,
        })
    }
}
