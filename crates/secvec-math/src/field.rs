//! Vectors of arbitrary-precision integers.
//!
//! A [`FixedPointVector`] carries no modulus: arithmetic is over the integers
//! and reduction into `Z_p` is an explicit step ([`FixedPointVector::reduce`]).
//! All operations are pure; they return new vectors and never modify their
//! operands.
//!
//! # Numeric contract
//!
//! A real vector encoded with scale factor `s` and later reduced modulo `p`
//! decodes back correctly with [`FixedPointVector::decode_signed`] only if
//! `2 * s * max(|x_i|) < p`. This is not checked; larger values silently wrap
//! around.

use crate::{Error, Result};
use itertools::izip;
use num_bigint::BigInt;
use num_traits::{Float, One, Signed, Zero};
use rand::{CryptoRng, RngCore};
use secvec_util::{decode_signed_scalar, reduce_scalar, sample_uniform_inclusive};
use std::ops::Index;

/// An ordered sequence of arbitrary-precision signed integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FixedPointVector {
    coords: Vec<BigInt>,
}

impl FixedPointVector {
    /// Create a vector from its coordinates.
    pub fn new(coords: Vec<BigInt>) -> Self {
        Self { coords }
    }

    /// The all-zero vector of dimension `dim`.
    pub fn zero(dim: usize) -> Self {
        Self {
            coords: vec![BigInt::zero(); dim],
        }
    }

    /// Fixed-point encoding of a real vector: every coordinate is multiplied by
    /// `scale` and truncated toward zero.
    ///
    /// The product is computed exactly from the binary representation of each
    /// `f64`, so no precision is lost for large scales or magnitudes.
    ///
    /// Returns an error if `scale` is not positive or if a coordinate is not
    /// finite.
    pub fn encode(values: &[f64], scale: &BigInt) -> Result<Self> {
        if !scale.is_positive() {
            return Err(Error::InvalidArgument(format!(
                "scale factor must be positive, got {}",
                scale
            )));
        }
        let coords = values
            .iter()
            .map(|v| encode_coordinate(*v, scale))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { coords })
    }

    /// Sample a vector of dimension `dim` whose coordinates are independent and
    /// uniform in the inclusive range `[min, max]`.
    ///
    /// Returns an error if `min >= max` or `max <= 0`.
    pub fn random_uniform<R: RngCore + CryptoRng>(
        dim: usize,
        min: &BigInt,
        max: &BigInt,
        rng: &mut R,
    ) -> Result<Self> {
        if min >= max || !max.is_positive() {
            return Err(Error::InvalidArgument(format!(
                "incorrect range [{}, {}]: min should be less than max and max positive",
                min, max
            )));
        }
        let coords = (0..dim)
            .map(|_| {
                sample_uniform_inclusive(min, max, rng)
                    .ok_or_else(|| Error::InvalidArgument("empty sampling range".to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { coords })
    }

    /// Sample a vector of dimension `dim` uniformly from `[0, bound)^dim`.
    ///
    /// Returns an error if `bound` is not positive.
    pub fn random_below<R: RngCore + CryptoRng>(
        dim: usize,
        bound: &BigInt,
        rng: &mut R,
    ) -> Result<Self> {
        if !bound.is_positive() {
            return Err(Error::InvalidArgument(format!(
                "sampling bound must be positive, got {}",
                bound
            )));
        }
        let zero = BigInt::zero();
        let max = bound - BigInt::one();
        let coords = (0..dim)
            .map(|_| {
                sample_uniform_inclusive(&zero, &max, rng)
                    .ok_or_else(|| Error::InvalidArgument("empty sampling range".to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { coords })
    }

    /// Dimension of the vector.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the vector has dimension 0.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The `i`-th coordinate, if any.
    pub fn coord(&self, i: usize) -> Option<&BigInt> {
        self.coords.get(i)
    }

    /// The coordinates.
    pub fn coords(&self) -> &[BigInt] {
        &self.coords
    }

    /// Consume the vector and return its coordinates.
    pub fn into_coords(self) -> Vec<BigInt> {
        self.coords
    }

    /// Iterator over the coordinates.
    pub fn iter(&self) -> std::slice::Iter<'_, BigInt> {
        self.coords.iter()
    }

    fn check_dimension(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch(self.len(), other.len()));
        }
        Ok(())
    }

    /// Dot product over the integers.
    pub fn dot(&self, other: &Self) -> Result<BigInt> {
        self.check_dimension(other)?;
        Ok(izip!(&self.coords, &other.coords)
            .map(|(a, b)| a * b)
            .fold(BigInt::zero(), |acc, x| acc + x))
    }

    /// Coordinate-wise sum.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.check_dimension(other)?;
        Ok(izip!(&self.coords, &other.coords)
            .map(|(a, b)| a + b)
            .collect())
    }

    /// Coordinate-wise difference.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.check_dimension(other)?;
        Ok(izip!(&self.coords, &other.coords)
            .map(|(a, b)| a - b)
            .collect())
    }

    /// Coordinate-wise product.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.check_dimension(other)?;
        Ok(izip!(&self.coords, &other.coords)
            .map(|(a, b)| a * b)
            .collect())
    }

    /// Replace every coordinate by its representative in `[0, modulus)`.
    ///
    /// Returns an error if `modulus` is not positive.
    pub fn reduce(&self, modulus: &BigInt) -> Result<Self> {
        self.map_residues(modulus, reduce_scalar)
    }

    /// Balanced representation modulo `modulus`: each coordinate is reduced
    /// into `[0, modulus)` and mapped to `c - modulus` when it exceeds
    /// `modulus / 2`.
    ///
    /// Returns an error if `modulus` is not positive.
    pub fn decode_signed(&self, modulus: &BigInt) -> Result<Self> {
        self.map_residues(modulus, decode_signed_scalar)
    }

    fn map_residues(
        &self,
        modulus: &BigInt,
        f: fn(&BigInt, &BigInt) -> Option<BigInt>,
    ) -> Result<Self> {
        if !modulus.is_positive() {
            return Err(invalid_modulus(modulus));
        }
        self.coords
            .iter()
            .map(|c| f(c, modulus).ok_or_else(|| invalid_modulus(modulus)))
            .collect()
    }
}

fn invalid_modulus(modulus: &BigInt) -> Error {
    Error::InvalidArgument(format!("modulus must be positive, got {}", modulus))
}

/// Exact `trunc(value * scale)` for a positive `scale`.
fn encode_coordinate(value: f64, scale: &BigInt) -> Result<BigInt> {
    if !value.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "cannot encode non-finite value {}",
            value
        )));
    }
    // value = sign * mantissa * 2^exponent, exactly.
    let (mantissa, exponent, sign) = Float::integer_decode(value);
    let scaled = BigInt::from(mantissa) * scale;
    let shift = exponent.unsigned_abs() as usize;
    // `scaled` is non-negative, so the right shift truncates toward zero.
    let magnitude = if exponent >= 0 {
        scaled << shift
    } else {
        scaled >> shift
    };
    Ok(if sign < 0 { -magnitude } else { magnitude })
}

impl From<Vec<BigInt>> for FixedPointVector {
    fn from(coords: Vec<BigInt>) -> Self {
        Self::new(coords)
    }
}

impl FromIterator<BigInt> for FixedPointVector {
    fn from_iter<I: IntoIterator<Item = BigInt>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[BigInt]> for FixedPointVector {
    fn as_ref(&self) -> &[BigInt] {
        &self.coords
    }
}

impl Index<usize> for FixedPointVector {
    type Output = BigInt;

    fn index(&self, i: usize) -> &BigInt {
        &self.coords[i]
    }
}

impl<'a> IntoIterator for &'a FixedPointVector {
    type Item = &'a BigInt;
    type IntoIter = std::slice::Iter<'a, BigInt>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

impl IntoIterator for FixedPointVector {
    type Item = BigInt;
    type IntoIter = std::vec::IntoIter<BigInt>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.into_iter()
    }
}
