#![crate_name = "secvec_util"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Utilities for the secvec library.

pub mod real;

use num_bigint::{BigInt, RandBigInt, Sign};
use num_bigint_dig::{prime::probably_prime, BigUint as DigBigUint, RandPrime};
use num_traits::{One, Signed};
use rand::{CryptoRng, RngCore};

#[cfg(test)]
#[macro_use]
extern crate proptest;

/// Number of Miller-Rabin rounds used when the caller does not specify one.
/// Twenty rounds bound the false positive rate by 4^-20.
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 20;

/// Returns whether `p` is prime, using `rounds` Miller-Rabin tests followed by
/// a Lucas test. Values smaller than 2 are never prime.
pub fn is_probably_prime(p: &BigInt, rounds: usize) -> bool {
    if p < &BigInt::from(2u8) {
        return false;
    }
    let (_, magnitude) = p.to_bytes_be();
    probably_prime(&DigBigUint::from_bytes_be(&magnitude), rounds)
}

/// Generate a random prime of exactly `bits` bits.
///
/// Returns None if `bits < 2`.
pub fn generate_prime<R: RngCore + CryptoRng>(bits: usize, rng: &mut R) -> Option<BigInt> {
    if bits < 2 {
        return None;
    }
    let prime = rng.gen_prime(bits);
    Some(BigInt::from_bytes_be(Sign::Plus, &prime.to_bytes_be()))
}

/// Sample an integer uniformly in the inclusive range `[min, max]`.
///
/// Returns None if `min > max`.
pub fn sample_uniform_inclusive<R: RngCore + CryptoRng>(
    min: &BigInt,
    max: &BigInt,
    rng: &mut R,
) -> Option<BigInt> {
    if min > max {
        return None;
    }
    let upper = max + BigInt::one();
    Some(rng.gen_bigint_range(min, &upper))
}

/// Representative of `value` in `[0, modulus)`.
///
/// Returns None if `modulus` is not positive.
pub fn reduce_scalar(value: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    if !modulus.is_positive() {
        return None;
    }
    let r = value % modulus;
    Some(if r.is_negative() { r + modulus } else { r })
}

/// Balanced representative of `value` modulo `modulus`: the residue `c` in
/// `[0, modulus)` is returned as is when `c <= modulus / 2`, and as
/// `c - modulus` otherwise.
///
/// Returns None if `modulus` is not positive.
pub fn decode_signed_scalar(value: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    let c = reduce_scalar(value, modulus)?;
    let threshold = modulus / BigInt::from(2u8);
    Some(if c > threshold { c - modulus } else { c })
}
