//! Vectors encrypted under an additively homomorphic public key.

use crate::{Error, Result};
use itertools::izip;
use num_bigint::BigInt;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use secvec_math::FixedPointVector;
use secvec_traits::AdditivelyHomomorphic;
use std::sync::Arc;
use tracing::debug;

/// A vector of ciphertexts, all produced under the same public key.
#[derive(Debug, PartialEq)]
pub struct EncryptedVec<K: AdditivelyHomomorphic> {
    public_key: Arc<K>,
    coords: Vec<K::Ciphertext>,
}

impl<K: AdditivelyHomomorphic> Clone for EncryptedVec<K> {
    fn clone(&self) -> Self {
        Self {
            public_key: self.public_key.clone(),
            coords: self.coords.clone(),
        }
    }
}

impl<K> EncryptedVec<K>
where
    K: AdditivelyHomomorphic<Plaintext = BigInt>,
{
    /// Create an encrypted vector from existing ciphertexts.
    pub fn new(public_key: &Arc<K>, coords: Vec<K::Ciphertext>) -> Self {
        Self {
            public_key: public_key.clone(),
            coords,
        }
    }

    /// Encrypt every coordinate of `vector` under `public_key`.
    ///
    /// Coordinates are encrypted in parallel, each with its own generator
    /// seeded from `rng`.
    pub fn encrypt<R: RngCore + CryptoRng>(
        vector: &FixedPointVector,
        public_key: &Arc<K>,
        rng: &mut R,
    ) -> Result<Self>
    where
        K: Sync + Send,
        K::Ciphertext: Send,
        K::Error: Send,
    {
        debug!(dimension = vector.len(), "encrypting vector");
        let seeds: Vec<<ChaCha20Rng as SeedableRng>::Seed> =
            (0..vector.len()).map(|_| rng.gen()).collect();

        let coords = vector
            .coords()
            .par_iter()
            .zip(seeds.into_par_iter())
            .map(|(m, seed)| {
                let mut rng = ChaCha20Rng::from_seed(seed);
                public_key.encrypt(m, &mut rng)
            })
            .collect::<std::result::Result<Vec<_>, K::Error>>()
            .map_err(|e| Error::EncryptionError(e.to_string()))?;

        Ok(Self {
            public_key: public_key.clone(),
            coords,
        })
    }

    /// The public key the coordinates are encrypted under.
    pub fn public_key(&self) -> &Arc<K> {
        &self.public_key
    }

    /// The ciphertexts.
    pub fn coords(&self) -> &[K::Ciphertext] {
        &self.coords
    }

    /// Replace the ciphertexts.
    pub fn set_coords(&mut self, coords: Vec<K::Ciphertext>) {
        self.coords = coords;
    }

    /// Consume the vector and return its ciphertexts.
    pub fn into_coords(self) -> Vec<K::Ciphertext> {
        self.coords
    }

    /// The `i`-th ciphertext, if any.
    pub fn coord(&self, i: usize) -> Option<&K::Ciphertext> {
        self.coords.get(i)
    }

    /// Dimension of the vector.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the vector has dimension 0.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch(self.len(), other.len()));
        }
        let (a, b) = (&self.public_key, &other.public_key);
        if !Arc::ptr_eq(a, b) && a != b {
            return Err(Error::KeyMismatch);
        }
        Ok(())
    }

    /// Encryption of the coordinate-wise sum.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let pk = &self.public_key;
        let coords = izip!(&self.coords, &other.coords)
            .map(|(a, b)| pk.add(a, b))
            .collect();
        Ok(Self::new(pk, coords))
    }

    /// Encryption of the coordinate-wise difference.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let pk = &self.public_key;
        let coords = izip!(&self.coords, &other.coords)
            .map(|(a, b)| pk.sub(a, b))
            .collect();
        Ok(Self::new(pk, coords))
    }

    /// Encryption of the dot product of the encrypted vector with a public
    /// vector, accumulated from a fresh encryption of zero.
    pub fn dot<R: RngCore + CryptoRng>(
        &self,
        public: &FixedPointVector,
        rng: &mut R,
    ) -> Result<K::Ciphertext> {
        if self.len() != public.len() {
            return Err(Error::DimensionMismatch(self.len(), public.len()));
        }
        let pk = &self.public_key;
        let zero = pk
            .encrypt_zero(rng)
            .map_err(|e| Error::EncryptionError(e.to_string()))?;
        Ok(izip!(&self.coords, public.coords())
            .fold(zero, |acc, (c, b)| pk.add(&acc, &pk.const_multiply(c, b))))
    }

    /// Randomly permute the ciphertexts in place.
    pub fn shuffle<R: RngCore + CryptoRng>(&mut self, rng: &mut R) {
        shuffle(&mut self.coords, rng);
    }
}

/// Uniformly random in-place permutation (Fisher-Yates) of `values`.
pub fn shuffle<T, R: RngCore + CryptoRng>(values: &mut [T], rng: &mut R) {
    debug!(len = values.len(), "shuffling ciphertexts");
    values.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::{shuffle, EncryptedVec};
    use crate::paillier::test_keys::keypair;
    use crate::{Error, FixedPointVector, PaillierPublicKey};
    use num_bigint::{BigInt, BigUint};
    use rand::{thread_rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use secvec_traits::AdditivelyHomomorphic;
    use std::error::Error as StdError;
    use std::sync::Arc;

    fn ints(values: &[i64]) -> FixedPointVector {
        values.iter().map(|v| BigInt::from(*v)).collect()
    }

    #[test]
    fn encrypt_vector() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let (pk, sk) = keypair(128, &mut rng);
        let pk = Arc::new(pk);
        let a = ints(&[3, -1, 0, 12345]);

        let ea = EncryptedVec::encrypt(&a, &pk, &mut rng)?;
        assert_eq!(ea.len(), a.len());
        assert!(Arc::ptr_eq(ea.public_key(), &pk));
        let decrypted: FixedPointVector = ea.coords().iter().map(|c| sk.decrypt(c)).collect();
        assert_eq!(decrypted, a);
        assert!(ea.coord(4).is_none());

        let empty = EncryptedVec::encrypt(&FixedPointVector::zero(0), &pk, &mut rng)?;
        assert!(empty.is_empty());
        Ok(())
    }

    #[test]
    fn add_and_sub() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let (pk, sk) = keypair(128, &mut rng);
        let pk = Arc::new(pk);
        let a = ints(&[10, -20, 30]);
        let b = ints(&[1, 2, -3]);
        let ea = EncryptedVec::encrypt(&a, &pk, &mut rng)?;
        let eb = EncryptedVec::encrypt(&b, &pk, &mut rng)?;

        let sum = ea.try_add(&eb)?;
        let diff = ea.try_sub(&eb)?;
        let dec_sum: FixedPointVector = sum.coords().iter().map(|c| sk.decrypt(c)).collect();
        let dec_diff: FixedPointVector = diff.coords().iter().map(|c| sk.decrypt(c)).collect();
        assert_eq!(dec_sum, a.try_add(&b)?);
        assert_eq!(dec_diff, a.try_sub(&b)?);
        Ok(())
    }

    #[test]
    fn dot_product() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let (pk, sk) = keypair(128, &mut rng);
        let pk = Arc::new(pk);
        let a = ints(&[1, -2, 3, 0, 7]);
        let b = ints(&[4, 5, -6, 100, 2]);
        let ea = EncryptedVec::encrypt(&a, &pk, &mut rng)?;

        let d = ea.dot(&b, &mut rng)?;
        assert_eq!(sk.decrypt(&d), a.dot(&b)?);
        assert_eq!(sk.decrypt(&d), BigInt::from(-10));

        // Two evaluations of the same dot product are unlinkable.
        assert_ne!(ea.dot(&b, &mut rng)?, d);
        Ok(())
    }

    #[test]
    fn dimension_mismatch() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let (pk, _) = keypair(128, &mut rng);
        let pk = Arc::new(pk);
        let ea = EncryptedVec::encrypt(&ints(&[1, 2, 3]), &pk, &mut rng)?;
        let eb = EncryptedVec::encrypt(&ints(&[1, 2, 3, 4]), &pk, &mut rng)?;

        assert_eq!(ea.try_add(&eb), Err(Error::DimensionMismatch(3, 4)));
        assert_eq!(eb.try_sub(&ea), Err(Error::DimensionMismatch(4, 3)));
        assert_eq!(
            ea.dot(&ints(&[1]), &mut rng),
            Err(Error::DimensionMismatch(3, 1))
        );
        Ok(())
    }

    #[test]
    fn key_mismatch() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let (pk1, _) = keypair(128, &mut rng);
        let (pk2, _) = keypair(128, &mut rng);
        let a = ints(&[1, 2]);
        let e1 = EncryptedVec::encrypt(&a, &Arc::new(pk1.clone()), &mut rng)?;
        let e2 = EncryptedVec::encrypt(&a, &Arc::new(pk2), &mut rng)?;
        assert_eq!(e1.try_add(&e2), Err(Error::KeyMismatch));

        // Equal keys behind different pointers are compatible.
        let e3 = EncryptedVec::encrypt(&a, &Arc::new(pk1), &mut rng)?;
        assert!(e1.try_add(&e3).is_ok());
        Ok(())
    }

    #[test]
    fn shuffle_is_a_permutation() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let (pk, sk) = keypair(128, &mut rng);
        let pk = Arc::new(pk);
        let a = ints(&(0..32).collect::<Vec<_>>());
        let mut ea = EncryptedVec::encrypt(&a, &pk, &mut rng)?;
        let original = ea.clone();

        ea.shuffle(&mut rng);
        assert_eq!(ea.len(), original.len());
        let mut decrypted: Vec<BigInt> = ea.coords().iter().map(|c| sk.decrypt(c)).collect();
        decrypted.sort();
        assert_eq!(decrypted, a.into_coords());
        for c in original.coords() {
            assert!(ea.coords().contains(c));
        }
        Ok(())
    }

    #[test]
    fn shuffle_uses_the_given_generator() {
        let mut values: Vec<u32> = (0..64).collect();
        let mut same = values.clone();
        shuffle(&mut values, &mut ChaCha20Rng::seed_from_u64(7));
        shuffle(&mut same, &mut ChaCha20Rng::seed_from_u64(7));
        assert_eq!(values, same);
        assert_ne!(values, (0..64).collect::<Vec<_>>());

        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(sorted, (0..64).collect::<Vec<_>>());

        let mut empty: Vec<u32> = vec![];
        shuffle(&mut empty, &mut ChaCha20Rng::seed_from_u64(7));
        assert!(empty.is_empty());
    }

    #[test]
    fn set_coords() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let pk = Arc::new(PaillierPublicKey::new(BigUint::from(35u32))?);
        let zero = pk.encrypt_zero(&mut rng)?;
        let mut ev = EncryptedVec::new(&pk, vec![zero.clone()]);
        assert_eq!(ev.coord(0), Some(&zero));
        ev.set_coords(vec![zero.clone(), zero.clone()]);
        assert_eq!(ev.len(), 2);
        assert_eq!(ev.into_coords(), vec![zero.clone(), zero]);
        Ok(())
    }
}
