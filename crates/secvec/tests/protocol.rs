use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Zero};
use rand::{thread_rng, CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use secvec::{
    recover_int, recover_vector, shuffle, AdditivelyHomomorphic, EncryptedVec, Error,
    FixedPointVector, ShareVec, SharingParametersBuilder,
};
use secvec_util::{decode_signed_scalar, reduce_scalar};
use std::error::Error as StdError;
use std::sync::Arc;

/// Linear masking scheme with ciphertexts `m + r * n mod n^2`. Anyone can
/// unmask it, which is enough to check the homomorphic plumbing.
#[derive(Debug, PartialEq)]
struct MaskingKey {
    n: BigInt,
    n_squared: BigInt,
    max_plaintext: BigInt,
}

impl MaskingKey {
    fn new(n: u64, max_plaintext: u64) -> Self {
        let n = BigInt::from(n);
        Self {
            n_squared: &n * &n,
            n,
            max_plaintext: BigInt::from(max_plaintext),
        }
    }

    fn unmask(&self, c: &BigInt) -> BigInt {
        decode_signed_scalar(c, &self.n).unwrap()
    }
}

impl AdditivelyHomomorphic for MaskingKey {
    type Plaintext = BigInt;
    type Ciphertext = BigInt;
    type Error = Error;

    fn encrypt<R: RngCore + CryptoRng>(&self, m: &BigInt, rng: &mut R) -> Result<BigInt, Error> {
        if m > &self.max_plaintext {
            return Err(Error::InvalidArgument(format!("plaintext {} too large", m)));
        }
        let r = rng.gen_bigint_range(&BigInt::zero(), &self.n);
        Ok(reduce_scalar(&(m + r * &self.n), &self.n_squared).unwrap())
    }

    fn encrypt_zero<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<BigInt, Error> {
        self.encrypt(&BigInt::zero(), rng)
    }

    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        reduce_scalar(&(a + b), &self.n_squared).unwrap()
    }

    fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        reduce_scalar(&(a - b), &self.n_squared).unwrap()
    }

    fn const_multiply(&self, c: &BigInt, k: &BigInt) -> BigInt {
        reduce_scalar(&(c * k), &self.n_squared).unwrap()
    }
}

fn ints(values: &[i64]) -> FixedPointVector {
    values.iter().map(|v| BigInt::from(*v)).collect()
}

fn m127() -> BigInt {
    (BigInt::one() << 127) - 1
}

#[test]
fn aggregate_shared_vectors() -> Result<(), Box<dyn StdError>> {
    let mut rng = thread_rng();
    let params = SharingParametersBuilder::new()
        .set_modulus(&m127())
        .set_num_shares(3)
        .set_scale_bits(24)
        .build_arc()?;

    let inputs = [
        vec![0.5, -1.25, 1000.0, 0.0],
        vec![-0.5, 2.0, -999.75, 3.5],
        vec![12.0, 0.125, 0.0, -7.0],
    ];

    // Each client shares its input; server i receives share i from everyone.
    let mut servers: Vec<Vec<ShareVec>> = vec![vec![]; params.num_shares()];
    let mut expected = FixedPointVector::zero(4);
    for input in &inputs {
        let encoded = params.encode(input)?;
        expected = expected.try_add(&encoded)?;
        let shares = params.share(&encoded, &mut rng)?;
        for (share, server) in shares.into_iter().zip(&mut servers) {
            server.push(share);
        }
    }

    let aggregates = servers
        .iter()
        .map(|received| {
            received
                .iter()
                .skip(1)
                .try_fold(received[0].clone(), |acc, s| acc.try_add(s))
        })
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(params.recover(&aggregates)?, expected);
    assert_eq!(
        recover_vector(&aggregates)?,
        ints(&[201326592, 14680064, 4194304, -58720256])
    );
    Ok(())
}

#[test]
fn shared_dot_product_with_public_vector() -> Result<(), Box<dyn StdError>> {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let params = SharingParametersBuilder::new()
        .set_modulus(&m127())
        .set_num_shares(5)
        .build()?;
    let secret = ints(&[3, -4, 5, 0, 11]);
    let public = ints(&[-2, 7, 1, 100, 3]);

    let shares = params.share(&secret, &mut rng)?;
    let partials = shares
        .iter()
        .map(|s| s.dot(&public))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(
        recover_int(params.modulus(), &partials)?,
        secret.dot(&public)?
    );

    let scaled = shares
        .iter()
        .map(|s| s.try_mul(&public))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(recover_vector(&scaled)?, secret.try_mul(&public)?);
    Ok(())
}

#[test]
fn encrypted_vector_with_generic_key() -> Result<(), Box<dyn StdError>> {
    let mut rng = thread_rng();
    let key = Arc::new(MaskingKey::new(1_000_003, 1 << 20));
    let a = ints(&[1, -2, 3, 40]);
    let b = ints(&[5, 5, -5, 0]);

    let ea = EncryptedVec::encrypt(&a, &key, &mut rng)?;
    let eb = EncryptedVec::encrypt(&b, &key, &mut rng)?;
    let unmask = |v: &EncryptedVec<MaskingKey>| -> FixedPointVector {
        v.coords().iter().map(|c| key.unmask(c)).collect()
    };

    assert_eq!(unmask(&ea), a);
    assert_eq!(unmask(&ea.try_add(&eb)?), a.try_add(&b)?);
    assert_eq!(unmask(&ea.try_sub(&eb)?), a.try_sub(&b)?);
    assert_eq!(key.unmask(&ea.dot(&b, &mut rng)?), a.dot(&b)?);

    let other_key = Arc::new(MaskingKey::new(1_000_033, 1 << 20));
    let ec = EncryptedVec::encrypt(&b, &other_key, &mut rng)?;
    assert_eq!(ea.try_add(&ec), Err(Error::KeyMismatch));
    Ok(())
}

#[test]
fn encryption_errors_are_reported() {
    let mut rng = thread_rng();
    let key = Arc::new(MaskingKey::new(1_000_003, 100));
    let result = EncryptedVec::encrypt(&ints(&[1, 2, 101]), &key, &mut rng);
    assert_eq!(
        result,
        Err(Error::EncryptionError(
            "Invalid argument: plaintext 101 too large".to_string()
        ))
    );
}

#[test]
fn shuffled_ciphertexts_keep_their_plaintexts() -> Result<(), Box<dyn StdError>> {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let key = Arc::new(MaskingKey::new(1_000_003, 1 << 20));
    let a: FixedPointVector = (0..32).map(BigInt::from).collect();
    let mut ea = EncryptedVec::encrypt(&a, &key, &mut rng)?;
    let before = ea.clone();

    ea.shuffle(&mut rng);
    assert_ne!(ea, before);
    let mut plaintexts: Vec<BigInt> = ea.coords().iter().map(|c| key.unmask(c)).collect();
    plaintexts.sort();
    assert_eq!(plaintexts, a.into_coords());

    let mut values = vec![1, 2, 3, 4, 5, 6, 7, 8];
    shuffle(&mut values, &mut rng);
    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    Ok(())
}
