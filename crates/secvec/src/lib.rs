#![crate_name = "secvec"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Arithmetic on private vectors for multiparty protocols.
//!
//! Real vectors are fixed-point encoded into a [`FixedPointVector`], then
//! either split into additive secret shares ([`secret_share`]) or encrypted
//! under an additively homomorphic public key ([`EncryptedVec::encrypt`]).
//! Shares and ciphertexts can be combined locally; reconstruction and
//! decryption are explicit steps.

mod errors;

pub mod encrypted;
pub mod paillier;
pub mod parameters;
pub mod share;

pub use encrypted::{shuffle, EncryptedVec};
pub use errors::{Error, ParametersError, Result};
pub use paillier::{PaillierCiphertext, PaillierPublicKey};
pub use parameters::{SharingParameters, SharingParametersBuilder};
pub use secvec_math::FixedPointVector;
pub use secvec_traits::AdditivelyHomomorphic;
pub use share::{recover_int, recover_vector, secret_share, secret_share_with_rounds, ShareVec};

#[cfg(test)]
#[macro_use]
extern crate proptest;
