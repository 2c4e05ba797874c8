#![crate_name = "secvec_math"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Modular field vector arithmetic for the secvec library.

mod errors;

pub mod field;

pub use errors::{Error, Result};
pub use field::FixedPointVector;

#[cfg(test)]
#[macro_use]
extern crate proptest;
