//! Plain real-valued vectors.
//!
//! These are the source values that get fixed-point encoded into the finite
//! field; no operation here is secret or constant time.

use itertools::izip;
use rand::Rng;

/// A vector of `f64` coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RealVector {
    /// The coordinates.
    pub coords: Vec<f64>,
}

impl RealVector {
    /// Create a vector from its coordinates.
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    /// Sample a vector of dimension `dim` with coordinates uniform in
    /// `[min, max)`. Returns None if the range is empty or not finite.
    pub fn random<R: Rng + ?Sized>(dim: usize, min: f64, max: f64, rng: &mut R) -> Option<Self> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return None;
        }
        let coords = (0..dim).map(|_| rng.gen_range(min..max)).collect();
        Some(Self { coords })
    }

    /// Dimension of the vector.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the vector has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The `i`-th coordinate, if any.
    pub fn coord(&self, i: usize) -> Option<f64> {
        self.coords.get(i).copied()
    }

    /// Overwrite the `i`-th coordinate. Returns false if `i` is out of range.
    pub fn set_coord(&mut self, i: usize, value: f64) -> bool {
        match self.coords.get_mut(i) {
            Some(c) => {
                *c = value;
                true
            }
            None => false,
        }
    }

    /// Add `value` to the `i`-th coordinate. Returns false if `i` is out of
    /// range.
    pub fn add_to_coord(&mut self, i: usize, value: f64) -> bool {
        match self.coords.get_mut(i) {
            Some(c) => {
                *c += value;
                true
            }
            None => false,
        }
    }

    /// Dot product, or None if the dimensions differ.
    pub fn dot(&self, other: &Self) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        Some(izip!(&self.coords, &other.coords).map(|(a, b)| a * b).sum())
    }

    /// Whether all coordinates are 0 or 1.
    pub fn is_binary(&self) -> bool {
        self.coords.iter().all(|c| *c == 0.0 || *c == 1.0)
    }

    /// Whether `vectors` contains a vector equal to `self`.
    pub fn contained_in(&self, vectors: &[RealVector]) -> bool {
        vectors.iter().any(|v| v == self)
    }
}

impl From<Vec<f64>> for RealVector {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl AsRef<[f64]> for RealVector {
    fn as_ref(&self) -> &[f64] {
        &self.coords
    }
}

/// Euclidean distance between `p` and `q`, or None if the dimensions differ.
pub fn euclidean_distance(p: &RealVector, q: &RealVector) -> Option<f64> {
    if p.len() != q.len() {
        return None;
    }
    let squared: f64 = izip!(&p.coords, &q.coords)
        .map(|(a, b)| (a - b).powi(2))
        .sum();
    Some(squared.sqrt())
}

/// Number of differing coordinates between two binary vectors.
///
/// Returns None if the dimensions differ or either vector is not binary.
pub fn hamming_distance(p: &RealVector, q: &RealVector) -> Option<f64> {
    if !p.is_binary() || !q.is_binary() {
        return None;
    }
    absolute_difference(p, q)
}

/// Cosine of the angle between `p` and `q`, or None if the dimensions differ.
///
/// The result is NaN when either vector is zero.
pub fn cosine_distance(p: &RealVector, q: &RealVector) -> Option<f64> {
    let num = p.dot(q)?;
    let norm_p = p.dot(p)?.sqrt();
    let norm_q = q.dot(q)?.sqrt();
    Some(num / (norm_p * norm_q))
}

/// Sum of coordinate-wise absolute differences, or None if the dimensions
/// differ.
pub fn absolute_difference(p: &RealVector, q: &RealVector) -> Option<f64> {
    if p.len() != q.len() {
        return None;
    }
    Some(
        izip!(&p.coords, &q.coords)
            .map(|(a, b)| (a - b).abs())
            .sum(),
    )
}
