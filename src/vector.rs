//! Real-valued candidate vectors with optional per-component bounds.
//!
//! [`Vector`] is the value type every layer of the engine exchanges: the
//! composite context, each participant's best solution and every
//! contribution. It is cheap to clone relative to a fitness evaluation and
//! is always passed around by value or shared reference, never as a live
//! handle.

use crate::error::{CcError, Result};
use std::ops::{Index, IndexMut};

/// Closed interval `[lower, upper]` constraining one component.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// Creates bounds, rejecting `lower > upper` and NaN limits.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(CcError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Symmetric bounds `[-half_width, half_width]`.
    pub fn symmetric(half_width: f64) -> Result<Self> {
        Self::new(-half_width, half_width)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Ordered sequence of `f64` components, each optionally bounded.
///
/// `values` and `bounds` always have the same length.
///
/// # Examples
///
/// ```
/// use u_coevolve::Vector;
///
/// let mut v = Vector::from_values(vec![1.0, 1.0]);
/// v.append(&Vector::from_values(vec![2.0, 2.0]));
/// assert_eq!(v.values(), &[1.0, 1.0, 2.0, 2.0]);
/// assert_eq!(v.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    values: Vec<f64>,
    bounds: Vec<Option<Bounds>>,
}

impl Vector {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty vector with room for `capacity` components.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            bounds: Vec::with_capacity(capacity),
        }
    }

    /// Creates an unbounded vector from raw values.
    pub fn from_values(values: Vec<f64>) -> Self {
        let bounds = vec![None; values.len()];
        Self { values, bounds }
    }

    /// Creates a vector from values and matching bounds.
    pub fn with_bounds(values: Vec<f64>, bounds: Vec<Option<Bounds>>) -> Result<Self> {
        if values.len() != bounds.len() {
            return Err(CcError::DimensionMismatch {
                expected: values.len(),
                actual: bounds.len(),
            });
        }
        Ok(Self { values, bounds })
    }

    /// Creates an unbounded vector of `n` zeros.
    pub fn zeros(n: usize) -> Self {
        Self::from_values(vec![0.0; n])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Sets component `index`. Out-of-range indices are an error.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(CcError::DimensionMismatch {
                expected: index + 1,
                actual: self.values.len(),
            }),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn bounds(&self) -> &[Option<Bounds>] {
        &self.bounds
    }

    pub fn bound(&self, index: usize) -> Option<Bounds> {
        self.bounds.get(index).copied().flatten()
    }

    /// Appends one component.
    pub fn push(&mut self, value: f64, bounds: Option<Bounds>) {
        self.values.push(value);
        self.bounds.push(bounds);
    }

    /// Concatenates `other` onto the end of this vector, bounds included.
    pub fn append(&mut self, other: &Vector) {
        self.values.extend_from_slice(&other.values);
        self.bounds.extend_from_slice(&other.bounds);
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.bounds.clear();
    }

    /// Elementwise combination. Bounds are taken from `self`.
    pub fn combine<F>(&self, other: &Vector, mut f: F) -> Result<Vector>
    where
        F: FnMut(f64, f64) -> f64,
    {
        if self.len() != other.len() {
            return Err(CcError::DimensionMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Vector {
            values,
            bounds: self.bounds.clone(),
        })
    }

    /// Applies `f` to every component, keeping bounds.
    pub fn map<F>(&self, f: F) -> Vector
    where
        F: FnMut(f64) -> f64,
    {
        Vector {
            values: self.values.iter().copied().map(f).collect(),
            bounds: self.bounds.clone(),
        }
    }

    pub fn plus(&self, other: &Vector) -> Result<Vector> {
        self.combine(other, |a, b| a + b)
    }

    pub fn minus(&self, other: &Vector) -> Result<Vector> {
        self.combine(other, |a, b| a - b)
    }

    pub fn scale(&self, factor: f64) -> Vector {
        self.map(|x| x * factor)
    }

    /// Clamps every bounded component into its interval.
    pub fn clamp_to_bounds(&mut self) {
        for (value, bounds) in self.values.iter_mut().zip(&self.bounds) {
            if let Some(b) = bounds {
                *value = b.clamp(*value);
            }
        }
    }

    /// Vector of each component's upper bound (`+inf` when unbounded).
    pub fn upper_bound_vector(&self) -> Vector {
        let values = self
            .bounds
            .iter()
            .map(|b| b.map_or(f64::INFINITY, |b| b.upper))
            .collect();
        Vector {
            values,
            bounds: self.bounds.clone(),
        }
    }

    /// Vector of each component's lower bound (`-inf` when unbounded).
    pub fn lower_bound_vector(&self) -> Vector {
        let values = self
            .bounds
            .iter()
            .map(|b| b.map_or(f64::NEG_INFINITY, |b| b.lower))
            .collect();
        Vector {
            values,
            bounds: self.bounds.clone(),
        }
    }

    /// Elementwise sum of all `vectors`. Returns an empty vector for no input.
    pub fn sum_of(vectors: &[Vector]) -> Result<Vector> {
        let mut iter = vectors.iter();
        let Some(first) = iter.next() else {
            return Ok(Vector::new());
        };
        iter.try_fold(first.clone(), |acc, v| acc.plus(v))
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_reject_inverted() {
        assert!(Bounds::new(1.0, -1.0).is_err());
        assert!(Bounds::new(f64::NAN, 1.0).is_err());
        let b = Bounds::new(-1.0, 1.0).unwrap();
        assert!(b.contains(0.5));
        assert!(!b.contains(1.5));
        assert_eq!(b.clamp(3.0), 1.0);
        assert_eq!(b.width(), 2.0);
    }

    #[test]
    fn test_append_keeps_bounds() {
        let b = Bounds::symmetric(5.0).unwrap();
        let mut v = Vector::with_bounds(vec![1.0], vec![Some(b)]).unwrap();
        v.append(&Vector::from_values(vec![2.0, 3.0]));
        assert_eq!(v.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(v.bound(0), Some(b));
        assert_eq!(v.bound(1), None);
        assert_eq!(v.bounds().len(), 3);
    }

    #[test]
    fn test_combine_dimension_mismatch() {
        let a = Vector::zeros(2);
        let b = Vector::zeros(3);
        assert_eq!(
            a.plus(&b),
            Err(CcError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_elementwise_ops() {
        let a = Vector::from_values(vec![1.0, 2.0]);
        let b = Vector::from_values(vec![3.0, 5.0]);
        assert_eq!(a.plus(&b).unwrap().values(), &[4.0, 7.0]);
        assert_eq!(b.minus(&a).unwrap().values(), &[2.0, 3.0]);
        assert_eq!(a.scale(2.0).values(), &[2.0, 4.0]);
        assert_eq!(a.map(|x| x * x).values(), &[1.0, 4.0]);
    }

    #[test]
    fn test_sum_of() {
        let vs = vec![
            Vector::from_values(vec![1.0, 1.0]),
            Vector::from_values(vec![2.0, 0.0]),
            Vector::from_values(vec![0.5, 0.5]),
        ];
        assert_eq!(Vector::sum_of(&vs).unwrap().values(), &[3.5, 1.5]);
        assert!(Vector::sum_of(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bound_vectors() {
        let b = Bounds::new(-2.0, 3.0).unwrap();
        let v = Vector::with_bounds(vec![0.0, 0.0], vec![Some(b), None]).unwrap();
        assert_eq!(v.upper_bound_vector().values(), &[3.0, f64::INFINITY]);
        assert_eq!(v.lower_bound_vector().values(), &[-2.0, f64::NEG_INFINITY]);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let b = Bounds::symmetric(1.0).unwrap();
        let mut v = Vector::with_bounds(vec![4.0, -4.0], vec![Some(b), None]).unwrap();
        v.clamp_to_bounds();
        assert_eq!(v.values(), &[1.0, -4.0]);
    }

    #[test]
    fn test_set_and_index() {
        let mut v = Vector::zeros(2);
        v.set(1, 7.0).unwrap();
        v[0] = 3.0;
        assert_eq!(v[0], 3.0);
        assert_eq!(v.get(1), Some(7.0));
        assert!(v.set(2, 1.0).is_err());
        assert_eq!(v.get(5), None);
    }
}
