//! # Scalar-or-batch inputs and outputs
//!
//! Every transform of the crate accepts either a single value or an ordered batch of values
//! (azimuths, zeniths, quaternions) and answers in kind. [`Batch`] makes that distinction
//! explicit at the API boundary:
//!
//! * On input, the transform only ever looks at [`Batch::as_slice`], so the engine always
//!   works on a uniform batch (a scalar is a batch of size one).
//! * On output, results are wrapped with [`Batch::squeeze`], which turns a batch of size one
//!   back into [`Batch::Scalar`].
//!
//! ```rust
//! use gbm_poshist::batch::Batch;
//!
//! let azimuths: Batch<f64> = vec![0.0, 90.0, 180.0].into();
//! assert_eq!(azimuths.len(), 3);
//!
//! let single = Batch::squeeze(vec![42.0]);
//! assert_eq!(single, Batch::Scalar(42.0));
//! ```

use nalgebra::Quaternion;

/// A single value or an ordered batch of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch<T> {
    Scalar(T),
    Many(Vec<T>),
}

impl<T> Batch<T> {
    /// Wrap a computed batch, removing the singleton dimension.
    ///
    /// A vector of exactly one element becomes [`Batch::Scalar`]; any other length
    /// (including zero) stays [`Batch::Many`].
    pub fn squeeze(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Batch::Scalar(value);
            }
        }
        Batch::Many(values)
    }

    /// Number of elements (1 for a scalar).
    pub fn len(&self) -> usize {
        match self {
            Batch::Scalar(_) => 1,
            Batch::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Batch::Scalar(_))
    }

    /// View the values as a slice, whatever the variant.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Batch::Scalar(value) => std::slice::from_ref(value),
            Batch::Many(values) => values.as_slice(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// The scalar value, if this is a [`Batch::Scalar`].
    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Batch::Scalar(value) => Some(value),
            Batch::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Batch::Scalar(value) => vec![value],
            Batch::Many(values) => values,
        }
    }

    /// Apply `f` to every element, keeping the variant.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Batch<U> {
        match self {
            Batch::Scalar(value) => Batch::Scalar(f(value)),
            Batch::Many(values) => Batch::Many(values.into_iter().map(f).collect()),
        }
    }
}

impl<T> From<Vec<T>> for Batch<T> {
    fn from(values: Vec<T>) -> Self {
        Batch::Many(values)
    }
}

impl<T: Clone> From<&[T]> for Batch<T> {
    fn from(values: &[T]) -> Self {
        Batch::Many(values.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for Batch<T> {
    fn from(values: [T; N]) -> Self {
        Batch::Many(values.into())
    }
}

impl From<f64> for Batch<f64> {
    fn from(value: f64) -> Self {
        Batch::Scalar(value)
    }
}

impl From<Quaternion<f64>> for Batch<Quaternion<f64>> {
    fn from(value: Quaternion<f64>) -> Self {
        Batch::Scalar(value)
    }
}

impl<'a, T> IntoIterator for &'a Batch<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
