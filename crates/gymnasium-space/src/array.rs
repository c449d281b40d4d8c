//! Row-major n-dimensional arrays used as space values.

use gymnasium_core::SpaceError;
use serde::Serialize;
use smallvec::SmallVec;

/// Dimensions of an array. Most spaces have rank four or less.
pub type Shape = SmallVec<[usize; 4]>;

/// Number of elements in an array of the given shape.
///
/// The empty shape describes a scalar and has one element.
pub fn num_elements(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// A dense, row-major n-dimensional array.
///
/// # Examples
///
/// ```
/// use gymnasium_space::Array;
///
/// let a = Array::new(&[2, 2], vec![1_u8, 0, 0, 1]).unwrap();
/// assert_eq!(a.shape(), &[2, 2]);
/// assert_eq!(a.data(), &[1, 0, 0, 1]);
/// assert!(Array::new(&[3], vec![1_u8, 2]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Array<E> {
    shape: Shape,
    data: Vec<E>,
}

impl<E> Array<E> {
    /// Build an array from a shape and row-major data.
    ///
    /// Returns `Err(SpaceError::ShapeMismatch)` if `data.len()` does not
    /// equal the number of elements the shape describes.
    pub fn new(shape: &[usize], data: Vec<E>) -> Result<Self, SpaceError> {
        let expected = num_elements(shape);
        if data.len() != expected {
            return Err(SpaceError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![data.len()],
            });
        }
        Ok(Self {
            shape: SmallVec::from_slice(shape),
            data,
        })
    }

    /// Callers guarantee `data.len() == num_elements(&shape)`.
    pub(crate) fn from_parts(shape: Shape, data: Vec<E>) -> Self {
        debug_assert_eq!(data.len(), num_elements(&shape));
        Self { shape, data }
    }

    /// A one-dimensional array.
    pub fn from_vec(data: Vec<E>) -> Self {
        Self {
            shape: smallvec::smallvec![data.len()],
            data,
        }
    }

    /// An array of the given shape with every element set to `value`.
    pub fn filled(shape: &[usize], value: E) -> Self
    where
        E: Clone,
    {
        Self {
            shape: SmallVec::from_slice(shape),
            data: vec![value; num_elements(shape)],
        }
    }

    /// The dimensions.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Row-major element storage.
    pub fn data(&self) -> &[E] {
        &self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.data.iter()
    }

    /// Consume the array, returning its storage.
    pub fn into_data(self) -> Vec<E> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_shape_has_one_element() {
        assert_eq!(num_elements(&[]), 1);
        let a = Array::new(&[], vec![3.5_f64]).unwrap();
        assert_eq!(a.len(), 1);
        assert!(a.shape().is_empty());
    }

    #[test]
    fn zero_dimension_is_empty() {
        let a: Array<i64> = Array::new(&[2, 0], vec![]).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn filled_matches_shape() {
        let a = Array::filled(&[2, 3], 7_i32);
        assert_eq!(a.len(), 6);
        assert!(a.iter().all(|v| *v == 7));
    }

    #[test]
    fn mismatch_reports_shapes() {
        let err = Array::new(&[2, 2], vec![0_u8; 3]).unwrap_err();
        assert_eq!(
            err,
            SpaceError::ShapeMismatch {
                expected: vec![2, 2],
                actual: vec![3]
            }
        );
    }
}
