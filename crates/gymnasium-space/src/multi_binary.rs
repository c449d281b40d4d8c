//! Arrays of independent bits.

use gymnasium_core::{np_random, Rng, SpaceError};
use rand::Rng as _;
use std::fmt;

use crate::array::{num_elements, Array, Shape};
use crate::space::{check_flat_len, Space};

/// Binary arrays of a fixed shape. Elements are `0` or `1`.
///
/// ```
/// use gymnasium_space::{Array, MultiBinary, Space};
///
/// let mut space = MultiBinary::new(&[2, 2], Some(0)).unwrap();
/// assert!(space.contains(&Array::new(&[2, 2], vec![1, 0, 0, 1]).unwrap()));
/// assert!(!space.contains(&Array::new(&[2, 2], vec![2, 0, 0, 1]).unwrap()));
/// assert_eq!(space.sample().shape(), &[2, 2]);
/// ```
#[derive(Clone)]
pub struct MultiBinary {
    rng: Rng,
    shape: Shape,
}

impl MultiBinary {
    /// Create a space of binary arrays with the given shape.
    ///
    /// Returns `Err(SpaceError::Empty)` if the shape is empty or has a
    /// zero-sized dimension.
    pub fn new(shape: &[usize], seed: Option<u64>) -> Result<Self, SpaceError> {
        if shape.is_empty() || shape.contains(&0) {
            return Err(SpaceError::Empty {
                what: format!("MultiBinary requires positive dimensions, got {shape:?}"),
            });
        }
        let (rng, _) = np_random(seed);
        Ok(Self {
            rng,
            shape: Shape::from_slice(shape),
        })
    }

    /// Number of bits in a value.
    pub fn n(&self) -> usize {
        num_elements(&self.shape)
    }
}

impl Space for MultiBinary {
    type Value = Array<u8>;

    fn name(&self) -> &'static str {
        "MultiBinary"
    }

    fn shape(&self) -> Option<&[usize]> {
        Some(&self.shape)
    }

    fn contains(&self, value: &Array<u8>) -> bool {
        value.shape() == self.shape.as_slice() && value.iter().all(|b| *b <= 1)
    }

    fn sample(&mut self) -> Array<u8> {
        let data = (0..self.n()).map(|_| u8::from(self.rng.gen::<bool>())).collect();
        Array::from_parts(self.shape.clone(), data)
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (rng, used) = np_random(seed);
        self.rng = rng;
        used
    }

    fn flatdim(&self) -> Result<usize, SpaceError> {
        Ok(self.n())
    }

    fn flatten(&self, value: &Array<u8>) -> Result<Vec<f64>, SpaceError> {
        if !self.contains(value) {
            return Err(SpaceError::ValueMismatch {
                expected: "MultiBinary",
                reason: format!(
                    "{:?} is not a binary array of shape {:?}",
                    value.data(),
                    self.shape.as_slice()
                ),
            });
        }
        Ok(value.iter().map(|b| f64::from(*b)).collect())
    }

    fn unflatten(&self, flat: &[f64]) -> Result<Array<u8>, SpaceError> {
        check_flat_len(flat, self.n())?;
        Array::new(&self.shape, flat.iter().map(|x| u8::from(*x != 0.0)).collect())
    }
}

impl PartialEq for MultiBinary {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}

impl fmt::Debug for MultiBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape.as_slice() {
            [n] => write!(f, "MultiBinary({n})"),
            shape => write!(f, "MultiBinary({shape:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;

    #[test]
    fn empty_shapes_rejected() {
        assert!(MultiBinary::new(&[], None).is_err());
        assert!(MultiBinary::new(&[3, 0], None).is_err());
    }

    #[test]
    fn samples_are_binary() {
        let mut space = MultiBinary::new(&[16], Some(12)).unwrap();
        for _ in 0..20 {
            let s = space.sample();
            assert!(s.iter().all(|b| *b == 0 || *b == 1));
        }
    }

    #[test]
    fn wrong_shape_not_contained() {
        let space = MultiBinary::new(&[4], None).unwrap();
        assert!(!space.contains(&Array::new(&[2, 2], vec![0, 1, 0, 1]).unwrap()));
    }

    #[test]
    fn flatten_round_trips() {
        let space = MultiBinary::new(&[3], None).unwrap();
        let v = Array::from_vec(vec![1, 0, 1]);
        assert_eq!(space.flatten(&v).unwrap(), vec![1.0, 0.0, 1.0]);
        assert_eq!(space.unflatten(&[1.0, 0.0, 1.0]).unwrap(), v);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", MultiBinary::new(&[5], None).unwrap()), "MultiBinary(5)");
        assert_eq!(
            format!("{:?}", MultiBinary::new(&[2, 3], None).unwrap()),
            "MultiBinary([2, 3])"
        );
    }

    #[test]
    fn compliance() {
        compliance::run_full_compliance(MultiBinary::new(&[3, 2], Some(4)).unwrap());
    }
}
