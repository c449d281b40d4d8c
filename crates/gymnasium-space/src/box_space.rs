//! A (possibly unbounded) box in `R^n` or `Z^n`.

use gymnasium_core::{np_random, Rng, SpaceError};
use std::fmt;

use crate::array::{num_elements, Array, Shape};
use crate::element::BoxElement;
use crate::space::{check_flat_len, Space};

/// Bounds of a [`BoxSpace`], as returned by [`BoxSpace::low`] and
/// [`BoxSpace::high`].
#[derive(Clone, Debug, PartialEq)]
pub enum BoxBound<'a, E> {
    /// The same bound applies to every element.
    Identical(E),
    /// One bound per element.
    Independent(&'a Array<E>),
}

/// Which sides of a box must be bounded for
/// [`BoxSpace::is_bounded`] to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundedManner {
    /// Finite lower and upper bounds everywhere.
    Both,
    /// Finite lower bounds everywhere.
    Below,
    /// Finite upper bounds everywhere.
    Above,
}

#[derive(Clone, PartialEq)]
enum Bounds<E> {
    Identical { low: E, high: E },
    Independent { low: Array<E>, high: Array<E> },
}

/// The Cartesian product of closed intervals `[low[i], high[i]]`.
///
/// Bounds are either identical for every element or given per element.
///
/// # Examples
///
/// ```
/// use gymnasium_space::{Array, BoxSpace, Space};
///
/// // Shape (3,) with identical bounds [-1.0, 1.0].
/// let unit = BoxSpace::identical(-1.0_f64, 1.0, &[3], None).unwrap();
/// assert!(unit.contains(&Array::from_vec(vec![-1.0, 0.0, 1.0])));
/// assert!(!unit.contains(&Array::from_vec(vec![-2.0, 0.0, 1.0])));
///
/// // Shape (2, 2) with per-element u8 bounds.
/// let pixels = BoxSpace::independent(
///     Array::new(&[2, 2], vec![0_u8, 1, 2, 3]).unwrap(),
///     Array::new(&[2, 2], vec![4_u8, 5, 6, 7]).unwrap(),
///     None,
/// )
/// .unwrap();
/// assert_eq!(pixels.shape(), Some(&[2, 2][..]));
/// ```
#[derive(Clone)]
pub struct BoxSpace<E: BoxElement> {
    rng: Rng,
    bounds: Bounds<E>,
    shape: Shape,
}

impl<E: BoxElement> BoxSpace<E> {
    /// A box of the given shape where every element lies in `[low, high]`.
    ///
    /// Returns `Err(SpaceError::InvalidBounds)` if either bound is NaN
    /// or `low > high`.
    pub fn identical(
        low: E,
        high: E,
        shape: &[usize],
        seed: Option<u64>,
    ) -> Result<Self, SpaceError> {
        Self::check_pair(low, high, None)?;
        let (rng, _) = np_random(seed);
        Ok(Self {
            rng,
            bounds: Bounds::Identical { low, high },
            shape: Shape::from_slice(shape),
        })
    }

    /// A box with one bound pair per element.
    ///
    /// Returns `Err(SpaceError::ShapeMismatch)` if `low` and `high`
    /// differ in shape, or `Err(SpaceError::InvalidBounds)` naming the
    /// first index where a bound is NaN or `low > high`.
    pub fn independent(
        low: Array<E>,
        high: Array<E>,
        seed: Option<u64>,
    ) -> Result<Self, SpaceError> {
        if low.shape() != high.shape() {
            return Err(SpaceError::ShapeMismatch {
                expected: low.shape().to_vec(),
                actual: high.shape().to_vec(),
            });
        }
        for (i, (l, h)) in low.iter().zip(high.iter()).enumerate() {
            Self::check_pair(*l, *h, Some(i))?;
        }
        let (rng, _) = np_random(seed);
        let shape = Shape::from_slice(low.shape());
        Ok(Self {
            rng,
            bounds: Bounds::Independent { low, high },
            shape,
        })
    }

    /// The lower bound.
    pub fn low(&self) -> BoxBound<'_, E> {
        match &self.bounds {
            Bounds::Identical { low, .. } => BoxBound::Identical(*low),
            Bounds::Independent { low, .. } => BoxBound::Independent(low),
        }
    }

    /// The upper bound.
    pub fn high(&self) -> BoxBound<'_, E> {
        match &self.bounds {
            Bounds::Identical { high, .. } => BoxBound::Identical(*high),
            Bounds::Independent { high, .. } => BoxBound::Independent(high),
        }
    }

    /// Number of elements in a value.
    pub fn len(&self) -> usize {
        num_elements(&self.shape)
    }

    /// `true` if values hold no elements (a zero-sized dimension).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if the box is bounded in the given manner.
    pub fn is_bounded(&self, manner: BoundedManner) -> bool {
        let below = (0..self.len()).all(|i| self.bounds_at(i).0.is_finite());
        let above = (0..self.len()).all(|i| self.bounds_at(i).1.is_finite());
        match manner {
            BoundedManner::Both => below && above,
            BoundedManner::Below => below,
            BoundedManner::Above => above,
        }
    }

    fn bounds_at(&self, i: usize) -> (E, E) {
        match &self.bounds {
            Bounds::Identical { low, high } => (*low, *high),
            Bounds::Independent { low, high } => (low.data()[i], high.data()[i]),
        }
    }

    fn check_pair(low: E, high: E, index: Option<usize>) -> Result<(), SpaceError> {
        let at = index.map(|i| format!(" at index {i}")).unwrap_or_default();
        if low.is_nan() || high.is_nan() {
            return Err(SpaceError::InvalidBounds {
                reason: format!("bounds cannot be NaN{at}"),
            });
        }
        if low > high {
            return Err(SpaceError::InvalidBounds {
                reason: format!(
                    "the lower bound cannot be greater than the upper bound \
                     (low: {low:?} > high: {high:?}{at})"
                ),
            });
        }
        Ok(())
    }
}

impl<E: BoxElement> Space for BoxSpace<E> {
    type Value = Array<E>;

    fn name(&self) -> &'static str {
        "Box"
    }

    fn shape(&self) -> Option<&[usize]> {
        Some(&self.shape)
    }

    fn contains(&self, value: &Array<E>) -> bool {
        value.shape() == self.shape.as_slice()
            && value.iter().enumerate().all(|(i, v)| {
                let (l, h) = self.bounds_at(i);
                l <= *v && *v <= h
            })
    }

    fn sample(&mut self) -> Array<E> {
        let data = (0..self.len())
            .map(|i| {
                let (l, h) = self.bounds_at(i);
                E::sample_between(l, h, &mut self.rng)
            })
            .collect();
        Array::from_parts(self.shape.clone(), data)
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (rng, used) = np_random(seed);
        self.rng = rng;
        used
    }

    fn flatdim(&self) -> Result<usize, SpaceError> {
        Ok(self.len())
    }

    fn flatten(&self, value: &Array<E>) -> Result<Vec<f64>, SpaceError> {
        if value.shape() != self.shape.as_slice() {
            return Err(SpaceError::ShapeMismatch {
                expected: self.shape.to_vec(),
                actual: value.shape().to_vec(),
            });
        }
        Ok(value.iter().map(|v| v.to_f64()).collect())
    }

    fn unflatten(&self, flat: &[f64]) -> Result<Array<E>, SpaceError> {
        check_flat_len(flat, self.len())?;
        Array::new(&self.shape, flat.iter().map(|v| E::from_f64(*v)).collect())
    }
}

impl<E: BoxElement> PartialEq for BoxSpace<E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.bounds == other.bounds
    }
}

impl<E: BoxElement> fmt::Debug for BoxSpace<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bounds {
            Bounds::Identical { low, high } => write!(
                f,
                "Box({low:?}, {high:?}, {:?}, {})",
                self.shape.as_slice(),
                E::DTYPE
            ),
            Bounds::Independent { low, high } => write!(
                f,
                "Box({:?}, {:?}, {:?}, {})",
                low.data(),
                high.data(),
                self.shape.as_slice(),
                E::DTYPE
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn arr<E>(shape: &[usize], data: Vec<E>) -> Array<E> {
        Array::new(shape, data).unwrap()
    }

    #[test]
    fn trait_impls() {
        fn trait_impls_noop<T: Sized + Send + Sync + Unpin + Clone + fmt::Debug>() {}
        trait_impls_noop::<BoxSpace<f32>>();
        trait_impls_noop::<BoxSpace<i64>>();
    }

    #[test]
    fn invalid_identical_bounds() {
        assert!(BoxSpace::identical(1.0_f32, 0.0, &[2], None).is_err());
        assert!(BoxSpace::identical(f64::NAN, 0.0, &[2], None).is_err());
        assert!(BoxSpace::identical(5_u8, 5, &[2], None).is_ok());
    }

    #[test]
    fn invalid_independent_bounds_report_index() {
        let err = BoxSpace::independent(
            Array::from_vec(vec![0_i64, i64::MAX]),
            Array::from_vec(vec![i64::MIN, 10]),
            None,
        )
        .unwrap_err();
        match err {
            SpaceError::InvalidBounds { reason } => assert!(reason.contains("index 0"), "{reason}"),
            other => panic!("unexpected {other:?}"),
        }

        let err = BoxSpace::independent(
            arr(&[2, 1], vec![0.0_f32, 0.0]),
            arr(&[2, 1], vec![1.0, f32::MIN]),
            None,
        )
        .unwrap_err();
        match err {
            SpaceError::InvalidBounds { reason } => assert!(reason.contains("index 1"), "{reason}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn independent_shapes_must_match() {
        assert!(matches!(
            BoxSpace::independent(
                Array::from_vec(vec![0.0_f64, 0.0]),
                Array::from_vec(vec![1.0_f64]),
                None
            ),
            Err(SpaceError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn contains_identical_f64() {
        let space = BoxSpace::identical(-1.0_f64, 1.0, &[3], None).unwrap();
        assert!(space.contains(&Array::from_vec(vec![-1.0, -1.0, -1.0])));
        assert!(space.contains(&Array::from_vec(vec![0.5, 0.0, -0.5])));
        assert!(space.contains(&Array::from_vec(vec![1.0, 1.0, 1.0])));
        assert!(!space.contains(&Array::from_vec(vec![-2.0, 0.0, 0.0])));
        assert!(!space.contains(&Array::from_vec(vec![0.0, 0.0, f64::MAX])));
        assert!(!space.contains(&Array::from_vec(vec![0.0, f64::NAN, 0.0])));
        assert!(!space.contains(&Array::from_vec(vec![0.0, 0.0])));
    }

    #[test]
    fn contains_independent_u8() {
        let space = BoxSpace::independent(
            arr(&[2, 3], vec![0_u8, 1, 2, 3, 4, 5]),
            arr(&[2, 3], vec![10, 9, 8, 7, 6, 5]),
            None,
        )
        .unwrap();
        assert!(space.contains(&arr(&[2, 3], vec![0, 1, 2, 3, 4, 5])));
        assert!(space.contains(&arr(&[2, 3], vec![5, 5, 5, 5, 5, 5])));
        assert!(space.contains(&arr(&[2, 3], vec![10, 9, 8, 7, 6, 5])));
        assert!(!space.contains(&arr(&[2, 3], vec![0, 0, 0, 0, 0, 0])));
        assert!(!space.contains(&arr(&[2, 3], vec![100, 5, 5, 5, 5, 5])));
        assert!(!space.contains(&arr(&[2, 3], vec![5, 5, 5, 5, 5, 10])));
        assert!(!space.contains(&arr(&[3, 2], vec![5, 5, 5, 5, 5, 5])));
    }

    #[test]
    fn samples_stay_inside() {
        let mut space = BoxSpace::independent(
            arr(&[2, 3], vec![-1.0_f32, -2.0, -3.0, -4.0, -5.0, -6.0]),
            arr(&[2, 3], vec![6.0, 5.0, 4.0, 3.0, 2.0, 1.0]),
            Some(8),
        )
        .unwrap();
        for _ in 0..100 {
            let s = space.sample();
            assert!(space.contains(&s), "{s:?}");
        }
    }

    #[test]
    fn boundedness() {
        let both = BoxSpace::identical(-1.0_f64, 1.0, &[2], None).unwrap();
        assert!(both.is_bounded(BoundedManner::Both));

        let below = BoxSpace::independent(
            Array::from_vec(vec![0.0_f64, 1.0]),
            Array::from_vec(vec![f64::INFINITY, 2.0]),
            None,
        )
        .unwrap();
        assert!(below.is_bounded(BoundedManner::Below));
        assert!(!below.is_bounded(BoundedManner::Above));
        assert!(!below.is_bounded(BoundedManner::Both));

        let ints = BoxSpace::identical(0_i32, 3, &[4], None).unwrap();
        assert!(ints.is_bounded(BoundedManner::Both));
    }

    #[test]
    fn unbounded_samples_are_finite() {
        let mut space =
            BoxSpace::identical(f32::NEG_INFINITY, f32::INFINITY, &[16], Some(2)).unwrap();
        let s = space.sample();
        assert!(s.iter().all(|v| v.is_finite()));
        assert!(space.contains(&s));
    }

    #[test]
    fn bounds_accessors() {
        let space = BoxSpace::identical(0_u8, 255, &[2, 2], None).unwrap();
        assert_eq!(space.low(), BoxBound::Identical(0));
        assert_eq!(space.high(), BoxBound::Identical(255));
        assert_eq!(space.len(), 4);

        let low = Array::from_vec(vec![0.0_f64, 1.0]);
        let high = Array::from_vec(vec![2.0_f64, 3.0]);
        let space = BoxSpace::independent(low.clone(), high, None).unwrap();
        assert_eq!(space.low(), BoxBound::Independent(&low));
    }

    #[test]
    fn flatten_preserves_order() {
        let space = BoxSpace::identical(0_i64, 9, &[2, 2], None).unwrap();
        let v = arr(&[2, 2], vec![1, 2, 3, 4]);
        let flat = space.flatten(&v).unwrap();
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(space.unflatten(&flat).unwrap(), v);
        assert!(space.unflatten(&[1.0]).is_err());
    }

    #[test]
    fn compliance() {
        compliance::run_full_compliance(
            BoxSpace::identical(-5000_i64, 10000, &[3], Some(1)).unwrap(),
        );
        compliance::run_full_compliance(
            BoxSpace::identical(0.0_f32, 1.0, &[2, 2], Some(2)).unwrap(),
        );
    }

    fn arb_bounds() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        prop::collection::vec((-1e6f64..1e6, 0f64..1e6), 1..8)
            .prop_map(|pairs| pairs.into_iter().map(|(l, w)| (l, l + w)).unzip())
    }

    proptest! {
        #[test]
        fn f64_samples_within_bounds((low, high) in arb_bounds(), seed: u64) {
            let mut s = BoxSpace::independent(
                Array::from_vec(low),
                Array::from_vec(high),
                Some(seed),
            )
            .unwrap();
            for _ in 0..8 {
                let v = s.sample();
                prop_assert!(s.contains(&v));
            }
        }

        #[test]
        fn i32_samples_within_bounds(low in -1000i32..1000, width in 0i32..1000, seed: u64) {
            let mut s = BoxSpace::identical(low, low + width, &[4], Some(seed)).unwrap();
            let v = s.sample();
            prop_assert!(v.iter().all(|x| *x >= low && *x <= low + width));
        }
    }
}
