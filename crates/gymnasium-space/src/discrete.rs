//! A finite range of integers.

use gymnasium_core::{np_random, Rng, SpaceError};
use rand::seq::SliceRandom;
use rand::Rng as _;
use std::fmt;

use crate::space::{check_flat_len, first_hot, one_hot, Space};

/// The integers `{start, start + 1, ..., start + n - 1}`.
///
/// # Examples
///
/// ```
/// use gymnasium_space::{Discrete, Space};
///
/// let mut space = Discrete::new(3, -1, Some(0)).unwrap();
/// assert_eq!(space.end(), 2);
/// assert!(space.contains(&-1) && space.contains(&1));
/// assert!(!space.contains(&2));
///
/// // Only 0 is allowed by the mask.
/// assert_eq!(space.sample_masked(&[false, true, false]).unwrap(), 0);
/// ```
#[derive(Clone)]
pub struct Discrete {
    rng: Rng,
    n: u64,
    start: i64,
    end: i64,
}

impl Discrete {
    /// Create a space of `n` integers starting at `start`.
    ///
    /// Returns `Err(SpaceError::Empty)` if `n == 0`, or
    /// `Err(SpaceError::Overflow)` if `start + n` exceeds `i64::MAX`.
    pub fn new(n: u64, start: i64, seed: Option<u64>) -> Result<Self, SpaceError> {
        let end = Self::check_space(n, start)?;
        let (rng, _) = np_random(seed);
        Ok(Self { rng, n, start, end })
    }

    /// Number of elements.
    pub const fn n(&self) -> u64 {
        self.n
    }

    /// Smallest element.
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// One past the largest element.
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Sample uniformly among the elements whose mask entry is `true`.
    ///
    /// `mask[i]` refers to the element `start + i`. When no entry is
    /// `true`, `start` is returned.
    ///
    /// Returns `Err(SpaceError::InvalidMask)` if `mask.len() != n`.
    pub fn sample_masked(&mut self, mask: &[bool]) -> Result<i64, SpaceError> {
        if mask.len() as u64 != self.n {
            return Err(SpaceError::InvalidMask {
                reason: format!("expected {} entries, got {}", self.n, mask.len()),
            });
        }
        let allowed: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.then_some(i))
            .collect();
        Ok(allowed
            .choose(&mut self.rng)
            .map_or(self.start, |i| self.start + *i as i64))
    }

    fn check_space(n: u64, start: i64) -> Result<i64, SpaceError> {
        if n == 0 {
            return Err(SpaceError::Empty {
                what: "Discrete requires n > 0".to_string(),
            });
        }
        i64::try_from(n)
            .ok()
            .and_then(|n| start.checked_add(n))
            .ok_or_else(|| SpaceError::Overflow {
                reason: format!("start {start} + n {n} > {}", i64::MAX),
            })
    }

    fn index_of(&self, value: i64) -> usize {
        (value - self.start) as usize
    }
}

impl Space for Discrete {
    type Value = i64;

    fn name(&self) -> &'static str {
        "Discrete"
    }

    fn shape(&self) -> Option<&[usize]> {
        Some(&[])
    }

    fn contains(&self, value: &i64) -> bool {
        *value >= self.start && *value < self.end
    }

    fn sample(&mut self) -> i64 {
        self.rng.gen_range(self.start..self.end)
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (rng, used) = np_random(seed);
        self.rng = rng;
        used
    }

    fn flatdim(&self) -> Result<usize, SpaceError> {
        usize::try_from(self.n).map_err(|_| SpaceError::Overflow {
            reason: format!("n {} does not fit in usize", self.n),
        })
    }

    fn flatten(&self, value: &i64) -> Result<Vec<f64>, SpaceError> {
        if !self.contains(value) {
            return Err(SpaceError::ValueMismatch {
                expected: "Discrete",
                reason: format!("{value} is outside [{}, {})", self.start, self.end),
            });
        }
        Ok(one_hot(self.index_of(*value), self.flatdim()?))
    }

    fn unflatten(&self, flat: &[f64]) -> Result<i64, SpaceError> {
        check_flat_len(flat, self.flatdim()?)?;
        Ok(self.start + first_hot(flat, "Discrete")? as i64)
    }
}

impl PartialEq for Discrete {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.start == other.start
    }
}

impl fmt::Debug for Discrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == 0 {
            write!(f, "Discrete({})", self.n)
        } else {
            write!(f, "Discrete({}, start={})", self.n, self.start)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    #[test]
    fn trait_impls() {
        fn trait_impls_noop<T: Sized + Send + Sync + Unpin + Clone + fmt::Debug>() {}
        trait_impls_noop::<Discrete>();
    }

    #[test]
    fn zero_elements_rejected() {
        assert!(matches!(
            Discrete::new(0, 0, None),
            Err(SpaceError::Empty { .. })
        ));
    }

    #[test]
    fn overflow_rejected() {
        assert!(matches!(
            Discrete::new(1, i64::MAX, None),
            Err(SpaceError::Overflow { .. })
        ));
        assert!(matches!(
            Discrete::new(101, i64::MAX - 100, None),
            Err(SpaceError::Overflow { .. })
        ));
        assert!(Discrete::new(100, i64::MAX - 100, None).is_ok());
        assert!(matches!(
            Discrete::new(u64::MAX, 0, None),
            Err(SpaceError::Overflow { .. })
        ));
    }

    #[test]
    fn contains_with_offset() {
        let space = Discrete::new(8, 2, None).unwrap();
        for v in 2..10 {
            assert!(space.contains(&v), "{v} should be contained");
        }
        for v in [i64::MIN, 0, 1, 10, 11, i64::MAX] {
            assert!(!space.contains(&v), "{v} should not be contained");
        }
    }

    #[test]
    fn contains_negative_start() {
        let space = Discrete::new(7, -3, None).unwrap();
        assert!((-3..=3).all(|v| space.contains(&v)));
        assert!(!space.contains(&-4));
        assert!(!space.contains(&4));
    }

    #[test]
    fn sample_near_minimum() {
        let mut space = Discrete::new(512, i64::MIN, Some(11)).unwrap();
        for _ in 0..100 {
            let s = space.sample();
            assert!(space.contains(&s));
        }
    }

    #[test]
    fn masked_sampling_only_returns_allowed() {
        let mut space = Discrete::new(5, 10, Some(4)).unwrap();
        let mask = [false, true, false, true, false];
        for _ in 0..50 {
            let s = space.sample_masked(&mask).unwrap();
            assert!(s == 11 || s == 13, "unexpected {s}");
        }
    }

    #[test]
    fn empty_mask_returns_start() {
        let mut space = Discrete::new(3, 7, None).unwrap();
        assert_eq!(space.sample_masked(&[false; 3]).unwrap(), 7);
    }

    #[test]
    fn wrong_mask_length_rejected() {
        let mut space = Discrete::new(3, 0, None).unwrap();
        assert!(matches!(
            space.sample_masked(&[true; 2]),
            Err(SpaceError::InvalidMask { .. })
        ));
    }

    #[test]
    fn flatten_is_one_hot() {
        let space = Discrete::new(4, 1, None).unwrap();
        assert_eq!(space.flatten(&3).unwrap(), vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(space.unflatten(&[0.0, 0.0, 1.0, 0.0]).unwrap(), 3);
        assert!(space.flatten(&5).is_err());
        assert!(space.unflatten(&[0.0; 4]).is_err());
        assert!(space.unflatten(&[1.0; 3]).is_err());
    }

    #[test]
    fn equality_ignores_generator_state() {
        let a = Discrete::new(3, 1, Some(1)).unwrap();
        let b = Discrete::new(3, 1, Some(2)).unwrap();
        let c = Discrete::new(3, 0, Some(1)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(format!("{a:?}"), "Discrete(3, start=1)");
        assert_eq!(format!("{c:?}"), "Discrete(3)");
    }

    #[test]
    fn compliance() {
        compliance::run_full_compliance(Discrete::new(6, -2, Some(3)).unwrap());
    }

    proptest! {
        #[test]
        fn samples_lie_in_range(n in 1u64..1000, start in -1000i64..1000, seed: u64) {
            let mut s = Discrete::new(n, start, Some(seed)).unwrap();
            for _ in 0..16 {
                let v = s.sample();
                prop_assert!(v >= start && v < start + n as i64);
            }
        }

        #[test]
        fn masked_samples_are_allowed(mask in prop::collection::vec(any::<bool>(), 1..32), seed: u64) {
            let mut s = Discrete::new(mask.len() as u64, 0, Some(seed)).unwrap();
            let v = s.sample_masked(&mask).unwrap();
            if mask.iter().any(|m| *m) {
                prop_assert!(mask[v as usize]);
            } else {
                prop_assert_eq!(v, 0);
            }
        }
    }
}
