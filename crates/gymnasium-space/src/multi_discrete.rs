//! Several independent discrete choices.

use gymnasium_core::{np_random, Rng, SpaceError};
use rand::Rng as _;
use std::fmt;

use crate::array::Array;
use crate::space::{check_flat_len, first_hot, one_hot, Space};

/// The Cartesian product of [`Discrete`](crate::Discrete) spaces.
///
/// Element `i` of a value lies in `[start[i], start[i] + nvec[i])`.
///
/// ```
/// use gymnasium_space::{Array, MultiDiscrete, Space};
///
/// // A gamepad: arrow keys (5), button A (2), button B (2).
/// let mut pad = MultiDiscrete::from_nvec(&[5, 2, 2], Some(42)).unwrap();
/// let action = pad.sample();
/// assert!(pad.contains(&action));
/// assert_eq!(pad.flatdim().unwrap(), 9);
/// assert!(!pad.contains(&Array::from_vec(vec![5, 0, 0])));
/// ```
#[derive(Clone)]
pub struct MultiDiscrete {
    rng: Rng,
    nvec: Array<i64>,
    start: Array<i64>,
}

impl MultiDiscrete {
    /// Create a space with per-element counts `nvec` and offsets `start`.
    ///
    /// Returns `Err(SpaceError::ShapeMismatch)` if the arrays differ in
    /// shape, `Err(SpaceError::Empty)` if any count is not positive, or
    /// `Err(SpaceError::Overflow)` if any `start + nvec` exceeds
    /// `i64::MAX`.
    pub fn new(nvec: Array<i64>, start: Array<i64>, seed: Option<u64>) -> Result<Self, SpaceError> {
        if nvec.shape() != start.shape() {
            return Err(SpaceError::ShapeMismatch {
                expected: nvec.shape().to_vec(),
                actual: start.shape().to_vec(),
            });
        }
        for (i, (n, s)) in nvec.iter().zip(start.iter()).enumerate() {
            if *n <= 0 {
                return Err(SpaceError::Empty {
                    what: format!("MultiDiscrete requires nvec > 0, got {n} at index {i}"),
                });
            }
            if s.checked_add(*n).is_none() {
                return Err(SpaceError::Overflow {
                    reason: format!("start {s} + nvec {n} at index {i} > {}", i64::MAX),
                });
            }
        }
        let (rng, _) = np_random(seed);
        Ok(Self { rng, nvec, start })
    }

    /// A one-dimensional space with zero offsets.
    pub fn from_nvec(nvec: &[i64], seed: Option<u64>) -> Result<Self, SpaceError> {
        Self::new(
            Array::from_vec(nvec.to_vec()),
            Array::from_vec(vec![0; nvec.len()]),
            seed,
        )
    }

    /// Per-element counts.
    pub fn nvec(&self) -> &Array<i64> {
        &self.nvec
    }

    /// Per-element offsets.
    pub fn start(&self) -> &Array<i64> {
        &self.start
    }

    fn blocks(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.start.iter().copied().zip(self.nvec.iter().copied())
    }
}

impl Space for MultiDiscrete {
    type Value = Array<i64>;

    fn name(&self) -> &'static str {
        "MultiDiscrete"
    }

    fn shape(&self) -> Option<&[usize]> {
        Some(self.nvec.shape())
    }

    fn contains(&self, value: &Array<i64>) -> bool {
        value.shape() == self.nvec.shape()
            && value
                .iter()
                .zip(self.blocks())
                .all(|(v, (s, n))| *v >= s && *v - s < n)
    }

    fn sample(&mut self) -> Array<i64> {
        let data: Vec<i64> = self
            .start
            .iter()
            .zip(self.nvec.iter())
            .map(|(s, n)| s + self.rng.gen_range(0..*n))
            .collect();
        Array::from_parts(self.nvec.shape().into(), data)
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (rng, used) = np_random(seed);
        self.rng = rng;
        used
    }

    fn flatdim(&self) -> Result<usize, SpaceError> {
        self.nvec.iter().try_fold(0_usize, |acc, n| {
            usize::try_from(*n)
                .ok()
                .and_then(|n| acc.checked_add(n))
                .ok_or_else(|| SpaceError::Overflow {
                    reason: "flattened MultiDiscrete does not fit in usize".into(),
                })
        })
    }

    fn flatten(&self, value: &Array<i64>) -> Result<Vec<f64>, SpaceError> {
        if !self.contains(value) {
            return Err(SpaceError::ValueMismatch {
                expected: "MultiDiscrete",
                reason: format!("{:?} is not an element", value.data()),
            });
        }
        let mut flat = Vec::with_capacity(self.flatdim()?);
        for (v, (s, n)) in value.iter().zip(self.blocks()) {
            flat.extend(one_hot((v - s) as usize, n as usize));
        }
        Ok(flat)
    }

    fn unflatten(&self, flat: &[f64]) -> Result<Array<i64>, SpaceError> {
        check_flat_len(flat, self.flatdim()?)?;
        let mut offset = 0;
        let mut data = Vec::with_capacity(self.nvec.len());
        for (s, n) in self.blocks() {
            let block = &flat[offset..offset + n as usize];
            data.push(s + first_hot(block, "MultiDiscrete")? as i64);
            offset += n as usize;
        }
        Array::new(self.nvec.shape(), data)
    }
}

impl PartialEq for MultiDiscrete {
    fn eq(&self, other: &Self) -> bool {
        self.nvec == other.nvec && self.start == other.start
    }
}

impl fmt::Debug for MultiDiscrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.iter().all(|s| *s == 0) {
            write!(f, "MultiDiscrete({:?})", self.nvec.data())
        } else {
            write!(
                f,
                "MultiDiscrete({:?}, start={:?})",
                self.nvec.data(),
                self.start.data()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;

    #[test]
    fn non_positive_counts_rejected() {
        assert!(matches!(
            MultiDiscrete::from_nvec(&[2, 0], None),
            Err(SpaceError::Empty { .. })
        ));
        assert!(matches!(
            MultiDiscrete::from_nvec(&[-1], None),
            Err(SpaceError::Empty { .. })
        ));
    }

    #[test]
    fn shape_mismatch_rejected() {
        assert!(matches!(
            MultiDiscrete::new(
                Array::from_vec(vec![2, 3]),
                Array::from_vec(vec![0]),
                None
            ),
            Err(SpaceError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn offsets_shift_membership() {
        let space = MultiDiscrete::new(
            Array::from_vec(vec![3, 2]),
            Array::from_vec(vec![-1, 10]),
            None,
        )
        .unwrap();
        assert!(space.contains(&Array::from_vec(vec![-1, 10])));
        assert!(space.contains(&Array::from_vec(vec![1, 11])));
        assert!(!space.contains(&Array::from_vec(vec![2, 11])));
        assert!(!space.contains(&Array::from_vec(vec![0, 9])));
        assert!(!space.contains(&Array::from_vec(vec![0])));
    }

    #[test]
    fn two_dimensional_nvec() {
        let nvec = Array::new(&[2, 2], vec![2, 3, 4, 5]).unwrap();
        let start = Array::filled(&[2, 2], 0);
        let mut space = MultiDiscrete::new(nvec, start, Some(6)).unwrap();
        assert_eq!(space.shape(), Some(&[2, 2][..]));
        let s = space.sample();
        assert_eq!(s.shape(), &[2, 2]);
        assert!(space.contains(&s));
    }

    #[test]
    fn flatten_concatenates_one_hot_blocks() {
        let space = MultiDiscrete::new(
            Array::from_vec(vec![2, 3]),
            Array::from_vec(vec![0, 5]),
            None,
        )
        .unwrap();
        let v = Array::from_vec(vec![1, 6]);
        let flat = space.flatten(&v).unwrap();
        assert_eq!(flat, vec![0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(space.unflatten(&flat).unwrap(), v);
    }

    #[test]
    fn debug_format() {
        let space = MultiDiscrete::from_nvec(&[5, 2], None).unwrap();
        assert_eq!(format!("{space:?}"), "MultiDiscrete([5, 2])");
    }

    #[test]
    fn compliance() {
        compliance::run_full_compliance(MultiDiscrete::from_nvec(&[5, 2, 2], Some(1)).unwrap());
    }
}
