//! Ordered products of spaces.

use gymnasium_core::{derive_seeds, np_random, SpaceError};
use std::fmt;

use crate::space::{check_flat_len, AnySpace, Space};
use crate::value::Value;

/// The Cartesian product of an ordered list of spaces.
///
/// ```
/// use gymnasium_space::{Discrete, MultiBinary, Space, TupleSpace, Value};
///
/// let mut space = TupleSpace::new(vec![
///     Discrete::new(2, 0, None).unwrap().into_any_space(),
///     MultiBinary::new(&[3], None).unwrap().into_any_space(),
/// ])
/// .unwrap();
/// space.seed(Some(42));
/// let sample = space.sample();
/// assert!(space.contains(&sample));
/// assert_eq!(sample.len(), 2);
/// assert!(matches!(sample[0], Value::Int(0 | 1)));
/// ```
#[derive(Clone, PartialEq)]
pub struct TupleSpace {
    spaces: Vec<AnySpace>,
}

impl TupleSpace {
    /// Build a tuple from its component spaces.
    ///
    /// Returns `Err(SpaceError::Empty)` if `spaces` is empty.
    pub fn new(spaces: Vec<AnySpace>) -> Result<Self, SpaceError> {
        if spaces.is_empty() {
            return Err(SpaceError::Empty {
                what: "Tuple requires at least one subspace".into(),
            });
        }
        Ok(Self { spaces })
    }

    /// The component spaces.
    pub fn spaces(&self) -> &[AnySpace] {
        &self.spaces
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Always `false`; empty tuples are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}

impl Space for TupleSpace {
    type Value = Vec<Value>;

    fn name(&self) -> &'static str {
        "Tuple"
    }

    fn shape(&self) -> Option<&[usize]> {
        None
    }

    fn contains(&self, value: &Vec<Value>) -> bool {
        value.len() == self.spaces.len()
            && self.spaces.iter().zip(value).all(|(s, v)| s.contains(v))
    }

    fn sample(&mut self) -> Vec<Value> {
        self.spaces.iter_mut().map(Space::sample).collect()
    }

    /// Seeds every component from one generator seeded with `seed`.
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (mut rng, used) = np_random(seed);
        let seeds = derive_seeds(&mut rng, self.spaces.len());
        for (space, s) in self.spaces.iter_mut().zip(seeds) {
            space.seed(Some(s));
        }
        used
    }

    fn is_flattenable(&self) -> bool {
        self.spaces.iter().all(Space::is_flattenable)
    }

    fn flatdim(&self) -> Result<usize, SpaceError> {
        self.spaces.iter().map(Space::flatdim).sum()
    }

    fn flatten(&self, value: &Vec<Value>) -> Result<Vec<f64>, SpaceError> {
        if value.len() != self.spaces.len() {
            return Err(SpaceError::ValueMismatch {
                expected: "Tuple",
                reason: format!("expected {} items, got {}", self.spaces.len(), value.len()),
            });
        }
        let mut flat = Vec::new();
        for (space, v) in self.spaces.iter().zip(value) {
            flat.extend(space.flatten(v)?);
        }
        Ok(flat)
    }

    fn unflatten(&self, flat: &[f64]) -> Result<Vec<Value>, SpaceError> {
        check_flat_len(flat, self.flatdim()?)?;
        let mut offset = 0;
        let mut items = Vec::with_capacity(self.spaces.len());
        for space in &self.spaces {
            let dim = space.flatdim()?;
            items.push(space.unflatten(&flat[offset..offset + dim])?);
            offset += dim;
        }
        Ok(items)
    }
}

impl fmt::Debug for TupleSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tuple(")?;
        for (i, space) in self.spaces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{space:?}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::{Array, BoxSpace, Discrete, SpaceValue, Text};

    fn mixed() -> TupleSpace {
        TupleSpace::new(vec![
            Discrete::new(3, 0, None).unwrap().into_any_space(),
            BoxSpace::identical(-1.0_f32, 1.0, &[2], None)
                .unwrap()
                .into_any_space(),
        ])
        .unwrap()
    }

    #[test]
    fn empty_tuple_rejected() {
        assert!(matches!(
            TupleSpace::new(vec![]),
            Err(SpaceError::Empty { .. })
        ));
    }

    #[test]
    fn contains_checks_each_component() {
        let space = mixed();
        let good = vec![
            Value::Int(2),
            Array::from_vec(vec![0.0_f32, 0.5]).into_value(),
        ];
        assert!(space.contains(&good));

        let bad_int = vec![
            Value::Int(3),
            Array::from_vec(vec![0.0_f32, 0.5]).into_value(),
        ];
        assert!(!space.contains(&bad_int));

        let wrong_dtype = vec![
            Value::Int(2),
            Array::from_vec(vec![0.0_f64, 0.5]).into_value(),
        ];
        assert!(!space.contains(&wrong_dtype));
        assert!(!space.contains(&vec![Value::Int(2)]));
    }

    #[test]
    fn seeding_reproduces_all_components() {
        let mut a = mixed();
        let mut b = mixed();
        assert_eq!(a.seed(Some(9)), 9);
        b.seed(Some(9));
        for _ in 0..10 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn flatten_concatenates() {
        let space = mixed();
        assert_eq!(space.flatdim().unwrap(), 5);
        let v = vec![
            Value::Int(1),
            Array::from_vec(vec![0.25_f32, -0.5]).into_value(),
        ];
        let flat = space.flatten(&v).unwrap();
        assert_eq!(flat, vec![0.0, 1.0, 0.0, 0.25, -0.5]);
        assert_eq!(space.unflatten(&flat).unwrap(), v);
    }

    #[test]
    fn text_component_blocks_flattening() {
        let space = TupleSpace::new(vec![
            Discrete::new(2, 0, None).unwrap().into_any_space(),
            Text::new(1, 3, None).unwrap().into_any_space(),
        ])
        .unwrap();
        assert!(!space.is_flattenable());
        assert!(space.flatdim().is_err());
    }

    #[test]
    fn debug_lists_components() {
        assert_eq!(
            format!("{:?}", mixed()),
            "Tuple(Discrete(3), Box(-1.0, 1.0, [2], float32))"
        );
    }

    #[test]
    fn compliance() {
        let mut space = mixed();
        space.seed(Some(1));
        compliance::run_full_compliance(space);
    }
}
