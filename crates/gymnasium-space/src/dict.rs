//! Keyed products of spaces.

use gymnasium_core::{derive_seeds, np_random, SpaceError};
use indexmap::IndexMap;
use std::fmt;

use crate::space::{check_flat_len, AnySpace, Space};
use crate::value::Value;

/// A product of spaces addressed by name.
///
/// Keys keep insertion order, which fixes both the sample order and the
/// flattened layout.
///
/// ```
/// use gymnasium_space::{BoxSpace, DictSpace, Discrete, Space, Value};
///
/// let mut space = DictSpace::new([
///     ("position", Discrete::new(2, 0, None).unwrap().into_any_space()),
///     ("velocity", BoxSpace::identical(-1.0_f32, 1.0, &[1], None).unwrap().into_any_space()),
/// ])
/// .unwrap();
/// space.seed(Some(42));
/// let sample = space.sample();
/// assert!(space.contains(&sample));
/// let keys: Vec<&str> = space.keys().collect();
/// assert_eq!(keys, ["position", "velocity"]);
/// ```
#[derive(Clone, PartialEq)]
pub struct DictSpace {
    spaces: IndexMap<String, AnySpace>,
}

impl DictSpace {
    /// Build a dict from `(key, space)` pairs. A repeated key keeps the
    /// position of its first occurrence and the last space given.
    ///
    /// Returns `Err(SpaceError::Empty)` if there are no pairs.
    pub fn new<K, I>(spaces: I) -> Result<Self, SpaceError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AnySpace)>,
    {
        let spaces: IndexMap<String, AnySpace> =
            spaces.into_iter().map(|(k, s)| (k.into(), s)).collect();
        if spaces.is_empty() {
            return Err(SpaceError::Empty {
                what: "Dict requires at least one subspace".into(),
            });
        }
        Ok(Self { spaces })
    }

    /// The subspace stored under `key`.
    pub fn get(&self, key: &str) -> Option<&AnySpace> {
        self.spaces.get(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.spaces.keys().map(String::as_str)
    }

    /// Number of subspaces.
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Always `false`; empty dicts are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}

impl Space for DictSpace {
    type Value = IndexMap<String, Value>;

    fn name(&self) -> &'static str {
        "Dict"
    }

    fn shape(&self) -> Option<&[usize]> {
        None
    }

    fn contains(&self, value: &IndexMap<String, Value>) -> bool {
        value.len() == self.spaces.len()
            && self
                .spaces
                .iter()
                .all(|(k, s)| value.get(k).is_some_and(|v| s.contains(v)))
    }

    fn sample(&mut self) -> IndexMap<String, Value> {
        self.spaces
            .iter_mut()
            .map(|(k, s)| (k.clone(), s.sample()))
            .collect()
    }

    /// Seeds every subspace, in key order, from one generator seeded
    /// with `seed`.
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (mut rng, used) = np_random(seed);
        let seeds = derive_seeds(&mut rng, self.spaces.len());
        for (space, s) in self.spaces.values_mut().zip(seeds) {
            space.seed(Some(s));
        }
        used
    }

    fn is_flattenable(&self) -> bool {
        self.spaces.values().all(Space::is_flattenable)
    }

    fn flatdim(&self) -> Result<usize, SpaceError> {
        self.spaces.values().map(Space::flatdim).sum()
    }

    fn flatten(&self, value: &IndexMap<String, Value>) -> Result<Vec<f64>, SpaceError> {
        let mut flat = Vec::new();
        for (key, space) in &self.spaces {
            let v = value.get(key).ok_or_else(|| SpaceError::ValueMismatch {
                expected: "Dict",
                reason: format!("missing key {key:?}"),
            })?;
            flat.extend(space.flatten(v)?);
        }
        Ok(flat)
    }

    fn unflatten(&self, flat: &[f64]) -> Result<IndexMap<String, Value>, SpaceError> {
        check_flat_len(flat, self.flatdim()?)?;
        let mut offset = 0;
        let mut items = IndexMap::with_capacity(self.spaces.len());
        for (key, space) in &self.spaces {
            let dim = space.flatdim()?;
            items.insert(key.clone(), space.unflatten(&flat[offset..offset + dim])?);
            offset += dim;
        }
        Ok(items)
    }
}

impl fmt::Debug for DictSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dict(")?;
        for (i, (key, space)) in self.spaces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key:?}: {space:?}")?;
        }
        write!(f, ")")
    }
}
