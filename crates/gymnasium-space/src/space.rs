//! The core `Space` trait and its type-erased form, [`AnySpace`].

use gymnasium_core::SpaceError;
use std::any::Any;
use std::fmt;

use crate::value::{SpaceValue, Value};

/// The set of valid actions or observations of an environment.
///
/// Every space can check membership, draw uniform samples from its own
/// seeded generator, and (for most spaces) convert values to and from a
/// flat `f64` vector.
///
/// Cloning a space clones its generator state: a clone continues the
/// same sample stream as the original. Equality compares parameters
/// only, never generator state.
///
/// # Examples
///
/// ```
/// use gymnasium_space::{BoxSpace, Discrete, Space};
///
/// // Valid values of this space are 6, 7 and 8.
/// let mut discrete = Discrete::new(3, 6, Some(42)).unwrap();
/// assert!(!discrete.contains(&5));
/// assert!(discrete.contains(&6));
/// assert!(discrete.contains(&8));
/// assert!(!discrete.contains(&9));
///
/// let sample = discrete.sample();
/// assert!(discrete.contains(&sample));
///
/// let mut boxed = BoxSpace::identical(-1.0_f64, 1.0, &[3], None).unwrap();
/// let sample = boxed.sample();
/// assert!(boxed.contains(&sample));
/// ```
pub trait Space: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// The type of the space's elements.
    type Value: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Short name of the space type (`"Discrete"`, `"Box"`, ...).
    fn name(&self) -> &'static str;

    /// Array shape of the values, or `None` for spaces without one
    /// (text and composite spaces).
    fn shape(&self) -> Option<&[usize]>;

    /// `true` if `value` is an element of the space.
    fn contains(&self, value: &Self::Value) -> bool;

    /// Uniformly sample a random element.
    fn sample(&mut self) -> Self::Value;

    /// Reseed the space's generator and return the seed used.
    ///
    /// With `None`, a seed is drawn from OS entropy.
    fn seed(&mut self, seed: Option<u64>) -> u64;

    /// `true` if [`flatten`](Self::flatten) is supported.
    fn is_flattenable(&self) -> bool {
        true
    }

    /// Length of the flattened representation.
    fn flatdim(&self) -> Result<usize, SpaceError> {
        Err(SpaceError::NotFlattenable { space: self.name() })
    }

    /// Convert a value to a flat `f64` vector of length
    /// [`flatdim`](Self::flatdim).
    fn flatten(&self, _value: &Self::Value) -> Result<Vec<f64>, SpaceError> {
        Err(SpaceError::NotFlattenable { space: self.name() })
    }

    /// Inverse of [`flatten`](Self::flatten).
    fn unflatten(&self, _flat: &[f64]) -> Result<Self::Value, SpaceError> {
        Err(SpaceError::NotFlattenable { space: self.name() })
    }

    /// Erase the concrete type.
    fn into_any_space(self) -> AnySpace
    where
        Self::Value: SpaceValue,
    {
        AnySpace(Box::new(Erased(self)))
    }
}

/// Object-safe mirror of [`Space`] over [`Value`]s.
trait DynSpace: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn shape(&self) -> Option<&[usize]>;
    fn contains(&self, value: &Value) -> bool;
    fn sample(&mut self) -> Value;
    fn seed(&mut self, seed: Option<u64>) -> u64;
    fn is_flattenable(&self) -> bool;
    fn flatdim(&self) -> Result<usize, SpaceError>;
    fn flatten(&self, value: &Value) -> Result<Vec<f64>, SpaceError>;
    fn unflatten(&self, flat: &[f64]) -> Result<Value, SpaceError>;
    fn clone_box(&self) -> Box<dyn DynSpace>;
    fn dyn_eq(&self, other: &dyn DynSpace) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Erased<S>(S);

impl<S: Space> fmt::Debug for Erased<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<S> DynSpace for Erased<S>
where
    S: Space,
    S::Value: SpaceValue,
{
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn shape(&self) -> Option<&[usize]> {
        self.0.shape()
    }

    fn contains(&self, value: &Value) -> bool {
        S::Value::from_value(value).is_ok_and(|v| self.0.contains(&v))
    }

    fn sample(&mut self) -> Value {
        self.0.sample().into_value()
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        self.0.seed(seed)
    }

    fn is_flattenable(&self) -> bool {
        self.0.is_flattenable()
    }

    fn flatdim(&self) -> Result<usize, SpaceError> {
        self.0.flatdim()
    }

    fn flatten(&self, value: &Value) -> Result<Vec<f64>, SpaceError> {
        self.0.flatten(&S::Value::from_value(value)?)
    }

    fn unflatten(&self, flat: &[f64]) -> Result<Value, SpaceError> {
        self.0.unflatten(flat).map(SpaceValue::into_value)
    }

    fn clone_box(&self) -> Box<dyn DynSpace> {
        Box::new(Erased(self.0.clone()))
    }

    fn dyn_eq(&self, other: &dyn DynSpace) -> bool {
        other.as_any().downcast_ref::<S>() == Some(&self.0)
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.0
    }
}

/// A space of any concrete type, operating on [`Value`]s.
///
/// Composite spaces hold their children as `AnySpace`, and environments
/// behind a registry expose their spaces this way.
///
/// ```
/// use gymnasium_space::{Discrete, Space, Value};
///
/// let mut space = Discrete::new(4, 0, Some(1)).unwrap().into_any_space();
/// assert_eq!(space.name(), "Discrete");
/// assert!(space.contains(&Value::Int(3)));
/// assert!(!space.contains(&Value::Text("3".into())));
/// assert!(space.downcast_ref::<Discrete>().is_some());
/// ```
pub struct AnySpace(Box<dyn DynSpace>);

impl AnySpace {
    /// Erase a concrete space.
    pub fn new<S>(space: S) -> Self
    where
        S: Space,
        S::Value: SpaceValue,
    {
        space.into_any_space()
    }

    /// Borrow the concrete space, if it has type `S`.
    pub fn downcast_ref<S: Space>(&self) -> Option<&S> {
        self.0.as_any().downcast_ref::<S>()
    }

    /// Mutably borrow the concrete space, if it has type `S`.
    pub fn downcast_mut<S: Space>(&mut self) -> Option<&mut S> {
        self.0.as_any_mut().downcast_mut::<S>()
    }
}

impl Clone for AnySpace {
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl PartialEq for AnySpace {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

impl fmt::Debug for AnySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Space for AnySpace {
    type Value = Value;

    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn shape(&self) -> Option<&[usize]> {
        self.0.shape()
    }

    fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    fn sample(&mut self) -> Value {
        self.0.sample()
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        self.0.seed(seed)
    }

    fn is_flattenable(&self) -> bool {
        self.0.is_flattenable()
    }

    fn flatdim(&self) -> Result<usize, SpaceError> {
        self.0.flatdim()
    }

    fn flatten(&self, value: &Value) -> Result<Vec<f64>, SpaceError> {
        self.0.flatten(value)
    }

    fn unflatten(&self, flat: &[f64]) -> Result<Value, SpaceError> {
        self.0.unflatten(flat)
    }

    fn into_any_space(self) -> AnySpace {
        self
    }
}

/// Shared one-hot helpers for discrete spaces.
pub(crate) fn one_hot(index: usize, len: usize) -> Vec<f64> {
    let mut v = vec![0.0; len];
    v[index] = 1.0;
    v
}

/// Index of the first non-zero entry, the inverse of [`one_hot`].
pub(crate) fn first_hot(block: &[f64], space: &'static str) -> Result<usize, SpaceError> {
    block
        .iter()
        .position(|x| *x != 0.0)
        .ok_or_else(|| SpaceError::ValueMismatch {
            expected: space,
            reason: "one-hot block has no non-zero entry".into(),
        })
}

/// Check that a flat vector has the expected length.
pub(crate) fn check_flat_len(flat: &[f64], expected: usize) -> Result<(), SpaceError> {
    if flat.len() != expected {
        return Err(SpaceError::ShapeMismatch {
            expected: vec![expected],
            actual: vec![flat.len()],
        });
    }
    Ok(())
}
