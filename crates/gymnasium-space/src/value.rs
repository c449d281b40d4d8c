//! Type-erased space values.

use gymnasium_core::SpaceError;
use indexmap::IndexMap;
use serde::Serialize;

use crate::array::Array;
use crate::element::BoxElement;

/// An array value of any supported element type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayValue {
    /// 32-bit floats.
    F32(Array<f32>),
    /// 64-bit floats.
    F64(Array<f64>),
    /// 32-bit signed integers.
    I32(Array<i32>),
    /// 64-bit signed integers.
    I64(Array<i64>),
    /// Bytes.
    U8(Array<u8>),
}

impl ArrayValue {
    /// Dimensions of the wrapped array.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::F32(a) => a.shape(),
            Self::F64(a) => a.shape(),
            Self::I32(a) => a.shape(),
            Self::I64(a) => a.shape(),
            Self::U8(a) => a.shape(),
        }
    }

    /// Element type name, numpy style.
    pub fn dtype(&self) -> &'static str {
        match self {
            Self::F32(_) => "float32",
            Self::F64(_) => "float64",
            Self::I32(_) => "int32",
            Self::I64(_) => "int64",
            Self::U8(_) => "uint8",
        }
    }
}

/// A sample from any space.
///
/// Serializes untagged, so a `Discrete` sample is a JSON number, a
/// `Text` sample a string, and a `Dict` sample an object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A single integer (`Discrete`).
    Int(i64),
    /// An n-dimensional array (`Box`, `MultiDiscrete`, `MultiBinary`).
    Array(ArrayValue),
    /// A string (`Text`).
    Text(String),
    /// An ordered sequence of values (`Tuple`).
    Tuple(Vec<Value>),
    /// A keyed collection of values (`Dict`).
    Dict(IndexMap<String, Value>),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Array(a) => a.dtype(),
            Self::Text(_) => "text",
            Self::Tuple(_) => "tuple",
            Self::Dict(_) => "dict",
        }
    }
}

/// Conversion between a space's native value type and [`Value`].
pub trait SpaceValue: Sized {
    /// Wrap `self` as a [`Value`].
    fn into_value(self) -> Value;

    /// Extract a typed value.
    ///
    /// Returns `Err(SpaceError::ValueMismatch)` if `value` holds a
    /// different kind.
    fn from_value(value: &Value) -> Result<Self, SpaceError>;
}

fn mismatch(expected: &'static str, value: &Value) -> SpaceError {
    SpaceError::ValueMismatch {
        expected,
        reason: format!("got {}", value.kind()),
    }
}

impl SpaceValue for Value {
    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: &Value) -> Result<Self, SpaceError> {
        Ok(value.clone())
    }
}

impl SpaceValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: &Value) -> Result<Self, SpaceError> {
        match value {
            Value::Int(v) => Ok(*v),
            other => Err(mismatch("int", other)),
        }
    }
}

impl SpaceValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Result<Self, SpaceError> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            other => Err(mismatch("text", other)),
        }
    }
}

impl SpaceValue for Vec<Value> {
    fn into_value(self) -> Value {
        Value::Tuple(self)
    }

    fn from_value(value: &Value) -> Result<Self, SpaceError> {
        match value {
            Value::Tuple(v) => Ok(v.clone()),
            other => Err(mismatch("tuple", other)),
        }
    }
}

impl SpaceValue for IndexMap<String, Value> {
    fn into_value(self) -> Value {
        Value::Dict(self)
    }

    fn from_value(value: &Value) -> Result<Self, SpaceError> {
        match value {
            Value::Dict(v) => Ok(v.clone()),
            other => Err(mismatch("dict", other)),
        }
    }
}

impl<E: BoxElement> SpaceValue for Array<E> {
    fn into_value(self) -> Value {
        Value::Array(E::wrap(self))
    }

    fn from_value(value: &Value) -> Result<Self, SpaceError> {
        match value {
            Value::Array(a) => E::unwrap(a)
                .cloned()
                .ok_or_else(|| mismatch(E::DTYPE, value)),
            other => Err(mismatch(E::DTYPE, other)),
        }
    }
}
