//! Space classes: Discrete, Box, MultiDiscrete, MultiBinary, Text.
//!
//! Samples are returned as Python ints, strings or numpy arrays. The
//! classes hold the Rust space directly; seeding and sampling never
//! call back into Python.

use gymnasium_core::SpaceError;
use gymnasium_space::{
    AnySpace, Array, ArrayValue, BoxElement, BoxSpace, Discrete as RsDiscrete,
    MultiBinary as RsMultiBinary, MultiDiscrete as RsMultiDiscrete, Space, SpaceValue,
    Text as RsText, Value,
};
use numpy::{PyArray1, PyArrayMethods, PyReadonlyArrayDyn};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyString, PyTuple};

use crate::error::space_error;

// ── Conversions ────────────────────────────────────────────────────

/// Convert a sample into a Python object.
pub(crate) fn value_to_py<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    Ok(match value {
        Value::Int(i) => i.into_pyobject(py)?.into_any(),
        Value::Text(s) => PyString::new(py, s).into_any(),
        Value::Array(a) => array_to_py(py, a)?,
        Value::Tuple(items) => {
            let items = items
                .iter()
                .map(|v| value_to_py(py, v))
                .collect::<PyResult<Vec<_>>>()?;
            PyTuple::new(py, items)?.into_any()
        }
        Value::Dict(map) => {
            let dict = PyDict::new(py);
            for (k, v) in map {
                dict.set_item(k, value_to_py(py, v)?)?;
            }
            dict.into_any()
        }
    })
}

fn array_to_py<'py>(py: Python<'py>, value: &ArrayValue) -> PyResult<Bound<'py, PyAny>> {
    macro_rules! to_numpy {
        ($a:expr) => {
            PyArray1::from_slice(py, $a.data()).reshape($a.shape())?.into_any()
        };
    }
    Ok(match value {
        ArrayValue::F32(a) => to_numpy!(a),
        ArrayValue::F64(a) => to_numpy!(a),
        ArrayValue::I32(a) => to_numpy!(a),
        ArrayValue::I64(a) => to_numpy!(a),
        ArrayValue::U8(a) => to_numpy!(a),
    })
}

// A numpy array of the exact dtype, else any 1-D sequence.
macro_rules! extract_array {
    ($obj:expr, $t:ty) => {
        match $obj.extract::<PyReadonlyArrayDyn<'_, $t>>() {
            Ok(a) => {
                let view = a.as_array();
                Array::<$t>::new(view.shape(), view.iter().copied().collect()).ok()
            }
            Err(_) => $obj.extract::<Vec<$t>>().ok().map(Array::from_vec),
        }
    };
}

fn shape_tuple<'py>(
    py: Python<'py>,
    shape: Option<&[usize]>,
) -> PyResult<Option<Bound<'py, PyTuple>>> {
    shape.map(|s| PyTuple::new(py, s)).transpose()
}

/// Draw from an erased space and convert the sample.
fn sample_any<'py>(py: Python<'py>, space: &mut AnySpace) -> PyResult<Bound<'py, PyAny>> {
    let value = space.sample();
    value_to_py(py, &value)
}

// ── Discrete ───────────────────────────────────────────────────────

/// A finite range of integers `{start, ..., start + n - 1}`.
#[pyclass(module = "gymnasium_rs")]
pub(crate) struct Discrete {
    space: RsDiscrete,
}

#[pymethods]
impl Discrete {
    /// Create a discrete space.
    ///
    /// Args:
    ///     n: Number of elements (positive).
    ///     seed: Optional seed for the sampler.
    ///     start: Smallest element.
    #[new]
    #[pyo3(signature = (n, seed=None, start=0))]
    fn new(n: u64, seed: Option<u64>, start: i64) -> PyResult<Self> {
        Ok(Self {
            space: RsDiscrete::new(n, start, seed).map_err(space_error)?,
        })
    }

    /// Number of elements.
    #[getter]
    fn n(&self) -> u64 {
        self.space.n()
    }

    /// Smallest element.
    #[getter]
    fn start(&self) -> i64 {
        self.space.start()
    }

    /// Shape of a sample: the empty tuple.
    #[getter]
    fn shape<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyTuple>>> {
        shape_tuple(py, self.space.shape())
    }

    /// Draw a sample. `mask` selects the allowed elements (non-zero = allowed).
    #[pyo3(signature = (mask=None))]
    fn sample(&mut self, mask: Option<Vec<i8>>) -> PyResult<i64> {
        match mask {
            None => Ok(self.space.sample()),
            Some(mask) => {
                let mask: Vec<bool> = mask.iter().map(|m| *m != 0).collect();
                self.space.sample_masked(&mask).map_err(space_error)
            }
        }
    }

    /// `True` if `x` is an element of the space.
    fn contains(&self, x: &Bound<'_, PyAny>) -> bool {
        x.extract::<i64>().is_ok_and(|v| self.space.contains(&v))
    }

    fn __contains__(&self, x: &Bound<'_, PyAny>) -> bool {
        self.contains(x)
    }

    /// Reseed the sampler. Returns the seed used.
    #[pyo3(signature = (seed=None))]
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        self.space.seed(seed)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.space)
    }
}

// ── Box ────────────────────────────────────────────────────────────

/// A scalar bound or one bound per element.
#[derive(FromPyObject)]
enum BoundArg {
    Scalar(f64),
    Array(Vec<f64>),
}

fn typed_box<E: BoxElement>(
    low: &BoundArg,
    high: &BoundArg,
    shape: Option<&[usize]>,
    seed: Option<u64>,
) -> Result<AnySpace, SpaceError> {
    let to_array = |values: &[f64]| {
        let data: Vec<E> = values.iter().map(|v| E::from_f64(*v)).collect();
        match shape {
            Some(shape) => Array::new(shape, data),
            None => Ok(Array::from_vec(data)),
        }
    };
    let space = match (low, high) {
        (BoundArg::Scalar(low), BoundArg::Scalar(high)) => {
            let shape = shape.ok_or_else(|| SpaceError::InvalidParameters {
                space: "Box",
                reason: "shape is required when both bounds are scalars".into(),
            })?;
            BoxSpace::identical(E::from_f64(*low), E::from_f64(*high), shape, seed)?
        }
        (BoundArg::Array(low), BoundArg::Array(high)) => {
            BoxSpace::independent(to_array(low)?, to_array(high)?, seed)?
        }
        (BoundArg::Scalar(low), BoundArg::Array(high)) => {
            let high = to_array(high)?;
            BoxSpace::independent(Array::filled(high.shape(), E::from_f64(*low)), high, seed)?
        }
        (BoundArg::Array(low), BoundArg::Scalar(high)) => {
            let low = to_array(low)?;
            let high = Array::filled(low.shape(), E::from_f64(*high));
            BoxSpace::independent(low, high, seed)?
        }
    };
    Ok(space.into_any_space())
}

/// A box in R^n, possibly unbounded, with a fixed element dtype.
#[pyclass(module = "gymnasium_rs", name = "Box")]
pub(crate) struct PyBox {
    space: AnySpace,
    dtype: &'static str,
}

#[pymethods]
impl PyBox {
    /// Create a box.
    ///
    /// Args:
    ///     low: Lower bound, a float or a list with one entry per element.
    ///     high: Upper bound, same forms as `low`.
    ///     shape: Required when both bounds are floats.
    ///     dtype: One of float32, float64, int32, int64, uint8.
    ///     seed: Optional seed for the sampler.
    #[new]
    #[pyo3(signature = (low, high, shape=None, dtype="float32", seed=None))]
    fn new(
        low: BoundArg,
        high: BoundArg,
        shape: Option<Vec<usize>>,
        dtype: &str,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let shape = shape.as_deref();
        let (space, dtype) = match dtype {
            "float32" => (typed_box::<f32>(&low, &high, shape, seed), "float32"),
            "float64" => (typed_box::<f64>(&low, &high, shape, seed), "float64"),
            "int32" => (typed_box::<i32>(&low, &high, shape, seed), "int32"),
            "int64" => (typed_box::<i64>(&low, &high, shape, seed), "int64"),
            "uint8" => (typed_box::<u8>(&low, &high, shape, seed), "uint8"),
            other => {
                return Err(space_error(SpaceError::InvalidParameters {
                    space: "Box",
                    reason: format!("unsupported dtype {other:?}"),
                }))
            }
        };
        Ok(Self {
            space: space.map_err(space_error)?,
            dtype,
        })
    }

    /// Element dtype name.
    #[getter]
    fn dtype(&self) -> &'static str {
        self.dtype
    }

    /// Shape of a sample.
    #[getter]
    fn shape<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyTuple>>> {
        shape_tuple(py, self.space.shape())
    }

    /// Draw a sample as a numpy array.
    fn sample<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        sample_any(py, &mut self.space)
    }

    /// `True` if `x` has the box's shape and lies within its bounds.
    fn contains(&self, x: &Bound<'_, PyAny>) -> bool {
        let value = match self.dtype {
            "float32" => extract_array!(x, f32).map(ArrayValue::F32),
            "float64" => extract_array!(x, f64).map(ArrayValue::F64),
            "int32" => extract_array!(x, i32).map(ArrayValue::I32),
            "int64" => extract_array!(x, i64).map(ArrayValue::I64),
            _ => extract_array!(x, u8).map(ArrayValue::U8),
        };
        value.is_some_and(|v| self.space.contains(&Value::Array(v)))
    }

    fn __contains__(&self, x: &Bound<'_, PyAny>) -> bool {
        self.contains(x)
    }

    /// Reseed the sampler. Returns the seed used.
    #[pyo3(signature = (seed=None))]
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        self.space.seed(seed)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.space)
    }
}

// ── MultiDiscrete ──────────────────────────────────────────────────

/// Several independent discrete choices.
#[pyclass(module = "gymnasium_rs")]
pub(crate) struct MultiDiscrete {
    space: RsMultiDiscrete,
}

#[pymethods]
impl MultiDiscrete {
    /// Create a multi-discrete space.
    ///
    /// Args:
    ///     nvec: Number of choices per position.
    ///     seed: Optional seed for the sampler.
    ///     start: Smallest element per position (default all zero).
    #[new]
    #[pyo3(signature = (nvec, seed=None, start=None))]
    fn new(nvec: Vec<i64>, seed: Option<u64>, start: Option<Vec<i64>>) -> PyResult<Self> {
        let start = start.unwrap_or_else(|| vec![0; nvec.len()]);
        Ok(Self {
            space: RsMultiDiscrete::new(Array::from_vec(nvec), Array::from_vec(start), seed)
                .map_err(space_error)?,
        })
    }

    /// Number of choices per position.
    #[getter]
    fn nvec(&self) -> Vec<i64> {
        self.space.nvec().data().to_vec()
    }

    /// Shape of a sample.
    #[getter]
    fn shape<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyTuple>>> {
        shape_tuple(py, self.space.shape())
    }

    /// Draw a sample as an int64 numpy array.
    fn sample<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        value_to_py(py, &self.space.sample().into_value())
    }

    /// `True` if every position of `x` is within range.
    fn contains(&self, x: &Bound<'_, PyAny>) -> bool {
        extract_array!(x, i64).is_some_and(|v| self.space.contains(&v))
    }

    fn __contains__(&self, x: &Bound<'_, PyAny>) -> bool {
        self.contains(x)
    }

    /// Reseed the sampler. Returns the seed used.
    #[pyo3(signature = (seed=None))]
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        self.space.seed(seed)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.space)
    }
}

// ── MultiBinary ────────────────────────────────────────────────────

/// A length or a full shape.
#[derive(FromPyObject)]
enum ShapeArg {
    Len(usize),
    Shape(Vec<usize>),
}

/// Arrays of bits.
#[pyclass(module = "gymnasium_rs")]
pub(crate) struct MultiBinary {
    space: RsMultiBinary,
}

#[pymethods]
impl MultiBinary {
    /// Create a multi-binary space.
    ///
    /// Args:
    ///     n: Number of bits, or the shape of the bit array.
    ///     seed: Optional seed for the sampler.
    #[new]
    #[pyo3(signature = (n, seed=None))]
    fn new(n: ShapeArg, seed: Option<u64>) -> PyResult<Self> {
        let shape = match n {
            ShapeArg::Len(n) => vec![n],
            ShapeArg::Shape(shape) => shape,
        };
        Ok(Self {
            space: RsMultiBinary::new(&shape, seed).map_err(space_error)?,
        })
    }

    /// Shape of a sample.
    #[getter]
    fn shape<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyTuple>>> {
        shape_tuple(py, self.space.shape())
    }

    /// Draw a sample as a uint8 numpy array of zeros and ones.
    fn sample<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        value_to_py(py, &self.space.sample().into_value())
    }

    /// `True` if `x` has the right shape and holds only zeros and ones.
    fn contains(&self, x: &Bound<'_, PyAny>) -> bool {
        extract_array!(x, u8).is_some_and(|v| self.space.contains(&v))
    }

    fn __contains__(&self, x: &Bound<'_, PyAny>) -> bool {
        self.contains(x)
    }

    /// Reseed the sampler. Returns the seed used.
    #[pyo3(signature = (seed=None))]
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        self.space.seed(seed)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.space)
    }
}

// ── Text ───────────────────────────────────────────────────────────

/// Strings over a character set.
#[pyclass(module = "gymnasium_rs")]
pub(crate) struct Text {
    space: RsText,
}

#[pymethods]
impl Text {
    /// Create a text space.
    ///
    /// Args:
    ///     max_length: Longest string, in characters.
    ///     min_length: Shortest string, at least 1.
    ///     charset: Allowed characters (default: ASCII letters and digits).
    ///     seed: Optional seed for the sampler.
    #[new]
    #[pyo3(signature = (max_length, min_length=1, charset=None, seed=None))]
    fn new(
        max_length: usize,
        min_length: usize,
        charset: Option<&str>,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let space = match charset {
            Some(charset) => RsText::with_charset(min_length, max_length, charset, seed),
            None => RsText::new(min_length, max_length, seed),
        };
        Ok(Self {
            space: space.map_err(space_error)?,
        })
    }

    #[getter]
    fn min_length(&self) -> usize {
        self.space.min_length()
    }

    #[getter]
    fn max_length(&self) -> usize {
        self.space.max_length()
    }

    #[getter]
    fn charset(&self) -> String {
        self.space.charset().collect()
    }

    /// Always `None`: text samples have no fixed shape.
    #[getter]
    fn shape(&self) -> Option<()> {
        None
    }

    /// Draw a sample.
    fn sample(&mut self) -> String {
        self.space.sample()
    }

    /// `True` if `x` is a string of allowed length over the charset.
    fn contains(&self, x: &Bound<'_, PyAny>) -> bool {
        x.extract::<String>().is_ok_and(|s| self.space.contains(&s))
    }

    fn __contains__(&self, x: &Bound<'_, PyAny>) -> bool {
        self.contains(x)
    }

    /// Reseed the sampler. Returns the seed used.
    #[pyo3(signature = (seed=None))]
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        self.space.seed(seed)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.space)
    }
}
