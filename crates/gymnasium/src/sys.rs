//! Environments from the Python `gymnasium` package.
//!
//! [`PyEnv`] calls `gymnasium.make(id, **kwargs)` through pyo3 and
//! presents the result as an [`Env`] over [`Value`]s, so it erases into an
//! [`ErasedEnv`](crate::envs::ErasedEnv) and stacks with the Rust wrappers
//! like any native environment. The Python action and observation spaces
//! are translated once, at construction, into their Rust counterparts.
//!
//! Every Python exception surfaces as [`EnvError::ExecutionFailed`].
//!
//! ```no_run
//! use gymnasium::envs::Env;
//! use gymnasium::spaces::Space;
//! use gymnasium::sys::PyEnv;
//!
//! let mut env = PyEnv::make("CartPole-v1", None)?;
//! let (_obs, _info) = env.reset(Some(0), None)?;
//! loop {
//!     let action = env.action_space().clone().sample();
//!     let step = env.step(action)?;
//!     if step.done() {
//!         break;
//!     }
//! }
//! env.close()?;
//! # Ok::<(), gymnasium::types::EnvError>(())
//! ```

use std::fmt;

use gymnasium_core::{EnvError, Info, RenderMode, StepResult};
use gymnasium_env::{Env, EnvSpec, EnvSpecBuilder, Kwargs, Metadata, RenderFrame};
use gymnasium_space::{
    AnySpace, Array, ArrayValue, BoxElement, BoxSpace, DictSpace, Discrete, MultiBinary,
    MultiDiscrete, Space, SpaceError, Text, TupleSpace, Value,
};
use numpy::{Element, PyArray1, PyArrayMethods, PyReadonlyArrayDyn};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyNone, PyString, PyTuple};

/// A Python `gymnasium` environment driven from Rust.
pub struct PyEnv {
    id: String,
    env: Py<PyAny>,
    action_space: AnySpace,
    observation_space: AnySpace,
    metadata: Metadata,
    render_mode: Option<RenderMode>,
}

impl PyEnv {
    /// Create the environment with `gymnasium.make(id, **kwargs)`.
    ///
    /// Fails with [`EnvError::ExecutionFailed`] if Python cannot import
    /// `gymnasium`, `make` raises, or a space has no Rust counterpart.
    pub fn make(id: &str, kwargs: Option<&Kwargs>) -> Result<Self, EnvError> {
        let env = Python::attach(|py| -> PyResult<Self> {
            let gymnasium = py.import("gymnasium")?;
            let py_kwargs = PyDict::new(py);
            for (key, value) in kwargs.into_iter().flatten() {
                py_kwargs.set_item(key, json_to_py(py, value)?)?;
            }
            let env = gymnasium.call_method("make", (id,), Some(&py_kwargs))?;

            let np = py.import("numpy")?;
            let spaces = py.import("gymnasium.spaces")?;
            let action_space = space_from_py(&np, &spaces, &env.getattr("action_space")?)?;
            let observation_space =
                space_from_py(&np, &spaces, &env.getattr("observation_space")?)?;
            Ok(Self {
                id: id.to_string(),
                metadata: metadata_from_py(&env.getattr("metadata")?),
                render_mode: render_mode_from_py(&env.getattr("render_mode")?),
                env: env.unbind(),
                action_space,
                observation_space,
            })
        })
        .map_err(|e| failed(id, "make", e))?;
        tracing::debug!(id, render_mode = ?env.render_mode, "made python environment");
        Ok(env)
    }

    /// The id the environment was made with.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The underlying Python environment object.
    pub fn as_py(&self) -> &Py<PyAny> {
        &self.env
    }

    fn call<R>(
        &self,
        method: &str,
        f: impl for<'py> FnOnce(Python<'py>, &Bound<'py, PyAny>) -> PyResult<R>,
    ) -> Result<R, EnvError> {
        Python::attach(|py| f(py, self.env.bind(py))).map_err(|e| failed(&self.id, method, e))
    }
}

impl fmt::Debug for PyEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PyEnv")
            .field("id", &self.id)
            .field("action_space", &self.action_space)
            .field("observation_space", &self.observation_space)
            .field("render_mode", &self.render_mode)
            .finish_non_exhaustive()
    }
}

impl Env for PyEnv {
    type ActionSpace = AnySpace;
    type ObservationSpace = AnySpace;

    fn action_space(&self) -> &AnySpace {
        &self.action_space
    }

    fn observation_space(&self) -> &AnySpace {
        &self.observation_space
    }

    fn step(&mut self, action: Value) -> Result<StepResult<Value>, EnvError> {
        if !self.action_space.contains(&action) {
            return Err(EnvError::InvalidAction {
                reason: format!("{action:?} is not in {:?}", self.action_space),
            });
        }
        let observation_space = &self.observation_space;
        self.call("step", |py, env| {
            let np = py.import("numpy")?;
            let ret = env.call_method1("step", (value_to_py(py, &action)?,))?;
            let (obs, reward, terminated, truncated, info): (
                Bound<'_, PyAny>,
                Bound<'_, PyAny>,
                Bound<'_, PyAny>,
                Bound<'_, PyAny>,
                Bound<'_, PyAny>,
            ) = ret.extract()?;
            Ok(StepResult::new(
                value_from_py(&np, observation_space, &obs)?,
                reward.extract::<f64>()?,
                terminated.is_truthy()?,
                truncated.is_truthy()?,
                info_from_py(&info)?,
            ))
        })
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(Value, Info), EnvError> {
        let observation_space = &self.observation_space;
        self.call("reset", |py, env| {
            let np = py.import("numpy")?;
            let kwargs = PyDict::new(py);
            kwargs.set_item("seed", seed)?;
            if let Some(options) = options {
                let dict = PyDict::new(py);
                for (key, value) in options {
                    dict.set_item(key, json_to_py(py, value)?)?;
                }
                kwargs.set_item("options", dict)?;
            }
            let ret = env.call_method("reset", (), Some(&kwargs))?;
            let (obs, info): (Bound<'_, PyAny>, Bound<'_, PyAny>) = ret.extract()?;
            Ok((value_from_py(&np, observation_space, &obs)?, info_from_py(&info)?))
        })
    }

    fn render(&mut self) -> Result<Option<RenderFrame>, EnvError> {
        let mode = self.render_mode;
        self.call("render", |py, env| {
            let frame = env.call_method0("render")?;
            if frame.is_none() {
                return Ok(None);
            }
            Ok(match mode {
                Some(RenderMode::Ansi) => Some(RenderFrame::Ansi(frame.extract()?)),
                Some(RenderMode::RgbArray) => {
                    let np = py.import("numpy")?;
                    Some(RenderFrame::RgbArray(array_from_py::<u8>(&np, &frame)?))
                }
                Some(RenderMode::Human) | None => None,
            })
        })
    }

    fn close(&mut self) -> Result<(), EnvError> {
        self.call("close", |_, env| env.call_method0("close").map(drop))
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn render_mode(&self) -> Option<RenderMode> {
        self.render_mode
    }
}

/// A registration for the Python environment `id` under the same id.
///
/// Kwargs given to [`make`](crate::envs::make) are passed through to
/// `gymnasium.make`. Python already applies the environment's own time
/// limit, so the returned builder sets none.
pub fn python_spec(id: &str) -> EnvSpecBuilder {
    let python_id = id.to_string();
    EnvSpec::builder(id)
        .entry_point(move |kwargs: &Kwargs| PyEnv::make(&python_id, Some(kwargs)))
        .nondeterministic(true)
}

fn failed(id: &str, method: &str, err: PyErr) -> EnvError {
    EnvError::ExecutionFailed {
        reason: format!("python env '{id}' {method}: {err}"),
    }
}

fn space_err(e: SpaceError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ── Spaces ─────────────────────────────────────────────────────────

fn space_from_py(
    np: &Bound<'_, PyModule>,
    spaces: &Bound<'_, PyModule>,
    space: &Bound<'_, PyAny>,
) -> PyResult<AnySpace> {
    let is = |class: &str| -> PyResult<bool> { space.is_instance(&spaces.getattr(class)?) };

    if is("Discrete")? {
        let n: u64 = space.getattr("n")?.extract()?;
        let start: i64 = space.getattr("start")?.extract()?;
        return Ok(Discrete::new(n, start, None).map_err(space_err)?.into_any_space());
    }
    if is("Box")? {
        let dtype = space.getattr("dtype")?.str()?.to_string();
        return match dtype.as_str() {
            "float32" => box_from_py::<f32>(np, space),
            "float64" => box_from_py::<f64>(np, space),
            "int32" => box_from_py::<i32>(np, space),
            "int64" => box_from_py::<i64>(np, space),
            "uint8" => box_from_py::<u8>(np, space),
            other => Err(PyTypeError::new_err(format!("unsupported Box dtype {other}"))),
        };
    }
    if is("MultiDiscrete")? {
        let nvec = array_from_py::<i64>(np, &space.getattr("nvec")?)?;
        let start = match space.getattr("start") {
            Ok(start) => array_from_py::<i64>(np, &start)?,
            Err(_) => Array::filled(nvec.shape(), 0),
        };
        return Ok(MultiDiscrete::new(nvec, start, None).map_err(space_err)?.into_any_space());
    }
    if is("MultiBinary")? {
        let shape: Vec<usize> = space.getattr("shape")?.extract()?;
        return Ok(MultiBinary::new(&shape, None).map_err(space_err)?.into_any_space());
    }
    if is("Text")? {
        let min_length: usize = space.getattr("min_length")?.extract()?;
        let max_length: usize = space.getattr("max_length")?.extract()?;
        let charset: String = space.getattr("characters")?.extract()?;
        let text = Text::with_charset(min_length, max_length, &charset, None).map_err(space_err)?;
        return Ok(text.into_any_space());
    }
    if is("Tuple")? {
        let children = space
            .getattr("spaces")?
            .try_iter()?
            .map(|child| space_from_py(np, spaces, &child?))
            .collect::<PyResult<Vec<_>>>()?;
        return Ok(TupleSpace::new(children).map_err(space_err)?.into_any_space());
    }
    if is("Dict")? {
        let children = space.getattr("spaces")?;
        let children = children.cast::<PyDict>()?;
        let mut entries = Vec::with_capacity(children.len());
        for (key, child) in children.iter() {
            entries.push((key.extract::<String>()?, space_from_py(np, spaces, &child)?));
        }
        return Ok(DictSpace::new(entries).map_err(space_err)?.into_any_space());
    }
    Err(PyTypeError::new_err(format!(
        "no Rust counterpart for space {}",
        space.get_type().name()?
    )))
}

fn box_from_py<E: BoxElement + Element>(
    np: &Bound<'_, PyModule>,
    space: &Bound<'_, PyAny>,
) -> PyResult<AnySpace> {
    let low = array_from_py::<E>(np, &space.getattr("low")?)?;
    let high = array_from_py::<E>(np, &space.getattr("high")?)?;
    Ok(BoxSpace::independent(low, high, None).map_err(space_err)?.into_any_space())
}

// ── Values ─────────────────────────────────────────────────────────

/// Copy `obj` into an array of `E`, converting the dtype if needed.
fn array_from_py<E: BoxElement + Element>(
    np: &Bound<'_, PyModule>,
    obj: &Bound<'_, PyAny>,
) -> PyResult<Array<E>> {
    let converted = np.call_method1("asarray", (obj, E::DTYPE))?;
    let array: PyReadonlyArrayDyn<'_, E> = converted.extract()?;
    let view = array.as_array();
    Array::new(view.shape(), view.iter().copied().collect()).map_err(space_err)
}

fn value_from_py(
    np: &Bound<'_, PyModule>,
    space: &AnySpace,
    obj: &Bound<'_, PyAny>,
) -> PyResult<Value> {
    macro_rules! box_value {
        ($($t:ty),*) => {
            $(
                if space.downcast_ref::<BoxSpace<$t>>().is_some() {
                    return Ok(Value::Array(<$t>::wrap(array_from_py::<$t>(np, obj)?)));
                }
            )*
        };
    }
    box_value!(f32, f64, i32, i64, u8);

    if space.downcast_ref::<Discrete>().is_some() {
        return Ok(Value::Int(obj.extract()?));
    }
    if space.downcast_ref::<MultiDiscrete>().is_some() {
        return Ok(Value::Array(ArrayValue::I64(array_from_py(np, obj)?)));
    }
    if space.downcast_ref::<MultiBinary>().is_some() {
        return Ok(Value::Array(ArrayValue::U8(array_from_py(np, obj)?)));
    }
    if space.downcast_ref::<Text>().is_some() {
        return Ok(Value::Text(obj.extract()?));
    }
    if let Some(tuple) = space.downcast_ref::<TupleSpace>() {
        let items: Vec<Bound<'_, PyAny>> = obj.try_iter()?.collect::<PyResult<_>>()?;
        if items.len() != tuple.len() {
            return Err(PyValueError::new_err(format!(
                "expected a tuple of {}, got {}",
                tuple.len(),
                items.len()
            )));
        }
        return tuple
            .spaces()
            .iter()
            .zip(&items)
            .map(|(child, item)| value_from_py(np, child, item))
            .collect::<PyResult<Vec<_>>>()
            .map(Value::Tuple);
    }
    if let Some(dict) = space.downcast_ref::<DictSpace>() {
        let mut map = indexmap::IndexMap::with_capacity(dict.len());
        for key in dict.keys() {
            let child = dict
                .get(key)
                .ok_or_else(|| PyValueError::new_err(format!("missing subspace {key}")))?;
            map.insert(key.to_string(), value_from_py(np, child, &obj.get_item(key)?)?);
        }
        return Ok(Value::Dict(map));
    }
    Err(PyTypeError::new_err(format!("cannot convert to {space:?}")))
}

fn value_to_py<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    macro_rules! to_numpy {
        ($a:expr) => {
            PyArray1::from_slice(py, $a.data()).reshape($a.shape())?.into_any()
        };
    }
    Ok(match value {
        Value::Int(i) => i.into_pyobject(py)?.into_any(),
        Value::Text(s) => PyString::new(py, s).into_any(),
        Value::Array(ArrayValue::F32(a)) => to_numpy!(a),
        Value::Array(ArrayValue::F64(a)) => to_numpy!(a),
        Value::Array(ArrayValue::I32(a)) => to_numpy!(a),
        Value::Array(ArrayValue::I64(a)) => to_numpy!(a),
        Value::Array(ArrayValue::U8(a)) => to_numpy!(a),
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

// ── Info and metadata ──────────────────────────────────────────────

fn info_from_py(info: &Bound<'_, PyAny>) -> PyResult<Info> {
    let dict = info.cast::<PyDict>()?;
    let mut out = Info::with_capacity(dict.len());
    for (key, value) in dict.iter() {
        out.insert(key.str()?.to_string(), py_to_json(&value)?);
    }
    Ok(out)
}

/// JSON view of a Python value. numpy values go through `tolist()`;
/// anything else unrecognised becomes its `str()`.
fn py_to_json(obj: &Bound<'_, PyAny>) -> PyResult<serde_json::Value> {
    use serde_json::Value as Json;

    if obj.is_none() {
        return Ok(Json::Null);
    }
    if obj.is_instance_of::<PyBool>() {
        return Ok(Json::Bool(obj.extract()?));
    }
    if obj.is_instance_of::<PyInt>() {
        return Ok(match obj.extract::<i64>() {
            Ok(i) => Json::from(i),
            Err(_) => Json::from(obj.extract::<f64>()?),
        });
    }
    if obj.is_instance_of::<PyFloat>() {
        return Ok(Json::from(obj.extract::<f64>()?));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Json::String(obj.extract()?));
    }
    if let Ok(dict) = obj.cast::<PyDict>() {
        let mut map = serde_json::Map::with_capacity(dict.len());
        for (key, value) in dict.iter() {
            map.insert(key.str()?.to_string(), py_to_json(&value)?);
        }
        return Ok(Json::Object(map));
    }
    if obj.is_instance_of::<PyList>() || obj.is_instance_of::<PyTuple>() {
        return obj
            .try_iter()?
            .map(|item| py_to_json(&item?))
            .collect::<PyResult<Vec<_>>>()
            .map(Json::Array);
    }
    if obj.hasattr("tolist")? {
        return py_to_json(&obj.call_method0("tolist")?);
    }
    Ok(Json::String(obj.str()?.to_string()))
}

fn json_to_py<'py>(py: Python<'py>, value: &serde_json::Value) -> PyResult<Bound<'py, PyAny>> {
    use serde_json::Value as Json;

    Ok(match value {
        Json::Null => PyNone::get(py).to_owned().into_any(),
        Json::Bool(b) => PyBool::new(py, *b).to_owned().into_any(),
        Json::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.into_pyobject(py)?.into_any(),
            (None, Some(u)) => u.into_pyobject(py)?.into_any(),
            (None, None) => PyFloat::new(py, n.as_f64().unwrap_or(f64::NAN)).into_any(),
        },
        Json::String(s) => PyString::new(py, s).into_any(),
        Json::Array(items) => {
            let items = items
                .iter()
                .map(|v| json_to_py(py, v))
                .collect::<PyResult<Vec<_>>>()?;
            PyList::new(py, items)?.into_any()
        }
        Json::Object(map) => {
            let dict = PyDict::new(py);
            for (k, v) in map {
                dict.set_item(k, json_to_py(py, v)?)?;
            }
            dict.into_any()
        }
    })
}

fn metadata_from_py(metadata: &Bound<'_, PyAny>) -> Metadata {
    let field = |key: &str| metadata.get_item(key).ok().filter(|v| !v.is_none());
    let render_modes = field("render_modes")
        .and_then(|modes| modes.extract::<Vec<String>>().ok())
        .unwrap_or_default()
        .iter()
        .filter_map(|mode| mode.parse().ok())
        .collect();
    let render_fps = field("render_fps").and_then(|fps| fps.extract::<u32>().ok());
    Metadata {
        render_modes,
        render_fps,
    }
}

fn render_mode_from_py(mode: &Bound<'_, PyAny>) -> Option<RenderMode> {
    mode.extract::<String>().ok()?.parse().ok()
}
