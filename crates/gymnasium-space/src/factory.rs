//! Named space constructors driven by JSON parameters.
//!
//! Each fundamental space has a [`SpaceFactory`] that builds an
//! [`AnySpace`] from a `serde_json::Value`. The native module table
//! exports these, and the command-line tool resolves them by name.

use gymnasium_core::SpaceError;
use serde::Deserialize;

use crate::array::Array;
use crate::element::BoxElement;
use crate::space::{AnySpace, Space};
use crate::{BoxSpace, Discrete, MultiBinary, MultiDiscrete, Text};

type BuildFn = fn(&serde_json::Value, Option<u64>) -> Result<AnySpace, SpaceError>;

/// A named constructor for one kind of space.
#[derive(Clone, Copy)]
pub struct SpaceFactory {
    name: &'static str,
    summary: &'static str,
    build: BuildFn,
}

impl std::fmt::Debug for SpaceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpaceFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static BUILTIN: [SpaceFactory; 5] = [
    SpaceFactory {
        name: "Discrete",
        summary: r#"{"n": 3, "start": 0}"#,
        build: build_discrete,
    },
    SpaceFactory {
        name: "Box",
        summary: r#"{"low": -1.0, "high": 1.0, "shape": [3], "dtype": "float32"}"#,
        build: build_box,
    },
    SpaceFactory {
        name: "MultiDiscrete",
        summary: r#"{"nvec": [5, 2, 2], "start": [0, 0, 0]}"#,
        build: build_multi_discrete,
    },
    SpaceFactory {
        name: "MultiBinary",
        summary: r#"{"n": [2, 3]}"#,
        build: build_multi_binary,
    },
    SpaceFactory {
        name: "Text",
        summary: r#"{"min_length": 1, "max_length": 8, "charset": "abc"}"#,
        build: build_text,
    },
];

impl SpaceFactory {
    /// Factories for every fundamental space.
    pub fn builtin() -> &'static [SpaceFactory] {
        &BUILTIN
    }

    /// Look up a built-in factory by space name.
    pub fn find(name: &str) -> Option<&'static SpaceFactory> {
        BUILTIN.iter().find(|f| f.name == name)
    }

    /// The space name (`"Discrete"`, `"Box"`, ...).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// An example parameter object.
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// Build a space from JSON parameters.
    ///
    /// Returns `Err(SpaceError::InvalidParameters)` if the parameters
    /// do not deserialize, or the constructor's own error if they
    /// describe an invalid space.
    ///
    /// ```
    /// use gymnasium_space::{Space, SpaceFactory};
    ///
    /// let factory = SpaceFactory::find("Discrete").unwrap();
    /// let space = factory.build(&serde_json::json!({"n": 4, "start": 1}), Some(0)).unwrap();
    /// assert_eq!(format!("{space:?}"), "Discrete(4, start=1)");
    /// ```
    pub fn build(
        &self,
        params: &serde_json::Value,
        seed: Option<u64>,
    ) -> Result<AnySpace, SpaceError> {
        (self.build)(params, seed)
    }
}

fn parse<'a, T: Deserialize<'a>>(
    space: &'static str,
    params: &'a serde_json::Value,
) -> Result<T, SpaceError> {
    T::deserialize(params).map_err(|e| SpaceError::InvalidParameters {
        space,
        reason: e.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DiscreteParams {
    n: u64,
    #[serde(default)]
    start: i64,
}

fn build_discrete(params: &serde_json::Value, seed: Option<u64>) -> Result<AnySpace, SpaceError> {
    let p: DiscreteParams = parse("Discrete", params)?;
    Ok(Discrete::new(p.n, p.start, seed)?.into_any_space())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoundParam {
    Scalar(f64),
    Array(Vec<f64>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoxParams {
    low: BoundParam,
    high: BoundParam,
    shape: Option<Vec<usize>>,
    #[serde(default = "default_dtype")]
    dtype: String,
}

fn default_dtype() -> String {
    "float32".into()
}

fn build_box(params: &serde_json::Value, seed: Option<u64>) -> Result<AnySpace, SpaceError> {
    let p: BoxParams = parse("Box", params)?;
    match p.dtype.as_str() {
        "float32" => typed_box::<f32>(&p, seed),
        "float64" => typed_box::<f64>(&p, seed),
        "int32" => typed_box::<i32>(&p, seed),
        "int64" => typed_box::<i64>(&p, seed),
        "uint8" => typed_box::<u8>(&p, seed),
        other => Err(SpaceError::InvalidParameters {
            space: "Box",
            reason: format!("unsupported dtype {other:?}"),
        }),
    }
}

/// Scalar bounds are broadcast to the shape of array bounds.
fn typed_box<E: BoxElement>(p: &BoxParams, seed: Option<u64>) -> Result<AnySpace, SpaceError> {
    let cast = |values: &[f64]| values.iter().map(|v| E::from_f64(*v)).collect::<Vec<E>>();
    let to_array = |values: &[f64]| match &p.shape {
        Some(shape) => Array::new(shape, cast(values)),
        None => Ok(Array::from_vec(cast(values))),
    };
    let space = match (&p.low, &p.high) {
        (BoundParam::Scalar(low), BoundParam::Scalar(high)) => {
            let shape = p.shape.as_deref().ok_or_else(|| SpaceError::InvalidParameters {
                space: "Box",
                reason: "\"shape\" is required when both bounds are scalars".into(),
            })?;
            BoxSpace::identical(E::from_f64(*low), E::from_f64(*high), shape, seed)?
        }
        (BoundParam::Array(low), BoundParam::Array(high)) => {
            BoxSpace::independent(to_array(low)?, to_array(high)?, seed)?
        }
        (BoundParam::Scalar(low), BoundParam::Array(high)) => {
            let high = to_array(high)?;
            let low = Array::filled(high.shape(), E::from_f64(*low));
            BoxSpace::independent(low, high, seed)?
        }
        (BoundParam::Array(low), BoundParam::Scalar(high)) => {
            let low = to_array(low)?;
            let high = Array::filled(low.shape(), E::from_f64(*high));
            BoxSpace::independent(low, high, seed)?
        }
    };
    Ok(space.into_any_space())
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MultiDiscreteParams {
    nvec: Vec<i64>,
    start: Option<Vec<i64>>,
}

fn build_multi_discrete(
    params: &serde_json::Value,
    seed: Option<u64>,
) -> Result<AnySpace, SpaceError> {
    let p: MultiDiscreteParams = parse("MultiDiscrete", params)?;
    let start = p.start.unwrap_or_else(|| vec![0; p.nvec.len()]);
    Ok(MultiDiscrete::new(Array::from_vec(p.nvec), Array::from_vec(start), seed)?.into_any_space())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShapeParam {
    Len(usize),
    Shape(Vec<usize>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MultiBinaryParams {
    n: ShapeParam,
}

fn build_multi_binary(
    params: &serde_json::Value,
    seed: Option<u64>,
) -> Result<AnySpace, SpaceError> {
    let p: MultiBinaryParams = parse("MultiBinary", params)?;
    let shape = match p.n {
        ShapeParam::Len(n) => vec![n],
        ShapeParam::Shape(shape) => shape,
    };
    Ok(MultiBinary::new(&shape, seed)?.into_any_space())
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TextParams {
    #[serde(default = "default_min_length")]
    min_length: usize,
    max_length: usize,
    charset: Option<String>,
}

fn default_min_length() -> usize {
    1
}

fn build_text(params: &serde_json::Value, seed: Option<u64>) -> Result<AnySpace, SpaceError> {
    let p: TextParams = parse("Text", params)?;
    let space = match p.charset {
        Some(charset) => Text::with_charset(p.min_length, p.max_length, &charset, seed)?,
        None => Text::new(p.min_length, p.max_length, seed)?,
    };
    Ok(space.into_any_space())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ArrayValue, Value};
    use serde_json::json;

    fn build(name: &str, params: serde_json::Value) -> Result<AnySpace, SpaceError> {
        SpaceFactory::find(name).unwrap().build(&params, Some(7))
    }

    #[test]
    fn every_builtin_summary_builds() {
        for factory in SpaceFactory::builtin() {
            let params: serde_json::Value = serde_json::from_str(factory.summary()).unwrap();
            let mut space = factory.build(&params, Some(1)).unwrap();
            assert_eq!(space.name(), factory.name());
            let sample = space.sample();
            assert!(space.contains(&sample), "{}", factory.name());
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(SpaceFactory::find("Graph").is_none());
    }

    #[test]
    fn bad_parameters_are_reported() {
        let err = build("Discrete", json!({"n": "three"})).unwrap_err();
        assert!(matches!(err, SpaceError::InvalidParameters { space: "Discrete", .. }));

        let err = build("Discrete", json!({"n": 3, "m": 1})).unwrap_err();
        assert!(matches!(err, SpaceError::InvalidParameters { .. }));
    }

    #[test]
    fn invalid_space_errors_pass_through() {
        assert!(matches!(
            build("Discrete", json!({"n": 0})),
            Err(SpaceError::Empty { .. })
        ));
        assert!(matches!(
            build("Text", json!({"min_length": 4, "max_length": 2})),
            Err(SpaceError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn box_dtypes() {
        let mut space = build(
            "Box",
            json!({"low": 0, "high": 255, "shape": [2], "dtype": "uint8"}),
        )
        .unwrap();
        assert!(matches!(space.sample(), Value::Array(ArrayValue::U8(_))));

        let err = build("Box", json!({"low": 0, "high": 1, "shape": [2], "dtype": "complex64"}));
        assert!(matches!(err, Err(SpaceError::InvalidParameters { .. })));
    }

    #[test]
    fn box_scalar_bounds_need_shape() {
        assert!(matches!(
            build("Box", json!({"low": 0.0, "high": 1.0})),
            Err(SpaceError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn box_scalar_broadcasts_against_array() {
        let space = build(
            "Box",
            json!({"low": 0.0, "high": [1.0, 2.0, 3.0, 4.0], "shape": [2, 2]}),
        )
        .unwrap();
        assert_eq!(space.shape(), Some(&[2, 2][..]));
        let boxed = space.downcast_ref::<BoxSpace<f32>>().unwrap();
        assert!(boxed.contains(&Array::new(&[2, 2], vec![0.0, 2.0, 3.0, 0.5]).unwrap()));
    }

    #[test]
    fn multi_binary_accepts_len_or_shape() {
        assert_eq!(build("MultiBinary", json!({"n": 4})).unwrap().shape(), Some(&[4][..]));
        assert_eq!(
            build("MultiBinary", json!({"n": [2, 3]})).unwrap().shape(),
            Some(&[2, 3][..])
        );
    }

    #[test]
    fn seed_makes_samples_reproducible() {
        let mut a = build("MultiDiscrete", json!({"nvec": [4, 4, 4]})).unwrap();
        let mut b = build("MultiDiscrete", json!({"nvec": [4, 4, 4]})).unwrap();
        assert_eq!(a.sample(), b.sample());
    }
}
