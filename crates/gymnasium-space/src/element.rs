//! Element types supported by [`BoxSpace`](crate::BoxSpace).
//!
//! Float elements may have infinite bounds. Sampling then follows the
//! usual Gymnasium rules: an exponential tail off a single finite bound,
//! a standard normal when both bounds are infinite. Normal samples use
//! the Box-Muller transform to avoid the `rand_distr` dependency.

use gymnasium_core::Rng;
use rand::Rng as _;
use serde::Serialize;
use std::fmt;

use crate::array::Array;
use crate::value::ArrayValue;

/// A scalar that can live in a [`BoxSpace`](crate::BoxSpace).
pub trait BoxElement: Copy + PartialOrd + fmt::Debug + Send + Sync + Serialize + 'static {
    /// numpy-style dtype name.
    const DTYPE: &'static str;

    /// Wrap an array of this element type.
    fn wrap(array: Array<Self>) -> ArrayValue;

    /// Borrow the array if `value` holds this element type.
    fn unwrap(value: &ArrayValue) -> Option<&Array<Self>>;

    /// `true` for NaN. Always `false` for integers.
    fn is_nan(self) -> bool;

    /// `true` if the value is a finite bound. Always `true` for integers.
    fn is_finite(self) -> bool;

    /// Draw a value in `[low, high]`.
    ///
    /// Infinite bounds are only possible for floats and select the
    /// unbounded sampling rules described in the module docs.
    fn sample_between(low: Self, high: Self, rng: &mut Rng) -> Self;

    /// Widen to `f64` for flattening.
    fn to_f64(self) -> f64;

    /// Narrow from `f64` when unflattening.
    fn from_f64(v: f64) -> Self;
}

/// A standard normal sample via Box-Muller.
fn standard_normal(rng: &mut Rng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// A unit-rate exponential sample.
fn standard_exponential(rng: &mut Rng) -> f64 {
    let u: f64 = rng.gen();
    -(1.0 - u).ln()
}

/// Sample `[low, high]` as f64, handling infinite bounds.
///
/// The convex combination never computes `high - low`, which overflows
/// for bounds such as `[f64::MIN, f64::MAX]`.
fn sample_float(low: f64, high: f64, rng: &mut Rng) -> f64 {
    match (low.is_finite(), high.is_finite()) {
        (true, true) => {
            let u: f64 = rng.gen();
            (low * (1.0 - u) + high * u).clamp(low, high)
        }
        (true, false) => low + standard_exponential(rng),
        (false, true) => high - standard_exponential(rng),
        (false, false) => standard_normal(rng),
    }
}

macro_rules! array_wrapping {
    ($variant:ident) => {
        fn wrap(array: Array<Self>) -> ArrayValue {
            ArrayValue::$variant(array)
        }

        fn unwrap(value: &ArrayValue) -> Option<&Array<Self>> {
            match value {
                ArrayValue::$variant(a) => Some(a),
                _ => None,
            }
        }
    };
}

macro_rules! float_element {
    ($t:ty, $variant:ident, $dtype:literal) => {
        impl BoxElement for $t {
            const DTYPE: &'static str = $dtype;

            array_wrapping!($variant);

            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            fn sample_between(low: Self, high: Self, rng: &mut Rng) -> Self {
                let v = sample_float(low as f64, high as f64, rng) as $t;
                // Narrowing to f32 may round just past a finite bound.
                v.clamp(low, high)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(v: f64) -> Self {
                v as $t
            }
        }
    };
}

macro_rules! int_element {
    ($t:ty, $variant:ident, $dtype:literal) => {
        impl BoxElement for $t {
            const DTYPE: &'static str = $dtype;

            array_wrapping!($variant);

            fn is_nan(self) -> bool {
                false
            }

            fn is_finite(self) -> bool {
                true
            }

            fn sample_between(low: Self, high: Self, rng: &mut Rng) -> Self {
                rng.gen_range(low..=high)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(v: f64) -> Self {
                v.round() as $t
            }
        }
    };
}

float_element!(f32, F32, "float32");
float_element!(f64, F64, "float64");
int_element!(i32, I32, "int32");
int_element!(i64, I64, "int64");
int_element!(u8, U8, "uint8");
