//! SpaceError -> Python exception mapping.

use gymnasium_core::SpaceError;
use pyo3::exceptions::{PyOverflowError, PyTypeError, PyValueError};
use pyo3::PyErr;

/// Convert a space error into a typed Python exception.
pub(crate) fn space_error(e: SpaceError) -> PyErr {
    let msg = format!("gymnasium error: {e}");
    match e {
        // Parameters that do not fit the element type → OverflowError
        SpaceError::Overflow { .. } => PyOverflowError::new_err(msg),

        // Asking for a representation the space does not have → TypeError
        SpaceError::NotFlattenable { .. } | SpaceError::ValueMismatch { .. } => {
            PyTypeError::new_err(msg)
        }

        // Everything else is a bad argument → ValueError
        SpaceError::InvalidBounds { .. }
        | SpaceError::Empty { .. }
        | SpaceError::ShapeMismatch { .. }
        | SpaceError::InvalidMask { .. }
        | SpaceError::InvalidParameters { .. } => PyValueError::new_err(msg),
    }
}
