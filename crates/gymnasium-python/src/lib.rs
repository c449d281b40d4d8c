//! Python bindings for gymnasium-rs.
//!
//! The native extension is named `gymnasium_rs` and is re-exported by the
//! pure-Python `gymnasium_rs` package, whose `__init__.py` forwards the
//! extension's symbols, documentation and `__all__`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use pyo3::prelude::*;

mod error;
mod spaces;

/// Names exported by the extension, in `__all__` order.
const EXPORTS: [&str; 5] = ["Discrete", "Box", "MultiDiscrete", "MultiBinary", "Text"];

/// Rust implementation of the Gymnasium API for reinforcement learning.
#[pymodule]
fn gymnasium_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Fundamental spaces
    m.add_class::<spaces::Discrete>()?;
    m.add_class::<spaces::PyBox>()?;
    m.add_class::<spaces::MultiDiscrete>()?;
    m.add_class::<spaces::MultiBinary>()?;
    m.add_class::<spaces::Text>()?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("__all__", EXPORTS.to_vec())?;

    Ok(())
}
