//! Gymnasium: the reinforcement learning environment API, in Rust.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all gymnasium-rs sub-crates. For most users, adding `gymnasium` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gymnasium::prelude::*;
//!
//! let mut space = Discrete::new(4, 0, Some(7)).unwrap();
//! let action = space.sample();
//! assert!(space.contains(&action));
//!
//! let mut coords = BoxSpace::<f32>::identical(-1.0, 1.0, &[2], Some(7)).unwrap();
//! let point = coords.sample();
//! assert_eq!(point.shape(), &[2]);
//! assert_eq!(coords.flatten(&point).unwrap().len(), 2);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gymnasium-core` | Errors, step results, seeding, native module model |
//! | [`spaces`] | `gymnasium-space` | The `Space` trait, fundamental and composite spaces |
//! | [`envs`] | `gymnasium-env` | The `Env` trait, wrappers and registry |
//!
//! With the `python` feature, `sys` drives environments of the Python
//! `gymnasium` package through the same [`envs::Env`] trait.
//!
//! # Native namespace
//!
//! [`native_module()`] describes the symbols this crate publishes as the
//! `gymnasium_rs` native module. [`namespace()`] forwards them once per
//! process through a [`shim::Namespace`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod native;
pub mod shim;
#[cfg(feature = "python")]
pub mod sys;

use std::sync::{Arc, OnceLock};

pub use native::native_module;

/// Core types, errors and seeding (`gymnasium-core`).
///
/// Contains the error taxonomy ([`types::GymnasiumError`] and its
/// per-subsystem parts), [`types::StepResult`], [`types::Info`] and the
/// [`types::NativeModule`] model.
pub use gymnasium_core as types;

/// Action and observation spaces (`gymnasium-space`).
///
/// Provides the [`spaces::Space`] trait, [`spaces::Discrete`],
/// [`spaces::BoxSpace`], [`spaces::MultiDiscrete`],
/// [`spaces::MultiBinary`], [`spaces::Text`] and the composites
/// [`spaces::TupleSpace`] and [`spaces::DictSpace`].
pub use gymnasium_space as spaces;

/// Environments, wrappers and registry (`gymnasium-env`).
///
/// The [`envs::Env`] trait is the main extension point. Registered
/// environments are built with [`envs::make`].
pub use gymnasium_env as envs;

/// Common imports for typical gymnasium-rs usage.
///
/// ```rust
/// use gymnasium::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gymnasium_core::{Info, RenderMode, StepResult};

    // Errors
    pub use gymnasium_core::{EnvError, GymnasiumError, RegistryError, SpaceError};

    // Spaces
    pub use gymnasium_space::{
        AnySpace, Array, BoxSpace, DictSpace, Discrete, MultiBinary, MultiDiscrete, Space,
        SpaceValue, Text, TupleSpace, Value,
    };

    // Environments
    pub use gymnasium_env::{
        make, register, Env, EnvSpec, ErasedEnv, Kwargs, OrderEnforcing, RecordEpisodeStatistics,
        TimeLimit,
    };
}

static NAMESPACE: OnceLock<Result<shim::Namespace, types::ModuleError>> = OnceLock::new();

/// The process-wide namespace forwarded from [`native_module()`].
///
/// Forwarding runs on the first call. Later calls return the same
/// namespace, or the same error if forwarding failed.
pub fn namespace() -> Result<&'static shim::Namespace, types::ModuleError> {
    NAMESPACE
        .get_or_init(|| {
            let ns = shim::Namespace::load(|| {
                native_module().map(|m| Arc::new(m) as Arc<dyn types::NativeModule>)
            });
            match &ns {
                Ok(ns) => tracing::debug!(
                    module = ns.name(),
                    symbols = ns.len(),
                    "namespace initialized"
                ),
                Err(error) => tracing::warn!(%error, "namespace initialization failed"),
            }
            ns
        })
        .as_ref()
        .map_err(Clone::clone)
}
