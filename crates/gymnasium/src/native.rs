//! The native module table this crate publishes.
//!
//! Mirrors what the Python extension exposes: one factory per
//! fundamental space, plus the registry entry points.

use gymnasium_core::{ModuleError, ModuleTable, RegistryError, Symbol};
use gymnasium_env::{EnvSpec, ErasedEnv, Kwargs};
use gymnasium_space::SpaceFactory;

/// Name of the native module.
pub const MODULE_NAME: &str = "gymnasium_rs";

/// Documentation string of the native module.
pub const MODULE_DOC: &str = "Rust implementation of the Gymnasium API for reinforcement learning.";

/// Signature of the exported `make` symbol.
pub type MakeFn = fn(&str, Option<&Kwargs>) -> Result<ErasedEnv, RegistryError>;

/// Signature of the exported `register` symbol.
pub type RegisterFn = fn(EnvSpec);

/// Signature of the exported `spec` symbol.
pub type SpecFn = fn(&str) -> Result<std::sync::Arc<EnvSpec>, RegistryError>;

/// Build the native module table.
///
/// Exports, in order: every built-in [`SpaceFactory`] under its space
/// name, then `make`, `register` and `spec`. `__version__` is defined
/// but not exported.
pub fn native_module() -> Result<ModuleTable, ModuleError> {
    let mut builder = ModuleTable::builder(MODULE_NAME).doc(MODULE_DOC);
    for factory in SpaceFactory::builtin() {
        builder = builder.export(factory.name(), Symbol::new(*factory));
    }
    builder
        .export("make", Symbol::new(gymnasium_env::make as MakeFn))
        .export("register", Symbol::new(gymnasium_env::register as RegisterFn))
        .export("spec", Symbol::new(gymnasium_env::spec as SpecFn))
        .attribute("__version__", Symbol::new(env!("CARGO_PKG_VERSION")))
        .build()
}
