//! Core types, errors, and seeding for gymnasium-rs.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the pieces shared by every other crate in the workspace: the error
//! taxonomy, episode bookkeeping types ([`StepResult`], [`Info`],
//! [`RenderMode`]), deterministic seeding, and the [`NativeModule`]
//! model used by the re-export namespace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod module;
pub mod seeding;
pub mod step;

pub use error::{EnvError, GymnasiumError, ModuleError, RegistryError, Result, SpaceError};
pub use module::{ModuleTable, ModuleTableBuilder, NativeModule, Symbol};
pub use seeding::{derive_seeds, np_random, Rng};
pub use step::{Info, RenderMode, StepResult};
