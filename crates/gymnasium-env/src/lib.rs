//! Environments for gymnasium-rs.
//!
//! Provides the [`Env`] trait that every environment implements, its
//! type-erased form [`ErasedEnv`], the standard wrappers, and the
//! id-based [`Registry`].
//!
//! # Wrappers
//!
//! - [`OrderEnforcing`]: `step`/`render` before `reset` is an error
//! - [`TimeLimit`]: truncates episodes after a step budget
//! - [`RecordEpisodeStatistics`]: reports return, length and time of
//!   finished episodes in `info["episode"]`
//!
//! # Registry
//!
//! Environments are registered under ids of the form
//! `[namespace/]name[-vN]` ([`EnvId`]) with an [`EnvSpec`]. [`make`]
//! builds a registered environment with the wrappers its spec asks for.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod env;
pub mod episode_statistics;
pub mod erased;
pub mod id;
pub mod order_enforcing;
pub mod registry;
pub mod spec;
pub mod time_limit;

#[cfg(test)]
pub(crate) mod mock;

pub use env::{ActionOf, Env, Metadata, ObservationOf, RenderFrame};
pub use episode_statistics::RecordEpisodeStatistics;
pub use erased::{DynEnv, ErasedEnv};
pub use gymnasium_core::{EnvError, Info, RegistryError, RenderMode, StepResult};
pub use id::EnvId;
pub use order_enforcing::OrderEnforcing;
pub use registry::{ids, make, register, spec, with_registry, Registry};
pub use spec::{EntryPoint, EnvSpec, EnvSpecBuilder, Kwargs};
pub use time_limit::TimeLimit;
