//! Test utilities and mock environments for gymnasium-rs development.
//!
//! Provides fixture environments ([`CountdownEnv`], [`DriftEnv`],
//! [`FailingEnv`]) and helpers for building registries around them.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountdownEnv, DriftEnv, FailingEnv};

use gymnasium_core::EnvError;
use gymnasium_env::{EnvSpec, EnvSpecBuilder, Kwargs, Registry};

/// A spec builder for [`CountdownEnv`].
///
/// Reads `start` (default 3) and `render_mode` from kwargs.
pub fn countdown_spec(id: &str) -> EnvSpecBuilder {
    EnvSpec::builder(id).entry_point(|kwargs: &Kwargs| {
        let start = kwargs
            .get("start")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(3);
        let render_mode = match kwargs.get("render_mode").and_then(|v| v.as_str()) {
            Some(mode) => Some(mode.parse().map_err(|_| EnvError::UnsupportedRenderMode {
                mode: mode.to_string(),
            })?),
            None => None,
        };
        CountdownEnv::new(start, render_mode)
    })
}

/// A registry holding `Countdown-v0`, `Countdown-v1` (limited to 2
/// steps), `Drift-v0` and `Failing-v0`.
pub fn fixture_registry() -> Registry {
    let mut registry = Registry::new();
    for spec in [
        countdown_spec("Countdown-v0").build(),
        countdown_spec("Countdown-v1").max_episode_steps(2).build(),
        EnvSpec::builder("Drift-v0")
            .entry_point(|_: &Kwargs| Ok(DriftEnv::new()))
            .build(),
        EnvSpec::builder("Failing-v0")
            .entry_point(|kwargs: &Kwargs| {
                let n = kwargs.get("fail_after").and_then(|v| v.as_u64()).unwrap_or(1);
                Ok(FailingEnv::new(n as usize))
            })
            .build(),
    ] {
        registry.register(spec.expect("fixture specs are valid"));
    }
    registry
}
