//! Registration records for environments.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use gymnasium_core::{EnvError, RegistryError};
use gymnasium_space::SpaceValue;
use indexmap::IndexMap;

use crate::env::{ActionOf, Env, ObservationOf};
use crate::erased::ErasedEnv;
use crate::id::EnvId;

/// Keyword arguments passed to an environment's entry point.
pub type Kwargs = IndexMap<String, serde_json::Value>;

/// Constructor stored in an [`EnvSpec`].
pub type EntryPoint = Arc<dyn Fn(&Kwargs) -> Result<ErasedEnv, EnvError> + Send + Sync>;

/// Everything needed to construct an environment by id.
///
/// Built with [`EnvSpec::builder`].
#[derive(Clone)]
pub struct EnvSpec {
    id: EnvId,
    entry_point: EntryPoint,
    reward_threshold: Option<f64>,
    nondeterministic: bool,
    max_episode_steps: Option<NonZeroU32>,
    order_enforce: bool,
    disable_render_order_enforcing: bool,
    kwargs: Kwargs,
}

impl EnvSpec {
    /// Start building a spec for `id`.
    pub fn builder(id: impl Into<String>) -> EnvSpecBuilder {
        EnvSpecBuilder {
            id: id.into(),
            entry_point: None,
            reward_threshold: None,
            nondeterministic: false,
            max_episode_steps: None,
            order_enforce: true,
            disable_render_order_enforcing: false,
            kwargs: Kwargs::new(),
        }
    }

    /// The environment id.
    pub fn id(&self) -> &EnvId {
        &self.id
    }

    /// Return at which the task counts as solved.
    pub fn reward_threshold(&self) -> Option<f64> {
        self.reward_threshold
    }

    /// `true` if the environment is not deterministic even when seeded.
    pub fn nondeterministic(&self) -> bool {
        self.nondeterministic
    }

    /// Step limit applied through [`TimeLimit`](crate::TimeLimit).
    pub fn max_episode_steps(&self) -> Option<NonZeroU32> {
        self.max_episode_steps
    }

    /// `true` if [`OrderEnforcing`](crate::OrderEnforcing) is applied.
    pub fn order_enforce(&self) -> bool {
        self.order_enforce
    }

    /// `true` if rendering before reset is allowed.
    pub fn disable_render_order_enforcing(&self) -> bool {
        self.disable_render_order_enforcing
    }

    /// Default keyword arguments for the entry point.
    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    /// Call the entry point with the default kwargs overlaid by `overrides`.
    pub(crate) fn construct(&self, overrides: Option<&Kwargs>) -> Result<ErasedEnv, EnvError> {
        let mut kwargs = self.kwargs.clone();
        if let Some(overrides) = overrides {
            kwargs.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        (self.entry_point)(&kwargs)
    }
}

impl fmt::Debug for EnvSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSpec")
            .field("id", &self.id.to_string())
            .field("reward_threshold", &self.reward_threshold)
            .field("nondeterministic", &self.nondeterministic)
            .field("max_episode_steps", &self.max_episode_steps)
            .field("order_enforce", &self.order_enforce)
            .field("kwargs", &self.kwargs)
            .finish_non_exhaustive()
    }
}

/// Builder for [`EnvSpec`]. Validation happens in [`build`](Self::build).
pub struct EnvSpecBuilder {
    id: String,
    entry_point: Option<EntryPoint>,
    reward_threshold: Option<f64>,
    nondeterministic: bool,
    max_episode_steps: Option<u32>,
    order_enforce: bool,
    disable_render_order_enforcing: bool,
    kwargs: Kwargs,
}

impl EnvSpecBuilder {
    /// Set the constructor. Its environment is erased on construction.
    pub fn entry_point<E, F>(mut self, f: F) -> Self
    where
        E: Env + 'static,
        ActionOf<E>: SpaceValue,
        ObservationOf<E>: SpaceValue,
        F: Fn(&Kwargs) -> Result<E, EnvError> + Send + Sync + 'static,
    {
        self.entry_point = Some(Arc::new(move |kwargs: &Kwargs| {
            f(kwargs).map(|env| env.into_erased())
        }));
        self
    }

    /// Set the reward threshold.
    pub fn reward_threshold(mut self, threshold: f64) -> Self {
        self.reward_threshold = Some(threshold);
        self
    }

    /// Mark the environment as nondeterministic.
    pub fn nondeterministic(mut self, nondeterministic: bool) -> Self {
        self.nondeterministic = nondeterministic;
        self
    }

    /// Truncate episodes after `steps` steps.
    pub fn max_episode_steps(mut self, steps: u32) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    /// Apply [`OrderEnforcing`](crate::OrderEnforcing) on `make`. Default: `true`.
    pub fn order_enforce(mut self, enforce: bool) -> Self {
        self.order_enforce = enforce;
        self
    }

    /// Allow rendering before the first reset. Default: `false`.
    pub fn disable_render_order_enforcing(mut self, disable: bool) -> Self {
        self.disable_render_order_enforcing = disable;
        self
    }

    /// Add a default keyword argument.
    pub fn kwarg(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.kwargs.insert(key.into(), value);
        self
    }

    /// Validate and build.
    ///
    /// Returns `Err(RegistryError::MalformedId)` for a bad id and
    /// `Err(RegistryError::InvalidSpec)` if the entry point is missing,
    /// `max_episode_steps` is zero, or the reward threshold is not finite.
    pub fn build(self) -> Result<EnvSpec, RegistryError> {
        let id: EnvId = self.id.parse()?;
        let entry_point = self.entry_point.ok_or_else(|| RegistryError::InvalidSpec {
            reason: format!("'{id}' has no entry point"),
        })?;
        let max_episode_steps = match self.max_episode_steps {
            None => None,
            Some(steps) => Some(NonZeroU32::new(steps).ok_or_else(|| RegistryError::InvalidSpec {
                reason: format!("'{id}' max_episode_steps must be positive"),
            })?),
        };
        if let Some(t) = self.reward_threshold {
            if !t.is_finite() {
                return Err(RegistryError::InvalidSpec {
                    reason: format!("'{id}' reward_threshold must be finite, got {t}"),
                });
            }
        }
        Ok(EnvSpec {
            id,
            entry_point,
            reward_threshold: self.reward_threshold,
            nondeterministic: self.nondeterministic,
            max_episode_steps,
            order_enforce: self.order_enforce,
            disable_render_order_enforcing: self.disable_render_order_enforcing,
            kwargs: self.kwargs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Counter;
    use serde_json::json;

    fn counter_spec(id: &str) -> EnvSpecBuilder {
        EnvSpec::builder(id).entry_point(|kwargs: &Kwargs| {
            let max = kwargs.get("max").and_then(|v| v.as_i64()).unwrap_or(3);
            Ok(Counter::new(max))
        })
    }

    #[test]
    fn defaults() {
        let spec = counter_spec("Counter-v0").build().unwrap();
        assert_eq!(spec.id().to_string(), "Counter-v0");
        assert!(spec.order_enforce());
        assert!(!spec.nondeterministic());
        assert_eq!(spec.max_episode_steps(), None);
        assert!(spec.kwargs().is_empty());
    }

    #[test]
    fn missing_entry_point_rejected() {
        let err = EnvSpec::builder("Nothing-v0").build().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSpec { .. }));
    }

    #[test]
    fn zero_step_limit_rejected() {
        let err = counter_spec("Counter-v0").max_episode_steps(0).build().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSpec { .. }));
    }

    #[test]
    fn infinite_threshold_rejected() {
        let err = counter_spec("Counter-v0")
            .reward_threshold(f64::INFINITY)
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSpec { .. }));
    }

    #[test]
    fn malformed_id_rejected() {
        let err = counter_spec("bad id").build().unwrap_err();
        assert!(matches!(err, RegistryError::MalformedId { .. }));
    }

    #[test]
    fn construct_overlays_kwargs() {
        let spec = counter_spec("Counter-v0").kwarg("max", json!(4)).build().unwrap();
        let env = spec.construct(None).unwrap();
        assert_eq!(env.downcast_ref::<Counter>().unwrap().max, 4);

        let mut overrides = Kwargs::new();
        overrides.insert("max".into(), json!(9));
        let env = spec.construct(Some(&overrides)).unwrap();
        assert_eq!(env.downcast_ref::<Counter>().unwrap().max, 9);
    }
}
