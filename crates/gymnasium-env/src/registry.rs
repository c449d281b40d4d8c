//! Environment registry: id resolution and construction.
//!
//! A [`Registry`] maps ids to [`EnvSpec`]s. [`Registry::make`] resolves
//! an id, calls its entry point, and applies the standard wrappers
//! (`OrderEnforcing`, then `TimeLimit`). The free functions
//! [`register`], [`make`], [`spec`] and [`ids`] act on a process-wide
//! default registry.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use gymnasium_core::RegistryError;
use indexmap::IndexMap;

use crate::env::Env;
use crate::erased::ErasedEnv;
use crate::id::EnvId;
use crate::order_enforcing::OrderEnforcing;
use crate::spec::{EnvSpec, Kwargs};
use crate::time_limit::TimeLimit;

/// A collection of environment specs keyed by id.
#[derive(Debug, Default)]
pub struct Registry {
    specs: IndexMap<EnvId, Arc<EnvSpec>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec. An existing spec with the same id is replaced.
    pub fn register(&mut self, spec: EnvSpec) {
        let id = spec.id().clone();
        if self.specs.contains_key(&id) {
            tracing::warn!(%id, "overriding environment already in registry");
        } else {
            tracing::debug!(%id, "registered environment");
        }
        self.specs.insert(id, Arc::new(spec));
    }

    /// Number of registered specs.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &EnvId> + '_ {
        self.specs.keys()
    }

    /// Look up the spec for `id`.
    ///
    /// On a miss the error explains the closest match: a missing
    /// version, a deprecated version, or a versioned-only family.
    pub fn spec(&self, id: &str) -> Result<Arc<EnvSpec>, RegistryError> {
        let parsed: EnvId = id.parse()?;
        if let Some(spec) = self.specs.get(&parsed) {
            return Ok(Arc::clone(spec));
        }
        Err(self.explain_miss(id, &parsed))
    }

    /// Construct the environment registered as `id`.
    ///
    /// `kwargs` overlay the spec's default kwargs. The result is wrapped
    /// in [`OrderEnforcing`] if the spec asks for it, then in
    /// [`TimeLimit`] if it sets `max_episode_steps`.
    pub fn make(&self, id: &str, kwargs: Option<&Kwargs>) -> Result<ErasedEnv, RegistryError> {
        let spec = self.spec(id)?;
        Self::make_from_spec(spec, kwargs)
    }

    /// Construct an environment from a spec that need not be registered.
    pub fn make_from_spec(
        spec: Arc<EnvSpec>,
        kwargs: Option<&Kwargs>,
    ) -> Result<ErasedEnv, RegistryError> {
        let id = spec.id().to_string();
        let mut env = spec
            .construct(kwargs)
            .map_err(|source| RegistryError::EntryPoint {
                id: id.clone(),
                source,
            })?;
        if spec.order_enforce() {
            env = OrderEnforcing::new(env, spec.disable_render_order_enforcing()).into_erased();
        }
        if let Some(steps) = spec.max_episode_steps() {
            env = TimeLimit::new(env, steps).into_erased();
        }
        tracing::debug!(%id, "made environment");
        Ok(env.with_spec(spec))
    }

    fn explain_miss(&self, id: &str, parsed: &EnvId) -> RegistryError {
        let family: Vec<&EnvId> = self.specs.keys().filter(|k| k.same_family(parsed)).collect();
        if family.is_empty() {
            return RegistryError::NotFound { id: id.to_string() };
        }
        let mut versions: Vec<u32> = family.iter().filter_map(|k| k.version()).collect();
        versions.sort_unstable();
        let latest = versions
            .last()
            .map(|v| parsed.with_version(Some(*v)).to_string());
        match (parsed.version(), latest) {
            (None, Some(latest)) => RegistryError::UnversionedNotAllowed {
                id: id.to_string(),
                latest,
            },
            (Some(requested), Some(latest))
                if versions.last().is_some_and(|newest| requested < *newest) =>
            {
                RegistryError::DeprecatedVersion {
                    id: id.to_string(),
                    latest,
                }
            }
            _ => RegistryError::VersionNotFound {
                id: id.to_string(),
                available: versions,
            },
        }
    }
}

// ── Default registry ───────────────────────────────────────────────

static DEFAULT_REGISTRY: LazyLock<RwLock<Registry>> =
    LazyLock::new(|| RwLock::new(Registry::new()));

/// Run `f` with shared access to the default registry.
pub fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    let guard = DEFAULT_REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Register a spec in the default registry.
pub fn register(spec: EnvSpec) {
    DEFAULT_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(spec);
}

/// Look up a spec in the default registry.
pub fn spec(id: &str) -> Result<Arc<EnvSpec>, RegistryError> {
    with_registry(|r| r.spec(id))
}

/// Construct an environment from the default registry.
///
/// The registry lock is released before the entry point runs, so entry
/// points may themselves call [`make`].
pub fn make(id: &str, kwargs: Option<&Kwargs>) -> Result<ErasedEnv, RegistryError> {
    let spec = spec(id)?;
    Registry::make_from_spec(spec, kwargs)
}

/// Ids in the default registry, in registration order.
pub fn ids() -> Vec<String> {
    with_registry(|r| r.ids().map(ToString::to_string).collect())
}
