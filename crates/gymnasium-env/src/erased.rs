//! Type-erased environments operating on [`Value`]s.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use gymnasium_core::{EnvError, Info, RenderMode, StepResult};
use gymnasium_space::{AnySpace, Space, SpaceValue, Value};

use crate::env::{ActionOf, Env, Metadata, ObservationOf, RenderFrame};
use crate::spec::EnvSpec;

/// Object-safe view of an [`Env`] whose actions and observations convert
/// to [`Value`].
///
/// Every such `Env` implements `DynEnv` through a blanket impl. Methods
/// carry a `dyn_` prefix so they never shadow the typed [`Env`] methods.
pub trait DynEnv: Send {
    /// The action space, erased.
    fn dyn_action_space(&self) -> AnySpace;
    /// The observation space, erased.
    fn dyn_observation_space(&self) -> AnySpace;
    /// [`Env::step`] over values.
    fn dyn_step(&mut self, action: &Value) -> Result<StepResult<Value>, EnvError>;
    /// [`Env::reset`] over values.
    fn dyn_reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(Value, Info), EnvError>;
    /// [`Env::render`].
    fn dyn_render(&mut self) -> Result<Option<RenderFrame>, EnvError>;
    /// [`Env::close`].
    fn dyn_close(&mut self) -> Result<(), EnvError>;
    /// [`Env::metadata`].
    fn dyn_metadata(&self) -> &Metadata;
    /// [`Env::render_mode`].
    fn dyn_render_mode(&self) -> Option<RenderMode>;
    /// [`Env::spec`].
    fn dyn_spec(&self) -> Option<&EnvSpec>;
    /// Upcast for downcasting to the concrete environment.
    fn as_any(&self) -> &dyn Any;
}

impl<E> DynEnv for E
where
    E: Env + 'static,
    ActionOf<E>: SpaceValue,
    ObservationOf<E>: SpaceValue,
{
    fn dyn_action_space(&self) -> AnySpace {
        self.action_space().clone().into_any_space()
    }

    fn dyn_observation_space(&self) -> AnySpace {
        self.observation_space().clone().into_any_space()
    }

    fn dyn_step(&mut self, action: &Value) -> Result<StepResult<Value>, EnvError> {
        let action = <ActionOf<E> as SpaceValue>::from_value(action).map_err(|e| {
            EnvError::InvalidAction {
                reason: e.to_string(),
            }
        })?;
        Ok(self.step(action)?.map_observation(SpaceValue::into_value))
    }

    fn dyn_reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(Value, Info), EnvError> {
        let (obs, info) = self.reset(seed, options)?;
        Ok((obs.into_value(), info))
    }

    fn dyn_render(&mut self) -> Result<Option<RenderFrame>, EnvError> {
        self.render()
    }

    fn dyn_close(&mut self) -> Result<(), EnvError> {
        self.close()
    }

    fn dyn_metadata(&self) -> &Metadata {
        self.metadata()
    }

    fn dyn_render_mode(&self) -> Option<RenderMode> {
        self.render_mode()
    }

    fn dyn_spec(&self) -> Option<&EnvSpec> {
        self.spec()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An environment of any concrete type.
///
/// Spaces are erased once at construction. A registry attaches the
/// [`EnvSpec`] the environment was made from.
pub struct ErasedEnv {
    inner: Box<dyn DynEnv>,
    action_space: AnySpace,
    observation_space: AnySpace,
    spec: Option<Arc<EnvSpec>>,
}

impl ErasedEnv {
    /// Erase a concrete environment.
    pub fn new<E>(env: E) -> Self
    where
        E: Env + 'static,
        ActionOf<E>: SpaceValue,
        ObservationOf<E>: SpaceValue,
    {
        let action_space = env.dyn_action_space();
        let observation_space = env.dyn_observation_space();
        Self {
            inner: Box::new(env),
            action_space,
            observation_space,
            spec: None,
        }
    }

    /// Attach the spec this environment was made from.
    pub fn with_spec(mut self, spec: Arc<EnvSpec>) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Borrow the outermost concrete environment, if it has type `E`.
    pub fn downcast_ref<E: Env + 'static>(&self) -> Option<&E> {
        self.inner.as_any().downcast_ref::<E>()
    }
}

impl fmt::Debug for ErasedEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedEnv")
            .field("id", &self.spec().map(|s| s.id().to_string()))
            .field("action_space", &self.action_space)
            .field("observation_space", &self.observation_space)
            .finish_non_exhaustive()
    }
}

impl Env for ErasedEnv {
    type ActionSpace = AnySpace;
    type ObservationSpace = AnySpace;

    fn action_space(&self) -> &AnySpace {
        &self.action_space
    }

    fn observation_space(&self) -> &AnySpace {
        &self.observation_space
    }

    fn step(&mut self, action: Value) -> Result<StepResult<Value>, EnvError> {
        self.inner.dyn_step(&action)
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(Value, Info), EnvError> {
        self.inner.dyn_reset(seed, options)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>, EnvError> {
        self.inner.dyn_render()
    }

    fn close(&mut self) -> Result<(), EnvError> {
        self.inner.dyn_close()
    }

    fn metadata(&self) -> &Metadata {
        self.inner.dyn_metadata()
    }

    fn render_mode(&self) -> Option<RenderMode> {
        self.inner.dyn_render_mode()
    }

    fn spec(&self) -> Option<&EnvSpec> {
        self.spec.as_deref().or_else(|| self.inner.dyn_spec())
    }

    fn into_erased(self) -> ErasedEnv {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Counter;
    use gymnasium_space::Discrete;

    #[test]
    fn erased_env_forwards_values() {
        let mut env = Counter::new(3).into_erased();
        assert_eq!(env.action_space().name(), "Discrete");
        let (obs, _) = env.reset(Some(0), None).unwrap();
        assert_eq!(obs, Value::Int(0));
        let step = env.step(Value::Int(1)).unwrap();
        assert_eq!(step.observation, Value::Int(1));
        assert_eq!(step.reward, 1.0);
    }

    #[test]
    fn wrong_action_kind_is_invalid_action() {
        let mut env = Counter::new(3).into_erased();
        env.reset(None, None).unwrap();
        let err = env.step(Value::Text("left".into())).unwrap_err();
        assert!(matches!(err, EnvError::InvalidAction { .. }), "{err:?}");
    }

    #[test]
    fn erasing_twice_does_not_nest() {
        let env = Counter::new(3).into_erased().into_erased();
        assert!(env.downcast_ref::<Counter>().is_some());
    }

    #[test]
    fn erased_spaces_match_concrete() {
        let env = Counter::new(5).into_erased();
        let space = env.observation_space().downcast_ref::<Discrete>().unwrap();
        assert_eq!(space.n(), 6);
    }
}
