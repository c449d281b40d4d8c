//! Rejects `step` and `render` before the first `reset`.

use gymnasium_core::{EnvError, Info, RenderMode, StepResult};

use crate::env::{ActionOf, Env, Metadata, ObservationOf, RenderFrame};
use crate::spec::EnvSpec;

/// Wraps an environment so that calling [`step`](Env::step) (and, unless
/// disabled, [`render`](Env::render)) before [`reset`](Env::reset)
/// returns [`EnvError::ResetNeeded`].
#[derive(Debug)]
pub struct OrderEnforcing<E> {
    env: E,
    has_reset: bool,
    disable_render_order_enforcing: bool,
}

impl<E: Env> OrderEnforcing<E> {
    /// Wrap `env`. With `disable_render_order_enforcing`, rendering is
    /// allowed before the first reset.
    pub fn new(env: E, disable_render_order_enforcing: bool) -> Self {
        Self {
            env,
            has_reset: false,
            disable_render_order_enforcing,
        }
    }

    /// `true` once [`reset`](Env::reset) has succeeded.
    pub fn has_reset(&self) -> bool {
        self.has_reset
    }

    /// The wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Unwrap.
    pub fn into_inner(self) -> E {
        self.env
    }
}

impl<E: Env> Env for OrderEnforcing<E> {
    type ActionSpace = E::ActionSpace;
    type ObservationSpace = E::ObservationSpace;

    fn action_space(&self) -> &Self::ActionSpace {
        self.env.action_space()
    }

    fn observation_space(&self) -> &Self::ObservationSpace {
        self.env.observation_space()
    }

    fn step(&mut self, action: ActionOf<E>) -> Result<StepResult<ObservationOf<E>>, EnvError> {
        if !self.has_reset {
            return Err(EnvError::ResetNeeded { method: "step" });
        }
        self.env.step(action)
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(ObservationOf<E>, Info), EnvError> {
        let out = self.env.reset(seed, options)?;
        self.has_reset = true;
        Ok(out)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>, EnvError> {
        if !self.disable_render_order_enforcing && !self.has_reset {
            return Err(EnvError::ResetNeeded { method: "render" });
        }
        self.env.render()
    }

    fn close(&mut self) -> Result<(), EnvError> {
        self.env.close()
    }

    fn metadata(&self) -> &Metadata {
        self.env.metadata()
    }

    fn render_mode(&self) -> Option<RenderMode> {
        self.env.render_mode()
    }

    fn spec(&self) -> Option<&EnvSpec> {
        self.env.spec()
    }
}
