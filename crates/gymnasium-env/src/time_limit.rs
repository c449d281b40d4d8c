//! Truncates episodes after a fixed number of steps.

use std::num::NonZeroU32;

use gymnasium_core::{EnvError, Info, RenderMode, StepResult};

use crate::env::{ActionOf, Env, Metadata, ObservationOf, RenderFrame};
use crate::spec::EnvSpec;

/// Sets `truncated` once `max_episode_steps` steps have elapsed since
/// the last reset.
#[derive(Debug)]
pub struct TimeLimit<E> {
    env: E,
    max_episode_steps: NonZeroU32,
    elapsed_steps: u32,
}

impl<E: Env> TimeLimit<E> {
    /// Wrap `env` with a step limit.
    pub fn new(env: E, max_episode_steps: NonZeroU32) -> Self {
        Self {
            env,
            max_episode_steps,
            elapsed_steps: 0,
        }
    }

    /// The step limit.
    pub fn max_episode_steps(&self) -> NonZeroU32 {
        self.max_episode_steps
    }

    /// Steps taken since the last reset.
    pub fn elapsed_steps(&self) -> u32 {
        self.elapsed_steps
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

impl<E: Env> Env for TimeLimit<E> {
    type ActionSpace = E::ActionSpace;
    type ObservationSpace = E::ObservationSpace;

    fn action_space(&self) -> &Self::ActionSpace {
        self.env.action_space()
    }

    fn observation_space(&self) -> &Self::ObservationSpace {
        self.env.observation_space()
    }

    fn step(&mut self, action: ActionOf<E>) -> Result<StepResult<ObservationOf<E>>, EnvError> {
        let mut result = self.env.step(action)?;
        self.elapsed_steps = self.elapsed_steps.saturating_add(1);
        if self.elapsed_steps >= self.max_episode_steps.get() {
            if !result.truncated {
                tracing::debug!(
                    steps = self.elapsed_steps,
                    "episode truncated by time limit"
                );
            }
            result.truncated = true;
        }
        Ok(result)
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(ObservationOf<E>, Info), EnvError> {
        self.elapsed_steps = 0;
        self.env.reset(seed, options)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>, EnvError> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Counter;

    fn limit(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn truncates_at_limit() {
        let mut env = TimeLimit::new(Counter::new(100), limit(3));
        env.reset(None, None).unwrap();
        assert!(!env.step(0).unwrap().truncated);
        assert!(!env.step(0).unwrap().truncated);
        let last = env.step(0).unwrap();
        assert!(last.truncated);
        assert!(!last.terminated);
        assert_eq!(env.elapsed_steps(), 3);
    }

    #[test]
    fn reset_clears_counter() {
        let mut env = TimeLimit::new(Counter::new(100), limit(2));
        env.reset(None, None).unwrap();
        env.step(0).unwrap();
        env.step(0).unwrap();
        env.reset(None, None).unwrap();
        assert_eq!(env.elapsed_steps(), 0);
        assert!(!env.step(0).unwrap().truncated);
    }

    #[test]
    fn termination_and_truncation_can_coincide() {
        let mut env = TimeLimit::new(Counter::new(2), limit(2));
        env.reset(None, None).unwrap();
        env.step(1).unwrap();
        let r = env.step(1).unwrap();
        assert!(r.terminated && r.truncated);
        assert!(r.done());
    }

    #[test]
    fn inner_errors_do_not_count_steps() {
        let mut env = TimeLimit::new(Counter::new(5), limit(2));
        env.reset(None, None).unwrap();
        assert!(env.step(7).is_err());
        assert_eq!(env.elapsed_steps(), 0);
    }
}
