//! A minimal environment for unit tests.

use gymnasium_core::{EnvError, Info, RenderMode, StepResult};
use gymnasium_space::{Discrete, Space};

use crate::env::{Env, Metadata, RenderFrame};

/// Counts up to `max`. Action `1` increments, `0` waits. Reward equals
/// the action. Terminates on reaching `max`.
#[derive(Debug)]
pub(crate) struct Counter {
    pub(crate) count: i64,
    pub(crate) max: i64,
    pub(crate) closed: bool,
    action_space: Discrete,
    observation_space: Discrete,
    metadata: Metadata,
}

impl Counter {
    pub(crate) fn new(max: i64) -> Self {
        Self {
            count: 0,
            max,
            closed: false,
            action_space: Discrete::new(2, 0, None).unwrap(),
            observation_space: Discrete::new(max as u64 + 1, 0, None).unwrap(),
            metadata: Metadata {
                render_modes: vec![RenderMode::Ansi],
                render_fps: None,
            },
        }
    }
}

impl Env for Counter {
    type ActionSpace = Discrete;
    type ObservationSpace = Discrete;

    fn action_space(&self) -> &Discrete {
        &self.action_space
    }

    fn observation_space(&self) -> &Discrete {
        &self.observation_space
    }

    fn step(&mut self, action: i64) -> Result<StepResult<i64>, EnvError> {
        if !self.action_space.contains(&action) {
            return Err(EnvError::InvalidAction {
                reason: format!("{action} not in {:?}", self.action_space),
            });
        }
        self.count = (self.count + action).min(self.max);
        Ok(StepResult::new(
            self.count,
            action as f64,
            self.count == self.max,
            false,
            Info::new(),
        ))
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        _options: Option<&Info>,
    ) -> Result<(i64, Info), EnvError> {
        if let Some(seed) = seed {
            self.action_space.seed(Some(seed));
        }
        self.count = 0;
        Ok((0, Info::new()))
    }

    fn render(&mut self) -> Result<Option<RenderFrame>, EnvError> {
        Ok(Some(RenderFrame::Ansi(format!("{}/{}", self.count, self.max))))
    }

    fn close(&mut self) -> Result<(), EnvError> {
        self.closed = true;
        Ok(())
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn render_mode(&self) -> Option<RenderMode> {
        Some(RenderMode::Ansi)
    }
}
