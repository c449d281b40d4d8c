//! Reusable environment test fixtures.
//!
//! Three standard environments for wrapper and registry testing:
//!
//! - [`CountdownEnv`]: counts down to zero, renders as text or image.
//! - [`DriftEnv`]: a seeded random walk on a bounded line.
//! - [`FailingEnv`]: fails deterministically after N steps.

use gymnasium_core::{np_random, EnvError, Info, RenderMode, Rng, StepResult};
use gymnasium_env::{Env, Metadata, RenderFrame};
use gymnasium_space::{Array, BoxSpace, Discrete, Space};
use rand::Rng as _;

/// Counts down from `start`. Action `1` decrements, `0` waits.
///
/// Reward is `1.0` per decrement. Terminates at zero.
#[derive(Debug)]
pub struct CountdownEnv {
    pub start: i64,
    pub remaining: i64,
    pub resets: u32,
    render_mode: Option<RenderMode>,
    action_space: Discrete,
    observation_space: Discrete,
    metadata: Metadata,
}

impl CountdownEnv {
    pub fn new(start: u32, render_mode: Option<RenderMode>) -> Result<Self, EnvError> {
        let metadata = Metadata {
            render_modes: vec![RenderMode::Ansi, RenderMode::RgbArray],
            render_fps: Some(4),
        };
        metadata.check_render_mode(render_mode)?;
        let space_error = |e: gymnasium_core::SpaceError| EnvError::ExecutionFailed {
            reason: e.to_string(),
        };
        Ok(Self {
            start: i64::from(start),
            remaining: i64::from(start),
            resets: 0,
            render_mode,
            action_space: Discrete::new(2, 0, None).map_err(space_error)?,
            observation_space: Discrete::new(u64::from(start) + 1, 0, None).map_err(space_error)?,
            metadata,
        })
    }
}

impl Env for CountdownEnv {
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
                reason: format!("{action} is not in {:?}", self.action_space),
            });
        }
        let decrement = action.min(self.remaining);
        self.remaining -= decrement;
        Ok(StepResult::new(
            self.remaining,
            decrement as f64,
            self.remaining == 0,
            false,
            Info::new(),
        ))
    }

    fn reset(
        &mut self,
        _seed: Option<u64>,
        _options: Option<&Info>,
    ) -> Result<(i64, Info), EnvError> {
        self.remaining = self.start;
        self.resets += 1;
        Ok((self.remaining, Info::new()))
    }

    fn render(&mut self) -> Result<Option<RenderFrame>, EnvError> {
        Ok(match self.render_mode {
            Some(RenderMode::Ansi) => Some(RenderFrame::Ansi(format!("T-{}", self.remaining))),
            Some(RenderMode::RgbArray) => {
                let level = u8::try_from(self.remaining.clamp(0, 255)).unwrap_or(u8::MAX);
                Some(RenderFrame::RgbArray(Array::filled(&[1, 1, 3], level)))
            }
            _ => None,
        })
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn render_mode(&self) -> Option<RenderMode> {
        self.render_mode
    }
}

/// A random walk on `[-1, 1]`. Actions: `0` left, `1` stay, `2` right.
///
/// The start position is drawn from the environment's generator, so two
/// instances reset with the same seed produce the same trajectory.
#[derive(Debug)]
pub struct DriftEnv {
    rng: Rng,
    position: f32,
    action_space: Discrete,
    observation_space: BoxSpace<f32>,
}

impl DriftEnv {
    pub fn new() -> Self {
        let (rng, _) = np_random(None);
        Self {
            rng,
            position: 0.0,
            action_space: Discrete::new(3, 0, None).expect("valid action space"),
            observation_space: BoxSpace::identical(-1.0, 1.0, &[1], None)
                .expect("valid observation space"),
        }
    }

    fn observation(&self) -> Array<f32> {
        Array::from_vec(vec![self.position])
    }
}

impl Default for DriftEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Env for DriftEnv {
    type ActionSpace = Discrete;
    type ObservationSpace = BoxSpace<f32>;

    fn action_space(&self) -> &Discrete {
        &self.action_space
    }

    fn observation_space(&self) -> &BoxSpace<f32> {
        &self.observation_space
    }

    fn step(&mut self, action: i64) -> Result<StepResult<Array<f32>>, EnvError> {
        let delta = match action {
            0 => -0.1,
            1 => 0.0,
            2 => 0.1,
            other => {
                return Err(EnvError::InvalidAction {
                    reason: format!("{other} is not in {:?}", self.action_space),
                })
            }
        };
        let noise: f32 = self.rng.gen_range(-0.05..0.05);
        self.position = (self.position + delta + noise).clamp(-1.0, 1.0);
        let at_edge = self.position.abs() >= 1.0;
        Ok(StepResult::new(
            self.observation(),
            -f64::from(self.position.abs()),
            at_edge,
            false,
            Info::new(),
        ))
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        _options: Option<&Info>,
    ) -> Result<(Array<f32>, Info), EnvError> {
        if let Some(seed) = seed {
            self.rng = np_random(Some(seed)).0;
        }
        self.position = self.rng.gen_range(-0.5..0.5);
        Ok((self.observation(), Info::new()))
    }
}

/// Fails with [`EnvError::ExecutionFailed`] once `fail_after` steps have
/// succeeded since construction.
#[derive(Debug)]
pub struct FailingEnv {
    pub fail_after: usize,
    pub steps: usize,
    space: Discrete,
}

impl FailingEnv {
    pub fn new(fail_after: usize) -> Self {
        Self {
            fail_after,
            steps: 0,
            space: Discrete::new(1, 0, None).expect("valid space"),
        }
    }
}

impl Env for FailingEnv {
    type ActionSpace = Discrete;
    type ObservationSpace = Discrete;

    fn action_space(&self) -> &Discrete {
        &self.space
    }

    fn observation_space(&self) -> &Discrete {
        &self.space
    }

    fn step(&mut self, _action: i64) -> Result<StepResult<i64>, EnvError> {
        if self.steps >= self.fail_after {
            return Err(EnvError::ExecutionFailed {
                reason: format!("failed after {} steps", self.steps),
            });
        }
        self.steps += 1;
        Ok(StepResult::new(0, 0.0, false, false, Info::new()))
    }

    fn reset(
        &mut self,
        _seed: Option<u64>,
        _options: Option<&Info>,
    ) -> Result<(i64, Info), EnvError> {
        Ok((0, Info::new()))
    }
}
