//! The environment trait and its metadata.

use gymnasium_core::{EnvError, Info, RenderMode, StepResult};
use gymnasium_space::{Array, Space, SpaceValue};
use serde::{Deserialize, Serialize};

use crate::erased::ErasedEnv;
use crate::spec::EnvSpec;

/// Action type of an environment.
pub type ActionOf<E> = <<E as Env>::ActionSpace as Space>::Value;

/// Observation type of an environment.
pub type ObservationOf<E> = <<E as Env>::ObservationSpace as Space>::Value;

/// Static facts about an environment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Render modes the environment supports.
    pub render_modes: Vec<RenderMode>,
    /// Frame rate used by `human` rendering, if any.
    pub render_fps: Option<u32>,
}

impl Metadata {
    /// `true` if `mode` is listed in [`render_modes`](Self::render_modes).
    pub fn supports(&self, mode: RenderMode) -> bool {
        self.render_modes.contains(&mode)
    }

    /// Check a requested render mode against the declared ones.
    pub fn check_render_mode(&self, mode: Option<RenderMode>) -> Result<(), EnvError> {
        match mode {
            Some(mode) if !self.supports(mode) => Err(EnvError::UnsupportedRenderMode {
                mode: mode.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

static NO_METADATA: Metadata = Metadata {
    render_modes: Vec::new(),
    render_fps: None,
};

/// Output of [`Env::render`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderFrame {
    /// A text frame (`ansi` mode).
    Ansi(String),
    /// An image of shape `(height, width, 3)` (`rgb_array` mode).
    RgbArray(Array<u8>),
}

/// A reinforcement learning environment.
///
/// The agent interacts with the environment through
/// [`reset`](Env::reset) and [`step`](Env::step). Actions and
/// observations are elements of the associated spaces.
pub trait Env: Send {
    /// The space actions are drawn from.
    type ActionSpace: Space;
    /// The space observations are drawn from.
    type ObservationSpace: Space;

    /// The action space.
    fn action_space(&self) -> &Self::ActionSpace;

    /// The observation space.
    fn observation_space(&self) -> &Self::ObservationSpace;

    /// Run one timestep of the environment's dynamics.
    fn step(
        &mut self,
        action: <Self::ActionSpace as Space>::Value,
    ) -> Result<StepResult<<Self::ObservationSpace as Space>::Value>, EnvError>;

    /// Reset to an initial state and return the first observation.
    ///
    /// A `Some` seed reseeds the environment's generator; `None` keeps
    /// the current stream.
    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(<Self::ObservationSpace as Space>::Value, Info), EnvError>;

    /// Render the current state according to [`render_mode`](Env::render_mode).
    fn render(&mut self) -> Result<Option<RenderFrame>, EnvError> {
        Ok(None)
    }

    /// Release resources held by the environment.
    fn close(&mut self) -> Result<(), EnvError> {
        Ok(())
    }

    /// Static facts about the environment.
    fn metadata(&self) -> &Metadata {
        &NO_METADATA
    }

    /// The render mode chosen at construction.
    fn render_mode(&self) -> Option<RenderMode> {
        None
    }

    /// The spec the environment was made from, if it came from a registry.
    fn spec(&self) -> Option<&EnvSpec> {
        None
    }

    /// Erase the concrete type.
    fn into_erased(self) -> ErasedEnv
    where
        Self: Sized + 'static,
        <Self::ActionSpace as Space>::Value: SpaceValue,
        <Self::ObservationSpace as Space>::Value: SpaceValue,
    {
        ErasedEnv::new(self)
    }
}
