//! Episode bookkeeping: step results, info dictionaries, render modes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Auxiliary diagnostic information returned by `reset()` and `step()`.
///
/// Keys keep insertion order so that wrappers appending entries (for
/// example `"episode"`) produce stable output.
pub type Info = IndexMap<String, serde_json::Value>;

/// How an environment renders itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Render continuously for a human viewer; `render()` returns nothing.
    Human,
    /// Return an RGB frame.
    RgbArray,
    /// Return a text frame.
    Ansi,
}

impl RenderMode {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::RgbArray => "rgb_array",
            Self::Ansi => "ansi",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Self::Human),
            "rgb_array" => Ok(Self::RgbArray),
            "ansi" => Ok(Self::Ansi),
            other => Err(format!("unknown render mode '{other}'")),
        }
    }
}

/// The outcome of a single `step()`.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult<O> {
    /// Observation after the action was applied.
    pub observation: O,
    /// Reward for the transition.
    pub reward: f64,
    /// The episode reached a terminal state of the MDP.
    pub terminated: bool,
    /// The episode was cut short by something outside the MDP
    /// (typically a time limit).
    pub truncated: bool,
    /// Diagnostic information.
    pub info: Info,
}

impl<O> StepResult<O> {
    /// Build a step result.
    pub fn new(observation: O, reward: f64, terminated: bool, truncated: bool, info: Info) -> Self {
        Self {
            observation,
            reward,
            terminated,
            truncated,
            info,
        }
    }

    /// `true` if the episode ended for any reason.
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }

    /// Convert the observation while keeping the rest of the result.
    pub fn map_observation<P>(self, f: impl FnOnce(O) -> P) -> StepResult<P> {
        StepResult {
            observation: f(self.observation),
            reward: self.reward,
            terminated: self.terminated,
            truncated: self.truncated,
            info: self.info,
        }
    }
}

impl<O> From<StepResult<O>> for (O, f64, bool, bool, Info) {
    fn from(r: StepResult<O>) -> Self {
        (r.observation, r.reward, r.terminated, r.truncated, r.info)
    }
}
