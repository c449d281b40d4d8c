//! Tracks cumulative reward, length and wall time of each episode.

use std::collections::VecDeque;
use std::time::Instant;

use gymnasium_core::{EnvError, Info, RenderMode, StepResult};
use serde_json::json;

use crate::env::{ActionOf, Env, Metadata, ObservationOf, RenderFrame};
use crate::spec::EnvSpec;

/// Default number of finished episodes kept in the statistics queues.
pub const DEFAULT_BUFFER_LENGTH: usize = 100;

/// Adds episode statistics to the `info` of the final step.
///
/// When an episode ends (terminated or truncated), `info["episode"]`
/// is set to `{"r": return, "l": length, "t": seconds}`. The last
/// `buffer_length` finished episodes are kept in
/// [`return_queue`](Self::return_queue),
/// [`length_queue`](Self::length_queue) and
/// [`time_queue`](Self::time_queue).
#[derive(Debug)]
pub struct RecordEpisodeStatistics<E> {
    env: E,
    buffer_length: usize,
    episode_count: u64,
    episode_start: Instant,
    episode_return: f64,
    episode_length: u64,
    return_queue: VecDeque<f64>,
    length_queue: VecDeque<u64>,
    time_queue: VecDeque<f64>,
}

impl<E: Env> RecordEpisodeStatistics<E> {
    /// Wrap `env`, keeping the last [`DEFAULT_BUFFER_LENGTH`] episodes.
    pub fn new(env: E) -> Self {
        Self::with_buffer_length(env, DEFAULT_BUFFER_LENGTH)
    }

    /// Wrap `env`, keeping the last `buffer_length` episodes.
    pub fn with_buffer_length(env: E, buffer_length: usize) -> Self {
        Self {
            env,
            buffer_length,
            episode_count: 0,
            episode_start: Instant::now(),
            episode_return: 0.0,
            episode_length: 0,
            return_queue: VecDeque::with_capacity(buffer_length),
            length_queue: VecDeque::with_capacity(buffer_length),
            time_queue: VecDeque::with_capacity(buffer_length),
        }
    }

    /// Number of finished episodes.
    pub fn episode_count(&self) -> u64 {
        self.episode_count
    }

    /// Returns of recent episodes, oldest first.
    pub fn return_queue(&self) -> &VecDeque<f64> {
        &self.return_queue
    }

    /// Lengths of recent episodes, oldest first.
    pub fn length_queue(&self) -> &VecDeque<u64> {
        &self.length_queue
    }

    /// Wall-clock durations of recent episodes in seconds, oldest first.
    pub fn time_queue(&self) -> &VecDeque<f64> {
        &self.time_queue
    }

    /// The wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Unwrap.
    pub fn into_inner(self) -> E {
        self.env
    }

    fn push_bounded<T>(queue: &mut VecDeque<T>, value: T, cap: usize) {
        if cap == 0 {
            return;
        }
        if queue.len() == cap {
            queue.pop_front();
        }
        queue.push_back(value);
    }

    fn finish_episode(&mut self, info: &mut Info) {
        let elapsed = (self.episode_start.elapsed().as_secs_f64() * 1e6).round() / 1e6;
        info.insert(
            "episode".to_string(),
            json!({
                "r": self.episode_return,
                "l": self.episode_length,
                "t": elapsed,
            }),
        );
        self.episode_count += 1;
        Self::push_bounded(&mut self.return_queue, self.episode_return, self.buffer_length);
        Self::push_bounded(&mut self.length_queue, self.episode_length, self.buffer_length);
        Self::push_bounded(&mut self.time_queue, elapsed, self.buffer_length);
        tracing::trace!(
            episode = self.episode_count,
            r = self.episode_return,
            l = self.episode_length,
            "episode finished"
        );
    }
}

impl<E: Env> Env for RecordEpisodeStatistics<E> {
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
        self.episode_return += result.reward;
        self.episode_length += 1;
        if result.done() {
            self.finish_episode(&mut result.info);
        }
        Ok(result)
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(ObservationOf<E>, Info), EnvError> {
        let out = self.env.reset(seed, options)?;
        self.episode_start = Instant::now();
        self.episode_return = 0.0;
        self.episode_length = 0;
        Ok(out)
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
