//! Random-agent rollout over a registered environment.
//!
//! Registers the fixture environments, makes `Drift-v0` with episode
//! statistics, and runs a seeded random policy for a few episodes.
//!
//! Run with: `cargo run --example random_rollout -p gymnasium-bench`

use gymnasium_env::{Env, RecordEpisodeStatistics};
use gymnasium_space::Space;
use gymnasium_test_utils::fixture_registry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = fixture_registry();
    let mut env = RecordEpisodeStatistics::new(registry.make("Drift-v0", None)?);
    let mut actions = env.action_space().clone();
    actions.seed(Some(7));

    env.reset(Some(7), None)?;
    while env.episode_count() < 5 {
        let step = env.step(actions.sample())?;
        if step.done() {
            let episode = &step.info["episode"];
            println!(
                "episode {}: return {:.3} over {} steps",
                env.episode_count(),
                episode["r"].as_f64().unwrap_or_default(),
                episode["l"]
            );
            env.reset(None, None)?;
        }
    }

    let mean = env.return_queue().iter().sum::<f64>() / env.return_queue().len() as f64;
    println!("mean return over {} episodes: {mean:.3}", env.return_queue().len());
    Ok(())
}
