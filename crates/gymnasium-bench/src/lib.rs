//! Benchmark profiles and utilities for gymnasium-rs.
//!
//! Provides pre-built spaces for benchmarking and examples:
//!
//! - [`reference_spaces`]: one of each fundamental space, moderately sized
//! - [`observation_profile`]: a nested `Dict` observation space typical of
//!   multi-sensor agents
//! - [`image_profile`]: an 84x84x3 `uint8` image box

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gymnasium_core::SpaceError;
use gymnasium_space::{
    AnySpace, BoxSpace, DictSpace, Discrete, MultiBinary, MultiDiscrete, Space, Text, TupleSpace,
};

/// One of each fundamental space, paired with a label for reports.
pub fn reference_spaces(seed: u64) -> Result<Vec<(&'static str, AnySpace)>, SpaceError> {
    Ok(vec![
        ("discrete_16", Discrete::new(16, 0, Some(seed))?.into_any_space()),
        (
            "box_f32_64",
            BoxSpace::<f32>::identical(-1.0, 1.0, &[64], Some(seed))?.into_any_space(),
        ),
        (
            "box_f64_unbounded_64",
            BoxSpace::<f64>::identical(f64::NEG_INFINITY, f64::INFINITY, &[64], Some(seed))?
                .into_any_space(),
        ),
        (
            "multi_discrete_8",
            MultiDiscrete::from_nvec(&[5, 5, 5, 5, 3, 3, 2, 2], Some(seed))?.into_any_space(),
        ),
        ("multi_binary_64", MultiBinary::new(&[64], Some(seed))?.into_any_space()),
        ("text_1_32", Text::new(1, 32, Some(seed))?.into_any_space()),
    ])
}

/// A nested observation space:
/// `Dict(position: Box[3], velocity: Box[3], sensors: Tuple(MultiBinary[16], Discrete(4)))`.
pub fn observation_profile(seed: u64) -> Result<DictSpace, SpaceError> {
    let sensors = TupleSpace::new(vec![
        MultiBinary::new(&[16], None)?.into_any_space(),
        Discrete::new(4, 0, None)?.into_any_space(),
    ])?;
    let mut space = DictSpace::new([
        ("position", BoxSpace::<f32>::identical(-10.0, 10.0, &[3], None)?.into_any_space()),
        ("velocity", BoxSpace::<f32>::identical(-1.0, 1.0, &[3], None)?.into_any_space()),
        ("sensors", sensors.into_any_space()),
    ])?;
    space.seed(Some(seed));
    Ok(space)
}

/// An Atari-sized RGB frame: `Box(0, 255, [84, 84, 3], uint8)`.
pub fn image_profile(seed: u64) -> Result<BoxSpace<u8>, SpaceError> {
    BoxSpace::identical(0, 255, &[84, 84, 3], Some(seed))
}
