//! Space trait compliance test helpers.
//!
//! These functions verify that a Space implementation satisfies the
//! invariants required by the trait contract. Reused across all space
//! test modules (Discrete, Box, MultiDiscrete, MultiBinary, Text, Tuple,
//! Dict).

use crate::space::Space;

const SAMPLES: usize = 64;

/// Assert that every sample is contained in the space.
pub fn assert_samples_contained<S: Space>(space: &mut S) {
    for _ in 0..SAMPLES {
        let s = space.sample();
        assert!(space.contains(&s), "{space:?} does not contain its sample {s:?}");
    }
}

/// Assert that reseeding with the same seed replays the same samples.
pub fn assert_seed_reproducible<S: Space>(space: &mut S) {
    assert_eq!(space.seed(Some(123)), 123, "seed() must return the seed used");
    let first: Vec<_> = (0..8).map(|_| space.sample()).collect();
    space.seed(Some(123));
    let second: Vec<_> = (0..8).map(|_| space.sample()).collect();
    assert_eq!(first, second, "{space:?} is not reproducible under seed 123");
}

/// Assert that a clone continues the original's sample stream.
pub fn assert_clone_shares_stream<S: Space>(space: &mut S) {
    let mut copy = space.clone();
    assert_eq!(*space, copy, "clone must compare equal");
    for _ in 0..4 {
        assert_eq!(space.sample(), copy.sample());
    }
}

/// Assert that flattening yields `flatdim` entries and round-trips.
pub fn assert_flatten_round_trip<S: Space>(space: &mut S) {
    if !space.is_flattenable() {
        assert!(space.flatdim().is_err(), "{space:?} is not flattenable but reports a flatdim");
        return;
    }
    let dim = space.flatdim().expect("flattenable space must report flatdim");
    for _ in 0..8 {
        let s = space.sample();
        let flat = space.flatten(&s).expect("flatten of a sample");
        assert_eq!(flat.len(), dim, "{space:?} flattened to the wrong length");
        let back = space.unflatten(&flat).expect("unflatten of a flattened sample");
        assert_eq!(back, s, "{space:?} flatten round trip changed the value");
    }
}

/// Assert that the erased form agrees with the concrete space.
pub fn assert_erased_agrees<S>(space: &S)
where
    S: Space,
    S::Value: crate::SpaceValue,
{
    let mut erased = space.clone().into_any_space();
    let mut concrete = space.clone();
    assert_eq!(erased.name(), concrete.name());
    assert_eq!(erased.shape(), concrete.shape());
    assert_eq!(erased.is_flattenable(), concrete.is_flattenable());
    for _ in 0..4 {
        let typed = concrete.sample();
        let dynamic = erased.sample();
        assert_eq!(
            crate::SpaceValue::into_value(typed),
            dynamic,
            "erased and concrete streams diverged"
        );
        assert!(erased.contains(&dynamic));
    }
    assert!(erased.downcast_ref::<S>().is_some());
}

/// Run all compliance checks on a space.
pub fn run_full_compliance<S>(mut space: S)
where
    S: Space,
    S::Value: crate::SpaceValue,
{
    assert_samples_contained(&mut space);
    assert_seed_reproducible(&mut space);
    assert_clone_shares_stream(&mut space);
    assert_flatten_round_trip(&mut space);
    assert_erased_agrees(&space);
}
