//! Action and observation spaces for Gymnasium environments.
//!
//! This crate defines the [`Space`] trait, the contract every action and
//! observation space follows, along with the fundamental and composite
//! spaces of the Gymnasium API.
//!
//! # Fundamental spaces
//!
//! - [`Discrete`]: a finite range of integers, with masked sampling
//! - [`BoxSpace`]: a bounded or unbounded box of `f32`, `f64`, `i32`,
//!   `i64` or `u8` elements
//! - [`MultiDiscrete`]: several independent discrete choices
//! - [`MultiBinary`]: arrays of bits
//! - [`Text`]: strings over a character set
//!
//! # Composite spaces
//!
//! [`TupleSpace`] and [`DictSpace`] combine type-erased [`AnySpace`]
//! children. Values of any space convert to a [`Value`] through
//! [`SpaceValue`].
//!
//! # Construction by name
//!
//! [`SpaceFactory`] builds fundamental spaces from JSON parameters.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod box_space;
pub mod dict;
pub mod discrete;
pub mod element;
pub mod factory;
pub mod multi_binary;
pub mod multi_discrete;
pub mod space;
pub mod text;
pub mod tuple;
pub mod value;

#[cfg(test)]
pub(crate) mod compliance;

pub use array::{num_elements, Array, Shape};
pub use box_space::{BoundedManner, BoxBound, BoxSpace};
pub use dict::DictSpace;
pub use discrete::Discrete;
pub use element::BoxElement;
pub use factory::SpaceFactory;
pub use gymnasium_core::SpaceError;
pub use multi_binary::MultiBinary;
pub use multi_discrete::MultiDiscrete;
pub use space::{AnySpace, Space};
pub use text::Text;
pub use tuple::TupleSpace;
pub use value::{ArrayValue, SpaceValue, Value};
