//! Strings over a character set.

use gymnasium_core::{np_random, Rng, SpaceError};
use indexmap::IndexSet;
use rand::Rng as _;
use std::fmt;

use crate::space::Space;

const ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Strings of `min_length..=max_length` characters drawn from a charset.
///
/// Lengths count characters, not bytes.
///
/// ```
/// use gymnasium_space::{Space, Text};
///
/// let mut space = Text::new(1, 5, Some(3)).unwrap();
/// assert!(space.contains(&"abc".to_string()));
/// assert!(!space.contains(&"".to_string()));
/// assert!(!space.contains(&"a b".to_string()));
///
/// let dna = Text::with_charset(4, 4, "ACGT", None).unwrap();
/// assert!(dna.contains(&"GATC".to_string()));
/// let s = space.sample();
/// assert!(space.contains(&s));
/// ```
#[derive(Clone)]
pub struct Text {
    rng: Rng,
    min_length: usize,
    max_length: usize,
    charset: IndexSet<char>,
}

impl Text {
    /// Alphanumeric strings of `min_length..=max_length` characters.
    pub fn new(
        min_length: usize,
        max_length: usize,
        seed: Option<u64>,
    ) -> Result<Self, SpaceError> {
        Self::with_charset(min_length, max_length, ALPHANUMERIC, seed)
    }

    /// Strings over the characters of `charset`. Duplicates are ignored.
    ///
    /// Returns `Err(SpaceError::InvalidBounds)` if `min_length == 0` or
    /// `min_length > max_length`, and `Err(SpaceError::Empty)` if the
    /// charset is empty.
    pub fn with_charset(
        min_length: usize,
        max_length: usize,
        charset: &str,
        seed: Option<u64>,
    ) -> Result<Self, SpaceError> {
        if min_length == 0 {
            return Err(SpaceError::InvalidBounds {
                reason: "the minimum length of a text space must be greater than 0".into(),
            });
        }
        if min_length > max_length {
            return Err(SpaceError::InvalidBounds {
                reason: format!(
                    "the minimum length cannot be greater than the maximum length \
                     (min_length: {min_length}, max_length: {max_length})"
                ),
            });
        }
        let charset: IndexSet<char> = charset.chars().collect();
        if charset.is_empty() {
            return Err(SpaceError::Empty {
                what: "Text requires a non-empty charset".into(),
            });
        }
        let (rng, _) = np_random(seed);
        Ok(Self {
            rng,
            min_length,
            max_length,
            charset,
        })
    }

    /// Minimum number of characters.
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    /// Maximum number of characters.
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// The allowed characters, in the order given.
    pub fn charset(&self) -> impl Iterator<Item = char> + '_ {
        self.charset.iter().copied()
    }
}

impl Space for Text {
    type Value = String;

    fn name(&self) -> &'static str {
        "Text"
    }

    fn shape(&self) -> Option<&[usize]> {
        None
    }

    fn contains(&self, value: &String) -> bool {
        let mut len = 0;
        for c in value.chars() {
            if !self.charset.contains(&c) {
                return false;
            }
            len += 1;
        }
        (self.min_length..=self.max_length).contains(&len)
    }

    fn sample(&mut self) -> String {
        let len = self.rng.gen_range(self.min_length..=self.max_length);
        (0..len)
            .filter_map(|_| {
                let i = self.rng.gen_range(0..self.charset.len());
                self.charset.get_index(i).copied()
            })
            .collect()
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (rng, used) = np_random(seed);
        self.rng = rng;
        used
    }

    fn is_flattenable(&self) -> bool {
        false
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.min_length == other.min_length
            && self.max_length == other.max_length
            && self.charset == other.charset
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text({}, {}", self.min_length, self.max_length)?;
        if self.charset != ALPHANUMERIC.chars().collect::<IndexSet<char>>() {
            let chars: String = self.charset().collect();
            write!(f, ", charset={chars}")?;
        }
        write!(f, ")")
    }
}
