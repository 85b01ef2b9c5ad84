//! Dotted multi-part version identifiers
//!
//! Unlike semver, an identifier may have any number of components and a
//! shorter identifier that is a prefix of a longer one sorts first, so
//! `1.2 < 1.2.0`.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// An ordered sequence of non-negative integer components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Creates a version from its components.
    pub fn new(components: Vec<u64>) -> Self {
        Self { components }
    }

    /// Parses a dot-separated identifier such as `0.92.2`.
    pub fn parse(text: &str) -> Result<Self> {
        let components = text
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|e| {
                    Error::format(text, format!("component '{}' is not an integer ({})", part, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { components })
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.components.get(index).copied()
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(vec![0])
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for (mine, theirs) in self.components.iter().zip(other.components.iter()) {
            match mine.cmp(theirs) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        self.len().cmp(&other.len())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Index<usize> for Version {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.components[index]
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<u64>> for Version {
    fn from(components: Vec<u64>) -> Self {
        Self::new(components)
    }
}

impl<const N: usize> From<[u64; N]> for Version {
    fn from(components: [u64; N]) -> Self {
        Self::new(components.to_vec())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}
