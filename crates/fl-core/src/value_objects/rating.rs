//! Star rating (1-5)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Review rating, always a whole number of stars in `[1, 5]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a rating from a star count
    pub fn new(stars: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(DomainError::InvalidRating)
        }
    }

    /// Create a rating from an arbitrary number.
    ///
    /// Non-finite, fractional, and out-of-range values are rejected.
    pub fn from_number(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(DomainError::InvalidRating);
        }
        if value < f64::from(Self::MIN) || value > f64::from(Self::MAX) {
            return Err(DomainError::InvalidRating);
        }
        Self::new(value as u8)
    }

    /// Parse a rating from text such as `"4"` or `" 5.0 "`
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        text.trim()
            .parse::<f64>()
            .map_err(|_| DomainError::InvalidRating)
            .and_then(Self::from_number)
    }

    /// Number of stars
    #[inline]
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
