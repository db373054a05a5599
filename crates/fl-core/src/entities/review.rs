//! Review entity - a customer's opinion of a product, subject to moderation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{Rating, ReviewId};

/// Moderation status of a review.
///
/// Every review starts as `Pending`; only moderators move it. Any status may be
/// set from any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// All recognized statuses
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Lowercase wire/database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether reviews with this status are shown to the public
    #[inline]
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

/// Validated, trimmed submission data for a new review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub rating: Rating,
    pub comment: String,
    pub recommend: bool,
}

/// Review entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub rating: Rating,
    pub comment: String,
    pub recommend: bool,
    /// Visitors that explicitly liked this review
    pub visitor_likes: BTreeSet<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Create a new pending review from a validated draft
    pub fn new(id: ReviewId, draft: ReviewDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            customer_name: draft.customer_name,
            product_id: draft.product_id,
            product_name: draft.product_name,
            category: draft.category,
            rating: draft.rating,
            comment: draft.comment,
            recommend: draft.recommend,
            visitor_likes: BTreeSet::new(),
            status: ReviewStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Likes shown for this review: the author's own recommendation counts as one
    #[must_use]
    pub fn like_count(&self) -> u64 {
        u64::from(self.recommend) + self.visitor_likes.len() as u64
    }

    /// Check if a visitor has liked this review
    #[inline]
    pub fn is_liked_by(&self, visitor_id: &str) -> bool {
        self.visitor_likes.contains(visitor_id)
    }

    /// Record a visitor like. Returns `false` if it was already present.
    pub fn add_like(&mut self, visitor_id: &str) -> bool {
        self.visitor_likes.insert(visitor_id.to_string())
    }

    /// Drop a visitor like. Returns `false` if it was not present.
    pub fn remove_like(&mut self, visitor_id: &str) -> bool {
        self.visitor_likes.remove(visitor_id)
    }
}

/// Sort direction when picking approved reviews by rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOrder {
    /// Highest rating first, newest first among equal ratings
    Highest,
    /// Lowest rating first, newest first among equal ratings
    Lowest,
}

impl RatingOrder {
    /// Compare two reviews according to this order
    pub fn compare(self, a: &Review, b: &Review) -> std::cmp::Ordering {
        let by_rating = match self {
            Self::Highest => b.rating.cmp(&a.rating),
            Self::Lowest => a.rating.cmp(&b.rating),
        };
        by_rating.then_with(|| b.created_at.cmp(&a.created_at))
    }
}

/// Aggregate statistics over all approved reviews
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReviewStats {
    pub total_reviews: u64,
    /// Arithmetic mean of ratings; 0 when there are no reviews
    pub average_rating: f64,
    /// Recommendations plus visitor likes
    pub total_likes: u64,
}

impl ReviewStats {
    /// Aggregate statistics over the given reviews
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        let mut total_reviews = 0u64;
        let mut rating_sum = 0u64;
        let mut total_likes = 0u64;

        for review in reviews {
            total_reviews += 1;
            rating_sum += u64::from(review.rating.stars());
            total_likes += review.like_count();
        }

        let average_rating = if total_reviews == 0 {
            0.0
        } else {
            rating_sum as f64 / total_reviews as f64
        };

        Self {
            total_reviews,
            average_rating,
            total_likes,
        }
    }
}
