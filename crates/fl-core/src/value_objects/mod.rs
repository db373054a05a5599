//! Value objects - immutable domain primitives

mod ids;
mod rating;

pub use ids::{IdParseError, ProductId, ReviewId};
pub use rating::Rating;
