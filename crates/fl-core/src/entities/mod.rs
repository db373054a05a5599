//! Domain entities - core business objects

mod product;
mod review;
mod user;
mod visit;

pub use product::{Product, ProductDraft};
pub use review::{RatingOrder, Review, ReviewDraft, ReviewStats, ReviewStatus};
pub use user::AdminUser;
pub use visit::{SiteVisit, TOTAL_VISITS_METRIC};
