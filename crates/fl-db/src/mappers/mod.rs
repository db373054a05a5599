//! Model to entity mappers
//!
//! - `From<Model> for Entity` where every row is a valid entity
//! - `TryFrom<Model>` where a column holds a constrained value (ratings, statuses)

mod product;
mod review;
mod user;
