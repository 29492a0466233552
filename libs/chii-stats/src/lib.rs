pub mod rating;
pub mod tags;

pub use rating::{Rating, RatingHistogram, Score, compute_rating};
pub use tags::{TagEntry, compute_tags, tags_from_text};
