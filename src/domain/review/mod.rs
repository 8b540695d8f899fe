//! Review aggregate
//!
//! Reviews are written elsewhere and only read here; this module owns the
//! score aggregation shared by the catalog and the detail page.

pub mod model;

pub use model::{
    fixed_scale, grade_value, listing_grade, AxisAverages, AxisGrade, RatingAxes, Review,
    ReviewAuthor,
};
