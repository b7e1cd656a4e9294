//! Aggregates computed from a filtered selection of rows.
//!
//! Every function takes the dataset plus a slice of row indices produced by
//! [`crate::data::filter`], so the same selection feeds all three views
//! without copying rows.

pub mod aggregate;
pub mod correlation;
