//! Shape inference and reshaping for row-major matrices.
//!
//! Matrices come in as `Vec<Vec<T>>` (or anything whose rows are `AsRef<[T]>`)
//! and are validated for rectangularity before they reach a backend.
pub mod json;
pub mod shape;

pub use shape::{flatten, from_array2, input_shape, reshape, to_array2, Matrix, Shape};
