//! tensorscript-core: the contract layer between model wrappers and a tensor backend.
//!
//! The crate provides the shape utilities used to validate rectangular input
//! (`math`), the `TensorScriptModel` trait with its default asynchronous
//! `predict` (`models`), a backend abstraction with a CPU implementation on
//! `ndarray` (`backend`), and two reference wrappers: multiple linear
//! regression and logistic regression.
//!
//! Backends are always injected by the caller; nothing in the crate holds a
//! global default.
pub mod backend;
pub mod config;
pub mod error;
pub mod math;
pub mod models;
pub mod utils;

pub use config::{ModelConfig, ModelType, PredictOptions};
pub use error::ModelError;
pub use math::{input_shape, reshape};
pub use models::{Input, Output, TensorScriptModel};
