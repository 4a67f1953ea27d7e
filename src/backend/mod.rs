//! Tensor backends consumed by the model wrappers.
//!
//! A backend only has to hand out trainable models; the wrappers in
//! [`crate::models`] own the backend they were built with and never reach for a
//! global default.
use anyhow::Result;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub mod ndarray_backend;

pub use ndarray_backend::{DenseModel, NdarrayBackend};

/// Output non-linearity of a dense layer.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Identity,
    Sigmoid,
}

/// What to build when a wrapper asks its backend for a model.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    pub input_dim: usize,
    pub output_dim: usize,
    pub activation: Activation,
    /// Seed for weight initialisation.
    pub seed: u64,
}

pub trait Backend: Send + Sync {
    type Model: TensorModel;

    fn name(&self) -> &str;

    /// Builds a fresh, untrained model for `spec`.
    fn load_model(&self, spec: &LayerSpec) -> Result<Self::Model>;
}

/// A trainable model living on a backend.
pub trait TensorModel: Send + Sync {
    fn input_dim(&self) -> usize;

    fn output_dim(&self) -> usize;

    /// Runs inference on a `(rows, input_dim)` batch, yielding `(rows, output_dim)`.
    fn forward(&self, x: &Array2<f32>) -> Result<Array2<f32>>;

    /// One gradient step on a batch. Returns the batch loss measured before the update.
    fn fit_batch(&mut self, x: &Array2<f32>, y: &Array2<f32>, learning_rate: f32) -> Result<f32>;
}
