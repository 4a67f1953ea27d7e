use async_trait::async_trait;

use crate::backend::{Activation, Backend, NdarrayBackend};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::models::base::ModelInterface;
use crate::models::model_trait::TensorScriptModel;
use crate::models::prediction::Prediction;

/// Multiple linear regression: one dense layer without activation, fitted on
/// squared error.
pub struct MultipleLinearRegression<B: Backend = NdarrayBackend> {
    base: ModelInterface<B>,
    loss_history: Vec<f32>,
}

impl<B: Backend> MultipleLinearRegression<B> {
    pub fn new(settings: ModelConfig, backend: B) -> Result<Self> {
        Ok(Self {
            base: ModelInterface::new(settings, backend)?,
            loss_history: Vec::new(),
        })
    }

    /// Mean loss of every epoch of the last training run.
    pub fn loss_history(&self) -> &[f32] {
        &self.loss_history
    }

    pub fn base(&self) -> &ModelInterface<B> {
        &self.base
    }
}

#[async_trait]
impl<B: Backend> TensorScriptModel for MultipleLinearRegression<B> {
    type Handle = B::Model;

    fn settings(&self) -> &ModelConfig {
        self.base.settings()
    }

    fn train(&mut self, x_matrix: &[Vec<f32>], y_matrix: &[Vec<f32>]) -> Result<&B::Model> {
        self.loss_history = self.base.fit_dense(x_matrix, y_matrix, Activation::Identity)?;
        self.base.trained_model()
    }

    fn calculate(&self, matrix: &[Vec<f32>]) -> Result<Box<dyn Prediction>> {
        self.base.forward_dense(matrix)
    }

    fn output_width(&self) -> Option<usize> {
        self.base.output_width()
    }

    fn name(&self) -> &str {
        "multiple_linear_regression"
    }
}
