use async_trait::async_trait;

use crate::backend::{Activation, Backend, NdarrayBackend};
use crate::config::{ModelConfig, PredictOptions};
use crate::error::{ModelError, Result};
use crate::math::Matrix;
use crate::models::base::ModelInterface;
use crate::models::model_trait::{Input, TensorScriptModel};
use crate::models::prediction::Prediction;

/// Logistic regression on 0/1 targets. `calculate` yields probabilities;
/// predicting with [`PredictOptions::labels`] rounds them to class labels.
pub struct LogisticRegression<B: Backend = NdarrayBackend> {
    base: ModelInterface<B>,
    loss_history: Vec<f32>,
}

impl<B: Backend> LogisticRegression<B> {
    pub fn new(settings: ModelConfig, backend: B) -> Result<Self> {
        Ok(Self {
            base: ModelInterface::new(settings, backend)?,
            loss_history: Vec::new(),
        })
    }

    pub fn loss_history(&self) -> &[f32] {
        &self.loss_history
    }

    /// Class labels (0 or 1) for every input row and output column.
    pub async fn predict_classes(&self, input: Input) -> Result<Matrix<f32>> {
        let output = self.predict(input, PredictOptions::labels()).await?;
        Ok(output.as_matrix().cloned().unwrap_or_default())
    }
}

#[async_trait]
impl<B: Backend> TensorScriptModel for LogisticRegression<B> {
    type Handle = B::Model;

    fn settings(&self) -> &ModelConfig {
        self.base.settings()
    }

    fn train(&mut self, x_matrix: &[Vec<f32>], y_matrix: &[Vec<f32>]) -> Result<&B::Model> {
        if let Some((row, value)) = y_matrix
            .iter()
            .enumerate()
            .flat_map(|(i, r)| r.iter().map(move |v| (i, *v)))
            .find(|(_, v)| !(0.0..=1.0).contains(v))
        {
            return Err(ModelError::InvalidType(format!(
                "logistic targets must lie in [0, 1], row {} has {}",
                row, value
            )));
        }
        self.loss_history = self.base.fit_dense(x_matrix, y_matrix, Activation::Sigmoid)?;
        self.base.trained_model()
    }

    fn calculate(&self, matrix: &[Vec<f32>]) -> Result<Box<dyn Prediction>> {
        self.base.forward_dense(matrix)
    }

    fn output_width(&self) -> Option<usize> {
        self.base.output_width()
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}
