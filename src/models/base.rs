use async_trait::async_trait;
use log::info;

use crate::backend::{Activation, Backend, LayerSpec, TensorModel};
use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use crate::math::{input_shape, to_array2, Shape};
use crate::models::model_trait::TensorScriptModel;
use crate::models::prediction::{Prediction, TensorPrediction};
use crate::models::trainer;

/// State shared by every model wrapper: hyper-parameters, the backend the
/// wrapper was built with, and the trained backend model once there is one.
///
/// On its own it is the unextended base model; `train` and `calculate` report
/// [`ModelError::NotImplemented`]. Concrete wrappers embed it and use the
/// dense-layer helpers below.
pub struct ModelInterface<B: Backend> {
    settings: ModelConfig,
    backend: B,
    model: Option<B::Model>,
    y_shape: Option<Shape>,
}

impl<B: Backend> ModelInterface<B> {
    pub fn new(settings: ModelConfig, backend: B) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            backend,
            model: None,
            y_shape: None,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn model(&self) -> Option<&B::Model> {
        self.model.as_ref()
    }

    /// Shape of the dependent variables used for the last training run.
    pub fn y_shape(&self) -> Option<Shape> {
        self.y_shape
    }

    /// Asks the backend for a fresh model.
    pub fn load_model(&self, spec: &LayerSpec) -> Result<B::Model> {
        Ok(self.backend.load_model(spec)?)
    }

    /// Trains a single dense layer with `activation` on `x_matrix` / `y_matrix`
    /// and keeps it as the current model. Returns the per-epoch loss history.
    pub fn fit_dense(
        &mut self,
        x_matrix: &[Vec<f32>],
        y_matrix: &[Vec<f32>],
        activation: Activation,
    ) -> Result<Vec<f32>> {
        let (x_rows, x_cols) = input_shape(x_matrix)?;
        let (y_rows, y_cols) = input_shape(y_matrix)?;
        if x_rows != y_rows {
            return Err(ModelError::DimensionMismatch {
                what: "training rows",
                expected: x_rows,
                found: y_rows,
            });
        }

        let x = to_array2(x_matrix)?;
        let y = to_array2(y_matrix)?;
        let spec = LayerSpec {
            input_dim: x_cols,
            output_dim: y_cols,
            activation,
            seed: self.settings.seed,
        };
        let mut model = self.load_model(&spec)?;
        info!(
            "Training {}x{} dense layer on {} rows with the {} backend",
            x_cols,
            y_cols,
            x_rows,
            self.backend.name()
        );
        let history = trainer::fit(&mut model, &x, &y, &self.settings)?;

        self.model = Some(model);
        self.y_shape = Some((y_rows, y_cols));
        Ok(history)
    }

    /// Runs the trained model on `matrix`.
    pub fn forward_dense(&self, matrix: &[Vec<f32>]) -> Result<Box<dyn Prediction>> {
        let model = self.model.as_ref().ok_or(ModelError::Untrained)?;
        let (_, cols) = input_shape(matrix)?;
        if cols != model.input_dim() {
            return Err(ModelError::DimensionMismatch {
                what: "input columns",
                expected: model.input_dim(),
                found: cols,
            });
        }
        let x = to_array2(matrix)?;
        let values = model.forward(&x)?;
        Ok(Box::new(TensorPrediction::new(values)))
    }

    pub(crate) fn trained_model(&self) -> Result<&B::Model> {
        self.model.as_ref().ok_or(ModelError::Untrained)
    }
}

#[async_trait]
impl<B: Backend> TensorScriptModel for ModelInterface<B> {
    type Handle = B::Model;

    fn settings(&self) -> &ModelConfig {
        &self.settings
    }

    fn train(&mut self, _x_matrix: &[Vec<f32>], _y_matrix: &[Vec<f32>]) -> Result<&B::Model> {
        Err(ModelError::NotImplemented("train"))
    }

    fn calculate(&self, _matrix: &[Vec<f32>]) -> Result<Box<dyn Prediction>> {
        Err(ModelError::NotImplemented("calculate"))
    }

    fn output_width(&self) -> Option<usize> {
        self.y_shape.map(|(_, cols)| cols)
    }

    fn name(&self) -> &str {
        "model_interface"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NdarrayBackend;
    use crate::config::PredictOptions;
    use serde_json::json;

    fn base() -> ModelInterface<NdarrayBackend> {
        ModelInterface::new(ModelConfig::default(), NdarrayBackend::new()).unwrap()
    }

    #[test]
    fn test_settings_are_kept() {
        let mut settings = ModelConfig::default();
        settings.extra.insert("test".to_string(), json!("prop"));
        let model = ModelInterface::new(settings, NdarrayBackend::new()).unwrap();
        assert_eq!(model.settings().get("test"), Some(&json!("prop")));
        assert_eq!(model.backend().name(), "ndarray");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = ModelConfig {
            epochs: 0,
            ..ModelConfig::default()
        };
        assert!(matches!(
            ModelInterface::new(settings, NdarrayBackend::new()),
            Err(ModelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_train_and_calculate_are_not_implemented() {
        let mut model = base();
        let x = vec![vec![1.0f32]];
        assert!(matches!(model.train(&x, &x), Err(ModelError::NotImplemented("train"))));
        assert!(matches!(model.calculate(&x), Err(ModelError::NotImplemented("calculate"))));
    }

    #[tokio::test]
    async fn test_predict_on_base_forwards_not_implemented() {
        let model = base();
        let err = model
            .predict(vec![1.0f32, 2.0].into(), PredictOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "calculate method is not implemented");
    }

    #[tokio::test]
    async fn test_predict_on_base_with_empty_input_forwards_not_implemented() {
        let model = base();
        let empty: Vec<Vec<f32>> = Vec::new();
        let err = model
            .predict(empty.into(), PredictOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::NotImplemented("calculate")));
    }

    #[test]
    fn test_fit_dense_rejects_mismatched_rows() {
        let mut model = base();
        let x = vec![vec![1.0f32], vec![2.0]];
        let y = vec![vec![1.0f32]];
        assert!(matches!(
            model.fit_dense(&x, &y, Activation::Identity),
            Err(ModelError::DimensionMismatch { expected: 2, found: 1, .. })
        ));
        assert!(model.model().is_none());
    }

    #[test]
    fn test_forward_dense_before_training() {
        let model = base();
        assert!(matches!(
            model.forward_dense(&[vec![1.0f32]]),
            Err(ModelError::Untrained)
        ));
    }
}
