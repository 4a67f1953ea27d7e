//! Integration tests for the model contract and its default `predict`.

use async_trait::async_trait;
use tensorscript_core::backend::NdarrayBackend;
use tensorscript_core::error::{ModelError, Result};
use tensorscript_core::models::{
    Input, ModelInterface, Output, Prediction, TensorPrediction, TensorScriptModel,
};
use tensorscript_core::{ModelConfig, PredictOptions};

/// Returns the same values for every input, one output column.
struct Constant {
    settings: ModelConfig,
    values: Vec<f32>,
    trained: bool,
}

impl Constant {
    fn new(values: Vec<f32>) -> Self {
        Self {
            settings: ModelConfig::default(),
            values,
            trained: false,
        }
    }
}

#[async_trait]
impl TensorScriptModel for Constant {
    type Handle = bool;

    fn settings(&self) -> &ModelConfig {
        &self.settings
    }

    fn train(&mut self, _x: &[Vec<f32>], _y: &[Vec<f32>]) -> Result<&bool> {
        self.trained = true;
        Ok(&self.trained)
    }

    fn calculate(&self, _matrix: &[Vec<f32>]) -> Result<Box<dyn Prediction>> {
        let n = self.values.len();
        let values = ndarray::Array2::from_shape_vec((n, 1), self.values.clone())
            .map_err(|e| ModelError::Backend(e.into()))?;
        Ok(Box::new(TensorPrediction::new(values)))
    }
}

/// Prediction whose data retrieval fails.
struct Broken;

#[async_trait]
impl Prediction for Broken {
    fn shape(&self) -> (usize, usize) {
        (0, 0)
    }

    async fn data(&self) -> Result<Vec<f32>> {
        Err(ModelError::Backend(anyhow::anyhow!("device lost")))
    }
}

struct BrokenModel {
    settings: ModelConfig,
}

#[async_trait]
impl TensorScriptModel for BrokenModel {
    type Handle = ();

    fn settings(&self) -> &ModelConfig {
        &self.settings
    }

    fn train(&mut self, _x: &[Vec<f32>], _y: &[Vec<f32>]) -> Result<&()> {
        Ok(&())
    }

    fn calculate(&self, _matrix: &[Vec<f32>]) -> Result<Box<dyn Prediction>> {
        Ok(Box::new(Broken))
    }
}

// ---------------------------------------------------------------------------
// Base model
// ---------------------------------------------------------------------------

#[test]
fn base_train_is_not_implemented() {
    let mut base = ModelInterface::new(ModelConfig::default(), NdarrayBackend::new()).unwrap();
    let err = base.train(&[vec![1.0]], &[vec![1.0]]).unwrap_err();
    assert_eq!(err.to_string(), "train method is not implemented");
}

#[test]
fn base_calculate_is_not_implemented() {
    let base = ModelInterface::new(ModelConfig::default(), NdarrayBackend::new()).unwrap();
    let err = base.calculate(&[vec![1.0]]).err().unwrap();
    assert_eq!(err.to_string(), "calculate method is not implemented");
}

#[test]
fn overriding_models_do_not_raise_not_implemented() {
    let mut model = Constant::new(vec![1.0]);
    assert!(*model.train(&[vec![1.0]], &[vec![1.0]]).unwrap());
    assert!(model.calculate(&[vec![1.0]]).is_ok());
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_returns_calculate_data() {
    let model = Constant::new(vec![0.25, 0.75]);
    let output = model
        .predict(
            Input::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]),
            PredictOptions::flat(),
        )
        .await
        .unwrap();
    assert_eq!(output, Output::Flat(vec![0.25, 0.75]));
}

#[tokio::test]
async fn predict_reshapes_by_default() {
    let model = Constant::new(vec![0.25, 0.75]);
    let output = model
        .predict(vec![vec![1.0f32], vec![3.0]].into(), PredictOptions::default())
        .await
        .unwrap();
    assert_eq!(output, Output::Matrix(vec![vec![0.25], vec![0.75]]));
}

#[tokio::test]
async fn predict_rounds_without_probability() {
    let model = Constant::new(vec![0.25, 0.75]);
    let output = model
        .predict(vec![vec![1.0f32], vec![3.0]].into(), PredictOptions::labels())
        .await
        .unwrap();
    assert_eq!(output.into_flat(), vec![0.0, 1.0]);
}

#[tokio::test]
async fn predict_rejects_ragged_input() {
    let model = Constant::new(vec![0.25, 0.75]);
    let err = model
        .predict(vec![vec![1.0f32, 2.0], vec![3.0]].into(), PredictOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_shape_mismatch());
}

#[tokio::test]
async fn predict_reports_output_that_does_not_fit_input_rows() {
    // three values for two input rows
    let model = Constant::new(vec![0.1, 0.2, 0.3]);
    let err = model
        .predict(vec![vec![1.0f32], vec![3.0]].into(), PredictOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::ShapeMismatch { rows: 2, .. }));
}

#[tokio::test]
async fn predict_forwards_data_errors() {
    let model = BrokenModel {
        settings: ModelConfig::default(),
    };
    let err = model
        .predict(vec![1.0f32].into(), PredictOptions::flat())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "device lost");
}
