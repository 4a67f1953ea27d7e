use async_trait::async_trait;
use log::{debug, warn};

use crate::config::{ModelConfig, PredictOptions};
use crate::error::Result;
use crate::math::{input_shape, reshape, Matrix};
use crate::models::prediction::Prediction;

/// Independent variables handed to [`TensorScriptModel::predict`].
///
/// A single observation can be passed as a plain row; it is treated as a
/// one-row matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Row(Vec<f32>),
    Matrix(Matrix<f32>),
}

impl Input {
    pub fn into_matrix(self) -> Matrix<f32> {
        match self {
            Input::Row(row) => vec![row],
            Input::Matrix(matrix) => matrix,
        }
    }
}

impl From<Vec<f32>> for Input {
    fn from(row: Vec<f32>) -> Self {
        Input::Row(row)
    }
}

impl From<&[f32]> for Input {
    fn from(row: &[f32]) -> Self {
        Input::Row(row.to_vec())
    }
}

impl From<Matrix<f32>> for Input {
    fn from(matrix: Matrix<f32>) -> Self {
        Input::Matrix(matrix)
    }
}

impl From<&[Vec<f32>]> for Input {
    fn from(matrix: &[Vec<f32>]) -> Self {
        Input::Matrix(matrix.to_vec())
    }
}

/// Values returned by [`TensorScriptModel::predict`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Raw backend data, row-major.
    Flat(Vec<f32>),
    /// One row of outputs per input row.
    Matrix(Matrix<f32>),
}

impl Output {
    pub fn as_matrix(&self) -> Option<&Matrix<f32>> {
        match self {
            Output::Matrix(matrix) => Some(matrix),
            Output::Flat(_) => None,
        }
    }

    pub fn into_flat(self) -> Vec<f32> {
        match self {
            Output::Flat(values) => values,
            Output::Matrix(matrix) => matrix.into_iter().flatten().collect(),
        }
    }
}

/// Contract shared by every model wrapper.
///
/// Implementors supply `train` and `calculate`; `predict` is provided on top of
/// `calculate`.
#[async_trait]
pub trait TensorScriptModel: Send + Sync {
    /// Backend model produced by training.
    type Handle: Send + Sync;

    fn settings(&self) -> &ModelConfig;

    /// Fits the model on independent variables `x_matrix` and dependent variables `y_matrix`.
    fn train(&mut self, x_matrix: &[Vec<f32>], y_matrix: &[Vec<f32>]) -> Result<&Self::Handle>;

    /// Runs the trained model on `matrix`.
    fn calculate(&self, matrix: &[Vec<f32>]) -> Result<Box<dyn Prediction>>;

    /// Number of dependent variables seen during training.
    fn output_width(&self) -> Option<usize> {
        None
    }

    fn name(&self) -> &str {
        "model"
    }

    /// Predicts dependent variables for `input`.
    ///
    /// With `options.json` the flat backend data is reshaped to one row per
    /// input row; with `options.probability == false` every value is rounded
    /// to the nearest integer first. Errors from `calculate` and from the
    /// prediction data are returned unchanged. The input shape is only checked
    /// afterwards, when it is needed for the reshape.
    async fn predict(&self, input: Input, options: PredictOptions) -> Result<Output> {
        let x_matrix = input.into_matrix();
        debug!(
            "{}: predicting {} rows with {:?}",
            self.name(),
            x_matrix.len(),
            options
        );

        let predictions = self.calculate(&x_matrix)?.data().await?;
        if !options.json {
            return Ok(Output::Flat(predictions));
        }

        let (rows, _) = input_shape(&x_matrix)?;

        let values: Vec<f32> = if options.probability {
            predictions
        } else {
            predictions.iter().map(|v| v.round()).collect()
        };

        let width = match self.output_width() {
            Some(width) => width,
            None => {
                warn!(
                    "{}: output width unknown, inferring from {} values over {} rows",
                    self.name(),
                    values.len(),
                    rows
                );
                values.len() / rows
            }
        };

        Ok(Output::Matrix(reshape(&values, (rows, width))?))
    }
}
