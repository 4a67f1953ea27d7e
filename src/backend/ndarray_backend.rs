use anyhow::{bail, ensure, Result};
use log::debug;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::backend::{Activation, Backend, LayerSpec, TensorModel};

const LOG_EPS: f32 = 1e-7;

/// CPU backend built on `ndarray`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NdarrayBackend;

impl NdarrayBackend {
    pub fn new() -> Self {
        NdarrayBackend
    }
}

impl Backend for NdarrayBackend {
    type Model = DenseModel;

    fn name(&self) -> &str {
        "ndarray"
    }

    fn load_model(&self, spec: &LayerSpec) -> Result<DenseModel> {
        ensure!(
            spec.input_dim > 0 && spec.output_dim > 0,
            "dense layer needs non-zero dimensions, got {}x{}",
            spec.input_dim,
            spec.output_dim
        );

        // Glorot-uniform weights, zero bias.
        let limit = (6.0 / (spec.input_dim + spec.output_dim) as f32).sqrt();
        let mut rng = StdRng::seed_from_u64(spec.seed);
        let weights = Array2::from_shape_simple_fn((spec.input_dim, spec.output_dim), || {
            rng.gen_range(-limit..limit)
        });
        let bias = Array1::zeros(spec.output_dim);

        debug!(
            "Initialised dense layer {}x{} ({:?}) with seed {}",
            spec.input_dim, spec.output_dim, spec.activation, spec.seed
        );
        DenseModel::from_parts(weights, bias, spec.activation)
    }
}

/// Single fully connected layer: `activation(x · W + b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseModel {
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl DenseModel {
    pub fn from_parts(
        weights: Array2<f32>,
        bias: Array1<f32>,
        activation: Activation,
    ) -> Result<Self> {
        ensure!(
            weights.ncols() == bias.len(),
            "bias of length {} does not match {} output columns",
            bias.len(),
            weights.ncols()
        );
        Ok(Self {
            weights,
            bias,
            activation,
        })
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    pub fn bias(&self) -> &Array1<f32> {
        &self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    fn loss(&self, predictions: &Array2<f32>, y: &Array2<f32>) -> f32 {
        let n = predictions.len().max(1) as f32;
        match self.activation {
            Activation::Identity => {
                predictions
                    .iter()
                    .zip(y.iter())
                    .map(|(p, t)| (p - t) * (p - t))
                    .sum::<f32>()
                    / n
            }
            Activation::Sigmoid => {
                -predictions
                    .iter()
                    .zip(y.iter())
                    .map(|(p, t)| {
                        let p = p.max(LOG_EPS).min(1.0 - LOG_EPS);
                        t * p.ln() + (1.0 - t) * (1.0 - p).ln()
                    })
                    .sum::<f32>()
                    / n
            }
        }
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

impl TensorModel for DenseModel {
    fn input_dim(&self) -> usize {
        self.weights.nrows()
    }

    fn output_dim(&self) -> usize {
        self.weights.ncols()
    }

    fn forward(&self, x: &Array2<f32>) -> Result<Array2<f32>> {
        if x.ncols() != self.input_dim() {
            bail!(
                "expected {} input columns, got {}",
                self.input_dim(),
                x.ncols()
            );
        }
        let mut z = x.dot(&self.weights) + &self.bias;
        if self.activation == Activation::Sigmoid {
            z.mapv_inplace(sigmoid);
        }
        Ok(z)
    }

    fn fit_batch(&mut self, x: &Array2<f32>, y: &Array2<f32>, learning_rate: f32) -> Result<f32> {
        ensure!(
            y.dim() == (x.nrows(), self.output_dim()),
            "targets of shape {:?} do not match batch of {} rows and {} outputs",
            y.dim(),
            x.nrows(),
            self.output_dim()
        );
        ensure!(x.nrows() > 0, "cannot fit an empty batch");

        let predictions = self.forward(x)?;
        let loss = self.loss(&predictions, y);

        // Identity with squared error and sigmoid with cross-entropy share the
        // same output gradient: predictions - targets.
        let n = x.nrows() as f32;
        let delta = &predictions - y;
        let grad_w = x.t().dot(&delta) / n;
        let grad_b = delta.sum_axis(Axis(0)) / n;

        self.weights.scaled_add(-learning_rate, &grad_w);
        self.bias.scaled_add(-learning_rate, &grad_b);

        Ok(loss)
    }
}
