pub mod base;
pub mod factory;
pub mod linear;
pub mod logistic;
pub mod model_trait;
pub mod prediction;
pub mod trainer;

pub use base::ModelInterface;
pub use linear::MultipleLinearRegression;
pub use logistic::LogisticRegression;
pub use model_trait::{Input, Output, TensorScriptModel};
pub use prediction::{Prediction, TensorPrediction};
