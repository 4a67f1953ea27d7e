use crate::backend::Backend;
use crate::config::{ModelConfig, ModelType};
use crate::error::Result;
use crate::models::linear::MultipleLinearRegression;
use crate::models::logistic::LogisticRegression;
use crate::models::model_trait::TensorScriptModel;

/// Build a boxed model from a `ModelConfig`, owning `backend`.
pub fn build_model<B>(
    config: ModelConfig,
    backend: B,
) -> Result<Box<dyn TensorScriptModel<Handle = B::Model>>>
where
    B: Backend + 'static,
    B::Model: 'static,
{
    let model: Box<dyn TensorScriptModel<Handle = B::Model>> = match config.model_type {
        ModelType::LinearRegression => Box::new(MultipleLinearRegression::new(config, backend)?),
        ModelType::LogisticRegression => Box::new(LogisticRegression::new(config, backend)?),
    };
    Ok(model)
}
