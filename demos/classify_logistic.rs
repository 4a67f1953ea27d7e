use anyhow::Result;
use tensorscript_core::backend::NdarrayBackend;
use tensorscript_core::math::json::matrix_from_value;
use tensorscript_core::models::factory::build_model;
use tensorscript_core::{ModelConfig, ModelType, PredictOptions, TensorScriptModel};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Tiny synthetic dataset: 6 samples, 2 features
    let x = matrix_from_value(&serde_json::json!([
        [1.0, 0.0],
        [0.0, 1.0],
        [1.0, 0.1],
        [0.0, 0.9],
        [1.1, 0.0],
        [0.0, 1.2]
    ]))?;
    let y = matrix_from_value(&serde_json::json!([[1], [0], [1], [0], [1], [0]]))?;

    let config = ModelConfig {
        learning_rate: 0.5,
        epochs: 200,
        model_type: ModelType::LogisticRegression,
        ..ModelConfig::default()
    };
    let mut clf = build_model(config, NdarrayBackend::new())?;
    clf.train(&x, &y)?;

    let probabilities = clf.predict(x.clone().into(), PredictOptions::default()).await?;
    let labels = clf.predict(x.into(), PredictOptions::labels()).await?;

    println!("probabilities = {:?}", probabilities);
    println!("labels        = {:?}", labels);
    Ok(())
}
