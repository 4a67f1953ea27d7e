use anyhow::Result;
use tensorscript_core::backend::NdarrayBackend;
use tensorscript_core::math::input_shape;
use tensorscript_core::models::MultipleLinearRegression;
use tensorscript_core::utils::logging::init_logger;
use tensorscript_core::{ModelConfig, PredictOptions, TensorScriptModel};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger("info");

    // y = 3 * x0 - 2 * x1 + 0.5
    let x: Vec<Vec<f32>> = (0..20)
        .map(|i| vec![i as f32 / 10.0, (i % 4) as f32 / 2.0])
        .collect();
    let y: Vec<Vec<f32>> = x
        .iter()
        .map(|r| vec![3.0 * r[0] - 2.0 * r[1] + 0.5])
        .collect();

    println!("X shape: {:?}", input_shape(&x)?);
    println!("y shape: {:?}", input_shape(&y)?);

    let config = match std::env::args().nth(1) {
        Some(path) => ModelConfig::from_json_file(path)?,
        None => ModelConfig {
            learning_rate: 0.1,
            epochs: 500,
            batch_size: 5,
            ..ModelConfig::default()
        },
    };

    let mut model = MultipleLinearRegression::new(config, NdarrayBackend::new())?;
    let handle = model.train(&x, &y)?;
    println!("weights = {:?}", handle.weights());

    let preds = model
        .predict(vec![vec![1.0f32, 0.5], vec![0.0, 0.0]].into(), PredictOptions::default())
        .await?;
    println!("predictions for [1.0, 0.5] and [0.0, 0.0]: {:?}", preds);
    Ok(())
}
