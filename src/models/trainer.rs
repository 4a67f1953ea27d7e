use log::{debug, info, warn};
use ndarray::{s, Array2};

use crate::backend::TensorModel;
use crate::config::ModelConfig;
use crate::error::{ModelError, Result};

/// Mini-batch gradient descent over `config.epochs` epochs.
///
/// Batches are contiguous slices of `config.batch_size` rows (the last one may
/// be shorter). Returns the mean batch loss of every epoch.
pub fn fit<M>(
    model: &mut M,
    x: &Array2<f32>,
    y: &Array2<f32>,
    config: &ModelConfig,
) -> Result<Vec<f32>>
where
    M: TensorModel + ?Sized,
{
    config.validate()?;
    if x.nrows() != y.nrows() {
        return Err(ModelError::DimensionMismatch {
            what: "training rows",
            expected: x.nrows(),
            found: y.nrows(),
        });
    }
    let n = x.nrows();
    if n == 0 {
        return Err(ModelError::InvalidType("training data has no rows".to_string()));
    }
    let batch_size = config.batch_size.min(n);

    let mut history = Vec::with_capacity(config.epochs);
    for epoch in 0..config.epochs {
        let mut total = 0.0f32;
        let mut batches = 0usize;
        let mut start = 0;
        while start < n {
            let end = (start + batch_size).min(n);
            let x_batch = x.slice(s![start..end, ..]).to_owned();
            let y_batch = y.slice(s![start..end, ..]).to_owned();
            total += model.fit_batch(&x_batch, &y_batch, config.learning_rate)?;
            batches += 1;
            start = end;
        }

        let loss = total / batches as f32;
        debug!("epoch {}/{}: loss = {:.6}", epoch + 1, config.epochs, loss);
        if !loss.is_finite() {
            warn!("loss diverged at epoch {}, consider a smaller learning_rate", epoch + 1);
        }
        history.push(loss);
    }

    if let Some(last) = history.last() {
        info!(
            "Finished {} epochs ({} rows, batch size {}), final loss {:.6}",
            config.epochs, n, batch_size, last
        );
    }
    Ok(history)
}
