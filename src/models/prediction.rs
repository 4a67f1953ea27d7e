use async_trait::async_trait;
use ndarray::Array2;

use crate::error::Result;
use crate::math::Shape;

/// Result of [`calculate`](crate::models::TensorScriptModel::calculate).
///
/// The values may still live on the backend; `data` fetches them as a flat
/// row-major sequence.
#[async_trait]
pub trait Prediction: Send + Sync {
    fn shape(&self) -> Shape;

    async fn data(&self) -> Result<Vec<f32>>;
}

/// Prediction already materialised in host memory.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorPrediction {
    values: Array2<f32>,
}

impl TensorPrediction {
    pub fn new(values: Array2<f32>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }
}

#[async_trait]
impl Prediction for TensorPrediction {
    fn shape(&self) -> Shape {
        self.values.dim()
    }

    async fn data(&self) -> Result<Vec<f32>> {
        Ok(self.values.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[tokio::test]
    async fn test_data_is_row_major() {
        let prediction = TensorPrediction::new(array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(prediction.shape(), (3, 2));
        assert_eq!(prediction.values()[[2, 0]], 5.0);
        assert_eq!(prediction.data().await.unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
