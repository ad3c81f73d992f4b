//! Нормализация плотных признаков (z-score)

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};

use crate::error::{PipelineError, Result};

pub struct DataNormalizer {
    mean: Option<Array1<f64>>,
    std: Option<Array1<f64>>,
}

impl DataNormalizer {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.mean.is_some() && self.std.is_some()
    }

    pub fn fit(&mut self, X: &Array2<f64>) -> Result<()> {
        if X.nrows() == 0 {
            return Err(PipelineError::InvalidConfig(
                "cannot standardize an empty feature matrix".to_string(),
            ));
        }

        let mean = X
            .mean_axis(Axis(0))
            .ok_or(PipelineError::NotFitted("feature mean"))?;
        let mut std = X.std_axis(Axis(0), 0.0);

        // Постоянные признаки не масштабируем
        std.mapv_inplace(|v| if v < 1e-10 { 1.0 } else { v });

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>> {
        let mean = self.mean.as_ref().ok_or(PipelineError::NotFitted("DataNormalizer"))?;
        let std = self.std.as_ref().ok_or(PipelineError::NotFitted("DataNormalizer"))?;

        if X.ncols() != mean.len() {
            return Err(PipelineError::InvalidConfig(format!(
                "expected {} feature columns, got {}",
                mean.len(),
                X.ncols()
            )));
        }

        Ok((X - mean) / std)
    }

    pub fn fit_transform(&mut self, X: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(X)?;
        self.transform(X)
    }
}

impl Default for DataNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
