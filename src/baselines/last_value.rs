use super::{Baseline, BaselineKind, EntitySeries};
use crate::error::{EvalError, EvalResult};

/// Last-value persistence - predpoveď je posledné známe pozorovanie.
///
/// Ak tabuľka obsahuje pozorovanie v čase vydania predpovede (t0), použije sa
/// to. Inak `baseline[t] = observed[t - 1]` a prvý bod entity je NaN.
pub struct LastValuePersistence;

impl LastValuePersistence {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LastValuePersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl Baseline for LastValuePersistence {
    fn get_name(&self) -> &str {
        BaselineKind::LastValue.name()
    }

    fn kind(&self) -> BaselineKind {
        BaselineKind::LastValue
    }

    fn generate(&self, series: &EntitySeries) -> EvalResult<Vec<f64>> {
        if let Some(t0) = &series.t0_observed {
            return Ok(t0.clone());
        }

        if series.len() < 2 {
            return Err(EvalError::InsufficientHistory {
                baseline: self.get_name().to_string(),
                entity: series.entity_id.to_string(),
                required: 2,
                available: series.len(),
            });
        }

        let mut values = Vec::with_capacity(series.len());
        values.push(f64::NAN);
        values.extend_from_slice(&series.observed[..series.len() - 1]);
        Ok(values)
    }
}
