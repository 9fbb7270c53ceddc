use super::{Baseline, BaselineKind, EntitySeries};
use crate::error::EvalResult;

/// Zero baseline - predpovedá nulový výkon vo všetkých časoch.
pub struct ZeroBaseline;

impl ZeroBaseline {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZeroBaseline {
    fn default() -> Self {
        Self::new()
    }
}

impl Baseline for ZeroBaseline {
    fn get_name(&self) -> &str {
        BaselineKind::Zero.name()
    }

    fn kind(&self) -> BaselineKind {
        BaselineKind::Zero
    }

    fn generate(&self, series: &EntitySeries) -> EvalResult<Vec<f64>> {
        Ok(vec![0.0; series.len()])
    }
}
