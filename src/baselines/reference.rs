use super::{Baseline, BaselineKind, EntitySeries};
use crate::error::{EvalError, EvalResult};

/// Reference baseline - externá dôveryhodná séria (napr. odhad tretej strany).
/// Hodnotí sa ako baseline, nie ako skutočnosť.
pub struct ReferenceBaseline;

impl ReferenceBaseline {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReferenceBaseline {
    fn default() -> Self {
        Self::new()
    }
}

impl Baseline for ReferenceBaseline {
    fn get_name(&self) -> &str {
        BaselineKind::Reference.name()
    }

    fn kind(&self) -> BaselineKind {
        BaselineKind::Reference
    }

    fn generate(&self, series: &EntitySeries) -> EvalResult<Vec<f64>> {
        series
            .reference
            .clone()
            .ok_or_else(|| EvalError::schema("reference"))
    }
}
