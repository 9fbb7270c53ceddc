use super::{Baseline, BaselineKind, EntitySeries};
use crate::error::EvalResult;

/// Max baseline - predpovedá inštalovaný výkon (alebo maximum pozorovaní,
/// ak kapacita nie je známa) pre všetky časy.
pub struct MaxBaseline;

impl MaxBaseline {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MaxBaseline {
    fn default() -> Self {
        Self::new()
    }
}

impl Baseline for MaxBaseline {
    fn get_name(&self) -> &str {
        BaselineKind::Max.name()
    }

    fn kind(&self) -> BaselineKind {
        BaselineKind::Max
    }

    fn generate(&self, series: &EntitySeries) -> EvalResult<Vec<f64>> {
        Ok(series.capacity.clone())
    }
}
