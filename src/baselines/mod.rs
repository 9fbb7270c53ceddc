/// Jednoduché referenčné predpovede (baseline), voči ktorým sa porovnáva model.
/// Nový baseline stačí implementovať cez trait `Baseline` a zaregistrovať
/// v `BaselineFactory`.

pub mod factory;
pub mod last_day;
pub mod last_value;
pub mod max_baseline;
pub mod reference;
pub mod zero;

pub use factory::BaselineFactory;
pub use last_day::LastDayPersistence;
pub use last_value::LastValuePersistence;
pub use max_baseline::MaxBaseline;
pub use reference::ReferenceBaseline;
pub use zero::ZeroBaseline;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::EvaluationTable;
use crate::error::{EvalError, EvalResult};

/// Druh baseline, ako sa zadáva v konfigurácii.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineKind {
    Zero,
    Max,
    LastValue,
    LastDay,
    Reference,
}

impl BaselineKind {
    /// Názov použitý v kľúčoch výsledku.
    pub fn name(&self) -> &'static str {
        match self {
            BaselineKind::Zero => "zero_baseline",
            BaselineKind::Max => "max_baseline",
            BaselineKind::LastValue => "last_value_persistence_baseline",
            BaselineKind::LastDay => "last_day_persistence_baseline",
            BaselineKind::Reference => "reference_baseline",
        }
    }

    pub fn all() -> Vec<BaselineKind> {
        vec![
            BaselineKind::Zero,
            BaselineKind::Max,
            BaselineKind::LastValue,
            BaselineKind::LastDay,
            BaselineKind::Reference,
        ]
    }

    pub fn from_name(name: &str) -> EvalResult<BaselineKind> {
        match name.to_lowercase().as_str() {
            "zero" | "zero_baseline" => Ok(BaselineKind::Zero),
            "max" | "max_baseline" => Ok(BaselineKind::Max),
            "last_value" | "last_value_persistence" | "last_value_persistence_baseline" => {
                Ok(BaselineKind::LastValue)
            }
            "last_day" | "last_day_persistence" | "last_day_persistence_baseline" => {
                Ok(BaselineKind::LastDay)
            }
            "reference" | "reference_baseline" => Ok(BaselineKind::Reference),
            _ => Err(EvalError::UnknownBaseline(name.to_string())),
        }
    }
}

/// Časový rad jednej entity zoradený podľa času.
#[derive(Debug, Clone)]
pub struct EntitySeries<'a> {
    pub entity_id: &'a str,
    pub timestamps: Vec<DateTime<Utc>>,
    pub observed: Vec<f64>,
    /// Kapacita pre každý bod (už doplnená o fallback)
    pub capacity: Vec<f64>,
    pub reference: Option<Vec<f64>>,
    pub t0_observed: Option<Vec<f64>>,
}

impl<'a> EntitySeries<'a> {
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}

/// Strategy pattern pre generovanie baseline predpovedí.
pub trait Baseline: Send + Sync {
    fn get_name(&self) -> &str;

    fn kind(&self) -> BaselineKind;

    /// Vygeneruje sériu rovnakej dĺžky a zarovnania ako `series.observed`.
    fn generate(&self, series: &EntitySeries) -> EvalResult<Vec<f64>>;

    fn get_supported_params(&self) -> Vec<&str> {
        vec![]
    }

    fn set_param(&mut self, key: &str, value: &str) -> EvalResult<()> {
        let _ = value;
        Err(EvalError::config(format!(
            "baseline '{}' nepozná parameter '{}'",
            self.get_name(),
            key
        )))
    }
}

/// Spustí baseline pre každú entitu a výsledok zarovná s riadkami tabuľky.
///
/// Entity s nedostatočnou históriou dostanú NaN, ostatné chyby sa propagujú.
pub fn generate_for_table(
    baseline: &dyn Baseline,
    table: &EvaluationTable,
    capacities: &[f64],
) -> EvalResult<Vec<f64>> {
    let rows = table.rows();
    let mut output = vec![f64::NAN; rows.len()];

    for (entity_id, indices) in table.entity_rows() {
        let series = EntitySeries {
            entity_id,
            timestamps: indices.iter().map(|&i| rows[i].timestamp).collect(),
            observed: indices.iter().map(|&i| rows[i].observed).collect(),
            capacity: indices
                .iter()
                .map(|&i| capacities.get(i).copied().unwrap_or(f64::NAN))
                .collect(),
            reference: table.has_reference().then(|| {
                indices
                    .iter()
                    .map(|&i| rows[i].reference.unwrap_or(f64::NAN))
                    .collect()
            }),
            t0_observed: table.has_t0_observed().then(|| {
                indices
                    .iter()
                    .map(|&i| rows[i].t0_observed.unwrap_or(f64::NAN))
                    .collect()
            }),
        };

        match baseline.generate(&series) {
            Ok(values) => {
                if values.len() != indices.len() {
                    return Err(EvalError::LengthMismatch {
                        column: baseline.get_name().to_string(),
                        expected: indices.len(),
                        actual: values.len(),
                    });
                }
                for (&row_idx, value) in indices.iter().zip(values) {
                    output[row_idx] = value;
                }
            }
            Err(err) if err.is_recoverable() => {
                debug!(
                    baseline = baseline.get_name(),
                    entity = entity_id,
                    "{err}, hodnoty budú NaN"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Ok(output)
}
