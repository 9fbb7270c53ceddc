use chrono::Duration;

use super::{Baseline, BaselineKind, EntitySeries};
use crate::error::{EvalError, EvalResult};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Last-day persistence - predpoveď je pozorovanie v rovnakom čase o deň skôr.
///
/// Ak rad entity nepokrýva aspoň jeden deň (od prvého po posledný bod),
/// vráti `InsufficientHistory`. Počet riadkov nerozhoduje, rady môžu mať
/// medzery (napr. len denné hodiny). Body bez pozorovania presne o 24 h
/// skôr sú NaN.
pub struct LastDayPersistence {
    timestep_minutes: u32,
}

impl LastDayPersistence {
    pub fn new(timestep_minutes: u32) -> Self {
        Self { timestep_minutes }
    }

    /// Počet krokov, ktoré tvoria jeden deň.
    pub fn steps_per_day(&self) -> usize {
        (MINUTES_PER_DAY / self.timestep_minutes.max(1)) as usize
    }

    fn insufficient(&self, series: &EntitySeries, covered: usize) -> EvalError {
        EvalError::InsufficientHistory {
            baseline: BaselineKind::LastDay.name().to_string(),
            entity: series.entity_id.to_string(),
            required: self.steps_per_day() + 1,
            available: covered,
        }
    }
}

impl Default for LastDayPersistence {
    fn default() -> Self {
        Self::new(30)
    }
}

impl Baseline for LastDayPersistence {
    fn get_name(&self) -> &str {
        BaselineKind::LastDay.name()
    }

    fn kind(&self) -> BaselineKind {
        BaselineKind::LastDay
    }

    fn generate(&self, series: &EntitySeries) -> EvalResult<Vec<f64>> {
        let day = Duration::days(1);
        let span = match (series.timestamps.first(), series.timestamps.last()) {
            (Some(first), Some(last)) if !series.is_empty() => *last - *first,
            _ => return Err(self.insufficient(series, 0)),
        };
        if span < day {
            // počet krokov, ktoré rad pokrýva vrátane prvého bodu
            let step = i64::from(self.timestep_minutes.max(1));
            let covered = (span.num_minutes() / step) as usize + 1;
            return Err(self.insufficient(series, covered));
        }

        let values = series
            .timestamps
            .iter()
            .map(|ts| {
                let target = *ts - day;
                match series.timestamps.binary_search(&target) {
                    Ok(idx) => series.observed[idx],
                    Err(_) => f64::NAN,
                }
            })
            .collect();
        Ok(values)
    }

    fn get_supported_params(&self) -> Vec<&str> {
        vec!["timestep_minutes"]
    }

    fn set_param(&mut self, key: &str, value: &str) -> EvalResult<()> {
        match key {
            "timestep_minutes" => {
                let minutes: u32 = value.parse().map_err(|_| {
                    EvalError::config(format!("neplatná hodnota timestep_minutes: {value}"))
                })?;
                if minutes == 0 || MINUTES_PER_DAY % minutes != 0 {
                    return Err(EvalError::config(format!(
                        "timestep_minutes musí deliť 1440, zadané {minutes}"
                    )));
                }
                self.timestep_minutes = minutes;
                Ok(())
            }
            _ => Err(EvalError::config(format!("Neznámy parameter: {key}"))),
        }
    }
}
