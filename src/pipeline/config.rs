use serde::{Deserialize, Serialize};

use crate::baselines::BaselineKind;
use crate::data::{ColumnConfig, SchemaRequirements};
use crate::error::{EvalError, EvalResult};
use crate::evaluation::ErrorMetric;
use crate::segmentation::SegmentationConfig;

/// Kompletné nastavenie jednej evaluácie. Chýbajúce kľúče v JSON dostanú predvolené hodnoty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub columns: ColumnConfig,
    /// Počítať metriky aj na hodnotách vydelených kapacitou
    pub normalize: bool,
    pub baselines: Vec<BaselineKind>,
    /// Pridať os segmentácie podľa entity
    pub per_entity: bool,
    pub segmentation: SegmentationConfig,
    /// Prahy pre `large_error_count_threshold_T` (v jednotkách vstupu)
    pub error_thresholds: Vec<f64>,
    /// Dĺžka kroku časového radu, z nej sa odvodí perióda last-day persistence
    pub timestep_minutes: u32,
    /// Zaokrúhlenie cieľového času nadol; 0 = bez zaokrúhlenia
    pub floor_minutes: u32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            normalize: true,
            baselines: BaselineKind::all(),
            per_entity: true,
            segmentation: SegmentationConfig::default(),
            error_thresholds: vec![1000.0, 2000.0],
            timestep_minutes: 30,
            floor_minutes: 5,
        }
    }
}

impl EvaluationConfig {
    pub fn from_json(json: &str) -> EvalResult<Self> {
        let config: EvaluationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> EvalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> EvalResult<()> {
        if self.timestep_minutes == 0 {
            return Err(EvalError::config("timestep_minutes musí byť kladné"));
        }
        if 1440 % self.timestep_minutes != 0 {
            return Err(EvalError::config(format!(
                "timestep_minutes = {} nedelí deň bezo zvyšku",
                self.timestep_minutes
            )));
        }
        if let Some(t) = self
            .error_thresholds
            .iter()
            .find(|t| !t.is_finite() || **t < 0.0)
        {
            return Err(EvalError::config(format!("neplatný prah chyby {t}")));
        }
        for (idx, kind) in self.baselines.iter().enumerate() {
            if self.baselines[..idx].contains(kind) {
                return Err(EvalError::config(format!(
                    "baseline '{}' je zadaný viackrát",
                    kind.name()
                )));
            }
        }
        self.segmentation.validate()
    }

    /// Ktoré voliteľné stĺpce sú pri tejto konfigurácii povinné.
    pub fn requirements(&self) -> SchemaRequirements {
        SchemaRequirements {
            reference: self.baselines.contains(&BaselineKind::Reference),
            location: self.segmentation.daylight,
        }
    }

    pub fn metrics(&self) -> Vec<ErrorMetric> {
        ErrorMetric::with_thresholds(&self.error_thresholds)
    }

    pub fn floor(&self) -> Option<u32> {
        (self.floor_minutes > 0).then_some(self.floor_minutes)
    }

    /// Názov surovej reprezentácie: jednotka výkonu alebo "raw".
    pub fn raw_label(&self) -> String {
        self.columns
            .unit
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| "raw".to_string())
    }
}
