use super::{config::EvaluationConfig, pipeline::EvaluationPipeline};
use crate::baselines::{BaselineFactory, BaselineKind};
use crate::data::ColumnConfig;
use crate::error::{EvalError, EvalResult};
use crate::segmentation::{HourSplit, SegmentationConfig, Segmenter, YearSplit};

/// Builder pre konfiguráciu Evaluation Pipeline
pub struct EvaluationBuilder {
    config: EvaluationConfig,
    baseline_params: Vec<(BaselineKind, String, String)>,
}

impl EvaluationBuilder {
    /// Začne z predvolenej konfigurácie
    pub fn new() -> Self {
        Self::from_config(EvaluationConfig::default())
    }

    pub fn from_config(config: EvaluationConfig) -> Self {
        Self {
            config,
            baseline_params: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: ColumnConfig) -> Self {
        self.config.columns = columns;
        self
    }

    /// Stĺpce podľa konvencie s jednotkou (mw, kw, w)
    pub fn unit(mut self, unit: &str) -> Self {
        self.config.columns = ColumnConfig::for_unit(unit);
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.config.normalize = normalize;
        self
    }

    /// Nastaví zoznam baseline (prázdny = bez baseline)
    pub fn baselines(mut self, baselines: Vec<BaselineKind>) -> Self {
        self.config.baselines = baselines;
        self
    }

    /// Pridá baseline, ak ešte nie je v zozname
    pub fn add_baseline(mut self, kind: BaselineKind) -> Self {
        if !self.config.baselines.contains(&kind) {
            self.config.baselines.push(kind);
        }
        self
    }

    /// Nastaví parameter baseline
    pub fn baseline_param(mut self, kind: BaselineKind, key: &str, value: &str) -> Self {
        self.baseline_params
            .push((kind, key.to_string(), value.to_string()));
        self
    }

    pub fn per_entity(mut self, per_entity: bool) -> Self {
        self.config.per_entity = per_entity;
        self
    }

    pub fn segmentation(mut self, segmentation: SegmentationConfig) -> Self {
        self.config.segmentation = segmentation;
        self
    }

    pub fn daylight(mut self, enabled: bool) -> Self {
        self.config.segmentation.daylight = enabled;
        self
    }

    pub fn sun_threshold(mut self, degrees: f64) -> Self {
        self.config.segmentation.sun_threshold_degrees_for_night = degrees;
        self
    }

    /// `None` vypne os denného času
    pub fn time_of_day(mut self, split: Option<HourSplit>) -> Self {
        self.config.segmentation.time_of_day = split;
        self
    }

    /// `None` vypne os sezóny
    pub fn season(mut self, split: Option<YearSplit>) -> Self {
        self.config.segmentation.season = split;
        self
    }

    pub fn utc_offset_minutes(mut self, offset: i32) -> Self {
        self.config.segmentation.utc_offset_minutes = offset;
        self
    }

    pub fn error_thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.config.error_thresholds = thresholds;
        self
    }

    pub fn timestep_minutes(mut self, minutes: u32) -> Self {
        self.config.timestep_minutes = minutes;
        self
    }

    pub fn floor_minutes(mut self, minutes: u32) -> Self {
        self.config.floor_minutes = minutes;
        self
    }

    /// Vytvorí EvaluationPipeline s validáciou konfigurácie
    pub fn build(self) -> EvalResult<EvaluationPipeline> {
        self.config.validate()?;

        let mut baselines = Vec::with_capacity(self.config.baselines.len());
        for kind in &self.config.baselines {
            let mut baseline = BaselineFactory::create(*kind, self.config.timestep_minutes);
            for (_, key, value) in self.baseline_params.iter().filter(|(k, _, _)| k == kind) {
                baseline.set_param(key, value)?;
            }
            baselines.push(baseline);
        }

        if let Some((kind, key, _)) = self
            .baseline_params
            .iter()
            .find(|(kind, _, _)| !self.config.baselines.contains(kind))
        {
            return Err(EvalError::config(format!(
                "parameter '{}' patrí baseline '{}', ktorý nie je zapnutý",
                key,
                kind.name()
            )));
        }

        let segmenter = Segmenter::from_config(&self.config.segmentation, self.config.per_entity)?;
        let metrics = self.config.metrics();

        Ok(EvaluationPipeline {
            config: self.config,
            baselines,
            segmenter,
            metrics,
        })
    }
}

impl Default for EvaluationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
