use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info, instrument};

use super::builder::EvaluationBuilder;
use super::config::EvaluationConfig;
use super::result::{EvaluationResult, HorizonMetrics, SegmentMetrics};
use crate::baselines::{generate_for_table, Baseline};
use crate::data::{EvaluationTable, ResultsFrame};
use crate::error::{EvalError, EvalResult};
use crate::evaluation::{ErrorMetric, MetricReport, ModelEvaluator};
use crate::processing::{normalize, CapacityNormalizer};
use crate::segmentation::{Segment, Segmenter};

/// Facade pre celú evaluáciu: validácia schémy, baseline, normalizácia,
/// segmentácia a výpočet metrík.
pub struct EvaluationPipeline {
    pub(crate) config: EvaluationConfig,
    pub(crate) baselines: Vec<Box<dyn Baseline>>,
    pub(crate) segmenter: Segmenter,
    pub(crate) metrics: Vec<ErrorMetric>,
}

/// Jedna hodnotená séria (model alebo baseline v jednej reprezentácii).
struct ScoredSeries {
    representation: String,
    observed: Vec<f64>,
    /// Predikcia pre každý horizont
    predicted: Vec<Vec<f64>>,
}

impl EvaluationPipeline {
    pub fn builder() -> EvaluationBuilder {
        EvaluationBuilder::new()
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Vyhodnotí model na surovom frame-e. Frame sa nemení.
    #[instrument(skip_all, fields(model = model_name, rows = frame.num_rows()))]
    pub fn evaluate(&self, frame: &ResultsFrame, model_name: &str) -> EvalResult<EvaluationResult> {
        check_model_name(model_name)?;
        let table = EvaluationTable::from_frame(
            frame,
            &self.config.columns,
            &self.config.requirements(),
            self.config.floor(),
        )?;
        self.evaluate_table(&table, model_name)
    }

    /// Vyhodnotí model na už overenej tabuľke.
    pub fn evaluate_table(
        &self,
        table: &EvaluationTable,
        model_name: &str,
    ) -> EvalResult<EvaluationResult> {
        check_model_name(model_name)?;
        let segments = self.segmenter.segments(table);
        info!(
            model = model_name,
            rows = table.len(),
            horizons = table.horizons().len(),
            segments = segments.len(),
            baselines = self.baselines.len(),
            "Spúšťam evaluáciu"
        );

        let series = self.build_series(table, model_name)?;
        let horizon_labels: Vec<String> = table.horizons().iter().map(|h| h.label()).collect();

        let mut result = EvaluationResult::new(model_name, table.len());
        for s in &series {
            let mut horizons = HorizonMetrics::new();
            for (label, predicted) in horizon_labels.iter().zip(&s.predicted) {
                horizons.insert(
                    label.clone(),
                    self.score_segments(&s.observed, predicted, &segments),
                );
            }
            result.metrics.insert(s.representation.clone(), horizons);
            result
                .overall
                .insert(s.representation.clone(), self.score_pooled(s));
        }

        info!(
            model = model_name,
            representations = result.metrics.len(),
            values = result.metric_count(),
            "Evaluácia dokončená"
        );
        Ok(result)
    }

    /// Model a baseline v surovej a (voliteľne) normalizovanej podobe.
    fn build_series(&self, table: &EvaluationTable, model_name: &str) -> EvalResult<Vec<ScoredSeries>> {
        let raw_label = self.config.raw_label();
        let horizon_count = table.horizons().len();

        let mut normalizer = CapacityNormalizer::new();
        normalizer.fit(table);
        let capacities = normalizer.capacities();

        let observed = table.observed();
        let observed_normalized = normalizer.transform(&observed);

        let mut candidates: Vec<(String, Vec<Vec<f64>>)> = vec![(
            model_name.to_string(),
            (0..horizon_count).map(|h| table.predictions(h)).collect(),
        )];
        for baseline in &self.baselines {
            let values = generate_for_table(baseline.as_ref(), table, capacities)?;
            debug!(
                baseline = baseline.get_name(),
                missing = values.iter().filter(|v| v.is_nan()).count(),
                "Baseline vygenerovaný"
            );
            // baseline nezávisí od horizontu
            candidates.push((
                baseline.get_name().to_string(),
                vec![values; horizon_count],
            ));
        }

        let mut series = Vec::with_capacity(candidates.len() * 2);
        for (name, predicted) in candidates {
            if self.config.normalize {
                series.push(ScoredSeries {
                    representation: format!("{name}/normalized"),
                    observed: observed_normalized.clone(),
                    predicted: predicted.iter().map(|p| normalize(p, capacities)).collect(),
                });
            }
            series.push(ScoredSeries {
                representation: format!("{name}/{raw_label}"),
                observed: observed.clone(),
                predicted,
            });
        }
        Ok(series)
    }

    fn score_segments(&self, observed: &[f64], predicted: &[f64], segments: &[Segment]) -> SegmentMetrics {
        segments
            .par_iter()
            .map(|segment| {
                let report = if segment.is_empty() {
                    MetricReport::empty(&self.metrics)
                } else {
                    ModelEvaluator::evaluate_rows(observed, predicted, &segment.rows, &self.metrics)
                };
                (segment.key.to_string(), report)
            })
            .collect()
    }

    fn score_pooled(&self, series: &ScoredSeries) -> MetricReport {
        let observed: Vec<f64> = series
            .predicted
            .iter()
            .flat_map(|_| series.observed.iter().copied())
            .collect();
        let predicted: Vec<f64> = series.predicted.concat();
        ModelEvaluator::evaluate_regression(&observed, &predicted, &self.metrics)
    }

    pub fn info(&self) -> PipelineInfo {
        PipelineInfo {
            baselines: self.baselines.iter().map(|b| b.get_name().to_string()).collect(),
            axes: self
                .segmenter
                .axis_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            metrics: self.metrics.iter().map(ErrorMetric::name).collect(),
            normalize: self.config.normalize,
        }
    }
}

fn check_model_name(model_name: &str) -> EvalResult<()> {
    if model_name.trim().is_empty() {
        return Err(EvalError::config("názov modelu nesmie byť prázdny"));
    }
    Ok(())
}

/// Informácie o nakonfigurovanom pipeline
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub baselines: Vec<String>,
    pub axes: Vec<String>,
    pub metrics: Vec<String>,
    pub normalize: bool,
}

impl fmt::Display for PipelineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Evaluation Pipeline Info ===")?;
        writeln!(f, "Baselines: {}", self.baselines.join(", "))?;
        writeln!(f, "Segment axes: {}", self.axes.join(", "))?;
        writeln!(f, "Metrics: {}", self.metrics.join(", "))?;
        write!(f, "Normalize: {}", self.normalize)
    }
}
