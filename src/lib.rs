//! Evaluácia predpovedí výroby fotovoltiky: baseline predpovede, chybové
//! metriky a ich rozpad podľa dňa/noci, denného času, sezóny a entity.

pub mod baselines;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod pipeline;
pub mod processing;
pub mod segmentation;

pub use baselines::{Baseline, BaselineFactory, BaselineKind};
pub use data::{Column, ColumnConfig, EvaluationTable, HorizonColumn, ResultsFrame};
pub use error::{EvalError, EvalResult};
pub use evaluation::{ErrorMetric, MetricReport, ModelEvaluator};
pub use pipeline::{evaluate, EvaluationBuilder, EvaluationConfig, EvaluationPipeline, EvaluationResult};
pub use segmentation::{HourSplit, SegmentationConfig, Segmenter, YearSplit};
