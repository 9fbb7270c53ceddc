pub mod builder;
pub mod config;
pub mod pipeline;
pub mod result;

pub use builder::EvaluationBuilder;
pub use config::EvaluationConfig;
pub use pipeline::{EvaluationPipeline, PipelineInfo};
pub use result::{EvaluationResult, HorizonMetrics, SegmentMetrics};

use crate::data::ResultsFrame;
use crate::error::EvalResult;

/// Vyhodnotí model s predvolenou konfiguráciou.
pub fn evaluate(frame: &ResultsFrame, model_name: &str) -> EvalResult<EvaluationResult> {
    EvaluationBuilder::new().build()?.evaluate(frame, model_name)
}
