pub mod evaluator;
pub mod metrics;

pub use evaluator::ModelEvaluator;
pub use metrics::{
    large_error_count, mean_absolute_error, mean_absolute_percentage_error, mean_bias_error,
    root_mean_square_error, ErrorMetric, MetricReport,
};
