use serde::{Deserialize, Serialize};
use smartcore::metrics::{mean_absolute_error as smartcore_mae, mean_squared_error};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

// Všetky funkcie očakávajú zarovnané vstupy bez NaN (filtruje volajúci)
// a pre prázdny vstup vracajú NaN.

/// Priemerná absolútna chyba.
pub fn mean_absolute_error(predicted: &[f64], observed: &[f64]) -> f64 {
    if !comparable(predicted, observed) {
        return f64::NAN;
    }
    smartcore_mae(&observed.to_vec(), &predicted.to_vec())
}

/// Odmocnina priemernej kvadratickej chyby.
pub fn root_mean_square_error(predicted: &[f64], observed: &[f64]) -> f64 {
    if !comparable(predicted, observed) {
        return f64::NAN;
    }
    mean_squared_error(&observed.to_vec(), &predicted.to_vec()).sqrt()
}

/// Priemerná chyba so znamienkom: kladná = model nadhodnocuje.
pub fn mean_bias_error(predicted: &[f64], observed: &[f64]) -> f64 {
    if !comparable(predicted, observed) {
        return f64::NAN;
    }
    predicted
        .iter()
        .zip(observed)
        .map(|(p, o)| p - o)
        .collect::<Vec<f64>>()
        .mean()
}

/// Priemerná absolútna percentuálna chyba (ako podiel, nie v %).
/// Riadky s nulovým pozorovaním sa vynechajú.
pub fn mean_absolute_percentage_error(predicted: &[f64], observed: &[f64]) -> f64 {
    if !comparable(predicted, observed) {
        return f64::NAN;
    }
    predicted
        .iter()
        .zip(observed)
        .filter(|(_, o)| **o != 0.0)
        .map(|(p, o)| (p - o).abs() / o.abs())
        .collect::<Vec<f64>>()
        .mean()
}

/// Počet riadkov s |predicted - observed| > threshold.
pub fn large_error_count(predicted: &[f64], observed: &[f64], threshold: f64) -> f64 {
    if !comparable(predicted, observed) {
        return f64::NAN;
    }
    predicted
        .iter()
        .zip(observed)
        .filter(|(p, o)| (*p - *o).abs() > threshold)
        .count() as f64
}

fn comparable(predicted: &[f64], observed: &[f64]) -> bool {
    debug_assert_eq!(predicted.len(), observed.len(), "nezarovnané vstupy metriky");
    !predicted.is_empty() && predicted.len() == observed.len()
}

/// Chybová metrika počítaná pre každý segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMetric {
    Mae,
    Rmse,
    Mbe,
    Mape,
    LargeErrorCount { threshold: f64 },
}

impl ErrorMetric {
    pub fn name(&self) -> String {
        match self {
            ErrorMetric::Mae => "mae".to_string(),
            ErrorMetric::Rmse => "rmse".to_string(),
            ErrorMetric::Mbe => "mbe".to_string(),
            ErrorMetric::Mape => "mape".to_string(),
            ErrorMetric::LargeErrorCount { threshold } => {
                format!("large_error_count_threshold_{threshold}")
            }
        }
    }

    pub fn compute(&self, predicted: &[f64], observed: &[f64]) -> f64 {
        match self {
            ErrorMetric::Mae => mean_absolute_error(predicted, observed),
            ErrorMetric::Rmse => root_mean_square_error(predicted, observed),
            ErrorMetric::Mbe => mean_bias_error(predicted, observed),
            ErrorMetric::Mape => mean_absolute_percentage_error(predicted, observed),
            ErrorMetric::LargeErrorCount { threshold } => {
                large_error_count(predicted, observed, *threshold)
            }
        }
    }

    /// MAE, RMSE, MBE a MAPE.
    pub fn standard() -> Vec<ErrorMetric> {
        vec![
            ErrorMetric::Mae,
            ErrorMetric::Rmse,
            ErrorMetric::Mbe,
            ErrorMetric::Mape,
        ]
    }

    /// Štandardné metriky a počty veľkých chýb pre každý prah.
    pub fn with_thresholds(thresholds: &[f64]) -> Vec<ErrorMetric> {
        let mut metrics = Self::standard();
        metrics.extend(
            thresholds
                .iter()
                .map(|&threshold| ErrorMetric::LargeErrorCount { threshold }),
        );
        metrics
    }
}

/// Hodnoty metrík pre jednu sériu v jednom segmente.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricReport {
    pub metrics: BTreeMap<String, f64>,
}

impl MetricReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report, kde má každá metrika hodnotu NaN (prázdny segment).
    pub fn empty(metrics: &[ErrorMetric]) -> Self {
        let mut report = Self::new();
        for metric in metrics {
            report.add_metric(metric.name(), f64::NAN);
        }
        report
    }

    pub fn add_metric(&mut self, name: String, value: f64) {
        self.metrics.insert(name, value);
    }

    pub fn get_metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn get_all_metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
