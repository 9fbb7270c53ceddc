use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::EvalResult;
use crate::evaluation::MetricReport;

/// segment → metriky
pub type SegmentMetrics = BTreeMap<String, MetricReport>;
/// horizont → segment → metriky
pub type HorizonMetrics = BTreeMap<String, SegmentMetrics>;

/// Výsledok evaluácie jedného modelu.
///
/// `metrics` je indexované reprezentáciou (`model/mw`, `model/normalized`,
/// `zero_baseline/mw`, ...), horizontom (`horizon_2`), kľúčom segmentu
/// (`all`, `daylight=day/season=summer`, ...) a názvom metriky. Kľúčový
/// priestor je úplný: prázdne segmenty majú NaN, ktoré sa v JSON zapíše ako `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub model_name: String,
    pub metrics: BTreeMap<String, HorizonMetrics>,
    /// Metriky nad všetkými riadkami a horizontmi naraz
    pub overall: BTreeMap<String, MetricReport>,
    pub row_count: usize,
}

impl EvaluationResult {
    pub fn new(model_name: &str, row_count: usize) -> Self {
        Self {
            model_name: model_name.to_string(),
            row_count,
            ..Self::default()
        }
    }

    pub fn get(&self, representation: &str, horizon: &str, segment: &str, metric: &str) -> Option<f64> {
        self.metrics
            .get(representation)?
            .get(horizon)?
            .get(segment)?
            .get_metric(metric)
    }

    pub fn get_overall(&self, representation: &str, metric: &str) -> Option<f64> {
        self.overall.get(representation)?.get_metric(metric)
    }

    pub fn representations(&self) -> Vec<&str> {
        self.metrics.keys().map(String::as_str).collect()
    }

    pub fn horizons(&self, representation: &str) -> Vec<&str> {
        self.metrics
            .get(representation)
            .map(|h| h.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Počet skalárnych hodnôt v `metrics` (bez `overall`).
    pub fn metric_count(&self) -> usize {
        self.metrics
            .values()
            .flat_map(|horizons| horizons.values())
            .flat_map(|segments| segments.values())
            .map(MetricReport::len)
            .sum()
    }

    /// Plochý pohľad `reprezentácia/horizont/segment/metrika` → hodnota.
    /// Celkové metriky majú namiesto horizontu a segmentu `overall`.
    pub fn flatten(&self) -> BTreeMap<String, f64> {
        let mut flat = BTreeMap::new();
        for (representation, horizons) in &self.metrics {
            for (horizon, segments) in horizons {
                for (segment, report) in segments {
                    for (metric, value) in report.get_all_metrics() {
                        flat.insert(
                            format!("{representation}/{horizon}/{segment}/{metric}"),
                            *value,
                        );
                    }
                }
            }
        }
        for (representation, report) in &self.overall {
            for (metric, value) in report.get_all_metrics() {
                flat.insert(format!("{representation}/overall/{metric}"), *value);
            }
        }
        flat
    }

    pub fn to_json(&self) -> EvalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
