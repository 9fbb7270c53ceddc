use super::metrics::{ErrorMetric, MetricReport};

pub struct ModelEvaluator;

impl ModelEvaluator {
    /// Odstráni páry, kde predikcia alebo pozorovanie chýba (NaN).
    pub fn aligned_pairs(y_true: &[f64], y_pred: &[f64]) -> (Vec<f64>, Vec<f64>) {
        y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| !t.is_nan() && !p.is_nan())
            .map(|(t, p)| (*t, *p))
            .unzip()
    }

    /// Vypočíta chybové metriky predpovede voči pozorovaniam.
    /// Prázdny vstup (alebo samé NaN) dáva report s NaN hodnotami.
    pub fn evaluate_regression(y_true: &[f64], y_pred: &[f64], metrics: &[ErrorMetric]) -> MetricReport {
        let (observed, predicted) = Self::aligned_pairs(y_true, y_pred);
        let mut report = MetricReport::new();
        for metric in metrics {
            report.add_metric(metric.name(), metric.compute(&predicted, &observed));
        }
        report
    }

    /// To isté ako `evaluate_regression`, len nad vybranými riadkami.
    pub fn evaluate_rows(
        y_true: &[f64],
        y_pred: &[f64],
        rows: &[usize],
        metrics: &[ErrorMetric],
    ) -> MetricReport {
        let observed: Vec<f64> = rows.iter().map(|&i| y_true[i]).collect();
        let predicted: Vec<f64> = rows.iter().map(|&i| y_pred[i]).collect();
        Self::evaluate_regression(&observed, &predicted, metrics)
    }
}
