use std::collections::HashMap;
use tracing::{debug, warn};

use crate::data::EvaluationTable;

/// Capacity Normalizer - delí hodnoty inštalovaným výkonom entity.
///
/// `fit` zistí výkon pre každý riadok: hodnotu zo stĺpca kapacity, a ak chýba
/// alebo nie je kladná, maximum pozorovaného výkonu danej entity.
#[derive(Debug, Clone, Default)]
pub struct CapacityNormalizer {
    capacities: Option<Vec<f64>>,
}

impl CapacityNormalizer {
    pub fn new() -> Self {
        Self { capacities: None }
    }

    pub fn get_name(&self) -> &str {
        "Capacity Normalizer"
    }

    pub fn fit(&mut self, table: &EvaluationTable) {
        let mut observed_max: HashMap<&str, f64> = HashMap::new();
        for row in table.rows() {
            if row.observed.is_nan() {
                continue;
            }
            let entry = observed_max
                .entry(row.entity_id.as_str())
                .or_insert(f64::NEG_INFINITY);
            *entry = entry.max(row.observed);
        }

        let mut fallback_entities: Vec<&str> = Vec::new();
        let capacities = table
            .rows()
            .iter()
            .map(|row| match row.capacity {
                Some(c) if c > 0.0 => c,
                _ => {
                    let id = row.entity_id.as_str();
                    if !fallback_entities.contains(&id) {
                        fallback_entities.push(id);
                    }
                    match observed_max.get(id) {
                        Some(&max) if max > 0.0 => max,
                        _ => f64::NAN,
                    }
                }
            })
            .collect();

        for id in &fallback_entities {
            match observed_max.get(id) {
                Some(&max) if max > 0.0 => {
                    debug!(entity = %id, capacity = max, "kapacita chýba, použije sa maximum pozorovaní")
                }
                _ => warn!(entity = %id, "entita nemá kladnú kapacitu ani pozorovanie, normalizované hodnoty budú NaN"),
            }
        }

        self.capacities = Some(capacities);
    }

    /// Kapacity zistené pri `fit`, zarovnané s riadkami tabuľky.
    pub fn capacities(&self) -> &[f64] {
        self.capacities.as_deref().unwrap_or(&[])
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        normalize(values, self.capacities())
    }
}

/// Vydelí hodnoty kapacitami; NaN tam, kde kapacita nie je kladná alebo chýba.
pub fn normalize(values: &[f64], capacities: &[f64]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| match capacities.get(i) {
            Some(&c) if c > 0.0 => v / c,
            _ => f64::NAN,
        })
        .collect()
}
