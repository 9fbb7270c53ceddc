use serde::{Deserialize, Serialize};

use super::frame::ResultsFrame;
use crate::error::{EvalError, EvalResult};

/// Stĺpec s predpoveďou pre jeden horizont.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonColumn {
    pub column: String,
    /// Počet krokov dopredu (0 = nowcast)
    pub steps: u32,
}

impl HorizonColumn {
    pub fn new(column: &str, steps: u32) -> Self {
        Self {
            column: column.to_string(),
            steps,
        }
    }

    pub fn label(&self) -> String {
        format!("horizon_{}", self.steps)
    }
}

/// Názvy stĺpcov, ktoré musí dodať loader dát.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub entity_id: String,
    pub timestamp: String,
    pub observed: String,
    /// Prefix stĺpcov s predpoveďou, za ním nasleduje počet krokov
    pub forecast_prefix: String,
    /// Explicitný zoznam horizontov; ak je prázdny, hľadajú sa podľa prefixu
    pub horizons: Vec<HorizonColumn>,
    pub capacity: Option<String>,
    pub reference: Option<String>,
    pub t0_observed: Option<String>,
    pub latitude: String,
    pub longitude: String,
    /// Jednotka výkonu (mw, kw, w), použije sa v názve reprezentácie
    pub unit: Option<String>,
}

impl ColumnConfig {
    /// Konvencia pomenovania stĺpcov s jednotkou v názve (napr. `actual_pv_outturn_mw`).
    pub fn for_unit(unit: &str) -> Self {
        let unit = unit.to_lowercase();
        Self {
            entity_id: "id".to_string(),
            timestamp: "target_datetime_utc".to_string(),
            observed: format!("actual_pv_outturn_{unit}"),
            forecast_prefix: format!("forecast_pv_outturn_{unit}_"),
            horizons: Vec::new(),
            capacity: Some(format!("capacity_{unit}p")),
            reference: Some(format!("reference_pv_outturn_{unit}")),
            t0_observed: Some(format!("t0_actual_pv_outturn_{unit}")),
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
            unit: Some(unit),
        }
    }

    pub fn horizon(mut self, column: &str, steps: u32) -> Self {
        self.horizons.push(HorizonColumn::new(column, steps));
        self
    }

    /// Zistí horizonty prítomné vo frame.
    pub fn resolve_horizons(&self, frame: &ResultsFrame) -> EvalResult<Vec<HorizonColumn>> {
        if !self.horizons.is_empty() {
            for horizon in &self.horizons {
                if !frame.contains(&horizon.column) {
                    return Err(EvalError::schema(&horizon.column));
                }
            }
            let mut horizons = self.horizons.clone();
            horizons.sort_by_key(|h| h.steps);
            return Self::check_unique_steps(horizons);
        }

        let mut horizons: Vec<HorizonColumn> = frame
            .headers()
            .iter()
            .filter_map(|name| {
                let suffix = name.strip_prefix(&self.forecast_prefix)?;
                let steps = suffix.parse::<u32>().ok()?;
                Some(HorizonColumn::new(name, steps))
            })
            .collect();

        if horizons.is_empty() {
            return Err(EvalError::schema(format!("{}<steps>", self.forecast_prefix)));
        }
        horizons.sort_by_key(|h| h.steps);
        Self::check_unique_steps(horizons)
    }

    /// Každý horizont smie mať len jeden stĺpec, inak by sa kľúče výsledku prekryli.
    fn check_unique_steps(horizons: Vec<HorizonColumn>) -> EvalResult<Vec<HorizonColumn>> {
        if let Some(w) = horizons.windows(2).find(|w| w[0].steps == w[1].steps) {
            return Err(EvalError::config(format!(
                "stĺpce '{}' a '{}' patria rovnakému horizontu {}",
                w[0].column, w[1].column, w[0].steps
            )));
        }
        Ok(horizons)
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self::for_unit("mw")
    }
}

/// Ktoré voliteľné stĺpce sú pre danú konfiguráciu povinné.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaRequirements {
    /// Referenčná séria (pre reference baseline)
    pub reference: bool,
    /// Zemepisná šírka a dĺžka (pre os deň/noc)
    pub location: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(headers: &[&str]) -> ResultsFrame {
        let mut frame = ResultsFrame::new();
        for h in headers {
            frame.add_column(h, vec![1.0]).unwrap();
        }
        frame
    }

    #[test]
    fn unit_naming_convention() {
        let cfg = ColumnConfig::for_unit("KW");
        assert_eq!(cfg.observed, "actual_pv_outturn_kw");
        assert_eq!(cfg.capacity.as_deref(), Some("capacity_kwp"));
        assert_eq!(cfg.forecast_prefix, "forecast_pv_outturn_kw_");
    }

    #[test]
    fn discovers_horizons_by_prefix_sorted_by_steps() {
        let cfg = ColumnConfig::for_unit("mw");
        let f = frame(&[
            "forecast_pv_outturn_mw_4",
            "forecast_pv_outturn_mw_0",
            "forecast_pv_outturn_mw_x",
            "actual_pv_outturn_mw",
        ]);
        let horizons = cfg.resolve_horizons(&f).unwrap();
        let steps: Vec<u32> = horizons.iter().map(|h| h.steps).collect();
        assert_eq!(steps, vec![0, 4]);
        assert_eq!(horizons[1].label(), "horizon_4");
    }

    #[test]
    fn missing_explicit_horizon_is_schema_error() {
        let cfg = ColumnConfig::for_unit("mw").horizon("pred_h1", 1);
        let err = cfg.resolve_horizons(&frame(&["pred_h2"])).unwrap_err();
        assert!(matches!(err, EvalError::Schema { ref column } if column == "pred_h1"));
    }

    #[test]
    fn no_forecast_columns_is_schema_error() {
        let cfg = ColumnConfig::for_unit("mw");
        let err = cfg
            .resolve_horizons(&frame(&["actual_pv_outturn_mw"]))
            .unwrap_err();
        assert!(err.to_string().contains("forecast_pv_outturn_mw_"));
    }

    #[test]
    fn explicit_horizons_with_same_steps_are_rejected() {
        let cfg = ColumnConfig::for_unit("mw")
            .horizon("p1", 1)
            .horizon("p1b", 1);
        let err = cfg.resolve_horizons(&frame(&["p1", "p1b"])).unwrap_err();
        assert!(matches!(err, EvalError::InvalidConfig(ref msg) if msg.contains("p1b")));

        let ok = ColumnConfig::for_unit("mw")
            .horizon("p2", 2)
            .horizon("p1", 1);
        let steps: Vec<u32> = ok
            .resolve_horizons(&frame(&["p1", "p2"]))
            .unwrap()
            .iter()
            .map(|h| h.steps)
            .collect();
        assert_eq!(steps, vec![1, 2]);
    }
}
