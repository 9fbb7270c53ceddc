use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::collections::BTreeMap;

use super::frame::{Column, ResultsFrame};
use super::schema::{ColumnConfig, HorizonColumn, SchemaRequirements};
use crate::error::{EvalError, EvalResult};
use crate::processing::floor_timestamp;

/// Poloha entity (stupne).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Jeden riadok evaluácie: pozorovanie entity v danom čase a predpovede pre všetky horizonty.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRow {
    pub entity_id: String,
    pub timestamp: DateTime<Utc>,
    pub observed: f64,
    /// Predpovede v poradí `EvaluationTable::horizons`
    pub predictions: Vec<f64>,
    pub capacity: Option<f64>,
    pub reference: Option<f64>,
    pub t0_observed: Option<f64>,
    pub location: Option<Location>,
}

/// Overená, typovaná tabuľka, nad ktorou beží celá evaluácia.
#[derive(Debug, Clone, Default)]
pub struct EvaluationTable {
    horizons: Vec<HorizonColumn>,
    rows: Vec<EvaluationRow>,
    has_reference: bool,
    has_t0_observed: bool,
}

impl EvaluationTable {
    /// Overí schému frame-u a prevedie ho na riadky. Vstup sa nemení.
    pub fn from_frame(
        frame: &ResultsFrame,
        columns: &ColumnConfig,
        requirements: &SchemaRequirements,
        floor_minutes: Option<u32>,
    ) -> EvalResult<Self> {
        let observed = numeric(frame, &columns.observed)?;
        let entity_ids = text_values(frame, &columns.entity_id)?;
        let timestamps = timestamp_values(frame, &columns.timestamp)?;
        let horizons = columns.resolve_horizons(frame)?;
        let predictions = horizons
            .iter()
            .map(|h| numeric(frame, &h.column))
            .collect::<EvalResult<Vec<_>>>()?;

        let reference = match &columns.reference {
            Some(name) if frame.contains(name) => Some(numeric(frame, name)?),
            Some(name) if requirements.reference => return Err(EvalError::schema(name)),
            None if requirements.reference => return Err(EvalError::schema("reference")),
            _ => None,
        };
        let capacity = optional_numeric(frame, columns.capacity.as_deref())?;
        let t0_observed = optional_numeric(frame, columns.t0_observed.as_deref())?;

        let location = if requirements.location {
            Some((
                numeric(frame, &columns.latitude)?,
                numeric(frame, &columns.longitude)?,
            ))
        } else if frame.contains(&columns.latitude) && frame.contains(&columns.longitude) {
            Some((
                numeric(frame, &columns.latitude)?,
                numeric(frame, &columns.longitude)?,
            ))
        } else {
            None
        };

        let rows = (0..frame.num_rows())
            .map(|i| EvaluationRow {
                entity_id: entity_ids[i].clone(),
                timestamp: match floor_minutes {
                    Some(minutes) => floor_timestamp(timestamps[i], minutes),
                    None => timestamps[i],
                },
                observed: observed[i],
                predictions: predictions.iter().map(|p| p[i]).collect(),
                capacity: capacity.and_then(|c| finite(c[i])),
                reference: reference.map(|r| r[i]),
                t0_observed: t0_observed.map(|t| t[i]),
                location: location.map(|(lat, lon)| Location {
                    latitude: lat[i],
                    longitude: lon[i],
                }),
            })
            .collect();

        Ok(Self {
            horizons,
            rows,
            has_reference: reference.is_some(),
            has_t0_observed: t0_observed.is_some(),
        })
    }

    /// Tabuľka priamo z riadkov (pre testy a iných volajúcich, ktorí už majú typované dáta).
    pub fn from_rows(horizons: Vec<HorizonColumn>, rows: Vec<EvaluationRow>) -> EvalResult<Self> {
        for (idx, row) in rows.iter().enumerate() {
            if row.predictions.len() != horizons.len() {
                return Err(EvalError::LengthMismatch {
                    column: format!("predictions[{idx}]"),
                    expected: horizons.len(),
                    actual: row.predictions.len(),
                });
            }
        }
        let has_reference = !rows.is_empty() && rows.iter().all(|r| r.reference.is_some());
        let has_t0_observed = !rows.is_empty() && rows.iter().all(|r| r.t0_observed.is_some());
        Ok(Self {
            horizons,
            rows,
            has_reference,
            has_t0_observed,
        })
    }

    pub fn rows(&self) -> &[EvaluationRow] {
        &self.rows
    }

    pub fn horizons(&self) -> &[HorizonColumn] {
        &self.horizons
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_reference(&self) -> bool {
        self.has_reference
    }

    pub fn has_t0_observed(&self) -> bool {
        self.has_t0_observed
    }

    pub fn observed(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.observed).collect()
    }

    pub fn predictions(&self, horizon_index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| r.predictions[horizon_index])
            .collect()
    }

    /// Zoradené unikátne identifikátory entít.
    pub fn entity_ids(&self) -> Vec<String> {
        self.entity_rows().into_keys().map(str::to_string).collect()
    }

    /// Indexy riadkov pre každú entitu, zoradené podľa času.
    pub fn entity_rows(&self) -> BTreeMap<&str, Vec<usize>> {
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, row) in self.rows.iter().enumerate() {
            groups.entry(row.entity_id.as_str()).or_default().push(idx);
        }
        for indices in groups.values_mut() {
            indices.sort_by_key(|&i| self.rows[i].timestamp);
        }
        groups
    }
}

fn finite(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

fn numeric<'a>(frame: &'a ResultsFrame, name: &str) -> EvalResult<&'a [f64]> {
    match frame.column(name) {
        Some(Column::Numeric(values)) => Ok(values),
        Some(_) => Err(EvalError::ColumnType {
            column: name.to_string(),
            expected: "numeric",
        }),
        None => Err(EvalError::schema(name)),
    }
}

fn optional_numeric<'a>(
    frame: &'a ResultsFrame,
    name: Option<&str>,
) -> EvalResult<Option<&'a [f64]>> {
    match name {
        Some(name) if frame.contains(name) => numeric(frame, name).map(Some),
        _ => Ok(None),
    }
}

fn text_values(frame: &ResultsFrame, name: &str) -> EvalResult<Vec<String>> {
    match frame.column(name) {
        Some(Column::Text(values)) => Ok(values.clone()),
        // Číselné ID (napr. 1, 2) sa prevedú na text bez desatinnej časti
        Some(Column::Numeric(values)) => Ok(values
            .iter()
            .map(|v| {
                if v.fract() == 0.0 && v.is_finite() {
                    format!("{}", *v as i64)
                } else {
                    v.to_string()
                }
            })
            .collect()),
        Some(Column::Timestamp(_)) => Err(EvalError::ColumnType {
            column: name.to_string(),
            expected: "text",
        }),
        None => Err(EvalError::schema(name)),
    }
}

fn timestamp_values(frame: &ResultsFrame, name: &str) -> EvalResult<Vec<DateTime<Utc>>> {
    match frame.column(name) {
        Some(Column::Timestamp(values)) => Ok(values.clone()),
        Some(Column::Text(values)) => values
            .iter()
            .enumerate()
            .map(|(row, value)| {
                parse_timestamp(value).ok_or_else(|| EvalError::InvalidTimestamp {
                    column: name.to_string(),
                    row,
                    value: value.clone(),
                })
            })
            .collect(),
        Some(Column::Numeric(_)) => Err(EvalError::ColumnType {
            column: name.to_string(),
            expected: "timestamp",
        }),
        None => Err(EvalError::schema(name)),
    }
}

/// Parsuje RFC 3339 alebo `YYYY-MM-DD HH:MM[:SS]` (UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}
