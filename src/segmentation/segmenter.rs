use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DaylightAxis, EntityAxis, HourSplit, SeasonAxis, SegmentAxis, TimeOfDayAxis, YearSplit};
use crate::data::EvaluationTable;
use crate::error::{EvalError, EvalResult};

/// Nastavenie osí segmentácie. Os s hodnotou `None`/`false` sa nepoužije.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    pub daylight: bool,
    /// Výška slnka (stupne), pri ktorej a pod ktorou je noc
    pub sun_threshold_degrees_for_night: f64,
    pub time_of_day: Option<HourSplit>,
    pub season: Option<YearSplit>,
    /// Posun miestneho času voči UTC pre denný čas a sezónu
    pub utc_offset_minutes: i32,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            daylight: true,
            sun_threshold_degrees_for_night: -5.0,
            time_of_day: Some(HourSplit::default()),
            season: Some(YearSplit::default()),
            utc_offset_minutes: 0,
        }
    }
}

impl SegmentationConfig {
    /// Bez segmentácie, len agregát "all".
    pub fn none() -> Self {
        Self {
            daylight: false,
            time_of_day: None,
            season: None,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> EvalResult<()> {
        if !self.sun_threshold_degrees_for_night.is_finite() {
            return Err(EvalError::config("sun_threshold_degrees_for_night musí byť konečné číslo"));
        }
        if let Some(split) = &self.time_of_day {
            split.validate()?;
        }
        if let Some(split) = &self.season {
            split.validate()?;
        }
        Ok(())
    }
}

/// Zložený kľúč segmentu: pre každú os buď konkrétny bucket, alebo `None` = "all".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    parts: Vec<(String, Option<String>)>,
}

impl SegmentKey {
    pub fn new(parts: Vec<(String, Option<String>)>) -> Self {
        Self { parts }
    }

    /// Kľúč bez akéhokoľvek filtrovania.
    pub fn unsliced() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn bucket(&self, axis: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|(name, _)| name == axis)
            .and_then(|(_, bucket)| bucket.as_deref())
    }

    pub fn is_unsliced(&self) -> bool {
        self.parts.iter().all(|(_, bucket)| bucket.is_none())
    }

    pub fn parts(&self) -> &[(String, Option<String>)] {
        &self.parts
    }
}

impl fmt::Display for SegmentKey {
    /// `all` alebo `os=bucket/os=bucket` len pre filtrované osi.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unsliced() {
            return write!(f, "all");
        }
        let sliced: Vec<String> = self
            .parts
            .iter()
            .filter_map(|(axis, bucket)| bucket.as_ref().map(|b| format!("{axis}={b}")))
            .collect();
        write!(f, "{}", sliced.join("/"))
    }
}

/// Podmnožina riadkov tabuľky (indexy) s jej kľúčom.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub key: SegmentKey,
    pub rows: Vec<usize>,
}

impl Segment {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Segmentation engine: karteziánsky súčin `[all] + buckety` všetkých osí.
#[derive(Default)]
pub struct Segmenter {
    axes: Vec<Box<dyn SegmentAxis>>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self { axes: Vec::new() }
    }

    pub fn add_axis(&mut self, axis: Box<dyn SegmentAxis>) {
        self.axes.push(axis);
    }

    pub fn from_config(config: &SegmentationConfig, per_entity: bool) -> EvalResult<Self> {
        config.validate()?;
        let mut segmenter = Self::new();
        if config.daylight {
            segmenter.add_axis(Box::new(DaylightAxis::new(
                config.sun_threshold_degrees_for_night,
            )));
        }
        if let Some(split) = &config.time_of_day {
            segmenter.add_axis(Box::new(TimeOfDayAxis::new(
                split.clone(),
                config.utc_offset_minutes,
            )?));
        }
        if let Some(split) = &config.season {
            segmenter.add_axis(Box::new(SeasonAxis::new(
                split.clone(),
                config.utc_offset_minutes,
            )?));
        }
        if per_entity {
            segmenter.add_axis(Box::new(EntityAxis));
        }
        Ok(segmenter)
    }

    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|a| a.get_name()).collect()
    }

    /// Všetky segmenty vrátane prázdnych; poradie je deterministické.
    pub fn segments(&self, table: &EvaluationTable) -> Vec<Segment> {
        let mut segments = vec![Segment {
            key: SegmentKey::unsliced(),
            rows: (0..table.len()).collect(),
        }];

        for axis in &self.axes {
            let name = axis.get_name().to_string();
            let buckets = axis.buckets(table);
            let assignment = axis.assign(table);

            let mut expanded = Vec::with_capacity(segments.len() * (buckets.len() + 1));
            for segment in segments {
                for (bucket_idx, bucket) in buckets.iter().enumerate() {
                    let mut key = segment.key.clone();
                    key.parts.push((name.clone(), Some(bucket.clone())));
                    let rows = segment
                        .rows
                        .iter()
                        .copied()
                        .filter(|&r| assignment[r] == bucket_idx)
                        .collect();
                    expanded.push(Segment { key, rows });
                }
                let mut key = segment.key;
                key.parts.push((name.clone(), None));
                expanded.push(Segment {
                    key,
                    rows: segment.rows,
                });
            }
            segments = expanded;
        }

        segments
    }
}
