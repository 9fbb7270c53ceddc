use chrono::{Duration, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::SegmentAxis;
use crate::data::EvaluationTable;
use crate::error::{EvalError, EvalResult};

/// Pomenovaná skupina hodín dňa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedHours {
    pub name: String,
    pub hours: Vec<u32>,
}

impl NamedHours {
    pub fn new(name: &str, hours: &[u32]) -> Self {
        Self {
            name: name.to_string(),
            hours: hours.to_vec(),
        }
    }
}

/// Rozdelenie dňa na buckety.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum HourSplit {
    /// Buckety pevnej šírky od polnoci
    FixedWidth { minutes: u32 },
    /// Pomenované skupiny hodín, musia pokryť každú hodinu práve raz
    Named { groups: Vec<NamedHours> },
}

impl HourSplit {
    pub fn hourly() -> Self {
        HourSplit::FixedWidth { minutes: 60 }
    }

    /// Noc (21-3), ráno (4-9), poobedie (10-15), večer (16-20).
    pub fn part_of_day() -> Self {
        HourSplit::Named {
            groups: vec![
                NamedHours::new("night", &[21, 22, 23, 0, 1, 2, 3]),
                NamedHours::new("morning", &[4, 5, 6, 7, 8, 9]),
                NamedHours::new("afternoon", &[10, 11, 12, 13, 14, 15]),
                NamedHours::new("evening", &[16, 17, 18, 19, 20]),
            ],
        }
    }

    pub fn validate(&self) -> EvalResult<()> {
        match self {
            HourSplit::FixedWidth { minutes } => {
                if *minutes == 0 || 1440 % minutes != 0 {
                    return Err(EvalError::config(format!(
                        "šírka bucketu {minutes} min nedelí deň bezo zvyšku"
                    )));
                }
                Ok(())
            }
            HourSplit::Named { groups } => {
                if let Some(name) = duplicate_name(groups.iter().map(|g| g.name.as_str())) {
                    return Err(EvalError::config(format!(
                        "skupina hodín '{name}' je zadaná viackrát"
                    )));
                }
                let mut seen = [0usize; 24];
                for group in groups {
                    for &hour in &group.hours {
                        if hour >= 24 {
                            return Err(EvalError::config(format!(
                                "hodina {hour} v skupine '{}' je mimo 0-23",
                                group.name
                            )));
                        }
                        seen[hour as usize] += 1;
                    }
                }
                match seen.iter().position(|&count| count != 1) {
                    Some(hour) => Err(EvalError::config(format!(
                        "hodina {hour} nie je pokrytá práve jednou skupinou"
                    ))),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Prvý názov, ktorý sa v zozname opakuje.
pub(crate) fn duplicate_name<'a>(mut names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.find(|name| !seen.insert(*name))
}

impl Default for HourSplit {
    fn default() -> Self {
        Self::part_of_day()
    }
}

/// Os denného času, nezávislá od dátumu.
pub struct TimeOfDayAxis {
    split: HourSplit,
    utc_offset_minutes: i32,
}

impl TimeOfDayAxis {
    pub fn new(split: HourSplit, utc_offset_minutes: i32) -> EvalResult<Self> {
        split.validate()?;
        Ok(Self {
            split,
            utc_offset_minutes,
        })
    }

    fn label(minutes: u32) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

impl SegmentAxis for TimeOfDayAxis {
    fn get_name(&self) -> &str {
        "time_of_day"
    }

    fn buckets(&self, _table: &EvaluationTable) -> Vec<String> {
        match &self.split {
            HourSplit::FixedWidth { minutes } => (0..1440 / minutes)
                .map(|i| {
                    let start = i * minutes;
                    format!("{}-{}", Self::label(start), Self::label(start + minutes))
                })
                .collect(),
            HourSplit::Named { groups } => groups.iter().map(|g| g.name.clone()).collect(),
        }
    }

    fn assign(&self, table: &EvaluationTable) -> Vec<usize> {
        let offset = Duration::minutes(i64::from(self.utc_offset_minutes));
        let mut hour_lookup = [0usize; 24];
        if let HourSplit::Named { groups } = &self.split {
            for (idx, group) in groups.iter().enumerate() {
                for &hour in &group.hours {
                    hour_lookup[hour as usize] = idx;
                }
            }
        }

        table
            .rows()
            .iter()
            .map(|row| {
                let local = row.timestamp + offset;
                match &self.split {
                    HourSplit::FixedWidth { minutes } => {
                        ((local.hour() * 60 + local.minute()) / minutes) as usize
                    }
                    HourSplit::Named { .. } => hour_lookup[local.hour() as usize],
                }
            })
            .collect()
    }
}
