use chrono::{Datelike, Duration};
use serde::{Deserialize, Serialize};

use super::time_of_day::duplicate_name;
use super::SegmentAxis;
use crate::data::EvaluationTable;
use crate::error::{EvalError, EvalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemisphere {
    Northern,
    Southern,
}

/// Pomenovaná skupina mesiacov (1 = január).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedMonths {
    pub name: String,
    pub months: Vec<u32>,
}

impl NamedMonths {
    pub fn new(name: &str, months: &[u32]) -> Self {
        Self {
            name: name.to_string(),
            months: months.to_vec(),
        }
    }
}

/// Rozdelenie roka na sezóny.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSplit {
    pub groups: Vec<NamedMonths>,
}

impl YearSplit {
    /// Meteorologické sezóny (na severe zima = december až február).
    pub fn meteorological(hemisphere: Hemisphere) -> Self {
        let (dec_feb, jun_aug, mar_may, sep_nov) = match hemisphere {
            Hemisphere::Northern => ("winter", "summer", "spring", "fall"),
            Hemisphere::Southern => ("summer", "winter", "fall", "spring"),
        };
        Self {
            groups: vec![
                NamedMonths::new(dec_feb, &[12, 1, 2]),
                NamedMonths::new(mar_may, &[3, 4, 5]),
                NamedMonths::new(jun_aug, &[6, 7, 8]),
                NamedMonths::new(sep_nov, &[9, 10, 11]),
            ],
        }
    }

    pub fn validate(&self) -> EvalResult<()> {
        if let Some(name) = duplicate_name(self.groups.iter().map(|g| g.name.as_str())) {
            return Err(EvalError::config(format!("sezóna '{name}' je zadaná viackrát")));
        }
        let mut seen = [0usize; 12];
        for group in &self.groups {
            for &month in &group.months {
                if !(1..=12).contains(&month) {
                    return Err(EvalError::config(format!(
                        "mesiac {month} v sezóne '{}' je mimo 1-12",
                        group.name
                    )));
                }
                seen[(month - 1) as usize] += 1;
            }
        }
        match seen.iter().position(|&count| count != 1) {
            Some(idx) => Err(EvalError::config(format!(
                "mesiac {} nie je pokrytý práve jednou sezónou",
                idx + 1
            ))),
            None => Ok(()),
        }
    }
}

impl Default for YearSplit {
    fn default() -> Self {
        Self::meteorological(Hemisphere::Northern)
    }
}

pub struct SeasonAxis {
    split: YearSplit,
    utc_offset_minutes: i32,
}

impl SeasonAxis {
    pub fn new(split: YearSplit, utc_offset_minutes: i32) -> EvalResult<Self> {
        split.validate()?;
        Ok(Self {
            split,
            utc_offset_minutes,
        })
    }
}

impl SegmentAxis for SeasonAxis {
    fn get_name(&self) -> &str {
        "season"
    }

    fn buckets(&self, _table: &EvaluationTable) -> Vec<String> {
        self.split.groups.iter().map(|g| g.name.clone()).collect()
    }

    fn assign(&self, table: &EvaluationTable) -> Vec<usize> {
        let mut month_lookup = [0usize; 12];
        for (idx, group) in self.split.groups.iter().enumerate() {
            for &month in &group.months {
                month_lookup[(month - 1) as usize] = idx;
            }
        }
        let offset = Duration::minutes(i64::from(self.utc_offset_minutes));
        table
            .rows()
            .iter()
            .map(|row| month_lookup[((row.timestamp + offset).month() - 1) as usize])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EvaluationRow, HorizonColumn};
    use chrono::{TimeZone, Utc};

    fn monthly_table() -> EvaluationTable {
        let rows = (1..=12)
            .map(|m| EvaluationRow {
                entity_id: "a".to_string(),
                timestamp: Utc.with_ymd_and_hms(2022, m, 15, 12, 0, 0).unwrap(),
                observed: 0.0,
                predictions: vec![0.0],
                capacity: None,
                reference: None,
                t0_observed: None,
                location: None,
            })
            .collect();
        EvaluationTable::from_rows(vec![HorizonColumn::new("p", 0)], rows).unwrap()
    }

    #[test]
    fn northern_meteorological_seasons() {
        let axis = SeasonAxis::new(YearSplit::default(), 0).unwrap();
        let table = monthly_table();
        let buckets = axis.buckets(&table);
        let names: Vec<&str> = axis
            .assign(&table)
            .iter()
            .map(|&i| buckets[i].as_str())
            .collect();
        assert_eq!(&names[..3], &["winter", "winter", "spring"]);
        assert_eq!(names[6], "summer");
        assert_eq!(names[9], "fall");
        assert_eq!(names[11], "winter");
    }

    #[test]
    fn southern_hemisphere_swaps_seasons() {
        let axis = SeasonAxis::new(YearSplit::meteorological(Hemisphere::Southern), 0).unwrap();
        let table = monthly_table();
        let buckets = axis.buckets(&table);
        assert_eq!(buckets[axis.assign(&table)[0]], "summer");
        assert_eq!(buckets[axis.assign(&table)[6]], "winter");
    }

    #[test]
    fn incomplete_split_is_rejected() {
        let split = YearSplit {
            groups: vec![NamedMonths::new("dry", &[1, 2, 3])],
        };
        assert!(split.validate().is_err());
        let out_of_range = YearSplit {
            groups: vec![NamedMonths::new("x", &[13])],
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn repeated_season_name_is_rejected() {
        let split = YearSplit {
            groups: vec![
                NamedMonths::new("cold", &[11, 12, 1, 2, 3]),
                NamedMonths::new("warm", &[4, 5, 6, 7, 8, 9]),
                NamedMonths::new("cold", &[10]),
            ],
        };
        assert!(matches!(split.validate(), Err(EvalError::InvalidConfig(_))));
        assert!(SeasonAxis::new(split, 0).is_err());
    }
}
