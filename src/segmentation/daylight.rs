use chrono::{DateTime, Datelike, Timelike, Utc};

use super::SegmentAxis;
use crate::data::EvaluationTable;

pub const DAY: &str = "day";
pub const NIGHT: &str = "night";

/// Výška slnka nad obzorom v stupňoch (zjednodušený model).
///
/// Deklinácia podľa Cooperovej aproximácie, hodinový uhol so zjednodušenou
/// korekciou na zemepisnú dĺžku, bez rovnice času a refrakcie.
pub fn solar_elevation(timestamp: DateTime<Utc>, latitude: f64, longitude: f64) -> f64 {
    let day_of_year = timestamp.ordinal() as f64;
    let hour = timestamp.hour() as f64
        + timestamp.minute() as f64 / 60.0
        + timestamp.second() as f64 / 3600.0;

    let declination_rad =
        23.45_f64.to_radians() * ((360.0 / 365.25) * (day_of_year + 284.0)).to_radians().sin();

    // slnečné poludnie je približne o 12:00 miestneho slnečného času
    let solar_hour = hour + longitude / 15.0;
    let hour_angle_rad = ((solar_hour - 12.0) * 15.0).to_radians();

    let lat_rad = latitude.to_radians();
    let sin_elevation = lat_rad.sin() * declination_rad.sin()
        + lat_rad.cos() * declination_rad.cos() * hour_angle_rad.cos();
    sin_elevation.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Os deň/noc: noc je, keď slnko nie je vyššie ako `night_threshold_degrees`.
pub struct DaylightAxis {
    night_threshold_degrees: f64,
}

impl DaylightAxis {
    pub fn new(night_threshold_degrees: f64) -> Self {
        Self {
            night_threshold_degrees,
        }
    }

    pub fn is_night(&self, timestamp: DateTime<Utc>, latitude: f64, longitude: f64) -> bool {
        solar_elevation(timestamp, latitude, longitude) <= self.night_threshold_degrees
    }
}

impl SegmentAxis for DaylightAxis {
    fn get_name(&self) -> &str {
        "daylight"
    }

    fn buckets(&self, _table: &EvaluationTable) -> Vec<String> {
        vec![DAY.to_string(), NIGHT.to_string()]
    }

    fn assign(&self, table: &EvaluationTable) -> Vec<usize> {
        table
            .rows()
            .iter()
            .map(|row| match row.location {
                // bez polohy (alebo s NaN) sa riadok nepovažuje za nočný
                Some(loc) if self.is_night(row.timestamp, loc.latitude, loc.longitude) => 1,
                _ => 0,
            })
            .collect()
    }
}
