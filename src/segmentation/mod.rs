/// Delenie evaluačnej tabuľky na segmenty podľa nezávislých osí
/// (deň/noc, denný čas, sezóna, entita). Novú os stačí implementovať cez
/// trait `SegmentAxis` a pridať do `Segmenter`.

pub mod daylight;
pub mod entity;
pub mod season;
pub mod segmenter;
pub mod time_of_day;

pub use daylight::{solar_elevation, DaylightAxis};
pub use entity::EntityAxis;
pub use season::{Hemisphere, NamedMonths, SeasonAxis, YearSplit};
pub use segmenter::{Segment, SegmentKey, SegmentationConfig, Segmenter};
pub use time_of_day::{HourSplit, NamedHours, TimeOfDayAxis};

use crate::data::EvaluationTable;

/// Trait pre os segmentácie.
///
/// Každý riadok patrí práve do jedného bucketu osi, buckety sú pevné
/// bez ohľadu na to, koľko riadkov do nich padne.
pub trait SegmentAxis: Send + Sync {
    fn get_name(&self) -> &str;

    /// Skutočné buckety osi (bez "all").
    fn buckets(&self, table: &EvaluationTable) -> Vec<String>;

    /// Index bucketu pre každý riadok tabuľky.
    fn assign(&self, table: &EvaluationTable) -> Vec<usize>;
}
