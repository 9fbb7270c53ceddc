pub mod frame; // Stĺpcový vstup od externého loadera
pub mod schema; // Názvy stĺpcov a požiadavky na schému
pub mod table; // Overená typovaná tabuľka

pub use frame::{Column, ResultsFrame};
pub use schema::{ColumnConfig, HorizonColumn, SchemaRequirements};
pub use table::{parse_timestamp, EvaluationRow, EvaluationTable, Location};
