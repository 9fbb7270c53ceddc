use std::collections::HashMap;

use super::SegmentAxis;
use crate::data::EvaluationTable;

/// Os podľa entity: jeden bucket pre každé `entity_id` v tabuľke.
pub struct EntityAxis;

impl SegmentAxis for EntityAxis {
    fn get_name(&self) -> &str {
        "entity"
    }

    fn buckets(&self, table: &EvaluationTable) -> Vec<String> {
        table.entity_ids()
    }

    fn assign(&self, table: &EvaluationTable) -> Vec<usize> {
        let ids = table.entity_ids();
        let lookup: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.as_str(), idx))
            .collect();
        table
            .rows()
            .iter()
            .map(|row| lookup[row.entity_id.as_str()])
            .collect()
    }
}
