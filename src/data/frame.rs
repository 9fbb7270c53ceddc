use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::error::{EvalError, EvalResult};

/// Jeden stĺpec vstupnej tabuľky výsledkov.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
    Timestamp(Vec<DateTime<Utc>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
            Column::Timestamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Text(_) => "text",
            Column::Timestamp(_) => "timestamp",
        }
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Numeric(values)
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Text(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::Text(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<DateTime<Utc>>> for Column {
    fn from(values: Vec<DateTime<Utc>>) -> Self {
        Column::Timestamp(values)
    }
}

/// Stĺpcová tabuľka výsledkov tak, ako ju dodá externý loader.
///
/// Množina stĺpcov je ľubovoľná; ktoré z nich sa použijú, určuje
/// `ColumnConfig` a overí `EvaluationTable::from_frame`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsFrame {
    columns: BTreeMap<String, Column>,
    num_rows: Option<usize>,
}

impl ResultsFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pridá stĺpec, všetky stĺpce musia mať rovnaký počet riadkov.
    pub fn add_column(&mut self, name: &str, column: impl Into<Column>) -> EvalResult<()> {
        let column = column.into();
        if let Some(expected) = self.num_rows {
            if column.len() != expected {
                return Err(EvalError::LengthMismatch {
                    column: name.to_string(),
                    expected,
                    actual: column.len(),
                });
            }
        } else {
            self.num_rows = Some(column.len());
        }
        self.columns.insert(name.to_string(), column);
        Ok(())
    }

    pub fn with_column(mut self, name: &str, column: impl Into<Column>) -> EvalResult<Self> {
        self.add_column(name, column)?;
        Ok(self)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_column_with_different_length() {
        let frame = ResultsFrame::new()
            .with_column("actual", vec![1.0, 2.0, 3.0])
            .unwrap();
        let err = frame.with_column("id", vec!["a", "b"]).unwrap_err();
        match err {
            EvalError::LengthMismatch {
                column,
                expected,
                actual,
            } => {
                assert_eq!(column, "id");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn headers_are_sorted() {
        let frame = ResultsFrame::new()
            .with_column("b", vec![1.0])
            .unwrap()
            .with_column("a", vec!["x"])
            .unwrap();
        assert_eq!(frame.headers(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(frame.num_rows(), 1);
        assert!(frame.contains("a"));
        assert_eq!(frame.column("a").map(Column::type_name), Some("text"));
    }
}
