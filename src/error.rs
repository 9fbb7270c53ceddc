use thiserror::Error;

/// Chyby evaluácie predpovedí.
///
/// Len `Schema`, `ColumnType`, `LengthMismatch`, `InvalidTimestamp` a
/// konfiguračné chyby evaluáciu prerušia. `InsufficientHistory` vracajú
/// baseline generátory a orchestrátor ju premení na NaN hodnoty.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Povinný stĺpec vo vstupnej tabuľke úplne chýba.
    #[error("Chýbajúci povinný stĺpec '{column}'")]
    Schema { column: String },

    #[error("Stĺpec '{column}' má nesprávny typ, očakávaný {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("Stĺpec '{column}' má {actual} riadkov, očakávaných {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Hodnota '{value}' v stĺpci '{column}' (riadok {row}) nie je platný čas")]
    InvalidTimestamp {
        column: String,
        row: usize,
        value: String,
    },

    /// Baseline potrebuje dlhšiu históriu, než má entita k dispozícii.
    #[error(
        "Baseline '{baseline}' potrebuje pre entitu '{entity}' aspoň {required} bodov histórie, dostupných {available}"
    )]
    InsufficientHistory {
        baseline: String,
        entity: String,
        required: usize,
        available: usize,
    },

    #[error("Neplatná konfigurácia: {0}")]
    InvalidConfig(String),

    #[error("Neznámy baseline: {0}")]
    UnknownBaseline(String),

    #[error("Chyba serializácie: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EvalError {
    pub fn schema(column: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Chyby, po ktorých sa pokračuje s NaN výsledkom.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientHistory { .. })
    }
}

pub type EvalResult<T> = Result<T, EvalError>;
