use super::{
    Baseline, BaselineKind, LastDayPersistence, LastValuePersistence, MaxBaseline,
    ReferenceBaseline, ZeroBaseline,
};
use crate::error::EvalResult;

/// Factory pre vytváranie baseline generátorov podľa druhu alebo názvu.
pub struct BaselineFactory;

impl BaselineFactory {
    /// Vytvorí baseline daného druhu. `timestep_minutes` používa len last-day persistence.
    pub fn create(kind: BaselineKind, timestep_minutes: u32) -> Box<dyn Baseline> {
        match kind {
            BaselineKind::Zero => Box::new(ZeroBaseline::new()),
            BaselineKind::Max => Box::new(MaxBaseline::new()),
            BaselineKind::LastValue => Box::new(LastValuePersistence::new()),
            BaselineKind::LastDay => Box::new(LastDayPersistence::new(timestep_minutes)),
            BaselineKind::Reference => Box::new(ReferenceBaseline::new()),
        }
    }

    /// Vytvorí baseline na základe názvu (napr. "zero", "last_day_persistence_baseline").
    pub fn create_from_name(name: &str) -> EvalResult<Box<dyn Baseline>> {
        let kind = BaselineKind::from_name(name)?;
        Ok(Self::create(kind, 30))
    }

    /// Vytvorí baseline a nastaví mu parametre.
    pub fn create_with_params(name: &str, params: &[(&str, &str)]) -> EvalResult<Box<dyn Baseline>> {
        let mut baseline = Self::create_from_name(name)?;
        for (key, value) in params {
            baseline.set_param(key, value)?;
        }
        Ok(baseline)
    }

    /// Vráti zoznam všetkých dostupných baseline
    pub fn available() -> Vec<&'static str> {
        vec!["zero", "max", "last_value", "last_day", "reference"]
    }

    /// Vráti popis baseline
    pub fn get_description(name: &str) -> Option<&'static str> {
        match BaselineKind::from_name(name).ok()? {
            BaselineKind::Zero => Some("Zero - predpovedá nulový výkon"),
            BaselineKind::Max => Some("Max - predpovedá inštalovaný výkon entity"),
            BaselineKind::LastValue => {
                Some("Last value persistence - opakuje posledné známe pozorovanie")
            }
            BaselineKind::LastDay => {
                Some("Last day persistence - opakuje pozorovanie z rovnakého času o deň skôr")
            }
            BaselineKind::Reference => {
                Some("Reference - externá referenčná séria hodnotená ako baseline")
            }
        }
    }
}
