//! Disponibilités mensuelles : forme canonique
//! `date -> index de shift -> {available, preferred}`.
//!
//! Modèle opt-out : un travailleur déclare ses exceptions, pas ses
//! confirmations. Un mois soumis sans aucune exception signifie disponible
//! partout ; un mois non soumis bloque la génération en amont.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{MonthRef, Worker};

/// Disponibilité d'un travailleur pour un shift précis d'une date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub available: bool,
    #[serde(default)]
    pub preferred: bool,
}

impl Default for SlotAvailability {
    fn default() -> Self {
        Self {
            available: true,
            preferred: false,
        }
    }
}

/// Exceptions déclarées pour une date (indexées par index de shift du jour).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    #[serde(default)]
    pub slots: BTreeMap<u32, SlotAvailability>,
}

/// Disponibilité d'un mois soumis. Une entrée vide vaut "disponible partout".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAvailability {
    #[serde(default)]
    pub days: BTreeMap<NaiveDate, DayAvailability>,
}

impl MonthlyAvailability {
    pub fn mark(&mut self, date: NaiveDate, shift_index: u32, available: bool) {
        self.days
            .entry(date)
            .or_default()
            .slots
            .entry(shift_index)
            .or_default()
            .available = available;
    }

    pub fn mark_preferred(&mut self, date: NaiveDate, shift_index: u32, preferred: bool) {
        self.days
            .entry(date)
            .or_default()
            .slots
            .entry(shift_index)
            .or_default()
            .preferred = preferred;
    }

    /// Date non listée ou index de shift non listé : disponible.
    pub fn is_available(&self, date: NaiveDate, shift_index: u32) -> bool {
        match self.days.get(&date) {
            None => true,
            Some(day) => day
                .slots
                .get(&shift_index)
                .map(|slot| slot.available)
                .unwrap_or(true),
        }
    }
}

/// Résolveur pur : mois non soumis -> indisponible ; sinon règle opt-out du
/// mois. La précondition de génération rejette de toute façon un mois non
/// soumis avant que ce défaut n'entre en jeu.
pub fn is_available(worker: &Worker, date: NaiveDate, shift_index: u32) -> bool {
    let key = MonthRef::from_date(date).key();
    match worker.monthly_availability.get(&key) {
        None => false,
        Some(month) => month.is_available(date, shift_index),
    }
}

/// Le travailleur a-t-il soumis ses disponibilités pour ce mois ?
pub fn has_submitted(worker: &Worker, month: MonthRef) -> bool {
    worker.monthly_availability.contains_key(&month.key())
}
