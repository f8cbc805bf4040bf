//! Planning mensuel généré : artefact dérivé, dénormalisé au moment de la
//! génération pour survivre aux modifications ultérieures du roster.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::model::{RoleId, WorkerId};
use crate::scheduler::LOW_RATING_MAX;

/// Affectation dénormalisée : nom, note et rôle capturés à la génération.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedWorker {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub rating: u8,
    pub role_id: RoleId,
    pub role_name: String,
}

/// Un créneau requis resté vacant. Un enregistrement par place manquante,
/// avec un id stable adressable par l'appelant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnfilledPosition {
    pub id: String,
    pub role_id: RoleId,
    pub role_name: String,
}

/// Occurrence concrète d'un shift à une date donnée.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftInstance {
    /// Dérivé : `"{date}-{index du shift dans le jour}"`.
    pub id: String,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default)]
    pub assigned_workers: Vec<AssignedWorker>,
    #[serde(default)]
    pub unfilled_positions: Vec<UnfilledPosition>,
}

impl ShiftInstance {
    pub fn is_fully_staffed(&self) -> bool {
        self.unfilled_positions.is_empty()
    }

    pub fn has_worker(&self, id: &WorkerId) -> bool {
        self.assigned_workers.iter().any(|a| &a.worker_id == id)
    }

    /// Nombre d'affectés comptant dans le plafond de faible note.
    pub fn low_rated_count(&self) -> usize {
        self.assigned_workers
            .iter()
            .filter(|a| a.rating <= LOW_RATING_MAX)
            .count()
    }

    pub fn assigned_for_role(&self, role: RoleId) -> usize {
        self.assigned_workers
            .iter()
            .filter(|a| a.role_id == role)
            .count()
    }
}

/// Agrégats d'un mois généré.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub total_shifts: u32,
    /// Shifts sans aucune place vacante.
    pub filled_shifts: u32,
    pub unfilled_shifts: u32,
    pub total_workers: u32,
    /// Travailleurs distincts ayant reçu au moins une affectation.
    pub workers_scheduled: u32,
}

/// Planning d'un mois : dates (ISO) vers shifts du jour, plus agrégats.
/// Les jours fermés n'ont pas d'entrée.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySchedule {
    #[serde(default)]
    pub days: BTreeMap<NaiveDate, Vec<ShiftInstance>>,
    #[serde(default)]
    pub stats: ScheduleStats,
}

impl MonthlySchedule {
    pub fn shift(&self, date: NaiveDate, shift_id: &str) -> Option<&ShiftInstance> {
        self.days
            .get(&date)
            .and_then(|shifts| shifts.iter().find(|s| s.id == shift_id))
    }

    pub fn shift_mut(&mut self, date: NaiveDate, shift_id: &str) -> Option<&mut ShiftInstance> {
        self.days
            .get_mut(&date)
            .and_then(|shifts| shifts.iter_mut().find(|s| s.id == shift_id))
    }

    /// Recalcule les agrégats après une retouche manuelle.
    pub fn refresh_stats(&mut self, total_workers: u32) {
        let mut total = 0u32;
        let mut filled = 0u32;
        let mut scheduled: BTreeSet<WorkerId> = BTreeSet::new();
        for shifts in self.days.values() {
            for shift in shifts {
                total += 1;
                if shift.is_fully_staffed() {
                    filled += 1;
                }
                for assigned in &shift.assigned_workers {
                    scheduled.insert(assigned.worker_id.clone());
                }
            }
        }
        self.stats = ScheduleStats {
            total_shifts: total,
            filled_shifts: filled,
            unfilled_shifts: total - filled,
            total_workers,
            workers_scheduled: scheduled.len() as u32,
        };
    }
}
