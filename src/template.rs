use std::collections::BTreeMap;

use anyhow::{bail, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::model::{Role, RoleId};

/// Définition d'un shift récurrent : nom, horaires, effectifs requis par rôle.
///
/// Une fin antérieure au début signifie que le shift passe minuit ; le moteur
/// traite les horaires comme des données d'affichage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default)]
    pub role_requirements: BTreeMap<RoleId, u32>,
}

impl ShiftDefinition {
    /// Crée une définition en validant nom non vide et `start != end`.
    pub fn new<S: Into<String>>(
        name: S,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("shift name cannot be empty".to_string());
        }
        if start == end {
            return Err("shift start and end cannot be equal".to_string());
        }
        Ok(Self {
            name,
            start,
            end,
            role_requirements: BTreeMap::new(),
        })
    }

    pub fn set_requirement(&mut self, role: RoleId, count: u32) {
        if count == 0 {
            self.role_requirements.remove(&role);
        } else {
            self.role_requirements.insert(role, count);
        }
    }

    /// Effectif requis pour un rôle ; 0 si le rôle n'est pas demandé.
    pub fn required_for(&self, role: RoleId) -> u32 {
        self.role_requirements.get(&role).copied().unwrap_or(0)
    }
}

/// Gabarit hebdomadaire : jour de semaine (0 = dimanche .. 6 = samedi) vers
/// liste ordonnée de shifts. Jour absent ou vide = fermé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTemplate {
    #[serde(default)]
    days: BTreeMap<u8, Vec<ShiftDefinition>>,
}

impl WeeklyTemplate {
    pub fn shifts_for(&self, weekday0: u8) -> &[ShiftDefinition] {
        self.days.get(&weekday0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_shift(&mut self, weekday0: u8, def: ShiftDefinition) -> Result<()> {
        if weekday0 > 6 {
            bail!("weekday must be in 0..=6 (0 = Sunday)");
        }
        self.days.entry(weekday0).or_default().push(def);
        Ok(())
    }

    pub fn clear_day(&mut self, weekday0: u8) {
        self.days.remove(&weekday0);
    }

    pub fn has_shifts(&self) -> bool {
        self.days.values().any(|shifts| !shifts.is_empty())
    }

    /// Retire un rôle de toutes les exigences (appelé à la suppression du rôle).
    pub fn prune_role(&mut self, role: RoleId) {
        for shifts in self.days.values_mut() {
            for shift in shifts.iter_mut() {
                shift.role_requirements.remove(&role);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &[ShiftDefinition])> {
        self.days.iter().map(|(day, shifts)| (*day, shifts.as_slice()))
    }

    /// Intégrité référentielle d'un gabarit chargé : jours valides, shifts
    /// bien formés, tous les rôles requis existent.
    pub fn validate(&self, roles: &[Role]) -> Result<()> {
        for (weekday, shifts) in &self.days {
            if *weekday > 6 {
                bail!("invalid weekday index {weekday}");
            }
            for shift in shifts {
                if shift.name.trim().is_empty() {
                    bail!("shift name cannot be empty");
                }
                if shift.start == shift.end {
                    bail!("shift start and end cannot be equal ({})", shift.name);
                }
                for role_id in shift.role_requirements.keys() {
                    if !roles.iter().any(|r| r.id == *role_id) {
                        bail!(
                            "shift {} requires unknown role id {role_id}",
                            shift.name
                        );
                    }
                }
            }
        }
        Ok(())
    }
}
