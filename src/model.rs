use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::MonthlyAvailability;
use crate::requests::PendingRequest;
use crate::schedule::MonthlySchedule;
use crate::template::{ShiftDefinition, WeeklyTemplate};

/// Identifiant fort pour Worker
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Role (entier, alloué par le commerce)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoleId(pub u32);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rôle métier (Serveur, Cuisinier, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

/// Travailleur rattaché à un commerce.
///
/// `monthly_availability` est indexé par la clé de mois `"YYYY-MM"` ;
/// l'absence de clé signifie que le mois n'a pas été soumis (distinct de
/// "indisponible tous les jours").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub email: String,
    /// Note 1..=10
    pub rating: u8,
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
    #[serde(default)]
    pub monthly_availability: BTreeMap<String, MonthlyAvailability>,
}

impl Worker {
    /// Crée un travailleur en validant que la note est dans 1..=10.
    pub fn new<N: Into<String>, E: Into<String>>(
        name: N,
        email: E,
        rating: u8,
    ) -> Result<Self, String> {
        if !(1..=10).contains(&rating) {
            return Err("rating must be between 1 and 10".to_string());
        }
        Ok(Self {
            id: WorkerId::random(),
            name: name.into(),
            email: email.into(),
            rating,
            role_ids: Vec::new(),
            monthly_availability: BTreeMap::new(),
        })
    }

    pub fn qualifies_for(&self, role: RoleId) -> bool {
        self.role_ids.contains(&role)
    }

    /// Entrée de disponibilité du mois, créée vide si absente (mois soumis,
    /// tout disponible).
    pub fn availability_entry(&mut self, month: MonthRef) -> &mut MonthlyAvailability {
        self.monthly_availability.entry(month.key()).or_default()
    }
}

/// Mois cible explicite : `month0` est indexé à 0 (0 = janvier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRef {
    pub year: i32,
    pub month0: u32,
}

impl MonthRef {
    pub fn new(year: i32, month0: u32) -> Result<Self, String> {
        if month0 > 11 {
            return Err("month0 must be in 0..=11".to_string());
        }
        Ok(Self { year, month0 })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Clé de mois persistée, zéro-paddée : `"2025-07"`.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month0 + 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
            .expect("valid month0 enforced at construction")
    }

    pub fn day_count(&self) -> u32 {
        let next = if self.month0 == 11 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month0 + 2, 1)
        }
        .expect("valid month0 enforced at construction");
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Tous les jours calendaires du mois, dans l'ordre.
    pub fn days(&self) -> Vec<NaiveDate> {
        let first = self.first_day();
        (0..self.day_count())
            .map(|offset| first + chrono::Duration::days(i64::from(offset)))
            .collect()
    }
}

/// Index de jour de semaine du modèle : 0 = dimanche .. 6 = samedi.
pub fn weekday0(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Commerce : rôles + gabarit hebdomadaire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub template: WeeklyTemplate,
}

impl Business {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
            template: WeeklyTemplate::default(),
        }
    }

    /// Dérivé, jamais stocké : au moins un rôle ET au moins un jour avec un shift.
    pub fn setup_complete(&self) -> bool {
        !self.roles.is_empty() && self.template.has_shifts()
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Alloue l'id suivant (1-basé) et ajoute le rôle.
    pub fn add_role<S: Into<String>>(&mut self, name: S) -> RoleId {
        let next = self.roles.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        let id = RoleId(next);
        self.roles.push(Role {
            id,
            name: name.into(),
        });
        id
    }

    /// Supprime le rôle et purge ses références dans le gabarit
    /// (passe d'intégrité référentielle).
    pub fn remove_role(&mut self, id: RoleId) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r.id != id);
        if self.roles.len() == before {
            return false;
        }
        self.template.prune_role(id);
        true
    }

    /// Ajoute un shift au gabarit en validant les rôles requis à l'édition.
    pub fn add_shift(&mut self, weekday0: u8, def: ShiftDefinition) -> anyhow::Result<()> {
        for role_id in def.role_requirements.keys() {
            if self.role(*role_id).is_none() {
                anyhow::bail!("shift requires unknown role id {role_id}");
            }
        }
        self.template.add_shift(weekday0, def)
    }

    /// Revalide un document chargé depuis le disque.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (idx, role) in self.roles.iter().enumerate() {
            if self.roles[..idx].iter().any(|r| r.id == role.id) {
                anyhow::bail!("duplicate role id {}", role.id);
            }
        }
        self.template.validate(&self.roles)
    }
}

/// Document de travail complet persisté sur disque.
///
/// Les plannings générés sont des artefacts dérivés, régénérables ; ils ne
/// font pas foi pour les rôles ni les travailleurs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    pub business: Business,
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub requests: Vec<PendingRequest>,
    /// Indexé par clé de mois `"YYYY-MM"`.
    #[serde(default)]
    pub schedules: BTreeMap<String, MonthlySchedule>,
}

impl Workspace {
    pub fn find_worker_by_email<'a>(&'a self, email: &str) -> Option<&'a Worker> {
        self.workers.iter().find(|w| w.email == email)
    }
    pub fn find_worker_by_id<'a>(&'a self, id: &WorkerId) -> Option<&'a Worker> {
        self.workers.iter().find(|w| &w.id == id)
    }
    pub fn find_worker_mut_by_email(&mut self, email: &str) -> Option<&mut Worker> {
        self.workers.iter_mut().find(|w| w.email == email)
    }
    pub fn find_request_mut(&mut self, id: &str) -> Option<&mut PendingRequest> {
        self.requests.iter_mut().find(|r| r.id == id)
    }
}
