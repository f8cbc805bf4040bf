use thiserror::Error;

use crate::model::RoleId;

/// Note à partir de laquelle (inclus) un travailleur compte dans le plafond.
pub const LOW_RATING_MAX: u8 = 4;
/// Plafond de travailleurs faiblement notés par shift, tous rôles confondus.
pub const LOW_RATED_PER_SHIFT: usize = 2;

/// Échecs de précondition : la génération s'arrête sans rien produire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("business setup is incomplete: configure at least one role and one shift")]
    SetupIncomplete,
    #[error("no workers on the roster")]
    NoWorkers,
    #[error("workers have not submitted availability for {month}: {}", .names.join(", "))]
    MissingAvailability { month: String, names: Vec<String> },
}

/// Échecs de retouche manuelle : locaux à l'édition, le shift reste intact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("worker is not qualified for role {0}")]
    NotQualified(RoleId),
    #[error("worker is already assigned to this shift")]
    AlreadyAssigned,
    #[error("shift already has the maximum of {} low-rated workers", LOW_RATED_PER_SHIFT)]
    LowRatedCapExceeded,
}
