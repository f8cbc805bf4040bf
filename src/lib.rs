#![forbid(unsafe_code)]
//! Shiftplan — bibliothèque de planification mensuelle de shifts (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Affectation par note décroissante, plafond de travailleurs faiblement notés.
//! - Génération déterministe ; retouches manuelles sous les mêmes invariants.
//! - Dates naïves (calendrier local du commerce) ; heures en HH:MM.

pub mod availability;
pub mod io;
pub mod model;
pub mod notification;
pub mod requests;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod template;

pub use availability::{has_submitted, is_available, MonthlyAvailability, SlotAvailability};
pub use model::{Business, MonthRef, Role, RoleId, Worker, WorkerId, Workspace};
pub use notification::{prepare_schedule_notice, NoticeRenderer, ScheduleNotice, TextNotice};
pub use requests::{PendingRequest, RequestError, RequestKind, RequestStatus};
pub use schedule::{
    AssignedWorker, MonthlySchedule, ScheduleStats, ShiftInstance, UnfilledPosition,
};
pub use scheduler::{
    add_worker_to_shift, remove_worker_from_shift, EditError, ScheduleError, Scheduler,
};
pub use storage::{JsonStorage, Storage};
pub use template::{ShiftDefinition, WeeklyTemplate};
