mod assignment;
mod builder;
mod mutate;
mod types;
mod util;

pub use mutate::{add_worker_to_shift, remove_worker_from_shift};
pub use types::{EditError, ScheduleError, LOW_RATED_PER_SHIFT, LOW_RATING_MAX};

use crate::availability;
use crate::model::{weekday0, Business, MonthRef, Worker};
use crate::schedule::MonthlySchedule;

/// Générateur de planning : fonction pure de (commerce, roster, mois).
/// Aucun état ambiant ; deux appels sur les mêmes entrées produisent le
/// même planning octet pour octet.
#[derive(Debug)]
pub struct Scheduler<'a> {
    business: &'a Business,
    workers: &'a [Worker],
}

impl<'a> Scheduler<'a> {
    pub fn new(business: &'a Business, workers: &'a [Worker]) -> Self {
        Self { business, workers }
    }

    /// Génère le planning d'un mois entier.
    ///
    /// Préconditions, dans l'ordre, chacune bloquante :
    /// 1. configuration complète (au moins un rôle et un shift) ;
    /// 2. roster non vide ;
    /// 3. chaque travailleur a soumis ses disponibilités du mois.
    pub fn generate(&self, month: MonthRef) -> Result<MonthlySchedule, ScheduleError> {
        if !self.business.setup_complete() {
            return Err(ScheduleError::SetupIncomplete);
        }
        if self.workers.is_empty() {
            return Err(ScheduleError::NoWorkers);
        }
        let missing: Vec<String> = self
            .workers
            .iter()
            .filter(|w| !availability::has_submitted(w, month))
            .map(|w| w.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ScheduleError::MissingAvailability {
                month: month.key(),
                names: missing,
            });
        }

        let mut schedule = MonthlySchedule::default();
        for date in month.days() {
            let definitions = self.business.template.shifts_for(weekday0(date));
            if definitions.is_empty() {
                // jour fermé : aucune entrée
                continue;
            }
            let mut instances = Vec::with_capacity(definitions.len());
            for (shift_index, definition) in definitions.iter().enumerate() {
                let shift_index = shift_index as u32;
                let available: Vec<&Worker> = self
                    .workers
                    .iter()
                    .filter(|w| availability::is_available(w, date, shift_index))
                    .collect();
                instances.push(builder::build_shift(
                    self.business,
                    &available,
                    date,
                    shift_index,
                    definition,
                ));
            }
            schedule.days.insert(date, instances);
        }
        schedule.refresh_stats(self.workers.len() as u32);
        Ok(schedule)
    }
}
