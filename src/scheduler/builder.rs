use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::{assignment, util};
use crate::model::{Business, Worker, WorkerId};
use crate::schedule::{ShiftInstance, UnfilledPosition};
use crate::template::ShiftDefinition;

/// Assemble une occurrence de shift pour une date : une passe d'affectation
/// par rôle, dans l'ordre de la liste de rôles du commerce, en propageant le
/// compteur de faible note d'un rôle au suivant.
///
/// `available_workers` est le sous-ensemble du roster disponible pour cette
/// date et cet index de shift, dans l'ordre du roster.
pub(super) fn build_shift(
    business: &Business,
    available_workers: &[&Worker],
    date: NaiveDate,
    shift_index: u32,
    definition: &ShiftDefinition,
) -> ShiftInstance {
    let shift_id = util::instance_id(date, shift_index);
    let mut instance = ShiftInstance {
        id: shift_id.clone(),
        name: definition.name.clone(),
        start: definition.start,
        end: definition.end,
        assigned_workers: Vec::new(),
        unfilled_positions: Vec::new(),
    };

    let mut taken: BTreeSet<WorkerId> = BTreeSet::new();
    let mut low_rated = 0usize;

    for role in &business.roles {
        let required = definition.required_for(role.id);
        if required == 0 {
            continue;
        }

        let candidates: Vec<&Worker> = available_workers
            .iter()
            .copied()
            .filter(|w| w.qualifies_for(role.id) && !taken.contains(&w.id))
            .collect();

        let result = assignment::assign_role(&candidates, role, required, &mut taken, low_rated);
        low_rated = result.low_rated_count;

        let assigned_count = result.assigned.len() as u32;
        instance.assigned_workers.extend(result.assigned);
        for slot in assigned_count..required {
            instance.unfilled_positions.push(UnfilledPosition {
                id: util::slot_id(&shift_id, role.id, slot),
                role_id: role.id,
                role_name: role.name.clone(),
            });
        }
        debug_assert_eq!(required - assigned_count, result.unfilled_count);
    }

    instance
}
