use super::types::{EditError, LOW_RATED_PER_SHIFT, LOW_RATING_MAX};
use super::util;
use crate::model::{Role, Worker, WorkerId};
use crate::schedule::{AssignedWorker, ShiftInstance, UnfilledPosition};
use crate::template::ShiftDefinition;

/// Ajoute manuellement un travailleur sur un shift généré, sous les mêmes
/// invariants que la génération : qualification, unicité, plafond de faible
/// note. Aucune mutation en cas d'échec.
///
/// Retire la première place vacante du rôle s'il en reste une ; dépasser
/// l'effectif requis est permis.
pub fn add_worker_to_shift(
    shift: &mut ShiftInstance,
    worker: &Worker,
    role: &Role,
) -> Result<(), EditError> {
    if !worker.qualifies_for(role.id) {
        return Err(EditError::NotQualified(role.id));
    }
    if shift.has_worker(&worker.id) {
        return Err(EditError::AlreadyAssigned);
    }
    if worker.rating <= LOW_RATING_MAX && shift.low_rated_count() >= LOW_RATED_PER_SHIFT {
        return Err(EditError::LowRatedCapExceeded);
    }

    shift.assigned_workers.push(AssignedWorker {
        worker_id: worker.id.clone(),
        worker_name: worker.name.clone(),
        rating: worker.rating,
        role_id: role.id,
        role_name: role.name.clone(),
    });
    if let Some(pos) = shift
        .unfilled_positions
        .iter()
        .position(|u| u.role_id == role.id)
    {
        shift.unfilled_positions.remove(pos);
    }
    Ok(())
}

/// Retire un travailleur d'un shift et redérive les places vacantes du rôle
/// en comparant l'effectif requis de la définition au nombre d'affectés
/// restants. Retourne `false` si le travailleur n'était pas sur le shift.
pub fn remove_worker_from_shift(
    shift: &mut ShiftInstance,
    worker_id: &WorkerId,
    definition: &ShiftDefinition,
) -> bool {
    let Some(pos) = shift
        .assigned_workers
        .iter()
        .position(|a| &a.worker_id == worker_id)
    else {
        return false;
    };
    let removed = shift.assigned_workers.remove(pos);

    let required = definition.required_for(removed.role_id);
    let assigned = shift.assigned_for_role(removed.role_id) as u32;
    shift.unfilled_positions.retain(|u| u.role_id != removed.role_id);
    for slot in assigned..required {
        shift.unfilled_positions.push(UnfilledPosition {
            id: util::slot_id(&shift.id, removed.role_id, slot),
            role_id: removed.role_id,
            role_name: removed.role_name.clone(),
        });
    }
    true
}
