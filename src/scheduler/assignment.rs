use std::collections::BTreeSet;

use super::types::{LOW_RATED_PER_SHIFT, LOW_RATING_MAX};
use crate::model::{Role, Worker, WorkerId};
use crate::schedule::AssignedWorker;

pub(super) struct RoleAssignment {
    pub assigned: Vec<AssignedWorker>,
    /// Compteur de faible note mis à jour, à propager au rôle suivant du shift.
    pub low_rated_count: usize,
    pub unfilled_count: u32,
}

/// Affecte un rôle d'un shift. Les candidats sont déjà filtrés : qualifiés,
/// disponibles, pas encore affectés à ce shift.
///
/// Tri par note décroissante ; les égalités conservent l'ordre du roster
/// (tri stable). Un candidat bloqué uniquement par le plafond de faible note
/// est sauté, les suivants restent essayés pour la même place.
pub(super) fn assign_role(
    candidates: &[&Worker],
    role: &Role,
    required: u32,
    taken: &mut BTreeSet<WorkerId>,
    low_rated_so_far: usize,
) -> RoleAssignment {
    let mut ranked: Vec<&Worker> = candidates.to_vec();
    ranked.sort_by(|a, b| b.rating.cmp(&a.rating));

    let mut assigned = Vec::new();
    let mut low_rated = low_rated_so_far;
    let mut unfilled = 0u32;

    for _slot in 0..required {
        let pick = ranked.iter().position(|worker| {
            !taken.contains(&worker.id)
                && (worker.rating > LOW_RATING_MAX || low_rated < LOW_RATED_PER_SHIFT)
        });
        match pick {
            Some(idx) => {
                let worker = ranked[idx];
                if worker.rating <= LOW_RATING_MAX {
                    low_rated += 1;
                }
                taken.insert(worker.id.clone());
                assigned.push(AssignedWorker {
                    worker_id: worker.id.clone(),
                    worker_name: worker.name.clone(),
                    rating: worker.rating,
                    role_id: role.id,
                    role_name: role.name.clone(),
                });
            }
            None => unfilled += 1,
        }
    }

    RoleAssignment {
        assigned,
        low_rated_count: low_rated,
        unfilled_count: unfilled,
    }
}
