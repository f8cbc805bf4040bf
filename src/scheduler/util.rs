use chrono::NaiveDate;

use crate::model::RoleId;

/// Id stable d'une occurrence de shift : date + index dans le jour.
pub(super) fn instance_id(date: NaiveDate, shift_index: u32) -> String {
    format!("{date}-{shift_index}")
}

/// Id stable d'une place vacante : shift + rôle + index de place.
/// Les places manquantes d'un rôle sont indexées `affectés..requis`.
pub(super) fn slot_id(shift_id: &str, role: RoleId, slot: u32) -> String {
    format!("{shift_id}-{role}-{slot}")
}
