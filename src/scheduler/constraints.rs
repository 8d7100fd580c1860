//! Évaluation des contraintes : fonctions pures, aucun effet de bord.

use super::{ledger::Ledger, types::Rejection};
use crate::model::{Day, Shift, ShiftId, Worker, WorkerId};
use std::collections::HashMap;

/// Index des créneaux par id. En cas de doublon, le premier l'emporte.
#[derive(Debug, Clone)]
pub struct ShiftCatalogue<'a> {
    by_id: HashMap<ShiftId, &'a Shift>,
}

impl<'a> ShiftCatalogue<'a> {
    pub fn new(shifts: &'a [Shift]) -> Self {
        let mut by_id = HashMap::with_capacity(shifts.len());
        for shift in shifts {
            by_id.entry(shift.id()).or_insert(shift);
        }
        Self { by_id }
    }

    pub fn get(&self, id: ShiftId) -> Option<&'a Shift> {
        self.by_id.get(&id).copied()
    }
}

pub fn is_available(worker: &Worker, day: Day) -> bool {
    worker.is_available(day)
}

pub fn overlaps(a: &Shift, b: &Shift) -> bool {
    a.overlaps_with(b)
}

/// Heures déjà affectées à `worker`, hors `exclude`.
/// Les ids absents du catalogue ne comptent pas.
pub fn assigned_hours(
    worker: WorkerId,
    ledger: &Ledger,
    catalogue: &ShiftCatalogue<'_>,
    exclude: Option<ShiftId>,
) -> u32 {
    ledger
        .assigned_shifts_for(worker)
        .iter()
        .filter(|id| Some(**id) != exclude)
        .filter_map(|id| catalogue.get(*id))
        .map(Shift::duration_hours)
        .fold(0, u32::saturating_add)
}

pub fn remaining_hours(worker: &Worker, ledger: &Ledger, catalogue: &ShiftCatalogue<'_>) -> i64 {
    i64::from(worker.max_hours_per_week())
        - i64::from(assigned_hours(worker.id(), ledger, catalogue, None))
}

/// Disponibilité, plafond d'heures puis chevauchement, dans cet ordre.
pub fn can_assign(
    worker: &Worker,
    shift: &Shift,
    ledger: &Ledger,
    catalogue: &ShiftCatalogue<'_>,
) -> Result<(), Rejection> {
    evaluate(worker, shift, ledger, catalogue, None)
}

/// Comme [`can_assign`], en ignorant le créneau cible s'il figure déjà
/// parmi les affectations de l'employé.
pub fn can_assign_excluding_target(
    worker: &Worker,
    shift: &Shift,
    ledger: &Ledger,
    catalogue: &ShiftCatalogue<'_>,
) -> Result<(), Rejection> {
    evaluate(worker, shift, ledger, catalogue, Some(shift.id()))
}

fn evaluate(
    worker: &Worker,
    shift: &Shift,
    ledger: &Ledger,
    catalogue: &ShiftCatalogue<'_>,
    exclude: Option<ShiftId>,
) -> Result<(), Rejection> {
    if !is_available(worker, shift.day()) {
        return Err(Rejection::UnavailableDay {
            worker: worker.id(),
            day: shift.day(),
        });
    }

    let remaining = i64::from(worker.max_hours_per_week())
        - i64::from(assigned_hours(worker.id(), ledger, catalogue, exclude));
    if remaining < i64::from(shift.duration_hours()) {
        return Err(Rejection::HourCapExceeded {
            worker: worker.id(),
            cap: worker.max_hours_per_week(),
            remaining,
            requested: shift.duration_hours(),
        });
    }

    let conflicting = ledger
        .assigned_shifts_for(worker.id())
        .iter()
        .filter(|id| Some(**id) != exclude)
        .filter_map(|id| catalogue.get(*id))
        .find(|held| overlaps(held, shift));
    if let Some(held) = conflicting {
        return Err(Rejection::TimeOverlap {
            worker: worker.id(),
            shift: shift.id(),
            conflicting: held.id(),
        });
    }

    Ok(())
}
