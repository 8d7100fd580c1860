use super::{constraints::ShiftCatalogue, ledger::Ledger, Conflict, ConflictKind};
use crate::model::{Roster, Shift};

/// Ré-audite un ledger (typiquement rechargé depuis disque) contre le roster.
pub(super) fn detect_conflicts(roster: &Roster, ledger: &Ledger) -> Vec<Conflict> {
    let catalogue = ShiftCatalogue::new(roster.shifts());
    let mut out = Vec::new();

    for (shift_id, workers) in ledger.all_assignments() {
        let Some(shift) = catalogue.get(*shift_id) else {
            out.push(Conflict {
                kind: ConflictKind::UnknownReference,
                worker: None,
                shifts: vec![*shift_id],
            });
            continue;
        };
        if workers.len() > shift.required_workers() as usize {
            out.push(Conflict {
                kind: ConflictKind::OverStaffed,
                worker: None,
                shifts: vec![*shift_id],
            });
        }
        for worker in workers {
            if roster.find_worker(*worker).is_none() {
                out.push(Conflict {
                    kind: ConflictKind::UnknownReference,
                    worker: Some(*worker),
                    shifts: vec![*shift_id],
                });
            }
        }
    }

    for worker in roster.workers() {
        let mut held: Vec<&Shift> = ledger
            .assigned_shifts_for(worker.id())
            .iter()
            .filter_map(|id| catalogue.get(*id))
            .collect();
        held.sort_by_key(|s| s.week_order());

        for shift in held.iter().filter(|s| !worker.is_available(s.day())) {
            out.push(Conflict {
                kind: ConflictKind::UnavailableDay,
                worker: Some(worker.id()),
                shifts: vec![shift.id()],
            });
        }

        let total = held
            .iter()
            .map(|s| s.duration_hours())
            .fold(0, u32::saturating_add);
        if total > worker.max_hours_per_week() {
            out.push(Conflict {
                kind: ConflictKind::HourCapExceeded,
                worker: Some(worker.id()),
                shifts: held.iter().map(|s| s.id()).collect(),
            });
        }

        for (idx, a) in held.iter().enumerate() {
            for b in held.iter().skip(idx + 1) {
                if a.overlaps_with(b) {
                    out.push(Conflict {
                        kind: ConflictKind::Overlap,
                        worker: Some(worker.id()),
                        shifts: vec![a.id(), b.id()],
                    });
                }
            }
        }
    }

    out
}
