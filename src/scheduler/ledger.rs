use crate::model::{ShiftId, WorkerId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

static EMPTY_WORKERS: BTreeSet<WorkerId> = BTreeSet::new();
static EMPTY_SHIFTS: BTreeSet<ShiftId> = BTreeSet::new();

/// Relation employé ↔ créneau, avec deux index tenus à jour ensemble.
///
/// Les index ne sont jamais exposés en écriture : seules `assign` et
/// `unassign` modifient la relation, et elles touchent toujours les deux vues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Vec<LedgerEntry>", from = "Vec<LedgerEntry>"))]
pub struct Ledger {
    by_shift: BTreeMap<ShiftId, BTreeSet<WorkerId>>,
    by_worker: BTreeMap<WorkerId, BTreeSet<ShiftId>>,
}

/// Forme persistée d'une paire de la relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedgerEntry {
    pub shift: ShiftId,
    pub worker: WorkerId,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute la paire ; `false` si elle existait déjà.
    pub fn assign(&mut self, worker: WorkerId, shift: ShiftId) -> bool {
        let inserted = self.by_shift.entry(shift).or_default().insert(worker);
        self.by_worker.entry(worker).or_default().insert(shift);
        inserted
    }

    /// Retire la paire ; `false` si elle était absente.
    pub fn unassign(&mut self, worker: WorkerId, shift: ShiftId) -> bool {
        let removed = match self.by_shift.get_mut(&shift) {
            Some(workers) => {
                let removed = workers.remove(&worker);
                if workers.is_empty() {
                    self.by_shift.remove(&shift);
                }
                removed
            }
            None => false,
        };
        if let Some(shifts) = self.by_worker.get_mut(&worker) {
            shifts.remove(&shift);
            if shifts.is_empty() {
                self.by_worker.remove(&worker);
            }
        }
        removed
    }

    pub fn contains(&self, worker: WorkerId, shift: ShiftId) -> bool {
        self.by_shift
            .get(&shift)
            .is_some_and(|workers| workers.contains(&worker))
    }

    pub fn assigned_workers_for(&self, shift: ShiftId) -> &BTreeSet<WorkerId> {
        self.by_shift.get(&shift).unwrap_or(&EMPTY_WORKERS)
    }

    pub fn assigned_shifts_for(&self, worker: WorkerId) -> &BTreeSet<ShiftId> {
        self.by_worker.get(&worker).unwrap_or(&EMPTY_SHIFTS)
    }

    /// Vue complète créneau → employés (les créneaux vides n'y figurent pas).
    pub fn all_assignments(&self) -> &BTreeMap<ShiftId, BTreeSet<WorkerId>> {
        &self.by_shift
    }

    /// Paires dans l'ordre (créneau, employé).
    pub fn iter(&self) -> impl Iterator<Item = (ShiftId, WorkerId)> + '_ {
        self.by_shift
            .iter()
            .flat_map(|(shift, workers)| workers.iter().map(move |w| (*shift, *w)))
    }

    pub fn len(&self) -> usize {
        self.by_shift.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_shift.is_empty()
    }

    /// Vérifie la réciprocité des deux index.
    pub fn is_consistent(&self) -> bool {
        let forward = self.by_shift.iter().all(|(shift, workers)| {
            !workers.is_empty()
                && workers.iter().all(|w| {
                    self.by_worker
                        .get(w)
                        .is_some_and(|shifts| shifts.contains(shift))
                })
        });
        let backward = self.by_worker.iter().all(|(worker, shifts)| {
            !shifts.is_empty()
                && shifts.iter().all(|s| {
                    self.by_shift
                        .get(s)
                        .is_some_and(|workers| workers.contains(worker))
                })
        });
        forward && backward
    }
}

impl From<Vec<LedgerEntry>> for Ledger {
    fn from(entries: Vec<LedgerEntry>) -> Self {
        let mut ledger = Ledger::new();
        for e in entries {
            ledger.assign(e.worker, e.shift);
        }
        ledger
    }
}

impl From<Ledger> for Vec<LedgerEntry> {
    fn from(ledger: Ledger) -> Self {
        ledger
            .iter()
            .map(|(shift, worker)| LedgerEntry { shift, worker })
            .collect()
    }
}
