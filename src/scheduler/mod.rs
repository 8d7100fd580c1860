mod assignment;
mod conflicts;
pub mod constraints;
mod ledger;
mod mutate;
mod types;

pub use assignment::{Assignment, Shortfall};
pub use constraints::ShiftCatalogue;
pub use ledger::{Ledger, LedgerEntry};
pub use mutate::SwapReport;
pub use types::{Conflict, ConflictKind, Rejection, SchedError, SwapError};

use crate::model::{Roster, Shift, ShiftId, Worker, WorkerId};

/// Affecte les créneaux aux employés (glouton, une passe).
pub fn assign_shifts(workers: &[Worker], shifts: &[Shift]) -> Assignment {
    assignment::assign_shifts(workers, shifts)
}

/// `taker` reprend `shift` détenu par `holder`, ou rien ne change.
pub fn swap_in_place(
    ledger: &mut Ledger,
    taker: WorkerId,
    holder: WorkerId,
    shift: ShiftId,
    workers: &[Worker],
    shifts: &[Shift],
) -> Result<(), SwapError> {
    mutate::swap_in_place(ledger, taker, holder, shift, workers, shifts)
}

/// Variante non mutante : renvoie un rapport et, en cas de succès, le ledger modifié.
pub fn swap(
    ledger: &Ledger,
    taker: WorkerId,
    holder: WorkerId,
    shift: ShiftId,
    workers: &[Worker],
    shifts: &[Shift],
) -> SwapReport {
    mutate::swap(ledger, taker, holder, shift, workers, shifts)
}

pub fn detect_conflicts(roster: &Roster, ledger: &Ledger) -> Vec<Conflict> {
    conflicts::detect_conflicts(roster, ledger)
}

/// Scheduler : encapsule un Roster et le Ledger courant
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
    ledger: Ledger,
}

impl Scheduler {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            ledger: Ledger::new(),
        }
    }

    pub fn with_ledger(roster: Roster, ledger: Ledger) -> Self {
        Self { roster, ledger }
    }

    pub fn from_parts(workers: Vec<Worker>, shifts: Vec<Shift>) -> Result<Self, SchedError> {
        Ok(Self::new(Roster::new(workers, shifts)?))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn into_parts(self) -> (Roster, Ledger) {
        (self.roster, self.ledger)
    }

    /// Repart d'un ledger vide et relance le moteur.
    pub fn assign(&mut self) -> Assignment {
        let out = assignment::assign_shifts(self.roster.workers(), self.roster.shifts());
        self.ledger = out.ledger.clone();
        out
    }

    pub fn swap(
        &mut self,
        shift: ShiftId,
        taker: WorkerId,
        holder: WorkerId,
    ) -> Result<(), SchedError> {
        mutate::swap_in_place(
            &mut self.ledger,
            taker,
            holder,
            shift,
            self.roster.workers(),
            self.roster.shifts(),
        )?;
        Ok(())
    }

    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(&self.roster, &self.ledger)
    }

    /// Heures par employé d'après le ledger courant.
    pub fn hours_by_worker(&self) -> std::collections::BTreeMap<WorkerId, u32> {
        let catalogue = ShiftCatalogue::new(self.roster.shifts());
        self.roster
            .workers()
            .iter()
            .map(|w| {
                (
                    w.id(),
                    constraints::assigned_hours(w.id(), &self.ledger, &catalogue, None),
                )
            })
            .collect()
    }
}
